mod common;

use std::time::{Duration, Instant};

use common::{closed_port_url, Reply, StubServer};
use tracenet::{BreachRecord, BreachStatus, Config, ReconEngine, ReconResult};

fn engine_with_key(base: &str) -> ReconEngine {
    let config = Config {
        hibp_api_key: Some("secret-key".into()),
        breach_api_base: base.to_string(),
        breach_timeout_secs: 2,
        ..Config::default()
    };
    ReconEngine::new(config).expect("engine")
}

fn email_parts(r: ReconResult) -> (BreachStatus, Vec<BreachRecord>) {
    match r {
        ReconResult::Email { status, breaches, .. } => (status, breaches),
        other => panic!("expected email result, got {other:?}"),
    }
}

const ADOBE: &str = r#"[
  {"Name":"Adobe","Title":"Adobe","Domain":"adobe.com","BreachDate":"2013-10-04",
   "DataClasses":["Email addresses","Password hints","Passwords","Usernames"],"IsVerified":true},
  {"Name":"LinkedIn","BreachDate":"2012-05-05","DataClasses":["Email addresses","Passwords"]}
]"#;

#[tokio::test]
async fn ok_response_is_parsed_in_order() {
    let stub = StubServer::start(vec![("/api/v3/breachedaccount/", Reply::Body(200, ADOBE.into()))]).await;
    let e = engine_with_key(&stub.base);

    let (status, breaches) = email_parts(e.recon(" a@b.com ").await.unwrap());
    assert_eq!(status, BreachStatus::Ok);
    assert_eq!(breaches.len(), 2);
    assert_eq!(breaches[0].name, "Adobe");
    assert_eq!(breaches[0].breach_date, "2013-10-04");
    assert_eq!(breaches[0].data_classes[2], "Passwords");
    assert_eq!(breaches[1].name, "LinkedIn");

    let reqs = stub.requests();
    assert_eq!(reqs.len(), 1);
    assert!(reqs[0].starts_with("get /api/v3/breachedaccount/a%40b.com?truncateresponse=false "));
    assert!(reqs[0].contains("hibp-api-key: secret-key"));
}

#[tokio::test]
async fn not_found_is_a_confirmed_empty_list() {
    let stub = StubServer::start(vec![("/api/", Reply::Status(404))]).await;
    let e = engine_with_key(&stub.base);

    let (status, breaches) = email_parts(e.recon("clean@example.com").await.unwrap());
    assert_eq!(status, BreachStatus::Ok);
    assert!(breaches.is_empty());
}

#[tokio::test]
async fn other_statuses_are_errors() {
    for code in [401u16, 429, 500, 503] {
        let stub = StubServer::start(vec![("/api/", Reply::Status(code))]).await;
        let e = engine_with_key(&stub.base);
        let (status, breaches) = email_parts(e.recon("a@b.com").await.unwrap());
        assert_eq!(status, BreachStatus::Error, "HTTP {code}");
        assert!(breaches.is_empty());
    }
}

#[tokio::test]
async fn malformed_body_is_an_error() {
    let stub = StubServer::start(vec![("/api/", Reply::Body(200, "{\"not\":\"a list\"}".into()))]).await;
    let e = engine_with_key(&stub.base);
    let (status, breaches) = email_parts(e.recon("a@b.com").await.unwrap());
    assert_eq!(status, BreachStatus::Error);
    assert!(breaches.is_empty());
}

#[tokio::test]
async fn unreachable_api_is_an_error_not_a_failure() {
    let e = engine_with_key(&closed_port_url());
    let (status, breaches) = email_parts(e.recon("a@b.com").await.expect("recon absorbs transport errors"));
    assert_eq!(status, BreachStatus::Error);
    assert!(breaches.is_empty());
}

#[tokio::test]
async fn stalled_api_times_out_as_error() {
    let stub = StubServer::start(vec![("/api/", Reply::Hang)]).await;
    let config = Config {
        hibp_api_key: Some("k".into()),
        breach_api_base: stub.base.clone(),
        breach_timeout_secs: 1,
        ..Config::default()
    };
    let e = ReconEngine::new(config).unwrap();
    let (status, _) = email_parts(e.recon("a@b.com").await.unwrap());
    assert_eq!(status, BreachStatus::Error);
}

#[tokio::test]
async fn slow_body_counts_against_the_same_deadline() {
    // Headers arrive inside the budget, the body only after it has run out.
    let stub = StubServer::start(vec![("/api/", Reply::Trickle(600, 900, "[]".into()))]).await;
    let config = Config {
        hibp_api_key: Some("k".into()),
        breach_api_base: stub.base.clone(),
        breach_timeout_secs: 1,
        ..Config::default()
    };
    let e = ReconEngine::new(config).unwrap();

    let start = Instant::now();
    let (status, breaches) = email_parts(e.recon("a@b.com").await.unwrap());
    assert_eq!(status, BreachStatus::Error);
    assert!(breaches.is_empty());
    assert!(start.elapsed() < Duration::from_millis(1400), "lookup outlived its deadline");
}

#[tokio::test]
async fn missing_key_makes_no_request() {
    let stub = StubServer::start(vec![("/", Reply::Body(200, ADOBE.into()))]).await;
    let config = Config { breach_api_base: stub.base.clone(), ..Config::default() };
    let e = ReconEngine::new(config).unwrap();

    let r = e.recon("a@b.com").await.unwrap();
    assert_eq!(
        r,
        ReconResult::Email { target: "a@b.com".into(), status: BreachStatus::NoApiKey, breaches: vec![] }
    );
    assert_eq!(stub.hits(), 0);
}
