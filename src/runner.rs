use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::cli::{Cli, Commands};
use tracenet::output::{build_report, print_report, read_jsonl, write_csv, write_json, write_jsonl};
use tracenet::{all_platforms, Config, PlatformRegistry, ReconEngine, ReconResult};

fn init_logging(cli: &Cli) {
    // Keep reqwest/hyper at INFO so a debug run is not buried in connection noise.
    use tracing_subscriber::EnvFilter;
    let crate_level = if cli.debug { "debug" } else if cli.verbose { "info" } else { "warn" };
    let filter_str = format!(
        "tracenet={crate},reqwest=info,hyper=info,h2=info,rustls=warn",
        crate = crate_level
    );
    let env_filter = EnvFilter::try_new(&filter_str).unwrap_or_else(|_| EnvFilter::new(crate_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(true)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&str>) -> anyhow::Result<Config> {
    let base = match path {
        Some(p) => Config::from_file(Path::new(p)).with_context(|| format!("failed to load config {p}"))?,
        None => Config::default(),
    };
    Ok(base.apply_env())
}

pub async fn run_from_cli(cli: Cli) -> anyhow::Result<()> {
    init_logging(&cli);
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Platforms => {
            for p in all_platforms() {
                println!("{:<14} {}", p.name, p.url_template);
            }
            Ok(())
        }
        Commands::Show { file, json, no_color } => {
            let results = read_jsonl(Path::new(&file)).with_context(|| format!("failed to read {file}"))?;
            if results.is_empty() {
                println!("[!] No saved scans in {}", file);
            }
            for result in &results {
                if json {
                    println!("{}", serde_json::to_string_pretty(result)?);
                } else {
                    print_report(result, !no_color);
                    println!();
                }
            }
            Ok(())
        }
        Commands::Scan { target, timeout, breach_timeout, concurrency, hibp_key, platforms, json, no_color, out } => {
            let mut config = config;
            if let Some(t) = timeout {
                config.probe_timeout_secs = t;
            }
            if let Some(t) = breach_timeout {
                config.breach_timeout_secs = t;
            }
            if concurrency.is_some() {
                config.concurrency = concurrency;
            }
            if let Some(k) = hibp_key.filter(|k| !k.trim().is_empty()) {
                config.hibp_api_key = Some(k);
            }

            let registry = PlatformRegistry::builtin().filtered(&platforms)?;
            let engine = ReconEngine::with_registry(config, registry)?;

            tracing::info!(
                platforms = engine.registry().len(),
                breach_lookup = engine.breach_lookup_enabled(),
                "engine ready"
            );

            let result = engine.recon(&target).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_report(&result, !no_color);
            }

            if let Some(dir) = out {
                write_outputs(Path::new(&dir), &result)?;
                println!("[+] Wrote reports to {}", dir);
            }
            Ok(())
        }
    }
}

fn write_outputs(dir: &Path, result: &ReconResult) -> anyhow::Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    }
    let path = |name: &str| -> PathBuf { dir.join(name) };

    write_json(&path("report.json"), result)?;
    write_jsonl(&path("report.jsonl"), &[result])?;
    write_csv(&path("report.csv"), result)?;

    let report = build_report(result);
    let html = format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{}</title></head><body>{}</body></html>\n",
        html_escape::encode_text(&report.subject),
        report.html
    );
    fs::write(path("report.html"), html)?;
    Ok(())
}
