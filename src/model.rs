use serde::{Deserialize, Serialize};

/// How a target string was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Username,
    Email,
}

/// One platform probe. `http_status` is `None` only when no response arrived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeOutcome {
    pub platform: String,
    pub url: String,
    pub found: bool,
    pub http_status: Option<u16>,
}

/// A disclosed breach, passed through from the upstream API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreachRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "BreachDate", default)]
    pub breach_date: String,
    #[serde(rename = "DataClasses", default)]
    pub data_classes: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreachStatus {
    /// No API credential configured; lookup was not attempted.
    #[serde(rename = "no_api")]
    NoApiKey,
    /// Lookup attempted but the answer is unknown.
    #[serde(rename = "error")]
    Error,
    /// Upstream answered; an empty list is a confirmed "no breaches".
    #[serde(rename = "ok")]
    Ok,
}

impl BreachStatus {
    /// Wire name, same as the serde form.
    pub fn as_str(&self) -> &'static str {
        match self {
            BreachStatus::NoApiKey => "no_api",
            BreachStatus::Error => "error",
            BreachStatus::Ok => "ok",
        }
    }
}

/// Outcome of the breach lookup branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreachLookup {
    pub status: BreachStatus,
    pub breaches: Vec<BreachRecord>,
}

impl BreachLookup {
    pub fn no_api_key() -> Self {
        Self { status: BreachStatus::NoApiKey, breaches: Vec::new() }
    }

    pub fn error() -> Self {
        Self { status: BreachStatus::Error, breaches: Vec::new() }
    }

    pub fn ok(breaches: Vec<BreachRecord>) -> Self {
        Self { status: BreachStatus::Ok, breaches }
    }
}

/// Result envelope of a single scan. Renderers must branch on the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReconResult {
    Username {
        target: String,
        outcomes: Vec<ProbeOutcome>,
    },
    Email {
        target: String,
        status: BreachStatus,
        breaches: Vec<BreachRecord>,
    },
}

impl ReconResult {
    pub fn email(target: String, lookup: BreachLookup) -> Self {
        ReconResult::Email { target, status: lookup.status, breaches: lookup.breaches }
    }

    pub fn target(&self) -> &str {
        match self {
            ReconResult::Username { target, .. } | ReconResult::Email { target, .. } => target,
        }
    }

    pub fn kind(&self) -> TargetKind {
        match self {
            ReconResult::Username { .. } => TargetKind::Username,
            ReconResult::Email { .. } => TargetKind::Email,
        }
    }

    /// Platforms found, or breaches listed for the email branch.
    pub fn found_count(&self) -> usize {
        match self {
            ReconResult::Username { outcomes, .. } => outcomes.iter().filter(|o| o.found).count(),
            ReconResult::Email { breaches, .. } => breaches.len(),
        }
    }
}
