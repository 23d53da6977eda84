use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{ReconError, Result};

/// Substitution point inside a URL template.
pub const PLACEHOLDER: &str = "{username}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformEntry {
    pub name: String,
    pub url_template: String,
}

impl PlatformEntry {
    pub fn new(name: impl Into<String>, url_template: impl Into<String>) -> Self {
        Self { name: name.into(), url_template: url_template.into() }
    }

    /// Substitute the URL-encoded identifier into the template.
    pub fn render_url(&self, identifier: &str) -> String {
        self.url_template.replacen(PLACEHOLDER, &quote_path(identifier), 1)
    }

    fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| ReconError::InvalidPlatform {
            name: self.name.clone(),
            reason: reason.to_string(),
        };
        if self.name.trim().is_empty() {
            return Err(invalid("empty platform name"));
        }
        match self.url_template.matches(PLACEHOLDER).count() {
            1 => {}
            0 => return Err(invalid("template has no {username} placeholder")),
            _ => return Err(invalid("template has more than one {username} placeholder")),
        }
        if url::Url::parse(&self.render_url("probe")).is_err() {
            return Err(invalid("template does not form a valid URL"));
        }
        Ok(())
    }
}

/// Percent-encode `value` for use in a URL path. `/` stays literal, every
/// other byte outside the unreserved set is escaped.
pub fn quote_path(value: &str) -> String {
    value
        .split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/")
}

const BUILTIN: &[(&str, &str)] = &[
    ("GitHub", "https://github.com/{username}"),
    ("Twitter", "https://twitter.com/{username}"),
    ("Instagram", "https://www.instagram.com/{username}"),
    ("Reddit", "https://www.reddit.com/user/{username}"),
    ("LinkedIn", "https://www.linkedin.com/in/{username}"),
    ("StackOverflow", "https://stackoverflow.com/users/{username}"),
    ("GitLab", "https://gitlab.com/{username}"),
    ("Medium", "https://medium.com/@{username}"),
    ("Bitbucket", "https://bitbucket.org/{username}"),
    ("HackerOne", "https://hackerone.com/{username}"),
    ("Imgur", "https://imgur.com/user/{username}"),
];

static PLATFORMS: Lazy<Vec<PlatformEntry>> = Lazy::new(|| {
    BUILTIN.iter().map(|(name, tpl)| PlatformEntry::new(*name, *tpl)).collect()
});

/// The built-in platforms, in report order.
pub fn all_platforms() -> &'static [PlatformEntry] {
    &PLATFORMS
}

/// Ordered, validated set of platforms a scan runs against.
#[derive(Debug, Clone)]
pub struct PlatformRegistry {
    entries: Vec<PlatformEntry>,
}

impl PlatformRegistry {
    pub fn builtin() -> Self {
        Self { entries: all_platforms().to_vec() }
    }

    /// Build a registry from caller-supplied entries. Order is kept as given.
    pub fn new(entries: Vec<PlatformEntry>) -> Result<Self> {
        for (i, entry) in entries.iter().enumerate() {
            entry.validate()?;
            if entries[..i].iter().any(|e| e.name.eq_ignore_ascii_case(&entry.name)) {
                return Err(ReconError::InvalidPlatform {
                    name: entry.name.clone(),
                    reason: "duplicate platform name".to_string(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// Keep only the named platforms (case-insensitive), preserving order.
    /// An empty filter keeps everything.
    pub fn filtered(&self, names: &[String]) -> Result<Self> {
        if names.is_empty() {
            return Ok(self.clone());
        }
        if let Some(unknown) = names
            .iter()
            .find(|n| !self.entries.iter().any(|e| e.name.eq_ignore_ascii_case(n)))
        {
            return Err(ReconError::InvalidPlatform {
                name: unknown.clone(),
                reason: "not in registry".to_string(),
            });
        }
        let entries = self
            .entries
            .iter()
            .filter(|e| names.iter().any(|n| e.name.eq_ignore_ascii_case(n)))
            .cloned()
            .collect();
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[PlatformEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PlatformRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
