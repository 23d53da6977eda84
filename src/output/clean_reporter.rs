use std::fmt::Write as _;

use crate::model::{BreachStatus, ReconResult};

/// The four states a report line can be in. They are never merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Found,
    NotFound,
    LookupError,
    LookupDisabled,
}

impl Verdict {
    pub fn emoji(&self) -> &str {
        match self {
            Verdict::Found => "[+]",
            Verdict::NotFound => "[-]",
            Verdict::LookupError => "[!]",
            Verdict::LookupDisabled => "[~]",
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Verdict::Found => "Found",
            Verdict::NotFound => "Not Found",
            Verdict::LookupError => "Lookup Error",
            Verdict::LookupDisabled => "Lookup Disabled",
        }
    }

    pub fn color_code(&self) -> &str {
        match self {
            Verdict::Found => "\x1b[1;92m",          // Bright Green
            Verdict::NotFound => "\x1b[0;37m",       // Grey
            Verdict::LookupError => "\x1b[1;91m",    // Bright Red
            Verdict::LookupDisabled => "\x1b[1;93m", // Yellow
        }
    }

    pub fn reset_color() -> &'static str {
        "\x1b[0m"
    }

    fn paint(&self, color: bool) -> String {
        if color {
            format!("{}{} {}{}", self.color_code(), self.emoji(), self.label(), Self::reset_color())
        } else {
            format!("{} {}", self.emoji(), self.label())
        }
    }
}

/// Verdict for the email branch as a whole.
pub fn email_verdict(status: BreachStatus, breach_count: usize) -> Verdict {
    match status {
        BreachStatus::NoApiKey => Verdict::LookupDisabled,
        BreachStatus::Error => Verdict::LookupError,
        BreachStatus::Ok if breach_count > 0 => Verdict::Found,
        BreachStatus::Ok => Verdict::NotFound,
    }
}

/// Render a result for the terminal.
pub fn render_text(result: &ReconResult, color: bool) -> String {
    let mut out = String::new();
    let rule = "-".repeat(60);
    match result {
        ReconResult::Username { target, outcomes } => {
            let _ = writeln!(out, "[>] Username scan: {target}");
            let _ = writeln!(out, "{rule}");
            let width = outcomes.iter().map(|o| o.platform.len()).max().unwrap_or(0);
            for o in outcomes {
                let verdict = if o.found { Verdict::Found } else { Verdict::NotFound };
                let status = o.http_status.map(|s| s.to_string()).unwrap_or_else(|| "-".into());
                let _ = writeln!(
                    out,
                    "{:<width$}  {:<3}  {}  {}",
                    o.platform,
                    status,
                    verdict.paint(color),
                    o.url,
                    width = width
                );
            }
            let _ = writeln!(out, "{rule}");
            let _ = writeln!(out, "[*] {} of {} platforms matched", result.found_count(), outcomes.len());
        }
        ReconResult::Email { target, status, breaches } => {
            let _ = writeln!(out, "[>] Email breach scan: {target}");
            let _ = writeln!(out, "{rule}");
            let verdict = email_verdict(*status, breaches.len());
            let detail = match verdict {
                Verdict::LookupDisabled => "HIBP API key not configured; no breach information available.".to_string(),
                Verdict::LookupError => "Error while checking breaches.".to_string(),
                Verdict::NotFound => "No breaches found.".to_string(),
                Verdict::Found => format!("{} breach(es) found:", breaches.len()),
            };
            let _ = writeln!(out, "{}  {}", verdict.paint(color), detail);
            for b in breaches {
                let _ = writeln!(out, "    {} ({}) - {}", b.name, b.breach_date, b.data_classes.join(", "));
            }
        }
    }
    out
}

pub fn print_report(result: &ReconResult, color: bool) {
    print!("{}", render_text(result, color));
}
