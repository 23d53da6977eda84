use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::model::{BreachStatus, ReconResult};

/// An HTML report ready to hand to a mail or web collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub subject: String,
    pub html: String,
}

pub fn subject_for(result: &ReconResult) -> String {
    match result {
        ReconResult::Username { target, .. } => format!("TraceNet Username Report - {target}"),
        ReconResult::Email { target, .. } => format!("TraceNet Email Breach Report - {target}"),
    }
}

pub fn build_report(result: &ReconResult) -> Report {
    let mut html = format!("<h2>TraceNet Report for {}</h2>", encode_text(result.target()));

    match result {
        ReconResult::Username { outcomes, .. } => {
            html.push_str("<p>Username scan results:</p><ul>");
            for o in outcomes {
                let status = if o.found { "Found" } else { "Not Found" };
                let http = o.http_status.map(|s| s.to_string()).unwrap_or_else(|| "none".into());
                html.push_str(&format!(
                    "<li>{}: {} (HTTP: {}) - <a href=\"{}\">{}</a></li>",
                    encode_text(&o.platform),
                    status,
                    http,
                    encode_double_quoted_attribute(&o.url),
                    encode_text(&o.url),
                ));
            }
            html.push_str("</ul>");
        }
        ReconResult::Email { status, breaches, .. } => {
            html.push_str("<p>Email breach scan:</p>");
            match status {
                BreachStatus::NoApiKey => {
                    html.push_str("<p>HIBP API key not configured; no breach information available.</p>")
                }
                BreachStatus::Error => html.push_str("<p>Error while checking breaches.</p>"),
                BreachStatus::Ok if breaches.is_empty() => html.push_str("<p>No breaches found.</p>"),
                BreachStatus::Ok => {
                    html.push_str("<ul>");
                    for b in breaches {
                        html.push_str(&format!(
                            "<li><strong>{}</strong> - {} - {}</li>",
                            encode_text(&b.name),
                            encode_text(&b.breach_date),
                            encode_text(&b.data_classes.join(", ")),
                        ));
                    }
                    html.push_str("</ul>");
                }
            }
        }
    }

    Report { subject: subject_for(result), html }
}
