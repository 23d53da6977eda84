use csv::Writer;
use std::fs::File;
use std::path::Path;

use crate::model::ReconResult;

/// Tabular export. Username scans get one row per platform; email scans get
/// one row per breach with the lookup status on every row, or a single
/// status-only row when there is nothing to list.
pub fn write_csv(path: &Path, result: &ReconResult) -> anyhow::Result<()> {
    let f = File::create(path)?;
    let mut w = Writer::from_writer(f);
    match result {
        ReconResult::Username { target, outcomes } => {
            w.write_record(["target", "platform", "url", "found", "http_status"])?;
            for o in outcomes {
                w.write_record(&[
                    target.clone(),
                    o.platform.clone(),
                    o.url.clone(),
                    o.found.to_string(),
                    o.http_status.map(|s| s.to_string()).unwrap_or_default(),
                ])?;
            }
        }
        ReconResult::Email { target, status, breaches } => {
            let status = status.as_str();
            w.write_record(["target", "status", "name", "breach_date", "data_classes"])?;
            if breaches.is_empty() {
                w.write_record([target.as_str(), status, "", "", ""])?;
            }
            for b in breaches {
                w.write_record(&[
                    target.clone(),
                    status.to_string(),
                    b.name.clone(),
                    b.breach_date.clone(),
                    b.data_classes.join("; "),
                ])?;
            }
        }
    }
    w.flush()?;
    Ok(())
}
