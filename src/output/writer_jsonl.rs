use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::model::ReconResult;

/// Append one compact JSON line per result.
pub fn write_jsonl(path: &Path, items: &[&ReconResult]) -> anyhow::Result<()> {
    let mut f = OpenOptions::new().append(true).create(true).open(path)?;
    for it in items {
        let line = serde_json::to_string(it)?;
        f.write_all(line.as_bytes())?;
        f.write_all(b"\n")?;
    }
    Ok(())
}

/// Overwrite `path` with the pretty-printed envelope.
pub fn write_json(path: &Path, result: &ReconResult) -> anyhow::Result<()> {
    fs::write(path, serde_json::to_string_pretty(result)?)?;
    Ok(())
}

pub fn read_jsonl(path: &Path) -> anyhow::Result<Vec<ReconResult>> {
    let mut out = Vec::new();
    let data = fs::read_to_string(path)?;
    for line in data.lines() {
        if line.trim().is_empty() { continue; }
        out.push(serde_json::from_str(line)?);
    }
    Ok(out)
}
