pub mod clean_reporter;
pub mod html_report;
pub mod writer_csv;
pub mod writer_jsonl;

pub use clean_reporter::{print_report, render_text, Verdict};
pub use html_report::{build_report, Report};
pub use writer_csv::write_csv;
pub use writer_jsonl::{read_jsonl, write_json, write_jsonl};
