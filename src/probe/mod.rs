pub mod http_probe;

pub use http_probe::{classify, probe, probe_url};
