use clap::Parser;

#[derive(clap::Parser, Debug)]
#[command(author, version, about = "Username presence and email breach reconnaissance", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable detailed debug logging (global)
    #[arg(long, global = true, default_value_t = false)]
    pub debug: bool,

    /// Enable verbose logging (global)
    #[arg(long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// JSON config file (values are overridden by env and flags)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Scan a username across platforms, or an email against the breach database
    Scan {
        /// Username or email address (anything containing '@' is treated as email)
        target: String,

        /// Per-probe timeout in seconds (default: 6)
        #[arg(long)]
        timeout: Option<u64>,

        /// Breach API timeout in seconds (default: 10)
        #[arg(long)]
        breach_timeout: Option<u64>,

        /// Max probes in flight (default: one per platform)
        #[arg(short = 'c', long)]
        concurrency: Option<usize>,

        /// HIBP API key (defaults to $HIBP_API_KEY)
        #[arg(long, value_name = "KEY")]
        hibp_key: Option<String>,

        /// Only probe these platforms (repeatable, case-insensitive)
        #[arg(short = 'p', long = "platform", value_name = "NAME")]
        platforms: Vec<String>,

        /// Print the result envelope as JSON instead of the text report
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Disable ANSI colors in the text report
        #[arg(long, default_value_t = false)]
        no_color: bool,

        /// Write report.json, report.jsonl, report.csv and report.html here
        #[arg(short = 'o', long)]
        out: Option<String>,
    },

    /// Re-render scans saved to a report.jsonl file
    Show {
        /// Path to a JSONL file written by `scan --out`
        file: String,

        /// Render the envelope(s) as JSON instead of the text report
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Disable ANSI colors in the text report
        #[arg(long, default_value_t = false)]
        no_color: bool,
    },

    /// List the built-in platforms and their URL templates
    Platforms,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
