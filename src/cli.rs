//! Command-line interface definitions for News Source Check.
//!
//! Every option has a built-in default; a few can also come from environment
//! variables. Values given here override the optional YAML settings file.

use clap::{ArgAction, Parser};

/// Command-line arguments for the News Source Check application.
///
/// # Examples
///
/// ```sh
/// # Check the built-in domain list in the US edition
/// news_source_check
///
/// # Check a file of domains in every edition, writing CSV
/// news_source_check -i domains.txt -o results.csv --region all
///
/// # Try two strategies per region, two domains at a time
/// news_source_check -i domains.txt -s site -s source -c 2
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Newline-delimited file of domains (blank lines and `#` comments ignored)
    #[arg(short, long, env = "NEWS_CHECK_INPUT")]
    pub input: Option<String>,

    /// Report path; a `.csv` extension writes CSV, anything else JSON
    #[arg(short, long, default_value = "results.json")]
    pub output: String,

    /// Run the browser without a window (`--headless false` to watch it)
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    pub headless: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,

    /// Region to query: en-US, es-ES, fr-FR, it-IT, de-DE, pt-BR or all
    #[arg(short, long, env = "NEWS_CHECK_REGION", default_value = "en-US")]
    pub region: String,

    /// Search strategy to try, in order (site, exact, source); repeatable
    #[arg(short, long = "strategy")]
    pub strategies: Vec<String>,

    /// Number of domains checked at the same time (1 to 8)
    #[arg(short, long)]
    pub concurrency: Option<usize>,

    /// Pause between domains, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Page load timeout, in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// User agent sent with each request
    #[arg(long, env = "NEWS_CHECK_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Optional path to a YAML settings file
    #[arg(long)]
    pub config: Option<String>,
}
