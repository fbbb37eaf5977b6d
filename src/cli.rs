// src/cli.rs
// =============================================================================
// This file defines the command-line interface using the `clap` crate.
//
// URLs are validated at parse time by the `url` crate, so everything past
// this boundary works with well-formed `Url` values. When no URLs are
// given, main falls back to a built-in demo list.
// =============================================================================

use clap::Parser;
use url::Url;

#[derive(Parser, Debug)]
#[command(
    name = "link-harvester",
    version,
    about = "Concurrently fetches web pages and harvests their anchor links",
    long_about = "link-harvester fetches a set of URLs through a fixed-size worker pool, \
                  scans each page for <a href=\"...\"> targets, and reports one outcome \
                  per URL. Without arguments it runs against a built-in demo list."
)]
pub struct Cli {
    /// URLs to fetch (defaults to the built-in demo list)
    pub urls: Vec<Url>,

    /// Number of concurrent fetch workers
    #[arg(long, default_value_t = 3)]
    pub workers: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Output the collected results as JSON instead of the line report
    #[arg(long)]
    pub json: bool,
}
