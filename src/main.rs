// src/main.rs
// =============================================================================
// This is the entry point of the CLI application.
//
// What happens here:
// 1. Initialize logging and parse command-line arguments
// 2. Run the worker pool over the requested URLs
// 3. Print the collected results (line report or JSON) and a summary
// 4. Exit with the proper code (0 = all harvested, 1 = failures, 2 = error)
// =============================================================================

mod cli;
mod extract;
mod fetch;
mod pool;

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use url::Url;

use cli::Cli;
use pool::{PageOutcome, PoolConfig, ScrapeResult};

#[tokio::main]
async fn main() {
    // RUST_LOG controls the diagnostic output; the report itself always
    // goes to stdout.
    tracing_subscriber::fmt::init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let args = Cli::parse();

    let urls = if args.urls.is_empty() {
        default_urls()
    } else {
        args.urls
    };
    let submitted = urls.len();

    tracing::info!(
        urls = submitted,
        workers = args.workers,
        "starting harvest run"
    );

    let config = PoolConfig {
        workers: args.workers,
        timeout: Duration::from_secs(args.timeout),
        quiet: args.json,
    };

    let started = Instant::now();
    let results = pool::run_pool(urls, config).await?;
    let duration = started.elapsed();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    let summary = RunSummary::from_results(submitted, &results, duration);
    summary.write_to_stderr();

    if summary.failed == 0 && summary.not_attempted == 0 {
        Ok(0)
    } else {
        Ok(1)
    }
}

/// The demo list used when no URLs are passed on the command line.
fn default_urls() -> Vec<Url> {
    [
        "https://www.google.com",
        "https://www.yahoo.com",
        "https://www.facebook.com",
        "https://www.instagram.com",
        "https://www.reddit.com",
        "https://www.twitter.com",
    ]
    .iter()
    .map(|raw| Url::parse(raw).expect("built-in URL list is valid"))
    .collect()
}

/// Counters for one harvesting run.
#[derive(Debug, Default)]
struct RunSummary {
    harvested: usize,
    failed: usize,
    /// URLs dropped because every worker had already retired.
    not_attempted: usize,
    links_discovered: usize,
    duration: Duration,
}

impl RunSummary {
    fn from_results(submitted: usize, results: &[ScrapeResult], duration: Duration) -> Self {
        let mut summary = RunSummary {
            not_attempted: submitted.saturating_sub(results.len()),
            duration,
            ..Default::default()
        };

        for result in results {
            match &result.outcome {
                PageOutcome::Harvested { links, .. } => {
                    summary.harvested += 1;
                    summary.links_discovered += links.len();
                }
                PageOutcome::BadStatus { .. } | PageOutcome::TransportFailed { .. } => {
                    summary.failed += 1;
                }
            }
        }

        summary
    }

    fn write_to_stderr(&self) {
        let stderr = io::stderr();
        let mut handle = stderr.lock();

        let _ = writeln!(handle, "\n=== Harvest Statistics ===");
        let _ = writeln!(handle, "Pages harvested: {}", self.harvested);
        let _ = writeln!(handle, "Pages failed: {}", self.failed);
        if self.not_attempted > 0 {
            let _ = writeln!(handle, "Urls not attempted: {}", self.not_attempted);
        }
        let _ = writeln!(handle, "Links discovered: {}", self.links_discovered);
        let _ = writeln!(
            handle,
            "Total duration: {:.2}s",
            self.duration.as_secs_f64()
        );
        let _ = writeln!(handle, "==========================\n");
    }
}
