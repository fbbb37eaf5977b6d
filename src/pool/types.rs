// src/pool/types.rs
// =============================================================================
// Shared types for the worker pool: the job and result channel aliases and
// the result record each worker emits.
//
// The two channels are the only state shared across tasks. The job queue is
// multi-consumer (every worker pulls from it); the result channel is
// multi-producer (every worker pushes into it) with a single consumer.
// =============================================================================

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use url::Url;

/// A single URL awaiting processing. Claimed by exactly one worker.
pub type Job = Url;

pub type JobSender = async_channel::Sender<Job>;
pub type JobReceiver = async_channel::Receiver<Job>;

pub type ResultSender = mpsc::Sender<ScrapeResult>;
pub type ResultReceiver = mpsc::Receiver<ScrapeResult>;

/// What happened to one fetched URL.
///
/// Exactly one variant applies per job: a page was harvested, the server
/// answered with a non-200 status, or the request never produced a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PageOutcome {
    /// Fetch returned 200 and the body was scanned for links.
    Harvested { status_code: u16, links: Vec<String> },
    /// The server answered with a status other than 200.
    BadStatus { status_code: u16 },
    /// The request failed before any response arrived.
    TransportFailed { message: String },
}

/// The outcome record for one job, created once by the worker that claimed
/// it and immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeResult {
    /// The URL that was processed.
    pub url: String,
    #[serde(flatten)]
    pub outcome: PageOutcome,
}

impl ScrapeResult {
    /// True iff the fetch returned 200 and the link scan ran to completion.
    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, PageOutcome::Harvested { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn harvested_is_ok() {
        let result = ScrapeResult {
            url: "https://example.com/".to_string(),
            outcome: PageOutcome::Harvested {
                status_code: 200,
                links: vec!["/docs".to_string()],
            },
        };
        assert!(result.is_ok());
    }

    #[test]
    fn failures_are_not_ok() {
        let bad_status = ScrapeResult {
            url: "https://example.com/".to_string(),
            outcome: PageOutcome::BadStatus { status_code: 404 },
        };
        assert!(!bad_status.is_ok());

        let transport = ScrapeResult {
            url: "https://example.com/".to_string(),
            outcome: PageOutcome::TransportFailed {
                message: "connection refused".to_string(),
            },
        };
        assert!(!transport.is_ok());
    }

    #[test]
    fn result_serializes_with_tagged_outcome() {
        let result = ScrapeResult {
            url: "https://example.com/".to_string(),
            outcome: PageOutcome::BadStatus { status_code: 404 },
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["url"], "https://example.com/");
        assert_eq!(json["outcome"], "bad_status");
        assert_eq!(json["status_code"], 404);
    }
}
