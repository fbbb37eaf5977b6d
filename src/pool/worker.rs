// src/pool/worker.rs
// =============================================================================
// One worker in the pool: claim a job, fetch the page, harvest its links,
// publish the result. Repeats until the job queue reports end-of-stream.
//
// A failed fetch (transport error or non-200 status) retires the worker
// after its result is published; the rest of the pool keeps draining the
// queue. The completion protocol in the dispatcher accounts for retired
// workers, so shutdown stays deterministic either way.
// =============================================================================

use reqwest::Client;
use url::Url;

use crate::extract;
use crate::fetch;
use crate::pool::types::{JobReceiver, PageOutcome, ResultSender, ScrapeResult};

/// Runs one worker until the job queue closes or a fetch fails.
pub async fn run(id: usize, jobs: JobReceiver, results: ResultSender, client: Client) {
    while let Ok(url) = jobs.recv().await {
        tracing::debug!(worker = id, url = %url, "claimed job");

        let result = process_job(&client, &url).await;
        let keep_going = result.is_ok();

        if results.send(result).await.is_err() {
            // The consumer is gone; nothing left to report to.
            tracing::error!(worker = id, "result channel closed, stopping");
            return;
        }

        if !keep_going {
            tracing::warn!(worker = id, url = %url, "retiring after failed fetch");
            return;
        }
    }

    tracing::debug!(worker = id, "job queue closed, exiting");
}

/// Processes a single job into its result record.
pub(crate) async fn process_job(client: &Client, url: &Url) -> ScrapeResult {
    match fetch::fetch_page(client, url).await {
        Err(err) => ScrapeResult {
            url: url.to_string(),
            outcome: PageOutcome::TransportFailed {
                message: err.to_string(),
            },
        },
        Ok(page) if page.status != 200 => ScrapeResult {
            url: url.to_string(),
            outcome: PageOutcome::BadStatus {
                status_code: page.status,
            },
        },
        Ok(page) => ScrapeResult {
            url: url.to_string(),
            outcome: PageOutcome::Harvested {
                status_code: page.status,
                links: extract::harvest_links(&page.body),
            },
        },
    }
}
