// src/pool/dispatcher.rs
// =============================================================================
// The main flow: wire the job queue and result channel, start the worker
// pool and its two coordination tasks, feed the jobs, and wait for the
// completion signal.
//
// Shutdown order matters here:
// 1. The dispatcher closes the job queue once every URL is submitted, so
//    workers observe end-of-stream after draining it.
// 2. The result channel closes by construction when the last worker drops
//    its sender - including workers that retired early - so the consumer
//    can never block on a sender that no longer exists.
// 3. The consumer drains the result channel to end-of-stream and only then
//    fires the one-shot completion signal, so every result is observed
//    exactly once before the dispatcher returns.
// =============================================================================

use std::time::Duration;

use anyhow::{Context, Result};
use futures::future::join_all;
use tokio::sync::{mpsc, oneshot};
use url::Url;

use crate::fetch;
use crate::pool::types::{Job, PageOutcome, ScrapeResult};
use crate::pool::worker;

/// Tuning for a single harvesting run.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Number of workers pulling from the job queue.
    pub workers: usize,
    /// Per-request timeout handed to the shared HTTP client.
    pub timeout: Duration,
    /// Suppress the per-result report lines on stdout.
    pub quiet: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: 3,
            timeout: Duration::from_secs(10),
            quiet: false,
        }
    }
}

/// Fetches every URL through the worker pool and returns the collected
/// results once all work has completed.
///
/// Results arrive in completion order, not submission order; workers race
/// on the shared queue and fetch latency varies per URL.
pub async fn run_pool(urls: Vec<Url>, config: PoolConfig) -> Result<Vec<ScrapeResult>> {
    let client = fetch::build_client(config.timeout).context("failed to build HTTP client")?;

    // A pool needs at least one worker.
    let workers = config.workers.max(1);
    let (job_tx, job_rx) = async_channel::bounded::<Job>(workers);
    let (result_tx, mut result_rx) = mpsc::channel::<ScrapeResult>(workers);

    let mut handles = Vec::with_capacity(workers);
    for id in 0..workers {
        handles.push(tokio::spawn(worker::run(
            id,
            job_rx.clone(),
            result_tx.clone(),
            client.clone(),
        )));
    }

    // The workers now hold the only receiver clones and result senders.
    // Once every worker exits, the result channel reaches end-of-stream.
    drop(job_rx);
    drop(result_tx);

    // Waits for every worker, including ones that retired early after a
    // failed fetch.
    let supervisor = tokio::spawn(async move {
        for (id, joined) in join_all(handles).await.into_iter().enumerate() {
            if let Err(err) = joined {
                tracing::error!(worker = id, "worker task failed: {err}");
            }
        }
        tracing::debug!("worker pool drained");
    });

    let quiet = config.quiet;
    let (done_tx, done_rx) = oneshot::channel();
    let consumer = tokio::spawn(async move {
        let mut collected = Vec::new();
        while let Some(result) = result_rx.recv().await {
            if !quiet {
                report(&result);
            }
            collected.push(result);
        }
        // End-of-stream observed: every emitted result is accounted for.
        let _ = done_tx.send(collected);
    });

    for url in urls {
        if job_tx.send(url).await.is_err() {
            tracing::warn!("every worker has exited; remaining urls will not be fetched");
            break;
        }
    }
    job_tx.close();

    let results = done_rx
        .await
        .context("result consumer dropped its completion signal")?;
    let _ = supervisor.await;
    let _ = consumer.await;

    Ok(results)
}

/// Prints one result in arrival order.
fn report(result: &ScrapeResult) {
    match &result.outcome {
        PageOutcome::Harvested { links, .. } => {
            println!("Results for {} : {}", result.url, links.len());
        }
        PageOutcome::BadStatus { status_code } => {
            println!("Request to {} failed with status: {}", result.url, status_code);
        }
        PageOutcome::TransportFailed { message } => {
            println!("Request to {} failed: {}", result.url, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn test_config(workers: usize) -> PoolConfig {
        PoolConfig {
            workers,
            timeout: Duration::from_secs(5),
            quiet: true,
        }
    }

    fn page_urls(server: &MockServer, count: usize) -> Vec<Url> {
        (0..count)
            .map(|i| Url::parse(&server.url(format!("/page{i}"))).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn every_job_produces_exactly_one_result() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET);
            then.status(200).body(r#"<a href="/next">next</a>"#);
        });

        let urls = page_urls(&server, 6);
        let results = run_pool(urls.clone(), test_config(3)).await.unwrap();

        assert_eq!(results.len(), 6);
        assert!(results.iter().all(|r| r.is_ok()));

        // No duplication, no loss: each submitted URL appears exactly once.
        let mut seen: Vec<String> = results.iter().map(|r| r.url.clone()).collect();
        let mut submitted: Vec<String> = urls.iter().map(|u| u.to_string()).collect();
        seen.sort();
        submitted.sort();
        assert_eq!(seen, submitted);
    }

    #[tokio::test]
    async fn empty_url_list_completes_without_deadlock() {
        let results = run_pool(Vec::new(), test_config(3)).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn single_worker_pool_drains_the_whole_queue() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET);
            then.status(200).body(r#"<a href="/next">next</a>"#);
        });

        let results = run_pool(page_urls(&server, 4), test_config(1)).await.unwrap();
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.is_ok()));
    }

    #[tokio::test]
    async fn non_ok_status_is_reported_with_its_code() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404);
        });

        let url = Url::parse(&server.url("/missing")).unwrap();
        let results = run_pool(vec![url], test_config(1)).await.unwrap();

        assert_eq!(results.len(), 1);
        assert!(matches!(
            results[0].outcome,
            PageOutcome::BadStatus { status_code: 404 }
        ));
    }

    #[tokio::test]
    async fn surviving_workers_drain_the_queue_after_one_retires() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET);
            then.status(200).body(r#"<a href="/next">next</a>"#);
        });

        // One refused connection retires a single worker; the other two
        // still claim every remaining job.
        let mut urls = page_urls(&server, 5);
        urls.insert(0, Url::parse("http://127.0.0.1:1/").unwrap());

        let results = run_pool(urls, test_config(3)).await.unwrap();

        assert_eq!(results.len(), 6);
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 5);
        assert_eq!(
            results
                .iter()
                .filter(|r| matches!(r.outcome, PageOutcome::TransportFailed { .. }))
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn pool_of_one_stops_after_a_failed_fetch() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET);
            then.status(200).body(r#"<a href="/next">next</a>"#);
        });

        // A failed fetch retires the only worker, so the remaining jobs are
        // dropped and the run still terminates with the single result.
        let mut urls = vec![Url::parse("http://127.0.0.1:1/").unwrap()];
        urls.extend(page_urls(&server, 2));

        let results = run_pool(urls, test_config(1)).await.unwrap();

        assert_eq!(results.len(), 1);
        assert!(matches!(
            results[0].outcome,
            PageOutcome::TransportFailed { .. }
        ));
    }
}
