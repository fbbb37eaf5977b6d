// src/fetch/http.rs
// =============================================================================
// This module performs the network retrieval for one URL.
//
// Contract: given a URL, return the status code and (for pages we will
// parse) the body, or a transport error. The shared client is built once
// by the dispatcher and cloned into every worker; reqwest clients are
// reference-counted, so the clone is cheap.
// =============================================================================

use std::time::Duration;

use reqwest::Client;
use url::Url;

/// Builds the HTTP client shared by every worker in the pool.
pub fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(concat!("link-harvester/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
}

/// Status and body of a completed HTTP exchange.
#[derive(Debug)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

/// Fetches `url` and returns its status code and body.
///
/// The body is only read for 200 responses; any other response is dropped
/// unread, which releases the connection in every branch.
pub async fn fetch_page(client: &Client, url: &Url) -> Result<FetchedPage, reqwest::Error> {
    let response = client.get(url.clone()).send().await?;
    let status = response.status().as_u16();

    if status != 200 {
        return Ok(FetchedPage {
            status,
            body: String::new(),
        });
    }

    let body = response.text().await?;
    Ok(FetchedPage { status, body })
}
