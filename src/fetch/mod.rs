// src/fetch/mod.rs
// =============================================================================
// Fetching: construction of the shared HTTP client and the single-URL
// retrieval the workers call. The transport itself is an external
// collaborator (`reqwest`); its errors are passed through untouched.
// =============================================================================

mod http;

pub use http::{build_client, fetch_page, FetchedPage};
