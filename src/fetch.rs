use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://carapi.app";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("authentication failed with status {status}: {body}")]
    AuthFailed { status: u16, body: String },
    #[error("page {page} failed with status {status}: {body}")]
    PageFailed { page: u32, status: u16, body: String },
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

/// Pagination envelope the API wraps every data page in.
#[derive(Debug, Clone, Deserialize)]
pub struct PageCollection {
    /// Total number of pages for the query.
    pub pages: u32,
    /// URL of the next page; absent or empty on the last page.
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageResponse {
    pub collection: PageCollection,
    pub data: Vec<Value>,
}

impl PageCollection {
    fn has_next(&self) -> bool {
        self.next.as_deref().is_some_and(|n| !n.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Request description
// ---------------------------------------------------------------------------

/// Query parameters for one paginated pull of a resource endpoint.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub endpoint: String,
    pub sort: String,
    pub direction: String,
    pub year: String,
    pub verbose: Option<String>,
    /// Optional fixed pause between page requests. Off by default; no
    /// adaptive rate-limit backoff exists.
    pub page_delay: Option<Duration>,
}

impl FetchRequest {
    pub fn new(endpoint: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            sort: "id".to_string(),
            direction: "asc".to_string(),
            year: year.into(),
            verbose: None,
            page_delay: None,
        }
    }

    pub fn with_verbose(mut self, verbose: impl Into<String>) -> Self {
        self.verbose = Some(verbose.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Catalog client
// ---------------------------------------------------------------------------

/// Blocking client holding the bearer token obtained at login.
/// Requests are strictly sequential.
pub struct CatalogClient {
    http: Client,
    base_url: String,
    token: String,
}

impl CatalogClient {
    /// POST `{api_token, api_secret}` to the login endpoint and keep the
    /// returned bearer token. A non-success status is fatal: no valid
    /// token exists to continue with.
    pub fn authenticate(
        base_url: impl Into<String>,
        api_token: &str,
        api_secret: &str,
    ) -> Result<Self, FetchError> {
        let base_url = base_url.into();
        let http = Client::builder()
            .user_agent(concat!("trimscope/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let response = http
            .post(format!("{base_url}/api/auth/login"))
            .header(reqwest::header::ACCEPT, "text/plain")
            .json(&serde_json::json!({
                "api_token": api_token,
                "api_secret": api_secret,
            }))
            .send()?;

        let status = response.status();
        let body = response.text().unwrap_or_default();
        let token = token_from_login(status.as_u16(), body)?;

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    /// Pull every page for the request. Page failures end the loop with
    /// whatever was accumulated so far.
    pub fn fetch_all(&self, request: &FetchRequest) -> Vec<Value> {
        fetch_all_pages(request, |page| self.get_page(request, page))
    }

    fn get_page(&self, request: &FetchRequest, page: u32) -> Result<PageResponse, FetchError> {
        let mut builder = self
            .http
            .get(format!("{}/api/{}", self.base_url, request.endpoint))
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[
                ("sort", request.sort.as_str()),
                ("direction", request.direction.as_str()),
                ("year", request.year.as_str()),
            ]);
        if let Some(verbose) = &request.verbose {
            builder = builder.query(&[("verbose", verbose.as_str())]);
        }
        let response = builder.query(&[("page", page.to_string())]).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::PageFailed {
                page,
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }
        Ok(response.json()?)
    }
}

/// Turn the login response into a token. Kept separate from the HTTP
/// call so the halt-on-non-200 decision is unit testable.
fn token_from_login(status: u16, body: String) -> Result<String, FetchError> {
    if (200..300).contains(&status) {
        Ok(body)
    } else {
        Err(FetchError::AuthFailed { status, body })
    }
}

// ---------------------------------------------------------------------------
// Pagination loop
// ---------------------------------------------------------------------------

/// Issue page-numbered requests through `fetch_page` and concatenate
/// the `data` arrays in page order.
///
/// Termination:
/// * the response reports no `next` page, or
/// * the next page number exceeds the page count reported by the first
///   response, or
/// * a page fails – logged, partial result returned, no retry.
pub fn fetch_all_pages(
    request: &FetchRequest,
    mut fetch_page: impl FnMut(u32) -> Result<PageResponse, FetchError>,
) -> Vec<Value> {
    let mut all_records = Vec::new();
    let mut page = 1u32;
    let mut max_pages: Option<u32> = None;

    loop {
        let response = match fetch_page(page) {
            Ok(r) => r,
            Err(e) => {
                log::error!("fetch of {} stopped: {e}", request.endpoint);
                break;
            }
        };
        if max_pages.is_none() {
            max_pages = Some(response.collection.pages);
        }
        let has_next = response.collection.has_next();
        all_records.extend(response.data);
        log::info!(
            "fetched page {page} of {}: {} records total",
            request.endpoint,
            all_records.len()
        );

        if !has_next {
            log::info!("reached the end of {}", request.endpoint);
            break;
        }
        page += 1;
        if max_pages.is_some_and(|max| page > max) {
            break;
        }
        if let Some(delay) = request.page_delay {
            std::thread::sleep(delay);
        }
    }

    all_records
}

// ---------------------------------------------------------------------------
// Snapshot file
// ---------------------------------------------------------------------------

/// Path the snapshot for an endpoint is written to and read from.
pub fn snapshot_path(endpoint: &str) -> PathBuf {
    Path::new("data").join(format!("{endpoint}_data.json"))
}

/// Write the fetched records as a JSON array snapshot.
pub fn write_snapshot(endpoint: &str, records: &[Value]) -> Result<PathBuf> {
    let path = snapshot_path(endpoint);
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
    }
    let file = std::fs::File::create(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer(file, records).context("writing snapshot JSON")?;
    Ok(path)
}
