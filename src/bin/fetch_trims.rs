//! Pull every record of one catalog endpoint for a model year and
//! write the snapshot the dashboard reads.
//!
//! Credentials come from `CARAPI_API_TOKEN` / `CARAPI_API_SECRET`.
//! Endpoint and year can be overridden with `TRIMSCOPE_ENDPOINT` and
//! `TRIMSCOPE_YEAR`.

use anyhow::{Context, Result};

use trimscope::fetch::{self, CatalogClient, FetchRequest};

fn main() -> Result<()> {
    env_logger::init();

    let api_token =
        std::env::var("CARAPI_API_TOKEN").context("CARAPI_API_TOKEN is not set")?;
    let api_secret =
        std::env::var("CARAPI_API_SECRET").context("CARAPI_API_SECRET is not set")?;
    let endpoint =
        std::env::var("TRIMSCOPE_ENDPOINT").unwrap_or_else(|_| "engines".to_string());
    let year = std::env::var("TRIMSCOPE_YEAR").unwrap_or_else(|_| "2020".to_string());

    let client = CatalogClient::authenticate(fetch::DEFAULT_BASE_URL, &api_token, &api_secret)
        .context("authenticating against the catalog API")?;
    log::info!("authenticated, fetching {endpoint} for {year}");

    let request = FetchRequest::new(&endpoint, &year).with_verbose("yes");
    let records = client.fetch_all(&request);
    log::info!("fetched {} records", records.len());

    let path = fetch::write_snapshot(&endpoint, &records)?;
    println!("Wrote {} records to {}", records.len(), path.display());

    Ok(())
}
