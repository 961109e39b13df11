//! CLI mode for tee-dl: fetch the given URLs, or the default one.

mod summary;

use std::time::Duration;

use crate::{AppConfig, Error, Fetcher};

use summary::print_summary;

/// Builds the HTTP client used for every download in a run.
///
/// No request timeout is set; a stalled server stalls the download.
fn build_http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .tcp_keepalive(Duration::from_secs(30))
        .build()
}

/// Picks the URLs to fetch: the arguments, or the configured default.
fn resolve_urls(config: &AppConfig, urls: Vec<String>) -> Vec<String> {
    if urls.is_empty() {
        log::info!("No URLs given, using default {}", config.default_url);
        vec![config.default_url.clone()]
    } else {
        urls
    }
}

/// Runs the CLI download mode with the given URLs.
///
/// # Errors
///
/// Returns the first download error, or [`Error::BatchFailed`] when
/// `keep_going` is set and any URL failed.
pub async fn run(config: AppConfig, urls: Vec<String>) -> crate::Result<()> {
    run_with_client(config, urls, build_http_client()?).await
}

/// Runs the CLI download mode using an already configured HTTP client.
///
/// # Errors
///
/// See [`run`].
pub async fn run_with_client(
    config: AppConfig,
    urls: Vec<String>,
    client: reqwest::Client,
) -> crate::Result<()> {
    let urls = resolve_urls(&config, urls);
    let fetcher = Fetcher::new(client, config.fetch);

    let report = fetcher.fetch_all(&urls).await?;
    if report.outcomes.len() > 1 {
        print_summary(&report);
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(Error::BatchFailed {
            failed: report.failures(),
            total: report.outcomes.len(),
        })
    }
}
