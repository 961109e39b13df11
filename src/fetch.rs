//! Core fetch logic: one URL to one file, staged through a `.tmp` sibling.

use std::io::{self, Write};
use std::path::Path;

use futures::TryStreamExt;
use reqwest::header::CONTENT_LENGTH;
use tokio::io::AsyncWriteExt;
use tokio_util::io::StreamReader;

use crate::config::FetchConfig;
use crate::error::{Error, Result};
use crate::format::DisplayTotal;
use crate::fs::{FileSystem, TokioFileSystem};
use crate::progress::{ProgressCounter, ProgressWriter};
use crate::stats::{DownloadTimer, FileStats, SessionStats, SessionStatsBuilder};
use crate::url::{destination_name, destination_path, staging_path};

/// Result of fetching one URL in a batch.
#[derive(Debug)]
pub struct FetchOutcome {
    /// The URL that was fetched.
    pub url: String,
    /// Statistics on success, the failure otherwise.
    pub result: Result<FileStats>,
}

/// Per-URL outcomes and aggregate statistics for a batch.
#[derive(Debug)]
pub struct BatchReport {
    /// One outcome per processed URL, in input order.
    pub outcomes: Vec<FetchOutcome>,
    /// Aggregate statistics.
    pub stats: SessionStats,
}

impl BatchReport {
    /// Returns the number of URLs that failed.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }

    /// Returns true if every URL was downloaded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures() == 0
    }
}

/// Downloads URLs to disk one at a time with a live progress line.
pub struct Fetcher<F: FileSystem = TokioFileSystem> {
    client: reqwest::Client,
    config: FetchConfig,
    fs: F,
}

impl Fetcher<TokioFileSystem> {
    /// Creates a new fetcher with the default file system.
    #[must_use]
    pub const fn new(client: reqwest::Client, config: FetchConfig) -> Self {
        Self {
            client,
            config,
            fs: TokioFileSystem,
        }
    }
}

impl<F: FileSystem> Fetcher<F> {
    /// Creates a new fetcher with a custom file system implementation.
    #[must_use]
    pub const fn with_fs(client: reqwest::Client, config: FetchConfig, fs: F) -> Self {
        Self { client, config, fs }
    }

    /// Returns a reference to the underlying HTTP client.
    #[must_use]
    pub const fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Returns a reference to the fetch configuration.
    #[must_use]
    pub const fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Downloads `url` to `destination`, drawing progress on stdout.
    ///
    /// # Errors
    ///
    /// See [`fetch_with_output`](Self::fetch_with_output).
    pub async fn fetch(&self, destination: &Path, url: &str) -> Result<FileStats> {
        self.fetch_with_output(destination, url, io::stdout()).await
    }

    /// Downloads `url` to `destination`, drawing progress on `out`.
    ///
    /// The body is written to `{destination}.tmp` and renamed into place only
    /// after the whole response has been received. On any failure
    /// `destination` is left untouched and the `.tmp` file stays behind.
    /// `Content-Length` only feeds the progress display.
    ///
    /// # Errors
    ///
    /// Returns an error if the staging file cannot be created, the request
    /// fails or returns a non-success status, the transfer breaks off, or
    /// the final rename fails.
    pub async fn fetch_with_output<O>(
        &self,
        destination: &Path,
        url: &str,
        out: O,
    ) -> Result<FileStats>
    where
        O: Write + Unpin,
    {
        let staging = staging_path(destination);

        log::debug!("Creating {}", staging.display());
        let file = self
            .fs
            .create_file(&staging)
            .await
            .map_err(|source| Error::CreateFile {
                path: staging.clone(),
                source,
            })?;
        let timer = DownloadTimer::start();

        log::debug!("Requesting {url}");
        let response = self.client.get(url).send().await?.error_for_status()?;

        let header = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok());
        let total = DisplayTotal::from_header(header);
        if total == DisplayTotal::Unknown {
            log::warn!("{url} sent no usable Content-Length, total shown as unknown");
        }

        let mut body = StreamReader::new(Box::pin(
            response.bytes_stream().map_err(io::Error::other),
        ));
        let mut writer = ProgressWriter::new(file, ProgressCounter::new(total, out));

        let copied = match tokio::io::copy(&mut body, &mut writer).await {
            Ok(_) => writer.flush().await,
            Err(e) => {
                // Let accepted bytes land so the `.tmp` file matches the count.
                let _ = writer.flush().await;
                Err(e)
            }
        };
        let (file, counter) = writer.into_parts();
        // Closed before the rename; an open handle can block it on some platforms.
        drop(file);
        let received = counter.finish();
        copied.map_err(|source| Error::Copy {
            path: staging.clone(),
            source,
        })?;

        log::debug!(
            "Received {received} bytes, renaming {} into place",
            staging.display()
        );
        self.fs
            .rename_file(&staging, destination)
            .await
            .map_err(|source| Error::Rename {
                from: staging.clone(),
                to: destination.to_path_buf(),
                source,
            })?;

        Ok(timer.finish(received))
    }

    /// Downloads every URL into the configured directory, strictly in order.
    ///
    /// The download directory is created if absent. By default the first
    /// failure stops the batch and is returned; with
    /// [`FetchConfig::keep_going`] each failure is recorded in the report
    /// and the remaining URLs are still fetched.
    ///
    /// # Errors
    ///
    /// Returns an error if the download directory cannot be created, or the
    /// first download error when `keep_going` is off.
    pub async fn fetch_all(&self, urls: &[String]) -> Result<BatchReport> {
        let dir = &self.config.download_dir;
        if !self.fs.file_exists(dir).await {
            log::debug!("Creating download directory {}", dir.display());
            self.fs
                .create_dir_all(dir)
                .await
                .map_err(|source| Error::CreateDir {
                    path: dir.clone(),
                    source,
                })?;
        }

        let mut builder = SessionStatsBuilder::new();
        let mut outcomes = Vec::with_capacity(urls.len());

        for url in urls {
            match self.fetch_into_dir(url).await {
                Ok(stats) => {
                    builder.add_download(&stats);
                    outcomes.push(FetchOutcome {
                        url: url.clone(),
                        result: Ok(stats),
                    });
                }
                Err(e) if self.config.keep_going => {
                    log::error!("Download of {url} failed: {e}");
                    builder.add_failure();
                    outcomes.push(FetchOutcome {
                        url: url.clone(),
                        result: Err(e),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Ok(BatchReport {
            outcomes,
            stats: builder.build(),
        })
    }

    async fn fetch_into_dir(&self, url: &str) -> Result<FileStats> {
        let destination = destination_path(&self.config.download_dir, url)?;
        println!("Started downloading {url}");
        let stats = self.fetch(&destination, url).await?;
        println!("{}", finished_banner(url));
        Ok(stats)
    }
}

fn finished_banner(url: &str) -> String {
    format!("Finished downloading {}", destination_name(url))
}
