//! tee-dl - A library for streaming HTTP(S) downloads to disk with progress.
//!
//! Each download is written to a `.tmp` staging file while a single terminal
//! line reports bytes received, then renamed into place once complete.
//!
//! # Example
//!
//! ```no_run
//! use tee_dl::{FetchConfig, Fetcher};
//!
//! # async fn example() -> tee_dl::Result<()> {
//! let fetcher = Fetcher::new(reqwest::Client::new(), FetchConfig::new().with_download_dir("downloads"));
//!
//! let report = fetcher
//!     .fetch_all(&["https://example.com/a/b/cat.png".to_string()])
//!     .await?;
//! println!("Downloaded {} files", report.stats.files_downloaded);
//! # Ok(())
//! # }
//! ```

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod format;
pub mod fs;
pub mod progress;
pub mod stats;
pub mod url;

// Re-export main types for convenience
pub use config::{AppConfig, FetchConfig};
pub use error::{Error, Result};
pub use fetch::{BatchReport, FetchOutcome, Fetcher};
pub use format::{DisplayTotal, format_bytes, format_duration};
pub use fs::{FileSystem, TokioFileSystem};
pub use progress::{ProgressCounter, ProgressWriter};
pub use stats::{FileStats, SessionStats};
pub use url::{destination_name, destination_path, staging_path};
