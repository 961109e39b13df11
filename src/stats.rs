//! Download statistics types.

use std::time::{Duration, Instant};

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn bytes_per_second(bytes: u64, elapsed: Duration) -> u64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        (bytes as f64 / secs) as u64
    } else {
        0
    }
}

/// Statistics for a single file download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStats {
    /// Bytes actually received and written.
    pub size: u64,
    /// Time from request to rename.
    pub elapsed: Duration,
    /// Average download speed in bytes per second.
    pub average_speed: u64,
}

/// Statistics for an entire batch of downloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStats {
    /// Number of files successfully downloaded.
    pub files_downloaded: usize,
    /// Number of URLs that failed.
    pub files_failed: usize,
    /// Total bytes downloaded.
    pub total_bytes: u64,
    /// Total elapsed time for the batch.
    pub elapsed: Duration,
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStats {
    /// Creates a new empty session stats.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            files_downloaded: 0,
            files_failed: 0,
            total_bytes: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Returns the average download speed in bytes per second.
    #[must_use]
    pub fn average_speed(&self) -> u64 {
        bytes_per_second(self.total_bytes, self.elapsed)
    }
}

/// Times a single download from start to finish.
#[derive(Debug)]
pub struct DownloadTimer {
    start_time: Instant,
}

impl Default for DownloadTimer {
    fn default() -> Self {
        Self::start()
    }
}

impl DownloadTimer {
    /// Starts timing now.
    #[must_use]
    pub fn start() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    /// Returns the elapsed time since the download started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Produces the final statistics for a download of `size` bytes.
    #[must_use]
    pub fn finish(self, size: u64) -> FileStats {
        let elapsed = self.elapsed();
        FileStats {
            size,
            elapsed,
            average_speed: bytes_per_second(size, elapsed),
        }
    }
}

/// Builder for accumulating session statistics during a batch.
#[derive(Debug)]
pub struct SessionStatsBuilder {
    files_downloaded: usize,
    files_failed: usize,
    total_bytes: u64,
    start_time: Instant,
}

impl Default for SessionStatsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStatsBuilder {
    /// Creates a new session stats builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            files_downloaded: 0,
            files_failed: 0,
            total_bytes: 0,
            start_time: Instant::now(),
        }
    }

    /// Records a completed file download.
    pub const fn add_download(&mut self, file_stats: &FileStats) {
        self.files_downloaded += 1;
        self.total_bytes += file_stats.size;
    }

    /// Records a failed URL.
    pub const fn add_failure(&mut self) {
        self.files_failed += 1;
    }

    /// Builds the final session statistics.
    #[must_use]
    pub fn build(self) -> SessionStats {
        SessionStats {
            files_downloaded: self.files_downloaded,
            files_failed: self.files_failed,
            total_bytes: self.total_bytes,
            elapsed: self.start_time.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_stats_default() {
        let stats = SessionStats::default();
        assert_eq!(stats.files_downloaded, 0);
        assert_eq!(stats.files_failed, 0);
        assert_eq!(stats.total_bytes, 0);
    }

    #[test]
    fn session_stats_average_speed_zero_elapsed() {
        let stats = SessionStats {
            files_downloaded: 1,
            files_failed: 0,
            total_bytes: 1000,
            elapsed: Duration::ZERO,
        };
        assert_eq!(stats.average_speed(), 0);
    }

    #[test]
    fn session_stats_average_speed() {
        let stats = SessionStats {
            files_downloaded: 1,
            files_failed: 0,
            total_bytes: 1000,
            elapsed: Duration::from_secs(2),
        };
        assert_eq!(stats.average_speed(), 500);
    }

    #[test]
    fn timer_reports_size() {
        let timer = DownloadTimer::start();
        std::thread::sleep(Duration::from_millis(2));
        let stats = timer.finish(4096);
        assert_eq!(stats.size, 4096);
        assert!(stats.elapsed >= Duration::from_millis(2));
    }

    #[test]
    fn session_stats_builder() {
        let mut builder = SessionStatsBuilder::new();
        let file_stats = FileStats {
            size: 500,
            elapsed: Duration::from_secs(1),
            average_speed: 500,
        };
        builder.add_download(&file_stats);
        builder.add_download(&file_stats);
        builder.add_failure();

        let stats = builder.build();
        assert_eq!(stats.files_downloaded, 2);
        assert_eq!(stats.files_failed, 1);
        assert_eq!(stats.total_bytes, 1000);
    }
}
