//! Formatting helpers for human-readable byte sizes and durations.

use std::fmt;
use std::time::Duration;

const SI_UNITS: [&str; 7] = ["B", "kB", "MB", "GB", "TB", "PB", "EB"];

/// Formats a byte count using SI (base 1000) units, e.g. "9 B", "1.0 MB", "83 MB".
///
/// Values under ten units keep one decimal place; larger values are rounded
/// to whole units.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 10 {
        return format!("{bytes} B");
    }

    let mut exp = 0;
    let mut scale: u64 = 1;
    while exp + 1 < SI_UNITS.len() && bytes / scale >= 1000 {
        scale *= 1000;
        exp += 1;
    }

    let value = ((bytes as f64 / scale as f64) * 10.0 + 0.5).floor() / 10.0;
    if value < 10.0 {
        format!("{value:.1} {}", SI_UNITS[exp])
    } else {
        format!("{value:.0} {}", SI_UNITS[exp])
    }
}

/// Formats a duration as a human-readable string (e.g. "5.0s", "1m 05s", "1h 01m 05s").
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs >= 3600 {
        format!(
            "{}h {:02}m {:02}s",
            secs / 3600,
            (secs % 3600) / 60,
            secs % 60
        )
    } else if secs >= 60 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{}.{:01}s", secs, d.subsec_millis() / 100)
    }
}

/// Expected size of a download as shown in the progress line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayTotal {
    /// The server declared a size.
    Known(u64),
    /// No usable `Content-Length` was sent.
    Unknown,
}

impl DisplayTotal {
    /// Parses a raw `Content-Length` header value.
    #[must_use]
    pub fn from_header(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map_or(Self::Unknown, Self::Known)
    }
}

impl fmt::Display for DisplayTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(bytes) => f.write_str(&format_bytes(*bytes)),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}
