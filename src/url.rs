//! Destination path derivation from download URLs.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Returns everything after the last `/` in `url`.
///
/// Returns an empty string when `url` has no `/` or ends with one. No
/// percent-decoding or query stripping is performed.
#[must_use]
pub fn destination_name(url: &str) -> &str {
    url.rfind('/').map_or("", |pos| &url[pos + 1..])
}

/// Resolves the local path a URL downloads to inside `dir`.
///
/// # Errors
///
/// Returns [`Error::InvalidDestination`] if no file name can be derived.
pub fn destination_path(dir: &Path, url: &str) -> Result<PathBuf> {
    let name = destination_name(url);
    if name.is_empty() {
        return Err(Error::InvalidDestination {
            url: url.to_string(),
        });
    }
    Ok(dir.join(name))
}

/// Returns the `.tmp` staging path for a final destination path.
#[must_use]
pub fn staging_path(path: &Path) -> PathBuf {
    let mut staged = path.as_os_str().to_owned();
    staged.push(".tmp");
    PathBuf::from(staged)
}
