//! Normalization of catalog references.
//!
//! Spotify hands out the same identifier in several shapes:
//!
//! - a bare id: `37i9dQZF1DXcBWIGoYBM5M`
//! - a platform URI: `spotify:playlist:37i9dQZF1DXcBWIGoYBM5M`
//! - a web URL: `https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=abc`
//!
//! [`normalize`] reduces each of them to the bare id. Applying it to its own
//! output returns the same value.

use crate::errors::{Error, Result};

/// Reduces a playlist, album or track reference to its bare identifier.
///
/// Query string and fragment are dropped first, then everything up to the
/// last `/` or `:` separator.
///
/// # Errors
///
/// Returns [`Error::MalformedReference`] when nothing usable is left or the
/// remaining segment contains anything but ASCII alphanumerics.
///
/// # Example
///
/// ```
/// let id = normalize("spotify:album:4aawyAB9vmqN3uQ7FjRGTy")?;
/// assert_eq!(id, "4aawyAB9vmqN3uQ7FjRGTy");
/// ```
pub fn normalize(reference: &str) -> Result<String> {
    let without_query = reference
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim();

    let id = without_query
        .rsplit(['/', ':'])
        .next()
        .unwrap_or_default();

    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(Error::MalformedReference(reference.to_string()));
    }

    Ok(id.to_string())
}

/// Normalizes every reference, failing on the first malformed one.
pub fn normalize_all<S: AsRef<str>>(references: &[S]) -> Result<Vec<String>> {
    references.iter().map(|r| normalize(r.as_ref())).collect()
}
