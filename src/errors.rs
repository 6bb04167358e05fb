use thiserror::Error;

/// Errors raised by the catalog client and fetcher.
///
/// `RateLimited`, `Api` and `Http` are remote failures: the fetcher turns
/// them into a partial result instead of propagating them. `MalformedReference`
/// and `Configuration` are local and always returned to the caller.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Spotify rate limit reached (retry after {retry_after:?} seconds)")]
    RateLimited { retry_after: Option<u64> },

    #[error("Spotify API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed catalog reference: {0:?}")]
    MalformedReference(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Whether the error came from the remote API or its transport.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Error::RateLimited { .. } | Error::Api { .. } | Error::Http(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
