//! Spotify Track Table CLI Library
//!
//! This library reads playlists, albums and the new-release feed from the
//! Spotify Web API and flattens them into column-oriented track tables
//! (track id, song name, artist names).
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `errors` - Error type shared by the client and the fetcher
//! - `fetcher` - Pagination, batching and flattening
//! - `reference` - Normalization of playlist/album/track references
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//!
//! # Example
//!
//! ```
//! use sptracks::{fetcher::CatalogFetcher, spotify::SpotifyClient};
//!
//! #[tokio::main]
//! async fn main() -> sptracks::Res<()> {
//!     sptracks::config::load_env().await?;
//!     let fetcher = CatalogFetcher::new(SpotifyClient::from_env().await?);
//!     let tracks = fetcher.playlist_tracks("spotify:playlist:37i9dQZF1DXcBWIGoYBM5M").await?;
//!     println!("{} tracks ({})", tracks.data.len(), tracks.completion);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod fetcher;
pub mod reference;
pub mod spotify;
pub mod types;

pub use errors::Error;
pub use fetcher::{CatalogFetcher, FetchOptions};
pub use types::{Completion, Fetched, TrackRecord, TrackTable};

/// A convenient Result type alias for the command-line layer.
///
/// Boxes any error behind `Send + Sync` so configuration, client and I/O
/// failures can all be propagated with `?` from `main`.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints a status line prefixed with a blue `o`.
///
/// ```
/// info!("Fetching playlist {}", id);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success line prefixed with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error line prefixed with a red `!` and exits with status 1.
///
/// Only for the binary edge; library code returns errors instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning line prefixed with a yellow `!`.
///
/// Used when a fetch came back partial: the table is still printed, but the
/// user should know it stopped early.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
