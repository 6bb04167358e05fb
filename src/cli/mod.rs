//! # CLI Module
//!
//! User-facing commands of sptracks. Each command connects to Spotify with
//! the configured client credentials, runs one [`CatalogFetcher`] operation
//! behind a spinner, and prints the result as a table or as JSON.
//!
//! ## Commands
//!
//! - [`playlist`] - Tracks of one playlist
//! - [`albums`] - Tracks of one or more albums
//! - [`releases`] - Album references in the new-release feed
//! - [`new_tracks`] - Tracks of every album in the new-release feed
//!
//! ## Partial Results
//!
//! When a fetch stops early on a remote failure the data gathered so far is
//! still printed, followed by a warning naming the failure. Configuration
//! and connection problems before the first request terminate the program.

mod albums;
mod playlist;
mod releases;

pub use albums::albums;
pub use playlist::playlist;
pub use releases::{new_tracks, releases};

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    error,
    fetcher::CatalogFetcher,
    spotify::SpotifyClient,
    success,
    types::{Fetched, TrackTable},
    warning,
};

async fn connect() -> CatalogFetcher<SpotifyClient> {
    match SpotifyClient::from_env().await {
        Ok(client) => CatalogFetcher::new(client),
        Err(e) => error!("Cannot connect to Spotify. Err: {}", e),
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

fn print_tracks(fetched: &Fetched<TrackTable>, json: bool) {
    if json {
        match serde_json::to_string_pretty(&fetched.data) {
            Ok(out) => println!("{}", out),
            Err(e) => error!("Cannot serialize tracks. Err: {}", e),
        }
    } else {
        println!("{}", Table::new(fetched.data.rows()));
    }

    report(fetched, "tracks", fetched.data.len());
}

fn report<T>(fetched: &Fetched<T>, noun: &str, count: usize) {
    match fetched.error() {
        None => success!("Fetched {} {}", count, noun),
        Some(e) => warning!("Stopped early after {} {}: {}", count, noun, e),
    }
}
