//! # Spotify Integration Module
//!
//! This module is the only place that talks HTTP. It defines the
//! [`CatalogApi`] seam the fetcher pages through, and [`SpotifyClient`], the
//! reqwest-backed implementation of it.
//!
//! ## Architecture
//!
//! ```text
//! CatalogFetcher (pagination, batching, flattening)
//!          ↓
//! CatalogApi trait
//!          ↓
//! SpotifyClient
//!     ├── auth      (client-credentials grant)
//!     ├── playlists (GET /playlists/{id}/tracks)
//!     ├── releases  (GET /browse/new-releases)
//!     └── albums    (GET /albums, GET /albums/{id}/tracks)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Authentication
//!
//! The client-credentials grant is performed once in [`SpotifyClient::connect`].
//! The resulting token is reused for every request and renewed shortly before
//! it expires. No user authorization is involved, so only public catalog data
//! is reachable.
//!
//! ## Error Handling
//!
//! Every non-success response becomes an [`Error`]:
//! - `429 Too Many Requests` maps to [`Error::RateLimited`], carrying the
//!   `Retry-After` value when present
//! - any other status maps to [`Error::Api`] with Spotify's error message
//! - connection and decoding failures map to [`Error::Http`]
//!
//! Nothing is retried here. Callers decide what a failure means.

pub mod auth;

mod albums;
mod playlists;
mod releases;

use std::future::Future;

use reqwest::{Client, Response, StatusCode, header::RETRY_AFTER};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::{
    config,
    errors::{Error, Result},
    types::{
        Album, ApiErrorResponse, Credentials, Page, PlaylistItem, SimplifiedAlbum,
        SimplifiedTrack, Token,
    },
};

/// Tokens are renewed this many seconds before they expire.
const TOKEN_EXPIRY_MARGIN: u64 = 60;

/// The remote catalog operations the fetcher relies on.
///
/// Offsets and limits are passed through to the API untouched; callers are
/// responsible for keeping limits within the endpoint maximum.
pub trait CatalogApi {
    /// One page of a playlist's items.
    fn playlist_items(
        &self,
        playlist_id: &str,
        offset: u32,
        limit: u32,
    ) -> impl Future<Output = Result<Page<PlaylistItem>>> + Send;

    /// One page of the new-release feed.
    fn new_releases(
        &self,
        offset: u32,
        limit: u32,
    ) -> impl Future<Output = Result<Page<SimplifiedAlbum>>> + Send;

    /// Full album details for a batch of ids, in request order. Unknown ids
    /// come back as `None`.
    fn albums(
        &self,
        album_ids: &[String],
    ) -> impl Future<Output = Result<Vec<Option<Album>>>> + Send;

    /// One page of an album's tracks, for albums longer than the page
    /// embedded in [`CatalogApi::albums`].
    fn album_tracks_page(
        &self,
        album_id: &str,
        offset: u32,
        limit: u32,
    ) -> impl Future<Output = Result<Page<SimplifiedTrack>>> + Send;
}

/// Authenticated handle to the Spotify Web API.
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    token_url: String,
    credentials: Credentials,
    token: Mutex<Token>,
}

impl SpotifyClient {
    /// Authenticates against `token_url` and returns a ready client.
    ///
    /// # Errors
    ///
    /// Fails when the token endpoint rejects the credentials or cannot be
    /// reached.
    pub async fn connect(
        credentials: Credentials,
        api_url: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Result<Self> {
        let http = Client::new();
        let token_url = token_url.into();
        let token = auth::request_token(&http, &token_url, &credentials).await?;

        Ok(Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token_url,
            credentials,
            token: Mutex::new(token),
        })
    }

    /// Connects using credentials and endpoints from the environment.
    pub async fn from_env() -> Result<Self> {
        let credentials = config::spotify_credentials()?;
        Self::connect(
            credentials,
            config::spotify_apiurl(),
            config::spotify_apitoken_url(),
        )
        .await
    }

    async fn get_valid_token(&self) -> Result<String> {
        let mut token = self.token.lock().await;
        if token.is_expired(TOKEN_EXPIRY_MARGIN) {
            log::debug!("access token expired, requesting a new one");
            *token = auth::request_token(&self.http, &self.token_url, &self.credentials).await?;
        }

        Ok(token.access_token.clone())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let token = self.get_valid_token().await?;
        let url = format!("{}{}", self.api_url, path);
        log::debug!("GET {} {:?}", url, query);

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Converts non-success responses into an [`Error`].
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());
        return Err(Error::RateLimited { retry_after });
    }

    let message = match response.json::<ApiErrorResponse>().await {
        Ok(body) => body.error.message,
        Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
    };

    Err(Error::Api {
        status: status.as_u16(),
        message,
    })
}

impl CatalogApi for SpotifyClient {
    async fn playlist_items(
        &self,
        playlist_id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<Page<PlaylistItem>> {
        self.get_playlist_items(playlist_id, offset, limit).await
    }

    async fn new_releases(&self, offset: u32, limit: u32) -> Result<Page<SimplifiedAlbum>> {
        self.get_new_releases(offset, limit).await
    }

    async fn albums(&self, album_ids: &[String]) -> Result<Vec<Option<Album>>> {
        self.get_several_albums(album_ids).await
    }

    async fn album_tracks_page(
        &self,
        album_id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<Page<SimplifiedTrack>> {
        self.get_album_tracks(album_id, offset, limit).await
    }
}
