#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex, time::Duration};

use sptracks::{
    errors::{Error, Result},
    fetcher::FetchOptions,
    spotify::CatalogApi,
    types::{
        Album, AlbumRef, Page, PlaylistItem, PlaylistTrack, SimplifiedAlbum, SimplifiedArtist,
        SimplifiedTrack,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Playlist { id: String, offset: u32, limit: u32 },
    Releases { offset: u32, limit: u32 },
    Albums(Vec<String>),
    AlbumTracks { id: String, offset: u32, limit: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Playlist,
    Releases,
    Albums,
    AlbumTracks,
}

/// In-memory catalog that pages its data like Spotify does and records every
/// request it receives.
#[derive(Default)]
pub struct MockCatalog {
    pub playlist: Vec<Option<PlaylistTrack>>,
    pub releases: Vec<SimplifiedAlbum>,
    pub albums: HashMap<String, Vec<SimplifiedTrack>>,
    /// Tracks embedded in a `albums` response before `next` kicks in.
    pub embedded_tracks: usize,
    /// Fail the n-th (1-based) request to the given endpoint.
    pub fail_on: Option<(Endpoint, usize)>,
    calls: Mutex<Vec<Call>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self {
            embedded_tracks: 50,
            ..Default::default()
        }
    }

    pub fn with_playlist(mut self, tracks: Vec<PlaylistTrack>) -> Self {
        self.playlist = tracks.into_iter().map(Some).collect();
        self
    }

    pub fn with_releases(mut self, album_ids: &[&str]) -> Self {
        self.releases = album_ids
            .iter()
            .map(|id| SimplifiedAlbum {
                id: id.to_string(),
                uri: Some(format!("spotify:album:{}", id)),
                name: None,
            })
            .collect();
        self
    }

    pub fn with_album(mut self, id: &str, tracks: Vec<SimplifiedTrack>) -> Self {
        self.albums.insert(id.to_string(), tracks);
        self
    }

    pub fn failing_on(mut self, endpoint: Endpoint, nth: usize) -> Self {
        self.fail_on = Some((endpoint, nth));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, endpoint: Endpoint) -> usize {
        self.calls()
            .iter()
            .filter(|c| endpoint_of(c) == endpoint)
            .count()
    }

    fn record(&self, call: Call) -> Result<()> {
        let mut calls = self.calls.lock().unwrap();
        let endpoint = endpoint_of(&call);
        calls.push(call);
        let nth = calls.iter().filter(|c| endpoint_of(c) == endpoint).count();

        match self.fail_on {
            Some((e, n)) if e == endpoint && n == nth => Err(Error::RateLimited {
                retry_after: Some(30),
            }),
            _ => Ok(()),
        }
    }
}

fn endpoint_of(call: &Call) -> Endpoint {
    match call {
        Call::Playlist { .. } => Endpoint::Playlist,
        Call::Releases { .. } => Endpoint::Releases,
        Call::Albums(_) => Endpoint::Albums,
        Call::AlbumTracks { .. } => Endpoint::AlbumTracks,
    }
}

fn page<T: Clone>(items: &[T], offset: u32, limit: u32) -> Page<T> {
    let start = (offset as usize).min(items.len());
    let end = (start + limit as usize).min(items.len());
    Page {
        items: items[start..end].to_vec(),
        next: (end < items.len()).then(|| format!("offset={}", end)),
        offset: Some(offset as u64),
        limit: Some(limit as u64),
        total: Some(items.len() as u64),
    }
}

impl CatalogApi for MockCatalog {
    async fn playlist_items(
        &self,
        playlist_id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<Page<PlaylistItem>> {
        self.record(Call::Playlist {
            id: playlist_id.to_string(),
            offset,
            limit,
        })?;

        let items: Vec<PlaylistItem> = self
            .playlist
            .iter()
            .map(|track| PlaylistItem {
                track: track.clone(),
            })
            .collect();
        Ok(page(&items, offset, limit))
    }

    async fn new_releases(&self, offset: u32, limit: u32) -> Result<Page<SimplifiedAlbum>> {
        self.record(Call::Releases { offset, limit })?;
        Ok(page(&self.releases, offset, limit))
    }

    async fn albums(&self, album_ids: &[String]) -> Result<Vec<Option<Album>>> {
        self.record(Call::Albums(album_ids.to_vec()))?;

        Ok(album_ids
            .iter()
            .map(|id| {
                self.albums.get(id).map(|tracks| Album {
                    id: id.clone(),
                    name: None,
                    tracks: page(tracks, 0, self.embedded_tracks as u32),
                })
            })
            .collect())
    }

    async fn album_tracks_page(
        &self,
        album_id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<Page<SimplifiedTrack>> {
        self.record(Call::AlbumTracks {
            id: album_id.to_string(),
            offset,
            limit,
        })?;

        let tracks = self.albums.get(album_id).cloned().unwrap_or_default();
        Ok(page(&tracks, offset, limit))
    }
}

pub fn no_delay() -> FetchOptions {
    FetchOptions::default().with_request_delay(Duration::ZERO)
}

fn artists(names: &[&str]) -> Vec<SimplifiedArtist> {
    names
        .iter()
        .map(|n| SimplifiedArtist {
            name: n.to_string(),
            id: None,
        })
        .collect()
}

/// Playlist track whose album lists `album_artists`.
pub fn playlist_track(id: &str, name: &str, album_artists: &[&str]) -> PlaylistTrack {
    PlaylistTrack {
        id: Some(id.to_string()),
        name: name.to_string(),
        album: Some(AlbumRef {
            artists: artists(album_artists),
        }),
        artists: artists(&["Track Artist"]),
    }
}

pub fn album_track(id: &str, name: &str, track_artists: &[&str]) -> SimplifiedTrack {
    SimplifiedTrack {
        id: Some(id.to_string()),
        name: name.to_string(),
        artists: artists(track_artists),
    }
}

/// `n` numbered playlist tracks `t0..t{n-1}`.
pub fn numbered_playlist(n: usize) -> Vec<PlaylistTrack> {
    (0..n)
        .map(|i| playlist_track(&format!("t{}", i), &format!("Song {}", i), &["Artist"]))
        .collect()
}

/// `n` numbered album tracks prefixed with the album id.
pub fn numbered_album(album: &str, n: usize) -> Vec<SimplifiedTrack> {
    (0..n)
        .map(|i| album_track(&format!("{}t{}", album, i), &format!("{} {}", album, i), &["Artist"]))
        .collect()
}
