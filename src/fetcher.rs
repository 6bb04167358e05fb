//! Pagination and flattening on top of a [`CatalogApi`].
//!
//! [`CatalogFetcher`] turns Spotify's paged JSON into [`TrackTable`]s. Every
//! operation runs strictly sequentially: one request in flight, followed by
//! a fixed courtesy delay before the next one.
//!
//! Remote failures never escape as errors. The loop stops, logs, and returns
//! what it accumulated so far inside a [`Fetched`] marked
//! [`Completion::Partial`]. Only local problems, such as a reference that
//! cannot be normalized, are returned as `Err`.

use std::{future::Future, time::Duration};

use log::{debug, warn};
use tokio::time::sleep;

use crate::{
    errors::{Error, Result},
    reference,
    spotify::CatalogApi,
    types::{
        Album, Completion, Fetched, Page, PlaylistItem, SimplifiedArtist, SimplifiedTrack,
        TrackRecord, TrackTable,
    },
};

pub const MAX_PLAYLIST_PAGE_SIZE: u32 = 100;
pub const MAX_RELEASE_PAGE_SIZE: u32 = 50;
pub const MAX_ALBUM_BATCH_SIZE: usize = 20;
pub const MAX_ALBUM_TRACK_PAGE_SIZE: u32 = 50;

/// Page sizes, batch size and request spacing used by [`CatalogFetcher`].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub playlist_page_size: u32,
    pub release_page_size: u32,
    pub album_batch_size: usize,
    pub album_track_page_size: u32,
    pub request_delay: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            playlist_page_size: MAX_PLAYLIST_PAGE_SIZE,
            release_page_size: MAX_RELEASE_PAGE_SIZE,
            album_batch_size: MAX_ALBUM_BATCH_SIZE,
            album_track_page_size: MAX_ALBUM_TRACK_PAGE_SIZE,
            request_delay: Duration::from_millis(100),
        }
    }
}

impl FetchOptions {
    pub fn with_playlist_page_size(mut self, size: u32) -> Self {
        self.playlist_page_size = size;
        self
    }

    pub fn with_release_page_size(mut self, size: u32) -> Self {
        self.release_page_size = size;
        self
    }

    pub fn with_album_batch_size(mut self, size: usize) -> Self {
        self.album_batch_size = size;
        self
    }

    pub fn with_album_track_page_size(mut self, size: u32) -> Self {
        self.album_track_page_size = size;
        self
    }

    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// Clamps every size into `1..=endpoint maximum`.
    fn clamped(self) -> Self {
        Self {
            playlist_page_size: self.playlist_page_size.clamp(1, MAX_PLAYLIST_PAGE_SIZE),
            release_page_size: self.release_page_size.clamp(1, MAX_RELEASE_PAGE_SIZE),
            album_batch_size: self.album_batch_size.clamp(1, MAX_ALBUM_BATCH_SIZE),
            album_track_page_size: self.album_track_page_size.clamp(1, MAX_ALBUM_TRACK_PAGE_SIZE),
            request_delay: self.request_delay,
        }
    }
}

/// Reads playlists, albums and the new-release feed into flat track tables.
pub struct CatalogFetcher<A> {
    api: A,
    options: FetchOptions,
}

impl<A: CatalogApi> CatalogFetcher<A> {
    pub fn new(api: A) -> Self {
        Self::with_options(api, FetchOptions::default())
    }

    pub fn with_options(api: A, options: FetchOptions) -> Self {
        Self {
            api,
            options: options.clamped(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// Every track of a playlist, in playlist order.
    ///
    /// Artist names are taken from the track's album, falling back to the
    /// track's own artists when the album lists none. Entries without a
    /// track (removed or unavailable items) are skipped.
    ///
    /// # Errors
    ///
    /// Only [`Error::MalformedReference`]; remote failures yield a partial
    /// result.
    pub async fn playlist_tracks(&self, reference: &str) -> Result<Fetched<TrackTable>> {
        let playlist_id = reference::normalize(reference)?;
        let mut table = TrackTable::new();

        let failure = self
            .paginate(
                0,
                self.options.playlist_page_size,
                |offset, limit| self.api.playlist_items(&playlist_id, offset, limit),
                |item| {
                    if let Some(record) = playlist_record(item) {
                        table.push(record);
                    }
                },
            )
            .await;

        debug!("playlist {}: {} tracks", playlist_id, table.len());
        finish("playlist", table, failure)
    }

    /// Normalized references of every album in the new-release feed, in
    /// feed order. Duplicates are kept.
    pub async fn new_releases(&self) -> Result<Fetched<Vec<String>>> {
        let mut album_ids = Vec::new();

        let failure = self
            .paginate(
                0,
                self.options.release_page_size,
                |offset, limit| self.api.new_releases(offset, limit),
                |album| {
                    let uri = album.uri.as_deref().unwrap_or(&album.id);
                    match reference::normalize(uri) {
                        Ok(id) => album_ids.push(id),
                        Err(e) => {
                            warn!("skipping unusable album reference in new releases: {}", e)
                        }
                    }
                },
            )
            .await;

        debug!("new releases: {} albums", album_ids.len());
        finish("new releases", album_ids, failure)
    }

    /// Every track of every referenced album, grouped by input order.
    ///
    /// References are normalized up front, then requested in batches of
    /// `album_batch_size`. Batch `k` covers `references[k*B..(k+1)*B]`.
    /// Albums longer than their embedded track page are completed through
    /// [`CatalogApi::album_tracks_page`]. Albums Spotify does not know are
    /// skipped.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedReference`] for the first reference that cannot be
    /// normalized; nothing is requested in that case.
    pub async fn album_tracks<S: AsRef<str>>(
        &self,
        references: &[S],
    ) -> Result<Fetched<TrackTable>> {
        let album_ids = reference::normalize_all(references)?;
        let batch_size = self.options.album_batch_size;
        let mut table = TrackTable::new();
        let mut offset = 0;

        while offset < album_ids.len() {
            if offset > 0 {
                self.pause().await;
            }

            let end = usize::min(offset + batch_size, album_ids.len());
            let batch = &album_ids[offset..end];

            let albums = match self.api.albums(batch).await {
                Ok(albums) => albums,
                Err(e) => return finish("album batch", table, Some(e)),
            };

            for (index, album) in albums.into_iter().enumerate() {
                let Some(album) = album else {
                    warn!(
                        "album {} not found, skipping",
                        batch.get(index).map(String::as_str).unwrap_or("?")
                    );
                    continue;
                };

                if let Some(e) = self.collect_album(album, &mut table).await {
                    return finish("album tracks", table, Some(e));
                }
            }

            offset = end;
        }

        debug!("{} albums: {} tracks", album_ids.len(), table.len());
        finish("albums", table, None)
    }

    /// Tracks of every album currently in the new-release feed.
    ///
    /// The result is partial if either the feed or the album fetch stopped
    /// early; the first failure is reported.
    pub async fn new_release_tracks(&self) -> Result<Fetched<TrackTable>> {
        let Fetched {
            data: album_ids,
            completion,
        } = self.new_releases().await?;

        if !album_ids.is_empty() {
            self.pause().await;
        }
        let tracks = self.album_tracks(album_ids.as_slice()).await?;

        Ok(match completion {
            Completion::Complete => tracks,
            Completion::Partial { error } => Fetched::partial(tracks.data, error),
        })
    }

    /// Appends an album's tracks, following its track pages to the end.
    async fn collect_album(&self, album: Album, table: &mut TrackTable) -> Option<Error> {
        let Album { id, tracks, .. } = album;
        let embedded = tracks.items.len() as u32;
        let has_more = tracks.has_next();

        table.extend(tracks.items.into_iter().map(album_track_record));
        if !has_more {
            return None;
        }

        self.pause().await;
        self.paginate(
            embedded,
            self.options.album_track_page_size,
            |offset, limit| self.api.album_tracks_page(&id, offset, limit),
            |track| table.push(album_track_record(track)),
        )
        .await
    }

    /// Requests pages starting at `start` until the API stops reporting a
    /// `next` page, handing every item to `consume`.
    ///
    /// Returns the error that stopped the loop, if any.
    async fn paginate<T, F, Fut>(
        &self,
        start: u32,
        limit: u32,
        mut fetch_page: F,
        mut consume: impl FnMut(T),
    ) -> Option<Error>
    where
        F: FnMut(u32, u32) -> Fut,
        Fut: Future<Output = Result<Page<T>>>,
    {
        let mut offset = start;

        loop {
            let page = match fetch_page(offset, limit).await {
                Ok(page) => page,
                Err(e) => return Some(e),
            };

            let has_next = page.has_next();
            page.items.into_iter().for_each(&mut consume);

            if !has_next {
                return None;
            }

            offset += limit;
            self.pause().await;
        }
    }

    async fn pause(&self) {
        if !self.options.request_delay.is_zero() {
            sleep(self.options.request_delay).await;
        }
    }
}

fn finish<T>(what: &str, data: T, failure: Option<Error>) -> Result<Fetched<T>> {
    match failure {
        None => Ok(Fetched::complete(data)),
        Some(e) if e.is_remote() => {
            warn!("{} fetch stopped early: {}", what, e);
            Ok(Fetched::partial(data, e))
        }
        Some(e) => Err(e),
    }
}

fn artist_names(artists: &[SimplifiedArtist]) -> Vec<String> {
    artists.iter().map(|a| a.name.clone()).collect()
}

fn playlist_record(item: PlaylistItem) -> Option<TrackRecord> {
    let Some(track) = item.track else {
        debug!("skipping playlist item without track");
        return None;
    };

    let artists = match &track.album {
        Some(album) if !album.artists.is_empty() => artist_names(&album.artists),
        _ => artist_names(&track.artists),
    };

    Some(TrackRecord::new(
        track.id.unwrap_or_default(),
        track.name,
        artists,
    ))
}

fn album_track_record(track: SimplifiedTrack) -> TrackRecord {
    let artists = artist_names(&track.artists);
    TrackRecord::new(track.id.unwrap_or_default(), track.name, artists)
}
