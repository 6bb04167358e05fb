use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::errors::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    #[serde(default)]
    pub obtained_at: u64,
}

impl Token {
    /// Expired tokens, and tokens within `margin` seconds of expiring.
    pub fn is_expired(&self, margin: u64) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + margin >= self.obtained_at + self.expires_in
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

/// One flattened track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
}

impl TrackRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, artists: Vec<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            artists,
        }
    }
}

/// Column-oriented collection of [`TrackRecord`]s.
///
/// The three columns are only reachable through methods that touch all of
/// them at once, so index `i` in each column always describes the same track.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTrackTable")]
pub struct TrackTable {
    ids: Vec<String>,
    names: Vec<String>,
    artists: Vec<Vec<String>>,
}

/// Unchecked columns as they appear on the wire.
#[derive(Deserialize)]
struct RawTrackTable {
    ids: Vec<String>,
    names: Vec<String>,
    artists: Vec<Vec<String>>,
}

impl TryFrom<RawTrackTable> for TrackTable {
    type Error = String;

    fn try_from(raw: RawTrackTable) -> Result<Self, Self::Error> {
        if raw.names.len() != raw.ids.len() || raw.artists.len() != raw.ids.len() {
            return Err(format!(
                "track table columns differ in length: {} ids, {} names, {} artists",
                raw.ids.len(),
                raw.names.len(),
                raw.artists.len()
            ));
        }

        Ok(Self {
            ids: raw.ids,
            names: raw.names,
            artists: raw.artists,
        })
    }
}

impl TrackTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: TrackRecord) {
        self.ids.push(record.id);
        self.names.push(record.name);
        self.artists.push(record.artists);
    }

    pub fn append(&mut self, other: TrackTable) {
        self.ids.extend(other.ids);
        self.names.extend(other.names);
        self.artists.extend(other.artists);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn artists(&self) -> &[Vec<String>] {
        &self.artists
    }

    pub fn get(&self, index: usize) -> Option<TrackRecord> {
        Some(TrackRecord {
            id: self.ids.get(index)?.clone(),
            name: self.names.get(index)?.clone(),
            artists: self.artists.get(index)?.clone(),
        })
    }

    pub fn records(&self) -> impl Iterator<Item = TrackRecord> + '_ {
        self.ids
            .iter()
            .zip(&self.names)
            .zip(&self.artists)
            .map(|((id, name), artists)| {
                TrackRecord::new(id.as_str(), name.as_str(), artists.clone())
            })
    }

    pub fn rows(&self) -> Vec<TrackTableRow> {
        self.records()
            .map(|r| TrackTableRow {
                id: r.id,
                name: r.name,
                artists: r.artists.join(", "),
            })
            .collect()
    }
}

impl Extend<TrackRecord> for TrackTable {
    fn extend<I: IntoIterator<Item = TrackRecord>>(&mut self, iter: I) {
        for record in iter {
            self.push(record);
        }
    }
}

impl FromIterator<TrackRecord> for TrackTable {
    fn from_iter<I: IntoIterator<Item = TrackRecord>>(iter: I) -> Self {
        let mut table = TrackTable::new();
        table.extend(iter);
        table
    }
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub id: String,
    pub name: String,
    pub artists: String,
}

#[derive(Tabled)]
pub struct ReleaseTableRow {
    pub album: String,
}

/// Whether a fetch ran to the end or stopped on a remote failure.
#[derive(Debug)]
pub enum Completion {
    Complete,
    Partial { error: Error },
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Completion::Complete => write!(f, "complete"),
            Completion::Partial { error } => write!(f, "partial ({})", error),
        }
    }
}

/// Data accumulated by a fetch together with how the fetch ended.
#[derive(Debug)]
pub struct Fetched<T> {
    pub data: T,
    pub completion: Completion,
}

impl<T> Fetched<T> {
    pub fn complete(data: T) -> Self {
        Self {
            data,
            completion: Completion::Complete,
        }
    }

    pub fn partial(data: T, error: Error) -> Self {
        Self {
            data,
            completion: Completion::Partial { error },
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.completion, Completion::Complete)
    }

    pub fn error(&self) -> Option<&Error> {
        match &self.completion {
            Completion::Complete => None,
            Completion::Partial { error } => Some(error),
        }
    }
}

// Spotify Web API payloads

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub total: Option<u64>,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplifiedArtist {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumRef {
    #[serde(default)]
    pub artists: Vec<SimplifiedArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrack {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub album: Option<AlbumRef>,
    #[serde(default)]
    pub artists: Vec<SimplifiedArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<PlaylistTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReleasesResponse {
    pub albums: Page<SimplifiedAlbum>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplifiedAlbum {
    pub id: String,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSeveralAlbumsResponse {
    pub albums: Vec<Option<Album>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub tracks: Page<SimplifiedTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplifiedTrack {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SimplifiedArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub status: u16,
    pub message: String,
}
