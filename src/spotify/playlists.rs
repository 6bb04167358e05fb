use crate::{
    errors::Result,
    types::{Page, PlaylistItem},
};

use super::SpotifyClient;

impl SpotifyClient {
    /// Retrieves one page of a playlist's items.
    ///
    /// Uses `GET /playlists/{id}/tracks` with `offset` and `limit` (1-100).
    /// The page's `next` field is `Some` while further items remain.
    ///
    /// Items can carry a `null` track for entries that are no longer
    /// available, and local files come back without an id.
    pub async fn get_playlist_items(
        &self,
        playlist_id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<Page<PlaylistItem>> {
        self.get_json(
            &format!("/playlists/{id}/tracks", id = playlist_id),
            &[("offset", offset.to_string()), ("limit", limit.to_string())],
        )
        .await
    }
}
