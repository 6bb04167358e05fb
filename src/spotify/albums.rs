use crate::{
    errors::Result,
    types::{Album, GetSeveralAlbumsResponse, Page, SimplifiedTrack},
};

use super::SpotifyClient;

impl SpotifyClient {
    /// Retrieves full details for a batch of albums in a single request.
    ///
    /// Uses `GET /albums?ids=...`, which accepts at most 20 ids. Albums come
    /// back in request order; ids Spotify does not know are returned as
    /// `None`. Each album embeds the first page of its tracks.
    ///
    /// # Example
    ///
    /// ```
    /// let ids = vec!["4aawyAB9vmqN3uQ7FjRGTy".to_string()];
    /// for album in client.get_several_albums(&ids).await?.into_iter().flatten() {
    ///     println!("{} has {} tracks", album.id, album.tracks.items.len());
    /// }
    /// ```
    pub async fn get_several_albums(&self, album_ids: &[String]) -> Result<Vec<Option<Album>>> {
        let res: GetSeveralAlbumsResponse = self
            .get_json("/albums", &[("ids", album_ids.join(","))])
            .await?;

        Ok(res.albums)
    }

    /// Retrieves one page of an album's tracks via `GET /albums/{id}/tracks`.
    pub async fn get_album_tracks(
        &self,
        album_id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<Page<SimplifiedTrack>> {
        self.get_json(
            &format!("/albums/{id}/tracks", id = album_id),
            &[("offset", offset.to_string()), ("limit", limit.to_string())],
        )
        .await
    }
}
