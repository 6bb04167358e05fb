use crate::{
    errors::Result,
    types::{NewReleasesResponse, Page, SimplifiedAlbum},
};

use super::SpotifyClient;

impl SpotifyClient {
    /// Retrieves one page of the new-release feed.
    ///
    /// Uses `GET /browse/new-releases` with `offset` and `limit` (1-50). The
    /// endpoint wraps its page in an `albums` object, which is unwrapped here.
    pub async fn get_new_releases(
        &self,
        offset: u32,
        limit: u32,
    ) -> Result<Page<SimplifiedAlbum>> {
        let res: NewReleasesResponse = self
            .get_json(
                "/browse/new-releases",
                &[("offset", offset.to_string()), ("limit", limit.to_string())],
            )
            .await?;

        Ok(res.albums)
    }
}
