use crate::{error, info};

pub async fn playlist(reference: String, json: bool) {
    let fetcher = super::connect().await;

    info!("Fetching tracks of playlist {}", reference);
    let pb = super::spinner("Fetching playlist tracks...");
    let fetched = fetcher.playlist_tracks(&reference).await;
    pb.finish_and_clear();

    match fetched {
        Ok(fetched) => super::print_tracks(&fetched, json),
        Err(e) => error!("Cannot fetch playlist. Err: {}", e),
    }
}
