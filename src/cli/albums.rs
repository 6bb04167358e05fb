use crate::{error, info};

pub async fn albums(references: Vec<String>, json: bool) {
    let fetcher = super::connect().await;

    info!("Fetching tracks of {} album(s)", references.len());
    let pb = super::spinner("Fetching album tracks...");
    let fetched = fetcher.album_tracks(references.as_slice()).await;
    pb.finish_and_clear();

    match fetched {
        Ok(fetched) => super::print_tracks(&fetched, json),
        Err(e) => error!("Cannot fetch albums. Err: {}", e),
    }
}
