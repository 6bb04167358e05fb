use tabled::Table;

use crate::{error, info, types::ReleaseTableRow};

pub async fn releases(json: bool) {
    let fetcher = super::connect().await;

    let pb = super::spinner("Fetching new releases...");
    let fetched = fetcher.new_releases().await;
    pb.finish_and_clear();

    let fetched = match fetched {
        Ok(fetched) => fetched,
        Err(e) => error!("Cannot fetch new releases. Err: {}", e),
    };

    if json {
        match serde_json::to_string_pretty(&fetched.data) {
            Ok(out) => println!("{}", out),
            Err(e) => error!("Cannot serialize releases. Err: {}", e),
        }
    } else {
        let rows: Vec<ReleaseTableRow> = fetched
            .data
            .iter()
            .map(|id| ReleaseTableRow { album: id.clone() })
            .collect();
        println!("{}", Table::new(rows));
    }

    super::report(&fetched, "albums", fetched.data.len());
}

pub async fn new_tracks(json: bool) {
    let fetcher = super::connect().await;

    info!("Fetching tracks of all new releases");
    let pb = super::spinner("Fetching new release tracks...");
    let fetched = fetcher.new_release_tracks().await;
    pb.finish_and_clear();

    match fetched {
        Ok(fetched) => super::print_tracks(&fetched, json),
        Err(e) => error!("Cannot fetch new release tracks. Err: {}", e),
    }
}
