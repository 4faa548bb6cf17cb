use crate::{
    error::SpotifyError,
    spotify::{PlaylistService, SpotifyClient, client::checked},
    types::{
        CreatePlaylistRequest, CreatePlaylistResponse, ReplacePlaylistRequest, SnapshotResponse,
        Track,
    },
};

/// Spotify accepts at most 100 items per playlist write.
pub const MAX_ITEMS_PER_REQUEST: usize = 100;

/// What a playlist replacement did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistUpdate {
    Replaced {
        tracks: usize,
        snapshot_id: Option<String>,
    },
    /// Dry run: nothing was sent.
    DryRun { tracks: usize },
}

/// Replaces the whole playlist with `batch`, in batch order.
///
/// The first request overwrites the playlist, any further chunks are
/// appended. A failure part-way leaves the playlist as Spotify has it; there
/// is no rollback. With `dry_run` set nothing is sent.
pub async fn replace_playlist<P: PlaylistService>(
    service: &P,
    playlist_id: &str,
    batch: &[Track],
    dry_run: bool,
) -> Result<PlaylistUpdate, SpotifyError> {
    if dry_run {
        return Ok(PlaylistUpdate::DryRun {
            tracks: batch.len(),
        });
    }

    let uris: Vec<String> = batch.iter().map(|t| t.uri.clone()).collect();
    let mut chunks = uris.chunks(MAX_ITEMS_PER_REQUEST);

    let first = chunks.next().unwrap_or(&[]);
    let mut snapshot_id = service.replace_items(playlist_id, first).await?;

    for chunk in chunks {
        snapshot_id = service.append_items(playlist_id, chunk).await?;
    }

    Ok(PlaylistUpdate::Replaced {
        tracks: batch.len(),
        snapshot_id,
    })
}

/// Appends `uris` to the end of the playlist, leaving existing items alone.
///
/// Returns the snapshot id of the last write, or `None` when `uris` is empty
/// and nothing was sent.
pub async fn add_tracks<P: PlaylistService>(
    service: &P,
    playlist_id: &str,
    uris: &[String],
) -> Result<Option<String>, SpotifyError> {
    let mut snapshot_id = None;
    for chunk in uris.chunks(MAX_ITEMS_PER_REQUEST) {
        snapshot_id = service.append_items(playlist_id, chunk).await?;
    }
    Ok(snapshot_id)
}

impl PlaylistService for SpotifyClient {
    async fn replace_items(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<Option<String>, SpotifyError> {
        let body = ReplacePlaylistRequest {
            uris: uris.to_vec(),
        };
        let path = format!("/playlists/{playlist_id}/tracks");
        log::debug!("PUT {} ({} items)", path, uris.len());

        let response = checked(self.put(&path).json(&body).send().await?).await?;
        Ok(snapshot_of(response).await)
    }

    async fn append_items(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<Option<String>, SpotifyError> {
        let body = ReplacePlaylistRequest {
            uris: uris.to_vec(),
        };
        let path = format!("/playlists/{playlist_id}/tracks");
        log::debug!("POST {} ({} items)", path, uris.len());

        let response = checked(self.post(&path).json(&body).send().await?).await?;
        Ok(snapshot_of(response).await)
    }
}

/// Some replace responses come back with an empty body.
async fn snapshot_of(response: reqwest::Response) -> Option<String> {
    let body = response.text().await.ok()?;
    serde_json::from_str::<SnapshotResponse>(&body)
        .ok()
        .map(|s| s.snapshot_id)
}

/// Creates a playlist owned by the current user.
pub async fn create(
    client: &SpotifyClient,
    name: &str,
    public: bool,
    description: &str,
) -> Result<CreatePlaylistResponse, SpotifyError> {
    let body = CreatePlaylistRequest {
        name: name.to_string(),
        description: description.to_string(),
        public,
        collaborative: false,
    };

    client
        .send_json(client.post("/me/playlists").json(&body))
        .await
}
