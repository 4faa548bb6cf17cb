use crate::{
    error::SpotifyError,
    spotify::{SpotifyClient, TrackCatalog},
    types::{ApiTrack, MoodDescriptor, RecommendationsResponse, SearchResponse, Track},
};

/// Query parameters for `GET /recommendations`.
///
/// Tempo bounds are sent as whole BPM, the other features with two decimals.
pub fn recommendation_params(
    mood: &MoodDescriptor,
    limit: u32,
    market: &str,
) -> Vec<(&'static str, String)> {
    vec![
        ("seed_genres", mood.seed_genres.join(",")),
        ("limit", limit.to_string()),
        ("market", market.to_string()),
        ("min_energy", format!("{:.2}", mood.energy.min)),
        ("max_energy", format!("{:.2}", mood.energy.max)),
        ("min_valence", format!("{:.2}", mood.valence.min)),
        ("max_valence", format!("{:.2}", mood.valence.max)),
        ("min_tempo", format!("{:.0}", mood.tempo.min)),
        ("max_tempo", format!("{:.0}", mood.tempo.max)),
    ]
}

/// Query parameters for a `genre:"<seed>"` track search.
pub fn search_params(
    genre: &str,
    offset: u32,
    limit: u32,
    market: &str,
) -> Vec<(&'static str, String)> {
    vec![
        ("q", format!("genre:\"{genre}\"")),
        ("type", "track".to_string()),
        ("limit", limit.to_string()),
        ("offset", offset.to_string()),
        ("market", market.to_string()),
    ]
}

fn into_tracks(items: Vec<ApiTrack>) -> Vec<Track> {
    items.into_iter().filter_map(ApiTrack::into_track).collect()
}

impl TrackCatalog for SpotifyClient {
    async fn recommendations(
        &self,
        mood: &MoodDescriptor,
        limit: u32,
    ) -> Result<Vec<Track>, SpotifyError> {
        let params = recommendation_params(mood, limit, self.market());
        log::debug!("GET /recommendations {:?}", params);

        let res: RecommendationsResponse = self
            .send_json(self.get("/recommendations").query(&params))
            .await?;

        Ok(into_tracks(res.tracks))
    }

    async fn search_genre(
        &self,
        genre: &str,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<Track>, SpotifyError> {
        let params = search_params(genre, offset, limit, self.market());
        log::debug!("GET /search {:?}", params);

        let res: SearchResponse = self.send_json(self.get("/search").query(&params)).await?;

        Ok(into_tracks(res.tracks.items))
    }
}
