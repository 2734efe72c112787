use log::debug;

use crate::clients::{
    entities::{Page, Playlist, TrackEntry, TrackRecord},
    errors::{Error, Result},
    library::Library,
};
use crate::config::Config as LikerConfig;
use rspotify::{
    AuthCodeSpotify, Config, Credentials, OAuth,
    model::{
        Page as SpotifyPage, PlayableItem, PlaylistId, PlaylistItem, SimplifiedPlaylist, TrackId,
    },
    prelude::*,
};

impl From<SimplifiedPlaylist> for Playlist {
    fn from(p: SimplifiedPlaylist) -> Playlist {
        Playlist {
            id: p.id.id().to_owned(),
            name: p.name,
        }
    }
}

impl From<PlaylistItem> for TrackEntry {
    fn from(item: PlaylistItem) -> TrackEntry {
        // Episodes can't be saved as tracks, treat them like missing entries
        let track = match item.track {
            Some(PlayableItem::Track(t)) => Some(TrackRecord {
                id: t.id.map(|id| id.id().to_owned()),
            }),
            _ => None,
        };
        TrackEntry { track }
    }
}

fn into_page<S: serde::de::DeserializeOwned, T: From<S>>(page: SpotifyPage<S>) -> Page<T> {
    Page {
        items: page.items.into_iter().map(T::from).collect(),
        next: page.next,
    }
}

fn track_ids(ids: &[String]) -> Result<Vec<TrackId<'_>>> {
    ids.iter()
        .map(|id| TrackId::from_id(id.as_str()).map_err(Error::from))
        .collect()
}

/// [`Library`] backed by the Spotify Web API.
pub struct SpotifyClient {
    pub spotify: AuthCodeSpotify,
}

impl SpotifyClient {
    // Authorize the Spotify client via CLI prompt and OAuth flow.
    // A cached token is reused (and refreshed if expired) before prompting.
    pub async fn authorize_client(&self) -> Result<()> {
        debug!("Starting Spotify authorization ...");
        let url = self.spotify.get_authorize_url(false)?;
        // This function requires the `cli` feature enabled.
        self.spotify.prompt_for_token(&url).await?;
        let user = self.spotify.me().await?;
        debug!("Authenticated as user: {:?}", user.display_name);
        Ok(())
    }

    // Create a SpotifyClient from environment credentials and the given config
    pub fn try_default(config: &LikerConfig) -> Result<Self> {
        let creds = Credentials::from_env()
        .ok_or_else(|| Error::ConfigurationError("Missing Spotify credentials in environment variables (RSPOTIFY_CLIENT_ID, RSPOTIFY_CLIENT_SECRET).".into()))?;
        let oauth = OAuth::from_env(config.scopes.clone())
        .ok_or_else(|| Error::ConfigurationError("Missing Spotify OAuth configuration in environment variables (RSPOTIFY_REDIRECT_URI).".into()))?;

        debug!("Caching Spotify token in {:?}", config.cache_path);
        let spotify = AuthCodeSpotify::with_config(
            creds,
            oauth,
            Config {
                token_cached: true,
                cache_path: config.cache_path.clone(),
                ..Default::default()
            },
        );

        Ok(Self { spotify })
    }
}

impl Library for SpotifyClient {
    async fn playlists_page(&self, limit: u32, offset: u32) -> Result<Page<Playlist>> {
        let page = self
            .spotify
            .current_user_playlists_manual(Some(limit), Some(offset))
            .await?;
        Ok(into_page(page))
    }

    async fn playlist_items_page(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Page<TrackEntry>> {
        let playlist_id = PlaylistId::from_id(playlist_id)?;
        let page = self
            .spotify
            .playlist_items_manual(playlist_id, None, None, Some(limit), Some(offset))
            .await?;
        Ok(into_page(page))
    }

    async fn saved_tracks_contain(&self, ids: &[String]) -> Result<Vec<bool>> {
        let ids = track_ids(ids)?;
        Ok(self.spotify.current_user_saved_tracks_contains(ids).await?)
    }

    async fn add_saved_tracks(&self, ids: &[String]) -> Result<()> {
        let ids = track_ids(ids)?;
        self.spotify.current_user_saved_tracks_add(ids).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn artist(id: Value, name: &str) -> Value {
        json!({
            "external_urls": {},
            "href": null,
            "id": id,
            "name": name,
            "type": "artist",
            "uri": null
        })
    }

    fn full_track(id: Value, is_local: bool) -> Value {
        let album_type = if is_local { Value::Null } else { json!("album") };
        json!({
            "album": {
                "album_type": album_type,
                "artists": [],
                "available_markets": [],
                "external_urls": {},
                "href": null,
                "id": null,
                "images": [],
                "name": "Some Album",
                "release_date": null,
                "release_date_precision": null,
                "type": "album",
                "uri": null
            },
            "artists": [artist(Value::Null, "Some Artist")],
            "available_markets": [],
            "disc_number": 1,
            "duration_ms": 215_000,
            "explicit": false,
            "external_ids": {},
            "external_urls": {},
            "href": null,
            "id": id,
            "is_local": is_local,
            "name": "Some Song",
            "popularity": 0,
            "preview_url": null,
            "track_number": 1,
            "type": "track",
            "uri": "spotify:local:Some+Artist:Some+Album:Some+Song:215"
        })
    }

    fn full_episode() -> Value {
        json!({
            "audio_preview_url": null,
            "description": "An episode",
            "duration_ms": 1_800_000,
            "explicit": false,
            "external_urls": {"spotify": "https://open.spotify.com/episode/512ojhOuo1ktJprKbVcKyQ"},
            "href": "https://api.spotify.com/v1/episodes/512ojhOuo1ktJprKbVcKyQ",
            "html_description": "<p>An episode</p>",
            "id": "512ojhOuo1ktJprKbVcKyQ",
            "images": [{"url": "https://i.scdn.co/image/ab67", "height": 640, "width": 640}],
            "is_externally_hosted": false,
            "is_playable": true,
            "language": "en",
            "languages": ["en"],
            "name": "Episode One",
            "release_date": "2024-01-15",
            "release_date_precision": "day",
            "resume_point": {"fully_played": false, "resume_position_ms": 0},
            "show": {
                "available_markets": ["US"],
                "copyrights": [],
                "description": "A show",
                "explicit": false,
                "external_urls": {"spotify": "https://open.spotify.com/show/38bS44xjbVVZ3No3ByF1dJ"},
                "href": "https://api.spotify.com/v1/shows/38bS44xjbVVZ3No3ByF1dJ",
                "html_description": "<p>A show</p>",
                "id": "38bS44xjbVVZ3No3ByF1dJ",
                "images": [],
                "is_externally_hosted": false,
                "languages": ["en"],
                "media_type": "audio",
                "name": "Some Show",
                "publisher": "Someone",
                "total_episodes": 10,
                "type": "show",
                "uri": "spotify:show:38bS44xjbVVZ3No3ByF1dJ"
            },
            "type": "episode",
            "uri": "spotify:episode:512ojhOuo1ktJprKbVcKyQ"
        })
    }

    fn entry_from(track: Value, is_local: bool) -> TrackEntry {
        let item: PlaylistItem = serde_json::from_value(json!({
            "added_at": null,
            "added_by": null,
            "is_local": is_local,
            "track": track
        }))
        .unwrap();
        TrackEntry::from(item)
    }

    #[test]
    fn track_item_keeps_bare_id() {
        let entry = entry_from(full_track(json!("4uLU6hMCjMI75M1A2tKUQC"), false), false);
        assert_eq!(entry.track_id(), Some("4uLU6hMCjMI75M1A2tKUQC"));
    }

    #[test]
    fn removed_track_has_no_id() {
        let entry = entry_from(Value::Null, false);
        assert_eq!(entry, TrackEntry { track: None });
        assert_eq!(entry.track_id(), None);
    }

    #[test]
    fn local_file_has_no_id() {
        let entry = entry_from(full_track(Value::Null, true), true);
        assert!(entry.track.is_some());
        assert_eq!(entry.track_id(), None);
    }

    #[test]
    fn episode_is_not_a_track() {
        let entry = entry_from(full_episode(), false);
        assert_eq!(entry, TrackEntry { track: None });
    }

    #[test]
    fn malformed_id_is_rejected_before_any_call() {
        let ids = vec!["4uLU6hMCjMI75M1A2tKUQC".to_string(), "not an id!".to_string()];
        assert!(matches!(track_ids(&ids), Err(Error::InvalidId(_))));
    }
}
