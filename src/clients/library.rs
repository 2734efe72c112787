use crate::clients::{
    entities::{Page, Playlist, TrackEntry},
    errors::Result,
};

/// Calls the liker needs from a music service. Listing calls return one page
/// at a time starting at `offset`; saved-track calls accept at most
/// [`SAVED_TRACKS_LIMIT`] ids.
// Awaited on a single task; the futures are not required to be `Send`.
#[allow(async_fn_in_trait)]
pub trait Library {
    /// One page of the current user's playlists.
    async fn playlists_page(&self, limit: u32, offset: u32) -> Result<Page<Playlist>>;

    /// One page of the entries of `playlist_id`.
    async fn playlist_items_page(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Page<TrackEntry>>;

    /// One flag per id, in the same order as `track_ids`.
    async fn saved_tracks_contain(&self, track_ids: &[String]) -> Result<Vec<bool>>;

    /// Adds `track_ids` to the user's liked songs.
    async fn add_saved_tracks(&self, track_ids: &[String]) -> Result<()>;
}

/// Upper bound the service accepts for the saved-tracks endpoints.
pub const SAVED_TRACKS_LIMIT: usize = 50;
/// Largest page the playlists listing returns.
pub const PLAYLISTS_PAGE_LIMIT: u32 = 50;
/// Largest page the playlist items listing returns.
pub const PLAYLIST_ITEMS_PAGE_LIMIT: u32 = 100;
