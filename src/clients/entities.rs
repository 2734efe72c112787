use serde::Deserialize;

/// A playlist the user owns or follows.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Playlist {
    /// Bare service id, without the `spotify:playlist:` prefix.
    pub id: String,
    pub name: String,
}

/// A single row of a playlist. The service sends `null` for `track` when the
/// track was removed or is unavailable in the user's market.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TrackEntry {
    /// `None` for removed tracks and for anything that isn't a track.
    pub track: Option<TrackRecord>,
}

/// Local files and unplayable tracks come back without an `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TrackRecord {
    pub id: Option<String>,
}

impl TrackEntry {
    /// Id to check and save, if the entry still points at a track with one.
    pub fn track_id(&self) -> Option<&str> {
        self.track.as_ref()?.id.as_deref()
    }
}

/// One page of a listing endpoint. `next` is the service's cursor to the
/// following page and is absent on the last one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items of this page, in service order.
    pub items: Vec<T>,
    pub next: Option<String>,
}
