//! Copies the tracks of one playlist into the user's liked songs.
//!
//! Everything here talks to the service through [`Library`] and writes its
//! progress lines to the provided sink, so the flow can be driven by the CLI
//! or by an in-memory library in tests.

use std::io::{BufRead, Write};

use log::{debug, info, warn};

use crate::clients::{
    entities::{Page, Playlist, TrackEntry},
    errors::{Error, Result},
    library::Library,
};
use crate::config::Config;

/// Text shown before reading the playlist name.
pub const PROMPT: &str = "Enter the name of the playlist to like songs from: ";

/// Counts reported by [`Liker::like_tracks`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LikeSummary {
    /// Ids that made it past the filter and were checked.
    pub checked: usize,
    /// Ids that were not liked yet and got saved.
    pub added: usize,
}

/// Fixed-size, in-order view over a slice. Iterating twice starts over.
#[derive(Debug, Clone, Copy)]
pub struct Batches<'a, T> {
    items: &'a [T],
    size: usize,
}

impl<'a, T> Batches<'a, T> {
    /// A `size` of zero is treated as one.
    pub fn new(items: &'a [T], size: usize) -> Self {
        Batches {
            items,
            size: size.max(1),
        }
    }

    /// Number of batches.
    pub fn len(&self) -> usize {
        self.items.len().div_ceil(self.size)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Chunks<'a, T> {
        self.items.chunks(self.size)
    }
}

impl<'a, T> IntoIterator for Batches<'a, T> {
    type Item = &'a [T];
    type IntoIter = std::slice::Chunks<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// First playlist whose name equals `name`, ignoring case.
pub fn resolve_playlist<'p>(playlists: &'p [Playlist], name: &str) -> Option<&'p Playlist> {
    let wanted = name.to_lowercase();
    playlists.iter().find(|p| p.name.to_lowercase() == wanted)
}

/// Ids of entries that still point at a track. Duplicates are kept.
pub fn liked_candidates(entries: &[TrackEntry]) -> Vec<String> {
    entries
        .iter()
        .filter_map(TrackEntry::track_id)
        .map(str::to_owned)
        .collect()
}

// Walks a listing endpoint until it stops handing out a next-page cursor
async fn collect_pages<T, F, Fut>(page_size: u32, mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut items = Vec::new();
    let mut offset = 0;
    loop {
        let page = fetch(offset).await?;
        let fetched = page.items.len();
        debug!("Fetched page at offset {offset} with {fetched} items");
        items.extend(page.items);
        if page.next.is_none() || fetched == 0 {
            break;
        }
        offset += page_size;
    }
    Ok(items)
}

/// Runs the listing and liking steps against `library`, writing progress
/// lines to `out`.
pub struct Liker<'a, L, W> {
    library: &'a L,
    config: Config,
    out: W,
}

impl<'a, L: Library, W: Write> Liker<'a, L, W> {
    pub fn new(library: &'a L, config: Config, out: W) -> Self {
        Liker {
            library,
            config,
            out,
        }
    }

    /// Gives back the output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Every playlist of the user, all pages fetched before returning.
    pub async fn list_playlists(&mut self) -> Result<Vec<Playlist>> {
        writeln!(self.out, "Your Playlists:")?;
        let library = self.library;
        let page_size = self.config.playlists_page_size;
        let playlists =
            collect_pages(page_size, move |offset| library.playlists_page(page_size, offset)).await?;
        info!("Fetched {} playlists", playlists.len());
        Ok(playlists)
    }

    /// Prints `<index>. <name>` per playlist, zero-based.
    pub fn print_playlists(&mut self, playlists: &[Playlist]) -> Result<()> {
        for (i, playlist) in playlists.iter().enumerate() {
            writeln!(self.out, "{i}. {}", playlist.name)?;
        }
        Ok(())
    }

    /// Like [`resolve_playlist`], failing with [`Error::PlaylistNotFound`].
    pub fn find_playlist<'p>(
        &mut self,
        playlists: &'p [Playlist],
        name: &str,
    ) -> Result<&'p Playlist> {
        writeln!(self.out, "\nSearching for playlist: {name}")?;
        let playlist = resolve_playlist(playlists, name)
            .ok_or_else(|| Error::PlaylistNotFound(name.to_owned()))?;
        writeln!(self.out, "Found playlist: {}", playlist.name)?;
        Ok(playlist)
    }

    /// Every entry of the playlist, all pages fetched before returning.
    pub async fn list_tracks(&mut self, playlist_id: &str) -> Result<Vec<TrackEntry>> {
        writeln!(self.out, "\nRetrieving all playlist tracks...")?;
        let library = self.library;
        let page_size = self.config.playlist_items_page_size;
        let entries = collect_pages(page_size, move |offset| {
            library.playlist_items_page(playlist_id, page_size, offset)
        })
        .await?;
        info!("Fetched {} entries of playlist {playlist_id}", entries.len());
        Ok(entries)
    }

    /// Splits `items` into batches of the configured size.
    pub fn chunked<'t, T>(&mut self, items: &'t [T]) -> Result<Batches<'t, T>> {
        writeln!(self.out, "Chunking list into size {}", self.config.batch_size)?;
        Ok(Batches::new(items, self.config.batch_size))
    }

    /// Saves every track of `entries` the user hasn't liked yet. Batches are
    /// sent one after another; a failure stops the remaining ones and leaves
    /// earlier batches saved.
    pub async fn like_tracks(&mut self, entries: &[TrackEntry]) -> Result<LikeSummary> {
        writeln!(self.out, "\nAdding tracks to liked songs...")?;
        let track_ids = liked_candidates(entries);
        writeln!(self.out, "\nTotal tracks to check: {}", track_ids.len())?;

        let mut to_add = Vec::new();
        for batch in self.chunked(&track_ids)? {
            let liked = self.library.saved_tracks_contain(batch).await?;
            if liked.len() != batch.len() {
                warn!(
                    "Saved-tracks check returned {} flags for {} ids",
                    liked.len(),
                    batch.len()
                );
            }
            to_add.extend(
                batch
                    .iter()
                    .zip(liked)
                    .filter(|(_, is_liked)| !is_liked)
                    .map(|(id, _)| id.clone()),
            );
        }

        let mut summary = LikeSummary {
            checked: track_ids.len(),
            added: 0,
        };

        if to_add.is_empty() {
            writeln!(self.out, "\nAll tracks are already liked.")?;
            return Ok(summary);
        }

        writeln!(self.out, "\nTotal new tracks to add: {}", to_add.len())?;
        for batch in self.chunked(&to_add)? {
            self.library.add_saved_tracks(batch).await?;
            summary.added += batch.len();
            writeln!(self.out, "Added {} tracks", batch.len())?;
        }

        writeln!(
            self.out,
            "\nSuccessfully liked {} total tracks.",
            to_add.len()
        )?;
        Ok(summary)
    }
}

/// Runs the whole interactive flow: list, prompt, resolve, fetch and like.
pub async fn like_playlist<L, R, W>(
    library: &L,
    config: Config,
    mut input: R,
    out: W,
) -> Result<LikeSummary>
where
    L: Library,
    R: BufRead,
    W: Write,
{
    let mut liker = Liker::new(library, config, out);

    let playlists = liker.list_playlists().await?;
    liker.print_playlists(&playlists)?;

    write!(liker.out, "\n{PROMPT}")?;
    liker.out.flush()?;
    let mut name = String::new();
    input.read_line(&mut name)?;
    let name = name.trim_end_matches(['\r', '\n']);

    let playlist = liker.find_playlist(&playlists, name)?;
    let entries = liker.list_tracks(&playlist.id).await?;
    liker.like_tracks(&entries).await
}
