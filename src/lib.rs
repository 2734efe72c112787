//! Rliker - Like every track of a Spotify playlist
//!
//! This library lists the user's playlists, resolves one by name and adds its
//! tracks to the user's liked songs, skipping tracks that are already liked.

/// Client modules for interacting with the music service
pub mod clients;
/// Run configuration read from the environment
pub mod config;
/// Playlist listing, lookup and batch liking
pub mod liker;
