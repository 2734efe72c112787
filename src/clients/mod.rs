/// Typed playlist and track records
pub mod entities;
/// Error types and result aliases
pub mod errors;
/// Calls the liker makes against a music service
pub mod library;
/// Spotify API client
pub mod spotify;

pub use library::Library;
pub use spotify::SpotifyClient;
