use rspotify::{ClientError, model::IdError};
use thiserror::Error;

/// Everything that can end a run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Spotify error: {0}")]
    SpotifyError(#[from] ClientError),

    #[error("Spotify rejected identifier: {0}")]
    InvalidId(#[from] IdError),

    #[error("Playlist '{0}' not found.")]
    PlaylistNotFound(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<std::env::VarError> for Error {
    fn from(err: std::env::VarError) -> Self {
        Error::ConfigurationError(err.to_string())
    }
}

/// Result alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_playlist() {
        let err = Error::PlaylistNotFound("Xyz".into());
        assert_eq!(err.to_string(), "Playlist 'Xyz' not found.");
    }

    #[test]
    fn missing_env_var_is_a_configuration_error() {
        let err = Error::from(std::env::VarError::NotPresent);
        assert!(matches!(err, Error::ConfigurationError(_)));
    }
}
