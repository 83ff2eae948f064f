/// Structured error types for clientele-core.
///
/// Uses `thiserror` for better API surface and error composition.
/// Binary crates can still use `anyhow` for convenience, but library
/// consumers get structured, composable errors.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the settings file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Settings file does not exist
    #[error("settings file not found: {path:?}")]
    NotFound { path: PathBuf },

    /// Settings file exists but could not be read
    #[error("failed to read settings file {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },

    /// Settings file is not valid TOML, or the `DB_user_password_data`
    /// section or one of its required keys is missing
    #[error("failed to parse settings file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Result type alias for clientele-core operations
pub type Result<T> = std::result::Result<T, ConfigError>;
