//! Errors raised while loading `linden.toml` and checking the site layout.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid linden.toml")]
    Toml(#[from] toml::de::Error),

    /// A `[build]` directory the site is read from is missing.
    #[error("[build.{key}] `{path}` is not a directory")]
    NotADirectory { key: &'static str, path: PathBuf },

    /// Output and content resolve to the same directory.
    #[error("[build.output] `{0}` is the content directory")]
    OutputIsContent(PathBuf),
}

impl ConfigError {
    pub(super) fn not_a_directory(key: &'static str, path: &std::path::Path) -> Self {
        Self::NotADirectory {
            key,
            path: path.to_path_buf(),
        }
    }
}
