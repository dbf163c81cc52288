//! Fatal build errors.
//!
//! Anything reported here aborts the whole build. Page-local failures
//! (an unreadable source, a broken hand-written template) are logged and
//! skipped by the phase that hit them instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("unable to list directory `{0}`")]
    ReadDir(PathBuf, #[source] walkdir::Error),

    #[error("unable to prepare output directory `{0}`")]
    CreateOutput(PathBuf, #[source] std::io::Error),

    #[error("unable to open template `{0}`")]
    MissingTemplate(PathBuf, #[source] std::io::Error),

    #[error("unable to parse template `{0}`")]
    Template(String, #[source] tera::Error),
}
