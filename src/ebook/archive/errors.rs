use std::io;
use std::path::PathBuf;

/// Alias for `Result<T, ArchiveError>`.
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Possible errors from an [`Archive`](super::Archive).
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum ArchiveError {
    /// The archive itself is unreadable due to not existing,
    /// unsupported format, or malformed state.
    ///
    /// Path *is* [`None`] when the archive was read from an arbitrary reader.
    #[error("[UnreadableArchive - `{path:?}`]: {source}")]
    UnreadableArchive {
        /// The root cause of this error.
        source: io::Error,
        /// The path responsible for triggering the error, if applicable.
        path: Option<PathBuf>,
    },

    /// An entry exists although is unable to be read, typically I/O.
    #[error("[CannotRead - `{entry}`]: {source}")]
    CannotRead {
        /// The root cause of the error.
        source: io::Error,
        /// The entry responsible for triggering the error.
        entry: String,
    },

    /// A required entry is not present in the archive.
    #[error("[MissingEntry - `{0}`]: No such entry within the archive")]
    MissingEntry(String),
}
