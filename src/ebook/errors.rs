//! Error-related types for an ebook.

pub use crate::ebook::archive::errors::{ArchiveError, ArchiveResult};
pub use crate::ebook::epub::errors::EpubError;
use std::error::Error;

/// Alias for `Result<T, EbookError>`.
pub type EbookResult<T> = Result<T, EbookError>;

/// Unified error type.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum EbookError {
    /// File access within an ebook archive has failed.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// Essential files are missing, or file contents are malformed.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// A chapter index exceeds the number of spine entries.
    #[error("Chapter index {index} is out of range ({len} chapters)")]
    ChapterOutOfRange { index: usize, len: usize },

    /// An operation was abandoned through a [`CancelFlag`](crate::inline::CancelFlag).
    ///
    /// Any resources created before cancellation have already been released.
    #[error("Operation cancelled")]
    Cancelled,
}

impl From<EpubError> for EbookError {
    fn from(error: EpubError) -> Self {
        Self::Format(FormatError::Epub(error))
    }
}

/// Possible format errors for an ebook.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum FormatError {
    /// File content unexpectedly causes an internal parser error.
    ///
    /// This may originate from malformed content within a file, such as improper XML.
    #[error(transparent)]
    Unparsable(#[from] Box<dyn Error + Send + Sync + 'static>),

    /// Format errors specific to an [`Epub`](crate::Epub).
    #[error(transparent)]
    Epub(#[from] EpubError),
}

impl EbookError {
    /// The EPUB-specific cause, if this is a structural format error.
    pub fn as_epub_error(&self) -> Option<&EpubError> {
        match self {
            Self::Format(FormatError::Epub(error)) => Some(error),
            _ => None,
        }
    }
}
