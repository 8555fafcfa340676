//! Error-related types for an [`Epub`](super::Epub).

/// Possible format errors from an [`Epub`](super::Epub).
///
/// # Variants
/// ## Container Errors (`container.xml`)
/// - [`MissingContainer`](EpubError::MissingContainer)
/// - [`MalformedContainer`](EpubError::MalformedContainer)
/// ## OPF (`.opf`) Package Errors
/// - [`MissingPackage`](EpubError::MissingPackage)
/// - [`MalformedPackage`](EpubError::MalformedPackage)
/// - [`DanglingSpineReference`](EpubError::DanglingSpineReference)
/// ## Toc Errors (`.ncx/.xhtml`)
/// - [`MissingToc`](EpubError::MissingToc)
///
/// Every variant except [`MissingToc`](EpubError::MissingToc) means the
/// archive cannot be trusted and opening it fails. A missing table of
/// contents only disables TOC-based navigation; the spine remains readable.
#[non_exhaustive]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EpubError {
    ////////////////////////////////////////////////////////////////////////////////
    // Within `META-INF/container.xml`
    ////////////////////////////////////////////////////////////////////////////////
    /// The `META-INF/container.xml` entry does not exist.
    #[error("Missing `META-INF/container.xml`")]
    MissingContainer,

    /// The container does not reference a package document,
    /// or cannot be parsed.
    ///
    /// Error Source: `META-INF/container.xml`
    #[error("Malformed `META-INF/container.xml`: {0}")]
    MalformedContainer(String),

    ////////////////////////////////////////////////////////////////////////////////
    // Package-specific errors
    ////////////////////////////////////////////////////////////////////////////////
    /// The package document referenced by the container does not exist.
    #[error("Missing package document: {0}")]
    MissingPackage(String),

    /// A required package section (`metadata`, `manifest`, `spine`)
    /// is not found.
    ///
    /// Error Source: `.opf` file
    #[error("Missing `{0}` element in the package document")]
    MalformedPackage(&'static str),

    /// The `idref` of a spine entry (`itemref`) points to
    /// a non-existent manifest entry (`item`).
    ///
    /// Error Source: `.opf` file
    #[error("Spine `idref` references a non-existent manifest entry: {0}")]
    DanglingSpineReference(String),

    ////////////////////////////////////////////////////////////////////////////////
    // Within `toc.ncx/xhtml`
    ////////////////////////////////////////////////////////////////////////////////
    /// Neither a navigation document nor a legacy NCX is available.
    #[error("No navigation document or NCX found")]
    MissingToc,
}
