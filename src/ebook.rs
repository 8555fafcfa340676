//! Ebook packages and their navigation model.
//!
//! # Overview
//! - [`archive`]: Random-access reads of entries within a loaded package.
//! - [`epub`]: EPUB 2 and 3 package, spine and table of contents.
//! - [`errors`]: Ebook-related error types.

pub mod archive;
pub mod epub;
pub mod errors;
