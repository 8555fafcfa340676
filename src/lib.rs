//! # folio
//! - Repository: <https://github.com/DevinSterling/folio>
//! - Documentation: <https://docs.rs/folio>
//!
//! Ebook ingestion for readers: parses EPUB 2 and 3 packages into a unified
//! metadata and navigation model, converts chapters to Markdown and produces
//! self-contained chapter HTML.
//!
//! ## Overview
//! - [`Epub`]: Opens a package and exposes its [metadata](epub::metadata),
//!   [manifest](epub::manifest), [spine](epub::spine) and
//!   [table of contents](epub::toc).
//! - [`markdown`]: Chapter to Markdown conversion, with images and footnote
//!   references reported alongside the text.
//! - [`inline`]: Chapter HTML with stylesheets and images embedded.
//! - [`markup`]: The lightweight tree every chapter is parsed into.
//!
//! ## Examples
//! Opening an epub and converting its chapters:
//! ```no_run
//! # use folio::errors::EbookResult;
//! # fn main() -> EbookResult<()> {
//! let epub = folio::Epub::open("example.epub")?;
//!
//! // Retrieving the title
//! println!("Title = {:?}", epub.metadata().title());
//!
//! // Printing the table of contents
//! for item in epub.toc()?.items() {
//!     let indent = "  ".repeat(item.level());
//!     println!("{indent}{} -> {:?}", item.label(), epub.chapter_index(item.href()));
//! }
//!
//! // Converting each chapter in reading order
//! for index in 0..epub.chapter_paths().len() {
//!     let chapter = epub.to_markdown(index)?;
//!     println!("{}", chapter.content());
//! }
//! # Ok(())
//! # }
//! ```

pub mod ebook;
pub mod inline;
pub mod markdown;
pub mod markup;
mod parser;
mod util;

pub use self::ebook::epub::Epub;
pub use self::ebook::{archive, epub, errors};
