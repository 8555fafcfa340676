use clap::Subcommand;

mod debug;
mod inline;
mod markdown;
mod metadata;
mod toc;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the debugged metadata, manifest, spine and ToC of a book.
    Debug(debug::DebugCommand),
    /// Print the Dublin Core metadata.
    Metadata(metadata::MetadataCommand),
    /// Print the flattened table of contents.
    Toc(toc::TocCommand),
    /// Convert a chapter to Markdown.
    Markdown(markdown::MarkdownCommand),
    /// Print a chapter with its stylesheets and images embedded.
    Inline(inline::InlineCommand),
}
