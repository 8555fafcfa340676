use clap::Args;
use folio::Epub;
use folio::errors::EbookResult;
use folio::inline::BlobStore;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct InlineCommand {
    /// An EPUB file or directory containing the contents of an unzipped EPUB
    pub ebook_path: PathBuf,

    /// Zero-based spine index
    #[arg(short, long, default_value_t = 0)]
    chapter: usize,

    /// List the embedded handles instead of printing the HTML
    #[arg(long)]
    handles: bool,
}

impl InlineCommand {
    pub fn inline(&self) -> EbookResult<()> {
        let epub = Epub::open(&self.ebook_path)?;
        let store = Arc::new(BlobStore::new());
        let chapter = epub.inline_chapter(self.chapter, &store)?;

        if self.handles {
            for handle in chapter.handles() {
                if let Some(blob) = store.get(handle) {
                    println!("{handle} {} ({} bytes)", blob.media_type(), blob.bytes().len());
                }
            }
        } else {
            println!("{}", chapter.html());
        }
        for missing in chapter.missing_assets() {
            eprintln!("missing: {missing}");
        }

        chapter.release();
        Ok(())
    }
}
