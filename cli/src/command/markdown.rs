use clap::Args;
use folio::Epub;
use folio::errors::EbookResult;
use folio::markdown::MarkdownResult;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct MarkdownCommand {
    /// An EPUB file or directory containing the contents of an unzipped EPUB
    pub ebook_path: PathBuf,

    /// Zero-based spine index; every chapter is converted if omitted
    #[arg(short, long)]
    chapter: Option<usize>,

    /// Also list the images and footnotes found in each chapter
    #[arg(long)]
    references: bool,
}

impl MarkdownCommand {
    pub fn convert(&self) -> EbookResult<()> {
        let epub = Epub::open(&self.ebook_path)?;
        let indices = match self.chapter {
            Some(index) => index..index + 1,
            None => 0..epub.chapter_paths().len(),
        };

        for index in indices {
            let result = epub.to_markdown(index)?;
            println!("<!-- {index}: {} -->", result.title().unwrap_or_default());
            println!("{}\n", result.content());

            if self.references {
                Self::show_references(&result);
            }
        }
        Ok(())
    }

    fn show_references(result: &MarkdownResult) {
        for image in result.images() {
            println!("image: {} {}", image.href(), image.alt().unwrap_or_default());
        }
        for footnote in result.footnotes() {
            println!("footnote: {} {}", footnote.href(), footnote.label());
        }
    }
}
