use clap::Args;
use folio::Epub;
use folio::epub::EpubSettings;
use folio::epub::toc::TocKind;
use folio::errors::EbookResult;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct TocCommand {
    /// An EPUB file or directory containing the contents of an unzipped EPUB
    pub ebook_path: PathBuf,

    /// Prefer the legacy NCX over the navigation document
    #[arg(long)]
    ncx: bool,
}

impl TocCommand {
    pub fn print(&self) -> EbookResult<()> {
        let preferred = if self.ncx { TocKind::Ncx } else { TocKind::Nav };
        let epub = Epub::open_with(&self.ebook_path, EpubSettings::builder().preferred_toc(preferred))?;
        let toc = epub.build_toc()?;

        if let Some(title) = toc.title() {
            println!("{title}");
        }
        for item in toc.items() {
            let chapter = epub
                .chapter_index(item.href())
                .map_or_else(|| String::from("-"), |index| index.to_string());

            println!(
                "{:indent$}{} [{chapter}] {}",
                "",
                item.label(),
                item.href(),
                indent = item.level() * 2,
            );
        }
        Ok(())
    }
}
