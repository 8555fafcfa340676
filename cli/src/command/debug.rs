use clap::Args;
use folio::Epub;
use folio::epub::EpubSettings;
use folio::errors::EbookResult;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DebugCommand {
    /// An EPUB file or directory containing the contents of an unzipped EPUB
    pub ebook_path: PathBuf,

    /// Display all metadata
    #[arg(long)]
    metadata: bool,

    /// Display the manifest
    #[arg(long)]
    manifest: bool,

    /// Display the spine
    #[arg(long)]
    spine: bool,

    /// Display the ToC
    #[arg(long)]
    toc: bool,
}

impl DebugCommand {
    pub fn debug(&self) -> EbookResult<()> {
        // The ToC is only built when it is displayed
        let settings = EpubSettings::builder().skip_toc(self.has_selected_components() && !self.toc);
        let epub = Epub::open_with(&self.ebook_path, settings)?;
        self.show_debug(&epub);

        Ok(())
    }

    pub fn has_selected_components(&self) -> bool {
        self.metadata || self.manifest || self.spine || self.toc
    }

    pub fn show_debug(&self, epub: &Epub) {
        if !self.has_selected_components() {
            println!("{epub:#?}");
            return;
        }

        let debug_structs: &[(bool, &dyn std::fmt::Debug)] = &[
            (self.metadata, &epub.metadata()),
            (self.manifest, &epub.manifest()),
            (self.spine, &epub.spine()),
            (self.toc, &epub.toc()),
        ];

        for (is_print, debug_struct) in debug_structs {
            if *is_print {
                println!("{debug_struct:#?}");
            }
        }
    }
}
