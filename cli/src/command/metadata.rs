use clap::Args;
use folio::Epub;
use folio::epub::EpubSettings;
use folio::epub::metadata::DcProperty;
use folio::errors::EbookResult;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct MetadataCommand {
    /// An EPUB file or directory containing the contents of an unzipped EPUB
    pub ebook_path: PathBuf,

    /// Also display refinements and non-Dublin Core `meta` entries
    #[arg(short, long)]
    all: bool,
}

impl MetadataCommand {
    pub fn print(&self) -> EbookResult<()> {
        let epub = Epub::open_with(&self.ebook_path, EpubSettings::builder().skip_toc(true))?;
        let metadata = epub.metadata();

        println!("version: {}", metadata.version_str());
        for property in metadata.properties() {
            self.print_property(property);
        }

        if self.all {
            for meta in metadata.metas() {
                println!("meta {}: {}", meta.property(), meta.value());
            }
        }
        Ok(())
    }

    fn print_property(&self, property: &DcProperty) {
        println!("{}: {}", property.name(), property.value());

        if self.all {
            for (key, values) in property.refinements() {
                for value in values {
                    println!("  {key}: {value}");
                }
            }
        }
    }
}
