use folio::Epub;
use folio::epub::{EpubSettings, EpubSettingsBuilder};
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

pub const EPUB3_DIR: &str = "tests/ebooks/example_epub";
const EPUB2_DIR: &str = "tests/ebooks/epub2";

pub enum TestEpub {
    /// Unzipped Epub `3` directory (with nav + ncx)
    ///
    /// Mapped to: [`EPUB3_DIR`]
    Epub3Dir,
    /// [`Self::Epub3Dir`] zipped in memory
    Epub3File,
    /// Unzipped Epub `2` directory (ncx only)
    ///
    /// Mapped to: [`EPUB2_DIR`]
    Epub2Dir,
}

impl TestEpub {
    pub fn open(self) -> Epub {
        self.build(|b| b)
    }

    pub fn build(self, builder: impl Fn(EpubSettingsBuilder) -> EpubSettingsBuilder) -> Epub {
        let settings = builder(EpubSettings::builder());

        match self {
            Self::Epub3File => Epub::read_with(Cursor::new(zip_directory(EPUB3_DIR)), settings).unwrap(),
            Self::Epub3Dir => Epub::open_with(EPUB3_DIR, settings).unwrap(),
            Self::Epub2Dir => Epub::open_with(EPUB2_DIR, settings).unwrap(),
        }
    }
}

/// Zips the contents of `dir`, storing `mimetype` first and uncompressed.
pub fn zip_directory(dir: impl AsRef<Path>) -> Vec<u8> {
    let dir = dir.as_ref();
    let mut files = Vec::new();
    collect_files(dir, dir, &mut files);
    files.sort_by_key(|(name, _)| (name != "mimetype", name.clone()));

    zip_entries(files.iter().map(|(name, bytes)| (name.as_str(), bytes.as_slice())))
}

/// Builds a zip archive from `(name, bytes)` pairs.
pub fn zip_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a [u8])>) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for (name, bytes) in entries {
        let method = if name == "mimetype" {
            zip::CompressionMethod::Stored
        } else {
            zip::CompressionMethod::Deflated
        };
        let options = SimpleFileOptions::default().compression_method(method);

        writer.start_file(name, options).unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn collect_files(root: &Path, dir: &Path, files: &mut Vec<(String, Vec<u8>)>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();

        if path.is_dir() {
            collect_files(root, &path, files);
        } else {
            let name = path
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/");
            files.push((name, fs::read(&path).unwrap()));
        }
    }
}

pub const CONTAINER: &str = r#"<?xml version="1.0"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#;

/// A minimal EPUB 3 package document with the given `metadata`,
/// `manifest` and `spine` contents.
pub fn package(metadata: &str, manifest: &str, spine: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0" unique-identifier="uid">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">{metadata}</metadata>
  <manifest>{manifest}</manifest>
  <spine>{spine}</spine>
</package>"#
    )
}

/// A zipped book with a single chapter (`OEBPS/c1.xhtml`) and no table of contents.
pub fn single_chapter_epub(chapter: &str) -> Vec<u8> {
    let package = package(
        r#"<dc:title>Single</dc:title>"#,
        r#"<item id="c1" href="c1.xhtml" media-type="application/xhtml+xml"/>"#,
        r#"<itemref idref="c1"/>"#,
    );

    zip_entries([
        ("mimetype", b"application/epub+zip".as_slice()),
        ("META-INF/container.xml", CONTAINER.as_bytes()),
        ("OEBPS/content.opf", package.as_bytes()),
        ("OEBPS/c1.xhtml", chapter.as_bytes()),
    ])
}
