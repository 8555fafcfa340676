use crate::epub::util::{CONTAINER, package, zip_entries};
use folio::Epub;
use folio::errors::{ArchiveError, EbookError, EbookResult, EpubError};
use std::io::Cursor;

const CHAPTER: &str = "<html><body><p>Text</p></body></html>";
const MANIFEST: &str = r#"<item id="c1" href="c1.xhtml" media-type="application/xhtml+xml"/>"#;

fn read(entries: &[(&str, &str)]) -> EbookResult<Epub> {
    let mut all = vec![("mimetype", "application/epub+zip")];
    all.extend_from_slice(entries);

    Epub::read(Cursor::new(zip_entries(
        all.iter().map(|&(name, content)| (name, content.as_bytes())),
    )))
}

fn epub_error(result: EbookResult<Epub>) -> EpubError {
    result.unwrap_err().as_epub_error().cloned().unwrap()
}

#[test]
fn test_missing_container() {
    let error = epub_error(read(&[("OEBPS/c1.xhtml", CHAPTER)]));

    assert_eq!(EpubError::MissingContainer, error);
}

#[test]
fn test_malformed_container() {
    let container = r#"<container><rootfiles><rootfile media-type="application/oebps-package+xml"/></rootfiles></container>"#;
    let error = epub_error(read(&[("META-INF/container.xml", container)]));

    assert!(matches!(error, EpubError::MalformedContainer(_)));
}

#[test]
fn test_missing_package() {
    let error = epub_error(read(&[("META-INF/container.xml", CONTAINER)]));

    assert_eq!(EpubError::MissingPackage(String::from("OEBPS/content.opf")), error);
}

#[test]
fn test_malformed_package() {
    let opf = r#"<package version="3.0"><metadata/><manifest/></package>"#;
    let error = epub_error(read(&[
        ("META-INF/container.xml", CONTAINER),
        ("OEBPS/content.opf", opf),
    ]));

    assert_eq!(EpubError::MalformedPackage("spine"), error);
}

#[test]
fn test_dangling_spine_reference() {
    let opf = package("", MANIFEST, r#"<itemref idref="c1"/><itemref idref="c9"/>"#);
    let error = epub_error(read(&[
        ("META-INF/container.xml", CONTAINER),
        ("OEBPS/content.opf", &opf),
        ("OEBPS/c1.xhtml", CHAPTER),
    ]));

    assert_eq!(EpubError::DanglingSpineReference(String::from("c9")), error);
}

#[test]
fn test_unreadable_archive() {
    let result = Epub::read(Cursor::new(b"definitely not a zip file".to_vec()));

    assert!(matches!(
        result,
        Err(EbookError::Archive(ArchiveError::UnreadableArchive { path: None, .. }))
    ));
}

#[test]
fn test_unresolvable_refinement() {
    // Refinements targeting unknown ids are dropped without failing
    let metadata = r##"<dc:title id="t">Title</dc:title>
        <meta refines="#t" property="title-type">main</meta>
        <meta refines="#nowhere" property="role">aut</meta>"##;
    let opf = package(metadata, MANIFEST, r#"<itemref idref="c1"/>"#);
    let epub = read(&[
        ("META-INF/container.xml", CONTAINER),
        ("OEBPS/content.opf", &opf),
        ("OEBPS/c1.xhtml", CHAPTER),
    ])
    .unwrap();

    let title = epub.metadata().title().unwrap();
    assert_eq!(Some("main"), title.refinement("title-type"));
    assert!(epub.metadata().meta("role").is_none());
    assert_eq!(1, epub.chapter_paths().len());
}

#[test]
fn test_missing_spine_entry() {
    // Listed in the manifest but absent from the archive
    let opf = package("", MANIFEST, r#"<itemref idref="c1"/>"#);
    let epub = read(&[
        ("META-INF/container.xml", CONTAINER),
        ("OEBPS/content.opf", &opf),
    ])
    .unwrap();

    assert!(matches!(
        epub.to_markdown(0),
        Err(EbookError::Archive(ArchiveError::MissingEntry(path))) if path == "OEBPS/c1.xhtml"
    ));
}
