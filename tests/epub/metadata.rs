use crate::epub::util::TestEpub;
use folio::epub::metadata::EpubVersion;

#[test]
fn test_case_insensitive_lookup() {
    let epub = TestEpub::Epub3File.open();
    let metadata = epub.metadata();

    let lower = metadata.get("title").unwrap();
    assert_eq!(lower, metadata.get("Title").unwrap());
    assert_eq!(lower, metadata.get("TITLE").unwrap());
    assert_eq!(lower, metadata.get("dc:title").unwrap());
    assert_eq!("", metadata.get_text("contributor"));
}

#[test]
fn test_epub3_metadata() {
    let epub = TestEpub::Epub3Dir.open();
    let metadata = epub.metadata();

    assert_eq!(EpubVersion::Epub3, metadata.version());
    assert_eq!("3.0", metadata.version_str());

    // Document order is kept, but `title` prefers the main title
    assert_eq!("A Field Guide", metadata.get_text("title"));
    assert_eq!("Example Book", metadata.title().unwrap().value());
    assert_eq!(Some("subtitle"), metadata.get("title").unwrap().refinement("title-type"));

    assert_eq!("en", metadata.language().unwrap().value());
    assert_eq!(
        "urn:uuid:4f8c3e0a-1b2c-4d5e-8f90-a1b2c3d4e5f6",
        metadata.identifier().unwrap().value()
    );
    assert_eq!(2, metadata.get_all("identifier").count());
}

#[test]
fn test_refinements() {
    let epub = TestEpub::Epub3Dir.open();
    let metadata = epub.metadata();
    let creators: Vec<_> = metadata.creators().collect();

    assert_eq!(2, creators.len());

    let author = creators[0];
    assert_eq!("Jane Doe", author.value());
    assert_eq!(Some("author"), author.id());
    assert_eq!(Some("aut"), author.refinement("role"));
    assert_eq!(Some("Doe, Jane"), author.refinement("file-as"));
    assert_eq!(author, metadata.by_id("#author").unwrap());

    assert_eq!("John Roe", creators[1].value());
    assert!(creators[1].refinements().is_empty());
}

#[test]
fn test_meta_entries() {
    let epub = TestEpub::Epub3Dir.open();
    let metadata = epub.metadata();

    assert_eq!(
        "2024-01-01T00:00:00Z",
        metadata.meta("dcterms:modified").unwrap().value()
    );
    assert_eq!("folio fixtures", metadata.meta("generator").unwrap().value());
    // Refining metas are attached, not listed
    assert!(metadata.meta("title-type").is_none());
    assert!(metadata.meta("display-seq").is_none());
}

#[test]
fn test_epub2_metadata() {
    let epub = TestEpub::Epub2Dir.open();
    let metadata = epub.metadata();

    assert_eq!(EpubVersion::Epub2, metadata.version());
    assert_eq!("Legacy Book", metadata.title().unwrap().value());
    assert_eq!("fr", metadata.language().unwrap().value());
    assert_eq!("9780000000002", metadata.identifier().unwrap().value());

    // EPUB 2 `opf:` attributes stand in for refinements
    let creator = metadata.creators().next().unwrap();
    assert_eq!(Some("aut"), creator.refinement("role"));
    assert_eq!(Some("Author, Old"), creator.refinement("file-as"));
    assert_eq!(Some("cover-img"), metadata.meta("cover").map(|meta| meta.value()));
}
