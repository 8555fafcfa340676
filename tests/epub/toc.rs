use crate::epub::util::{TestEpub, single_chapter_epub};
use folio::Epub;
use folio::epub::errors::EpubError;
use folio::epub::toc::{TocKind, TocSource, resolve_to_chapter_index};
use std::io::Cursor;

struct TocEntryData<'a> {
    label: &'a str,
    href: &'a str,
    level: usize,
    chapter: Option<usize>,
}

#[rustfmt::skip]
const NAV_ENTRIES: &[TocEntryData<'static>] = &[
    TocEntryData { label: "Chapter One", href: "text/chapter1.xhtml", level: 0, chapter: Some(0) },
    TocEntryData { label: "Chapter Two", href: "text/chapter%202.xhtml", level: 0, chapter: Some(1) },
    TocEntryData { label: "Section Two", href: "text/chapter%202.xhtml#s2", level: 1, chapter: Some(1) },
    TocEntryData { label: "Notes", href: "text/notes.xhtml", level: 0, chapter: Some(2) },
];

#[rustfmt::skip]
const NCX_ENTRIES: &[TocEntryData<'static>] = &[
    TocEntryData { label: "Chapter One", href: "text/chapter1.xhtml", level: 0, chapter: Some(0) },
    TocEntryData { label: "Chapter Two", href: "text/chapter%202.xhtml", level: 0, chapter: Some(1) },
    TocEntryData { label: "Section Two", href: "text/chapter%202.xhtml#s2", level: 1, chapter: Some(1) },
];

fn assert_entries(epub: &Epub, expected: &[TocEntryData]) {
    let toc = epub.toc().unwrap();
    assert_eq!(expected.len(), toc.len());

    for (entry, expected) in toc.items().iter().zip(expected) {
        assert_eq!(expected.label, entry.label());
        assert_eq!(expected.href, entry.href());
        assert_eq!(expected.level, entry.level());
        assert_eq!(expected.chapter, epub.chapter_index(entry.href()));
    }
}

#[test]
fn test_nav_toc() {
    let epub = TestEpub::Epub3File.open();
    let toc = epub.toc().unwrap();

    assert_eq!(&TocSource::Nav(String::from("OEBPS/nav.xhtml")), toc.source());
    assert_eq!("OEBPS", toc.base_dir());
    // Heading of the `toc` nav; landmarks and page-list navs are ignored
    assert_eq!(Some("Contents"), toc.title());
    assert_entries(&epub, NAV_ENTRIES);
}

#[test]
fn test_ncx_preference() {
    let epub = TestEpub::Epub3Dir.build(|b| b.preferred_toc(TocKind::Ncx));
    let toc = epub.toc().unwrap();

    assert_eq!(TocKind::Ncx, toc.source().kind());
    assert_eq!("OEBPS/toc.ncx", toc.source().path());
    assert_eq!(Some("Example Book"), toc.title());
    assert_entries(&epub, NCX_ENTRIES);
}

#[test]
fn test_ncx_fallback() {
    // No navigation document; the preferred kind is unavailable
    let epub = TestEpub::Epub2Dir.open();
    let toc = epub.toc().unwrap();
    let levels: Vec<_> = toc.items().iter().map(|item| item.level()).collect();

    assert_eq!(TocKind::Ncx, toc.source().kind());
    assert_eq!(vec![0, 0], levels);
    assert_eq!(Some(1), epub.chapter_index("part2.html#start"));
}

#[test]
fn test_fragment_ids() {
    let epub = TestEpub::Epub3Dir.open();
    let index = epub.fragment_ids();

    assert_eq!(1, index.len());
    assert!(index.contains("OEBPS/text/chapter 2.xhtml", "s2"));
    assert!(index.contains("OEBPS/text/chapter%202.xhtml", "s2"));
    assert!(index.get("OEBPS/text/chapter1.xhtml").is_none());
}

#[test]
fn test_unresolvable_hrefs() {
    let epub = TestEpub::Epub3Dir.open();

    assert_eq!(None, epub.chapter_index(""));
    assert_eq!(None, epub.chapter_index("text/missing.xhtml"));
    assert_eq!(None, epub.chapter_index("https://example.com/text/chapter1.xhtml"));
    // Resolved against the TOC directory, not the chapter directory
    assert_eq!(None, epub.chapter_index("chapter1.xhtml"));
}

#[test]
fn test_resolve_to_chapter_index() {
    let paths = [String::from("OEBPS/a.xhtml"), String::from("OEBPS/a.xhtml")];

    // The first exact match wins
    assert_eq!(Some(0), resolve_to_chapter_index("a.xhtml#x", "OEBPS", &paths));
    assert_eq!(Some(0), resolve_to_chapter_index("../a.xhtml", "OEBPS/nav", &paths));
    assert_eq!(None, resolve_to_chapter_index("b.xhtml", "OEBPS", &paths));
}

#[test]
fn test_missing_toc() {
    let bytes = single_chapter_epub("<html><body><p>Only</p></body></html>");
    let epub = Epub::read(Cursor::new(bytes)).unwrap();

    // Still readable in spine order
    assert_eq!(Err(EpubError::MissingToc), epub.toc());
    assert_eq!(1, epub.chapter_paths().len());
    assert!(epub.fragment_ids().is_empty());
    assert_eq!(
        Some(&EpubError::MissingToc),
        epub.build_toc().unwrap_err().as_epub_error()
    );
}

#[test]
fn test_skip_toc() {
    let epub = TestEpub::Epub3Dir.build(|b| b.skip_toc(true));

    assert_eq!(Err(EpubError::MissingToc), epub.toc());
    assert!(epub.fragment_ids().is_empty());
    // Still available on demand
    assert_eq!(4, epub.build_toc().unwrap().len());
}
