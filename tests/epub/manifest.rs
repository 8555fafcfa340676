use crate::epub::util::TestEpub;
use folio::epub::spine::PageDirection;

#[test]
fn test_manifest() {
    let epub = TestEpub::Epub3File.open();
    let manifest = epub.manifest();

    assert_eq!(9, manifest.len());

    let ids: Vec<_> = manifest.items().iter().map(|item| item.id()).collect();
    assert_eq!(
        vec!["nav", "ncx", "c1", "c2", "notes", "css", "font", "cover", "figure"],
        ids
    );

    // The authored href is kept; the path is absolute and decoded
    let chapter = manifest.by_id("c2").unwrap();
    assert_eq!("text/chapter%202.xhtml", chapter.href());
    assert_eq!("OEBPS/text/chapter 2.xhtml", chapter.path());
    assert_eq!("application/xhtml+xml", chapter.media_type());
    assert!(chapter.has_property("svg"));
    assert_eq!(chapter, manifest.by_path("OEBPS/text/chapter%202.xhtml").unwrap());

    assert!(manifest.nav().unwrap().is_nav());
    assert_eq!("ncx", manifest.ncx().unwrap().id());
    assert_eq!("OEBPS/images/cover.png", manifest.cover_image().unwrap().path());
    assert!(manifest.by_id("none").is_none());
}

#[test]
fn test_epub2_cover() {
    let epub = TestEpub::Epub2Dir.open();
    let cover = epub.manifest().cover_image().unwrap();

    assert_eq!("cover-img", cover.id());
    assert_eq!("content/cover.jpg", cover.path());
    assert!(cover.is_cover_image());
    assert!(epub.manifest().nav().is_none());
}

#[test]
fn test_spine() {
    let epub = TestEpub::Epub3Dir.open();
    let spine = epub.spine();

    assert_eq!(3, spine.len());
    assert_eq!(PageDirection::LeftToRight, spine.page_direction());
    assert_eq!(Some("ncx"), spine.toc_idref());

    let linear: Vec<_> = spine.items().iter().map(|item| (item.idref(), item.is_linear())).collect();
    assert_eq!(vec![("c1", true), ("c2", true), ("notes", false)], linear);

    assert_eq!(
        [
            "OEBPS/text/chapter1.xhtml",
            "OEBPS/text/chapter 2.xhtml",
            "OEBPS/text/notes.xhtml",
        ],
        epub.chapter_paths(),
    );
}

#[test]
fn test_epub2_spine() {
    let epub = TestEpub::Epub2Dir.open();

    assert_eq!(PageDirection::Default, epub.spine().page_direction());
    assert_eq!(["content/part1.html", "content/part2.html"], epub.chapter_paths());
}
