use crate::epub::util::TestEpub;
use folio::errors::EbookError;
use folio::inline::{BLOB_SCHEME, BlobStore, CancelFlag};
use std::sync::Arc;

#[test]
fn test_inline_chapter() {
    let epub = TestEpub::Epub3File.open();
    let store = Arc::new(BlobStore::new());
    let inlined = epub.inline_chapter(1, &store).unwrap();
    let html = inlined.html();

    // Stylesheet font, svg image and style-block background
    assert_eq!(3, inlined.handle_count());
    assert_eq!(3, store.len());
    assert!(inlined.handles().iter().all(|handle| handle.starts_with(BLOB_SCHEME)));

    let [font, cover, figure] = inlined.handles() else {
        panic!("unexpected handles: {:?}", inlined.handles());
    };
    let expected = [
        (font, "font/woff", "OEBPS/fonts/a.woff"),
        (cover, "image/png", "OEBPS/images/cover.png"),
        (figure, "image/png", "OEBPS/images/figure.png"),
    ];
    for (handle, media_type, path) in expected {
        let blob = store.get(handle).unwrap();
        assert_eq!(media_type, blob.media_type());
        assert_eq!(epub.archive().read_bytes(path).unwrap(), blob.bytes());
    }

    // The stylesheet link is replaced with its content
    assert!(!html.contains("main.css"));
    assert!(html.contains("<style>\n@font-face {"));
    assert!(html.contains(&format!("src: url(\"{font}\") format(\"woff\");")));
    assert!(html.contains(&format!("xlink:href=\"{cover}\"")));
    assert!(html.contains(&format!("h2 {{ background: url(\"{figure}\") }}")));

    // Unresolvable references stay as authored
    assert!(html.contains(r#"<img src="../images/missing.png" alt="Gone"/>"#));
    assert_eq!(["../images/missing.png"], inlined.missing_assets());
}

#[test]
fn test_release_handles() {
    let epub = TestEpub::Epub3Dir.open();
    let store = Arc::new(BlobStore::new());

    let first = epub.inline_chapter(0, &store).unwrap();
    let second = epub.inline_chapter(1, &store).unwrap();
    assert_eq!(4, store.len());

    let handle = first.handles()[0].clone();
    let html = first.release();
    assert!(html.contains(&format!("src=\"{handle}\"")));
    assert!(store.get(&handle).is_none());
    assert_eq!(3, store.len());

    // Dropping releases as well
    drop(second);
    assert!(store.is_empty());
}

#[test]
fn test_cancel_inlining() {
    let epub = TestEpub::Epub3Dir.open();
    let store = Arc::new(BlobStore::new());
    let cancel = CancelFlag::new();

    let inlined = epub.inline_chapter_with(1, &store, &cancel).unwrap();
    assert_eq!(3, inlined.handle_count());

    cancel.cancel();
    let result = epub.inline_chapter_with(1, &store, &cancel);

    assert!(matches!(result, Err(EbookError::Cancelled)));
    // Only the completed chapter's handles remain
    assert_eq!(3, store.len());
}

#[test]
fn test_shared_store() {
    let epub = TestEpub::Epub3Dir.open();
    let store = Arc::new(BlobStore::new());

    let a = epub.inline_chapter(0, &store).unwrap();
    let b = epub.inline_chapter(0, &store).unwrap();

    // Identical content still receives distinct handles
    assert_ne!(a.handles(), b.handles());
    assert_eq!(2, store.len());
}

#[test]
fn test_inline_out_of_range() {
    let epub = TestEpub::Epub2Dir.open();
    let store = Arc::new(BlobStore::new());

    assert!(matches!(
        epub.inline_chapter(2, &store),
        Err(EbookError::ChapterOutOfRange { index: 2, len: 2 })
    ));
    assert!(store.is_empty());
}
