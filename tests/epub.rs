/// EPUB integration tests
mod epub {
    mod errors;
    mod inline;
    mod manifest;
    mod markdown;
    mod metadata;
    mod toc;
    mod util;

    use folio::Epub;
    use folio::archive::Archive;
    use std::path::Path;
    use util::{EPUB3_DIR, TestEpub};

    #[test]
    fn test_comparison() {
        let epub_a = TestEpub::Epub3File.open();
        let epub_b = TestEpub::Epub3Dir.open();

        assert_eq!(epub_a, epub_b);
        assert_eq!(epub_a.chapter_paths(), epub_b.chapter_paths());
        assert_eq!(epub_a.toc().unwrap(), epub_b.toc().unwrap());
    }

    #[test]
    fn test_from_archive() {
        let archive = Archive::open(EPUB3_DIR).unwrap();
        let epub = Epub::from_archive(archive).unwrap();

        assert_eq!("OEBPS/package.opf", epub.package_path());
        assert_eq!("OEBPS", epub.package_dir());
    }

    #[test]
    fn test_read_resources() {
        let epub = TestEpub::Epub3File.open();
        let location = Path::new(EPUB3_DIR);

        for item in epub.manifest().items() {
            // Manifest paths are decoded archive entry names
            let actual_file = location.join(item.path());

            let content_a = std::fs::read(actual_file).unwrap();
            let content_b = epub.archive().read_bytes(item.path()).unwrap();

            assert_eq!(content_a, content_b);
        }
    }

    #[test]
    fn test_chapters() {
        let epub = TestEpub::Epub3Dir.open();
        let chapter = epub.chapter(1).unwrap();

        assert_eq!("OEBPS/text/chapter 2.xhtml", chapter.archive_path());
        assert_eq!("OEBPS/text", chapter.base_dir());
        assert!(chapter.document().is_some());

        // Sibling resources resolve against the chapter directory
        let css = chapter.rebase("../styles/main.css").unwrap();
        assert_eq!("OEBPS/styles/main.css", css.archive_path());

        assert!(epub.chapter(3).is_none());
    }
}
