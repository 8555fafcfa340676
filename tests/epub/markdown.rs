use crate::epub::util::{TestEpub, single_chapter_epub};
use folio::Epub;
use folio::errors::EbookError;
use folio::markdown::ConversionSettings;
use std::io::Cursor;

#[test]
fn test_chapter_conversion() {
    let epub = TestEpub::Epub3File.open();
    let result = epub.to_markdown(0).unwrap();

    assert_eq!(
        "# Chapter One\n\n\
         It was a *bright* cold day in April\u{2014}and the clocks were striking thirteen.\
         <epub-footnote href=\"notes.xhtml#n1\" id=\"ref1\">1</epub-footnote>\n\n\
         <epub-image href=\"../images/figure.png\" alt=\"A figure\" width=\"320\" height=\"200\"></epub-image>\n\n\
         See the [website](https://example.com/) for more.",
        result.content()
    );
    assert_eq!(Some("Chapter One"), result.title());

    let image = &result.images()[0];
    assert_eq!(1, result.images().len());
    assert_eq!("../images/figure.png", image.href());
    assert_eq!(Some("A figure"), image.alt());
    assert_eq!(None, image.title());
    assert_eq!((Some("320"), Some("200")), (image.width(), image.height()));

    let footnote = &result.footnotes()[0];
    assert_eq!(1, result.footnotes().len());
    assert_eq!("notes.xhtml#n1", footnote.href());
    assert_eq!(Some("ref1"), footnote.id());
    assert_eq!("1", footnote.label());
}

#[test]
fn test_preserved_anchor() {
    let epub = TestEpub::Epub3Dir.open();
    let result = epub.to_markdown(1).unwrap();
    let content = result.content();

    // `s2` is a TOC target; `top` and `unlinked` are not
    assert!(content.contains("Opening paragraph.\n\n<a id=\"s2\"></a>\n## Section Two\n\n"));
    assert!(!content.contains("id=\"top\""));
    assert!(!content.contains("id=\"unlinked\""));
    assert_eq!(Some("Chapter Two"), result.title());
}

#[test]
fn test_side_list_order() {
    let epub = TestEpub::Epub3Dir.open();
    let result = epub.to_markdown(1).unwrap();

    let hrefs: Vec<_> = result.images().iter().map(|image| image.href()).collect();
    assert_eq!(vec!["../images/cover.png", "../images/missing.png"], hrefs);

    let footnotes: Vec<_> = result.footnotes().iter().map(|note| note.href()).collect();
    assert_eq!(vec!["#n2"], footnotes);

    // Image-only lines stand apart from prose
    assert!(result.content().contains(
        "<epub-footnote href=\"#n2\">2</epub-footnote>.\n\n\
         <epub-image href=\"../images/cover.png\" width=\"100\" height=\"100\"></epub-image> \
         <epub-image href=\"../images/missing.png\" alt=\"Gone\"></epub-image>\n\n\
         A local note."
    ));
}

#[test]
fn test_conversion_is_deterministic() {
    let epub = TestEpub::Epub3Dir.open();

    for index in 0..epub.chapter_paths().len() {
        let first = epub.to_markdown(index).unwrap();
        let second = epub.to_markdown(index).unwrap();

        assert_eq!(first.content().as_bytes(), second.content().as_bytes());
        assert_eq!(first.images(), second.images());
        assert_eq!(first.footnotes(), second.footnotes());
        assert_eq!(first, second);
    }
}

#[test]
fn test_epub2_cleanup() {
    let epub = TestEpub::Epub2Dir.open();
    let result = epub.to_markdown(0).unwrap();

    // Converter wrappers are unwrapped and `mbp:pagebreak` becomes a rule
    assert_eq!(
        "Part One\n\nOnce upon a time.\n\n---\n\nThe end of part one.",
        result.content()
    );
    // Found through its title class
    assert_eq!(Some("Part One"), result.title());
    assert!(result.images().is_empty());
}

#[test]
fn test_custom_settings() {
    let bytes = single_chapter_epub(
        r#"<html><body><div class="vendor-wrap"><p>Kept</p></div><p class="ruler"/><p>After</p></body></html>"#,
    );
    let epub = Epub::read(Cursor::new(bytes)).unwrap();
    let settings = ConversionSettings::builder()
        .non_content_marker("vendor-")
        .page_break_classes(["ruler"])
        .build();

    let result = epub.to_markdown_with(0, &settings).unwrap();

    assert_eq!("Kept\n\n---\n\nAfter", result.content());
    assert_eq!(None, result.title());
}

#[test]
fn test_chapter_out_of_range() {
    let epub = TestEpub::Epub3Dir.open();
    let error = epub.to_markdown(3).unwrap_err();

    assert!(matches!(error, EbookError::ChapterOutOfRange { index: 3, len: 3 }));
}

#[test]
fn test_unparsable_chapter() {
    let bytes = single_chapter_epub("<html><body><p>Text</p><!-- never closed");
    let epub = Epub::read(Cursor::new(bytes)).unwrap();

    assert!(matches!(epub.to_markdown(0), Err(EbookError::Format(_))));
}
