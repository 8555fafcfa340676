//! Whitespace normalization applied to rendered Markdown.

use regex::Regex;
use std::sync::LazyLock;

static TRAILING_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)[ \t]+$").unwrap());

/// A line made up solely of image tokens, optionally led by preserved anchors.
static IMAGE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?m)^[ \t]*(?:<a id="[^"]*"></a>)*<epub-image\b[^>]*></epub-image>(?:[ \t]*<epub-image\b[^>]*></epub-image>)*$"#,
    )
    .unwrap()
});

static BLANK_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Produces the final Markdown:
/// - Trailing spaces are stripped from every line.
/// - Image-only lines are separated from neighbors by a blank line.
/// - Runs of blank lines collapse to a single blank line.
/// - Leading and trailing whitespace is trimmed.
pub(super) fn finalize(content: &str) -> String {
    let content = TRAILING_WHITESPACE.replace_all(content, "");
    let content = IMAGE_LINE.replace_all(&content, "\n\n${0}\n\n");
    let content = BLANK_RUNS.replace_all(&content, "\n\n");
    content.trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::finalize;

    #[test]
    fn test_trailing_whitespace() {
        assert_eq!("a\nb", finalize("a  \nb\t"));
    }

    #[test]
    fn test_blank_runs() {
        assert_eq!("a\n\nb\n\nc", finalize("\n\na\n\n\n\nb\n\n\nc\n\n"));
    }

    #[test]
    fn test_image_lines_isolated() {
        let image = r#"<epub-image href="a.png"></epub-image>"#;
        let input = format!("Before\n{image}\nAfter");

        assert_eq!(format!("Before\n\n{image}\n\nAfter"), finalize(&input));
    }

    #[test]
    fn test_inline_images_untouched() {
        let input = r#"Text <epub-image href="a.png"></epub-image> more"#;
        assert_eq!(input, finalize(input));
    }

    #[test]
    fn test_anchor_lines_stay_attached() {
        let input = "Intro\n\n<a id=\"s2\"></a>\n## Two";
        assert_eq!(input, finalize(input));

        let image = "<a id=\"f1\"></a><epub-image href=\"a.png\"></epub-image>";
        assert_eq!(
            format!("Intro\n\n{image}\n\nNext"),
            finalize(&format!("Intro\n{image}\nNext")),
        );
    }
}
