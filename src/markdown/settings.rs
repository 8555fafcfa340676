//! Conversion heuristics.
//!
//! Class names used by converters and retailers vary widely; these lists
//! are best-effort defaults rather than a complete catalogue.

/// Heuristics applied by [`MarkdownConverter`](super::MarkdownConverter).
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionSettings {
    /// Class substrings (case-insensitive) marking generic containers
    /// (`div`, `span`, `font`, `section`) that only carry converter styling.
    /// Such wrappers are dropped while their content is kept.
    ///
    /// Default: `calibre`, `filepos`, `kindle-cn`, `mbp_`, `x-ebookmaker`
    pub non_content_markers: Vec<String>,
    /// Class substrings (case-insensitive) marking a link as a footnote
    /// reference, in addition to `epub:type="noteref"`, `role="doc-noteref"`
    /// and local `#fragment` links.
    ///
    /// Default: `noteref`, `footnote`, `fnref`, `endnote`
    pub footnote_markers: Vec<String>,
    /// Class names marking a chapter title, probed after explicit title
    /// roles and `h1`/`h2` headings.
    ///
    /// Default: `chapter-title`, `chaptertitle`, `title`, `ct`
    pub title_classes: Vec<String>,
    /// Class names marking an explicit page break, rendered as a
    /// horizontal rule. `<mbp:pagebreak>` is always recognized.
    ///
    /// Default: `page-break`, `pagebreak`
    pub page_break_classes: Vec<String>,
}

impl ConversionSettings {
    /// Returns a builder to create a [`ConversionSettings`] instance.
    pub fn builder() -> ConversionSettingsBuilder {
        ConversionSettingsBuilder(Self::default())
    }
}

impl Default for ConversionSettings {
    fn default() -> Self {
        fn owned(values: &[&str]) -> Vec<String> {
            values.iter().map(|&value| value.to_owned()).collect()
        }

        Self {
            non_content_markers: owned(&["calibre", "filepos", "kindle-cn", "mbp_", "x-ebookmaker"]),
            footnote_markers: owned(&["noteref", "footnote", "fnref", "endnote"]),
            title_classes: owned(&["chapter-title", "chaptertitle", "title", "ct"]),
            page_break_classes: owned(&["page-break", "pagebreak"]),
        }
    }
}

impl From<ConversionSettingsBuilder> for ConversionSettings {
    fn from(value: ConversionSettingsBuilder) -> Self {
        value.build()
    }
}

/// Builder to construct a [`ConversionSettings`] instance.
///
/// # Examples
/// ```
/// # use folio::markdown::ConversionSettings;
/// let settings = ConversionSettings::builder()
///     .non_content_marker("sigil")
///     .title_classes(["heading"])
///     .build();
///
/// assert!(settings.non_content_markers.iter().any(|marker| marker == "sigil"));
/// assert_eq!(vec!["heading"], settings.title_classes);
/// ```
#[derive(Clone, Debug)]
pub struct ConversionSettingsBuilder(ConversionSettings);

impl ConversionSettingsBuilder {
    /// Turn this builder into a [`ConversionSettings`] instance.
    pub fn build(self) -> ConversionSettings {
        self.0
    }

    /// Adds to [`ConversionSettings::non_content_markers`].
    pub fn non_content_marker(mut self, marker: impl Into<String>) -> Self {
        self.0.non_content_markers.push(marker.into());
        self
    }

    /// Replaces [`ConversionSettings::non_content_markers`].
    pub fn non_content_markers<S: Into<String>>(mut self, markers: impl IntoIterator<Item = S>) -> Self {
        self.0.non_content_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces [`ConversionSettings::footnote_markers`].
    pub fn footnote_markers<S: Into<String>>(mut self, markers: impl IntoIterator<Item = S>) -> Self {
        self.0.footnote_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces [`ConversionSettings::title_classes`].
    pub fn title_classes<S: Into<String>>(mut self, classes: impl IntoIterator<Item = S>) -> Self {
        self.0.title_classes = classes.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces [`ConversionSettings::page_break_classes`].
    pub fn page_break_classes<S: Into<String>>(mut self, classes: impl IntoIterator<Item = S>) -> Self {
        self.0.page_break_classes = classes.into_iter().map(Into::into).collect();
        self
    }
}
