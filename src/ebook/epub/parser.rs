mod container;
mod package;
mod toc;

use crate::ebook::archive::Archive;
use crate::ebook::epub::EpubSettings;
use crate::ebook::epub::errors::EpubError;
use crate::ebook::epub::manifest::EpubManifest;
use crate::ebook::epub::metadata::EpubMetadata;
use crate::ebook::epub::spine::EpubSpine;
use crate::ebook::epub::toc::Toc;
use crate::ebook::errors::EbookResult;
use crate::markup::Document;
use crate::util::uri;

pub(super) struct ParsedContent {
    pub(super) package_path: String,
    pub(super) metadata: EpubMetadata,
    pub(super) manifest: EpubManifest,
    pub(super) spine: EpubSpine,
    /// [`None`] if skipped or unavailable.
    pub(super) toc: Option<Toc>,
}

pub(super) struct EpubParser<'a> {
    settings: &'a EpubSettings,
    archive: &'a Archive,
}

impl<'a> EpubParser<'a> {
    pub(super) fn new(settings: &'a EpubSettings, archive: &'a Archive) -> Self {
        Self { settings, archive }
    }

    pub(super) fn parse(&self) -> EbookResult<ParsedContent> {
        // Parse "META-INF/container.xml"
        let package_path = self.parse_container()?;

        // Parse "package.opf"
        let package_text = self
            .archive
            .read_text(&package_path)
            .ok_or_else(|| EpubError::MissingPackage(package_path.clone()))?;
        let package = Document::parse(&package_text)?;
        let (metadata, manifest, spine) = self.parse_package(&package, &package_path)?;

        // Parse "toc.xhtml/ncx"
        let toc = if self.settings.skip_toc {
            None
        } else {
            self.parse_toc(&manifest, &spine)
                .inspect_err(|error| match error.as_epub_error() {
                    Some(EpubError::MissingToc) => tracing::debug!("no table of contents available"),
                    _ => tracing::warn!(%error, "unable to build the table of contents"),
                })
                .ok()
        };

        tracing::debug!(
            package = %package_path,
            version = metadata.version_str(),
            manifest = manifest.len(),
            spine = spine.len(),
            toc = toc.as_ref().map(Toc::len),
            "parsed epub",
        );

        Ok(ParsedContent {
            package_path,
            metadata,
            manifest,
            spine,
            toc,
        })
    }

    /// Normalizes an archive-absolute path declared within a document.
    fn normalize_path(path: &str) -> String {
        uri::resolve("", uri::path(path.trim()).trim_start_matches('/'))
    }
}
