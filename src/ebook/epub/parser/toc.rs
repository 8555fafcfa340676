mod ncx;
mod xhtml;

use crate::ebook::epub::errors::EpubError;
use crate::ebook::epub::manifest::EpubManifest;
use crate::ebook::epub::parser::EpubParser;
use crate::ebook::epub::spine::EpubSpine;
use crate::ebook::epub::toc::{Toc, TocSource};
use crate::ebook::errors::EbookResult;
use crate::markup::Document;
use crate::util::uri;

impl EpubParser<'_> {
    // `EbookResult` is preferred here over `ParserResult`
    // due to the use of reading from an archive.
    pub(in crate::ebook::epub) fn parse_toc(
        &self,
        manifest: &EpubManifest,
        spine: &EpubSpine,
    ) -> EbookResult<Toc> {
        let source = TocSource::select(manifest, spine, self.settings.preferred_toc)
            .ok_or(EpubError::MissingToc)?;

        tracing::debug!(path = source.path(), kind = ?source.kind(), "selected toc source");

        let Some(text) = self.archive.read_text(source.path()) else {
            tracing::warn!(path = source.path(), "toc document declared but not found");
            return Err(EpubError::MissingToc.into());
        };
        let document = Document::parse(&text)?;

        let (title, items) = match &source {
            TocSource::Nav(_) => Self::parse_nav(&document)?,
            TocSource::Ncx(_) => Self::parse_ncx(&document),
        };

        Ok(Toc {
            base_dir: uri::base_dir(source.path()),
            source,
            title,
            items,
        })
    }
}
