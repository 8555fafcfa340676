mod manifest;
mod metadata;
mod spine;

use crate::ebook::epub::consts;
use crate::ebook::epub::errors::EpubError;
use crate::ebook::epub::manifest::EpubManifest;
use crate::ebook::epub::metadata::EpubMetadata;
use crate::ebook::epub::parser::EpubParser;
use crate::ebook::epub::spine::EpubSpine;
use crate::markup::{Document, Element};
use crate::parser::ParserResult;
use crate::util::uri;

type ProcessedPackageData = (EpubMetadata, EpubManifest, EpubSpine);

impl EpubParser<'_> {
    /// Parses the epub `.opf` file and returns all
    /// necessary data required for further processing.
    pub(super) fn parse_package(
        &self,
        document: &Document,
        package_path: &str,
    ) -> ParserResult<ProcessedPackageData> {
        // A base to turn hrefs within the <package> from relative to absolute
        let package_dir = uri::base_dir(package_path);
        let package = document.find(consts::PACKAGE);

        // Assert existence
        let metadata = Self::require_section(document, consts::METADATA)?;
        let manifest = Self::require_section(document, consts::MANIFEST)?;
        let spine = Self::require_section(document, consts::SPINE)?;

        let mut metadata = Self::parse_metadata(package, metadata);
        let mut manifest = Self::parse_manifest(manifest, &package_dir);
        let spine = Self::parse_spine(spine, &manifest)?;

        // Post-process
        if manifest.cover_image().is_none() {
            Self::handle_epub2_cover_image(&mut metadata, &mut manifest);
        }

        Ok((metadata, manifest, spine))
    }

    fn require_section<'d>(document: &'d Document, section: &'static str) -> ParserResult<&'d Element> {
        document
            .find(section)
            .ok_or_else(|| EpubError::MalformedPackage(section).into())
    }

    /// If the `cover` meta exists, adds the `cover-image` property to the
    /// referenced manifest entry.
    fn handle_epub2_cover_image(metadata: &mut EpubMetadata, manifest: &mut EpubManifest) {
        if let Some(properties) = metadata
            .meta(consts::COVER)
            .map(|cover| cover.value().trim())
            .and_then(|cover_id| manifest.by_id_mut(cover_id))
            .map(|item| &mut item.properties)
        {
            properties.insert(String::from(consts::COVER_IMAGE));
        }
    }
}
