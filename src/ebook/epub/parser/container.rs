use crate::ebook::epub::consts;
use crate::ebook::epub::errors::EpubError;
use crate::ebook::epub::parser::EpubParser;
use crate::markup::Document;
use crate::parser::ParserResult;

impl EpubParser<'_> {
    /// Parses `META-INF/container.xml` and retrieves the package `.opf` file location.
    pub(super) fn parse_container(&self) -> ParserResult<String> {
        let text = self
            .archive
            .read_text(consts::CONTAINER)
            .ok_or(EpubError::MissingContainer)?;
        let document = Document::parse(&text)
            .map_err(|error| EpubError::MalformedContainer(error.to_string()))?;

        let mut fallback = None;

        for rootfile in document
            .descendants()
            .filter(|el| el.is_local_name(consts::ROOT_FILE))
        {
            let Some(full_path) = rootfile
                .attr(consts::FULL_PATH)
                .filter(|path| !path.trim().is_empty())
            else {
                continue;
            };

            // Although rare, multiple renditions could exist.
            // The first OEBPS package is the default one
            match rootfile.attr(consts::MEDIA_TYPE).map(str::trim) {
                None | Some(consts::OEBPS_PACKAGE_TYPE) => {
                    return Ok(Self::normalize_path(full_path));
                }
                Some(_) => {
                    fallback.get_or_insert(full_path);
                }
            }
        }

        fallback.map(Self::normalize_path).ok_or_else(|| {
            EpubError::MalformedContainer(String::from("no `rootfile` with a `full-path`")).into()
        })
    }
}
