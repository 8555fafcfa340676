use crate::ebook::archive::Archive;
use crate::ebook::archive::errors::{ArchiveError, ArchiveResult};
use std::io;
use std::io::{Read, Seek};
use std::path::Path;
use zip::ZipArchive as Zip;

/// Reads every file entry of the zip provided by `reader`
/// (and optional `path` for a more descriptive error message).
pub(super) fn read_entries<R: Read + Seek>(reader: R, path: Option<&Path>) -> ArchiveResult<Archive> {
    let unreadable = |error: zip::result::ZipError| ArchiveError::UnreadableArchive {
        source: io::Error::from(error),
        path: path.map(Path::to_path_buf),
    };
    let mut zip = Zip::new(reader).map_err(unreadable)?;
    let mut archive = Archive::default();

    for index in 0..zip.len() {
        let mut file = zip.by_index(index).map_err(unreadable)?;
        if file.is_dir() {
            continue;
        }

        let name = file.name().to_owned();
        let mut buf = Vec::with_capacity(file.size() as usize);

        file.read_to_end(&mut buf)
            .map_err(|source| ArchiveError::CannotRead {
                source,
                entry: name.clone(),
            })?;
        archive.insert(name, buf);
    }
    Ok(archive)
}
