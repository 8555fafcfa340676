use crate::ebook::archive::Archive;
use crate::ebook::archive::errors::{ArchiveError, ArchiveResult};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Reads every file beneath `root` as an entry named by its relative path.
pub(super) fn read_entries(root: &Path) -> ArchiveResult<Archive> {
    let root = match root.canonicalize() {
        Ok(dir) if dir.is_dir() => dir,
        Ok(_) => {
            return Err(unreadable(
                io::Error::from(io::ErrorKind::NotADirectory),
                root.to_path_buf(),
            ));
        }
        Err(source) => return Err(unreadable(source, root.to_path_buf())),
    };

    let mut archive = Archive::default();
    traverse(&mut archive, &root, &root)?;
    Ok(archive)
}

fn traverse(archive: &mut Archive, prefix: &Path, path: &Path) -> ArchiveResult<()> {
    let read_dir = path
        .read_dir()
        .map_err(|err| unreadable(err, path.to_path_buf()))?;

    for entry in read_dir {
        let entry = entry.map_err(|err| unreadable(err, path.to_path_buf()))?;
        let metadata = entry
            .metadata()
            .map_err(|err| unreadable(err, entry.path()))?;

        // Symlinks are not followed (to avoid path traversal outside `prefix`)
        if metadata.is_symlink() {
            continue;
        }

        let path = entry.path();
        if metadata.is_dir() {
            traverse(archive, prefix, &path)?;
        } else if let Ok(relative) = path.strip_prefix(prefix)
            // Only UTF8 paths are supported.
            && let Some(name) = relative.to_str()
        {
            let bytes = fs::read(&path).map_err(|source| ArchiveError::CannotRead {
                source,
                entry: name.to_owned(),
            })?;
            // `insert` enforces forward slashes
            archive.insert(name.to_owned(), bytes);
        }
    }
    Ok(())
}

fn unreadable(source: io::Error, path: PathBuf) -> ArchiveError {
    ArchiveError::UnreadableArchive {
        path: Some(path),
        source,
    }
}
