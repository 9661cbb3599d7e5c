use crate::migration::{MigrationError, MigrationErrorKind};

use std::fs;
use std::io;
use std::path::Path;


/// List the entry names of a migration directory.
///
/// Only names are read; file contents are loaded when a migration is applied.
/// Fails with `DirectoryNotFound` when `directory` is missing or not a directory,
/// and with `DirectoryEmpty` when it holds no entries at all.
pub fn read_entries(directory: &Path) -> Result<Vec<String>, MigrationError> {
    let not_found = || MigrationError { kind: MigrationErrorKind::DirectoryNotFound(directory.to_path_buf()) };
    let read_error = |source: io::Error| MigrationError {
        kind: MigrationErrorKind::DirectoryRead { path: directory.to_path_buf(), source }
    };

    match fs::metadata(directory) {
        Ok(metadata) if metadata.is_dir() => {}
        Ok(_) => return Err(not_found()),
        Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => {
            return Err(not_found());
        }
        // The path may exist but cannot be inspected.
        Err(e) => return Err(read_error(e)),
    }

    let mut seen = 0usize;
    let mut names = Vec::new();
    for entry in fs::read_dir(directory).map_err(read_error)? {
        let entry = entry.map_err(read_error)?;
        seen += 1;

        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => tracing::warn!("Skipping non UTF-8 entry {name:?} in {directory:?}"),
        }
    }

    if seen == 0 {
        return Err(MigrationError { kind: MigrationErrorKind::DirectoryEmpty(directory.to_path_buf()) });
    }

    tracing::debug!("Found {} entries in {directory:?}", names.len());
    Ok(names)
}
