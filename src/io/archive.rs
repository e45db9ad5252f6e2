//! ZIP archives of screw meshes.
//!
//! Screws are often exported together and shipped as one `.zip`. Entries are
//! read straight from the archive; nothing is extracted to disk. Directory
//! entries and files that are not a supported mesh format are skipped.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::debug;
use zip::ZipArchive;

use super::Format;
use crate::error::{BreachError, Result};
use crate::mesh::SurfaceMesh;

/// A mesh entry inside a ZIP archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Position of the entry in the archive's central directory.
    pub index: usize,
    /// Base name of the entry (directory components stripped).
    pub name: String,
    /// Mesh format, from the entry's extension.
    pub format: Format,
}

/// Whether `path` names a ZIP archive (by extension, case-insensitive).
pub fn is_archive<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}

fn open(path: &Path) -> Result<ZipArchive<BufReader<File>>> {
    let file = File::open(path).map_err(|e| archive_error(path, e))?;
    ZipArchive::new(BufReader::new(file)).map_err(|e| archive_error(path, e))
}

fn archive_error(path: &Path, message: impl std::fmt::Display) -> BreachError {
    BreachError::Archive {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

/// List the mesh entries of an archive in archive order.
pub fn list_entries<P: AsRef<Path>>(path: P) -> Result<Vec<ArchiveEntry>> {
    let path = path.as_ref();
    let mut archive = open(path)?;

    let mut entries = Vec::new();
    for index in 0..archive.len() {
        let file = archive.by_index(index).map_err(|e| archive_error(path, e))?;
        if file.is_dir() {
            continue;
        }
        let name = match Path::new(file.name()).file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };
        if let Some(format) = Format::from_path(&name) {
            entries.push(ArchiveEntry {
                index,
                name,
                format,
            });
        }
    }

    debug!(archive = %path.display(), entries = entries.len(), "Listed mesh entries");
    Ok(entries)
}

/// Display path for an archive entry, used in error messages.
pub fn entry_path(archive: &Path, entry: &ArchiveEntry) -> PathBuf {
    archive.join(&entry.name)
}

/// Load the mesh stored in one archive entry.
pub fn load_entry<P: AsRef<Path>>(path: P, entry: &ArchiveEntry) -> Result<SurfaceMesh> {
    let path = path.as_ref();
    let origin = entry_path(path, entry);
    let mut archive = open(path)?;

    let mut file = archive
        .by_index(entry.index)
        .map_err(|e| BreachError::load(&origin, e))?;
    let mut bytes = Vec::with_capacity(file.size() as usize);
    file.read_to_end(&mut bytes)
        .map_err(|e| BreachError::load(&origin, e))?;

    super::read_bytes(entry.format, bytes, &origin)
}
