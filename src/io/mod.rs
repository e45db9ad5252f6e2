//! Mesh loading and screw discovery.
//!
//! # Supported Formats
//!
//! | Format | Extension | Load | Save | Notes |
//! |--------|-----------|------|------|-------|
//! | STL | `.stl` | ✓ | ✓ | Binary and ASCII |
//! | PLY | `.ply` | ✓ | ✓ | Stanford polygon format |
//!
//! Screw inputs may also be a directory of meshes or a `.zip` archive of
//! meshes; see [`resolve_screws`].
//!
//! # Usage
//!
//! ```no_run
//! use screwbreach::io::{load, resolve_screws};
//!
//! let medial = load("medial.stl").unwrap();
//! for screw in resolve_screws("screws/").unwrap() {
//!     println!("{}: {} vertices", screw.name(), screw.load().unwrap().num_vertices());
//! }
//! ```

pub mod archive;
pub mod ply;
pub mod stl;

use std::io::Cursor;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{BreachError, Result};
use crate::mesh::SurfaceMesh;

pub use archive::ArchiveEntry;

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// STL (stereolithography) format.
    Stl,
    /// PLY (Stanford polygon) format.
    Ply,
}

impl Format {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_lowercase().as_str() {
            "stl" => Some(Format::Stl),
            "ply" => Some(Format::Ply),
            _ => None,
        }
    }

    /// Detect format from file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Format> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
    }
}

fn unsupported(path: &Path) -> BreachError {
    BreachError::UnsupportedFormat {
        path: path.to_path_buf(),
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    }
}

/// Load a mesh from a file with automatic format detection.
///
/// The format is determined by the file extension. A path that does not
/// exist is a [`BreachError::Load`] whatever its extension.
pub fn load<P: AsRef<Path>>(path: P) -> Result<SurfaceMesh> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(BreachError::load(path, "no such file"));
    }
    let format = Format::from_path(path).ok_or_else(|| unsupported(path))?;

    match format {
        Format::Stl => stl::load(path),
        Format::Ply => ply::load(path),
    }
}

/// Parse a mesh held in memory.
pub fn read_bytes(format: Format, bytes: Vec<u8>, origin: &Path) -> Result<SurfaceMesh> {
    let mut cursor = Cursor::new(bytes);
    match format {
        Format::Stl => stl::read(&mut cursor, origin),
        Format::Ply => ply::read(&mut cursor, origin),
    }
}

/// Save a mesh to a file with automatic format detection.
pub fn save<P: AsRef<Path>>(mesh: &SurfaceMesh, path: P) -> Result<()> {
    let path = path.as_ref();
    let format = Format::from_path(path).ok_or_else(|| unsupported(path))?;

    match format {
        Format::Stl => stl::save(mesh, path),
        Format::Ply => ply::save(mesh, path),
    }
}

/// List the mesh files directly inside `dir`.
///
/// Files are returned in the order the filesystem enumerates them, which is
/// not necessarily sorted. Subdirectories are not descended into.
pub fn list_mesh_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        if path.is_file() && Format::from_path(&path).is_some() {
            files.push(path);
        }
    }
    Ok(files)
}

/// One screw mesh to analyze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrewSource {
    /// A mesh file on disk.
    File(PathBuf),
    /// A mesh entry inside a ZIP archive.
    ArchiveEntry {
        /// Path of the archive.
        archive: PathBuf,
        /// The entry within it.
        entry: ArchiveEntry,
    },
}

impl ScrewSource {
    /// Screw identifier: the file or entry base name.
    pub fn name(&self) -> String {
        match self {
            ScrewSource::File(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            ScrewSource::ArchiveEntry { entry, .. } => entry.name.clone(),
        }
    }

    /// Path used to identify the source in messages.
    pub fn display_path(&self) -> PathBuf {
        match self {
            ScrewSource::File(path) => path.clone(),
            ScrewSource::ArchiveEntry { archive, entry } => archive::entry_path(archive, entry),
        }
    }

    /// Load the screw mesh.
    pub fn load(&self) -> Result<SurfaceMesh> {
        match self {
            ScrewSource::File(path) => load(path),
            ScrewSource::ArchiveEntry { archive, entry } => archive::load_entry(archive, entry),
        }
    }
}

/// Expand a screws path into individual screw sources.
///
/// - a directory yields each mesh file inside it, in enumeration order
/// - a `.zip` file yields each mesh entry, in archive order
/// - anything else is taken as a single screw file, whether or not it exists
///   yet; a bad path surfaces as a load error when the screw is loaded
pub fn resolve_screws<P: AsRef<Path>>(path: P) -> Result<Vec<ScrewSource>> {
    let path = path.as_ref();

    let sources: Vec<ScrewSource> = if path.is_dir() {
        list_mesh_files(path)?
            .into_iter()
            .map(ScrewSource::File)
            .collect()
    } else if archive::is_archive(path) {
        archive::list_entries(path)?
            .into_iter()
            .map(|entry| ScrewSource::ArchiveEntry {
                archive: path.to_path_buf(),
                entry,
            })
            .collect()
    } else {
        vec![ScrewSource::File(path.to_path_buf())]
    };

    debug!(path = %path.display(), screws = sources.len(), "Resolved screw sources");
    Ok(sources)
}
