//! Save files using `MessagePack`.
//!
//! A save is a [`SaveFile`] header wrapping one [`BrickSet`]. The version
//! is checked before the bricks are decoded, so saves from a future format
//! fail with `UnsupportedFormat` rather than a decode error.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use brickfilter_foundation::{Error, Result};
use brickfilter_storage::BrickSet;
use serde::{Deserialize, Serialize};

/// Format version written by this build.
pub const SAVE_VERSION: u32 = 1;

/// On-disk save layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    /// Format version.
    pub version: u32,
    /// The saved bricks and their tables.
    pub bricks: BrickSet,
}

#[derive(Deserialize)]
struct SaveHeader {
    version: u32,
}

fn serialization_error(e: impl std::fmt::Display) -> Error {
    Error::SerializationError(e.to_string())
}

/// Serializes a brick set to bytes.
///
/// Uses named serialization to preserve struct field names.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes(set: &BrickSet) -> Result<Vec<u8>> {
    #[derive(Serialize)]
    struct SaveRef<'a> {
        version: u32,
        bricks: &'a BrickSet,
    }

    rmp_serde::to_vec_named(&SaveRef {
        version: SAVE_VERSION,
        bricks: set,
    })
    .map_err(serialization_error)
}

/// Deserializes a brick set from save bytes.
///
/// # Errors
///
/// Returns `UnsupportedFormat` for another save version, or a
/// serialization error if the bytes are not a save.
pub fn from_bytes(bytes: &[u8]) -> Result<BrickSet> {
    let header: SaveHeader = rmp_serde::from_slice(bytes).map_err(serialization_error)?;
    if header.version != SAVE_VERSION {
        return Err(Error::UnsupportedFormat {
            found: header.version,
            expected: SAVE_VERSION,
        });
    }
    let save: SaveFile = rmp_serde::from_slice(bytes).map_err(serialization_error)?;
    Ok(save.bricks)
}

/// Saves a brick set to a file.
///
/// Creates the file if it doesn't exist, or overwrites it if it does.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to,
/// or if serialization fails.
pub fn save_to_file<P: AsRef<Path>>(set: &BrickSet, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| {
        Error::IoError(format!("failed to create file '{}': {e}", path.display()))
    })?;

    let mut writer = BufWriter::new(file);
    let bytes = to_bytes(set)?;

    writer
        .write_all(&bytes)
        .and_then(|()| writer.flush())
        .map_err(|e| Error::IoError(format!("failed to write file '{}': {e}", path.display())))
}

/// Loads a brick set from a save file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or if deserialization fails.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<BrickSet> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| Error::IoError(format!("failed to open file '{}': {e}", path.display())))?;

    let mut bytes = Vec::new();
    BufReader::new(file)
        .read_to_end(&mut bytes)
        .map_err(|e| Error::IoError(format!("failed to read file '{}': {e}", path.display())))?;

    from_bytes(&bytes)
}
