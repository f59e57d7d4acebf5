//! Zip-crate implementation of `ArchiveDecoder`.
//!
//! Both operations re-open the archive from the shared blob inside
//! `spawn_blocking`, so decompression never runs on the event loop and
//! concurrent requests don't share a reader.

use std::io::{Cursor, Read};

use async_trait::async_trait;
use log::{debug, warn};
use zip::ZipArchive;
use zip::result::ZipError;

use super::{ArchiveBlob, ArchiveDecoder, ArchiveEntry, ArchiveError};

/// Default upper bound for a single text entry (4 MiB).
pub const DEFAULT_MAX_TEXT_BYTES: u64 = 4 * 1024 * 1024;

pub struct ZipDecoder {
    max_text_bytes: u64,
}

impl ZipDecoder {
    pub fn new(max_text_bytes: u64) -> Self {
        Self { max_text_bytes }
    }
}

impl Default for ZipDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TEXT_BYTES)
    }
}

#[async_trait]
impl ArchiveDecoder for ZipDecoder {
    fn name(&self) -> &str {
        "zip"
    }

    async fn list_entries(&self, blob: ArchiveBlob) -> Result<Vec<ArchiveEntry>, ArchiveError> {
        tokio::task::spawn_blocking(move || list_blocking(&blob))
            .await
            .map_err(|e| ArchiveError::Task(e.to_string()))?
    }

    async fn read_text(&self, blob: ArchiveBlob, path: &str) -> Result<String, ArchiveError> {
        let path = path.to_string();
        let limit = self.max_text_bytes;
        tokio::task::spawn_blocking(move || read_text_blocking(&blob, &path, limit))
            .await
            .map_err(|e| ArchiveError::Task(e.to_string()))?
    }
}

fn zip_error(e: ZipError) -> ArchiveError {
    ArchiveError::Zip(e.to_string())
}

/// Collapse empty segments so `"/a//b"` and `"a/b"` compare equal.
fn normalize(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

fn list_blocking(blob: &[u8]) -> Result<Vec<ArchiveEntry>, ArchiveError> {
    let mut archive = ZipArchive::new(Cursor::new(blob)).map_err(zip_error)?;
    let mut entries = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        let file = archive.by_index(i).map_err(zip_error)?;
        entries.push(ArchiveEntry {
            path: file.name().to_string(),
            size: file.size(),
            is_directory: file.is_dir(),
        });
    }

    debug!("Listed {} zip entries", entries.len());
    Ok(entries)
}

/// Locate an entry by exact name, falling back to a slash-normalized match.
fn find_index(archive: &mut ZipArchive<Cursor<&[u8]>>, path: &str) -> Result<Option<usize>, ArchiveError> {
    let wanted = normalize(path);
    let mut fallback = None;
    for i in 0..archive.len() {
        let file = archive.by_index(i).map_err(zip_error)?;
        if file.name() == path {
            return Ok(Some(i));
        }
        if fallback.is_none() && !file.is_dir() && normalize(file.name()) == wanted {
            fallback = Some(i);
        }
    }
    Ok(fallback)
}

fn read_text_blocking(blob: &[u8], path: &str, limit: u64) -> Result<String, ArchiveError> {
    let mut archive = ZipArchive::new(Cursor::new(blob)).map_err(zip_error)?;
    let index = find_index(&mut archive, path)?
        .ok_or_else(|| ArchiveError::NotFound(path.to_string()))?;

    let file = archive.by_index(index).map_err(zip_error)?;
    if file.is_dir() {
        return Err(ArchiveError::NotFound(path.to_string()));
    }
    if file.size() > limit {
        return Err(ArchiveError::TooLarge {
            path: path.to_string(),
            size: file.size(),
            limit,
        });
    }

    // The header size can lie; never read past the limit.
    let mut bytes = Vec::with_capacity(file.size() as usize);
    file.take(limit + 1)
        .read_to_end(&mut bytes)
        .map_err(|e| ArchiveError::Zip(e.to_string()))?;
    if bytes.len() as u64 > limit {
        return Err(ArchiveError::TooLarge {
            path: path.to_string(),
            size: bytes.len() as u64,
            limit,
        });
    }

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text.trim_start_matches('\u{feff}').to_string()),
        Err(_) => {
            warn!("Entry is not UTF-8 text: {}", path);
            Err(ArchiveError::NotText(path.to_string()))
        }
    }
}
