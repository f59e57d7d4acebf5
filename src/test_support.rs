//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::io::{Cursor, Write};
use std::sync::Arc;

use async_trait::async_trait;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::archive::{
    ArchiveBlob, ArchiveDecoder, ArchiveEntry, ArchiveError, ArchiveKind, LoadedArchive,
};

/// A decoder for tests that never touches real archives.
pub struct NoopDecoder;

#[async_trait]
impl ArchiveDecoder for NoopDecoder {
    fn name(&self) -> &str {
        "noop"
    }

    async fn list_entries(&self, _blob: ArchiveBlob) -> Result<Vec<ArchiveEntry>, ArchiveError> {
        Ok(Vec::new())
    }

    async fn read_text(&self, _blob: ArchiveBlob, path: &str) -> Result<String, ArchiveError> {
        Err(ArchiveError::NotFound(path.to_string()))
    }
}

/// Creates a test App with a NoopDecoder.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(NoopDecoder))
}

/// A loaded archive whose entries are the given file paths (no real bytes).
pub fn loaded_archive(name: &str, paths: &[&str]) -> LoadedArchive {
    LoadedArchive {
        name: name.to_string(),
        kind: ArchiveKind::Zip,
        blob: Arc::from(Vec::new()),
        entries: paths.iter().map(|p| ArchiveEntry::file(*p, 0)).collect(),
    }
}

/// Build an in-memory zip. `None` content adds a directory entry.
pub fn fixture_zip(files: &[(&str, Option<&str>)]) -> ArchiveBlob {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, content) in files {
        match content {
            Some(text) => {
                writer.start_file(*name, options).unwrap();
                writer.write_all(text.as_bytes()).unwrap();
            }
            None => writer.add_directory(*name, options).unwrap(),
        }
    }
    Arc::from(writer.finish().unwrap().into_inner())
}

/// Build an in-memory zip from raw byte contents.
pub fn fixture_zip_bytes(files: &[(&str, &[u8])]) -> ArchiveBlob {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, bytes) in files {
        writer.start_file(*name, options).unwrap();
        writer.write_all(bytes).unwrap();
    }
    Arc::from(writer.finish().unwrap().into_inner())
}
