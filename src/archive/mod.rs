//! # Archive Access
//!
//! The archive-decoding collaborator. The core never touches bytes: it asks a
//! `ArchiveDecoder` for the entry list once per import and for one entry's
//! text per cache miss.
//!
//! ```text
//! path ──import()──► LoadedArchive { name, blob, entries }
//!                              │
//!              blob + path ────┴──read_text()──► String | ArchiveError
//! ```
//!
//! Only `.zip` and `.docx` files are accepted (`ArchiveKind::from_path`);
//! anything else is rejected before it reaches a decoder.

pub mod zip_decoder;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

pub use zip_decoder::ZipDecoder;

/// Raw archive bytes, shared between the event loop and decode tasks.
pub type ArchiveBlob = Arc<[u8]>;

/// One record inside an archive (a file or a directory).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Slash-delimited path as stored in the archive.
    pub path: String,
    /// Uncompressed size in bytes.
    pub size: u64,
    pub is_directory: bool,
}

impl ArchiveEntry {
    pub fn file(path: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
            is_directory: false,
        }
    }

    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            size: 0,
            is_directory: true,
        }
    }
}

/// Supported container formats, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    Zip,
    /// Word documents are zip packages.
    Docx,
}

impl ArchiveKind {
    /// Classify a file by its extension (case-insensitive).
    /// Returns `None` for anything that is not a supported archive.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "zip" => Some(ArchiveKind::Zip),
            "docx" => Some(ArchiveKind::Docx),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ArchiveKind::Zip => "zip",
            ArchiveKind::Docx => "docx",
        }
    }
}

/// Human-readable extension of a path for notices (`".pdf"`, or `"(none)"`).
pub fn extension_label(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_else(|| "(none)".to_string())
}

/// Errors from reading an archive or one of its entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveError {
    /// File extension is not `.zip` or `.docx`.
    Unsupported(String),
    /// Reading the archive file from disk failed.
    Io(String),
    /// The container could not be parsed or an entry could not be decompressed.
    Zip(String),
    /// No entry with the requested path exists.
    NotFound(String),
    /// The entry is not valid UTF-8 text.
    NotText(String),
    /// The entry exceeds the configured text size limit.
    TooLarge { path: String, size: u64, limit: u64 },
    /// The blocking decode task panicked or was cancelled.
    Task(String),
}

impl fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveError::Unsupported(ext) => write!(f, "unsupported file type: {ext}"),
            ArchiveError::Io(msg) => write!(f, "I/O error: {msg}"),
            ArchiveError::Zip(msg) => write!(f, "archive error: {msg}"),
            ArchiveError::NotFound(path) => write!(f, "entry not found: {path}"),
            ArchiveError::NotText(path) => write!(f, "not a text file: {path}"),
            ArchiveError::TooLarge { path, size, limit } => {
                write!(f, "{path} is {size} bytes (limit {limit})")
            }
            ArchiveError::Task(msg) => write!(f, "decode task failed: {msg}"),
        }
    }
}

impl std::error::Error for ArchiveError {}

/// An archive that has been read and listed successfully.
#[derive(Clone)]
pub struct LoadedArchive {
    /// File name shown in the title bar (no directories).
    pub name: String,
    pub kind: ArchiveKind,
    pub blob: ArchiveBlob,
    pub entries: Vec<ArchiveEntry>,
}

// Manual impl: the blob would flood the debug log.
impl fmt::Debug for LoadedArchive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedArchive")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("bytes", &self.blob.len())
            .field("entries", &self.entries.len())
            .finish()
    }
}

#[async_trait]
pub trait ArchiveDecoder: Send + Sync {
    /// Returns the name of the decoder.
    fn name(&self) -> &str;

    /// Lists every entry in the archive.
    async fn list_entries(&self, blob: ArchiveBlob) -> Result<Vec<ArchiveEntry>, ArchiveError>;

    /// Decodes a single entry as text.
    async fn read_text(&self, blob: ArchiveBlob, path: &str) -> Result<String, ArchiveError>;
}

/// Display name for an archive path: the final component, or the whole path.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read an archive file from disk and list its entries.
///
/// Rejects unsupported extensions before any I/O happens.
pub async fn import(decoder: &dyn ArchiveDecoder, path: &Path) -> Result<LoadedArchive, ArchiveError> {
    let kind = ArchiveKind::from_path(path)
        .ok_or_else(|| ArchiveError::Unsupported(extension_label(path)))?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ArchiveError::Io(format!("{}: {e}", path.display())))?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());

    let blob: ArchiveBlob = Arc::from(bytes);
    let entries = decoder.list_entries(blob.clone()).await?;

    let name = file_name(path);

    info!(
        "Imported {} ({} archive, {} entries) via {}",
        name,
        kind.label(),
        entries.len(),
        decoder.name()
    );

    Ok(LoadedArchive {
        name,
        kind,
        blob,
        entries,
    })
}
