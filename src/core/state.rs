//! # Application State
//!
//! Core business state for arcview. Domain logic only, no TUI types.
//! Presentation state (focus, tree expansion, scroll) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── decoder: Arc<dyn ArchiveDecoder>  // archive collaborator
//! ├── archive: Option<LoadedArchive>    // current archive (name, bytes, entries)
//! ├── tree: Vec<TreeNode>               // built from archive entries
//! ├── tabs: OpenTabs                    // open files + selection
//! ├── contents: ContentCache            // decoded text per path
//! ├── generation: u64                   // bumped per successful import
//! ├── status_message: String            // status bar text
//! ├── notice: Option<String>            // non-fatal error shown to the user
//! └── is_importing: bool                // import task in flight
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::archive::{ArchiveDecoder, LoadedArchive};
use crate::core::content::{Content, ContentCache};
use crate::core::tabs::OpenTabs;
use crate::core::tree::TreeNode;

pub struct App {
    pub decoder: Arc<dyn ArchiveDecoder>,
    pub archive: Option<LoadedArchive>,
    pub tree: Vec<TreeNode>,
    pub tabs: OpenTabs,
    pub contents: ContentCache,
    /// Decode results from an older generation are dropped.
    pub generation: u64,
    pub status_message: String,
    pub notice: Option<String>,
    pub is_importing: bool,
}

impl App {
    pub fn new(decoder: Arc<dyn ArchiveDecoder>) -> Self {
        Self {
            decoder,
            archive: None,
            tree: Vec::new(),
            tabs: OpenTabs::new(),
            contents: ContentCache::new(),
            generation: 0,
            status_message: String::from("Press o to import a .zip or .docx"),
            notice: None,
            is_importing: false,
        }
    }

    pub fn archive_name(&self) -> Option<&str> {
        self.archive.as_ref().map(|a| a.name.as_str())
    }

    pub fn entry_count(&self) -> usize {
        self.archive.as_ref().map_or(0, |a| a.entries.len())
    }

    pub fn selected_file(&self) -> Option<&str> {
        self.tabs.selected()
    }

    /// Content for the selected file, if any file is selected.
    pub fn selected_content(&self) -> Option<&Content> {
        self.tabs.selected().and_then(|path| self.contents.get(path))
    }
}
