//! # Actions
//!
//! Everything that can happen in arcview becomes an `Action`.
//! User opens a file in the tree? That's `Action::SelectFile(path)`.
//! A decode finishes? That's `Action::ContentLoaded { .. }`.
//!
//! The `update()` function applies an action to the state and returns an
//! `Effect` describing any I/O the adapter should start. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Decode effects carry the archive generation they were issued under; a
//! result that comes back after another import is discarded.

use std::path::PathBuf;

use log::{debug, info, warn};

use crate::archive::{ArchiveError, ArchiveKind, LoadedArchive, extension_label};
use crate::core::state::App;
use crate::core::tree::{self, build_tree};

#[derive(Debug)]
pub enum Action {
    /// Open a file entry as a tab and select it.
    SelectFile(String),
    /// Close a tab.
    CloseFile(String),
    /// Close whichever tab is selected.
    CloseSelected,
    SelectNextTab,
    SelectPrevTab,
    /// User picked a file to import.
    ImportRequested(PathBuf),
    /// Import finished: archive read and listed.
    ArchiveLoaded(LoadedArchive),
    /// Import failed after the extension check.
    ImportFailed { file_name: String, error: ArchiveError },
    /// A decode request resolved.
    ContentLoaded {
        generation: u64,
        path: String,
        result: Result<String, ArchiveError>,
    },
    DismissNotice,
    Quit,
}

/// A pending decode, keyed by the generation it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeRequest {
    pub generation: u64,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// Read and list the archive at this path.
    LoadArchive(PathBuf),
    /// Decode one entry's text.
    Decode(DecodeRequest),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SelectFile(path) => select_file(app, path),
        Action::CloseFile(path) => {
            app.tabs.close(&path);
            debug!("Closed {} (selected: {:?})", path, app.tabs.selected());
            Effect::None
        }
        Action::CloseSelected => match app.tabs.selected().map(str::to_string) {
            Some(path) => update(app, Action::CloseFile(path)),
            None => Effect::None,
        },
        Action::SelectNextTab => {
            app.tabs.select_next();
            Effect::None
        }
        Action::SelectPrevTab => {
            app.tabs.select_prev();
            Effect::None
        }
        Action::ImportRequested(path) => {
            if ArchiveKind::from_path(&path).is_none() {
                let ext = extension_label(&path);
                warn!("Rejected import of {}: unsupported file type {}", path.display(), ext);
                app.notice = Some(format!("Unsupported file type: {ext} (expected .zip or .docx)"));
                return Effect::None;
            }
            app.is_importing = true;
            app.status_message = format!("Importing {}...", path.display());
            Effect::LoadArchive(path)
        }
        Action::ArchiveLoaded(archive) => {
            app.tree = build_tree(&archive.entries);
            app.tabs.reset();
            app.contents.clear();
            app.generation += 1;
            app.is_importing = false;
            app.notice = None;
            info!(
                "Archive {} loaded as generation {} ({} entries)",
                archive.name,
                app.generation,
                archive.entries.len()
            );
            app.archive = Some(archive);
            app.status_message = idle_status(app);
            Effect::None
        }
        Action::ImportFailed { file_name, error } => {
            warn!("Import of {} failed: {}", file_name, error);
            app.is_importing = false;
            app.status_message = idle_status(app);
            app.notice = Some(format!("Could not import {file_name}: {error}"));
            Effect::None
        }
        Action::ContentLoaded {
            generation,
            path,
            result,
        } => {
            if generation != app.generation {
                debug!(
                    "Discarding stale content for {} (generation {} != {})",
                    path, generation, app.generation
                );
                return Effect::None;
            }
            if let Err(e) = &result {
                warn!("Failed to decode {}: {}", path, e);
            }
            app.contents.resolve(&path, result);
            Effect::None
        }
        Action::DismissNotice => {
            app.notice = None;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// Status line when nothing is in flight.
fn idle_status(app: &App) -> String {
    match &app.archive {
        Some(archive) => format!("{} files in {}", tree::file_count(&app.tree), archive.name),
        None => String::from("Press o to import a .zip or .docx"),
    }
}

fn select_file(app: &mut App, path: String) -> Effect {
    match tree::find_node(&app.tree, &path) {
        Some(node) if !node.is_directory => {}
        Some(_) => {
            warn!("Ignoring select of directory {}", path);
            return Effect::None;
        }
        None => {
            warn!("Ignoring select of unknown path {}", path);
            return Effect::None;
        }
    }

    app.tabs.open(&path);
    if app.contents.begin(&path) {
        debug!("Cache miss for {}, requesting decode", path);
        Effect::Decode(DecodeRequest {
            generation: app.generation,
            path,
        })
    } else {
        Effect::None
    }
}
