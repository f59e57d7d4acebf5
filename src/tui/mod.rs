//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into `core::Action` values, and runs the
//! `Effect`s that `update()` returns as tokio tasks.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Background work
//!
//! Imports and decodes run on the tokio runtime. Each task sends exactly one
//! `Action` back over an `mpsc` channel; the loop drains the channel every
//! iteration and feeds the actions through `update()`. Decode results carry
//! the generation they were requested under, so a result for a replaced
//! archive is dropped by `update()` rather than here.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::path::PathBuf;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::archive::{self, ArchiveDecoder, ZipDecoder};
use crate::core::action::{Action, DecodeRequest, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    ContentPaneState, FileTreeState, ImportEvent, ImportPromptState, TreeEvent,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which pane receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Tree,
    Content,
}

impl Focus {
    fn toggle(self) -> Self {
        match self {
            Focus::Tree => Focus::Content,
            Focus::Content => Focus::Tree,
        }
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub file_tree: FileTreeState,
    pub content: ContentPaneState,
    pub focus: Focus,
    /// Import overlay (None = hidden)
    pub import_prompt: Option<ImportPromptState>,
    /// Archive generation the file tree was last built from.
    pub seen_generation: u64,
    pub sidebar_width: u16,
    pub expand_all: bool,
}

impl TuiState {
    pub fn new(sidebar_width: u16, expand_all: bool) -> Self {
        Self {
            file_tree: FileTreeState::new(),
            content: ContentPaneState::new(),
            focus: Focus::Tree,
            import_prompt: None,
            seen_generation: 0,
            sidebar_width,
            expand_all,
        }
    }

    /// Rebuild the tree view after an import.
    pub fn sync(&mut self, app: &App) {
        if self.seen_generation != app.generation {
            self.file_tree.reset(app.tree.clone(), self.expand_all);
            self.content = ContentPaneState::new();
            self.seen_generation = app.generation;
            self.focus = Focus::Tree;
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty protocol lets us tell key press from release; ignored where unsupported.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste
        );
    }
}

pub fn run(config: ResolvedConfig, initial: Option<PathBuf>) -> std::io::Result<()> {
    let decoder: Arc<dyn ArchiveDecoder> = Arc::new(ZipDecoder::new(config.max_text_bytes));
    info!("Using {} decoder", decoder.name());
    let mut app = App::new(decoder);
    let mut tui = TuiState::new(config.sidebar_width, config.expand_all);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    if let Some(path) = initial {
        dispatch(&mut app, Action::ImportRequested(path), &tx);
    }

    let mut needs_redraw = true;

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        // Short timeout while an import is in flight so its result shows promptly.
        let timeout = if app.is_importing {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(250)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(&mut app, &mut tui, event, &tx) {
                should_quit = true;
                break;
            }
        }
        if should_quit {
            break;
        }

        // Handle background task results
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if dispatch(&mut app, action, &tx) {
                should_quit = true;
            }
        }
        if should_quit {
            break;
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}

/// Route one terminal event. Returns true when the app should quit.
fn handle_event(app: &mut App, tui: &mut TuiState, event: TuiEvent, tx: &mpsc::Sender<Action>) -> bool {
    match event {
        TuiEvent::Resize => return false,
        TuiEvent::ForceQuit => return dispatch(app, Action::Quit, tx),
        _ => {}
    }

    // The import overlay swallows everything while open
    if let Some(prompt) = tui.import_prompt.as_mut() {
        match prompt.handle_event(&event) {
            Some(ImportEvent::Submit(path)) => {
                tui.import_prompt = None;
                return dispatch(app, Action::ImportRequested(path), tx);
            }
            Some(ImportEvent::Dismiss) => tui.import_prompt = None,
            None => {}
        }
        return false;
    }

    match event {
        TuiEvent::InputChar('q') => return dispatch(app, Action::Quit, tx),
        TuiEvent::OpenImport | TuiEvent::InputChar('o') => {
            tui.import_prompt = Some(ImportPromptState::new());
        }
        TuiEvent::Escape => {
            if app.notice.is_some() {
                return dispatch(app, Action::DismissNotice, tx);
            }
        }
        TuiEvent::FocusNext => tui.focus = tui.focus.toggle(),
        TuiEvent::InputChar('[') => return dispatch(app, Action::SelectPrevTab, tx),
        TuiEvent::InputChar(']') => return dispatch(app, Action::SelectNextTab, tx),
        TuiEvent::CloseTab | TuiEvent::InputChar('x') => {
            return dispatch(app, Action::CloseSelected, tx);
        }
        // Wheel and paging always scroll the content
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.content.handle_event(&event);
        }
        _ => match tui.focus {
            Focus::Tree => {
                if let Some(TreeEvent::Open(path)) = tui.file_tree.handle_event(&event) {
                    return dispatch(app, Action::SelectFile(path), tx);
                }
            }
            Focus::Content => {
                tui.content.handle_event(&event);
            }
        },
    }
    false
}

/// Apply an action and start whatever work its effect asks for.
/// Returns true when the app should quit.
fn dispatch(app: &mut App, action: Action, tx: &mpsc::Sender<Action>) -> bool {
    match update(app, action) {
        Effect::None => false,
        Effect::Quit => true,
        Effect::LoadArchive(path) => {
            spawn_import(app.decoder.clone(), path, tx.clone());
            false
        }
        Effect::Decode(request) => {
            spawn_decode(app, request, tx.clone());
            false
        }
    }
}

fn spawn_import(decoder: Arc<dyn ArchiveDecoder>, path: PathBuf, tx: mpsc::Sender<Action>) {
    info!("Spawning import of {}", path.display());
    tokio::spawn(async move {
        let action = match archive::import(decoder.as_ref(), &path).await {
            Ok(loaded) => Action::ArchiveLoaded(loaded),
            Err(error) => Action::ImportFailed {
                file_name: archive::file_name(&path),
                error,
            },
        };
        if tx.send(action).is_err() {
            warn!("Failed to send import result for {}: receiver dropped", path.display());
        }
    });
}

fn spawn_decode(app: &App, request: DecodeRequest, tx: mpsc::Sender<Action>) {
    let Some(loaded) = app.archive.as_ref() else {
        warn!("Decode requested for {} with no archive loaded", request.path);
        return;
    };
    let decoder = app.decoder.clone();
    let blob = loaded.blob.clone();
    debug!(
        "Spawning decode of {} (generation {})",
        request.path, request.generation
    );
    tokio::spawn(async move {
        let result = decoder.read_text(blob, &request.path).await;
        let action = Action::ContentLoaded {
            generation: request.generation,
            path: request.path,
            result,
        };
        if tx.send(action).is_err() {
            warn!("Failed to send decode result: receiver dropped");
        }
    });
}
