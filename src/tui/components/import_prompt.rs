//! # ImportPrompt Overlay
//!
//! Single-line path entry shown over the main view. Enter submits the
//! trimmed path, Esc dismisses. While open it receives every event.

use std::path::PathBuf;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

/// Persistent state for the import prompt (lives in `TuiState` while open).
#[derive(Debug, Default)]
pub struct ImportPromptState {
    pub input: String,
}

/// Events emitted by the import prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportEvent {
    Submit(PathBuf),
    Dismiss,
}

impl ImportPromptState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventHandler for ImportPromptState {
    type Event = ImportEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ImportEvent> {
        match event {
            TuiEvent::InputChar(c) => {
                self.input.push(*c);
                None
            }
            // Pasted paths often carry a trailing newline or shell quoting.
            TuiEvent::Paste(text) => {
                let cleaned = text.trim().trim_matches(|c| c == '\'' || c == '"');
                self.input.push_str(cleaned);
                None
            }
            TuiEvent::Backspace => {
                self.input.pop();
                None
            }
            TuiEvent::Submit => {
                let path = self.input.trim();
                if path.is_empty() {
                    None
                } else {
                    Some(ImportEvent::Submit(PathBuf::from(path)))
                }
            }
            TuiEvent::Escape => Some(ImportEvent::Dismiss),
            _ => None,
        }
    }
}

/// Transient render wrapper for the import prompt overlay.
pub struct ImportPrompt<'a> {
    state: &'a ImportPromptState,
}

impl<'a> ImportPrompt<'a> {
    pub fn new(state: &'a ImportPromptState) -> Self {
        Self { state }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 5, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Import archive (.zip, .docx) ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Import  Esc Cancel ").centered())
            .padding(Padding::horizontal(1));

        let inner = block.inner(overlay);
        let line = if self.state.input.is_empty() {
            Line::from(Span::styled(
                "Path to archive…",
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(self.state.input.as_str())
        };

        // Keep the end of a long path visible.
        let width = self.state.input.width() as u16;
        let scroll_x = width.saturating_sub(inner.width.saturating_sub(1));
        frame.render_widget(Paragraph::new(line).block(block).scroll((0, scroll_x)), overlay);

        if inner.height > 0 {
            let cursor_x = inner.x + width.min(inner.width.saturating_sub(1));
            frame.set_cursor_position((cursor_x, inner.y));
        }
    }
}

/// Rect of `percent_x` width and fixed `height`, centred in `outer`.
fn centered_rect(percent_x: u16, height: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
