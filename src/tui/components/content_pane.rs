//! # ContentPane Component
//!
//! Shows the selected entry's text, or one of the placeholders:
//!
//! | selection | cache entry   | shown                         |
//! |-----------|---------------|-------------------------------|
//! | none      | -             | "No file selected" hint       |
//! | some      | `Loading`     | "Loading…" for that path      |
//! | some      | `Text`        | wrapped text, scrollable      |
//! | some      | `Unreadable`  | "Content unreadable" + reason |
//!
//! Scrolling counts wrapped rows. The row layout of the shown text is cached
//! per path and width, and only the source lines in view are handed to the
//! `Paragraph`, so entries of any length scroll to the end. The offset resets
//! whenever a different path is shown.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Padding, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
};

use crate::core::content::Content;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Lines moved per mouse wheel notch.
const WHEEL_STEP: usize = 3;

/// Wrapped rows of one text at one width.
///
/// `rows[i]` is the first wrapped row of source line `i` and `bytes[i]` its
/// byte offset; `rows` carries one extra element, the total row count.
#[derive(Debug)]
struct WrapLayout {
    path: String,
    width: u16,
    text_len: usize,
    rows: Vec<usize>,
    bytes: Vec<usize>,
}

impl WrapLayout {
    fn build(path: &str, text: &str, width: u16) -> Self {
        let mut rows = vec![0];
        let mut bytes = Vec::new();
        let mut offset = 0;
        let mut row = 0;
        for chunk in text.split_inclusive('\n') {
            bytes.push(offset);
            offset += chunk.len();
            let line = match chunk.strip_suffix('\n') {
                Some(line) => line.strip_suffix('\r').unwrap_or(line),
                None => chunk,
            };
            row += Paragraph::new(line)
                .wrap(Wrap { trim: false })
                .line_count(width)
                .max(1);
            rows.push(row);
        }
        Self {
            path: path.to_string(),
            width,
            text_len: text.len(),
            rows,
            bytes,
        }
    }

    fn matches(&self, path: &str, text: &str, width: u16) -> bool {
        self.path == path && self.width == width && self.text_len == text.len()
    }

    fn total(&self) -> usize {
        self.rows.last().copied().unwrap_or(0)
    }

    /// Source line holding wrapped row `row`, and the row's offset inside it.
    fn locate(&self, row: usize) -> (usize, usize) {
        let line = self.rows.partition_point(|&r| r <= row).saturating_sub(1);
        (line, row - self.rows[line])
    }

    /// The slice of `text` covering `height` rows from `row`, plus the rows
    /// to skip at its top.
    fn window<'t>(&self, text: &'t str, row: usize, height: usize) -> (&'t str, usize) {
        let (first, skip) = self.locate(row);
        let Some(&start) = self.bytes.get(first) else {
            return ("", 0);
        };
        let last = self
            .rows
            .partition_point(|&r| r < row + height)
            .min(self.bytes.len());
        let end = self.bytes.get(last).copied().unwrap_or(text.len());
        (&text[start..end], skip)
    }
}

/// Scroll state for the content pane. Must be persisted in `TuiState`.
#[derive(Debug, Default)]
pub struct ContentPaneState {
    pub offset: usize,
    /// Wrapped line count of the last rendered text.
    pub total_lines: usize,
    pub viewport_height: usize,
    shown_path: Option<String>,
    layout: Option<WrapLayout>,
}

impl ContentPaneState {
    pub fn new() -> Self {
        Self::default()
    }

    fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.viewport_height)
    }

    fn scroll_up(&mut self, by: usize) {
        self.offset = self.offset.saturating_sub(by);
    }

    fn scroll_down(&mut self, by: usize) {
        self.offset = (self.offset + by).min(self.max_offset());
    }

    /// Reset the offset when the shown path changes.
    fn follow(&mut self, path: Option<&str>) {
        if self.shown_path.as_deref() != path {
            self.shown_path = path.map(str::to_string);
            self.offset = 0;
        }
    }

    /// Layout for `text`, rebuilt only when the path, text or width changes.
    fn layout_for(&mut self, path: &str, text: &str, width: u16) -> &WrapLayout {
        let stale = !self
            .layout
            .as_ref()
            .is_some_and(|layout| layout.matches(path, text, width));
        if stale {
            self.layout = None;
        }
        self.layout
            .get_or_insert_with(|| WrapLayout::build(path, text, width))
    }
}

impl EventHandler for ContentPaneState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        let page = self.viewport_height.max(1);
        match event {
            TuiEvent::CursorUp => self.scroll_up(1),
            TuiEvent::CursorDown => self.scroll_down(1),
            TuiEvent::ScrollUp => self.scroll_up(WHEEL_STEP),
            TuiEvent::ScrollDown => self.scroll_down(WHEEL_STEP),
            TuiEvent::ScrollPageUp => self.scroll_up(page),
            TuiEvent::ScrollPageDown => self.scroll_down(page),
            TuiEvent::Home => self.offset = 0,
            TuiEvent::End => self.offset = self.max_offset(),
            _ => {}
        }
        None
    }
}

pub struct ContentPane<'a> {
    state: &'a mut ContentPaneState,
    path: Option<&'a str>,
    content: Option<&'a Content>,
    focused: bool,
}

impl<'a> ContentPane<'a> {
    pub fn new(
        state: &'a mut ContentPaneState,
        path: Option<&'a str>,
        content: Option<&'a Content>,
        focused: bool,
    ) -> Self {
        Self {
            state,
            path,
            content,
            focused,
        }
    }

    fn render_placeholder(frame: &mut Frame, area: Rect, block: Block, lines: Vec<Line>) {
        let height = lines.len() as u16;
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let top = inner.y + inner.height.saturating_sub(height) / 2;
        let centered = Rect::new(inner.x, top, inner.width, height.min(inner.height));
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), centered);
    }
}

impl Component for ContentPane<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.follow(self.path);

        let border_color = if self.focused { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .padding(Padding::horizontal(1));

        let dim = Style::default().fg(Color::DarkGray);
        let (path, text) = match (self.path, self.content) {
            (None, _) => {
                let lines = vec![
                    Line::from(Span::styled("No file selected", Style::default().add_modifier(Modifier::BOLD))),
                    Line::from(Span::styled("Select a file from the tree to view its content", dim)),
                ];
                Self::render_placeholder(frame, area, block, lines);
                return;
            }
            (Some(path), None | Some(Content::Loading)) => {
                let lines = vec![Line::from(Span::styled(format!("Loading {path}…"), dim))];
                Self::render_placeholder(frame, area, block, lines);
                return;
            }
            (Some(_), Some(Content::Unreadable(reason))) => {
                let lines = vec![
                    Line::from(Span::styled(
                        "Content unreadable",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(reason.as_str(), dim)),
                ];
                Self::render_placeholder(frame, area, block, lines);
                return;
            }
            (Some(path), Some(Content::Text(text))) => (path, text.as_str()),
        };

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let height = inner.height as usize;
        let current_offset = self.state.offset;
        let layout = self.state.layout_for(path, text, inner.width);
        let total = layout.total();
        let offset = current_offset.min(total.saturating_sub(height));
        let (visible, skip) = layout.window(text, offset, height);

        self.state.total_lines = total;
        self.state.viewport_height = height;
        self.state.offset = offset;

        // Only the lines in view are wrapped; `skip` stays within one source line.
        let skip = u16::try_from(skip).unwrap_or(u16::MAX);
        let paragraph = Paragraph::new(visible)
            .wrap(Wrap { trim: false })
            .scroll((skip, 0));
        frame.render_widget(paragraph, inner);

        if self.state.max_offset() > 0 {
            let mut scrollbar_state = ScrollbarState::default()
                .content_length(self.state.max_offset())
                .position(self.state.offset);
            let scrollbar_area = Rect {
                x: area.x + area.width.saturating_sub(1),
                y: area.y + 1,
                width: 1,
                height: area.height.saturating_sub(2),
            };
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                scrollbar_area,
                &mut scrollbar_state,
            );
        }
    }
}
