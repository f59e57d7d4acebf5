//! # TitleBar Component
//!
//! Top line: the imported archive and its entry count, the status message,
//! and the current notice (an import or decode problem) in red.
//!
//! Stateless: every field is a prop copied from `App` each frame.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar<'a> {
    pub archive_name: Option<&'a str>,
    pub entry_count: usize,
    pub status_message: &'a str,
    pub notice: Option<&'a str>,
}

impl<'a> TitleBar<'a> {
    pub fn new(
        archive_name: Option<&'a str>,
        entry_count: usize,
        status_message: &'a str,
        notice: Option<&'a str>,
    ) -> Self {
        Self {
            archive_name,
            entry_count,
            status_message,
            notice,
        }
    }

    fn heading(&self) -> String {
        match self.archive_name {
            Some(name) => format!("arcview | {} ({} entries)", name, self.entry_count),
            None => "arcview".to_string(),
        }
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            self.heading(),
            Style::default().add_modifier(Modifier::BOLD),
        )];

        // The notice replaces the status message; it is the more urgent of the two.
        if let Some(notice) = self.notice {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                format!("{notice} (Esc to dismiss)"),
                Style::default().fg(Color::Red),
            ));
        } else if !self.status_message.is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                self.status_message,
                Style::default().fg(Color::DarkGray),
            ));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
