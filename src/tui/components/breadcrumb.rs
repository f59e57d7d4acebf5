//! Breadcrumb for the selected path: `docs › guide › intro.md`, with the
//! file name emphasised.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

pub struct Breadcrumb<'a> {
    pub path: Option<&'a str>,
}

impl<'a> Breadcrumb<'a> {
    pub fn new(path: Option<&'a str>) -> Self {
        Self { path }
    }

    fn line(&self) -> Line<'a> {
        let Some(path) = self.path else {
            return Line::default();
        };
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let mut spans = Vec::with_capacity(parts.len() * 2 + 1);
        spans.push(Span::raw(" "));
        for (i, part) in parts.iter().enumerate() {
            if i + 1 == parts.len() {
                spans.push(Span::styled(
                    *part,
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ));
            } else {
                spans.push(Span::styled(*part, Style::default().fg(Color::Gray)));
                spans.push(Span::styled(" › ", Style::default().fg(Color::DarkGray)));
            }
        }
        Line::from(spans)
    }
}

impl Component for Breadcrumb<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(self.line(), area);
    }
}
