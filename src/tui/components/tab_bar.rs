//! # TabBar Component
//!
//! One tab per open file, labelled with the file name (last path segment),
//! the selected tab highlighted. Hidden entirely when nothing is open.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Tabs;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::Component;

/// Longest tab label, in terminal columns.
const MAX_LABEL_WIDTH: usize = 24;

pub struct TabBar<'a> {
    pub open_files: &'a [String],
    pub selected: Option<usize>,
}

impl<'a> TabBar<'a> {
    pub fn new(open_files: &'a [String], selected: Option<usize>) -> Self {
        Self {
            open_files,
            selected,
        }
    }
}

/// File name shown on a tab: the last non-empty path segment.
pub fn tab_label(path: &str) -> &str {
    path.rsplit('/').find(|s| !s.is_empty()).unwrap_or(path)
}

/// Truncate to `max_width` display columns, ending in "…" when cut.
pub fn truncate_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

impl Component for TabBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.open_files.is_empty() {
            return;
        }

        let titles: Vec<String> = self
            .open_files
            .iter()
            .map(|path| truncate_width(tab_label(path), MAX_LABEL_WIDTH))
            .collect();

        let tabs = Tabs::new(titles)
            .select(self.selected)
            .style(Style::default().fg(Color::Gray))
            .highlight_style(
                Style::default()
                    .fg(Color::White)
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .divider("│");

        frame.render_widget(tabs, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_tab_label() {
        assert_eq!(tab_label("docs/a.txt"), "a.txt");
        assert_eq!(tab_label("readme.md"), "readme.md");
        assert_eq!(tab_label("dir/"), "dir");
    }

    #[test]
    fn test_truncate_width() {
        assert_eq!(truncate_width("short", 10), "short");
        assert_eq!(truncate_width("abcdefghij", 5), "abcd…");
        // Wide characters count as two columns.
        assert_eq!(truncate_width("文件文件文件", 5), "文件…");
    }

    #[test]
    fn test_render_tabs() {
        let open = vec!["readme.md".to_string(), "docs/a.txt".to_string()];
        let backend = TestBackend::new(60, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                TabBar::new(&open, Some(1)).render(f, f.area());
            })
            .unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("readme.md"));
        assert!(text.contains("a.txt"));
        assert!(!text.contains("docs/"));
    }

    #[test]
    fn test_render_nothing_when_empty() {
        let open: Vec<String> = Vec::new();
        let backend = TestBackend::new(20, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                TabBar::new(&open, None).render(f, f.area());
            })
            .unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert_eq!(text.trim(), "");
    }
}
