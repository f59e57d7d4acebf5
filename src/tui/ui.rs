use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{
    Breadcrumb, ContentPane, FileTree, ImportPrompt, TabBar, TitleBar,
};
use crate::tui::{Focus, TuiState};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Screen regions for one frame.
pub struct ScreenLayout {
    pub title: Rect,
    pub tree: Rect,
    pub tabs: Rect,
    pub breadcrumb: Rect,
    pub content: Rect,
    pub help: Rect,
}

pub fn screen_layout(area: Rect, sidebar_width: u16) -> ScreenLayout {
    use Constraint::{Fill, Length, Min, Percentage};
    let [title, body, help] = Layout::vertical([Length(1), Min(0), Length(1)]).areas(area);
    let [tree, right] = Layout::horizontal([Percentage(sidebar_width), Fill(1)]).areas(body);
    let [tabs, breadcrumb, content] =
        Layout::vertical([Length(1), Length(1), Min(0)]).areas(right);
    ScreenLayout {
        title,
        tree,
        tabs,
        breadcrumb,
        content,
        help,
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    tui.sync(app);
    let areas = screen_layout(frame.area(), tui.sidebar_width);

    TitleBar::new(
        app.archive_name(),
        app.entry_count(),
        &app.status_message,
        app.notice.as_deref(),
    )
    .render(frame, areas.title);

    FileTree::new(
        &mut tui.file_tree,
        app.selected_file(),
        tui.focus == Focus::Tree,
    )
    .render(frame, areas.tree);

    TabBar::new(app.tabs.open_files(), app.tabs.selected_index()).render(frame, areas.tabs);
    Breadcrumb::new(app.selected_file()).render(frame, areas.breadcrumb);

    ContentPane::new(
        &mut tui.content,
        app.selected_file(),
        app.selected_content(),
        tui.focus == Focus::Content,
    )
    .render(frame, areas.content);

    frame.render_widget(help_line(tui), areas.help);

    if let Some(prompt) = &tui.import_prompt {
        ImportPrompt::new(prompt).render(frame, frame.area());
    }
}

fn help_line(tui: &TuiState) -> Line<'static> {
    let text = if tui.import_prompt.is_some() {
        " Enter import · Esc cancel"
    } else {
        match tui.focus {
            Focus::Tree => {
                " ↑↓ move · Enter/→ open · ← collapse · Tab content · [ ] tabs · x close · o import · q quit"
            }
            Focus::Content => {
                " ↑↓ PgUp/PgDn scroll · Tab tree · [ ] tabs · x close · o import · q quit"
            }
        }
    };
    Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))
}
