use ratatui::Frame;
use ratatui::layout::Rect;

use super::event::TuiEvent;

/// A piece of the screen: tree, tab strip, breadcrumb, content pane.
///
/// Props arrive as struct fields; persistent state, if any, is borrowed
/// mutably so render can update caches such as list offsets or the
/// measured content height.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that turns raw `TuiEvent`s into its own higher-level events.
pub trait EventHandler {
    /// What the component asks its parent to do.
    type Event;

    /// Returns `None` when the event was consumed locally (or ignored).
    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
