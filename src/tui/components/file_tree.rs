//! # FileTree Component
//!
//! Collapsible sidebar view of the archive tree.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `FileTreeState` lives in `TuiState` (own copy of the tree, expanded
//!   directories, cursor)
//! - `FileTree` is created each frame with borrowed state and props
//!
//! Directories start collapsed. The visible rows are the tree flattened
//! depth-first through expanded directories only; they are recomputed
//! whenever the tree or the expansion set changes.

use std::collections::HashSet;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::core::tree::{self, TreeNode};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// One visible line of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    /// Slash-joined path from the root.
    pub path: String,
    pub name: String,
    pub depth: usize,
    pub is_directory: bool,
    pub expanded: bool,
}

/// Events emitted by the file tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEvent {
    /// A file row was activated.
    Open(String),
}

pub struct FileTreeState {
    nodes: Vec<TreeNode>,
    expanded: HashSet<String>,
    rows: Vec<TreeRow>,
    pub cursor: usize,
    pub list_state: ListState,
}

impl Default for FileTreeState {
    fn default() -> Self {
        Self::new()
    }
}

impl FileTreeState {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            expanded: HashSet::new(),
            rows: Vec::new(),
            cursor: 0,
            list_state: ListState::default(),
        }
    }

    /// Replace the tree (after an import). Collapses everything unless
    /// `expand_all` is set, and moves the cursor to the top.
    pub fn reset(&mut self, nodes: Vec<TreeNode>, expand_all: bool) {
        self.nodes = nodes;
        self.expanded.clear();
        if expand_all {
            collect_directories(&self.nodes, "", &mut self.expanded);
        }
        self.rows.clear();
        self.cursor = 0;
        self.refresh();
    }

    pub fn rows(&self) -> &[TreeRow] {
        &self.rows
    }

    pub fn current(&self) -> Option<&TreeRow> {
        self.rows.get(self.cursor)
    }

    fn refresh(&mut self) {
        let current_path = self.current().map(|row| row.path.clone());
        self.rows.clear();
        flatten(&self.nodes, "", 0, &self.expanded, &mut self.rows);

        // Keep the cursor on the same path when rows shift.
        if let Some(path) = current_path
            && let Some(index) = self.rows.iter().position(|row| row.path == path)
        {
            self.cursor = index;
        }
        self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));
        self.list_state
            .select(if self.rows.is_empty() { None } else { Some(self.cursor) });
    }

    fn move_to(&mut self, index: usize) {
        if self.rows.is_empty() {
            return;
        }
        self.cursor = index.min(self.rows.len() - 1);
        self.list_state.select(Some(self.cursor));
    }

    fn set_expanded(&mut self, path: &str, expanded: bool) {
        if expanded {
            self.expanded.insert(path.to_string());
        } else {
            self.expanded.remove(path);
        }
        self.refresh();
    }

    fn parent_index(&self, path: &str) -> Option<usize> {
        let (parent, _) = path.rsplit_once('/')?;
        self.rows.iter().position(|row| row.path == parent)
    }
}

impl EventHandler for FileTreeState {
    type Event = TreeEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<TreeEvent> {
        match event {
            TuiEvent::CursorUp => self.move_to(self.cursor.saturating_sub(1)),
            TuiEvent::CursorDown => self.move_to(self.cursor + 1),
            TuiEvent::Home => self.move_to(0),
            TuiEvent::End => self.move_to(self.rows.len().saturating_sub(1)),
            TuiEvent::ScrollPageUp => self.move_to(self.cursor.saturating_sub(10)),
            TuiEvent::ScrollPageDown => self.move_to(self.cursor + 10),
            TuiEvent::Submit | TuiEvent::CursorRight => {
                let row = self.current()?.clone();
                if !row.is_directory {
                    return Some(TreeEvent::Open(row.path));
                }
                // Enter toggles; Right only expands.
                let expand = matches!(event, TuiEvent::CursorRight) || !row.expanded;
                self.set_expanded(&row.path, expand);
            }
            TuiEvent::CursorLeft => {
                let row = self.current()?.clone();
                if row.is_directory && row.expanded {
                    self.set_expanded(&row.path, false);
                } else if let Some(parent) = self.parent_index(&row.path) {
                    self.move_to(parent);
                }
            }
            _ => {}
        }
        None
    }
}

fn flatten(
    nodes: &[TreeNode],
    parent: &str,
    depth: usize,
    expanded: &HashSet<String>,
    out: &mut Vec<TreeRow>,
) {
    for node in nodes {
        let path = tree::join_path(parent, &node.name);
        let is_expanded = node.is_directory && expanded.contains(&path);
        out.push(TreeRow {
            path: path.clone(),
            name: node.name.clone(),
            depth,
            is_directory: node.is_directory,
            expanded: is_expanded,
        });
        if is_expanded {
            flatten(&node.children, &path, depth + 1, expanded, out);
        }
    }
}

fn collect_directories(nodes: &[TreeNode], parent: &str, out: &mut HashSet<String>) {
    for node in nodes.iter().filter(|n| n.is_directory) {
        let path = tree::join_path(parent, &node.name);
        collect_directories(&node.children, &path, out);
        out.insert(path);
    }
}

/// Transient render wrapper for the file tree.
pub struct FileTree<'a> {
    state: &'a mut FileTreeState,
    /// Path of the selected tab, drawn bold.
    selected_file: Option<&'a str>,
    focused: bool,
}

impl<'a> FileTree<'a> {
    pub fn new(state: &'a mut FileTreeState, selected_file: Option<&'a str>, focused: bool) -> Self {
        Self {
            state,
            selected_file,
            focused,
        }
    }
}

impl Component for FileTree<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_color = if self.focused { Color::Cyan } else { Color::DarkGray };
        let file_total = tree::file_count(&self.state.nodes);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(" Archive Contents ")
            .title_bottom(Line::from(format!(" {file_total} files ")).right_aligned());

        if self.state.rows.is_empty() {
            let empty = Paragraph::new("No archive loaded.\nPress o to import.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self
            .state
            .rows
            .iter()
            .map(|row| {
                let indent = "  ".repeat(row.depth);
                let marker = match (row.is_directory, row.expanded) {
                    (true, true) => "▾ ",
                    (true, false) => "▸ ",
                    (false, _) => "  ",
                };
                let style = if row.is_directory {
                    Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
                } else if self.selected_file == Some(row.path.as_str()) {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let label = if row.is_directory {
                    format!("{}/", row.name)
                } else {
                    row.name.clone()
                };
                ListItem::new(Line::from(vec![
                    Span::raw(indent),
                    Span::raw(marker),
                    Span::styled(label, style),
                ]))
            })
            .collect();

        let highlight = if self.focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default().bg(Color::DarkGray)
        };
        let list = List::new(items).block(block).highlight_style(highlight);

        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}
