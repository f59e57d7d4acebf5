//! # Open Tabs
//!
//! The ordered set of open entries plus the single selected one.
//!
//! Invariants, held by every method:
//! - `open` never contains a path twice; insertion order is preserved.
//! - `selected` is `None` or an element of `open`.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenTabs {
    open: Vec<String>,
    selected: Option<String>,
}

impl OpenTabs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_files(&self) -> &[String] {
        &self.open
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Index of the selected tab within `open_files()`.
    pub fn selected_index(&self) -> Option<usize> {
        let selected = self.selected.as_deref()?;
        self.open.iter().position(|p| p == selected)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.open.iter().any(|p| p == path)
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Open `path` (appending it if new) and select it.
    pub fn open(&mut self, path: &str) {
        if !self.contains(path) {
            self.open.push(path.to_string());
        }
        self.selected = Some(path.to_string());
    }

    /// Close `path`. When it was selected, the tab before it takes over
    /// (or the new first tab if it was first). No-op if not open.
    pub fn close(&mut self, path: &str) {
        let Some(index) = self.open.iter().position(|p| p == path) else {
            return;
        };
        self.open.remove(index);

        if self.selected.as_deref() != Some(path) {
            return;
        }
        self.selected = if self.open.is_empty() {
            None
        } else {
            Some(self.open[index.saturating_sub(1)].clone())
        };
    }

    /// Select the tab after the current one, wrapping around.
    pub fn select_next(&mut self) {
        self.select_offset(1);
    }

    /// Select the tab before the current one, wrapping around.
    pub fn select_prev(&mut self) {
        self.select_offset(-1);
    }

    fn select_offset(&mut self, delta: isize) {
        if self.open.is_empty() {
            return;
        }
        let len = self.open.len() as isize;
        let next = match self.selected_index() {
            Some(current) => (current as isize + delta).rem_euclid(len),
            None => 0,
        };
        self.selected = Some(self.open[next as usize].clone());
    }

    pub fn reset(&mut self) {
        self.open.clear();
        self.selected = None;
    }
}
