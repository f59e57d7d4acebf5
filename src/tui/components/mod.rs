//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Receive everything they draw as constructor arguments:
//! - `TitleBar`: archive name, entry count, status or notice
//! - `TabBar`: one tab per open file
//! - `Breadcrumb`: path segments of the selected file
//!
//! ### Stateful Components (Event-Driven)
//!
//! Persistent state lives in `TuiState`; a short-lived wrapper borrows it
//! for one frame. The state types implement `EventHandler`:
//! - `FileTreeState` / `FileTree`: collapsible archive tree
//! - `ContentPaneState` / `ContentPane`: scrollable text of the selected tab
//! - `ImportPromptState` / `ImportPrompt`: path entry overlay
//!
//! Each file keeps its state, events, rendering and tests together.
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── file_tree.rs
//! ├── tab_bar.rs
//! ├── breadcrumb.rs
//! ├── content_pane.rs
//! └── import_prompt.rs
//! ```

mod breadcrumb;
pub mod content_pane;
pub mod file_tree;
pub mod import_prompt;
mod tab_bar;
mod title_bar;

pub use breadcrumb::Breadcrumb;
pub use content_pane::{ContentPane, ContentPaneState};
pub use file_tree::{FileTree, FileTreeState, TreeEvent};
pub use import_prompt::{ImportEvent, ImportPrompt, ImportPromptState};
pub use tab_bar::TabBar;
pub use title_bar::TitleBar;
