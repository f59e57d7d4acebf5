//! # Core Application Logic
//!
//! This module contains arcview's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • tree (entries → tree)│
//!                    │  • tabs + content cache │
//!                    │  • Action / update()    │
//!                    │                         │
//!                    │  No UI. Pure update().  │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │  runs LoadArchive / Decode
//!                         │  Adapter   │  on tokio, feeds results
//!                         │ (ratatui)  │  back as Actions
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`tree`]: `build_tree` — flat entry list to ordered `TreeNode`s
//! - [`tabs`]: `OpenTabs` — open files and the selected one
//! - [`content`]: `ContentCache` — decoded text per path
//! - [`state`]: The `App` struct — all application state in one place
//! - [`action`]: The `Action` enum and `update()`
//! - [`config`]: config file loading and override resolution

pub mod action;
pub mod config;
pub mod content;
pub mod state;
pub mod tabs;
pub mod tree;
