// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. sync::SyncConfig)
    clippy::module_name_repetitions
)]

//! # Splitmark
//!
//! Headless core of a split-pane Markdown/LaTeX editor.
//!
//! Splitmark provides the two pieces of editor behavior that do not depend on
//! any UI toolkit:
//! - Toggleable markup: bold, headings, lists, templates and friends applied
//!   to a `(text, selection)` pair, returning the new text and selection
//! - Scroll sync: mapping the editor's scroll position to a preview offset
//!   using source-line anchors emitted by the renderer
//!
//! ## Modules
//!
//! - [`editor`]: Markup and indentation operations, toolbar actions, text buffer
//! - [`sync`]: Anchors, preview target computation, suppression guard
//! - [`compile`]: LaTeX compile service request/response codec
//! - [`config`]: Flag-file configuration
//! - [`error`]: Error type for parsing and decoding at the edges

pub mod compile;
pub mod config;
pub mod editor;
pub mod error;
pub mod sync;

pub use error::{Error, Result};

/// Re-exports for common usage.
pub mod prelude {
    pub use crate::editor::{
        Action, BlockKind, InsertKind, MarkupOp, Mode, MutationResult, Selection, TextBuffer,
    };
    pub use crate::sync::{
        Anchor, AnchorSet, EditorMetrics, ScrollGuard, ScrollSync, ScrollTarget, SyncConfig,
    };
}
