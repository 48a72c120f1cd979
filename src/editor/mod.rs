//! Text mutation engine for the editor pane.
//!
//! Every operation here is a pure function of `(text, selection, operation)`
//! returning a [`MutationResult`]. [`TextBuffer`] is a rope-backed host model
//! that applies those results to a live editing session.

pub mod actions;
mod buffer;
pub mod indent;
pub mod markup;
mod selection;
pub mod snippets;

pub use actions::{Action, Mode};
pub use buffer::TextBuffer;
pub use markup::{BlockKind, InsertKind, MarkupOp, MutationResult};
pub use selection::Selection;
