use ropey::Rope;

use super::markup::{self, InsertKind, MarkupOp, MutationResult, line_bounds};
use super::{Selection, indent};

/// A text buffer with a selection, backed by a rope.
///
/// This is the host side of the mutation engine: it owns the text for the
/// editing session, feeds its current selection to the pure operations in
/// [`markup`] and [`indent`], and applies the results.
pub struct TextBuffer {
    rope: Rope,
    selection: Selection,
    dirty: bool,
}

impl TextBuffer {
    /// Create a new buffer from a string with a caret at the start.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            selection: Selection::caret(0),
            dirty: false,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// The current selection.
    pub const fn selection(&self) -> Selection {
        self.selection
    }

    /// Set the selection, clamped to the buffer.
    pub fn select(&mut self, selection: Selection) {
        self.selection = selection.clamp(self.rope.len_chars());
    }

    /// Whether the buffer has been modified since creation or last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the buffer as clean (e.g., after saving).
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Length in characters.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Number of `\n`-delimited lines. An empty buffer has one line.
    pub fn line_count(&self) -> usize {
        self.rope.chars().filter(|&c| c == '\n').count() + 1
    }

    /// The 1-based line number holding character offset `offset`.
    pub fn line_number_at(&self, offset: usize) -> usize {
        let offset = offset.min(self.rope.len_chars());
        self.rope
            .slice(..offset)
            .chars()
            .filter(|&c| c == '\n')
            .count()
            + 1
    }

    /// Content of the line holding `offset`, without its line break.
    pub fn line_containing(&self, offset: usize) -> String {
        self.rope.slice(line_bounds(&self.rope, offset)).to_string()
    }

    /// The selected text.
    pub fn selected_text(&self) -> String {
        self.rope
            .slice(self.selection.start..self.selection.end)
            .to_string()
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Apply a mutation result produced against this buffer's text.
    pub fn apply(&mut self, result: MutationResult) {
        let text = Rope::from_str(&result.text);
        if text != self.rope {
            self.rope = text;
            self.dirty = true;
        }
        self.select(result.selection);
    }

    /// Run a markup operation against the current selection.
    ///
    /// Returns how the insertion should be mirrored by an undo-aware host.
    pub fn toggle(&mut self, op: &MarkupOp) -> InsertKind {
        let result = markup::apply(&self.text(), self.selection, op);
        let kind = result.insert_kind;
        self.apply(result);
        kind
    }

    /// Replace the selection with `s`, leaving the caret after it.
    pub fn replace_selection(&mut self, s: &str) {
        let len = markup::char_len(s);
        let result = markup::replace_and_select(&self.text(), self.selection, s, len..len);
        self.apply(result);
    }

    /// Indent the lines touched by the selection.
    pub fn indent(&mut self, unit: &str) {
        let result = indent::indent(&self.text(), self.selection, unit);
        self.apply(result);
    }

    /// Outdent the lines touched by the selection.
    pub fn outdent(&mut self, unit: &str) {
        let result = indent::outdent(&self.text(), self.selection, unit);
        self.apply(result);
    }

    /// Tab or Shift+Tab at the current selection.
    pub fn tab(&mut self, shift: bool, unit: &str) {
        let result = indent::tab_key(&self.text(), self.selection, shift, unit);
        self.apply(result);
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBuffer")
            .field("rope", &format_args!("Rope({} chars)", self.rope.len_chars()))
            .field("selection", &self.selection)
            .field("dirty", &self.dirty)
            .finish()
    }
}
