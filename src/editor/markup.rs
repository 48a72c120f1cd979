//! Toggleable Markdown/LaTeX markup over a selection.
//!
//! Three kinds of operation are supported:
//! - [`MarkupOp::Wrap`]: symmetric inline delimiters (`**bold**`, `` `code` ``)
//! - [`MarkupOp::BlockPrefix`]: line-leading markers (`## `, `> `, `* [ ] `)
//! - [`MarkupOp::Template`]: arbitrary `before`/`after` text around a placeholder
//!
//! Wrap and block prefix have toggle semantics: applying the same operation a
//! second time to the resulting selection restores the original text.
//!
//! All offsets are character offsets.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use ropey::Rope;
use serde::Serialize;

use super::Selection;

/// Recognized block prefixes, tried in order. Task markers must precede the
/// plain list markers they extend.
static BLOCK_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:#+ |[*+-] \[[ xX]\] |[*+-] |\d+\. |> )").expect("block prefix pattern")
});

/// Kind of line-leading markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    Heading,
    List,
    Quote,
    Task,
}

/// A markup operation to apply against the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupOp {
    Wrap {
        delimiter: String,
        placeholder: String,
    },
    BlockPrefix {
        prefix: String,
        kind: BlockKind,
    },
    Template {
        before: String,
        after: String,
        placeholder: String,
    },
}

impl MarkupOp {
    pub fn wrap(delimiter: &str, placeholder: &str) -> Self {
        Self::Wrap {
            delimiter: delimiter.to_string(),
            placeholder: placeholder.to_string(),
        }
    }

    pub fn block(prefix: &str, kind: BlockKind) -> Self {
        Self::BlockPrefix {
            prefix: prefix.to_string(),
            kind,
        }
    }

    pub fn template(before: &str, after: &str, placeholder: &str) -> Self {
        Self::Template {
            before: before.to_string(),
            after: after.to_string(),
            placeholder: placeholder.to_string(),
        }
    }
}

/// How a host should apply an insertion.
///
/// Browser hosts can route single-line insertions through a native text
/// command that keeps the undo stack intact; multi-line insertions go
/// through a full-buffer replace and lose native undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsertKind {
    SingleLine,
    MultiLine,
}

impl InsertKind {
    fn of(inserted: &str) -> Self {
        if inserted.contains('\n') {
            Self::MultiLine
        } else {
            Self::SingleLine
        }
    }
}

/// New buffer content and selection produced by a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationResult {
    pub text: String,
    pub selection: Selection,
    pub insert_kind: InsertKind,
}

impl MutationResult {
    /// A result that leaves text and selection as they were.
    pub fn unchanged(text: &str, selection: Selection) -> Self {
        Self {
            text: text.to_string(),
            selection: selection.clamp(char_len(text)),
            insert_kind: InsertKind::SingleLine,
        }
    }
}

/// Apply `op` to `text` at `selection`.
pub fn apply(text: &str, selection: Selection, op: &MarkupOp) -> MutationResult {
    match op {
        MarkupOp::Wrap {
            delimiter,
            placeholder,
        } => wrap(text, selection, delimiter, placeholder),
        MarkupOp::BlockPrefix { prefix, .. } => block_prefix(text, selection, prefix),
        MarkupOp::Template {
            before,
            after,
            placeholder,
        } => template(text, selection, before, after, placeholder),
    }
}

/// Wrap the selection in `delimiter`, or strip it if already wrapped.
///
/// An empty selection inserts `placeholder` between the delimiters. The new
/// selection always covers the text between the delimiters.
pub fn wrap(text: &str, selection: Selection, delimiter: &str, placeholder: &str) -> MutationResult {
    let mut rope = Rope::from_str(text);
    let sel = selection.clamp(rope.len_chars());
    let selected = rope.slice(sel.start..sel.end).to_string();
    let delim_len = char_len(delimiter);

    let wrapped = delim_len > 0
        && !selected.is_empty()
        && sel.start >= delim_len
        && slice_eq(&rope, sel.start - delim_len..sel.start, delimiter)
        && slice_eq(&rope, sel.end..sel.end + delim_len, delimiter);

    if wrapped {
        let start = sel.start - delim_len;
        splice(&mut rope, start..sel.end + delim_len, &selected);
        tracing::debug!(delimiter, "wrap toggled off");
        return MutationResult {
            text: rope.to_string(),
            selection: Selection::new(start, start + sel.len()),
            insert_kind: InsertKind::of(&selected),
        };
    }

    let inner = if selected.is_empty() {
        placeholder
    } else {
        selected.as_str()
    };
    let inserted = format!("{delimiter}{inner}{delimiter}");
    splice(&mut rope, sel.start..sel.end, &inserted);
    let start = sel.start + delim_len;
    tracing::debug!(delimiter, "wrap toggled on");
    MutationResult {
        text: rope.to_string(),
        selection: Selection::new(start, start + char_len(inner)),
        insert_kind: InsertKind::of(&inserted),
    }
}

/// Apply, replace or remove a block prefix on the line holding `selection.start`.
///
/// - The line already starts with `prefix`: the prefix is removed.
/// - The line starts with another recognized prefix: it is swapped for `prefix`.
/// - Otherwise `prefix` is prepended.
///
/// A non-empty selection contained in the line is shifted by the length
/// change. Any other selection becomes the line's content, starting at the
/// new prefix boundary.
pub fn block_prefix(text: &str, selection: Selection, prefix: &str) -> MutationResult {
    let mut rope = Rope::from_str(text);
    let sel = selection.clamp(rope.len_chars());
    let line = line_bounds(&rope, sel.start);
    let current = rope.slice(line.clone()).to_string();

    let toggled_off = !prefix.is_empty() && current.starts_with(prefix);
    let (removed, replacement) = if toggled_off {
        (char_len(prefix), current[prefix.len()..].to_string())
    } else if let Some(existing) = BLOCK_PREFIX.find(&current) {
        (
            char_len(existing.as_str()),
            format!("{prefix}{}", &current[existing.end()..]),
        )
    } else {
        (0, format!("{prefix}{current}"))
    };
    let added = if toggled_off { 0 } else { char_len(prefix) };

    splice(&mut rope, line.clone(), &replacement);
    let new_line_end = line.start + char_len(&replacement);
    tracing::debug!(prefix, toggled_off, removed, "block prefix applied");

    let boundary = if toggled_off {
        line.start
    } else {
        line.start + added
    };
    let selection = if !sel.is_empty() && sel.within(line.start, line.end) {
        let shift = |pos: usize| {
            (pos + added)
                .saturating_sub(removed)
                .clamp(boundary, new_line_end)
        };
        Selection::new(shift(sel.start), shift(sel.end))
    } else {
        Selection::new(boundary, new_line_end)
    };

    MutationResult {
        text: rope.to_string(),
        selection,
        insert_kind: InsertKind::of(&replacement),
    }
}

/// Insert `before + (selection or placeholder) + after`.
///
/// With a selection the caret lands after the inserted text; without one the
/// placeholder is selected so it can be typed over.
pub fn template(
    text: &str,
    selection: Selection,
    before: &str,
    after: &str,
    placeholder: &str,
) -> MutationResult {
    let mut rope = Rope::from_str(text);
    let sel = selection.clamp(rope.len_chars());
    let selected = rope.slice(sel.start..sel.end).to_string();

    let inserted = if selected.is_empty() {
        format!("{before}{placeholder}{after}")
    } else {
        format!("{before}{selected}{after}")
    };
    splice(&mut rope, sel.start..sel.end, &inserted);

    let selection = if selected.is_empty() {
        let start = sel.start + char_len(before);
        Selection::new(start, start + char_len(placeholder))
    } else {
        Selection::caret(sel.start + char_len(&inserted))
    };
    let insert_kind = InsertKind::of(&inserted);
    if insert_kind == InsertKind::MultiLine {
        tracing::debug!("multi-line template needs a full buffer replace");
    }

    MutationResult {
        text: rope.to_string(),
        selection,
        insert_kind,
    }
}

/// Replace `selection` with `inserted` and select `within`, given relative to
/// the start of the inserted text.
pub(crate) fn replace_and_select(
    text: &str,
    selection: Selection,
    inserted: &str,
    within: Range<usize>,
) -> MutationResult {
    let mut rope = Rope::from_str(text);
    let sel = selection.clamp(rope.len_chars());
    splice(&mut rope, sel.start..sel.end, inserted);
    let len = char_len(inserted);
    MutationResult {
        text: rope.to_string(),
        selection: Selection::new(sel.start + within.start.min(len), sel.start + within.end.min(len)),
        insert_kind: InsertKind::of(inserted),
    }
}

/// Character range of the `\n`-delimited line containing `pos`, excluding the
/// line break itself.
pub(crate) fn line_bounds(rope: &Rope, pos: usize) -> Range<usize> {
    let len = rope.len_chars();
    let pos = pos.min(len);
    let mut start = pos;
    while start > 0 && rope.char(start - 1) != '\n' {
        start -= 1;
    }
    let mut end = pos;
    while end < len && rope.char(end) != '\n' {
        end += 1;
    }
    start..end
}

pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn splice(rope: &mut Rope, range: Range<usize>, inserted: &str) {
    let at = range.start;
    rope.remove(range);
    rope.insert(at, inserted);
}

/// Compare a rope range against `expected`, treating out-of-range reads as a
/// mismatch.
fn slice_eq(rope: &Rope, range: Range<usize>, expected: &str) -> bool {
    range.end <= rope.len_chars() && rope.slice(range).chars().eq(expected.chars())
}
