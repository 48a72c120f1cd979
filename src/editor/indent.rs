//! Line indentation over a selection.
//!
//! Indent and outdent act on every line touched by the selection, from the
//! line holding `start` through the text before `end`. A caret alone is
//! left untouched; [`tab_key`] handles the caret case by inserting a unit.

use ropey::Rope;

use super::markup::{self, MutationResult, char_len, line_bounds};
use super::Selection;

/// Largest indent width accepted from configuration.
pub const MAX_INDENT_SIZE: usize = 8;
/// Indent width used when none is configured or the configured one is invalid.
pub const DEFAULT_INDENT_SIZE: usize = 4;

/// The whitespace inserted for one level of indentation.
pub fn indent_unit(size: usize) -> String {
    let size = if (1..=MAX_INDENT_SIZE).contains(&size) {
        size
    } else {
        DEFAULT_INDENT_SIZE
    };
    " ".repeat(size)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Indent,
    Outdent,
}

/// Prepend `unit` to every non-blank line in the selection.
pub fn indent(text: &str, selection: Selection, unit: &str) -> MutationResult {
    shift_lines(text, selection, unit, Direction::Indent)
}

/// Remove one `unit`, or one leading tab, from every line in the selection.
pub fn outdent(text: &str, selection: Selection, unit: &str) -> MutationResult {
    shift_lines(text, selection, unit, Direction::Outdent)
}

/// Tab key behavior: a caret inserts `unit`, a selection indents, and
/// Shift+Tab outdents.
pub fn tab_key(text: &str, selection: Selection, shift: bool, unit: &str) -> MutationResult {
    if shift {
        outdent(text, selection, unit)
    } else if selection.is_empty() {
        let len = char_len(unit);
        markup::replace_and_select(text, selection, unit, len..len)
    } else {
        indent(text, selection, unit)
    }
}

fn shift_lines(text: &str, selection: Selection, unit: &str, direction: Direction) -> MutationResult {
    let rope = Rope::from_str(text);
    let sel = selection.clamp(rope.len_chars());
    if sel.is_empty() || unit.is_empty() {
        return MutationResult::unchanged(text, sel);
    }

    let region_start = line_bounds(&rope, sel.start).start;
    let mut region_end = sel.end;
    if region_end > region_start && rope.char(region_end - 1) == '\n' {
        region_end -= 1;
    }

    let region = rope.slice(region_start..region_end).to_string();
    let unit_len = char_len(unit);
    let mut first_line_delta: Option<(usize, usize)> = None;
    let mut added = 0;
    let mut removed = 0;
    let lines: Vec<String> = region
        .split('\n')
        .map(|line| {
            let (shifted, line_added, line_removed) = match direction {
                Direction::Indent if !line.trim().is_empty() => {
                    (format!("{unit}{line}"), unit_len, 0)
                }
                Direction::Outdent if line.starts_with(unit) => {
                    (line[unit.len()..].to_string(), 0, unit_len)
                }
                Direction::Outdent if line.starts_with('\t') => (line[1..].to_string(), 0, 1),
                _ => (line.to_string(), 0, 0),
            };
            first_line_delta.get_or_insert((line_added, line_removed));
            added += line_added;
            removed += line_removed;
            shifted
        })
        .collect();
    let replaced = lines.join("\n");

    let mut result = markup::replace_and_select(
        text,
        Selection::new(region_start, region_end),
        &replaced,
        0..0,
    );

    let (first_added, first_removed) = first_line_delta.unwrap_or_default();
    let start = if sel.start == region_start {
        region_start
    } else {
        (sel.start + first_added)
            .saturating_sub(first_removed)
            .max(region_start)
    };
    let end = (sel.end + added).saturating_sub(removed).max(start);
    result.selection = Selection::new(start, end).clamp(char_len(&result.text));
    tracing::debug!(?direction, added, removed, "lines shifted");
    result
}
