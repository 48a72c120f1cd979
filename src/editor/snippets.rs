//! Generated Markdown tables and LaTeX structures.
//!
//! Grid builders return a [`MarkupOp::Template`] whose placeholder is the
//! first cell, so the host can drop the caret straight into it.

use super::markup::{self, MarkupOp, MutationResult, char_len};
use super::Selection;

/// Superscript or subscript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Super,
    Sub,
}

impl Script {
    const fn marker(self) -> char {
        match self {
            Self::Super => '^',
            Self::Sub => '_',
        }
    }

    const fn placeholder(self) -> &'static str {
        match self {
            Self::Super => "exponent",
            Self::Sub => "index",
        }
    }
}

/// Default table cells: a `Header n` row followed by `rows` rows of `Cell r-c`.
pub fn default_table_cells(rows: usize, cols: usize) -> Vec<Vec<String>> {
    let rows = rows.max(1);
    let cols = cols.max(1);
    let header = (1..=cols).map(|c| format!("Header {c}")).collect();
    std::iter::once(header)
        .chain((1..=rows).map(|r| (1..=cols).map(|c| format!("Cell {r}-{c}")).collect()))
        .collect()
}

/// Default matrix cells `a_{rc}`.
pub fn default_matrix_cells(rows: usize, cols: usize) -> Vec<Vec<String>> {
    (1..=rows.max(1))
        .map(|r| (1..=cols.max(1)).map(|c| format!("a_{{{r}{c}}}")).collect())
        .collect()
}

/// A GFM table from a header row followed by data rows.
///
/// Returns `None` for an empty grid.
pub fn table(cells: &[Vec<String>]) -> Option<MarkupOp> {
    let header = cells.first().filter(|row| !row.is_empty())?;
    let mut out = String::from("\n");
    out.push_str(&format!("| {} |\n", header.join(" | ")));
    out.push('|');
    out.push_str(&vec![" :--- "; header.len()].join("|"));
    out.push_str("|\n");
    for row in &cells[1..] {
        out.push_str(&format!("| {} |\n", row.join(" | ")));
    }
    Some(split_at_placeholder(&out, &header[0], "", ""))
}

/// A `bmatrix` display-math block. Empty cells fall back to `a_{rc}`.
///
/// Returns `None` for an empty grid.
pub fn matrix(cells: &[Vec<String>]) -> Option<MarkupOp> {
    let cols = cells.first().map(Vec::len).filter(|&cols| cols > 0)?;
    let grid: Vec<Vec<String>> = cells
        .iter()
        .enumerate()
        .map(|(r, row)| {
            (0..cols)
                .map(|c| match row.get(c) {
                    Some(cell) if !cell.is_empty() => cell.clone(),
                    _ => format!("a_{{{}{}}}", r + 1, c + 1),
                })
                .collect()
        })
        .collect();
    let body = grid
        .iter()
        .map(|row| row.join(" & "))
        .collect::<Vec<_>>()
        .join(" \\\\ ");
    Some(split_at_placeholder(
        &body,
        &grid[0][0],
        "$$\\begin{bmatrix}",
        "\\end{bmatrix}$$",
    ))
}

/// `$base^{exp}$` or `$base_{exp}$` as a plain insertion.
pub fn script(kind: Script, base: &str, value: &str) -> MarkupOp {
    MarkupOp::template(&format!("${base}{}{{{value}}}$", kind.marker()), "", "")
}

/// Turn the selected text into the base of a super/subscript and select the
/// `exponent`/`index` placeholder.
///
/// Returns `None` when nothing is selected; the host then asks for a base
/// and value and inserts [`script`] instead.
pub fn script_selection(
    text: &str,
    selection: Selection,
    kind: Script,
) -> Option<MutationResult> {
    let sel = selection.clamp(char_len(text));
    if sel.is_empty() {
        return None;
    }
    let base: String = text.chars().skip(sel.start).take(sel.len()).collect();
    let before = format!("${base}{}{{", kind.marker());
    let placeholder = kind.placeholder();
    let inserted = format!("{before}{placeholder}}}$");
    let start = char_len(&before);
    Some(markup::replace_and_select(
        text,
        sel,
        &inserted,
        start..start + char_len(placeholder),
    ))
}

fn split_at_placeholder(body: &str, placeholder: &str, lead: &str, trail: &str) -> MarkupOp {
    let index = body.find(placeholder).unwrap_or(0);
    MarkupOp::template(
        &format!("{lead}{}", &body[..index]),
        &format!("{}{trail}", &body[index + placeholder.len()..]),
        placeholder,
    )
}
