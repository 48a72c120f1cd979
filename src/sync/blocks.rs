//! Source line index of Markdown block elements.
//!
//! A preview renderer tags each block element with the source line it starts
//! on. Parsing the same source here gives the set of lines that will carry
//! anchors, without needing the renderer.

use comrak::nodes::{AstNode, NodeValue};
use comrak::{Arena, Options, parse_document};
use serde::Serialize;

/// Kind of block element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    Heading,
    Paragraph,
    List,
    Item,
    TaskItem,
    BlockQuote,
    CodeBlock,
    HtmlBlock,
    ThematicBreak,
    Table,
    TableRow,
    FootnoteDefinition,
    FrontMatter,
}

/// A block element and the 1-based source lines it spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceBlock {
    pub kind: BlockType,
    pub start_line: usize,
    pub end_line: usize,
}

fn create_options() -> Options {
    let mut options = Options::default();

    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;
    options.extension.math_dollars = true;

    options
}

/// All block elements of `markdown`, in document order.
pub fn source_blocks(markdown: &str) -> Vec<SourceBlock> {
    let arena = Arena::new();
    let options = create_options();
    let root = parse_document(&arena, markdown, &options);

    let blocks: Vec<SourceBlock> = root.descendants().filter_map(source_block).collect();
    tracing::debug!(count = blocks.len(), "indexed source blocks");
    blocks
}

/// Sorted, distinct 1-based start lines of every block element.
pub fn block_start_lines(markdown: &str) -> Vec<usize> {
    let mut lines: Vec<usize> = source_blocks(markdown)
        .into_iter()
        .map(|block| block.start_line)
        .collect();
    lines.sort_unstable();
    lines.dedup();
    lines
}

fn source_block<'a>(node: &'a AstNode<'a>) -> Option<SourceBlock> {
    let data = node.data.borrow();
    let kind = match &data.value {
        NodeValue::Heading(_) => BlockType::Heading,
        NodeValue::Paragraph => BlockType::Paragraph,
        NodeValue::List(_) => BlockType::List,
        NodeValue::Item(_) => BlockType::Item,
        NodeValue::TaskItem(_) => BlockType::TaskItem,
        NodeValue::BlockQuote => BlockType::BlockQuote,
        NodeValue::CodeBlock(_) => BlockType::CodeBlock,
        NodeValue::HtmlBlock(_) => BlockType::HtmlBlock,
        NodeValue::ThematicBreak => BlockType::ThematicBreak,
        NodeValue::Table(_) => BlockType::Table,
        NodeValue::TableRow(_) => BlockType::TableRow,
        NodeValue::FootnoteDefinition(_) => BlockType::FootnoteDefinition,
        NodeValue::FrontMatter(_) => BlockType::FrontMatter,
        _ => return None,
    };
    let pos = data.sourcepos;
    Some(SourceBlock {
        kind,
        start_line: pos.start.line,
        end_line: pos.end.line.max(pos.start.line),
    })
}
