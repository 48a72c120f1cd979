use proptest::prelude::*;

use splitmark::editor::markup::{self, block_prefix, template, wrap};
use splitmark::editor::snippets::{self, Script};
use splitmark::prelude::*;

#[test]
fn test_bold_wraps_selected_word() {
    let result = wrap("hello world", Selection::new(0, 5), "**", "bold text");
    assert_eq!(result.text, "**hello** world");
    assert_eq!(result.selection, Selection::new(2, 7));
    assert_eq!(result.insert_kind, InsertKind::SingleLine);
}

#[test]
fn test_inline_math_template_on_empty_buffer() {
    let result = template("", Selection::caret(0), "$", "$", "E=mc^2");
    assert_eq!(result.text, "$E=mc^2$");
    assert_eq!(result.selection, Selection::new(1, 7));
}

#[test]
fn test_heading_replaces_blockquote() {
    let result = block_prefix("> note", Selection::caret(3), "## ");
    assert_eq!(result.text, "## note");
    let back = block_prefix(&result.text, result.selection, "## ");
    assert_eq!(back.text, "note");
}

#[test]
fn test_markdown_toolbar_session_on_buffer() {
    let mut buf = TextBuffer::from_text("Shopping\nmilk\neggs");
    buf.select(Selection::caret(2));
    buf.toggle(&Action::Heading1.descriptor(Mode::Markdown));
    assert_eq!(buf.text(), "# Shopping\nmilk\neggs");

    let milk = buf.text().find("milk").unwrap();
    buf.select(Selection::caret(milk));
    buf.toggle(&Action::TaskList.descriptor(Mode::Markdown));
    assert_eq!(buf.text(), "# Shopping\n* [ ] milk\neggs");
    assert_eq!(buf.selected_text(), "milk");

    buf.toggle(&Action::Bold.descriptor(Mode::Markdown));
    assert_eq!(buf.text(), "# Shopping\n* [ ] **milk**\neggs");
    buf.toggle(&Action::Bold.descriptor(Mode::Markdown));
    assert_eq!(buf.text(), "# Shopping\n* [ ] milk\neggs");
    assert!(buf.is_dirty());
}

#[test]
fn test_latex_toolbar_inserts_bare_commands() {
    let mut buf = TextBuffer::empty();
    let kind = buf.toggle(&Action::Aligned.descriptor(Mode::Latex));
    assert_eq!(kind, InsertKind::MultiLine);
    assert_eq!(buf.text(), "\\begin{aligned}\nf(x) &= ... \\\\\n\\end{aligned}");
    assert_eq!(buf.selected_text(), "f(x) &= ... \\\\");
}

#[test]
fn test_table_snippet_through_buffer() {
    let op = snippets::table(&snippets::default_table_cells(1, 2)).unwrap();
    let mut buf = TextBuffer::from_text("intro");
    buf.select(Selection::caret(5));
    assert_eq!(buf.toggle(&op), InsertKind::MultiLine);
    assert_eq!(
        buf.text(),
        "intro\n| Header 1 | Header 2 |\n| :--- | :--- |\n| Cell 1-1 | Cell 1-2 |\n"
    );
    assert_eq!(buf.selected_text(), "Header 1");
}

#[test]
fn test_superscript_on_selection() {
    let result = snippets::script_selection("x + 1", Selection::new(0, 1), Script::Super).unwrap();
    assert_eq!(result.text, "$x^{exponent}$ + 1");
}

fn text_and_selection() -> impl Strategy<Value = (String, Selection)> {
    "[a-z #>*\\-\\n]{0,60}".prop_flat_map(|text| {
        let len = text.chars().count();
        (Just(text), 0..=len + 3, 0..=len + 3)
            .prop_map(|(text, a, b)| (text, Selection::new(a, b)))
    })
}

proptest! {
    #[test]
    fn every_action_keeps_selection_in_bounds(
        (text, selection) in text_and_selection(),
        index in 0..Action::ALL.len(),
        latex in any::<bool>(),
    ) {
        let mode = if latex { Mode::Latex } else { Mode::Markdown };
        let result = markup::apply(&text, selection, &Action::ALL[index].descriptor(mode));
        let len = result.text.chars().count();
        prop_assert!(result.selection.start <= result.selection.end);
        prop_assert!(result.selection.end <= len);
    }

    #[test]
    fn block_prefix_toggles_back_on_any_line(
        lines in prop::collection::vec("[a-z ]{0,12}", 1..5),
        which in 0usize..5,
        prefix in prop::sample::select(vec!["# ", "### ", "> ", "- ", "2. ", "- [ ] "]),
    ) {
        let text = lines.join("\n");
        let which = which % lines.len();
        let caret: usize = lines[..which].iter().map(|l| l.chars().count() + 1).sum();
        let once = block_prefix(&text, Selection::caret(caret), prefix);
        let twice = block_prefix(&once.text, once.selection, prefix);
        prop_assert_eq!(twice.text, text);
    }

    #[test]
    fn wrap_unwraps_its_own_output(
        word in "[a-z]{1,10}",
        before in "[a-z ]{0,10}",
        after in "[a-z ]{0,10}",
        delimiter in prop::sample::select(vec!["**", "*", "~~", "`", "$"]),
    ) {
        let text = format!("{before} {word} {after}");
        let start = before.chars().count() + 1;
        let selection = Selection::new(start, start + word.len());
        let once = wrap(&text, selection, delimiter, "ph");
        let twice = wrap(&once.text, once.selection, delimiter, "ph");
        prop_assert_eq!(twice.text, text);
        prop_assert_eq!(twice.selection, selection);
    }
}
