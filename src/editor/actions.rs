//! Named toolbar actions and the markup each one performs.
//!
//! The catalog mirrors the editor's two toolbars. Symbol and calculus entries
//! differ by [`Mode`]: Markdown documents need `$` delimiters around inline
//! LaTeX, raw LaTeX documents do not. Fractions and roots are always inline
//! math.

use std::fmt;
use std::str::FromStr;

use super::markup::{BlockKind, MarkupOp};
use crate::error::Error;

/// Which kind of document is being edited.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Markdown,
    Latex,
}

macro_rules! actions {
    ($($variant:ident => $name:literal,)+) => {
        /// A toolbar action.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Action {
            $($variant,)+
        }

        impl Action {
            /// Every action, in toolbar order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Stable kebab-case name.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }
    };
}

actions! {
    Bold => "bold",
    Italic => "italic",
    Strikethrough => "strikethrough",
    InlineCode => "inline-code",
    Keyboard => "kbd",
    Highlight => "mark",
    Heading1 => "heading-1",
    Heading2 => "heading-2",
    Heading3 => "heading-3",
    BulletList => "bullet-list",
    NumberedList => "numbered-list",
    TaskList => "task-list",
    Blockquote => "blockquote",
    Link => "link",
    Image => "image",
    Divider => "divider",
    CodeBlock => "code-block",
    InlineMath => "inline-math",
    BlockMath => "block-math",
    Fraction => "fraction",
    SquareRoot => "sqrt",
    NthRoot => "nth-root",
    Pi => "pi",
    Theta => "theta",
    Alpha => "alpha",
    Beta => "beta",
    Delta => "delta",
    Times => "times",
    Divide => "divide",
    Infinity => "infinity",
    PlusMinus => "plus-minus",
    Arrow => "arrow",
    NotEqual => "not-equal",
    Summation => "summation",
    Integral => "integral",
    Limit => "limit",
    Aligned => "aligned",
}

impl Action {
    /// Whether the action appears on the toolbar for `mode`.
    ///
    /// Markdown-only actions still produce a descriptor in LaTeX mode; this
    /// only governs what a toolbar lists.
    pub const fn available_in(self, mode: Mode) -> bool {
        match mode {
            Mode::Markdown => true,
            Mode::Latex => matches!(
                self,
                Self::InlineMath
                    | Self::BlockMath
                    | Self::Fraction
                    | Self::SquareRoot
                    | Self::Pi
                    | Self::Theta
                    | Self::Alpha
                    | Self::Beta
                    | Self::Delta
                    | Self::Infinity
                    | Self::Summation
                    | Self::Integral
                    | Self::Limit
                    | Self::Aligned
            ),
        }
    }

    /// The markup operation this action performs in `mode`.
    pub fn descriptor(self, mode: Mode) -> MarkupOp {
        match self {
            Self::Bold => MarkupOp::wrap("**", "bold text"),
            Self::Italic => MarkupOp::wrap("*", "italic text"),
            Self::Strikethrough => MarkupOp::wrap("~~", "strikethrough"),
            Self::InlineCode => MarkupOp::wrap("`", "code"),
            Self::Keyboard => MarkupOp::template("<kbd>", "</kbd>", "Ctrl"),
            Self::Highlight => MarkupOp::template("<mark>", "</mark>", "highlight"),
            Self::Heading1 => MarkupOp::block("# ", BlockKind::Heading),
            Self::Heading2 => MarkupOp::block("## ", BlockKind::Heading),
            Self::Heading3 => MarkupOp::block("### ", BlockKind::Heading),
            Self::BulletList => MarkupOp::block("* ", BlockKind::List),
            Self::NumberedList => MarkupOp::block("1. ", BlockKind::List),
            Self::TaskList => MarkupOp::block("* [ ] ", BlockKind::Task),
            Self::Blockquote => MarkupOp::block("> ", BlockKind::Quote),
            Self::Link => MarkupOp::template("[", "](https://)", "link text"),
            Self::Image => MarkupOp::template("![", "](image-url)", "alt text"),
            Self::Divider => MarkupOp::template("\n---\n", "", ""),
            Self::CodeBlock => MarkupOp::template("```javascript\n", "\n```", "// code"),
            Self::InlineMath => MarkupOp::template("$", "$", "E = mc^2"),
            Self::BlockMath => MarkupOp::template("$$\n", "\n$$", "f(x) = ..."),
            Self::Fraction => MarkupOp::template("$\\frac{", "}{denominator}$", "numerator"),
            Self::SquareRoot => MarkupOp::template("$\\sqrt{", "}$", "x"),
            Self::NthRoot => math(mode, "\\sqrt[", "]{x}", "n"),
            Self::Pi => symbol(mode, "\\pi"),
            Self::Theta => symbol(mode, "\\theta"),
            Self::Alpha => symbol(mode, "\\alpha"),
            Self::Beta => symbol(mode, "\\beta"),
            Self::Delta => symbol(mode, "\\Delta"),
            Self::Times => symbol(mode, "\\times"),
            Self::Divide => symbol(mode, "\\div"),
            Self::Infinity => symbol(mode, "\\infty"),
            Self::PlusMinus => symbol(mode, "\\pm"),
            Self::Arrow => symbol(mode, "\\to"),
            Self::NotEqual => symbol(mode, "\\neq"),
            Self::Summation => math(mode, "\\sum_{i=1}^{", "}{x_i}", "n"),
            Self::Integral => math(mode, "\\int_{", "}^{b}{f(x)dx}", "a"),
            Self::Limit => math(mode, "\\lim_{x \\to ", "}{f(x)}", "0"),
            Self::Aligned => match mode {
                Mode::Markdown => MarkupOp::template(
                    "$$\\begin{aligned}\n",
                    "\n\\end{aligned}$$",
                    "f(x) &= ... \\\\",
                ),
                Mode::Latex => MarkupOp::template(
                    "\\begin{aligned}\n",
                    "\n\\end{aligned}",
                    "f(x) &= ... \\\\",
                ),
            },
        }
    }
}

/// Inline math, delimited by `$` in Markdown mode.
fn math(mode: Mode, before: &str, after: &str, placeholder: &str) -> MarkupOp {
    match mode {
        Mode::Markdown => MarkupOp::template(&format!("${before}"), &format!("{after}$"), placeholder),
        Mode::Latex => MarkupOp::template(before, after, placeholder),
    }
}

/// A space-padded symbol with nothing to select.
fn symbol(mode: Mode, command: &str) -> MarkupOp {
    let text = match mode {
        Mode::Markdown => format!(" ${command}$ "),
        Mode::Latex => format!(" {command} "),
    };
    MarkupOp::template(&text, "", "")
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|action| action.name() == wanted)
            .ok_or_else(|| Error::UnknownAction(s.to_string()))
    }
}
