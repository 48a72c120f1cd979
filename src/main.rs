//! Splitmark - headless Markdown/LaTeX editor core.
//!
//! # Usage
//!
//! ```bash
//! splitmark apply notes.md --action bold --selection 0:5
//! splitmark indent notes.md --selection 0:40 --outdent
//! splitmark sync --scroll-top 80 --viewport-height 500 --scroll-height 4000 --anchors 1:0,10:900
//! splitmark --mode latex actions
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use splitmark::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    save_config_flags,
};
use splitmark::editor::{Action, Mode, Selection, indent, markup};
use splitmark::sync::{AnchorSet, EditorMetrics, ScrollSync, block_start_lines, source_blocks};

/// Toggleable markup and preview scroll sync for a split-pane editor
#[derive(Parser, Debug)]
#[command(name = "splitmark", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Document kind, selects the toolbar variant of math and symbol actions
    #[arg(long, value_enum, global = true)]
    mode: Option<Mode>,

    /// Spaces per indent level
    #[arg(long, value_name = "N", global = true)]
    indent_size: Option<usize>,

    /// Indent with tabs instead of spaces
    #[arg(long, global = true)]
    tabs: bool,

    /// Editor line height in pixels
    #[arg(long, value_name = "PX", global = true)]
    line_height: Option<f64>,

    /// Space left above the matched line in the preview, in pixels
    #[arg(long, value_name = "PX", global = true)]
    lead_in: Option<f64>,

    /// Lines from the editor bottom that snap the preview to its end
    #[arg(long, value_name = "LINES", global = true)]
    bottom_lines: Option<f64>,

    /// Window after a sync during which editor scroll events are ignored
    #[arg(long, value_name = "MS", global = true)]
    suppress_ms: Option<u64>,

    /// Save current command-line flags as defaults
    #[arg(long, global = true)]
    save: bool,

    /// Clear saved defaults
    #[arg(long, global = true)]
    clear: bool,
}

impl Cli {
    fn config_flags(&self) -> ConfigFlags {
        ConfigFlags {
            mode: self.mode,
            indent_size: self.indent_size,
            tabs: self.tabs,
            line_height: self.line_height,
            lead_in: self.lead_in,
            bottom_lines: self.bottom_lines,
            suppress_ms: self.suppress_ms,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply a toolbar action to a file and print the result
    Apply {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Action name (see `splitmark actions`)
        #[arg(short, long)]
        action: Action,

        /// Selection as START:END character offsets, or a caret position
        #[arg(short, long, default_value = "0")]
        selection: Selection,

        /// Write the new text back to FILE instead of printing JSON
        #[arg(short, long)]
        write: bool,
    },

    /// Indent or outdent the lines touched by a selection
    Indent {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Selection as START:END character offsets, or a caret position
        #[arg(short, long)]
        selection: Selection,

        /// Remove one indent level instead of adding one
        #[arg(long)]
        outdent: bool,

        /// Write the new text back to FILE instead of printing JSON
        #[arg(short, long)]
        write: bool,
    },

    /// Compute the preview scroll target for an editor position
    Sync {
        #[arg(long, allow_negative_numbers = true)]
        scroll_top: f64,

        #[arg(long)]
        viewport_height: f64,

        #[arg(long)]
        scroll_height: f64,

        /// Rendered anchors as LINE:OFFSET pairs, comma separated
        #[arg(long, conflicts_with = "markdown")]
        anchors: Option<String>,

        /// Derive anchors from this Markdown file's block start lines
        #[arg(long, value_name = "FILE")]
        markdown: Option<PathBuf>,

        /// Preview height per source line when deriving anchors
        #[arg(long, value_name = "PX", requires = "markdown")]
        rendered_line_height: Option<f64>,
    },

    /// List the block elements of a Markdown file with their source lines
    Blocks {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// List toolbar action names
    Actions,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn write_file(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
}

fn run(command: Command, effective: &ConfigFlags) -> Result<()> {
    let editor = effective.editor_config();
    match command {
        Command::Apply {
            file,
            action,
            selection,
            write,
        } => {
            let text = read_file(&file)?;
            let result = markup::apply(&text, selection, &action.descriptor(editor.mode));
            if write {
                write_file(&file, &result.text)
            } else {
                print_json(&result)
            }
        }
        Command::Indent {
            file,
            selection,
            outdent,
            write,
        } => {
            let text = read_file(&file)?;
            let result = if outdent {
                indent::outdent(&text, selection, &editor.indent_unit)
            } else {
                indent::indent(&text, selection, &editor.indent_unit)
            };
            if write {
                write_file(&file, &result.text)
            } else {
                print_json(&result)
            }
        }
        Command::Sync {
            scroll_top,
            viewport_height,
            scroll_height,
            anchors,
            markdown,
            rendered_line_height,
        } => {
            let config = effective.sync_config();
            let anchors = match (anchors, markdown) {
                (Some(list), _) => AnchorSet::parse_list(&list).context("Invalid --anchors")?,
                (None, Some(path)) => {
                    let source = read_file(&path)?;
                    AnchorSet::uniform(
                        &block_start_lines(&source),
                        rendered_line_height.unwrap_or(config.default_line_height),
                    )
                }
                (None, None) => AnchorSet::default(),
            };
            let metrics = EditorMetrics {
                scroll_top,
                viewport_height,
                scroll_height,
                line_height: config.default_line_height,
            };
            let mut sync =
                ScrollSync::new(config, effective.suppress_window_ms()).with_mode(editor.mode);
            print_json(&sync.on_editor_scroll(&metrics, &anchors, 0))
        }
        Command::Blocks { file } => {
            let source = read_file(&file)?;
            print_json(&source_blocks(&source))
        }
        Command::Actions => {
            for action in Action::ALL.iter().filter(|a| a.available_in(editor.mode)) {
                println!("{action}");
            }
            Ok(())
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.config_flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    match cli.command {
        Some(command) => run(command, &effective),
        None if cli.save || cli.clear => Ok(()),
        None => anyhow::bail!("No command given, see `splitmark --help`"),
    }
}
