use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::editor::Mode;
use crate::editor::indent::{DEFAULT_INDENT_SIZE, indent_unit};
use crate::sync::guard::DEFAULT_SUPPRESS_MS;
use crate::sync::scroll::SyncConfig;

/// Settings that can come from the command line or a config file.
///
/// Every field is optional so that a file and the command line can be
/// layered with [`ConfigFlags::union`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConfigFlags {
    pub mode: Option<Mode>,
    pub indent_size: Option<usize>,
    pub tabs: bool,
    pub line_height: Option<f64>,
    pub lead_in: Option<f64>,
    pub bottom_lines: Option<f64>,
    pub suppress_ms: Option<u64>,
}

/// Editing settings derived from merged flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    pub mode: Mode,
    pub indent_unit: String,
}

impl ConfigFlags {
    /// Layer `other` over `self`; values set in `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            mode: other.mode.or(self.mode),
            indent_size: other.indent_size.or(self.indent_size),
            tabs: self.tabs || other.tabs,
            line_height: other.line_height.or(self.line_height),
            lead_in: other.lead_in.or(self.lead_in),
            bottom_lines: other.bottom_lines.or(self.bottom_lines),
            suppress_ms: other.suppress_ms.or(self.suppress_ms),
        }
    }

    pub fn sync_config(&self) -> SyncConfig {
        let defaults = SyncConfig::default();
        SyncConfig {
            lead_in: self.lead_in.unwrap_or(defaults.lead_in),
            bottom_threshold_lines: self
                .bottom_lines
                .unwrap_or(defaults.bottom_threshold_lines),
            default_line_height: self
                .line_height
                .filter(|lh| lh.is_finite() && *lh > 0.0)
                .unwrap_or(defaults.default_line_height),
        }
    }

    pub fn editor_config(&self) -> EditorConfig {
        let indent_unit = if self.tabs {
            "\t".to_string()
        } else {
            indent_unit(self.indent_size.unwrap_or(DEFAULT_INDENT_SIZE))
        };
        EditorConfig {
            mode: self.mode.unwrap_or_default(),
            indent_unit,
        }
    }

    pub fn suppress_window_ms(&self) -> u64 {
        self.suppress_ms.unwrap_or(DEFAULT_SUPPRESS_MS)
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("splitmark").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("splitmark")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("splitmark").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("splitmark")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".splitmarkrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    let flags = parse_flag_tokens(&tokens);
    tracing::debug!(path = %path.display(), ?flags, "loaded config");
    Ok(flags)
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# splitmark defaults (saved with --save)".to_string());
    if let Some(mode) = flags.mode {
        let mode_str = match mode {
            Mode::Markdown => "markdown",
            Mode::Latex => "latex",
        };
        lines.push(format!("--mode {mode_str}"));
    }
    if let Some(size) = flags.indent_size {
        lines.push(format!("--indent-size {size}"));
    }
    if flags.tabs {
        lines.push("--tabs".to_string());
    }
    if let Some(lh) = flags.line_height {
        lines.push(format!("--line-height {lh}"));
    }
    if let Some(lead_in) = flags.lead_in {
        lines.push(format!("--lead-in {lead_in}"));
    }
    if let Some(bottom) = flags.bottom_lines {
        lines.push(format!("--bottom-lines {bottom}"));
    }
    if let Some(ms) = flags.suppress_ms {
        lines.push(format!("--suppress-ms {ms}"));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick known flags out of a token list, ignoring everything else.
///
/// Accepts both `--flag value` and `--flag=value`. Values that do not parse
/// leave the setting unset.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        if token == "--tabs" {
            flags.tabs = true;
        } else if let Some((name, value, consumed)) = flag_value(tokens, i) {
            match name {
                "--mode" => flags.mode = parse_mode(value),
                "--indent-size" => flags.indent_size = parse_value(value),
                "--line-height" => flags.line_height = parse_value(value),
                "--lead-in" => flags.lead_in = parse_value(value),
                "--bottom-lines" => flags.bottom_lines = parse_value(value),
                "--suppress-ms" => flags.suppress_ms = parse_value(value),
                _ => {}
            }
            i += consumed;
        }
        i += 1;
    }
    flags
}

const VALUE_FLAGS: &[&str] = &[
    "--mode",
    "--indent-size",
    "--line-height",
    "--lead-in",
    "--bottom-lines",
    "--suppress-ms",
];

/// Match a valued flag at `tokens[i]`, returning its name, value and how many
/// extra tokens the value used.
fn flag_value(tokens: &[String], i: usize) -> Option<(&'static str, &str, usize)> {
    let token = tokens[i].as_str();
    VALUE_FLAGS.iter().find_map(|&name| {
        if token == name {
            tokens.get(i + 1).map(|next| (name, next.as_str(), 1))
        } else {
            token
                .strip_prefix(name)
                .and_then(|rest| rest.strip_prefix('='))
                .map(|value| (name, value, 0))
        }
    })
}

fn parse_value<T: FromStr>(s: &str) -> Option<T> {
    s.trim().parse().ok()
}

fn parse_mode(s: &str) -> Option<Mode> {
    match s {
        "markdown" | "md" => Some(Mode::Markdown),
        "latex" | "tex" => Some(Mode::Latex),
        _ => None,
    }
}
