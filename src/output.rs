//! # Output Configuration
//!
//! This module provides utilities for controlling CLI output appearance:
//! whether colors are used, and how long paths are shortened to fit into
//! a single progress line.
//!
//! ## Respecting User Preferences
//!
//! The module respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! ## Usage
//!
//! ```rust,ignore
//! use git_manager::output::OutputConfig;
//!
//! let config = OutputConfig::from_env_and_flag("auto");
//! config.apply();
//! println!("{}", console::style("done").green());
//! ```

use std::env;
use std::path::{Component, Path};

/// Paths are never shortened below this many characters.
const MIN_WIDTH: usize = 6;

const ELLIPSIS: &str = "...";

/// Output configuration for controlling colors.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// # Arguments
    /// * `color_flag` - The value of the --color CLI flag: "always", "never", or "auto"
    ///
    /// In auto mode, colors are disabled if:
    /// - `NO_COLOR` environment variable is set (any value, including empty)
    /// - `CLICOLOR=0` is set
    /// - `TERM=dumb` is set
    /// - stdout is not a TTY (unless `CLICOLOR_FORCE=1`)
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Make every `console::style` call of this process follow this
    /// configuration.
    pub fn apply(&self) {
        console::set_colors_enabled(self.use_color);
        console::set_colors_enabled_stderr(self.use_color);
    }

    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Width of the terminal attached to stderr, if there is one.
pub fn terminal_width() -> Option<usize> {
    let term = console::Term::stderr();
    if !term.is_term() {
        return None;
    }
    Some(usize::from(term.size().1))
}

/// Lexically normalize a path into its named components.
fn normalized(path: &Path) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().to_string()),
            Component::ParentDir => {
                if parts.pop().is_none() {
                    parts.push("..".to_string());
                }
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    parts
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Shorten a relative path to at most `width` characters.
///
/// Middle components are replaced by `...` one at a time; if two
/// components are still too long, characters are cut from the longer one.
pub fn short_relative_path(path: &Path, width: usize) -> String {
    let width = width.max(MIN_WIDTH - 2);
    let mut parts = normalized(path);
    let mut text = parts.join("/");

    while parts.len() > 2 && char_len(&text) > width {
        let middle = parts.len() / 2;
        let mut shown: Vec<&str> = parts[..middle].iter().map(String::as_str).collect();
        shown.push(ELLIPSIS);
        shown.extend(parts[middle + 1..].iter().map(String::as_str));
        text = shown.join("/");
        parts.remove(middle);
    }

    if char_len(&text) <= width {
        return text;
    }

    let keep = width - ELLIPSIS.len();
    let chars: Vec<char> = text.chars().collect();
    let first_is_shorter = match parts.as_slice() {
        [first, last, ..] => char_len(first) < char_len(last),
        _ => false,
    };

    if first_is_shorter {
        format!("{}{}", chars[..keep].iter().collect::<String>(), ELLIPSIS)
    } else {
        format!("{}{}", ELLIPSIS, chars[chars.len() - keep..].iter().collect::<String>())
    }
}

/// Shorten a path to at most `width` characters for display, writing
/// paths below `home` as `~/...`.
pub fn short_path(path: &Path, home: &Path, width: usize) -> String {
    let width = width.max(MIN_WIDTH);

    if !path.is_absolute() {
        return short_relative_path(path, width);
    }

    let full = format!("/{}", normalized(path).join("/"));
    if char_len(&full) < width {
        return full;
    }

    match path.strip_prefix(home) {
        Ok(rest) if !home.as_os_str().is_empty() => {
            if rest.as_os_str().is_empty() {
                "~".to_string()
            } else {
                format!("~/{}", short_relative_path(rest, width - 2))
            }
        }
        _ => format!("/{}", short_relative_path(Path::new(&full[1..]), width - 1)),
    }
}
