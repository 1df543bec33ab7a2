//! Terminal output.
//!
//! Command results go to the writer handed to each handler (stdout in
//! practice). Diagnostics, warnings and errors go to stderr so that piping
//! `lr li` into other tools only ever sees registry data.

use crate::context::{AppContext, VerbosityLevel};
use liblr::TagDeletion;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;


/// Color output control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    /// Color when stderr is a terminal and NO_COLOR is unset
    Auto,
    Always,
    Never,
}

impl From<&str> for ColorChoice {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "always" => ColorChoice::Always,
            "never" => ColorChoice::Never,
            _ => ColorChoice::Auto,
        }
    }
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain lines, one record per line
    Pretty,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "yaml" | "yml" => OutputFormat::Yaml,
            _ => OutputFormat::Pretty,
        }
    }
}

/// Check if we should use colors in diagnostics
pub fn should_color(ctx: &AppContext) -> bool {
    match ctx.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            std::io::stderr().is_terminal() && std::env::var("NO_COLOR").is_err()
        }
    }
}

/// Print a diagnostic message if the context is at least `level` verbose
pub fn print(ctx: &AppContext, level: VerbosityLevel, message: &str) {
    if ctx.verbosity >= level {
        if should_color(ctx) {
            eprintln!("{}", message.dimmed());
        } else {
            eprintln!("{}", message);
        }
    }
}

/// Print an error message
pub fn error(ctx: &AppContext, message: &str) {
    eprintln!("{} {}", error_mark(ctx), message);
}

/// Print a warning message
pub fn warning(ctx: &AppContext, message: &str) {
    if should_color(ctx) {
        eprintln!("{} {}", "⚠".yellow().bold(), message);
    } else {
        eprintln!("⚠ {}", message);
    }
}

/// Colorize an X mark for errors if colors are enabled
pub fn error_mark(ctx: &AppContext) -> String {
    if should_color(ctx) {
        format!("{}", "✗".red().bold())
    } else {
        "✗".to_string()
    }
}

/// Trait for types that can be formatted for CLI output
pub trait Formattable: Serialize {
    /// Format the type for pretty (human-readable) output
    fn format_pretty(&self) -> String;
}

impl Formattable for String {
    fn format_pretty(&self) -> String {
        self.clone()
    }
}

impl Formattable for TagDeletion {
    fn format_pretty(&self) -> String {
        self.to_string()
    }
}

/// Format a vector of items for output
///
/// Pretty output puts one item per line; an empty slice renders as an empty
/// string so that nothing, not even a blank line, gets printed.
pub fn format_output_vec<T: Formattable>(
    items: &[T],
    format: OutputFormat,
) -> Result<String, String> {
    match format {
        OutputFormat::Pretty => {
            let output: Vec<String> = items.iter().map(|item| item.format_pretty()).collect();
            Ok(output.join("\n"))
        }
        OutputFormat::Json => serde_json::to_string_pretty(items)
            .map_err(|e| format!("Failed to serialize to JSON: {}", e)),
        OutputFormat::Yaml => serde_yaml::to_string(items)
            .map(|s| s.trim_end().to_string())
            .map_err(|e| format!("Failed to serialize to YAML: {}", e)),
    }
}
