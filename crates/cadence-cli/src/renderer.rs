//! Terminal rendering module for rich markdown output
//!
//! This module renders markdown through termimad, with plain text and JSON
//! line fallbacks for pipes and scripts.

use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;
use termimad::{crossterm::style::Color, MadSkin};

/// How output is written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Styled markdown
    Rich,
    /// Markdown as-is
    Plain,
    /// One JSON document per line
    Json,
}

impl OutputMode {
    pub fn from_flags(no_color: bool, json: bool) -> Self {
        match (json, no_color) {
            (true, _) => OutputMode::Json,
            (false, true) => OutputMode::Plain,
            (false, false) => OutputMode::Rich,
        }
    }
}

/// Terminal renderer that switches between rich, plain and JSON output
pub struct TerminalRenderer {
    mode: OutputMode,
    skin: MadSkin,
}

impl TerminalRenderer {
    /// Create a new terminal renderer
    pub fn new(mode: OutputMode) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_fg(Color::DarkGrey);

        Self { mode, skin }
    }

    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Render markdown text to the terminal.
    ///
    /// Markdown is dropped in JSON mode so stdout stays machine-readable.
    pub fn render(&self, markdown: &str) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();

        match self.mode {
            OutputMode::Json => return Ok(()),
            OutputMode::Plain => write!(out, "{markdown}")?,
            OutputMode::Rich => {
                for line in markdown.lines() {
                    if line.starts_with('#') {
                        // termimad hides the hashes; keep them visible
                        writeln!(out, "\x1b[34m{line}\x1b[0m")?;
                    } else if line.contains("(⟳ Running)") {
                        writeln!(out, "\x1b[1;33m{line}\x1b[0m")?;
                    } else {
                        writeln!(out, "{}", self.skin.inline(line))?;
                    }
                }
            }
        }

        out.flush().context("Failed to flush stdout")
    }

    /// Render a value as a single JSON line. Ignored outside JSON mode.
    pub fn render_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        if !self.is_json() {
            return Ok(());
        }

        let line = serde_json::to_string(value).context("Failed to serialize output")?;
        let stdout = io::stdout();
        let mut out = stdout.lock();
        writeln!(out, "{line}")?;
        out.flush().context("Failed to flush stdout")
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(OutputMode::Rich)
    }
}
