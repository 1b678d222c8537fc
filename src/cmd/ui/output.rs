//! Structured output for the logbook CLI.
//!
//! Three modes:
//! - Human: coloured, symbol-prefixed lines for a terminal
//! - Json: one JSON object per line
//! - Quiet: errors only
//!
//! Colour is applied only when stdout is a TTY. A custom writer can be
//! injected for test capture.

use colored::{Color, Colorize};
use serde_json::{json, Value};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable coloured output with status symbols
    Human,
    /// One JSON object per line for scripting
    Json,
    /// Errors only
    Quiet,
}

impl OutputMode {
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if json {
            OutputMode::Json
        } else if quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Human
        }
    }
}

#[derive(Clone)]
pub struct Output {
    mode: OutputMode,
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
    is_tty: bool,
}

impl Output {
    /// Create a new Output writing to stdout
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            writer: Arc::new(Mutex::new(Box::new(io::stdout()))),
            is_tty: atty::is(atty::Stream::Stdout),
        }
    }

    /// Create an Output with a custom writer (for testing)
    pub fn with_writer(mode: OutputMode, writer: Box<dyn Write + Send>) -> Self {
        Self {
            mode,
            writer: Arc::new(Mutex::new(writer)),
            is_tty: false,
        }
    }

    /// "✓ {msg}" in green
    pub fn success(&self, msg: &str) {
        self.prefixed("✓", Color::Green, "success", msg);
    }

    /// "⚠ {msg}" in yellow
    pub fn warn(&self, msg: &str) {
        self.prefixed("⚠", Color::Yellow, "warning", msg);
    }

    /// "✗ {msg}" in red. Printed in every mode.
    pub fn error(&self, tag: &str, msg: &str) {
        match self.mode {
            OutputMode::Json => self.json(&json!({
                "level": "error",
                "error": tag,
                "msg": msg,
            })),
            OutputMode::Human | OutputMode::Quiet => {
                self.write_line(&format!("{} {}", self.paint("✗", Color::Red), msg))
            }
        }
    }

    /// Plain text line, no prefix
    pub fn info(&self, msg: &str) {
        match self.mode {
            OutputMode::Human => self.write_line(msg),
            OutputMode::Json => self.json(&json!({ "level": "info", "msg": msg })),
            OutputMode::Quiet => {}
        }
    }

    /// Indented "label: value" line under a heading
    pub fn field(&self, label: &str, value: &str) {
        if self.mode == OutputMode::Human {
            let label = format!("{}:", label);
            let label = if self.is_tty {
                label.dimmed().to_string()
            } else {
                label
            };
            self.write_line(&format!("  {:<22} {}", label, value));
        }
    }

    /// Human text, or a JSON document in json mode.
    pub fn data(&self, human: &str, value: &Value) {
        match self.mode {
            OutputMode::Human => self.write_line(human),
            OutputMode::Json => self.json(value),
            OutputMode::Quiet => {}
        }
    }

    /// Write a JSON value as one line
    pub fn json(&self, value: &Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", value);
        }
    }

    /// Colour `text` when writing to a terminal.
    pub fn paint(&self, text: &str, color: Color) -> String {
        if self.is_tty {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn prefixed(&self, symbol: &str, color: Color, level: &str, msg: &str) {
        match self.mode {
            OutputMode::Human => {
                self.write_line(&format!("{} {}", self.paint(symbol, color), msg))
            }
            OutputMode::Json => self.json(&json!({ "level": level, "msg": msg })),
            OutputMode::Quiet => {}
        }
    }

    fn write_line(&self, line: &str) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
        }
    }
}
