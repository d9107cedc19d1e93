use anyhow::Result;
use rustyline::error::ReadlineError;
use std::io::{self, BufRead, Write};

/// Reads one form field at a time. `Ok(None)` means the user closed input.
pub trait FieldPrompter {
    fn read_field(&mut self, label: &str, initial: &str) -> Result<Option<String>>;

    fn notify(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

pub struct EditorPrompter {
    editor: rustyline::DefaultEditor,
}

impl EditorPrompter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: rustyline::DefaultEditor::new()?,
        })
    }
}

impl FieldPrompter for EditorPrompter {
    fn read_field(&mut self, label: &str, initial: &str) -> Result<Option<String>> {
        match self.editor.readline_with_initial(label, (initial, "")) {
            Ok(line) => {
                let value = line.trim();
                if !value.is_empty() {
                    let _ = self.editor.add_history_entry(value);
                }
                Ok(Some(value.to_string()))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// Line-based fallback when stdin or stdout is not a terminal. An empty line
/// takes the pre-filled value.
pub struct StdioPrompter;

impl StdioPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdioPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldPrompter for StdioPrompter {
    fn read_field(&mut self, label: &str, initial: &str) -> Result<Option<String>> {
        if initial.is_empty() {
            print!("{label}");
        } else {
            print!("{label}[{initial}] ");
        }
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let value = line.trim();
        if value.is_empty() {
            return Ok(Some(initial.to_string()));
        }
        Ok(Some(value.to_string()))
    }
}
