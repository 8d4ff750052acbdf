//! Line editor abstraction for the REPL.
//!
//! This module provides a trait-based abstraction over line editing libraries,
//! allowing the REPL to use rustyline while remaining swappable.

use std::borrow::Cow;

use brickfilter_foundation::{Error, Result};
use brickfilter_language::Operation;
use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::HistoryHinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Completer, Config, Context, Editor, Helper, Hinter, Validator as RLValidator};

use crate::highlight::CommandHighlighter;

/// Meta commands understood by the REPL.
pub const META_COMMANDS: &[&str] = &[
    ":load",
    ":save",
    ":select",
    ":deselect",
    ":yaw",
    ":paint",
    ":paste",
    ":clipboard",
    ":stats",
    ":help",
    ":quit",
];

/// Result of reading a line from the editor.
#[derive(Debug)]
pub enum ReadResult {
    /// A line was successfully read.
    Line(String),
    /// User pressed Ctrl+C.
    Interrupted,
    /// User pressed Ctrl+D (EOF).
    Eof,
}

/// Abstraction over line editing functionality.
///
/// This trait allows swapping out the underlying line editor implementation
/// (e.g., from rustyline to reedline) without changing the REPL code.
pub trait LineEditor {
    /// Read a line with the given prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the terminal fails.
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult>;

    /// Add a line to history.
    fn add_history(&mut self, line: &str);

    /// Set available completions for function names.
    fn set_keywords(&mut self, keywords: Vec<String>);
}

/// Helper for rustyline that provides completion, hints, highlighting, and validation.
#[derive(Helper, Completer, Hinter, RLValidator)]
struct CommandHelper {
    #[rustyline(Completer)]
    completer: CommandCompleter,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
    #[rustyline(Validator)]
    validator: ParenValidator,
    highlighter: CommandHighlighter,
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Cow::Owned(format!("\x1b[1;32m{prompt}\x1b[0m"))
        } else {
            Cow::Borrowed(prompt)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[2m{hint}\x1b[0m"))
    }
}

/// Completer for function names, keywords, meta commands, and file paths.
struct CommandCompleter {
    file_completer: FilenameCompleter,
    keywords: Vec<String>,
}

impl CommandCompleter {
    fn new() -> Self {
        Self {
            file_completer: FilenameCompleter::new(),
            keywords: default_keywords(),
        }
    }
}

/// Operation keywords, `all`, and meta commands.
#[must_use]
pub fn default_keywords() -> Vec<String> {
    let mut keywords: Vec<String> = Operation::ALL
        .iter()
        .map(|op| op.keyword().to_string())
        .collect();
    keywords.push("all".to_string());
    keywords.extend(META_COMMANDS.iter().map(ToString::to_string));
    keywords
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        // File arguments of :load, :save and :clipboard save
        if line.starts_with(":load ") || line.starts_with(":save ") || line.starts_with(":clipboard ")
        {
            return self.file_completer.complete(line, pos, ctx);
        }

        let start = line[..pos]
            .rfind(|c: char| c.is_whitespace() || "(,".contains(c))
            .map_or(0, |i| i + 1);
        let word = line[start..pos].to_lowercase();

        let candidates: Vec<Pair> = self
            .keywords
            .iter()
            .filter(|kw| kw.starts_with(&word))
            .map(|kw| Pair {
                display: kw.clone(),
                replacement: kw.clone(),
            })
            .collect();

        Ok((start, candidates))
    }
}

/// Returns how many parentheses are left open, ignoring quoted text.
#[must_use]
pub fn open_parens(input: &str) -> i32 {
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escape_next = false;

    for c in input.chars() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '(' if !in_string => depth += 1,
            ')' if !in_string => depth -= 1,
            _ => {}
        }
    }

    depth
}

/// Validator for parenthesis matching (enables multi-line input).
#[derive(Default)]
struct ParenValidator;

impl Validator for ParenValidator {
    fn validate(&self, ctx: &mut ValidationContext<'_>) -> rustyline::Result<ValidationResult> {
        if open_parens(ctx.input()) > 0 {
            Ok(ValidationResult::Incomplete)
        } else {
            Ok(ValidationResult::Valid(None))
        }
    }
}

fn editor_error(e: impl std::fmt::Display) -> Error {
    Error::IoError(e.to_string())
}

/// Line editor implementation using rustyline.
pub struct RustylineEditor {
    editor: Editor<CommandHelper, DefaultHistory>,
}

impl RustylineEditor {
    /// Creates a new rustyline-based editor.
    ///
    /// # Errors
    ///
    /// Returns an error if rustyline initialization fails.
    pub fn new() -> Result<Self> {
        let config = Config::builder()
            .auto_add_history(false)
            .max_history_size(1000)
            .map_err(editor_error)?
            .build();

        let helper = CommandHelper {
            completer: CommandCompleter::new(),
            hinter: HistoryHinter::new(),
            validator: ParenValidator,
            highlighter: CommandHighlighter::new(),
        };

        let mut editor = Editor::with_config(config).map_err(editor_error)?;
        editor.set_helper(Some(helper));

        Ok(Self { editor })
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadResult::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadResult::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadResult::Eof),
            Err(e) => Err(editor_error(e)),
        }
    }

    fn add_history(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }

    fn set_keywords(&mut self, keywords: Vec<String>) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.completer.keywords = keywords;
        }
    }
}
