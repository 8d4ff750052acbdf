//! Syntax highlighting for the REPL.

use std::borrow::Cow;
use std::iter::Peekable;
use std::str::Chars;

use brickfilter_foundation::boolean_word;
use brickfilter_language::Operation;

/// Highlighter for brickfilter commands and meta commands.
pub struct CommandHighlighter;

fn take_while(chars: &mut Peekable<Chars<'_>>, out: &mut String, pred: impl Fn(char) -> bool) {
    while let Some(next) = chars.next_if(|&c| pred(c)) {
        out.push(next);
    }
}

fn paint(out: &mut String, color: &str, text: &str) {
    if color.is_empty() {
        out.push_str(text);
    } else {
        out.push_str(color);
        out.push_str(text);
        out.push_str("\x1b[0m");
    }
}

impl CommandHighlighter {
    /// Creates a new highlighter.
    pub const fn new() -> Self {
        Self
    }

    /// Highlight a line of input.
    #[allow(clippy::unused_self)]
    pub fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.trim_start().starts_with(':') {
            return Cow::Owned(format!("\x1b[36m{line}\x1b[0m"));
        }

        let mut result = String::with_capacity(line.len() * 2);
        let mut chars = line.chars().peekable();
        let mut first_word = true;

        while let Some(c) = chars.next() {
            match c {
                // Strings
                '"' => {
                    result.push_str("\x1b[33m"); // yellow
                    result.push(c);
                    while let Some(next) = chars.next() {
                        result.push(next);
                        if next == '\\' {
                            if let Some(escaped) = chars.next() {
                                result.push(escaped);
                            }
                        } else if next == '"' {
                            break;
                        }
                    }
                    result.push_str("\x1b[0m");
                }

                // Numbers with unit suffixes, and range operators
                c if c.is_ascii_digit() || c == '-' || c == '.' => {
                    let mut number = String::from(c);
                    take_while(&mut chars, &mut number, |n| {
                        n.is_ascii_alphanumeric() || n == '.'
                    });
                    paint(&mut result, "\x1b[35m", &number); // magenta
                }
                '<' | '>' | '=' => {
                    let mut op = String::from(c);
                    take_while(&mut chars, &mut op, |n| n == '=');
                    paint(&mut result, "\x1b[35m", &op);
                }

                '(' | ')' => paint(&mut result, "\x1b[1m", &c.to_string()),

                c if c.is_alphabetic() => {
                    let mut word = String::from(c);
                    take_while(&mut chars, &mut word, |n| {
                        n.is_alphanumeric() || n == '_' || n == '?' || n == '!'
                    });
                    let calls = chars.peek() == Some(&'(');
                    let color = if calls {
                        "\x1b[36m" // cyan
                    } else if Operation::from_keyword(&word).is_some()
                        || (first_word && word.eq_ignore_ascii_case("all"))
                    {
                        "\x1b[1;32m" // bold green
                    } else if boolean_word(&word).is_some() {
                        "\x1b[34m" // blue
                    } else {
                        ""
                    };
                    paint(&mut result, color, &word);
                }

                _ => result.push(c),
            }
            if !c.is_whitespace() {
                first_word = false;
            }
        }

        Cow::Owned(result)
    }
}

impl Default for CommandHighlighter {
    fn default() -> Self {
        Self::new()
    }
}
