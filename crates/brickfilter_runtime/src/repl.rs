//! The main REPL implementation.
//!
//! Plain lines are commands run against the [`LocalHost`]. Lines starting
//! with `:` are meta commands that manage the world, the selection, and the
//! viewer.

use std::io::{self, BufRead, Write};
use std::path::Path;

use brickfilter_engine::{Registry, Viewer, run};
use brickfilter_foundation::Error;
use brickfilter_storage::{Bounds, Rgb};

use crate::config::RuntimeConfig;
use crate::editor::{LineEditor, ReadResult, RustylineEditor, open_parens};
use crate::host::{ConfirmPolicy, LocalHost};
use crate::serialize::{load_from_file, save_to_file};

/// A failure while handling one REPL line.
#[derive(Debug, thiserror::Error)]
pub enum ReplError {
    /// The command or file operation failed.
    #[error(transparent)]
    Command(#[from] Error),

    /// A meta command was used incorrectly.
    #[error("usage: {0}")]
    Usage(&'static str),

    /// An unrecognised meta command.
    #[error("unknown meta command '{0}' (try :help)")]
    UnknownMeta(String),
}

impl ReplError {
    /// Renders the error for the terminal, with a caret under parse errors.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Command(Error::Parse(e)) => format!("{e}\n{}", e.render()),
            other => other.to_string(),
        }
    }
}

/// Result type for REPL lines.
pub type ReplResult<T> = std::result::Result<T, ReplError>;

/// What a line asked the loop to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Print these lines and read the next one.
    Continue(Vec<String>),
    /// Leave the loop.
    Quit,
}

const HELP: &str = "\
Commands:  [all] <filters...> [replace|copy|delete|count|extract] <transforms...>
           e.g.  mat(glow) pos(z, >2br) replace color(255, 0, 0)
Meta:
  :load <file>               Replace the world with a save file
  :save <file>               Save the world
  :select x1 y1 z1 x2 y2 z2  Select the bricks inside a box
  :deselect                  Clear the selection
  :yaw <degrees>             Set the viewer's facing
  :paint r g b               Set the viewer's paint color
  :paste                     Add the clipboard to the world
  :clipboard save <file>     Save the clipboard
  :stats                     Show world, selection, and clipboard
  :help                      Show this help
  :quit                      Exit";

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// The world, selection, and viewer state.
    host: LocalHost,

    /// Functions available to commands.
    registry: Registry,

    /// The viewer issuing commands.
    viewer: Viewer,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Primary prompt.
    prompt: String,

    /// Continuation prompt (for multi-line input).
    continuation_prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a REPL with the default rustyline editor.
    ///
    /// Unless `assume_yes` is set, world-wide destructive commands ask for
    /// confirmation on stdin.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(config: &RuntimeConfig) -> Result<Self, Error> {
        let editor = RustylineEditor::new()?;
        let mut repl = Self::with_editor(editor, config);
        if !config.assume_yes {
            repl.host = std::mem::take(&mut repl.host).with_confirm(ConfirmPolicy::Ask(Box::new(
                |prompt| {
                    print!("{prompt} [y/N] ");
                    let _ = io::stdout().flush();
                    let mut answer = String::new();
                    match io::stdin().lock().read_line(&mut answer) {
                        Ok(n) if n > 0 => Some(answer),
                        _ => None,
                    }
                },
            )));
        }
        Ok(repl)
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a REPL with the given editor.
    pub fn with_editor(mut editor: E, config: &RuntimeConfig) -> Self {
        let registry = Registry::builtin();
        let mut keywords = crate::editor::default_keywords();
        keywords.extend(registry.names().into_iter().map(String::from));
        editor.set_keywords(keywords);

        Self {
            editor,
            host: LocalHost::new(config),
            registry,
            viewer: Viewer::new("local"),
            show_banner: true,
            prompt: "bf> ".to_string(),
            continuation_prompt: ".. ".to_string(),
        }
    }

    /// Sets the host for this REPL.
    #[must_use]
    pub fn with_host(mut self, host: LocalHost) -> Self {
        self.host = host;
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the primary prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns the host.
    #[must_use]
    pub const fn host(&self) -> &LocalHost {
        &self.host
    }

    /// Returns the host mutably.
    pub fn host_mut(&mut self) -> &mut LocalHost {
        &mut self.host
    }

    /// Runs the REPL loop.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails.
    pub fn run(&mut self) -> Result<(), Error> {
        if self.show_banner {
            self.print_banner();
        }

        while let Some(input) = self.read_input()? {
            let trimmed = input.trim();
            if trimmed.is_empty() {
                continue;
            }
            self.editor.add_history(trimmed);

            match self.eval(trimmed) {
                Ok(Step::Continue(lines)) => {
                    for line in lines {
                        println!("{line}");
                    }
                }
                Ok(Step::Quit) => break,
                Err(e) => eprintln!("\x1b[31mError: {}\x1b[0m", e.render()),
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// Reads a potentially multi-line input. `None` means end of input.
    fn read_input(&mut self) -> Result<Option<String>, Error> {
        let mut input = String::new();
        let mut first_line = true;

        loop {
            let prompt = if first_line {
                &self.prompt
            } else {
                &self.continuation_prompt
            };

            match self.editor.read_line(prompt)? {
                ReadResult::Line(line) => {
                    if !first_line {
                        input.push(' ');
                    }
                    input.push_str(&line);
                    if open_parens(&input) <= 0 {
                        return Ok(Some(input));
                    }
                    first_line = false;
                }
                ReadResult::Interrupted => {
                    if !first_line {
                        println!("\nInput cancelled.");
                    }
                    return Ok(Some(String::new()));
                }
                ReadResult::Eof if first_line => return Ok(None),
                // A half-typed command at end of input is still run, so the
                // parser reports what is missing.
                ReadResult::Eof => return Ok(Some(input)),
            }
        }
    }

    /// Evaluates one line.
    ///
    /// # Errors
    ///
    /// Returns command errors, file errors, and meta command misuse.
    pub fn eval(&mut self, line: &str) -> ReplResult<Step> {
        let line = line.trim();
        if let Some(meta) = line.strip_prefix(':') {
            return self.eval_meta(meta);
        }
        run(&self.registry, &mut self.host, &self.viewer, line)?;
        Ok(Step::Continue(self.host.drain_messages()))
    }

    fn eval_meta(&mut self, meta: &str) -> ReplResult<Step> {
        let mut words = meta.split_whitespace();
        let name = words.next().unwrap_or_default().to_lowercase();
        let args: Vec<&str> = words.collect();

        let output = match (name.as_str(), args.as_slice()) {
            ("quit" | "exit" | "q", []) => return Ok(Step::Quit),
            ("help" | "h", []) => HELP.to_string(),
            ("load", [path]) => {
                let count = self.load_world(Path::new(path), false)?;
                format!("loaded {count} bricks")
            }
            ("load", _) => return Err(ReplError::Usage(":load <file>")),
            ("save", [path]) => {
                save_to_file(self.host.world(), path)?;
                format!("saved {} bricks", self.host.world().len())
            }
            ("save", _) => return Err(ReplError::Usage(":save <file>")),
            ("select", coords) => {
                let region = parse_region(coords)?;
                self.host.select(region);
                let selected = self.host.world().select(&region).len();
                format!("selected {selected} bricks")
            }
            ("deselect", []) => {
                self.host.deselect();
                "selection cleared".to_string()
            }
            ("yaw", [degrees]) => {
                let yaw = degrees
                    .parse()
                    .map_err(|_| ReplError::Usage(":yaw <degrees>"))?;
                self.host.set_yaw(yaw);
                format!("yaw set to {yaw}")
            }
            ("yaw", _) => return Err(ReplError::Usage(":yaw <degrees>")),
            ("paint", rgb) => {
                let color = parse_rgb(rgb)?;
                self.host.set_paint(color);
                format!("paint set to {}, {}, {}", color[0], color[1], color[2])
            }
            ("paste", []) => format!("pasted {} bricks", self.host.paste()),
            ("clipboard", ["save", path]) => {
                save_to_file(self.host.clipboard(), path)?;
                format!("saved {} clipboard bricks", self.host.clipboard().len())
            }
            ("clipboard", _) => return Err(ReplError::Usage(":clipboard save <file>")),
            ("stats", []) => self.stats(),
            _ => return Err(ReplError::UnknownMeta(name.clone())),
        };
        Ok(Step::Continue(vec![output]))
    }

    /// Loads a save into the world, replacing it or appending to it.
    /// Returns how many bricks were read.
    ///
    /// # Errors
    ///
    /// Returns file and format errors.
    pub fn load_world(&mut self, path: &Path, append: bool) -> Result<usize, Error> {
        let set = load_from_file(path)?;
        let count = set.len();
        if append {
            let mut world = self.host.world().clone();
            world.append(set);
            self.host.set_world(world);
        } else {
            self.host.set_world(set);
        }
        Ok(count)
    }

    fn stats(&self) -> String {
        let world = self.host.world();
        let selection = self.host.selection().map_or_else(
            || "none".to_string(),
            |r| format!("{} bricks in {:?} to {:?}", world.select(&r).len(), r.min, r.max),
        );
        let paint = self
            .host
            .paint()
            .map_or_else(|| "none".to_string(), |c| format!("{}, {}, {}", c[0], c[1], c[2]));
        format!(
            "world: {} bricks, {} materials, {} owners\nselection: {selection}\nclipboard: {} bricks\nyaw: {}\npaint: {paint}",
            world.len(),
            world.tables.materials.len(),
            world.tables.owners.len(),
            self.host.clipboard().len(),
            self.host.yaw(),
        )
    }

    /// Prints the welcome banner.
    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!("\x1b[1;36mbrickfilter\x1b[0m v{}", env!("CARGO_PKG_VERSION"));
        println!("Type a command, or :help. Use Ctrl+D to exit.\n");
        let _ = io::stdout().flush();
    }
}

fn parse_region(coords: &[&str]) -> ReplResult<Bounds> {
    const USAGE: &str = ":select x1 y1 z1 x2 y2 z2";
    let numbers = coords
        .iter()
        .map(|c| c.parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| ReplError::Usage(USAGE))?;
    match numbers.as_slice() {
        &[x1, y1, z1, x2, y2, z2] => Ok(Bounds::from_corners([x1, y1, z1], [x2, y2, z2])),
        _ => Err(ReplError::Usage(USAGE)),
    }
}

fn parse_rgb(parts: &[&str]) -> ReplResult<Rgb> {
    const USAGE: &str = ":paint r g b";
    match parts {
        [r, g, b] => {
            let channel = |s: &str| s.parse::<u8>().map_err(|_| ReplError::Usage(USAGE));
            Ok([channel(r)?, channel(g)?, channel(b)?])
        }
        _ => Err(ReplError::Usage(USAGE)),
    }
}
