//! Reference host, REPL, CLI, and save files for brickfilter.
//!
//! This crate provides:
//! - [`LocalHost`] - An in-memory world with a selection and clipboard
//! - [`Repl`] - Interactive read-eval-print loop
//! - [`RuntimeConfig`] - Session settings shared by the REPL and CLI
//! - Save file serialization using `MessagePack`

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod editor;
mod highlight;
pub mod host;
pub mod repl;
pub mod serialize;

pub use config::RuntimeConfig;
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use host::{ConfirmPolicy, LocalHost, Prompter};
pub use repl::{Repl, ReplError, Step};
pub use serialize::{SAVE_VERSION, SaveFile, from_bytes, load_from_file, save_to_file, to_bytes};
