//! # Command-Line Interface
//!
//! A thin front end that opens one list file, runs one command against it
//! and closes it again.
//!
//! ## Commands
//!
//! | Group | Commands |
//! |-------|----------|
//! | Read | `show`, `count`, `get`, `contains`, `index-of`, `sum` |
//! | Write | `add`, `insert`, `remove`, `remove-at`, `set`, `clear` |
//!
//! ## Flush Policy
//!
//! Writes go to disk after every change unless `--deferred` is given (or
//! `auto_flush = false` is configured), in which case the file is written
//! once when the command finishes:
//! ```bash
//! listfile --deferred todo.txt add one two three
//! ```
//!
//! ## Output Formats
//!
//! All commands support `--format text|json`. Use `--verbose` (or `-v`)
//! for progress messages and debug logging on stderr.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod list_cmd;
mod output;

pub use app::{run, Cli};
pub use list_cmd::ListCommands;
pub use output::{Output, OutputFormat};
