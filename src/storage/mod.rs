//! # Storage Layer
//!
//! File-backed lists with one element per line.
//!
//! ## Layers
//!
//! | Type | Elements | Role |
//! |------|----------|------|
//! | [`ListFile`] | `String` | Owns the lines and the backing file |
//! | [`TypedListFile`] | any `T` | Encodes values through a [`LineCodec`] and delegates to a [`ListFile`] |
//!
//! ## Flush Modes
//!
//! - [`FlushMode::Auto`] - every mutation rewrites the file before returning
//! - [`FlushMode::Deferred`] - mutations set a dirty flag; [`ListFile::flush`]
//!   or [`ListFile::close`] (also run on drop) writes the file
//!
//! `clear` deletes the backing file instead of truncating it.
//!
//! ## File Format
//!
//! ```text
//! first element
//! second element
//!
//! fourth element (third was empty)
//! ```
//!
//! Lines are not escaped: a value containing a line break becomes several
//! elements when the file is read back. Use [`JsonCodec`] for such values.
//!
//! ## Concurrency
//!
//! None. One list instance owns its file; other writers are not detected.

mod config;
mod error;
mod list_file;
mod typed;

pub use config::{Config, ConfigError, OutputFormat};
pub use error::{BoxError, ListFileError, Result};
pub use list_file::{FlushMode, Iter, ListFile, LINE_ENDING};
pub use typed::{DisplayCodec, FnCodec, JsonCodec, LineCodec, TypedListFile};
