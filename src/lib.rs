//! listfile - A list of strings mirrored line-by-line to a text file
//!
//! [`ListFile`] keeps the lines in memory and writes them through to disk,
//! either after every mutation or on an explicit flush. [`TypedListFile`]
//! layers typed values on top through a pluggable [`LineCodec`].

pub mod storage;
pub mod cli;

pub use storage::{
    DisplayCodec, FlushMode, FnCodec, JsonCodec, LineCodec, ListFile, ListFileError,
    TypedListFile,
};
