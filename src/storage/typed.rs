//! Typed view over a [`ListFile`]
//!
//! [`TypedListFile`] converts values to lines on the way in and back on the
//! way out through a [`LineCodec`]. Every operation is one conversion plus
//! the matching [`ListFile`] call, so flush behavior and failure modes are
//! exactly those of the underlying list.
//!
//! Equality is decided on the encoded line: two values that encode to the
//! same text are the same element as far as `contains`, `index_of` and
//! `remove` are concerned.

use std::fmt::Display;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::{BoxError, ListFileError, Result};
use super::list_file::{FlushMode, ListFile};

/// Converts between values and single lines of text
pub trait LineCodec<T> {
    fn encode(&self, value: &T) -> Result<String>;
    fn decode(&self, line: &str) -> Result<T>;
}

/// Default codec: [`Display`] to write, [`FromStr`] to read
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayCodec;

impl<T> LineCodec<T> for DisplayCodec
where
    T: Display + FromStr,
    T::Err: Into<BoxError>,
{
    fn encode(&self, value: &T) -> Result<String> {
        Ok(value.to_string())
    }

    fn decode(&self, line: &str) -> Result<T> {
        line.parse::<T>()
            .map_err(|e| ListFileError::conversion::<T>(line, e))
    }
}

/// Codec built from a pair of caller-supplied functions
#[derive(Clone, Copy)]
pub struct FnCodec<S, D> {
    serialize: S,
    deserialize: D,
}

impl<S, D> FnCodec<S, D> {
    pub fn new(serialize: S, deserialize: D) -> Self {
        Self {
            serialize,
            deserialize,
        }
    }
}

impl<T, S, D> LineCodec<T> for FnCodec<S, D>
where
    S: Fn(&T) -> String,
    D: Fn(&str) -> std::result::Result<T, BoxError>,
{
    fn encode(&self, value: &T) -> Result<String> {
        Ok((self.serialize)(value))
    }

    fn decode(&self, line: &str) -> Result<T> {
        (self.deserialize)(line).map_err(|e| ListFileError::conversion::<T>(line, e))
    }
}

/// Stores each value as one compact JSON document per line
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl<T> LineCodec<T> for JsonCodec
where
    T: Serialize + DeserializeOwned,
{
    fn encode(&self, value: &T) -> Result<String> {
        serde_json::to_string(value).map_err(ListFileError::serialize::<T>)
    }

    fn decode(&self, line: &str) -> Result<T> {
        serde_json::from_str(line).map_err(|e| ListFileError::conversion::<T>(line, e))
    }
}

/// A [`ListFile`] holding values of type `T`
pub struct TypedListFile<T, C = DisplayCodec> {
    store: ListFile,
    codec: C,
    _marker: PhantomData<fn() -> T>,
}

impl<T> TypedListFile<T>
where
    DisplayCodec: LineCodec<T>,
{
    /// Opens `path` in auto-flush mode with the [`DisplayCodec`]
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with(path, FlushMode::Auto)
    }

    pub fn open_with(path: impl Into<PathBuf>, mode: FlushMode) -> Result<Self> {
        Self::with_codec(path, mode, DisplayCodec)
    }
}

impl<T, S, D> TypedListFile<T, FnCodec<S, D>>
where
    S: Fn(&T) -> String,
    D: Fn(&str) -> std::result::Result<T, BoxError>,
{
    /// Opens `path` with a serialize/deserialize function pair
    pub fn with_fns(
        path: impl Into<PathBuf>,
        mode: FlushMode,
        serialize: S,
        deserialize: D,
    ) -> Result<Self> {
        Self::with_codec(path, mode, FnCodec::new(serialize, deserialize))
    }
}

impl<T, C> TypedListFile<T, C>
where
    C: LineCodec<T>,
{
    pub fn with_codec(path: impl Into<PathBuf>, mode: FlushMode, codec: C) -> Result<Self> {
        Ok(Self::from_store(ListFile::open_with(path, mode)?, codec))
    }

    /// Wraps an already open list
    pub fn from_store(store: ListFile, codec: C) -> Self {
        Self {
            store,
            codec,
            _marker: PhantomData,
        }
    }

    /// Returns the underlying list
    pub fn into_inner(self) -> ListFile {
        self.store
    }

    pub fn store(&self) -> &ListFile {
        &self.store
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }

    pub fn flush_mode(&self) -> FlushMode {
        self.store.flush_mode()
    }

    pub fn is_dirty(&self) -> bool {
        self.store.is_dirty()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Decodes the element at `index`
    pub fn get(&self, index: usize) -> Result<T> {
        self.codec.decode(self.store.get(index)?)
    }

    /// Replaces the element at `index` in memory only (see [`ListFile::set`])
    pub fn set(&mut self, index: usize, value: &T) -> Result<()> {
        let line = self.codec.encode(value)?;
        self.store.set(index, line)
    }

    pub fn add(&mut self, value: &T) -> Result<()> {
        let line = self.codec.encode(value)?;
        self.store.add(line)
    }

    pub fn insert(&mut self, index: usize, value: &T) -> Result<()> {
        let line = self.codec.encode(value)?;
        self.store.insert(index, line)
    }

    /// Removes the first element whose encoded line matches `value`
    pub fn remove(&mut self, value: &T) -> Result<bool> {
        let line = self.codec.encode(value)?;
        self.store.remove(&line)
    }

    pub fn remove_at(&mut self, index: usize) -> Result<()> {
        self.store.remove_at(index).map(drop)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.store.clear()
    }

    pub fn contains(&self, value: &T) -> Result<bool> {
        let line = self.codec.encode(value)?;
        Ok(self.store.contains(&line))
    }

    pub fn index_of(&self, value: &T) -> Result<Option<usize>> {
        let line = self.codec.encode(value)?;
        Ok(self.store.index_of(&line))
    }

    /// Persisted set-or-extend (see [`ListFile::set_element`])
    pub fn set_element(&mut self, index: usize, value: &T) -> Result<()> {
        let line = self.codec.encode(value)?;
        self.store.set_element(index, line)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.store.flush()
    }

    pub fn close(&mut self) -> Result<()> {
        self.store.close()
    }

    /// Decodes elements lazily; a malformed line only fails when reached
    pub fn iter(&self) -> impl Iterator<Item = Result<T>> + '_ {
        self.store.iter().map(move |line| self.codec.decode(line))
    }
}
