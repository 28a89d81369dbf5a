//! Line-per-element list storage
//!
//! A [`ListFile`] keeps an ordered list of strings in memory and mirrors it
//! to a text file, one element per line. The whole file is loaded when the
//! list is opened. Writes either happen after every mutation
//! ([`FlushMode::Auto`]) or are batched until [`ListFile::flush`] or
//! [`ListFile::close`] ([`FlushMode::Deferred`]).

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::ops::Index;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::error::{ListFileError, Result};

/// Line separator used when writing the backing file
pub const LINE_ENDING: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Borrowing iterator over the lines of a [`ListFile`]
pub type Iter<'a> = std::iter::Map<std::slice::Iter<'a, String>, fn(&String) -> &str>;

/// When mutations reach the backing file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlushMode {
    /// Every mutating call rewrites the file before returning
    #[default]
    Auto,
    /// Mutations only mark the list dirty; `flush` or `close` writes the file
    Deferred,
}

impl FlushMode {
    /// Maps the `auto_flush` boolean used in configuration
    pub fn from_auto_flush(auto_flush: bool) -> Self {
        if auto_flush {
            FlushMode::Auto
        } else {
            FlushMode::Deferred
        }
    }

    pub fn is_auto(self) -> bool {
        self == FlushMode::Auto
    }
}

/// A list of strings mirrored line-by-line to a file
#[derive(Debug)]
pub struct ListFile {
    path: PathBuf,
    lines: Vec<String>,
    mode: FlushMode,
    dirty: bool,

    /// `clear` was called since the last flush (deferred mode only)
    cleared: bool,
}

impl ListFile {
    /// Opens the list at `path` in auto-flush mode
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with(path, FlushMode::Auto)
    }

    /// Opens the list at `path`, loading every line if the file exists.
    ///
    /// A missing file is not an error: the list simply starts empty and the
    /// file is created by the first write. `\n`, `\r\n` and a lone `\r` all
    /// end a line; a final line break does not add an empty element.
    pub fn open_with(path: impl Into<PathBuf>, mode: FlushMode) -> Result<Self> {
        let path = path.into();

        let lines = match fs::read_to_string(&path) {
            Ok(content) => split_lines(&content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(ListFileError::io("reading", &path, e)),
        };

        debug!(path = %path.display(), lines = lines.len(), ?mode, "opened list file");

        Ok(Self {
            path,
            lines,
            mode,
            dirty: false,
            cleared: false,
        })
    }

    /// Returns the path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn flush_mode(&self) -> FlushMode {
        self.mode
    }

    /// Returns true if there are mutations the file does not reflect yet.
    ///
    /// Always false in auto-flush mode.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the line at `index`
    pub fn get(&self, index: usize) -> Result<&str> {
        self.lines
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Replaces the line at `index` in memory only.
    ///
    /// Neither writes the file nor marks the list dirty; use
    /// [`set_element`](Self::set_element) for a persisted update.
    pub fn set(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
        let len = self.lines.len();
        let slot = self
            .lines
            .get_mut(index)
            .ok_or(ListFileError::IndexOutOfRange { index, len })?;
        *slot = value.into();
        Ok(())
    }

    /// Appends a line
    pub fn add(&mut self, item: impl Into<String>) -> Result<()> {
        self.lines.push(item.into());
        self.changed()
    }

    /// Inserts a line at `index`; `index == len()` appends
    pub fn insert(&mut self, index: usize, item: impl Into<String>) -> Result<()> {
        if index > self.lines.len() {
            return Err(self.out_of_range(index));
        }
        self.lines.insert(index, item.into());
        self.changed()
    }

    /// Removes the first line equal to `item`, returning whether one was found.
    ///
    /// In auto-flush mode the file is rewritten even when nothing matched.
    pub fn remove(&mut self, item: &str) -> Result<bool> {
        let removed = match self.index_of(item) {
            Some(index) => {
                self.lines.remove(index);
                true
            }
            None => false,
        };

        match self.mode {
            FlushMode::Auto => self.write_all()?,
            FlushMode::Deferred => self.dirty |= removed,
        }

        Ok(removed)
    }

    /// Removes and returns the line at `index`
    pub fn remove_at(&mut self, index: usize) -> Result<String> {
        if index >= self.lines.len() {
            return Err(self.out_of_range(index));
        }
        let removed = self.lines.remove(index);
        self.changed()?;
        Ok(removed)
    }

    /// Removes every line.
    ///
    /// In auto-flush mode the backing file is deleted rather than truncated.
    /// In deferred mode the next flush deletes it, unless lines were added
    /// again in the meantime.
    pub fn clear(&mut self) -> Result<()> {
        self.lines.clear();

        match self.mode {
            FlushMode::Auto => self.delete_file(),
            FlushMode::Deferred => {
                self.dirty = true;
                self.cleared = true;
                Ok(())
            }
        }
    }

    pub fn contains(&self, item: &str) -> bool {
        self.lines.iter().any(|line| line == item)
    }

    /// Returns the position of the first line equal to `item`
    pub fn index_of(&self, item: &str) -> Option<usize> {
        self.lines.iter().position(|line| line == item)
    }

    /// Persisted set-or-extend.
    ///
    /// Within bounds the line is replaced, and nothing is written when the
    /// value is unchanged. Past the end the list is padded with empty lines
    /// up to `index` and `value` is appended. An index too large to allocate
    /// fails with [`ListFileError::IndexOutOfRange`] and leaves the list as is.
    pub fn set_element(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
        let value = value.into();

        if let Some(current) = self.lines.get_mut(index) {
            if *current == value {
                return Ok(());
            }
            *current = value;
            return self.changed();
        }

        let additional = (index - self.lines.len())
            .checked_add(1)
            .ok_or_else(|| self.out_of_range(index))?;
        if self.lines.try_reserve(additional).is_err() {
            return Err(self.out_of_range(index));
        }

        self.lines.resize(index, String::new());
        self.lines.push(value);
        self.changed()
    }

    /// Writes the current lines to the file, whatever the flush mode
    pub fn flush(&mut self) -> Result<()> {
        if self.cleared && self.lines.is_empty() {
            self.delete_file()?;
        } else {
            self.write_all()?;
        }

        self.cleared = false;
        self.dirty = false;
        Ok(())
    }

    /// Flushes pending deferred changes. Calling it again is a no-op.
    ///
    /// Dropping the list does the same, but can only log a failure.
    pub fn close(&mut self) -> Result<()> {
        if self.mode == FlushMode::Deferred && self.dirty {
            self.flush()?;
        }
        Ok(())
    }

    /// Iterates over the lines in file order
    pub fn iter(&self) -> Iter<'_> {
        self.lines.iter().map(String::as_str as fn(&String) -> &str)
    }

    fn out_of_range(&self, index: usize) -> ListFileError {
        ListFileError::IndexOutOfRange {
            index,
            len: self.lines.len(),
        }
    }

    /// Applies the flush policy after a mutation
    fn changed(&mut self) -> Result<()> {
        match self.mode {
            FlushMode::Auto => self.write_all(),
            FlushMode::Deferred => {
                self.dirty = true;
                Ok(())
            }
        }
    }

    /// Rewrites the whole file (temp file + rename)
    fn write_all(&mut self) -> Result<()> {
        let temp_path = temp_path_for(&self.path);

        let written = self.write_lines_to(&temp_path).and_then(|()| {
            fs::rename(&temp_path, &self.path)
                .map_err(|e| ListFileError::io("replacing", &self.path, e))
        });

        if let Err(err) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(err);
        }

        debug!(path = %self.path.display(), lines = self.lines.len(), "rewrote list file");
        Ok(())
    }

    fn write_lines_to(&self, target: &Path) -> Result<()> {
        let file = File::create(target).map_err(|e| ListFileError::io("creating", target, e))?;
        let mut writer = BufWriter::new(file);

        for line in &self.lines {
            write!(writer, "{}{}", line, LINE_ENDING)
                .map_err(|e| ListFileError::io("writing", target, e))?;
        }

        writer
            .flush()
            .map_err(|e| ListFileError::io("writing", target, e))
    }

    fn delete_file(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "deleted list file"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(ListFileError::io("deleting", &self.path, e)),
        }
        Ok(())
    }
}

impl Index<usize> for ListFile {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.lines[index]
    }
}

impl<'a> IntoIterator for &'a ListFile {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl Drop for ListFile {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            warn!(path = %self.path.display(), error = %err, "failed to flush list file on drop");
        }
    }
}

/// Splits file content into lines, accepting `\n`, `\r\n` and `\r`
fn split_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = content;

    while !rest.is_empty() {
        match rest.find(|c| c == '\n' || c == '\r') {
            Some(end) => {
                lines.push(rest[..end].to_owned());
                let skip = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[end + skip..];
            }
            None => {
                lines.push(rest.to_owned());
                break;
            }
        }
    }

    lines
}

/// Sibling temp file used for whole-file rewrites
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
