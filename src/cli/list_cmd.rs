//! List CLI commands

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;

use super::output::Output;
use crate::storage::{FlushMode, ListFile, TypedListFile};

#[derive(Subcommand)]
pub enum ListCommands {
    #[command(flatten)]
    Lines(LineCommands),

    /// Parse every line as a number and print the total
    Sum,
}

/// Commands that work on the raw lines
#[derive(Subcommand)]
pub enum LineCommands {
    /// Print every line with its index
    Show,

    /// Print the number of lines
    Count,

    /// Print the line at an index
    Get {
        /// Zero-based line index
        index: usize,
    },

    /// Append one or more lines
    ///
    /// Examples:
    ///   listfile todo.txt add "Buy milk"
    ///   listfile --deferred todo.txt add one two three   # single write
    Add {
        /// Lines to append
        #[arg(required = true)]
        values: Vec<String>,
    },

    /// Insert a line before an index (the line count appends)
    Insert {
        /// Zero-based position
        index: usize,

        /// Line to insert
        value: String,
    },

    /// Remove the first line equal to a value
    Remove {
        /// Line to remove
        value: String,
    },

    /// Remove the line at an index
    RemoveAt {
        /// Zero-based line index
        index: usize,
    },

    /// Set the line at an index, padding with empty lines if needed
    Set {
        /// Zero-based line index
        index: usize,

        /// New value
        value: String,
    },

    /// Remove every line and delete the file
    Clear,

    /// Check whether a line exists
    Contains {
        /// Line to look for
        value: String,
    },

    /// Print the index of the first line equal to a value
    IndexOf {
        /// Line to look for
        value: String,
    },
}

/// Opens the list, runs the command and closes the list on every path
pub fn run(cmd: ListCommands, path: &Path, mode: FlushMode, output: &Output) -> Result<()> {
    let cmd = match cmd {
        ListCommands::Sum => return sum(path, mode, output),
        ListCommands::Lines(cmd) => cmd,
    };

    let mut list = ListFile::open_with(path, mode)
        .with_context(|| format!("Failed to open list: {}", path.display()))?;
    output.verbose_ctx("open", &format!("Loaded {} line(s)", list.len()));

    let result = execute(cmd, &mut list, output);
    let closed = list
        .close()
        .with_context(|| format!("Failed to write list: {}", path.display()));

    result?;
    closed
}

fn execute(cmd: LineCommands, list: &mut ListFile, output: &Output) -> Result<()> {
    match cmd {
        LineCommands::Show => show(list, output),
        LineCommands::Count => {
            if output.is_json() {
                output.data(&serde_json::json!({ "count": list.len() }));
            } else {
                println!("{}", list.len());
            }
        }
        LineCommands::Get { index } => {
            let value = list.get(index)?;
            if output.is_json() {
                output.data(&serde_json::json!({ "index": index, "value": value }));
            } else {
                println!("{}", value);
            }
        }
        LineCommands::Add { values } => {
            let count = values.len();
            for value in values {
                output.verbose_ctx("add", &format!("Appending '{}'", value));
                list.add(value)?;
            }
            output.success(&format!("Added {} line(s)", count));
        }
        LineCommands::Insert { index, value } => {
            list.insert(index, value)?;
            output.success(&format!("Inserted line at {}", index));
        }
        LineCommands::Remove { value } => {
            let removed = list.remove(&value)?;
            if output.is_json() {
                output.data(&serde_json::json!({ "removed": removed, "value": value }));
            } else if removed {
                println!("Removed '{}'", value);
            } else {
                println!("Not found: '{}'", value);
            }
        }
        LineCommands::RemoveAt { index } => {
            let removed = list.remove_at(index)?;
            output.success(&format!("Removed line {}: {}", index, removed));
        }
        LineCommands::Set { index, value } => {
            list.set_element(index, value)?;
            output.success(&format!("Set line {}", index));
        }
        LineCommands::Clear => {
            list.clear()?;
            output.success(&format!("Cleared {}", list.path().display()));
        }
        LineCommands::Contains { value } => {
            let found = list.contains(&value);
            if output.is_json() {
                output.data(&serde_json::json!({ "contains": found, "value": value }));
            } else {
                println!("{}", found);
            }
        }
        LineCommands::IndexOf { value } => {
            let index = list.index_of(&value);
            if output.is_json() {
                output.data(&serde_json::json!({ "index": index, "value": value }));
            } else {
                match index {
                    Some(index) => println!("{}", index),
                    None => println!("Not found: '{}'", value),
                }
            }
        }
    }

    Ok(())
}

fn show(list: &ListFile, output: &Output) {
    if output.is_json() {
        let lines: Vec<&str> = list.iter().collect();
        output.data(&lines);
        return;
    }

    if list.is_empty() {
        println!("(empty)");
        return;
    }

    for (index, line) in list.iter().enumerate() {
        output.row(&[index.to_string().as_str(), line]);
    }
}

/// Reads the list as numbers; the first malformed line aborts
fn sum(path: &Path, mode: FlushMode, output: &Output) -> Result<()> {
    let mut numbers = TypedListFile::<f64>::open_with(path, mode)
        .with_context(|| format!("Failed to open list: {}", path.display()))?;

    let mut total = 0.0;
    for (index, value) in numbers.iter().enumerate() {
        total += value.with_context(|| format!("Line {} is not a number", index))?;
    }
    output.verbose_ctx("sum", &format!("Summed {} line(s)", numbers.len()));

    if output.is_json() {
        output.data(&serde_json::json!({ "count": numbers.len(), "sum": total }));
    } else {
        println!("{}", total);
    }

    numbers.close()?;
    Ok(())
}
