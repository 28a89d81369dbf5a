//! Property tests for the file mirroring rules
//!
//! Random sequences of list operations are replayed against a [`ListFile`]
//! and a plain `Vec<String>` model. After every step the file on disk must
//! match what the flush mode promises.

use std::fs;
use std::path::Path;

use listfile::storage::{FlushMode, ListFile, LINE_ENDING};
use proptest::prelude::*;
use tempfile::TempDir;

#[derive(Debug, Clone)]
enum Op {
    Add(String),
    Insert(usize, String),
    Remove(String),
    RemoveAt(usize),
    SetElement(usize, String),
    Set(usize, String),
    Clear,
    Flush,
}

fn value() -> impl Strategy<Value = String> {
    "[a-c ]{0,3}"
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        value().prop_map(Op::Add),
        (0usize..6, value()).prop_map(|(i, v)| Op::Insert(i, v)),
        value().prop_map(Op::Remove),
        (0usize..6).prop_map(Op::RemoveAt),
        (0usize..8, value()).prop_map(|(i, v)| Op::SetElement(i, v)),
        Just(Op::Clear),
        Just(Op::Flush),
    ]
}

/// Adds the memory-only `set`, which leaves the file behind until the next write
fn op_with_set() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => op(),
        1 => (0usize..6, value()).prop_map(|(i, v)| Op::Set(i, v)),
    ]
}

/// Returns whether `op` rewrites the file under auto-flush, given the lines before it
fn writes_file(op: &Op, before: &[String]) -> bool {
    match op {
        Op::Set(..) => false,
        Op::Insert(i, _) => *i <= before.len(),
        Op::RemoveAt(i) => *i < before.len(),
        Op::SetElement(i, v) => before.get(*i) != Some(v),
        _ => true,
    }
}

fn rendered(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| format!("{}{}", line, LINE_ENDING))
        .collect()
}

fn on_disk(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_default()
}

/// Applies `op` to both the list and the model, checking they agree
fn apply(list: &mut ListFile, model: &mut Vec<String>, op: &Op) {
    match op {
        Op::Add(v) => {
            list.add(v.as_str()).unwrap();
            model.push(v.clone());
        }
        Op::Insert(i, v) => {
            let result = list.insert(*i, v.as_str());
            if *i <= model.len() {
                result.unwrap();
                model.insert(*i, v.clone());
            } else {
                assert!(result.is_err());
            }
        }
        Op::Remove(v) => {
            let removed = list.remove(v).unwrap();
            let position = model.iter().position(|line| line == v);
            assert_eq!(removed, position.is_some());
            if let Some(position) = position {
                model.remove(position);
            }
        }
        Op::RemoveAt(i) => {
            let result = list.remove_at(*i);
            if *i < model.len() {
                assert_eq!(result.unwrap(), model.remove(*i));
            } else {
                assert!(result.is_err());
            }
        }
        Op::SetElement(i, v) => {
            list.set_element(*i, v.as_str()).unwrap();
            if *i < model.len() {
                model[*i] = v.clone();
            } else {
                model.resize(*i, String::new());
                model.push(v.clone());
            }
        }
        Op::Set(i, v) => {
            let result = list.set(*i, v.as_str());
            if *i < model.len() {
                result.unwrap();
                model[*i] = v.clone();
            } else {
                assert!(result.is_err());
            }
        }
        Op::Clear => {
            list.clear().unwrap();
            model.clear();
        }
        Op::Flush => list.flush().unwrap(),
    }

    assert_eq!(list.iter().collect::<Vec<_>>(), *model);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn auto_flush_file_tracks_every_step(ops in prop::collection::vec(op_with_set(), 1..24)) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.txt");
        let mut list = ListFile::open(&path).unwrap();
        let mut model: Vec<String> = Vec::new();
        let mut in_sync = true;

        for op in &ops {
            let wrote = writes_file(op, &model);
            apply(&mut list, &mut model, op);
            prop_assert!(!list.is_dirty());

            if let Op::Clear = op {
                prop_assert!(!path.exists());
            }
            if wrote {
                in_sync = true;
            } else if let Op::Set(..) = op {
                in_sync = false;
            }
            if in_sync {
                prop_assert_eq!(on_disk(&path), rendered(&model));
            }
        }

        list.clear().unwrap();
        prop_assert!(!path.exists());
    }

    #[test]
    fn deferred_file_only_changes_on_flush(ops in prop::collection::vec(op(), 1..24)) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.txt");
        let mut list = ListFile::open_with(&path, FlushMode::Deferred).unwrap();
        let mut model = Vec::new();
        let mut flushed: Vec<String> = Vec::new();

        for op in &ops {
            apply(&mut list, &mut model, op);
            if let Op::Flush = op {
                flushed = model.clone();
                prop_assert!(!list.is_dirty());
            }

            prop_assert_eq!(on_disk(&path), rendered(&flushed));
            if model != flushed {
                prop_assert!(list.is_dirty());
            }
        }

        list.close().unwrap();
        prop_assert!(!list.is_dirty());
        let after_close = on_disk(&path);
        list.close().unwrap();
        prop_assert_eq!(on_disk(&path), after_close);
    }

    #[test]
    fn reopening_reproduces_lines(lines in prop::collection::vec(value(), 0..12)) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.txt");

        {
            let mut list = ListFile::open_with(&path, FlushMode::Deferred).unwrap();
            for line in &lines {
                list.add(line.as_str()).unwrap();
            }
            list.flush().unwrap();
        }

        let reopened = ListFile::open(&path).unwrap();
        prop_assert_eq!(reopened.iter().collect::<Vec<_>>(), lines);
    }
}
