// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Ignore file maintenance.
//!
//! Utilities to make sure that a set of entries is present in the ignore file
//! at the top-level of a project.
//!
//! # Append-Only Updates
//!
//! The ignore file belongs to the user. Thus, existing lines are never
//! altered, removed, or reordered. Missing entries are appended at the end of
//! the file as one block, sorted by name, and separated from any existing
//! content by a blank line.
//!
//! Membership is decided by exact line match after trimming surrounding
//! whitespace. Blank lines and comment lines never count as entries. A line is
//! a comment only if `#` is its very first character, so an indented `#foo`
//! is an entry like any other.
//!
//! # Concurrency
//!
//! No locking is performed. Two runs racing on the same ignore file may
//! interleave their appended blocks.

use crate::exclude::IGNORE_FILE_NAME;

use std::{
    collections::{BTreeSet, HashSet},
    fs::{read_to_string, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, info, instrument};

/// Manage entries of an ignore file.
#[derive(Clone, Debug)]
pub struct IgnoreFile {
    ignore_path: PathBuf,
}

impl IgnoreFile {
    /// Construct new ignore file manager for project root.
    ///
    /// Does not create the ignore file.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            ignore_path: root.as_ref().join(IGNORE_FILE_NAME),
        }
    }

    /// Path to managed ignore file.
    pub fn path(&self) -> &Path {
        self.ignore_path.as_path()
    }

    /// List entries currently in ignore file.
    ///
    /// A missing ignore file has no entries.
    ///
    /// # Errors
    ///
    /// - Return [`GitignoreError::Read`] if ignore file exists, but cannot be
    ///   read.
    pub fn existing_entries(&self) -> Result<HashSet<String>> {
        Ok(self
            .read_content()?
            .map(|content| parse_entries(&content))
            .unwrap_or_default())
    }

    /// Append entries that are not yet present in ignore file.
    ///
    /// Creates the ignore file if it does not exist yet.
    ///
    /// # Errors
    ///
    /// - Return [`GitignoreError::Read`] if ignore file exists, but cannot be
    ///   read.
    /// - Return [`GitignoreError::Write`] if new entries cannot be appended.
    #[instrument(skip(self, entries), level = "debug")]
    pub fn append_missing(
        &self,
        entries: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<AppendOutcome> {
        let content = self.read_content()?.unwrap_or_default();
        let mut edit = IgnoreEdit::from(content.as_str());
        edit.request_entries(entries);

        let missing = edit.missing_entries();
        if missing.is_empty() {
            debug!("no missing entries for {:?}", self.ignore_path.display());
            return Ok(AppendOutcome::Unchanged);
        }

        let mut block = String::new();
        if !content.is_empty() {
            // INVARIANT: Never glue first new entry onto an unterminated line.
            if !content.ends_with('\n') {
                block.push('\n');
            }
            block.push('\n');
        }
        for entry in &missing {
            block.push_str(entry);
            block.push('\n');
        }

        let write_error = |err| GitignoreError::Write {
            source: err,
            ignore_path: self.ignore_path.clone(),
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.ignore_path)
            .map_err(write_error)?;
        file.write_all(block.as_bytes()).map_err(write_error)?;

        info!(
            "append {} entries to {:?}: {}",
            missing.len(),
            self.ignore_path.display(),
            missing.join(", ")
        );

        Ok(AppendOutcome::Added(missing.len()))
    }

    fn read_content(&self) -> Result<Option<String>> {
        match read_to_string(&self.ignore_path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(GitignoreError::Read {
                source: err,
                ignore_path: self.ignore_path.clone(),
            }),
        }
    }
}

/// Result of appending entries to an ignore file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Every requested entry was already present.
    Unchanged,

    /// Number of entries appended.
    Added(usize),
}

/// Ignore entry set difference.
///
/// # Invariant
///
/// - Existing entries are never modified.
/// - Requested entries already present are never reported as missing.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IgnoreEdit {
    existing: HashSet<String>,
    requested: BTreeSet<String>,
}

impl IgnoreEdit {
    /// Construct new empty ignore edit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request an entry to be present.
    pub fn request_entry(&mut self, entry: impl Into<String>) {
        let entry = entry.into();
        let entry = entry.trim();
        if !entry.is_empty() {
            self.requested.insert(entry.to_string());
        }
    }

    /// Request a listing of entries to be present.
    pub fn request_entries(&mut self, entries: impl IntoIterator<Item = impl Into<String>>) {
        for entry in entries {
            self.request_entry(entry);
        }
    }

    /// Requested entries that are not present yet, sorted by name.
    pub fn missing_entries(&self) -> Vec<String> {
        self.requested
            .iter()
            .filter(|entry| !self.existing.contains(*entry))
            .cloned()
            .collect()
    }
}

impl From<&str> for IgnoreEdit {
    fn from(content: &str) -> Self {
        Self {
            existing: parse_entries(content),
            requested: BTreeSet::new(),
        }
    }
}

impl From<String> for IgnoreEdit {
    fn from(content: String) -> Self {
        Self::from(content.as_str())
    }
}

fn parse_entries(content: &str) -> HashSet<String> {
    // INVARIANT: Only a `#` in the first column starts a comment.
    content
        .lines()
        .filter(|line| !line.starts_with('#'))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Ignore file management error types.
#[derive(Debug, thiserror::Error)]
pub enum GitignoreError {
    /// Ignore file cannot be read from.
    #[error("failed to read from ignore file at {:?}", ignore_path.display())]
    Read {
        #[source]
        source: std::io::Error,
        ignore_path: PathBuf,
    },

    /// Ignore file cannot be written to.
    #[error("failed to write to ignore file at {:?}", ignore_path.display())]
    Write {
        #[source]
        source: std::io::Error,
        ignore_path: PathBuf,
    },
}

/// Friendly result alias :3
pub type Result<T, E = GitignoreError> = std::result::Result<T, E>;
