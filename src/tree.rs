// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! ASCII tree rendering.
//!
//! Walk a directory depth-first, and draw each admitted entry on its own line
//! behind the standard tree glyphs. The first line is always the base name of
//! the root directory followed by a slash.
//!
//! # Layout
//!
//! ```text
//! project/
//! ├── .gitignore
//! ├── src
//! │   ├── lib.rs
//! │   └── main.rs
//! └── README.md
//! ```
//!
//! Children are sorted by name within each directory. Every sibling except the
//! last is drawn with a branch connector, and the last one gets a corner. Each
//! nesting level adds four columns of indentation: a vertical continuation if
//! the parent still has siblings below it, blank space otherwise.
//!
//! A directory that cannot be listed due to insufficient permission is drawn
//! with a single placeholder child, and the walk carries on elsewhere.

use crate::{exclude::ExclusionSet, path::normalized_absolute};

use std::{
    ffi::OsString,
    fs::{read_dir, File},
    io::{BufWriter, ErrorKind, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, instrument, warn};

/// Connector for a sibling that is followed by more siblings.
pub const BRANCH: &str = "├── ";

/// Connector for the last sibling of a directory.
pub const CORNER: &str = "└── ";

/// Indentation below a sibling that is followed by more siblings.
pub const CONTINUATION: &str = "│   ";

/// Indentation below the last sibling of a directory.
pub const BLANK: &str = "    ";

/// Placeholder drawn for directories that cannot be listed.
pub const PERMISSION_DENIED: &str = "[Permission Denied]";

/// Render directory trees as ASCII art.
#[derive(Debug, Default, Clone)]
pub struct TreeRenderer {
    exclusions: ExclusionSet,
}

impl TreeRenderer {
    /// Construct new tree renderer that filters entries through exclusion set.
    pub fn new(exclusions: ExclusionSet) -> Self {
        Self { exclusions }
    }

    /// Render tree of root directory into output file.
    ///
    /// Creates any missing parent directory of the output file. Previous
    /// content of the output file is truncated.
    ///
    /// # Errors
    ///
    /// - Return [`TreeError::CreateOutput`] if output file cannot be opened
    ///   for writing.
    /// - Return [`TreeError::ReadDir`] if a directory cannot be listed for
    ///   any reason other than insufficient permission.
    /// - Return [`TreeError::Write`] if writing to output file fails.
    #[instrument(skip(self, root, output), level = "debug")]
    pub fn write_to_file(&self, root: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<TreeStats> {
        let output = output.as_ref();
        let create_error = |err| TreeError::CreateOutput {
            source: err,
            output_path: output.to_path_buf(),
        };

        if let Some(parent) = output.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            mkdirp::mkdirp(parent).map_err(create_error)?;
        }
        let file = File::create(output).map_err(create_error)?;

        let mut writer = BufWriter::new(file);
        let stats = self.render(root, &mut writer)?;
        writer.flush().map_err(TreeError::Write)?;

        Ok(stats)
    }

    /// Render tree of root directory into writer.
    ///
    /// # Errors
    ///
    /// - Return [`TreeError::ReadDir`] if a directory cannot be listed for
    ///   any reason other than insufficient permission.
    /// - Return [`TreeError::Write`] if writing to writer fails.
    pub fn render(&self, root: impl AsRef<Path>, writer: &mut impl Write) -> Result<TreeStats> {
        let root = root.as_ref();
        debug!("render tree of {:?}", root.display());

        let mut stats = TreeStats::default();
        writeln!(writer, "{}/", root_display_name(root))?;
        self.render_dir(root, "", writer, &mut stats)?;

        Ok(stats)
    }

    fn render_dir(
        &self,
        dir: &Path,
        prefix: &str,
        writer: &mut impl Write,
        stats: &mut TreeStats,
    ) -> Result<()> {
        let entries = match self.list_entries(dir) {
            Ok(entries) => entries,
            Err(TreeError::ReadDir { source, .. })
                if source.kind() == ErrorKind::PermissionDenied =>
            {
                warn!("permission denied while listing {:?}", dir.display());
                stats.denied += 1;
                writeln!(writer, "{prefix}{CORNER}{PERMISSION_DENIED}")?;
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        let count = entries.len();
        for (index, entry) in entries.into_iter().enumerate() {
            let is_last = index + 1 == count;
            let connector = if is_last { CORNER } else { BRANCH };
            writeln!(writer, "{prefix}{connector}{}", entry.name.to_string_lossy())?;

            if entry.is_dir {
                stats.dirs += 1;
                let extension = if is_last { BLANK } else { CONTINUATION };
                self.render_dir(&entry.path, &format!("{prefix}{extension}"), writer, stats)?;
            } else {
                stats.files += 1;
            }
        }

        Ok(())
    }

    // INVARIANT: Filter after sorting so the last admitted entry gets the corner.
    fn list_entries(&self, dir: &Path) -> Result<Vec<TreeEntry>> {
        let read_error = |err| TreeError::ReadDir {
            source: err,
            dir_path: dir.to_path_buf(),
        };

        let mut entries = Vec::new();
        for entry in read_dir(dir).map_err(read_error)? {
            let entry = entry.map_err(read_error)?;
            let path = entry.path();
            entries.push(TreeEntry {
                name: entry.file_name(),
                is_dir: path.is_dir(),
                path,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(entries
            .into_iter()
            .filter(|entry| {
                self.exclusions
                    .admits(entry.name.to_string_lossy().as_ref(), entry.is_dir)
            })
            .collect())
    }
}

/// Counts of what a render drew.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    /// Directories drawn.
    pub dirs: usize,

    /// Files drawn.
    pub files: usize,

    /// Directories that could not be listed.
    pub denied: usize,
}

impl TreeStats {
    /// Total number of entry lines drawn below the root line.
    pub fn entries(&self) -> usize {
        self.dirs + self.files
    }
}

#[derive(Debug)]
struct TreeEntry {
    name: OsString,
    path: PathBuf,
    is_dir: bool,
}

/// Determine name to display on the first line of a rendered tree.
///
/// Uses base name of absolute root path with `.` and `..` folded away. Falls
/// back to root path as given if it has no base name, i.e., a file system
/// root.
pub fn root_display_name(root: &Path) -> String {
    normalized_absolute(root)
        .ok()
        .as_deref()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.to_string_lossy().into_owned())
}

/// Tree rendering error types.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// Output file cannot be opened for writing.
    #[error("failed to open {:?} for writing", output_path.display())]
    CreateOutput {
        #[source]
        source: std::io::Error,
        output_path: PathBuf,
    },

    /// Directory cannot be listed.
    #[error("failed to list directory {:?}", dir_path.display())]
    ReadDir {
        #[source]
        source: std::io::Error,
        dir_path: PathBuf,
    },

    /// Rendered lines cannot be written.
    #[error("failed to write rendered tree")]
    Write(#[from] std::io::Error),
}

/// Friendly result alias :3
pub type Result<T, E = TreeError> = std::result::Result<T, E>;
