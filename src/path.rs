// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Path resolution utilities.
//!
//! Determine relevent path information for the project root, the rendered tree
//! file, and the configuration file.

use std::path::{Component, Path, PathBuf};

/// Determine default absolute path to configuration file.
///
/// Uses XDG Base Directory path `$XDG_CONFIG_HOME/dirsketch/config.toml` as
/// the default absolute path for the configuration file. Does not check if the
/// path returned actually exists.
///
/// # Errors
///
/// - Return [`PathError::NoWayHome`] if configuration directory path cannot
///   be determined.
///
/// # See Also
///
/// - [XDG Base Directory](https://wiki.archlinux.org/title/XDG_Base_Directory)
pub fn default_config_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|path| path.join("dirsketch").join("config.toml"))
        .ok_or(PathError::NoWayHome)
}

/// Resolve absolute path to project root directory.
///
/// # Errors
///
/// - Return [`PathError::Absolute`] if absolute path cannot be determined.
/// - Return [`PathError::MissingRoot`] if path is not an existing directory.
pub fn resolve_root(path: impl AsRef<Path>) -> Result<PathBuf> {
    let root = normalized_absolute(path.as_ref()).map_err(|err| PathError::Absolute {
        source: err,
        path: path.as_ref().to_path_buf(),
    })?;

    if !root.is_dir() {
        return Err(PathError::MissingRoot { root_path: root });
    }

    Ok(root)
}

/// Make path absolute, and lexically fold away `.` and `..` components.
///
/// Symbolic links are not resolved. A `..` at the file system root stays at
/// the root.
///
/// # Errors
///
/// - Return [`std::io::Error`] if the current directory cannot be determined
///   for a relative path.
pub fn normalized_absolute(path: impl AsRef<Path>) -> std::io::Result<PathBuf> {
    let absolute = std::path::absolute(path.as_ref())?;

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => continue,
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    Ok(normalized)
}

/// Determine ignore file entry for rendered tree file.
///
/// Entry is the output path relative to project root joined by forward
/// slashes. Returns `None` if output path does not live inside project root.
pub fn ignore_entry_for(root: impl AsRef<Path>, output: impl AsRef<Path>) -> Option<String> {
    let relative = output.as_ref().strip_prefix(root.as_ref()).ok()?;

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => continue,
            _ => return None,
        }
    }

    if parts.is_empty() {
        return None;
    }

    Some(parts.join("/"))
}

/// Path resolution error types.
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    /// No way to determine user's configuration directory.
    ///
    /// # See Also
    ///
    /// - [`dirs::config_dir`](https://docs.rs/dirs/latest/dirs/fn.config_dir.html)
    #[error("cannot determine absolute path to user's configuration directory")]
    NoWayHome,

    /// Absolute form of path cannot be determined.
    #[error("cannot determine absolute path of {:?}", path.display())]
    Absolute {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// Project root is not an existing directory.
    #[error("the directory {:?} does not exist", root_path.display())]
    MissingRoot { root_path: PathBuf },
}

/// Friendly result alias :3
pub type Result<T, E = PathError> = std::result::Result<T, E>;
