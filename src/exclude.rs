// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Exclusion rules for directory walks.
//!
//! An __exclusion set__ decides which directory entries never show up in a
//! rendered tree. It is built once per run from a baseline listing of common
//! dependency, build, cache, and editor metadata directories, unioned with
//! whatever the caller supplies.
//!
//! # Names and Patterns
//!
//! Each exclusion is either an exact entry name, e.g., "node_modules", or a
//! glob pattern, e.g., "*.lock". Any exclusion containing `*`, `?`, or `[` is
//! treated as a glob pattern. Patterns are matched against the bare entry
//! name, never against the full path.
//!
//! # Hidden Entries
//!
//! Entries whose name begins with a dot are always hidden, with the single
//! exception of the ignore file itself.

use glob::Pattern;
use std::collections::BTreeSet;

/// Canonical name of the ignore file that stays visible in rendered trees.
pub const IGNORE_FILE_NAME: &str = ".gitignore";

/// Directory names excluded from every walk.
pub const BASELINE_DIRS: &[&str] = &[
    "node_modules",
    "target",
    "build",
    "dist",
    "__pycache__",
    "venv",
    "env",
    ".git",
    ".idea",
    ".vscode",
    ".mypy_cache",
    ".pytest_cache",
    ".tox",
    ".cache",
    "coverage",
];

/// Set of excluded directory and file names.
#[derive(Debug, Default, Clone)]
pub struct ExclusionSet {
    dirs: Rules,
    files: Rules,
}

impl ExclusionSet {
    /// Construct exclusion set from explicit directory and file listings.
    ///
    /// # Errors
    ///
    /// - Return [`ExcludeError::Pattern`] if any glob pattern is malformed.
    pub fn new(
        dirs: impl IntoIterator<Item = impl Into<String>>,
        files: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self> {
        let mut set = Self::default();
        set.dirs.extend(dirs)?;
        set.files.extend(files)?;

        Ok(set)
    }

    /// Construct exclusion set holding only the baseline directory names.
    pub fn baseline() -> Self {
        let mut set = Self::default();
        for name in BASELINE_DIRS {
            set.dirs.names.insert((*name).to_string());
        }

        set
    }

    /// Union additional directory exclusions into the set.
    ///
    /// # Errors
    ///
    /// - Return [`ExcludeError::Pattern`] if any glob pattern is malformed.
    pub fn with_dirs(mut self, dirs: impl IntoIterator<Item = impl Into<String>>) -> Result<Self> {
        self.dirs.extend(dirs)?;
        Ok(self)
    }

    /// Union additional file exclusions into the set.
    ///
    /// # Errors
    ///
    /// - Return [`ExcludeError::Pattern`] if any glob pattern is malformed.
    pub fn with_files(
        mut self,
        files: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self> {
        self.files.extend(files)?;
        Ok(self)
    }

    /// Check if directory name is excluded.
    pub fn excludes_dir(&self, name: &str) -> bool {
        self.dirs.matches(name)
    }

    /// Check if file name is excluded.
    pub fn excludes_file(&self, name: &str) -> bool {
        self.files.matches(name)
    }

    /// Decide whether an entry belongs in a rendered tree.
    pub fn admits(&self, name: &str, is_dir: bool) -> bool {
        if is_hidden(name) {
            return false;
        }

        if is_dir {
            !self.excludes_dir(name)
        } else {
            !self.excludes_file(name)
        }
    }
}

/// Check if entry name is hidden.
///
/// The ignore file is never considered hidden.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.') && name != IGNORE_FILE_NAME
}

#[derive(Debug, Default, Clone)]
struct Rules {
    names: BTreeSet<String>,
    patterns: Vec<Pattern>,
}

impl Rules {
    fn extend(&mut self, rules: impl IntoIterator<Item = impl Into<String>>) -> Result<()> {
        for rule in rules.into_iter().map(Into::into) {
            let rule = rule.trim().trim_end_matches('/').to_string();
            if rule.is_empty() {
                continue;
            }

            if is_glob(&rule) {
                let pattern = Pattern::new(&rule).map_err(|err| ExcludeError::Pattern {
                    source: err,
                    pattern: rule.clone(),
                })?;
                self.patterns.push(pattern);
            } else {
                self.names.insert(rule);
            }
        }

        Ok(())
    }

    fn matches(&self, name: &str) -> bool {
        self.names.contains(name) || self.patterns.iter().any(|pattern| pattern.matches(name))
    }
}

fn is_glob(rule: &str) -> bool {
    rule.contains(['*', '?', '['])
}

/// Exclusion set error types.
#[derive(Debug, thiserror::Error)]
pub enum ExcludeError {
    /// Glob pattern cannot be compiled.
    #[error("invalid exclusion pattern {pattern:?}")]
    Pattern {
        #[source]
        source: glob::PatternError,
        pattern: String,
    },
}

/// Friendly result alias :3
pub type Result<T, E = ExcludeError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use simple_test_case::test_case;

    #[test_case(".env", true; "dotfile is hidden")]
    #[test_case(".github", true; "dot directory is hidden")]
    #[test_case(".gitignore", false; "ignore file stays visible")]
    #[test_case(".gitignore.bak", true; "ignore file lookalike is hidden")]
    #[test_case("src", false; "plain name is visible")]
    #[test]
    fn hidden_entries(name: &str, expect: bool) {
        assert_eq!(is_hidden(name), expect);
    }

    #[test_case("node_modules", true; "dependency directory")]
    #[test_case("target", true; "build directory")]
    #[test_case("__pycache__", true; "cache directory")]
    #[test_case("src", false; "source directory")]
    #[test]
    fn baseline_excludes_dirs(name: &str, expect: bool) {
        let set = ExclusionSet::baseline();
        assert_eq!(set.excludes_dir(name), expect);
    }

    #[test]
    fn baseline_does_not_exclude_files_named_like_dirs() {
        let set = ExclusionSet::baseline();
        assert!(set.admits("build", false));
        assert!(!set.admits("build", true));
    }

    #[test]
    fn additions_union_with_baseline() -> anyhow::Result<()> {
        let set = ExclusionSet::baseline()
            .with_dirs(["logs", "tmp/"])?
            .with_files(["Cargo.lock"])?;

        assert!(set.excludes_dir("logs"));
        assert!(set.excludes_dir("tmp"));
        assert!(set.excludes_dir("target"));
        assert!(set.excludes_file("Cargo.lock"));
        assert!(!set.excludes_file("Cargo.toml"));

        Ok(())
    }

    #[test]
    fn glob_patterns_match_entry_names() -> anyhow::Result<()> {
        let set = ExclusionSet::new(["*.egg-info"], ["*.lock", "?.tmp"])?;

        assert!(set.excludes_dir("dirsketch.egg-info"));
        assert!(set.excludes_file("Cargo.lock"));
        assert!(set.excludes_file("a.tmp"));
        assert!(!set.excludes_file("ab.tmp"));
        assert!(!set.excludes_file("lockfile"));

        Ok(())
    }

    #[test]
    fn malformed_glob_pattern_is_rejected() {
        let result = ExclusionSet::new(["[unclosed"], Vec::<String>::new());
        assert!(matches!(result, Err(ExcludeError::Pattern { .. })));
    }

    #[test]
    fn blank_exclusions_are_skipped() -> anyhow::Result<()> {
        let set = ExclusionSet::new(["", "  "], [""])?;
        assert!(set.admits("anything", true));
        assert!(set.admits("anything", false));

        Ok(())
    }
}
