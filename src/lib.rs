// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Sketch the layout of a project directory.
//!
//! Dirsketch walks a project directory, writes an ASCII tree of its contents
//! to a text file, and makes sure that the project's ignore file lists that
//! text file along with any other requested entries.
//!
//! # Components
//!
//! - [`tree`]: render the directory tree, filtered by an
//!   [`ExclusionSet`](exclude::ExclusionSet).
//! - [`gitignore`]: append missing entries to the ignore file without ever
//!   touching its existing lines.
//!
//! Both components run once per invocation, one after the other, and share
//! nothing besides the parameters they are handed.

pub mod config;
pub mod exclude;
pub mod gitignore;
pub mod path;
pub mod tree;

pub use config::Config;
pub use exclude::ExclusionSet;
pub use gitignore::{AppendOutcome, IgnoreFile};
pub use tree::{TreeRenderer, TreeStats};
