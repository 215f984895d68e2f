// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Configuration layout.
//!
//! Specify the layout for the configuration file that dirsketch uses to
//! simplify the process of serialization and deserialization. File I/O is left
//! to the caller to figure out.
//!
//! # General Layout
//!
//! ```toml
//! [settings]
//! output = "project_structure.txt"
//! update_gitignore = true
//!
//! [exclude]
//! dirs = ["logs"]
//! files = ["*.lock"]
//!
//! [gitignore]
//! entries = ["scratch/"]
//! ```
//!
//! Every table and field is optional. Command line arguments always take
//! precedence over whatever the configuration file says.

use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Error as FmtError, Formatter, Result as FmtResult},
    path::PathBuf,
    str::FromStr,
};

/// Default name of the rendered tree file.
pub const DEFAULT_OUTPUT: &str = "project_structure.txt";

/// Configuration file layout.
#[derive(Default, Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub settings: Settings,

    /// Additional exclusions on top of the baseline.
    pub exclude: ExcludeSettings,

    /// Additional entries to keep in the ignore file.
    pub gitignore: GitignoreSettings,
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let mut config: Config = toml::de::from_str(data).map_err(ConfigError::Deserialize)?;

        // INVARIANT: Perform shell expansion on output path.
        if let Some(output) = config.settings.output.take() {
            let expanded = shellexpand::full(output.to_string_lossy().as_ref())
                .map_err(ConfigError::ShellExpansion)?
                .into_owned();
            config.settings.output = Some(PathBuf::from(expanded));
        }

        Ok(config)
    }
}

impl Display for Config {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.write_str(
            toml::ser::to_string_pretty(self)
                .map_err(ConfigError::Serialize)?
                .as_str(),
        )
    }
}

/// General settings.
#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Path of the rendered tree file, relative to the project root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Whether the ignore file should be updated at all.
    pub update_gitignore: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output: None,
            update_gitignore: true,
        }
    }
}

impl Settings {
    /// Output path to use, falling back to [`DEFAULT_OUTPUT`].
    pub fn output_or_default(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }
}

/// Additional exclusions.
#[derive(Default, Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExcludeSettings {
    /// Directory names or patterns to exclude.
    pub dirs: Vec<String>,

    /// File names or patterns to exclude.
    pub files: Vec<String>,
}

/// Additional ignore file entries.
#[derive(Default, Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GitignoreSettings {
    /// Entries to keep in the ignore file.
    pub entries: Vec<String>,
}

/// Configuration error types.
#[derive(Clone, Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error(transparent)]
    Deserialize(#[from] toml::de::Error),

    /// Failed to serialize configuration.
    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),

    /// Failed to perform shell expansion on configuration.
    #[error(transparent)]
    ShellExpansion(#[from] shellexpand::LookupError<std::env::VarError>),
}

impl From<ConfigError> for FmtError {
    fn from(_: ConfigError) -> Self {
        FmtError
    }
}
