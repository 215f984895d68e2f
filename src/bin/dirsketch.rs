// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use dirsketch::{
    config::Config,
    exclude::ExclusionSet,
    gitignore::{AppendOutcome, IgnoreFile},
    path::{default_config_path, ignore_entry_for, resolve_root},
    tree::TreeRenderer,
};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::{fs::read_to_string, path::PathBuf, process::exit};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Write an ASCII tree of a project folder, and keep it out of version control.
#[derive(Debug, Clone, Parser)]
#[command(
    about,
    override_usage = "dirsketch [options] [root_dir]",
    version
)]
struct Cli {
    /// Root directory of the project.
    #[arg(value_name = "root_dir", default_value = ".")]
    pub root_dir: PathBuf,

    /// Output text file, relative to root directory.
    #[arg(short, long, value_name = "file")]
    pub output: Option<PathBuf>,

    /// Additional directory names or patterns to exclude.
    #[arg(short, long, value_name = "name", num_args = 0..)]
    pub exclude: Vec<String>,

    /// Additional file names or patterns to exclude.
    #[arg(long, value_name = "name", num_args = 0..)]
    pub exclude_file: Vec<String>,

    /// Path to configuration file.
    #[arg(short, long, value_name = "path")]
    pub config: Option<PathBuf>,

    /// Leave ignore file untouched.
    #[arg(long)]
    pub no_gitignore: bool,
}

impl Cli {
    fn run(self) -> Result<()> {
        let config = load_config(self.config.as_ref())?;

        let root = resolve_root(&self.root_dir)?;
        let output_name = self
            .output
            .clone()
            .unwrap_or_else(|| config.settings.output_or_default());
        let output = root.join(&output_name);

        let extra_dirs = config
            .exclude
            .dirs
            .iter()
            .chain(self.exclude.iter())
            .cloned()
            .collect::<Vec<_>>();
        let extra_files = config
            .exclude
            .files
            .iter()
            .chain(self.exclude_file.iter())
            .cloned()
            .collect::<Vec<_>>();
        let exclusions = ExclusionSet::baseline()
            .with_dirs(extra_dirs.iter().cloned())?
            .with_files(extra_files.iter().cloned())?;

        let mut failures = 0;

        if output.is_file() {
            warn!(
                "existing {:?} found and will be overwritten",
                output_name.display()
            );
        }

        match TreeRenderer::new(exclusions).write_to_file(&root, &output) {
            Ok(stats) => {
                info!(
                    "project structure written to {:?} ({} directories, {} files)",
                    output.display(),
                    stats.dirs,
                    stats.files
                );
                if stats.denied > 0 {
                    warn!("{} directories could not be listed", stats.denied);
                }
            }
            Err(err) => {
                error!("{:?}", anyhow::Error::from(err));
                failures += 1;
            }
        }

        if self.no_gitignore || !config.settings.update_gitignore {
            debug!("skip ignore file update");
        } else {
            let mut entries = Vec::new();
            entries.extend(ignore_entry_for(&root, &output));
            entries.extend(extra_dirs.iter().filter_map(|dir| as_dir_entry(dir)));
            entries.extend(extra_files.iter().cloned());
            entries.extend(config.gitignore.entries.iter().cloned());

            let ignore = IgnoreFile::new(&root);
            match ignore.append_missing(entries) {
                Ok(AppendOutcome::Added(count)) => {
                    info!("added {count} entries to {:?}", ignore.path().display())
                }
                Ok(AppendOutcome::Unchanged) => info!(
                    "{:?} already contains all specified entries, no changes made",
                    ignore.path().display()
                ),
                Err(err) => {
                    error!("{:?}", anyhow::Error::from(err));
                    failures += 1;
                }
            }
        }

        if failures > 0 {
            return Err(anyhow!("{failures} step(s) failed"));
        }

        Ok(())
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    if let Some(path) = path {
        let data = read_to_string(path)
            .with_context(|| format!("failed to read configuration file {:?}", path.display()))?;
        return Ok(data.parse::<Config>()?);
    }

    let path = match default_config_path() {
        Ok(path) if path.is_file() => path,
        Ok(_) => return Ok(Config::default()),
        Err(err) => {
            debug!("{err}");
            return Ok(Config::default());
        }
    };

    debug!("load configuration from {:?}", path.display());
    let data = read_to_string(&path)
        .with_context(|| format!("failed to read configuration file {:?}", path.display()))?;

    Ok(data.parse::<Config>()?)
}

fn as_dir_entry(name: &str) -> Option<String> {
    let name = name.trim().trim_end_matches('/');
    (!name.is_empty()).then(|| format!("{name}/"))
}

fn main() {
    let layer = fmt::layer()
        .compact()
        .with_target(false)
        .without_time();
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .init();

    if let Err(error) = run() {
        error!("{error:?}");
        exit(1);
    }

    exit(0)
}

fn run() -> Result<()> {
    Cli::parse().run()
}
