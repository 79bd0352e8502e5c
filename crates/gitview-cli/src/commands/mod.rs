pub mod log;
pub mod tag;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;

use gitview_history::fixture::FixtureRepo;
use gitview_history::{Fixture, MemoryHistory};
use gitview_pages::{PageContext, RepoSettings};

use crate::Cli;

#[derive(Subcommand)]
pub enum Commands {
    /// Render the log table
    Log(log::LogArgs),
    /// Render a single-tag page
    Tag(tag::TagArgs),
}

pub fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Log(args) => log::run(&args),
        Commands::Tag(args) => tag::run(&args),
    }
}

/// Load a fixture file and split it into history, page context, and the
/// repository's default display flags.
pub fn load_fixture(path: &Path) -> Result<(MemoryHistory, PageContext, FixtureRepo)> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read fixture '{}'", path.display()))?;
    let fixture = Fixture::from_json(&text)
        .with_context(|| format!("cannot parse fixture '{}'", path.display()))?;

    let flags = fixture.repo.clone();
    let ctx = PageContext {
        repo: RepoSettings {
            name: flags.name.clone(),
            snapshots: flags.snapshots.clone(),
            suppress_email: flags.suppress_email,
        },
        head: fixture.head.clone(),
        now: chrono::Utc::now().timestamp(),
    };
    let history = fixture.into_history()?;
    Ok((history, ctx, flags))
}
