pub mod cli;
pub mod commands;
pub mod config;
pub mod datastore;
pub mod datetime;
pub mod prompt;
pub mod render;

use std::ffi::OsString;

use anyhow::Context;
use clap::Parser;
use taskdash_model::TaskStore;
use tracing::{debug, info};

#[tracing::instrument(skip_all)]
pub fn run(raw_args: Vec<OsString>) -> anyhow::Result<()> {
    let cli = cli::GlobalCli::parse_from(raw_args);

    cli::init_tracing(cli.verbose, cli.quiet)?;

    info!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        "starting taskdash CLI"
    );
    debug!(overrides = cli.rc_overrides.len(), "parsed rc overrides");

    let mut cfg = config::Config::load(cli.rcfile.as_deref())?;
    cfg.apply_overrides(
        cli.rc_overrides
            .into_iter()
            .map(|kv| (kv.key, kv.value)),
    );

    let data_dir = config::resolve_data_dir(&cfg, cli.data.as_deref())
        .context("failed to resolve data directory")?;

    let storage = datastore::FileStorage::open(&data_dir).with_context(|| {
        format!("failed to open task storage at {}", data_dir.display())
    })?;
    let mut store = TaskStore::open(storage);

    let mut renderer = render::Renderer::new(&cfg)?;
    let mut prompter = prompt::TerminalPrompter::new();
    let today = datetime::local_today();

    commands::dispatch(
        &mut store,
        &cfg,
        &mut renderer,
        &mut prompter,
        cli.command.unwrap_or_default(),
        today,
    )?;

    info!("done");
    Ok(())
}
