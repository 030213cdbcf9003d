pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod projection;
pub mod render;
pub mod selection;
pub mod session;
pub mod store;
pub mod task;

use std::ffi::OsString;
use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use crate::commands::{Invocation, Outcome};

#[tracing::instrument(skip_all)]
pub fn run(raw_args: Vec<OsString>) -> anyhow::Result<()> {
    let pre = cli::preprocess_args(&raw_args)?;
    let cli = cli::GlobalCli::parse_from(pre.cleaned_args);

    cli::init_tracing(cli.verbose, cli.quiet)?;

    info!(verbose = cli.verbose, quiet = cli.quiet, "starting taskify");
    debug!(?pre.rc_overrides, "preprocessed rc overrides");

    let mut cfg = config::Config::load(cli.taskifyrc.as_deref())?;
    cfg.apply_overrides(
        pre.rc_overrides
            .into_iter()
            .chain(cli.rc_overrides.into_iter().map(|kv| (kv.key, kv.value))),
    );

    let mut renderer =
        render::Renderer::new(&cfg).context("failed to configure the renderer")?;
    let mut session = session::Session::new();

    let interactive = io::stdin().is_terminal();
    let prompt = cfg.get("prompt").unwrap_or_else(|| "taskify> ".to_string());
    if interactive {
        println!("Taskify - Track. Plan. Achieve.");
        println!("Type 'help' for commands, 'quit' to leave.");
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            print!("{prompt}");
            io::stdout().flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed reading command line")?;
        let Some(inv) = Invocation::parse_line(&line) else {
            continue;
        };

        debug!(command = %inv.command, args = ?inv.args, "dispatching command");
        match commands::dispatch(&mut session, &cfg, &mut renderer, inv)? {
            Outcome::Quit => break,
            Outcome::Continue => {}
        }
    }

    info!("done");
    Ok(())
}
