use tracing::{debug, info, instrument, warn};

use crate::config::Config;
use crate::error::{Error, ValidationError};
use crate::render::Renderer;
use crate::session::Session;
use crate::task::Priority;

pub fn known_command_names() -> Vec<&'static str> {
    vec![
        "add", "update", "delete", "select", "clear", "list", "help", "version", "quit", "exit",
    ]
}

pub fn expand_command_abbrev<'a>(token: &'a str, known: &[&'a str]) -> Option<&'a str> {
    if known.contains(&token) {
        return Some(token);
    }

    let mut matches = known.iter().copied().filter(|name| name.starts_with(token));
    let first = matches.next()?;
    if matches.next().is_some() {
        None
    } else {
        Some(first)
    }
}

#[derive(Debug, Clone)]
pub struct Invocation {
    pub command: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace().map(ToString::to_string);
        let first = tokens.next()?;

        let command = expand_command_abbrev(&first, &known_command_names())
            .map_or(first.clone(), ToString::to_string);
        debug!(token = %first, command = %command, "parsed invocation");

        Some(Self {
            command,
            args: tokens.collect(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

#[instrument(skip(session, cfg, renderer, inv))]
pub fn dispatch(
    session: &mut Session,
    cfg: &Config,
    renderer: &mut Renderer,
    inv: Invocation,
) -> anyhow::Result<Outcome> {
    match inv.command.as_str() {
        "add" => cmd_add(session, cfg, renderer, &inv.args)?,
        "update" => cmd_update(session, cfg, renderer, &inv.args)?,
        "delete" => cmd_delete(session, renderer)?,
        "select" => cmd_select(session, renderer, &inv.args)?,
        "clear" => {
            session.clear_selection();
            println!("Selection cleared.");
        }
        "list" => refresh(session, renderer)?,
        "help" => cmd_help(),
        "version" => println!("{}", env!("CARGO_PKG_VERSION")),
        "quit" | "exit" => return Ok(Outcome::Quit),
        other => {
            renderer.print_error("Unknown command", &format!("{other} (try 'help')"));
        }
    }

    Ok(Outcome::Continue)
}

#[instrument(skip(session, cfg, renderer, args))]
fn cmd_add(
    session: &mut Session,
    cfg: &Config,
    renderer: &mut Renderer,
    args: &[String],
) -> anyhow::Result<()> {
    info!("command add");

    let outcome = parse_name_and_priority(args, default_priority(cfg)).and_then(
        |(name, priority)| {
            session.add_task(&name, priority)?;
            Ok((name, priority))
        },
    );

    match outcome {
        Ok((name, priority)) => {
            println!("Added '{name}' to the {priority} bucket.");
            refresh(session, renderer)?;
        }
        Err(err) => report(renderer, err)?,
    }
    Ok(())
}

#[instrument(skip(session, cfg, renderer, args))]
fn cmd_update(
    session: &mut Session,
    cfg: &Config,
    renderer: &mut Renderer,
    args: &[String],
) -> anyhow::Result<()> {
    info!("command update");

    if session.selection().is_none() {
        return report(renderer, Error::NoSelection);
    }

    let outcome = parse_name_and_priority(args, default_priority(cfg)).and_then(
        |(name, priority)| {
            session.update_task(&name, priority)?;
            Ok((name, priority))
        },
    );

    match outcome {
        Ok((name, priority)) => {
            println!("Updated task to '{name}' [{priority}].");
            refresh(session, renderer)?;
        }
        Err(err) => report(renderer, err)?,
    }
    Ok(())
}

#[instrument(skip(session, renderer))]
fn cmd_delete(session: &mut Session, renderer: &mut Renderer) -> anyhow::Result<()> {
    info!("command delete");

    match session.delete_task() {
        Ok(removed) => {
            println!("Deleted '{removed}'.");
            refresh(session, renderer)?;
        }
        Err(err) => report(renderer, err)?,
    }
    Ok(())
}

#[instrument(skip(session, renderer, args))]
fn cmd_select(
    session: &mut Session,
    renderer: &mut Renderer,
    args: &[String],
) -> anyhow::Result<()> {
    info!("command select");

    let (Some(level_raw), Some(index_raw)) = (args.first(), args.get(1)) else {
        renderer.print_error("Usage", "select <high|medium|low> <index>");
        return Ok(());
    };

    let bucket = match level_raw.parse::<Priority>() {
        Ok(bucket) => bucket,
        Err(err) => return report(renderer, err.into()),
    };
    let Ok(local_index) = index_raw.parse::<usize>() else {
        renderer.print_error("Usage", "select <high|medium|low> <index>");
        return Ok(());
    };

    match session.select(bucket, local_index) {
        Some(task) => println!("Selected '{}' [{}].", task, task.priority),
        None => debug!(%bucket, local_index, "selection miss ignored"),
    }
    Ok(())
}

fn cmd_help() {
    println!(
        "Commands: add <name> pri:<level>, select <bucket> <index>, update <name> pri:<level>, delete, clear, list, version, quit"
    );
}

fn refresh(session: &Session, renderer: &mut Renderer) -> anyhow::Result<()> {
    renderer.print_buckets(&session.display_buckets(), session.selection_coordinates())
}

fn report(renderer: &mut Renderer, err: Error) -> anyhow::Result<()> {
    if err.is_defect() {
        return Err(anyhow::Error::new(err));
    }
    renderer.print_error(err.title(), &err.to_string());
    Ok(())
}

fn default_priority(cfg: &Config) -> Option<Priority> {
    let raw = cfg.get("default.priority")?;
    match raw.parse::<Priority>() {
        Ok(priority) => Some(priority),
        Err(err) => {
            warn!(value = %raw, error = %err, "ignoring invalid default.priority");
            None
        }
    }
}

fn parse_name_and_priority(
    args: &[String],
    default: Option<Priority>,
) -> Result<(String, Priority), Error> {
    let mut name_parts = Vec::new();
    let mut priority = None;

    for arg in args {
        if let Some(value) = arg
            .strip_prefix("pri:")
            .or_else(|| arg.strip_prefix("priority:"))
        {
            priority = Some(value.parse::<Priority>()?);
            continue;
        }
        name_parts.push(arg.clone());
    }

    let name = name_parts.join(" ");
    if name.is_empty() {
        return Err(ValidationError::EmptyName.into());
    }
    let priority = priority
        .or(default)
        .ok_or(ValidationError::MissingPriority)?;

    Ok((name, priority))
}
