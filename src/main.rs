use clap::Parser;
use std::{
    io::{self, Write},
    path::PathBuf,
    process,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;
mod error;
mod output;
mod settings;
mod task;

use cli::Cli;
use error::{MkError, Result};
use output::{OutputFormat, write_tasks};
use settings::{DEFAULT_TASK_FILE, Settings, load_settings};
use task::{load_graph, resolve};

fn main() {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = load_settings(args.config.as_deref())
        .and_then(|settings| run_mkorder(args, settings, &mut out));

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run_mkorder<W: Write>(args: Cli, settings: Settings, out: &mut W) -> Result<()> {
    let file = args
        .file
        .or(settings.file)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TASK_FILE));
    let graph = load_graph(&file)?;

    if args.list {
        for name in graph.names() {
            writeln!(out, "{}", name)?;
        }
        return Ok(());
    }

    let target = args
        .target
        .or(settings.default_target)
        .ok_or_else(|| {
            MkError::Usage(
                "no target given and no default target configured; pass a task name".to_string(),
            )
        })?;

    let tasks = resolve(&graph, &target)?;
    let format = args.format.or(settings.format).unwrap_or_default();

    let order: Vec<&str> = tasks.iter().map(|task| task.name.as_str()).collect();
    info!(target_task = %target, order = %order.join(" -> "), "resolved");

    // Only plain text has room for the order line; JSON must stay parseable.
    if args.verbose && format == OutputFormat::Text {
        writeln!(out, "Task execution order: {}", order.join(" -> "))?;
    }

    write_tasks(&mut *out, &tasks, format)?;
    out.flush()?;

    Ok(())
}
