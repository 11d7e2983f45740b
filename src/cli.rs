use std::path::PathBuf;

use clap::Parser;

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Task file to read (defaults to the settings file value, then "makefile")
    #[arg(short = 'f', long = "file")]
    pub file: Option<PathBuf>,

    /// Settings file to use instead of ./mkorder.toml
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// How to print the resolved tasks
    #[arg(long = "format", value_enum)]
    pub format: Option<OutputFormat>,

    /// List defined tasks instead of resolving a target
    #[arg(long = "list")]
    pub list: bool,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Task to resolve, falls back to the default target from settings
    pub target: Option<String>,
}
