use std::{fmt, path::PathBuf};

use thiserror::Error;

/// A single data-integrity problem found while building a task graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationProblem {
    DuplicateTask(String),
    DuplicateDependency(String),
    MissingTasks(Vec<String>),
}

impl fmt::Display for ValidationProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationProblem::DuplicateTask(name) => {
                write!(f, "Task '{}' is defined more than once", name)
            }
            ValidationProblem::DuplicateDependency(name) => {
                write!(f, "Task '{}' has duplicate dependencies", name)
            }
            ValidationProblem::MissingTasks(names) => write!(
                f,
                "Dependency(ies) {} do not have a corresponding task",
                names.join(", ")
            ),
        }
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unable to parse the task file at line {line}")]
    Structural { line: usize },

    #[error("Task file has the following problems:\n{}", join_problems(.0))]
    Validation(Vec<ValidationProblem>),
}

fn join_problems(problems: &[ValidationProblem]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Task file does not contain a task named '{0}'")]
    TargetNotFound(String),

    #[error("Unable to determine build order due to dependency cycle: {}", .path.join(" -> "))]
    DependencyCycle { path: Vec<String> },
}

#[derive(Debug, Error)]
pub enum MkError {
    #[error("Unable to read {}: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("{0}")]
    Usage(String),

    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MkError {
    /// Exit code used by the command line: 2 for usage errors, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            MkError::Usage(_) => 2,
            _ => 1,
        }
    }
}

impl From<toml::de::Error> for MkError {
    fn from(err: toml::de::Error) -> Self {
        MkError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MkError>;
