use std::{fs, path::Path};

use tracing::debug;

use super::{TaskGraph, parser::parse_definitions};
use crate::error::{MkError, ParseError, Result};

/// Reads, parses and validates the task file at `path`.
pub fn load_graph(path: &Path) -> Result<TaskGraph> {
    let contents = fs::read_to_string(path).map_err(|source| MkError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "read task file");

    let graph = parse_str(&contents)?;
    debug!(path = %path.display(), tasks = graph.len(), "loaded task graph");
    Ok(graph)
}

/// Parses and validates task file text that is already in memory.
pub fn parse_str(text: &str) -> std::result::Result<TaskGraph, ParseError> {
    TaskGraph::build(parse_definitions(text.lines())?)
}
