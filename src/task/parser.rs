use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use super::TaskDefinition;
use crate::error::ParseError;

/// `NAME` or `NAME:` followed by whitespace separated dependency names.
/// Names are runs of non-whitespace characters without a colon.
static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^\s:]+)(?::((?:\s+[^\s:]+)*))?\s*$").expect("header pattern is valid")
});

/// Line-oriented task file parser.
///
/// Feed it lines in order; it aborts on the first line that is neither a
/// header nor a continuation of the current task. Blank actions are dropped.
#[derive(Debug, Default)]
pub struct Parser {
    line: usize,
    current: Option<TaskDefinition>,
    finished: Vec<TaskDefinition>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed_line(&mut self, raw: &str) -> Result<(), ParseError> {
        self.line += 1;

        if is_continuation(raw) {
            let Some(task) = self.current.as_mut() else {
                return Err(ParseError::Structural { line: self.line });
            };

            let action = raw.trim();
            if action.is_empty() {
                trace!(line = self.line, task = %task.name, "skipping blank action");
            } else {
                task.actions.push(action.to_string());
            }
            return Ok(());
        }

        let captures = HEADER
            .captures(raw)
            .ok_or(ParseError::Structural { line: self.line })?;

        let name = captures[1].to_string();
        let dependencies: Vec<String> = captures
            .get(2)
            .map(|deps| deps.as_str().split_whitespace().map(String::from).collect())
            .unwrap_or_default();

        debug!(line = self.line, task = %name, ?dependencies, "parsed task header");

        if let Some(previous) = self.current.take() {
            self.finished.push(previous);
        }

        self.current = Some(TaskDefinition {
            name,
            dependencies,
            actions: Vec::new(),
            line: self.line,
        });

        Ok(())
    }

    pub fn finish(mut self) -> Vec<TaskDefinition> {
        if let Some(last) = self.current.take() {
            self.finished.push(last);
        }
        self.finished
    }
}

fn is_continuation(line: &str) -> bool {
    line.chars().next().is_none_or(char::is_whitespace)
}

pub fn parse_definitions<'a, I>(lines: I) -> Result<Vec<TaskDefinition>, ParseError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut parser = Parser::new();
    for line in lines {
        parser.feed_line(line)?;
    }
    Ok(parser.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Vec<TaskDefinition>, ParseError> {
        parse_definitions(text.lines())
    }

    fn structural_line(text: &str) -> usize {
        match parse(text) {
            Err(ParseError::Structural { line }) => line,
            other => panic!("expected structural error, got {:?}", other),
        }
    }

    #[test]
    fn test_header_with_dependencies_and_actions() {
        let defs = parse("A: B C\n  echo a\n\tcc -o a a.c\nB\n  echo b\nC\n").unwrap();

        assert_eq!(defs.len(), 3);
        assert_eq!(defs[0].name, "A");
        assert_eq!(defs[0].dependencies, vec!["B", "C"]);
        assert_eq!(defs[0].actions, vec!["echo a", "cc -o a a.c"]);
        assert_eq!(defs[0].line, 1);
        assert_eq!(defs[1].name, "B");
        assert!(defs[1].dependencies.is_empty());
        assert_eq!(defs[1].line, 4);
        assert!(defs[2].actions.is_empty());
    }

    #[test]
    fn test_header_variants() {
        let defs = parse("plain\ncolon_only:\nspaced:   x    y  \nweird-name.o: lib/a.o\n").unwrap();

        assert!(defs[0].dependencies.is_empty());
        assert!(defs[1].dependencies.is_empty());
        assert_eq!(defs[2].dependencies, vec!["x", "y"]);
        assert_eq!(defs[3].name, "weird-name.o");
        assert_eq!(defs[3].dependencies, vec!["lib/a.o"]);
    }

    #[test]
    fn test_duplicates_are_kept_as_written() {
        let defs = parse("A: B B\nA\nB\n").unwrap();
        assert_eq!(defs.len(), 3);
        assert_eq!(defs[0].dependencies, vec!["B", "B"]);
    }

    #[test]
    fn test_blank_actions_are_dropped() {
        let defs = parse("A\n  first\n\n   \n  second\n\nB\n  \n").unwrap();

        assert_eq!(defs[0].actions, vec!["first", "second"]);
        assert!(defs[1].actions.is_empty());
    }

    #[test]
    fn test_crlf_input() {
        let defs = parse("A: B\r\n  build a\r\nB\r\n").unwrap();
        assert_eq!(defs[0].dependencies, vec!["B"]);
        assert_eq!(defs[0].actions, vec!["build a"]);
    }

    #[test]
    fn test_continuation_before_any_header() {
        assert_eq!(structural_line("  echo orphan\nA\n"), 1);
        assert_eq!(structural_line("\nA\n"), 1);
    }

    #[test]
    fn test_malformed_header_reports_line() {
        assert_eq!(structural_line("A\n  ok\nB:C\n"), 3);
        assert_eq!(structural_line("A\nB: C: D\n"), 2);
        assert_eq!(structural_line("A\nB :C\n"), 2);
        assert_eq!(structural_line("A\n:B\n"), 2);
    }

    #[test]
    fn test_first_error_aborts() {
        assert_eq!(structural_line("A\nbad:line\nalso:bad\n"), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").unwrap().is_empty());
    }
}
