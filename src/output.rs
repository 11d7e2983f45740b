use std::io::Write;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{error::Result, task::Task};

#[derive(ValueEnum, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Task names followed by their tab-indented actions.
    #[default]
    Text,
    /// A JSON array of `{ name, actions }` objects.
    Json,
}

#[derive(Serialize)]
struct ResolvedTask<'a> {
    name: &'a str,
    actions: &'a [String],
}

pub fn write_tasks<W: Write>(out: &mut W, tasks: &[&Task], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for task in tasks {
                writeln!(out, "{}", task.name)?;
                for action in &task.actions {
                    writeln!(out, "\t{}", action)?;
                }
            }
        }
        OutputFormat::Json => {
            let view: Vec<ResolvedTask> = tasks
                .iter()
                .map(|task| ResolvedTask {
                    name: &task.name,
                    actions: &task.actions,
                })
                .collect();
            serde_json::to_writer_pretty(&mut *out, &view)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{loader::parse_str, resolve};

    fn render(format: OutputFormat) -> String {
        let graph = parse_str("A: B\n  action-A\n  more-A\nB\n  action-B\nC\n").unwrap();
        let tasks = resolve(&graph, "A").unwrap();

        let mut out = Vec::new();
        write_tasks(&mut out, &tasks, format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_output() {
        assert_eq!(
            render(OutputFormat::Text),
            "B\n\taction-B\nA\n\taction-A\n\tmore-A\n"
        );
    }

    #[test]
    fn test_json_output() {
        let value: serde_json::Value = serde_json::from_str(&render(OutputFormat::Json)).unwrap();

        assert_eq!(
            value,
            serde_json::json!([
                { "name": "B", "actions": ["action-B"] },
                { "name": "A", "actions": ["action-A", "more-A"] },
            ])
        );
    }
}
