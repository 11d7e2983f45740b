use std::collections::HashMap;

use tracing::{debug, trace};

use super::{Task, TaskGraph, TaskId};
use crate::error::ResolveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    /// On the traversal stack at this depth, dependencies still pending.
    InProgress(usize),
    Done,
}

#[derive(Debug)]
struct Frame {
    task: TaskId,
    next_dependency: usize,
}

/// Returns `target` and all of its transitive dependencies in build order.
///
/// Every dependency comes before the tasks that need it and shared
/// dependencies appear once. The traversal is an explicit post-order DFS, so
/// deep chains do not grow the call stack. Visitation marks live only for the
/// duration of the call; the graph itself is never touched.
pub fn resolve<'g>(graph: &'g TaskGraph, target: &str) -> Result<Vec<&'g Task>, ResolveError> {
    let root = graph
        .id_of(target)
        .ok_or_else(|| ResolveError::TargetNotFound(target.to_string()))?;

    let mut visits: HashMap<TaskId, Visit> = HashMap::new();
    let mut stack = vec![Frame {
        task: root,
        next_dependency: 0,
    }];
    visits.insert(root, Visit::InProgress(0));
    let mut ordered = Vec::new();

    while let Some(frame) = stack.last_mut() {
        let task = graph.task(frame.task);

        let Some(&dependency) = task.dependencies.get(frame.next_dependency) else {
            let finished = frame.task;
            stack.pop();
            visits.insert(finished, Visit::Done);
            trace!(task = %task.name, "resolved");
            ordered.push(task);
            continue;
        };
        frame.next_dependency += 1;

        match visits.get(&dependency) {
            None => {
                visits.insert(dependency, Visit::InProgress(stack.len()));
                stack.push(Frame {
                    task: dependency,
                    next_dependency: 0,
                });
            }
            Some(Visit::Done) => {}
            Some(&Visit::InProgress(depth)) => {
                let path = cycle_path(graph, &stack[depth..], dependency);
                debug!(requested = %target, cycle = %path.join(" -> "), "dependency cycle");
                return Err(ResolveError::DependencyCycle { path });
            }
        }
    }

    debug!(requested = %target, tasks = ordered.len(), "resolved build order");
    Ok(ordered)
}

fn cycle_path(graph: &TaskGraph, frames: &[Frame], reentered: TaskId) -> Vec<String> {
    frames
        .iter()
        .map(|frame| frame.task)
        .chain(std::iter::once(reentered))
        .map(|id| graph.task(id).name.clone())
        .collect()
}
