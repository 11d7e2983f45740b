use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::{Task, TaskDefinition, TaskId};
use crate::error::{ParseError, ValidationProblem};

/// Immutable name-keyed arena of linked tasks.
///
/// Only [`TaskGraph::build`] creates one, and only when every dependency
/// refers to a defined task.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    tasks: Vec<Task>,
    index: HashMap<String, TaskId>,
    order: Vec<TaskId>,
}

/// A name interned while building. `confirmed` flips once the name shows up
/// as a header; names only ever seen as dependencies stay unconfirmed.
#[derive(Debug)]
struct Slot {
    name: String,
    confirmed: bool,
}

#[derive(Debug, Default)]
struct Interner {
    slots: Vec<Slot>,
    index: HashMap<String, TaskId>,
}

impl Interner {
    fn get_or_create(&mut self, name: &str, confirmed: bool) -> TaskId {
        let id = match self.index.get(name) {
            Some(&id) => id,
            None => {
                let id = TaskId::new(self.slots.len());
                self.slots.push(Slot {
                    name: name.to_string(),
                    confirmed: false,
                });
                self.index.insert(name.to_string(), id);
                id
            }
        };

        if confirmed {
            self.slots[id.index()].confirmed = true;
        }
        id
    }
}

impl TaskGraph {
    /// Validates the parsed definitions and links them into a graph.
    ///
    /// Every problem is collected before giving up, so the caller sees
    /// duplicate tasks, duplicate dependencies and missing tasks together.
    /// A name defined more than once is reported once, however many times it
    /// repeats.
    pub fn build(definitions: Vec<TaskDefinition>) -> Result<Self, ParseError> {
        let mut interner = Interner::default();
        let mut problems = Vec::new();
        let mut reported_duplicates = HashSet::new();

        for definition in &definitions {
            let id = interner.get_or_create(&definition.name, false);
            if interner.slots[id.index()].confirmed {
                debug!(task = %definition.name, line = definition.line, "duplicate task definition");
                if reported_duplicates.insert(id) {
                    problems.push(ValidationProblem::DuplicateTask(definition.name.clone()));
                }
            } else {
                interner.get_or_create(&definition.name, true);
            }

            let mut seen = HashSet::new();
            let mut has_duplicate = false;
            for dependency in &definition.dependencies {
                if !seen.insert(dependency.as_str()) {
                    has_duplicate = true;
                }
                interner.get_or_create(dependency, false);
            }
            if has_duplicate {
                problems.push(ValidationProblem::DuplicateDependency(
                    definition.name.clone(),
                ));
            }
        }

        let missing: Vec<String> = interner
            .slots
            .iter()
            .filter(|slot| !slot.confirmed)
            .map(|slot| slot.name.clone())
            .collect();
        if !missing.is_empty() {
            problems.push(ValidationProblem::MissingTasks(missing));
        }

        if !problems.is_empty() {
            debug!(count = problems.len(), "task file failed validation");
            return Err(ParseError::Validation(problems));
        }

        Ok(Self::link(interner, definitions))
    }

    fn link(interner: Interner, definitions: Vec<TaskDefinition>) -> Self {
        let Interner { slots, index } = interner;

        let mut tasks: Vec<Task> = slots
            .into_iter()
            .map(|slot| Task {
                name: slot.name,
                actions: Vec::new(),
                dependencies: Vec::new(),
            })
            .collect();
        let mut order = Vec::with_capacity(definitions.len());

        for definition in definitions {
            let id = index[&definition.name];
            let dependencies = definition
                .dependencies
                .iter()
                .map(|dependency| index[dependency])
                .collect();

            let task = &mut tasks[id.index()];
            task.actions = definition.actions;
            task.dependencies = dependencies;
            order.push(id);
        }

        debug!(tasks = tasks.len(), "linked task graph");

        TaskGraph {
            tasks,
            index,
            order,
        }
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&Task> {
        self.id_of(name).map(|id| self.task(id))
    }

    pub fn id_of(&self, name: &str) -> Option<TaskId> {
        self.index.get(name).copied()
    }

    /// Panics if `id` was not issued by this graph.
    pub fn task(&self, id: TaskId) -> &Task {
        &self.tasks[id.index()]
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Tasks in the order their headers appear in the task file.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.order.iter().map(|&id| self.task(id))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tasks().map(|task| task.name.as_str())
    }
}
