pub mod graph;
pub mod loader;
pub mod parser;
pub mod resolver;

pub use graph::TaskGraph;
pub use loader::load_graph;
pub use resolver::resolve;

/// Index of a task inside its [`TaskGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(usize);

impl TaskId {
    pub(crate) fn new(index: usize) -> Self {
        TaskId(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// A task as written in the task file, before any linking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDefinition {
    pub name: String,
    pub dependencies: Vec<String>,
    pub actions: Vec<String>,
    /// 1-based line number of the header.
    pub line: usize,
}

/// A linked task owned by a [`TaskGraph`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub name: String,
    pub actions: Vec<String>,
    pub dependencies: Vec<TaskId>,
}
