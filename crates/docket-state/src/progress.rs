//! # Progress Board
//!
//! A three-column kanban over tasks derived from the timeline. Each timeline
//! node at index `i` yields two tasks: the client task with id `2*i` and the
//! attorney task with id `2*i + 1`.
//!
//! Status changes are unrestricted: any status may move to any other status
//! in one step. Tasks are never created or deleted after derivation.
//!
//! Persistence lives in `docket-store`; this module only holds the board and
//! its serialized shape.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use docket_core::fixture::TimelineNode;
use docket_core::TimelinePhase;

/// Column a task sits in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    /// Column heading.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = ProgressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ProgressError::UnknownStatus(s.to_string())),
        }
    }
}

/// Who owns a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Client,
    Attorney,
}

impl TaskKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Client => "Client",
            Self::Attorney => "Attorney",
        }
    }
}

/// One card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u32,
    pub node_id: u32,
    pub title: String,
    pub phase: TimelinePhase,
    /// Deadline exactly as stored, `YYYY-MM-DD` for derived tasks.
    pub deadline: String,
    #[serde(rename = "type")]
    pub kind: TaskKind,
    pub description: String,
    pub status: TaskStatus,
}

impl Task {
    /// Title without the `- Client` / `- Attorney` suffix.
    pub fn short_title(&self) -> &str {
        self.title
            .strip_suffix(" - Client")
            .or_else(|| self.title.strip_suffix(" - Attorney"))
            .unwrap_or(&self.title)
    }
}

/// Errors raised by board operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProgressError {
    #[error("no task with id {0}")]
    UnknownTask(u32),

    #[error("unknown task status {0:?} (expected todo, in_progress or done)")]
    UnknownStatus(String),
}

/// The fresh task list for a set of timeline nodes, every task `todo`.
pub fn derive_tasks(nodes: &[TimelineNode]) -> Vec<Task> {
    nodes
        .iter()
        .enumerate()
        .flat_map(|(i, node)| {
            let base = (i as u32) * 2;
            let task = |offset: u32, kind: TaskKind, description: &str| Task {
                id: base + offset,
                node_id: node.id,
                title: format!("{} - {}", node.title, kind.label()),
                phase: node.phase,
                deadline: node.deadline.format("%Y-%m-%d").to_string(),
                kind,
                description: description.to_string(),
                status: TaskStatus::Todo,
            };
            [
                task(0, TaskKind::Client, &node.client_task),
                task(1, TaskKind::Attorney, &node.attorney_task),
            ]
        })
        .collect()
}

// ─── Board ──────────────────────────────────────────────────────────

/// Tasks split by status, in board order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Columns<'a> {
    pub todo: Vec<&'a Task>,
    pub in_progress: Vec<&'a Task>,
    pub done: Vec<&'a Task>,
}

impl<'a> Columns<'a> {
    pub fn get(&self, status: TaskStatus) -> &[&'a Task] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }
}

/// Completion figures for the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub done: usize,
    pub total: usize,
    /// Rounded percentage; zero for an empty board.
    pub percent: u8,
}

/// The kanban board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    tasks: Vec<Task>,
}

impl Board {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    pub fn task(&self, id: u32) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Move a task to `status`. Returns the previous status.
    pub fn set_status(&mut self, id: u32, status: TaskStatus) -> Result<TaskStatus, ProgressError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ProgressError::UnknownTask(id))?;
        let previous = std::mem::replace(&mut task.status, status);
        tracing::debug!(task = id, from = %previous, to = %status, "task status changed");
        Ok(previous)
    }

    /// Phases that have tasks, in litigation order.
    pub fn phases(&self) -> Vec<TimelinePhase> {
        TimelinePhase::ALL
            .into_iter()
            .filter(|p| self.tasks.iter().any(|t| t.phase == *p))
            .collect()
    }

    fn filtered(&self, phase: Option<TimelinePhase>) -> impl Iterator<Item = &Task> {
        self.tasks
            .iter()
            .filter(move |t| phase.map_or(true, |p| t.phase == p))
    }

    /// Tasks by column, optionally restricted to one phase.
    pub fn columns(&self, phase: Option<TimelinePhase>) -> Columns<'_> {
        let mut columns = Columns::default();
        for task in self.filtered(phase) {
            match task.status {
                TaskStatus::Todo => columns.todo.push(task),
                TaskStatus::InProgress => columns.in_progress.push(task),
                TaskStatus::Done => columns.done.push(task),
            }
        }
        columns
    }

    /// Done vs total, optionally restricted to one phase.
    pub fn completion(&self, phase: Option<TimelinePhase>) -> Completion {
        let (done, total) = self.filtered(phase).fold((0, 0), |(done, total), t| {
            (done + usize::from(t.status == TaskStatus::Done), total + 1)
        });
        let percent = if total == 0 {
            0
        } else {
            ((done as f64 / total as f64) * 100.0).round() as u8
        };
        Completion { done, total, percent }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docket_core::{CascadePolicy, FixtureBundle};

    fn board() -> Board {
        let b = FixtureBundle::bundled(CascadePolicy::Strict).unwrap();
        Board::new(derive_tasks(&b.timeline.nodes))
    }

    #[test]
    fn test_derive_tasks_ids_and_titles() {
        let b = board();
        assert_eq!(b.tasks().len(), 18);
        let client = b.task(0).unwrap();
        let attorney = b.task(1).unwrap();
        assert_eq!(client.title, "Rule 16 Discovery Demand - Client");
        assert_eq!(attorney.title, "Rule 16 Discovery Demand - Attorney");
        assert_eq!(client.kind, TaskKind::Client);
        assert_eq!(client.node_id, 1);
        assert_eq!(client.deadline, "2026-11-04");
        assert_eq!(attorney.short_title(), "Rule 16 Discovery Demand");
        assert!(b.tasks().iter().all(|t| t.status == TaskStatus::Todo));
        let last = b.task(17).unwrap();
        assert_eq!(last.node_id, 9);
        assert_eq!(last.kind, TaskKind::Attorney);
    }

    #[test]
    fn test_any_status_to_any_status() {
        let mut b = board();
        assert_eq!(b.set_status(3, TaskStatus::Done).unwrap(), TaskStatus::Todo);
        assert_eq!(b.set_status(3, TaskStatus::Todo).unwrap(), TaskStatus::Done);
        assert_eq!(b.set_status(3, TaskStatus::InProgress).unwrap(), TaskStatus::Todo);
        assert_eq!(b.set_status(99, TaskStatus::Done).unwrap_err(), ProgressError::UnknownTask(99));
    }

    #[test]
    fn test_columns_and_completion_by_phase() {
        let mut b = board();
        b.set_status(0, TaskStatus::Done).unwrap();
        b.set_status(1, TaskStatus::InProgress).unwrap();
        b.set_status(16, TaskStatus::Done).unwrap();

        let all = b.columns(None);
        assert_eq!(all.done.len(), 2);
        assert_eq!(all.in_progress.len(), 1);
        assert_eq!(all.todo.len(), 15);

        let discovery = b.columns(Some(TimelinePhase::DiscoveryTaint));
        assert_eq!(discovery.get(TaskStatus::Done).len(), 1);
        assert_eq!(discovery.get(TaskStatus::Todo).len(), 4);

        let c = b.completion(Some(TimelinePhase::Trial));
        assert_eq!((c.done, c.total, c.percent), (1, 2, 50));
        assert_eq!(b.completion(None).percent, 11);
    }

    #[test]
    fn test_empty_board_completion() {
        let b = Board::new(vec![]);
        assert_eq!(b.completion(None), Completion { done: 0, total: 0, percent: 0 });
        assert!(b.phases().is_empty());
    }

    #[test]
    fn test_phases_in_litigation_order() {
        assert_eq!(board().phases(), TimelinePhase::ALL.to_vec());
    }

    #[test]
    fn test_task_serializes_with_camel_case_keys() {
        let b = board();
        let json = serde_json::to_value(b.task(1).unwrap()).unwrap();
        assert_eq!(json["nodeId"], 1);
        assert_eq!(json["type"], "attorney");
        assert_eq!(json["status"], "todo");
        assert_eq!(json["phase"], "Discovery/Taint");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("in-progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!("DONE".parse::<TaskStatus>().unwrap(), TaskStatus::Done);
        assert!("blocked".parse::<TaskStatus>().is_err());
    }
}
