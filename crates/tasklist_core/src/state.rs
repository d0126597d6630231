//! The task list state container.
//!
//! All mutation of the task list goes through [`TaskListState`]. Each
//! mutating operation applies a single in-memory change and then writes the
//! full list back to the store. Rejected input and unknown ids are silent
//! no-ops; a failed write is logged and otherwise ignored, since the store is
//! a convenience cache rather than the system of record.

use crate::error::AppError;
use crate::model::{Filter, Task, TaskId};
use crate::storage::{SnapshotStore, decode_snapshot, encode_snapshot};
use std::collections::HashSet;
use tracing::{debug, warn};

/// What a call to [`TaskListState::commit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Added(TaskId),
    Updated(TaskId),
    /// The edit target no longer exists. Draft and target were still cleared.
    Missed(TaskId),
    /// Draft was blank; nothing changed.
    Rejected,
}

pub struct TaskListState<S: SnapshotStore> {
    tasks: Vec<Task>,
    filter: Filter,
    edit_target: Option<TaskId>,
    draft: String,
    /// `None` once the counter has passed `u64::MAX`.
    next_id: Option<u64>,
    store: S,
}

impl<S: SnapshotStore> TaskListState<S> {
    /// Builds the session state from whatever the store holds.
    ///
    /// An absent snapshot yields an empty list. A snapshot that cannot be read
    /// or decoded also yields an empty list; it gets overwritten by the next
    /// mutation.
    pub fn hydrate(store: S) -> Self {
        let loaded = store
            .load()
            .and_then(|blob| blob.map_or_else(|| Ok(Vec::new()), |blob| decode_snapshot(&blob)));
        let tasks = match loaded {
            Ok(tasks) => dedupe_ids(tasks),
            Err(err) => {
                warn!(error = %err, "discarding unreadable task snapshot");
                Vec::new()
            }
        };

        let next_id = tasks
            .iter()
            .filter_map(|task| task.id.as_number())
            .max()
            .map_or(Some(1), |max| max.checked_add(1));
        warn_ambiguous_ids(&tasks);
        debug!(count = tasks.len(), ?next_id, "hydrated task list");

        Self {
            tasks,
            filter: Filter::default(),
            edit_target: None,
            draft: String::new(),
            next_id,
            store,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn edit_target(&self) -> Option<&TaskId> {
        self.edit_target.as_ref()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    /// Resolves user-typed id text against the ids currently in the list.
    ///
    /// An id of the same kind as the input wins over one that only displays
    /// the same, so `1` finds `Number(1)` before `Text("1")`.
    pub fn find_by_input(&self, raw: &str) -> Option<TaskId> {
        let exact = TaskId::parse_input(raw);
        if self.get(&exact).is_some() {
            return Some(exact);
        }

        let trimmed = raw.trim();
        self.tasks
            .iter()
            .find(|task| task.id.to_string() == trimmed)
            .map(|task| task.id.clone())
    }

    pub fn submit_label(&self) -> &'static str {
        if self.edit_target.is_some() {
            "Update"
        } else {
            "Add"
        }
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn set_filter(&mut self, filter: Filter) {
        debug!(%filter, "filter changed");
        self.filter = filter;
    }

    /// Points the next commit at `id` and prefills the draft with `text`.
    pub fn begin_edit(&mut self, id: TaskId, text: impl Into<String>) {
        debug!(%id, "editing task");
        self.edit_target = Some(id);
        self.draft = text.into();
    }

    pub fn cancel_edit(&mut self) {
        self.edit_target = None;
        self.draft.clear();
    }

    /// Adds the draft as a new task, or rewrites the edit target's text.
    ///
    /// The stored text is the draft exactly as typed; only the emptiness check
    /// trims.
    pub fn commit(&mut self) -> CommitOutcome {
        if self.draft.trim().is_empty() {
            return CommitOutcome::Rejected;
        }

        let text = std::mem::take(&mut self.draft);
        let outcome = match self.edit_target.take() {
            Some(id) => match self.tasks.iter_mut().find(|task| task.id == id) {
                Some(task) => {
                    task.text = text;
                    CommitOutcome::Updated(id)
                }
                None => {
                    debug!(%id, "edit target vanished before commit");
                    return CommitOutcome::Missed(id);
                }
            },
            None => {
                let id = self.allocate_id();
                self.tasks.push(Task::new(id.clone(), text));
                CommitOutcome::Added(id)
            }
        };

        debug!(?outcome, count = self.tasks.len(), "committed draft");
        self.persist();
        outcome
    }

    /// Removes the task with `id`, keeping the others in order.
    pub fn delete(&mut self, id: &TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|task| &task.id == id)?;
        let removed = self.tasks.remove(index);

        if self.edit_target.as_ref() == Some(id) {
            self.cancel_edit();
        }

        debug!(%id, count = self.tasks.len(), "deleted task");
        self.persist();
        Some(removed)
    }

    /// Flips completion of the task with `id` and returns the new flag.
    pub fn toggle_complete(&mut self, id: &TaskId) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|task| &task.id == id)?;
        task.completed = !task.completed;
        let completed = task.completed;

        debug!(%id, completed, "toggled task");
        self.persist();
        Some(completed)
    }

    /// Tasks passing the current filter, in insertion order.
    pub fn visible_tasks(&self) -> impl Iterator<Item = &Task> + '_ {
        self.view(self.filter)
    }

    pub fn view(&self, filter: Filter) -> impl Iterator<Item = &Task> + '_ {
        self.tasks.iter().filter(move |task| filter.matches(task))
    }

    fn allocate_id(&mut self) -> TaskId {
        while let Some(value) = self.next_id {
            self.next_id = value.checked_add(1);
            let candidate = TaskId::Number(value);
            if self.get(&candidate).is_none() {
                return candidate;
            }
        }

        // Counter exhausted: take the lowest number not in use.
        let used: HashSet<u64> = self
            .tasks
            .iter()
            .filter_map(|task| task.id.as_number())
            .collect();
        let mut value = 1;
        while used.contains(&value) {
            value += 1;
        }
        TaskId::Number(value)
    }

    fn persist(&mut self) {
        if let Err(err) = self.try_persist() {
            warn!(error = %err, "failed to persist task list");
        }
    }

    fn try_persist(&mut self) -> Result<(), AppError> {
        let blob = encode_snapshot(&self.tasks)?;
        self.store.save(&blob)
    }
}

fn dedupe_ids(tasks: Vec<Task>) -> Vec<Task> {
    let mut seen = HashSet::with_capacity(tasks.len());
    let before = tasks.len();
    let kept: Vec<Task> = tasks
        .into_iter()
        .filter(|task| seen.insert(task.id.clone()))
        .collect();

    if kept.len() != before {
        warn!(before, after = kept.len(), "dropped tasks with duplicate ids");
    }
    kept
}

fn warn_ambiguous_ids(tasks: &[Task]) {
    let mut shown = HashSet::with_capacity(tasks.len());
    for task in tasks {
        let display_id = task.id.to_string();
        if !shown.insert(display_id.clone()) {
            warn!(id = %display_id, "several tasks display the same id; typed input picks the numeric one");
        }
    }
}
