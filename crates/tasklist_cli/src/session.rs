//! Terminal front end over [`TaskListState`].
//!
//! A session lives for one process. One-shot invocations run a single
//! command; the interactive loop keeps the draft, the edit target and the
//! filter between lines the way the input box and filter buttons would.

use crate::cli::{Cli, Command, normalize_parse_error, split_command_line};
use crate::render;
use clap::{CommandFactory, Parser};
use std::io::{BufRead, Write};
use tasklist_core::config::{Config, Palette};
use tasklist_core::error::AppError;
use tasklist_core::model::{Filter, Task, TaskId};
use tasklist_core::state::{CommitOutcome, TaskListState};
use tasklist_core::storage::SnapshotStore;
use tracing::{debug, info};

pub struct Session<S: SnapshotStore> {
    state: TaskListState<S>,
    config: Config,
    palette: Palette,
}

impl<S: SnapshotStore> Session<S> {
    pub fn new(state: TaskListState<S>, config: Config) -> Self {
        let palette = config.palette();
        Self {
            state,
            config,
            palette,
        }
    }

    pub fn state(&self) -> &TaskListState<S> {
        &self.state
    }

    /// Prompt for the interactive loop, mirroring the submit button label.
    pub fn prompt(&self) -> String {
        match self.state.edit_target() {
            Some(id) => format!("{} {}> ", self.palette.accentize("Update"), id),
            None => format!("{}> ", self.palette.accentize(self.state.submit_label())),
        }
    }

    pub fn execute<W: Write>(
        &mut self,
        command: Command,
        json: bool,
        out: &mut W,
    ) -> Result<(), AppError> {
        debug!(?command, "executing command");
        match command {
            Command::Add { text } => {
                if text.trim().is_empty() {
                    return Ok(());
                }
                self.state.cancel_edit();
                self.state.set_draft(text);
                self.submit(json, out)?;
            }
            Command::Edit { id, text } => {
                let Some(task) = self.lookup(&id).cloned() else {
                    return Ok(());
                };
                self.state.begin_edit(task.id, task.text);
                self.state.set_draft(text);
                if self.submit(json, out)? == CommitOutcome::Rejected {
                    self.state.cancel_edit();
                }
            }
            Command::Draft { text } => self.state.set_draft(text),
            Command::BeginEdit { id } => {
                let Some(task) = self.lookup(&id).cloned() else {
                    return Ok(());
                };
                self.state.begin_edit(task.id.clone(), task.text.clone());
                if json {
                    render::write_task_json(out, &task)?;
                } else {
                    writeln!(out, "Editing task {}: {}", task.id, task.text)?;
                }
            }
            Command::Submit => {
                self.submit(json, out)?;
            }
            Command::Cancel => self.state.cancel_edit(),
            Command::Delete { id } => {
                let id = self.resolve(&id);
                if let Some(task) = self.state.delete(&id) {
                    self.report(out, json, "Deleted task", &task)?;
                }
            }
            Command::Toggle { id } => {
                let id = self.resolve(&id);
                if let Some(completed) = self.state.toggle_complete(&id)
                    && let Some(task) = self.state.get(&id).cloned()
                {
                    let verb = if completed {
                        "Completed task"
                    } else {
                        "Reopened task"
                    };
                    self.report(out, json, verb, &task)?;
                }
            }
            Command::Filter { filter } => {
                self.state.set_filter(filter);
                self.render_view(out, json, filter)?;
            }
            Command::List { filter } => {
                let filter = filter.unwrap_or_else(|| self.state.filter());
                self.render_view(out, json, filter)?;
            }
        }

        Ok(())
    }

    /// Reads commands line by line until end of input or `exit`.
    ///
    /// Command failures are reported on `err` and do not end the session.
    pub fn run_interactive<R: BufRead, W: Write, E: Write>(
        &mut self,
        mut input: R,
        out: &mut W,
        err: &mut E,
        show_prompt: bool,
    ) -> Result<(), AppError> {
        info!(tasks = self.state.tasks().len(), "interactive session started");
        let mut line = String::new();

        loop {
            if show_prompt {
                write!(out, "{}", self.prompt())?;
                out.flush()?;
            }

            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
                break;
            }

            if trimmed == "help" || trimmed == "?" {
                writeln!(out, "{}", Cli::command().render_help())?;
                continue;
            }

            if let Err(error) = self.run_line(trimmed, out) {
                writeln!(err, "ERROR: {error}")?;
            }
        }

        info!(tasks = self.state.tasks().len(), "interactive session ended");
        Ok(())
    }

    fn run_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<(), AppError> {
        let expanded = self.config.expand_alias(line);
        let args = split_command_line(&expanded)?;
        if args.is_empty() {
            return Ok(());
        }

        let argv = std::iter::once("tasklist".to_string()).chain(args);
        let cli = Cli::try_parse_from(argv).map_err(normalize_parse_error)?;
        match cli.command {
            Some(command) => self.execute(command, cli.json, out),
            None => Ok(()),
        }
    }

    fn submit<W: Write>(&mut self, json: bool, out: &mut W) -> Result<CommitOutcome, AppError> {
        let outcome = self.state.commit();
        match &outcome {
            CommitOutcome::Added(id) => {
                if let Some(task) = self.state.get(id).cloned() {
                    self.report(out, json, "Added task", &task)?;
                }
            }
            CommitOutcome::Updated(id) => {
                if let Some(task) = self.state.get(id).cloned() {
                    self.report(out, json, "Updated task", &task)?;
                }
            }
            CommitOutcome::Missed(_) | CommitOutcome::Rejected => {}
        }
        Ok(outcome)
    }

    fn report<W: Write>(
        &self,
        out: &mut W,
        json: bool,
        verb: &str,
        task: &Task,
    ) -> Result<(), AppError> {
        if json {
            render::write_task_json(out, task)
        } else {
            writeln!(out, "{verb}: {} ({})", task.text, task.id)?;
            Ok(())
        }
    }

    fn render_view<W: Write>(
        &self,
        out: &mut W,
        json: bool,
        filter: Filter,
    ) -> Result<(), AppError> {
        let tasks = self.state.view(filter);
        if json {
            render::write_view_json(out, tasks)
        } else {
            render::write_view(out, tasks, filter, &self.palette)
        }
    }

    fn lookup(&self, raw: &str) -> Option<&Task> {
        let id = self.resolve(raw);
        self.state.get(&id)
    }

    /// Unknown ids still resolve so the core can treat them as no-ops.
    fn resolve(&self, raw: &str) -> TaskId {
        self.state
            .find_by_input(raw)
            .unwrap_or_else(|| TaskId::parse_input(raw))
    }
}
