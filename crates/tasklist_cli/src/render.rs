use std::io::Write;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tasklist_core::config::Palette;
use tasklist_core::error::AppError;
use tasklist_core::model::{Filter, Task};

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = " ")]
    mark: &'static str,
    #[tabled(rename = "Task")]
    text: String,
}

pub fn status_marker(task: &Task) -> &'static str {
    if task.completed { "[x]" } else { "[ ]" }
}

/// `Filter: [all]  completed  pending`, with the active filter highlighted.
pub fn filter_bar(active: Filter, palette: &Palette) -> String {
    let labels: Vec<String> = Filter::ALL_FILTERS
        .iter()
        .map(|filter| {
            if *filter == active {
                palette.accentize(&format!("[{filter}]"))
            } else {
                format!(" {filter} ")
            }
        })
        .collect();
    format!("Filter: {}", labels.join(" "))
}

pub fn write_view<'a, W: Write>(
    out: &mut W,
    tasks: impl IntoIterator<Item = &'a Task>,
    filter: Filter,
    palette: &Palette,
) -> Result<(), AppError> {
    writeln!(out, "{}", filter_bar(filter, palette))?;

    let rows: Vec<TaskRow> = tasks
        .into_iter()
        .map(|task| TaskRow {
            id: task.id.to_string(),
            mark: status_marker(task),
            text: if task.completed {
                palette.mutedize(&task.text)
            } else {
                task.text.clone()
            },
        })
        .collect();

    if rows.is_empty() {
        writeln!(out, "No tasks.")?;
        return Ok(());
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    writeln!(out, "{table}")?;
    Ok(())
}

/// The view in the persisted array shape.
pub fn write_view_json<'a, W: Write>(
    out: &mut W,
    tasks: impl IntoIterator<Item = &'a Task>,
) -> Result<(), AppError> {
    let tasks: Vec<&Task> = tasks.into_iter().collect();
    writeln!(out, "{}", serde_json::to_string(&tasks)?)?;
    Ok(())
}

pub fn write_task_json<W: Write>(out: &mut W, task: &Task) -> Result<(), AppError> {
    writeln!(out, "{}", serde_json::to_string(task)?)?;
    Ok(())
}
