//! taskdesk task commands
//!
//! Reads go straight to the snapshot; mutations hold the store lock across
//! the whole load-modify-save cycle.

use serde_json::{Map, Value};

use crate::cli::Context;
use crate::error::{Error, Result};
use crate::lookup;
use crate::model::Task;
use crate::mutation::{self, NewTask, ReplaceTask};
use crate::output::{emit_success, HumanOutput};
use crate::query::{self, TaskQuery};

pub fn run_list(ctx: &Context, query: TaskQuery) -> Result<()> {
    let user_id = ctx.user_id()?;
    let repo = ctx.root.load()?;
    let page = query::list_tasks(&repo, user_id, &query, &ctx.config.list.limits())?;

    let mut human = HumanOutput::new(format!(
        "{} task(s), page {} of {}",
        page.total, page.page, page.total_pages
    ));
    for task in &page.items {
        human.push_detail(task_line(task));
    }
    emit_success(ctx.output(), "task list", &page, Some(&human))
}

pub fn run_get(ctx: &Context, id: u64) -> Result<()> {
    let user_id = ctx.user_id()?;
    let repo = ctx.root.load()?;
    let task = lookup::find_task(&repo, id, Some(user_id))?;

    emit_success(ctx.output(), "task get", task, Some(&task_human(task)))
}

pub fn run_new(ctx: &Context, input: NewTask) -> Result<()> {
    let user_id = ctx.user_id()?;
    let _lock = ctx.root.lock()?;
    let mut repo = ctx.root.load()?;
    let task = mutation::create_task(&mut repo, user_id, input)?;
    ctx.root.save(&repo)?;

    let mut human = HumanOutput::new(format!("created task {}", task.id));
    human.push_summary("title", task.title.clone());
    human.push_summary("priority", task.priority.to_string());
    emit_success(ctx.output(), "task new", &task, Some(&human))
}

pub fn run_replace(ctx: &Context, id: u64, input: ReplaceTask) -> Result<()> {
    let user_id = ctx.user_id()?;
    let _lock = ctx.root.lock()?;
    let mut repo = ctx.root.load()?;
    let task = mutation::replace_task(&mut repo, user_id, id, input)?;
    ctx.root.save(&repo)?;

    emit_success(
        ctx.output(),
        "task replace",
        &task,
        Some(&task_human(&task)),
    )
}

pub fn run_patch(ctx: &Context, id: u64, pairs: &[String]) -> Result<()> {
    let user_id = ctx.user_id()?;
    let fields = parse_set_pairs(pairs)?;

    let _lock = ctx.root.lock()?;
    let mut repo = ctx.root.load()?;
    let task = mutation::patch_task(&mut repo, user_id, id, &fields)?;
    ctx.root.save(&repo)?;

    let mut human = HumanOutput::new(format!("updated task {}", task.id));
    for key in fields.keys() {
        human.push_summary(key.clone(), String::new());
    }
    emit_success(ctx.output(), "task patch", &task, Some(&human))
}

pub fn run_delete(ctx: &Context, id: u64) -> Result<()> {
    let user_id = ctx.user_id()?;
    let _lock = ctx.root.lock()?;
    let mut repo = ctx.root.load()?;
    let task = mutation::delete_task(&mut repo, user_id, id)?;
    ctx.root.save(&repo)?;

    let human = HumanOutput::new(format!("deleted task {} ({})", task.id, task.title));
    emit_success(ctx.output(), "task delete", &task, Some(&human))
}

/// Parse repeated `--set key=value` pairs into a field map. Values are
/// JSON scalars when they parse as one (`true`, `3`), strings otherwise.
fn parse_set_pairs(pairs: &[String]) -> Result<Map<String, Value>> {
    let mut fields = Map::new();
    for pair in pairs {
        let (key, raw) = pair.split_once('=').ok_or_else(|| {
            Error::InvalidArgument(format!("expected key=value, got '{pair}'"))
        })?;
        let value = match serde_json::from_str::<Value>(raw) {
            Ok(value) if !value.is_string() => value,
            _ => Value::String(raw.to_string()),
        };
        fields.insert(key.trim().to_string(), value);
    }
    Ok(fields)
}

fn task_line(task: &Task) -> String {
    format!(
        "#{} [{}] {} ({}, category {})",
        task.id,
        if task.completed { "x" } else { " " },
        task.title,
        task.priority,
        task.category_id
    )
}

fn task_human(task: &Task) -> HumanOutput {
    let mut human = HumanOutput::new(format!("task {}", task.id));
    human.push_summary("title", task.title.clone());
    if !task.description.is_empty() {
        human.push_summary("description", task.description.clone());
    }
    human.push_summary("completed", task.completed.to_string());
    human.push_summary("priority", task.priority.to_string());
    human.push_summary("category", task.category_id.to_string());
    human
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_pairs_parse_as_typed_values() {
        let pairs = vec![
            "title=new title".to_string(),
            "completed=true".to_string(),
            "category_id=3".to_string(),
        ];
        let fields = parse_set_pairs(&pairs).unwrap();
        assert_eq!(fields["title"], Value::String("new title".to_string()));
        assert_eq!(fields["completed"], Value::Bool(true));
        assert_eq!(fields["category_id"], serde_json::json!(3));
    }

    #[test]
    fn quoted_values_stay_strings() {
        let pairs = vec!["title=\"3\"".to_string()];
        let fields = parse_set_pairs(&pairs).unwrap();
        // A JSON string literal parses as a string, so the raw text
        // (including quotes) is kept verbatim.
        assert_eq!(fields["title"], Value::String("\"3\"".to_string()));
    }

    #[test]
    fn missing_equals_is_rejected() {
        let err = parse_set_pairs(&["completed".to_string()]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}
