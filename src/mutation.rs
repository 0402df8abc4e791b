//! Mutation engine: create, replace, partial-update, and delete for tasks,
//! plus category create/delete with referential integrity.
//!
//! Field validation never short-circuits: every violated field is collected
//! before the operation fails, and the category existence check runs as an
//! explicit pass against the repository before anything is applied.

use chrono::Utc;
use serde_json::{Map, Value};

use crate::error::{Error, FieldError, Result};
use crate::lookup;
use crate::model::{Category, Priority, Task};
use crate::repo::Repository;

pub const TITLE_MIN: usize = 3;
pub const TITLE_MAX: usize = 100;
pub const DESCRIPTION_MAX: usize = 500;
pub const CATEGORY_NAME_MIN: usize = 2;
pub const CATEGORY_NAME_MAX: usize = 50;

/// Fields a partial update may touch.
const PATCH_FIELDS: [&str; 5] = [
    "title",
    "description",
    "priority",
    "completed",
    "category_id",
];

/// Payload for task creation. Enum-valued fields stay strings so a bad value
/// is reported alongside any other violation.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub completed: Option<bool>,
    pub category_id: u64,
}

/// Payload for a full replace: every mutable field except description is
/// required, with no partial semantics.
#[derive(Debug, Clone)]
pub struct ReplaceTask {
    pub title: String,
    pub description: Option<String>,
    pub priority: String,
    pub completed: bool,
    pub category_id: u64,
}

/// Create a task owned by `owner_id` and append it to the store.
pub fn create_task(repo: &mut Repository, owner_id: u64, input: NewTask) -> Result<Task> {
    let mut errors = Vec::new();

    check_title(&input.title, &mut errors);
    if let Some(description) = input.description.as_deref() {
        check_description(description, &mut errors);
    }
    let priority = check_priority(input.priority.as_deref(), &mut errors);
    check_category(repo, input.category_id, &mut errors);

    if !errors.is_empty() {
        return Err(Error::Validation(errors));
    }

    let task = Task {
        id: repo.allocate_task_id(),
        title: input.title.trim().to_string(),
        description: input
            .description
            .map(|d| d.trim().to_string())
            .unwrap_or_default(),
        completed: input.completed.unwrap_or(false),
        priority: priority.unwrap_or_default(),
        owner_id,
        category_id: input.category_id,
        created_at: Utc::now(),
        updated_at: None,
    };
    tracing::debug!(id = task.id, owner = owner_id, "task created");
    repo.tasks.push(task.clone());
    Ok(task)
}

/// Replace every mutable field of the caller's task. Id, owner, and creation
/// timestamp are untouched.
pub fn replace_task(
    repo: &mut Repository,
    owner_id: u64,
    id: u64,
    input: ReplaceTask,
) -> Result<Task> {
    let mut errors = Vec::new();

    check_title(&input.title, &mut errors);
    if let Some(description) = input.description.as_deref() {
        check_description(description, &mut errors);
    }
    let priority = check_priority(Some(&input.priority), &mut errors);
    check_category(repo, input.category_id, &mut errors);

    if !errors.is_empty() {
        return Err(Error::Validation(errors));
    }

    let position = owned_task_position(repo, owner_id, id)?;
    let task = &mut repo.tasks[position];
    task.title = input.title.trim().to_string();
    task.description = input
        .description
        .map(|d| d.trim().to_string())
        .unwrap_or_default();
    task.priority = priority.unwrap_or_default();
    task.completed = input.completed;
    task.category_id = input.category_id;
    task.updated_at = Some(Utc::now());
    Ok(task.clone())
}

/// Apply a partial update from a field/value mapping.
///
/// Unknown keys are reported as "not permitted"; known keys run the same
/// per-field rules as creation. All errors are collected before failing, and
/// nothing is applied unless every supplied field validates.
pub fn patch_task(
    repo: &mut Repository,
    owner_id: u64,
    id: u64,
    fields: &Map<String, Value>,
) -> Result<Task> {
    let position = owned_task_position(repo, owner_id, id)?;

    if fields.is_empty() {
        return Err(Error::validation(
            "fields",
            "at least one field is required",
        ));
    }

    let mut errors = Vec::new();
    for (key, value) in fields {
        if !PATCH_FIELDS.contains(&key.as_str()) {
            errors.push(FieldError::new(key.clone(), "not permitted"));
            continue;
        }
        match key.as_str() {
            "title" => match value.as_str() {
                Some(title) => check_title(title, &mut errors),
                None => errors.push(FieldError::new("title", "must be a string")),
            },
            "description" => match value.as_str() {
                Some(description) => check_description(description, &mut errors),
                None => errors.push(FieldError::new("description", "must be a string")),
            },
            "priority" => match value.as_str() {
                Some(priority) => {
                    check_priority(Some(priority), &mut errors);
                }
                None => errors.push(FieldError::new(
                    "priority",
                    "must be low, medium or high",
                )),
            },
            "completed" => {
                if value.as_bool().is_none() {
                    errors.push(FieldError::new("completed", "must be a boolean"));
                }
            }
            "category_id" => match value.as_u64() {
                Some(category_id) if category_id >= 1 => {
                    check_category(repo, category_id, &mut errors)
                }
                _ => errors.push(FieldError::new(
                    "category_id",
                    "must reference an existing category",
                )),
            },
            _ => unreachable!("key checked against PATCH_FIELDS"),
        }
    }

    if !errors.is_empty() {
        return Err(Error::Validation(errors));
    }

    let task = &mut repo.tasks[position];
    for (key, value) in fields {
        match (key.as_str(), value) {
            ("title", Value::String(title)) => task.title = title.trim().to_string(),
            ("description", Value::String(description)) => {
                task.description = description.trim().to_string()
            }
            ("priority", Value::String(priority)) => {
                if let Ok(priority) = priority.parse() {
                    task.priority = priority;
                }
            }
            ("completed", Value::Bool(completed)) => task.completed = *completed,
            ("category_id", value) => {
                if let Some(category_id) = value.as_u64() {
                    task.category_id = category_id;
                }
            }
            _ => {}
        }
    }
    task.updated_at = Some(Utc::now());
    Ok(task.clone())
}

/// Delete the caller's task and return the removed record.
///
/// The scan is scoped to the caller, so a task owned by someone else is
/// indistinguishable from a missing one (`NotFound`, never `Forbidden`).
/// This asymmetry with get/replace/patch is deliberate.
pub fn delete_task(repo: &mut Repository, owner_id: u64, id: u64) -> Result<Task> {
    let position = repo
        .tasks
        .iter()
        .position(|t| t.id == id && t.owner_id == owner_id)
        .ok_or(Error::NotFound { entity: "task", id })?;
    tracing::debug!(id, owner = owner_id, "task deleted");
    Ok(repo.tasks.remove(position))
}

/// Create a category. Names are trimmed before the length check.
pub fn create_category(repo: &mut Repository, name: &str) -> Result<Category> {
    let trimmed = name.trim();
    let len = trimmed.chars().count();
    if len < CATEGORY_NAME_MIN || len > CATEGORY_NAME_MAX {
        return Err(Error::validation(
            "name",
            format!(
                "must have between {CATEGORY_NAME_MIN} and {CATEGORY_NAME_MAX} characters"
            ),
        ));
    }
    let category = Category {
        id: repo.allocate_category_id(),
        name: trimmed.to_string(),
    };
    repo.categories.push(category.clone());
    Ok(category)
}

/// Delete a category, blocked with `Conflict` while any task references it.
pub fn delete_category(repo: &mut Repository, id: u64) -> Result<Category> {
    let position = repo.category_position(id).ok_or(Error::NotFound {
        entity: "category",
        id,
    })?;
    let references = repo.category_reference_count(id);
    if references > 0 {
        return Err(Error::Conflict(format!(
            "category {id} is referenced by {references} task(s)"
        )));
    }
    Ok(repo.categories.remove(position))
}

/// Position of the caller's task, with the same existence/ownership split
/// as the lookup service.
fn owned_task_position(repo: &Repository, owner_id: u64, id: u64) -> Result<usize> {
    let position = repo
        .task_position(id)
        .ok_or(Error::NotFound { entity: "task", id })?;
    if repo.tasks[position].owner_id != owner_id {
        return Err(Error::Forbidden(format!(
            "task {id} belongs to another user"
        )));
    }
    Ok(position)
}

fn check_title(title: &str, errors: &mut Vec<FieldError>) {
    let len = title.trim().chars().count();
    if len < TITLE_MIN || len > TITLE_MAX {
        errors.push(FieldError::new(
            "title",
            format!("must have between {TITLE_MIN} and {TITLE_MAX} characters"),
        ));
    }
}

fn check_description(description: &str, errors: &mut Vec<FieldError>) {
    if description.trim().chars().count() > DESCRIPTION_MAX {
        errors.push(FieldError::new(
            "description",
            format!("must not exceed {DESCRIPTION_MAX} characters"),
        ));
    }
}

fn check_priority(priority: Option<&str>, errors: &mut Vec<FieldError>) -> Option<Priority> {
    let value = priority?;
    match value.parse::<Priority>() {
        Ok(priority) => Some(priority),
        Err(_) => {
            errors.push(FieldError::new("priority", "must be low, medium or high"));
            None
        }
    }
}

/// Cross-entity check: the referenced category must exist at write time.
fn check_category(repo: &Repository, category_id: u64, errors: &mut Vec<FieldError>) {
    if category_id < 1 || lookup::find_category(repo, category_id).is_err() {
        errors.push(FieldError::new(
            "category_id",
            "must reference an existing category",
        ));
    }
}
