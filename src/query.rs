//! Query engine for the task collection.
//!
//! Listing always scopes to the authenticated owner first, then applies each
//! present filter as an AND-conjunction, then the free-text OR search, then
//! sorting, then pagination. Parameter validation aggregates every violated
//! field into a single failure instead of stopping at the first.

use serde::Serialize;

use crate::error::{Error, FieldError, Result};
use crate::model::{Priority, Task};
use crate::repo::Repository;

/// Page-size bounds applied during query validation.
#[derive(Debug, Clone, Copy)]
pub struct ListLimits {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for ListLimits {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

/// Sort key for task listings. Absent (or "none") preserves collection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    Priority,
}

/// Raw listing parameters as supplied by the transport. Enum-valued fields
/// stay strings here so a bad value lands in the aggregated validation
/// report together with any other violated field.
#[derive(Debug, Clone, Default)]
pub struct TaskQuery {
    pub completed: Option<bool>,
    pub priority: Option<String>,
    /// Redundant narrowing against the already owner-scoped list; preserved
    /// literally from the source system.
    pub user_id: Option<u64>,
    pub category_id: Option<u64>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug)]
struct ResolvedQuery {
    completed: Option<bool>,
    priority: Option<Priority>,
    user_id: Option<u64>,
    category_id: Option<u64>,
    search: Option<String>,
    sort: Option<SortKey>,
    page: u64,
    page_size: u64,
}

/// One page of results plus the pre-pagination totals.
#[derive(Debug, Clone, Serialize)]
pub struct TaskPage {
    pub items: Vec<Task>,
    pub total: usize,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

impl TaskQuery {
    fn resolve(&self, limits: &ListLimits) -> Result<ResolvedQuery> {
        let mut errors = Vec::new();

        let priority = match self.priority.as_deref() {
            None => None,
            Some(value) => match value.parse::<Priority>() {
                Ok(priority) => Some(priority),
                Err(_) => {
                    errors.push(FieldError::new(
                        "priority",
                        "must be low, medium or high",
                    ));
                    None
                }
            },
        };

        let sort = match self.sort.as_deref().map(str::trim) {
            None | Some("none") => None,
            Some("title") => Some(SortKey::Title),
            Some("priority") => Some(SortKey::Priority),
            Some(_) => {
                errors.push(FieldError::new(
                    "sort",
                    "must be title, priority or none",
                ));
                None
            }
        };

        if self.user_id == Some(0) {
            errors.push(FieldError::new("user_id", "must be a positive integer"));
        }
        if self.category_id == Some(0) {
            errors.push(FieldError::new(
                "category_id",
                "must be a positive integer",
            ));
        }

        let page = self.page.unwrap_or(1);
        if page < 1 {
            errors.push(FieldError::new("page", "must be a positive integer"));
        }

        let page_size = self.page_size.unwrap_or(limits.default_page_size);
        if page_size < 1 || page_size > limits.max_page_size {
            errors.push(FieldError::new(
                "page_size",
                format!("must be between 1 and {}", limits.max_page_size),
            ));
        }

        if !errors.is_empty() {
            return Err(Error::Validation(errors));
        }

        Ok(ResolvedQuery {
            completed: self.completed,
            priority,
            user_id: self.user_id,
            category_id: self.category_id,
            search: self.search.clone(),
            sort,
            page,
            page_size,
        })
    }
}

/// List the owner's tasks with filters, search, sorting, and pagination.
pub fn list_tasks(
    repo: &Repository,
    owner_id: u64,
    query: &TaskQuery,
    limits: &ListLimits,
) -> Result<TaskPage> {
    let query = query.resolve(limits)?;

    // The owner scope is unconditional: a user only ever sees their own tasks.
    let mut matches: Vec<&Task> = repo
        .tasks
        .iter()
        .filter(|t| t.owner_id == owner_id)
        .collect();

    if let Some(completed) = query.completed {
        matches.retain(|t| t.completed == completed);
    }
    if let Some(priority) = query.priority {
        matches.retain(|t| t.priority == priority);
    }
    if let Some(user_id) = query.user_id {
        matches.retain(|t| t.owner_id == user_id);
    }
    if let Some(category_id) = query.category_id {
        matches.retain(|t| t.category_id == category_id);
    }

    if let Some(search) = query.search.as_deref() {
        let terms = split_search_terms(search);
        if !terms.is_empty() {
            matches.retain(|t| task_matches_any(t, &terms));
        }
    }

    match query.sort {
        Some(SortKey::Title) => matches.sort_by(|a, b| a.title.cmp(&b.title)),
        // Stable sort: equal severities keep their prior relative order.
        Some(SortKey::Priority) => {
            matches.sort_by(|a, b| b.priority.severity().cmp(&a.priority.severity()))
        }
        None => {}
    }

    let total = matches.len();
    let offset = (query.page - 1).saturating_mul(query.page_size) as usize;
    let items: Vec<Task> = matches
        .into_iter()
        .skip(offset)
        .take(query.page_size as usize)
        .cloned()
        .collect();

    let total_pages = if total == 0 {
        0
    } else {
        (total as u64).div_ceil(query.page_size)
    };

    Ok(TaskPage {
        items,
        total,
        page: query.page,
        page_size: query.page_size,
        total_pages,
    })
}

/// Split a free-text query on the literal token `OR` (case-insensitive,
/// surrounded by whitespace) into lowercase trimmed terms, dropping empties.
/// A blank query yields no terms and therefore filters nothing.
fn split_search_terms(query: &str) -> Vec<String> {
    let mut raw = Vec::new();
    let mut remaining = query;
    while let Some((before, after)) = split_once_or(remaining) {
        raw.push(before);
        remaining = after;
    }
    raw.push(remaining);

    raw.into_iter()
        .map(|term| term.trim().to_lowercase())
        .filter(|term| !term.is_empty())
        .collect()
}

/// Find the first `\s+OR\s+` separator, returning the text before it and the
/// text after its trailing whitespace run.
fn split_once_or(s: &str) -> Option<(&str, &str)> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i + 3 < bytes.len() {
        if bytes[i].is_ascii_whitespace()
            && bytes[i + 1].eq_ignore_ascii_case(&b'o')
            && bytes[i + 2].eq_ignore_ascii_case(&b'r')
            && bytes[i + 3].is_ascii_whitespace()
        {
            let mut end = i + 4;
            while end < bytes.len() && bytes[end].is_ascii_whitespace() {
                end += 1;
            }
            return Some((&s[..i], &s[end..]));
        }
        i += 1;
    }
    None
}

fn task_matches_any(task: &Task, terms: &[String]) -> bool {
    let title = task.title.to_lowercase();
    let description = task.description.to_lowercase();
    terms
        .iter()
        .any(|term| title.contains(term) || description.contains(term))
}
