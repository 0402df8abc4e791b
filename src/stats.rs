//! Statistics over the task collections.
//!
//! Two views: a per-user completion summary any user can request about their
//! own tasks, and a global productivity report restricted to the admin user.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::repo::Repository;

/// Completion counts for one user's tasks.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionSummary {
    pub user_id: u64,
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Completed share of total, as a percentage rounded to two decimals.
    /// Zero when the user has no tasks.
    pub completion_pct: f64,
}

/// One row of the global productivity report.
#[derive(Debug, Clone, Serialize)]
pub struct ProductivityRow {
    pub user_id: u64,
    pub user_name: String,
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub completion_pct: f64,
}

/// Summarize the caller's own tasks.
pub fn completion_summary(repo: &Repository, user_id: u64) -> CompletionSummary {
    let total = repo.tasks.iter().filter(|t| t.owner_id == user_id).count();
    let completed = repo
        .tasks
        .iter()
        .filter(|t| t.owner_id == user_id && t.completed)
        .count();
    CompletionSummary {
        user_id,
        total,
        completed,
        pending: total - completed,
        completion_pct: percentage(completed, total),
    }
}

/// Per-user report over the whole store. Only the configured admin user may
/// call this; everyone else gets `Forbidden`. Users with zero tasks still
/// appear, and rows come out in user-id order.
pub fn global_productivity(
    repo: &Repository,
    caller_id: u64,
    admin_id: u64,
) -> Result<Vec<ProductivityRow>> {
    if caller_id != admin_id {
        return Err(Error::Forbidden(
            "global statistics are restricted to the admin user".to_string(),
        ));
    }

    let mut rows: Vec<ProductivityRow> = repo
        .users
        .iter()
        .map(|user| {
            let total = repo.tasks.iter().filter(|t| t.owner_id == user.id).count();
            let completed = repo
                .tasks
                .iter()
                .filter(|t| t.owner_id == user.id && t.completed)
                .count();
            ProductivityRow {
                user_id: user.id,
                user_name: user.name.clone(),
                total,
                completed,
                pending: total - completed,
                completion_pct: percentage(completed, total),
            }
        })
        .collect();
    rows.sort_by_key(|row| row.user_id);
    Ok(rows)
}

/// `completed / total` as a percentage with two-decimal rounding; 0 for an
/// empty denominator.
fn percentage(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = completed as f64 / total as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}
