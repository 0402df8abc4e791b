//! Id-addressed entity resolution.
//!
//! Existence and ownership are distinct failures: a task that exists but
//! belongs to someone else is `Forbidden`, not `NotFound`. Delete-by-id is
//! the one exception (handled in the mutation engine), which scans only the
//! caller's tasks and reports `NotFound` for foreign ids.

use crate::error::{Error, Result};
use crate::model::{Category, Task, User};
use crate::repo::Repository;

/// Resolve a task by id. With `owner` given, confirms the caller owns it.
pub fn find_task(repo: &Repository, id: u64, owner: Option<u64>) -> Result<&Task> {
    let task = repo
        .tasks
        .iter()
        .find(|t| t.id == id)
        .ok_or(Error::NotFound { entity: "task", id })?;
    if let Some(owner_id) = owner {
        if task.owner_id != owner_id {
            return Err(Error::Forbidden(format!(
                "task {id} belongs to another user"
            )));
        }
    }
    Ok(task)
}

pub fn find_user(repo: &Repository, id: u64) -> Result<&User> {
    repo.users
        .iter()
        .find(|u| u.id == id)
        .ok_or(Error::NotFound { entity: "user", id })
}

pub fn find_category(repo: &Repository, id: u64) -> Result<&Category> {
    repo.categories
        .iter()
        .find(|c| c.id == id)
        .ok_or(Error::NotFound {
            entity: "category",
            id,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_task_is_not_found() {
        let repo = Repository::seeded();
        let err = find_task(&repo, 99, None).unwrap_err();
        assert!(matches!(err, Error::NotFound { entity: "task", .. }));
    }

    #[test]
    fn foreign_task_is_forbidden_not_not_found() {
        let repo = Repository::seeded();
        // Task 3 belongs to user 2.
        let err = find_task(&repo, 3, Some(1)).unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
        assert!(find_task(&repo, 3, Some(2)).is_ok());
    }

    #[test]
    fn unscoped_lookup_ignores_ownership() {
        let repo = Repository::seeded();
        assert_eq!(find_task(&repo, 3, None).unwrap().owner_id, 2);
    }

    #[test]
    fn user_and_category_lookups() {
        let repo = Repository::seeded();
        assert_eq!(find_user(&repo, 1).unwrap().name, "Admin");
        assert!(matches!(
            find_user(&repo, 42).unwrap_err(),
            Error::NotFound { entity: "user", .. }
        ));
        assert_eq!(find_category(&repo, 2).unwrap().name, "Personal");
        assert!(matches!(
            find_category(&repo, 42).unwrap_err(),
            Error::NotFound {
                entity: "category",
                ..
            }
        ));
    }
}
