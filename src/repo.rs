//! The entity store.
//!
//! `Repository` owns the task, user, and category collections together with
//! one monotonic id counter per entity type. It is an explicit object passed
//! by reference into every component; there is no ambient state. Counters are
//! initialized above the highest seed id and never reuse a value, even after
//! deletion.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::model::{Category, Priority, Task, User};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub tasks: Vec<Task>,
    pub users: Vec<User>,
    pub categories: Vec<Category>,
    next_task_id: u64,
    next_category_id: u64,
}

impl Repository {
    /// An empty repository with counters starting at 1.
    pub fn empty() -> Self {
        Self {
            tasks: Vec::new(),
            users: Vec::new(),
            categories: Vec::new(),
            next_task_id: 1,
            next_category_id: 1,
        }
    }

    /// The demo dataset the system starts from: two users, three categories,
    /// three tasks. Counters resume above the highest seeded id.
    pub fn seeded() -> Self {
        let now = Utc::now();
        Self {
            tasks: vec![
                Task {
                    id: 1,
                    title: "Learn the basics".to_string(),
                    description: "Finish the tutorial".to_string(),
                    completed: false,
                    priority: Priority::High,
                    owner_id: 1,
                    category_id: 1,
                    created_at: now,
                    updated_at: None,
                },
                Task {
                    id: 2,
                    title: "Build the API".to_string(),
                    description: "Implement the endpoints".to_string(),
                    completed: true,
                    priority: Priority::Medium,
                    owner_id: 1,
                    category_id: 2,
                    created_at: now,
                    updated_at: None,
                },
                Task {
                    id: 3,
                    title: "Testing".to_string(),
                    description: "Exercise it end to end".to_string(),
                    completed: false,
                    priority: Priority::Low,
                    owner_id: 2,
                    category_id: 1,
                    created_at: now,
                    updated_at: None,
                },
            ],
            users: vec![
                User {
                    id: 1,
                    name: "Admin".to_string(),
                    email: "admin@example.com".to_string(),
                },
                User {
                    id: 2,
                    name: "User".to_string(),
                    email: "user@example.com".to_string(),
                },
            ],
            categories: vec![
                Category {
                    id: 1,
                    name: "Development".to_string(),
                },
                Category {
                    id: 2,
                    name: "Personal".to_string(),
                },
                Category {
                    id: 3,
                    name: "Home".to_string(),
                },
            ],
            next_task_id: 4,
            next_category_id: 4,
        }
    }

    /// Claim the next task id. Ids are never reused.
    pub fn allocate_task_id(&mut self) -> u64 {
        let id = self.next_task_id;
        self.next_task_id += 1;
        id
    }

    /// Claim the next category id. Ids are never reused.
    pub fn allocate_category_id(&mut self) -> u64 {
        let id = self.next_category_id;
        self.next_category_id += 1;
        id
    }

    pub fn next_task_id(&self) -> u64 {
        self.next_task_id
    }

    pub fn task_position(&self, id: u64) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    pub fn category_position(&self, id: u64) -> Option<usize> {
        self.categories.iter().position(|c| c.id == id)
    }

    /// Number of tasks currently referencing a category.
    pub fn category_reference_count(&self, category_id: u64) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.category_id == category_id)
            .count()
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_counters_start_above_highest_id() {
        let mut repo = Repository::seeded();
        assert_eq!(repo.allocate_task_id(), 4);
        assert_eq!(repo.allocate_task_id(), 5);
        assert_eq!(repo.allocate_category_id(), 4);
    }

    #[test]
    fn ids_are_not_reused_after_deletion() {
        let mut repo = Repository::seeded();
        let id = repo.allocate_task_id();
        assert_eq!(id, 4);
        // Removing everything does not rewind the counter.
        repo.tasks.clear();
        assert_eq!(repo.allocate_task_id(), 5);
    }

    #[test]
    fn reference_count_tracks_tasks() {
        let repo = Repository::seeded();
        assert_eq!(repo.category_reference_count(1), 2);
        assert_eq!(repo.category_reference_count(2), 1);
        assert_eq!(repo.category_reference_count(3), 0);
    }

    #[test]
    fn snapshot_roundtrip_preserves_counters() {
        let mut repo = Repository::seeded();
        repo.allocate_task_id();
        let json = serde_json::to_string(&repo).unwrap();
        let mut restored: Repository = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.allocate_task_id(), 5);
    }
}
