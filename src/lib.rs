//! taskdesk - multi-user task tracking library
//!
//! Core functionality for the taskdesk CLI: a shared task store with
//! per-user ownership, categories, filtered listings, and statistics.
//!
//! # Core Concepts
//!
//! - **Ownership**: every task belongs to one user, and reads and writes
//!   are scoped to the acting user
//! - **Categories**: shared labels with referential integrity (a category
//!   in use cannot be deleted)
//! - **Listings**: filtering, OR search, sorting, and pagination in one pass
//! - **Statistics**: per-user completion summary plus an admin-only
//!   productivity report
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `taskdesk.toml`
//! - `error`: Error types and result aliases
//! - `model`: Task, user, and category records
//! - `repo`: The entity store and id counters
//! - `lookup`: Id-addressed resolution with ownership checks
//! - `query`: Listing pipeline (filter, search, sort, paginate)
//! - `mutation`: Create, replace, patch, delete with field validation
//! - `stats`: Completion and productivity aggregation
//! - `storage`: Snapshot persistence under the data root
//! - `lock`: File locking and atomic writes for concurrency safety

pub mod cli;
pub mod config;
pub mod error;
pub mod lock;
pub mod lookup;
pub mod model;
pub mod mutation;
pub mod output;
pub mod query;
pub mod repo;
pub mod stats;
pub mod storage;

pub use error::{Error, Result};
