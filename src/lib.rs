//! Orgchart - organisation chart service
//!
//! This crate keeps flat employee and team records and derives from them the
//! team hierarchy, the reporting hierarchy, partition charts, headcount
//! statistics, flat exports and a GitHub team sync plan.

pub mod config;
pub mod entity;
pub mod error;
pub mod export;
pub mod github;
pub mod handlers;
pub mod hierarchy;
pub mod routes;
pub mod state;
pub mod stats;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, HierarchyError, StoreError};
pub use state::AppState;
pub use store::{RecordStore, Snapshot};
