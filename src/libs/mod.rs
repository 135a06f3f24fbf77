//! Core library modules: month handling, worklog fetching, aggregation,
//! report output, configuration and user-facing messages.
//!
//! ```rust
//! use jira_timelogs::libs::summary::aggregate;
//! use jira_timelogs::libs::worklog::WorklogRecord;
//!
//! let rows = aggregate(&[
//!     WorklogRecord::new("John Doe", "TR-123", "Test Ticket 1", 2.5),
//!     WorklogRecord::new("John Doe", "TR-123", "Test Ticket 1", 1.5),
//! ]);
//! assert_eq!(rows[0].total_hours, 4.0);
//! ```

pub mod config;
pub mod data_storage;
pub mod export;
pub mod formatter;
pub mod messages;
pub mod month;
pub mod summary;
pub mod view;
pub mod worklog;
