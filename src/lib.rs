//! # jira-timelogs
//!
//! Monthly Jira worklog reports: collect every worklog of a calendar month,
//! total the hours per person and ticket, and write them to CSV or to an
//! Excel workbook with per-person and per-ticket summaries.
//!
//! ## Pipeline
//!
//! 1. **Month**: `--date YYYY-MM` is validated ([`libs::month`]), or the
//!    current month is used
//! 2. **Fetch**: issues with worklogs in the month are searched, their
//!    worklogs listed and filtered to the month ([`libs::worklog`], [`api`])
//! 3. **Aggregate**: hours are summed per (assignee, ticket, summary) and
//!    rounded to two decimals ([`libs::summary`])
//! 4. **Write**: CSV or Excel output named after the month ([`libs::export`])
//!
//! ## Usage
//!
//! ```rust,no_run
//! use jira_timelogs::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod libs;
