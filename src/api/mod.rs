//! Issue tracker access.
//!
//! The report pipeline only needs two read-only capabilities from the
//! tracker: find the issues that carry worklogs in a period, and list every
//! worklog of one issue. [`WorklogSource`] names exactly those two, so the
//! fetcher can be driven by the real [`Jira`] client or by an in-memory
//! source in tests.
//!
//! ```rust,no_run
//! use jira_timelogs::api::{Jira, JiraConfig, WorklogSource};
//!
//! # async fn run() -> jira_timelogs::api::error::Result<()> {
//! let config = JiraConfig {
//!     api_url: "https://your-domain.atlassian.net".to_string(),
//!     email: "you@example.com".to_string(),
//!     api_token: "token".to_string(),
//!     ..JiraConfig::default()
//! };
//! let jira = Jira::new(&config)?;
//! let issues = jira.search_issues(r#"worklogDate >= "2024-03-01""#).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod jira;

pub use error::JiraError;
pub use jira::{Jira, JiraConfig, JiraIssue, JiraIssueFields, JiraUser, JiraWorklog};

/// Read-only tracker capabilities used by the worklog fetcher.
#[allow(async_fn_in_trait)]
pub trait WorklogSource {
    /// Returns every issue matching `jql`, following pagination to the end.
    ///
    /// # Errors
    ///
    /// Network, authentication and decoding failures are returned as-is;
    /// nothing is retried.
    async fn search_issues(&self, jql: &str) -> error::Result<Vec<JiraIssue>>;

    /// Returns the complete worklog history of one issue.
    async fn issue_worklogs(&self, issue_key: &str) -> error::Result<Vec<JiraWorklog>>;
}
