//! Worklog records and the fetcher that produces them.
//!
//! The fetcher asks the tracker for every issue with a worklog in the month,
//! pulls each issue's full worklog history, and keeps only the entries that
//! started inside the month. The server-side `worklogDate` filter matches
//! issues, not individual worklogs, so the local date check is what makes
//! the result correct.

use crate::api::{error::Result, JiraError, JiraIssue, JiraWorklog, WorklogSource};
use crate::libs::{messages::Message, month::DateRange};
use crate::msg_debug;
use chrono::{DateTime, NaiveDate};

/// Timestamp layout Jira uses for `started`, e.g. `2024-03-15T10:00:00.000+0000`.
pub const JIRA_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Name used when a worklog has no author (deleted account).
pub const UNKNOWN_AUTHOR: &str = "Unknown";

const SECONDS_PER_HOUR: f64 = 3600.0;

/// A single worklog entry, flattened with its issue.
#[derive(Debug, Clone, PartialEq)]
pub struct WorklogRecord {
    pub assignee: String,
    pub ticket_id: String,
    pub ticket_summary: String,
    /// Fractional hours, unrounded.
    pub hours: f64,
}

impl WorklogRecord {
    pub fn new(assignee: &str, ticket_id: &str, ticket_summary: &str, hours: f64) -> Self {
        Self {
            assignee: assignee.to_string(),
            ticket_id: ticket_id.to_string(),
            ticket_summary: ticket_summary.to_string(),
            hours,
        }
    }
}

/// Total hours for one (assignee, ticket, summary) group.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRecord {
    pub assignee: String,
    pub ticket_id: String,
    pub ticket_summary: String,
    /// Group sum rounded to two decimals.
    pub total_hours: f64,
}

/// Pulls worklogs for a date range out of a [`WorklogSource`].
pub struct WorklogFetcher<S: WorklogSource> {
    source: S,
}

impl<S: WorklogSource> WorklogFetcher<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// JQL selecting issues with at least one worklog dated inside `range`.
    pub fn jql(range: &DateRange) -> String {
        format!(
            "worklogDate >= \"{}\" AND worklogDate <= \"{}\"",
            range.start.format("%Y-%m-%d"),
            range.end.format("%Y-%m-%d")
        )
    }

    /// Fetches every worklog that started inside `range`.
    ///
    /// Requests are issued one after another. Output order follows the
    /// tracker's answer and carries no meaning.
    ///
    /// # Errors
    ///
    /// Any tracker failure, or a worklog whose `started` value cannot be
    /// parsed, aborts the whole fetch.
    pub async fn fetch(&self, range: &DateRange) -> Result<Vec<WorklogRecord>> {
        let jql = Self::jql(range);
        msg_debug!(Message::JiraSearchingIssues(jql.clone()));
        let issues = self.source.search_issues(&jql).await?;

        let mut records = Vec::new();
        for issue in &issues {
            let worklogs = self.source.issue_worklogs(&issue.key).await?;
            let before = records.len();
            for worklog in &worklogs {
                if range.contains(worklog_date(worklog)?) {
                    records.push(to_record(issue, worklog));
                }
            }
            tracing::debug!(
                issue = %issue.key,
                total = worklogs.len(),
                kept = records.len() - before,
                "filtered worklogs"
            );
        }

        tracing::debug!(issues = issues.len(), records = records.len(), "fetch complete");
        Ok(records)
    }
}

/// Calendar date of a worklog's start, in the timestamp's own offset.
pub fn worklog_date(worklog: &JiraWorklog) -> Result<NaiveDate> {
    DateTime::parse_from_str(&worklog.started, JIRA_TIMESTAMP_FORMAT)
        .map(|started| started.date_naive())
        .map_err(|err| JiraError::Timestamp {
            value: worklog.started.clone(),
            reason: err.to_string(),
        })
}

fn to_record(issue: &JiraIssue, worklog: &JiraWorklog) -> WorklogRecord {
    let assignee = worklog
        .author
        .as_ref()
        .map(|author| author.display_name.as_str())
        .unwrap_or(UNKNOWN_AUTHOR);
    WorklogRecord::new(
        assignee,
        &issue.key,
        &issue.fields.summary,
        worklog.time_spent_seconds as f64 / SECONDS_PER_HOUR,
    )
}
