//! Display implementation for application messages.
//!
//! All user-facing text is kept here so the rest of the crate only deals
//! with typed `Message` variants. Parameters are interpolated in one place,
//! which keeps wording consistent between the CSV and Excel paths and
//! between normal and debug output.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === REPORT MESSAGES ===
            Message::FetchingTimeLogs(month) => format!("Fetching time logs from Jira for {}...", month),
            Message::FetchedWorklogs(count) => format!("Collected {} worklog(s) for the month", count),
            Message::AggregatedRecords(count) => format!("Aggregated into {} row(s)", count),
            Message::NoTimeLogsFound(month) => format!("No time logs found for {}.", month),
            Message::TimeLogsSaved(path) => format!("Time logs have been saved to {}", path),
            Message::ReportTotalHours(hours) => format!("Total hours logged: {}", hours),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigNotFound => "No configuration file to remove".to_string(),
            Message::ConfigModuleJira => "Jira settings".to_string(),
            Message::ConfigModuleOutput => "Output settings".to_string(),
            Message::JiraNotConfigured => {
                "Jira is not configured. Run `jira-timelogs init` or set JIRA_URL, JIRA_EMAIL and JIRA_API_TOKEN".to_string()
            }
            Message::JiraConfigIncomplete(fields) => format!("Jira configuration is incomplete, missing: {}", fields),

            // === API MESSAGES ===
            Message::JiraSearchingIssues(jql) => format!("Searching Jira issues: {}", jql),
            Message::JiraFetchFailed(error) => format!("Failed to fetch time logs from Jira: {}", error),

            // === EXPORT MESSAGES ===
            Message::ExportFailed(error) => format!("Failed to write report: {}", error),

            // === PROMPTS ===
            Message::PromptJiraUrl => "Enter your Jira URL (e.g., https://your-domain.atlassian.net)".to_string(),
            Message::PromptJiraEmail => "Enter your Jira account email".to_string(),
            Message::PromptJiraApiToken => "Enter your Jira API token".to_string(),
            Message::PromptFilenamePrefix => "Enter the output filename prefix".to_string(),
            Message::PromptOutputDirectory => "Enter the output directory".to_string(),
        };
        write!(f, "{}", text)
    }
}
