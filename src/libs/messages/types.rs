/// Every user-facing line the application prints.
///
/// Text lives in `display.rs`; call sites only pick a variant and hand it to
/// one of the `msg_*!` macros.
#[derive(Debug, Clone)]
pub enum Message {
    // === REPORT MESSAGES ===
    FetchingTimeLogs(String),           // month, YYYY-MM
    FetchedWorklogs(usize),             // worklogs kept
    AggregatedRecords(usize),           // aggregated rows
    NoTimeLogsFound(String),            // month, YYYY-MM
    TimeLogsSaved(String),              // file path
    ReportTotalHours(String),           // formatted hours

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigNotFound,
    ConfigModuleJira,
    ConfigModuleOutput,
    JiraNotConfigured,
    JiraConfigIncomplete(String),       // missing field names

    // === API MESSAGES ===
    JiraSearchingIssues(String),        // jql
    JiraFetchFailed(String),            // error message

    // === EXPORT MESSAGES ===
    ExportFailed(String),               // error message

    // === PROMPTS ===
    PromptJiraUrl,
    PromptJiraEmail,
    PromptJiraApiToken,
    PromptFilenamePrefix,
    PromptOutputDirectory,
}
