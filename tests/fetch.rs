#[cfg(test)]
mod tests {
    use jira_timelogs::api::error::Result;
    use jira_timelogs::api::{JiraError, JiraIssue, JiraIssueFields, JiraUser, JiraWorklog, WorklogSource};
    use jira_timelogs::commands::report::generate;
    use jira_timelogs::libs::config::OutputConfig;
    use jira_timelogs::libs::export::{ExportError, ExportFormat, ReportWriter, Sheet, TableSink};
    use jira_timelogs::libs::month::{DateRange, MonthSpec};
    use jira_timelogs::libs::worklog::{worklog_date, WorklogFetcher, WorklogRecord, UNKNOWN_AUTHOR};
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::Path;
    use tempfile::TempDir;
    use test_context::{test_context, AsyncTestContext};

    /// Tracker stand-in serving fixed issues and worklogs.
    #[derive(Default)]
    struct InMemorySource {
        issues: Vec<JiraIssue>,
        worklogs: HashMap<String, Vec<JiraWorklog>>,
        queries: RefCell<Vec<String>>,
        fail_worklogs: bool,
    }

    impl InMemorySource {
        fn with_issue(mut self, key: &str, summary: &str, worklogs: Vec<JiraWorklog>) -> Self {
            self.issues.push(JiraIssue {
                key: key.to_string(),
                fields: JiraIssueFields {
                    summary: summary.to_string(),
                },
            });
            self.worklogs.insert(key.to_string(), worklogs);
            self
        }
    }

    impl WorklogSource for InMemorySource {
        async fn search_issues(&self, jql: &str) -> Result<Vec<JiraIssue>> {
            self.queries.borrow_mut().push(jql.to_string());
            Ok(self.issues.clone())
        }

        async fn issue_worklogs(&self, issue_key: &str) -> Result<Vec<JiraWorklog>> {
            if self.fail_worklogs {
                return Err(JiraError::Network("connection reset".to_string()));
            }
            Ok(self.worklogs.get(issue_key).cloned().unwrap_or_default())
        }
    }

    /// Sink whose every write fails like a full disk.
    struct FailingSink;

    impl TableSink for FailingSink {
        fn write_delimited(&self, _path: &Path, _sheet: &Sheet) -> std::result::Result<(), ExportError> {
            Err(ExportError::Io(std::io::Error::other("no space left on device")))
        }

        fn write_workbook(&self, _path: &Path, _sheets: &[Sheet]) -> std::result::Result<(), ExportError> {
            Err(ExportError::Io(std::io::Error::other("no space left on device")))
        }
    }

    fn worklog(author: Option<&str>, started: &str, seconds: u64) -> JiraWorklog {
        JiraWorklog {
            author: author.map(|name| JiraUser {
                display_name: name.to_string(),
            }),
            started: started.to_string(),
            time_spent_seconds: seconds,
        }
    }

    fn march() -> DateRange {
        DateRange::for_month(2024, 3).unwrap()
    }

    struct FetchTestContext {
        temp_dir: TempDir,
        source: InMemorySource,
    }

    impl AsyncTestContext for FetchTestContext {
        async fn setup() -> Self {
            let source = InMemorySource::default()
                .with_issue(
                    "TR-123",
                    "Test Ticket 1",
                    vec![
                        worklog(Some("John Doe"), "2024-03-04T09:00:00.000+0000", 9000),
                        worklog(Some("John Doe"), "2024-03-05T09:00:00.000+0000", 5400),
                        worklog(Some("John Doe"), "2024-02-28T09:00:00.000+0000", 3600),
                    ],
                )
                .with_issue(
                    "TR-456",
                    "Test Ticket 2",
                    vec![
                        worklog(Some("Jane Smith"), "2024-03-31T23:30:00.000+0000", 10800),
                        worklog(Some("Jane Smith"), "2024-04-01T00:10:00.000+0000", 3600),
                    ],
                );
            FetchTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
                source,
            }
        }
    }

    #[tokio::test]
    async fn test_fetch_keeps_only_worklogs_inside_the_month() {
        let source = InMemorySource::default().with_issue(
            "TR-1",
            "Boundaries",
            vec![
                worklog(Some("A"), "2024-02-29T23:59:59.999+0000", 3600),
                worklog(Some("A"), "2024-03-01T00:00:00.000+0000", 3600),
                worklog(Some("A"), "2024-03-31T23:59:59.000+0000", 3600),
                worklog(Some("A"), "2024-04-01T00:00:00.000+0000", 3600),
            ],
        );
        let records = WorklogFetcher::new(source).fetch(&march()).await.unwrap();
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_converts_seconds_to_hours() {
        let source = InMemorySource::default().with_issue(
            "TR-1",
            "Hours",
            vec![
                worklog(Some("A"), "2024-03-10T10:00:00.000+0000", 3600),
                worklog(Some("A"), "2024-03-11T10:00:00.000+0000", 900),
            ],
        );
        let records = WorklogFetcher::new(source).fetch(&march()).await.unwrap();
        assert_eq!(
            records,
            vec![
                WorklogRecord::new("A", "TR-1", "Hours", 1.0),
                WorklogRecord::new("A", "TR-1", "Hours", 0.25),
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_missing_author_is_unknown() {
        let source = InMemorySource::default().with_issue(
            "TR-1",
            "Orphan",
            vec![worklog(None, "2024-03-10T10:00:00.000+0000", 1800)],
        );
        let records = WorklogFetcher::new(source).fetch(&march()).await.unwrap();
        assert_eq!(records[0].assignee, UNKNOWN_AUTHOR);
        assert_eq!(records[0].hours, 0.5);
    }

    #[tokio::test]
    async fn test_fetch_rejects_unparseable_timestamp() {
        let source = InMemorySource::default().with_issue(
            "TR-1",
            "Broken",
            vec![worklog(Some("A"), "10/03/2024 10:00", 1800)],
        );
        let err = WorklogFetcher::new(source).fetch(&march()).await.unwrap_err();
        assert!(matches!(err, JiraError::Timestamp { .. }));
    }

    #[tokio::test]
    async fn test_fetch_propagates_source_errors() {
        let mut source = InMemorySource::default().with_issue("TR-1", "X", vec![]);
        source.fail_worklogs = true;
        let err = WorklogFetcher::new(source).fetch(&march()).await.unwrap_err();
        assert!(matches!(err, JiraError::Network(_)));
    }

    #[tokio::test]
    async fn test_fetch_sends_month_jql() {
        let fetcher = WorklogFetcher::new(InMemorySource::default());
        let records = fetcher.fetch(&march()).await.unwrap();
        assert!(records.is_empty());
        assert_eq!(
            WorklogFetcher::<InMemorySource>::jql(&march()),
            r#"worklogDate >= "2024-03-01" AND worklogDate <= "2024-03-31""#
        );
    }

    #[test]
    fn test_worklog_date_uses_timestamp_offset() {
        let late = worklog(Some("A"), "2024-03-31T23:30:00.000-0500", 60);
        assert_eq!(worklog_date(&late).unwrap(), NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());

        let early = worklog(Some("A"), "2024-04-01T00:30:00.000+0200", 60);
        assert_eq!(worklog_date(&early).unwrap(), NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
    }

    #[test_context(FetchTestContext)]
    #[tokio::test]
    async fn test_generate_writes_aggregated_csv(ctx: &mut FetchTestContext) {
        let fetcher = WorklogFetcher::new(std::mem::take(&mut ctx.source));
        let writer = ReportWriter::new(OutputConfig {
            filename_prefix: "test_time_logs".to_string(),
            directory: ctx.temp_dir.path().to_path_buf(),
        });
        let spec = Some(MonthSpec { year: 2024, month: 3 });

        let outcome = generate(&fetcher, &writer, spec, ExportFormat::Csv).await.unwrap();

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].assignee, "Jane Smith");
        assert_eq!(outcome.records[0].total_hours, 3.0);
        assert_eq!(outcome.records[1].assignee, "John Doe");
        assert_eq!(outcome.records[1].total_hours, 4.0);

        let path = outcome.path.unwrap();
        assert_eq!(path, ctx.temp_dir.path().join("test_time_logs_2024_03.csv"));
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("John Doe,TR-123,Test Ticket 1,4.00"));
    }

    #[test_context(FetchTestContext)]
    #[tokio::test]
    async fn test_generate_empty_month_writes_nothing(ctx: &mut FetchTestContext) {
        let fetcher = WorklogFetcher::new(std::mem::take(&mut ctx.source));
        let writer = ReportWriter::new(OutputConfig {
            filename_prefix: "test_time_logs".to_string(),
            directory: ctx.temp_dir.path().to_path_buf(),
        });
        let spec = Some(MonthSpec { year: 2023, month: 1 });

        let outcome = generate(&fetcher, &writer, spec, ExportFormat::Excel).await.unwrap();

        assert!(outcome.records.is_empty());
        assert!(outcome.path.is_none());
        assert_eq!(std::fs::read_dir(ctx.temp_dir.path()).unwrap().count(), 0);
    }

    #[test_context(FetchTestContext)]
    #[tokio::test]
    async fn test_generate_reports_fetch_failure(ctx: &mut FetchTestContext) {
        let mut source = std::mem::take(&mut ctx.source);
        source.fail_worklogs = true;
        let writer = ReportWriter::new(OutputConfig {
            filename_prefix: "test_time_logs".to_string(),
            directory: ctx.temp_dir.path().to_path_buf(),
        });

        let err = generate(&WorklogFetcher::new(source), &writer, Some(MonthSpec { year: 2024, month: 3 }), ExportFormat::Csv)
            .await
            .unwrap_err();

        assert!(err.to_string().starts_with("Failed to fetch time logs from Jira"));
        assert_eq!(std::fs::read_dir(ctx.temp_dir.path()).unwrap().count(), 0);
    }

    #[test_context(FetchTestContext)]
    #[tokio::test]
    async fn test_generate_reports_write_failure(ctx: &mut FetchTestContext) {
        let fetcher = WorklogFetcher::new(std::mem::take(&mut ctx.source));
        let output = OutputConfig {
            filename_prefix: "test_time_logs".to_string(),
            directory: ctx.temp_dir.path().to_path_buf(),
        };
        let writer = ReportWriter::with_sink(output, FailingSink);
        let spec = Some(MonthSpec { year: 2024, month: 3 });

        for format in [ExportFormat::Csv, ExportFormat::Excel] {
            let err = generate(&fetcher, &writer, spec, format).await.unwrap_err();

            let message = err.to_string();
            assert!(message.starts_with("Failed to write report"), "{}", message);
            assert!(message.contains("no space left on device"));
        }
        assert_eq!(std::fs::read_dir(ctx.temp_dir.path()).unwrap().count(), 0);
    }
}
