#[cfg(test)]
mod tests {
    use jira_timelogs::libs::config::OutputConfig;
    use jira_timelogs::libs::export::{
        detail_sheet, person_sheet, ticket_sheet, Cell, ExportError, ExportFormat, FileSink, ReportWriter, Sheet,
        TableSink, SHEET_BY_PERSON, SHEET_BY_TICKET, SHEET_TIME_LOGS,
    };
    use jira_timelogs::libs::month::MonthSpec;
    use jira_timelogs::libs::worklog::AggregatedRecord;
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    const MARCH_2024: MonthSpec = MonthSpec { year: 2024, month: 3 };

    /// Records every write instead of touching the filesystem.
    #[derive(Default)]
    struct RecordingSink {
        delimited: RefCell<Vec<(PathBuf, Sheet)>>,
        workbooks: RefCell<Vec<(PathBuf, Vec<Sheet>)>>,
    }

    impl RecordingSink {
        fn calls(&self) -> usize {
            self.delimited.borrow().len() + self.workbooks.borrow().len()
        }
    }

    impl TableSink for RecordingSink {
        fn write_delimited(&self, path: &Path, sheet: &Sheet) -> Result<(), ExportError> {
            self.delimited.borrow_mut().push((path.to_path_buf(), sheet.clone()));
            Ok(())
        }

        fn write_workbook(&self, path: &Path, sheets: &[Sheet]) -> Result<(), ExportError> {
            self.workbooks.borrow_mut().push((path.to_path_buf(), sheets.to_vec()));
            Ok(())
        }
    }

    struct ExportTestContext {
        temp_dir: TempDir,
        records: Vec<AggregatedRecord>,
    }

    impl ExportTestContext {
        fn output(&self, prefix: &str) -> OutputConfig {
            OutputConfig {
                filename_prefix: prefix.to_string(),
                directory: self.temp_dir.path().to_path_buf(),
            }
        }
    }

    impl TestContext for ExportTestContext {
        fn setup() -> Self {
            let record = |assignee: &str, id: &str, summary: &str, hours: f64| AggregatedRecord {
                assignee: assignee.to_string(),
                ticket_id: id.to_string(),
                ticket_summary: summary.to_string(),
                total_hours: hours,
            };
            ExportTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
                records: vec![
                    record("Jane Smith", "TR-456", "Test Ticket 2", 3.0),
                    record("John Doe", "TR-123", "Test Ticket 1", 4.0),
                    record("John Doe", "TR-456", "Test Ticket 2", 0.25),
                ],
            }
        }
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_empty_report_never_writes(ctx: &mut ExportTestContext) {
        let writer = ReportWriter::with_sink(ctx.output("test_time_logs"), RecordingSink::default());
        for format in [ExportFormat::Csv, ExportFormat::Excel] {
            let written = writer.write(&[], Some(MARCH_2024), format).unwrap();
            assert!(written.is_none());
        }
        assert_eq!(writer.sink().calls(), 0);
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_filename_from_prefix_and_month(ctx: &mut ExportTestContext) {
        let writer = ReportWriter::with_sink(ctx.output("test_time_logs"), RecordingSink::default());
        assert_eq!(writer.filename(Some(MARCH_2024), ExportFormat::Csv), "test_time_logs_2024_03.csv");
        assert_eq!(writer.filename(Some(MARCH_2024), ExportFormat::Excel), "test_time_logs_2024_03.xlsx");

        let written = writer.write(&ctx.records, Some(MARCH_2024), ExportFormat::Csv).unwrap();
        let expected = ctx.temp_dir.path().join("test_time_logs_2024_03.csv");
        assert_eq!(written, Some(expected.clone()));

        let calls = writer.sink().delimited.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, expected);
        assert_eq!(calls[0].1.rows.len(), 3);
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_filename_defaults_to_current_month(ctx: &mut ExportTestContext) {
        let writer = ReportWriter::with_sink(ctx.output("logs"), RecordingSink::default());
        let current = MonthSpec::current();
        let expected = format!("logs_{:04}_{:02}.csv", current.year, current.month);
        assert_eq!(writer.filename(None, ExportFormat::Csv), expected);
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_excel_gets_three_sheets(ctx: &mut ExportTestContext) {
        let writer = ReportWriter::with_sink(ctx.output("test_time_logs"), RecordingSink::default());
        writer.write(&ctx.records, Some(MARCH_2024), ExportFormat::Excel).unwrap();

        assert!(writer.sink().delimited.borrow().is_empty());
        let workbooks = writer.sink().workbooks.borrow();
        assert_eq!(workbooks.len(), 1);
        let names: Vec<&str> = workbooks[0].1.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec![SHEET_TIME_LOGS, SHEET_BY_PERSON, SHEET_BY_TICKET]);
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_summary_sheets(ctx: &mut ExportTestContext) {
        let by_person = person_sheet(&ctx.records);
        assert_eq!(by_person.headers, vec!["Assignee", "Hours Logged"]);
        assert_eq!(
            by_person.rows,
            vec![
                vec![Cell::Text("Jane Smith".to_string()), Cell::Hours(3.0)],
                vec![Cell::Text("John Doe".to_string()), Cell::Hours(4.25)],
            ]
        );

        let by_ticket = ticket_sheet(&ctx.records);
        assert_eq!(by_ticket.headers, vec!["Ticket Number", "Ticket Description", "Hours Logged"]);
        assert_eq!(
            by_ticket.rows,
            vec![
                vec![
                    Cell::Text("TR-123".to_string()),
                    Cell::Text("Test Ticket 1".to_string()),
                    Cell::Hours(4.0)
                ],
                vec![
                    Cell::Text("TR-456".to_string()),
                    Cell::Text("Test Ticket 2".to_string()),
                    Cell::Hours(3.25)
                ],
            ]
        );
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_column_widths_cover_longest_value(ctx: &mut ExportTestContext) {
        let sheet = detail_sheet(&ctx.records);
        assert_eq!(sheet.column_widths(), vec![10, 13, 18, 12]);
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_csv_written_to_disk(ctx: &mut ExportTestContext) {
        let writer = ReportWriter::new(ctx.output("test_time_logs"));
        let path = writer
            .write(&ctx.records, Some(MARCH_2024), ExportFormat::Csv)
            .unwrap()
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Assignee,Ticket Number,Ticket Description,Hours Logged",
                "Jane Smith,TR-456,Test Ticket 2,3.00",
                "John Doe,TR-123,Test Ticket 1,4.00",
                "John Doe,TR-456,Test Ticket 2,0.25",
            ]
        );
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_csv_quotes_commas(ctx: &mut ExportTestContext) {
        let path = ctx.temp_dir.path().join("quoted.csv");
        let mut sheet = Sheet::new("Time Logs", &["Ticket Description"]);
        sheet.rows.push(vec![Cell::Text("Fix login, again".to_string())]);
        FileSink.write_delimited(&path, &sheet).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"Fix login, again\""));
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_excel_written_to_disk(ctx: &mut ExportTestContext) {
        let writer = ReportWriter::new(ctx.output("test_time_logs"));
        let path = writer
            .write(&ctx.records, Some(MARCH_2024), ExportFormat::Excel)
            .unwrap()
            .unwrap();

        assert_eq!(path.file_name().unwrap(), "test_time_logs_2024_03.xlsx");
        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_missing_output_directory_is_created(ctx: &mut ExportTestContext) {
        let mut output = ctx.output("nested");
        output.directory = ctx.temp_dir.path().join("reports").join("2024");
        let writer = ReportWriter::new(output);
        let path = writer
            .write(&ctx.records, Some(MARCH_2024), ExportFormat::Csv)
            .unwrap()
            .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_export_format_extension() {
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::Excel.extension(), "xlsx");
    }
}
