//! Report output: CSV or a multi-sheet Excel workbook.
//!
//! The aggregated rows are first turned into plain [`Sheet`]s (headers plus
//! typed cells). A [`TableSink`] then puts those sheets on disk. Keeping the
//! sink behind a trait lets the file naming, the empty-report rule and the
//! pivot layout be tested without touching the filesystem.
//!
//! ## Outputs
//!
//! - **CSV**: the detail table only, header
//!   `Assignee,Ticket Number,Ticket Description,Hours Logged`.
//! - **Excel**: three sheets, `Time Logs` (the detail table),
//!   `Summary by Person` and `Summary by Ticket`. Columns are sized to the
//!   longest rendered value.
//!
//! ## File naming
//!
//! `{prefix}_{YYYY}_{MM}.{csv|xlsx}` inside the configured output
//! directory, e.g. `jira_time_logs_2024_03.csv`.
//!
//! ```rust,no_run
//! use jira_timelogs::libs::config::OutputConfig;
//! use jira_timelogs::libs::export::{ExportFormat, ReportWriter};
//! use jira_timelogs::libs::month::MonthSpec;
//!
//! let writer = ReportWriter::new(OutputConfig::default());
//! let spec = MonthSpec { year: 2024, month: 3 };
//! let written = writer.write(&[], Some(spec), ExportFormat::Csv)?;
//! assert!(written.is_none());
//! # Ok::<(), jira_timelogs::libs::export::ExportError>(())
//! ```

use crate::{
    libs::{
        config::OutputConfig,
        formatter::format_hours,
        messages::Message,
        month::MonthSpec,
        summary::{totals_by_person, totals_by_ticket},
        worklog::AggregatedRecord,
    },
    msg_info,
};
use rust_xlsxwriter::{Color, Format, Workbook, XlsxError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const HEADER_ASSIGNEE: &str = "Assignee";
pub const HEADER_TICKET_NUMBER: &str = "Ticket Number";
pub const HEADER_TICKET_DESCRIPTION: &str = "Ticket Description";
pub const HEADER_HOURS_LOGGED: &str = "Hours Logged";

pub const SHEET_TIME_LOGS: &str = "Time Logs";
pub const SHEET_BY_PERSON: &str = "Summary by Person";
pub const SHEET_BY_TICKET: &str = "Summary by Ticket";

/// Extra characters added to every computed Excel column width.
const COLUMN_PADDING: f64 = 2.0;

/// Output formats selectable with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// Comma-separated detail table.
    Csv,
    /// `.xlsx` workbook with the detail table and two summaries.
    Excel,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xlsx",
        }
    }
}

/// Failures while writing the report file.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("excel error: {0}")]
    Xlsx(#[from] XlsxError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// A single table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    /// Hours; rendered with two decimals.
    Hours(f64),
}

impl Cell {
    /// The text written to CSV, and the basis for Excel column widths.
    pub fn render(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Hours(hours) => format_hours(*hours),
        }
    }
}

/// A named table: one CSV file or one workbook sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: &str, headers: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Longest rendered value per column, headers included, in characters.
    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (col, cell) in row.iter().enumerate() {
                let width = cell.render().chars().count();
                match widths.get_mut(col) {
                    Some(current) => *current = (*current).max(width),
                    None => widths.push(width),
                }
            }
        }
        widths
    }
}

/// Detail table: one row per aggregated record.
pub fn detail_sheet(records: &[AggregatedRecord]) -> Sheet {
    let mut sheet = Sheet::new(
        SHEET_TIME_LOGS,
        &[HEADER_ASSIGNEE, HEADER_TICKET_NUMBER, HEADER_TICKET_DESCRIPTION, HEADER_HOURS_LOGGED],
    );
    sheet.rows = records
        .iter()
        .map(|r| {
            vec![
                Cell::Text(r.assignee.clone()),
                Cell::Text(r.ticket_id.clone()),
                Cell::Text(r.ticket_summary.clone()),
                Cell::Hours(r.total_hours),
            ]
        })
        .collect();
    sheet
}

/// Hours per assignee, sorted by name.
pub fn person_sheet(records: &[AggregatedRecord]) -> Sheet {
    let mut sheet = Sheet::new(SHEET_BY_PERSON, &[HEADER_ASSIGNEE, HEADER_HOURS_LOGGED]);
    sheet.rows = totals_by_person(records)
        .into_iter()
        .map(|t| vec![Cell::Text(t.assignee), Cell::Hours(t.total_hours)])
        .collect();
    sheet
}

/// Hours per ticket, sorted by description.
pub fn ticket_sheet(records: &[AggregatedRecord]) -> Sheet {
    let mut sheet = Sheet::new(
        SHEET_BY_TICKET,
        &[HEADER_TICKET_NUMBER, HEADER_TICKET_DESCRIPTION, HEADER_HOURS_LOGGED],
    );
    sheet.rows = totals_by_ticket(records)
        .into_iter()
        .map(|t| vec![Cell::Text(t.ticket_id), Cell::Text(t.ticket_summary), Cell::Hours(t.total_hours)])
        .collect();
    sheet
}

/// Where finished sheets are written.
pub trait TableSink {
    /// Writes one sheet as comma-separated text, header row first.
    fn write_delimited(&self, path: &Path, sheet: &Sheet) -> Result<(), ExportError>;

    /// Writes all sheets, in order, into a single workbook.
    fn write_workbook(&self, path: &Path, sheets: &[Sheet]) -> Result<(), ExportError>;
}

/// Writes real files with `csv` and `rust_xlsxwriter`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSink;

impl FileSink {
    fn ensure_parent(path: &Path) -> io::Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }
}

impl TableSink for FileSink {
    fn write_delimited(&self, path: &Path, sheet: &Sheet) -> Result<(), ExportError> {
        Self::ensure_parent(path)?;
        let mut wtr = csv::Writer::from_path(path)?;
        wtr.write_record(&sheet.headers)?;
        for row in &sheet.rows {
            wtr.write_record(row.iter().map(Cell::render))?;
        }
        wtr.flush()?;
        Ok(())
    }

    fn write_workbook(&self, path: &Path, sheets: &[Sheet]) -> Result<(), ExportError> {
        Self::ensure_parent(path)?;
        let mut workbook = Workbook::new();

        let header_format = Format::new().set_bold().set_background_color(Color::Gray);
        let hours_format = Format::new().set_num_format("0.00");

        for sheet in sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(&sheet.name)?;

            for (col, header) in sheet.headers.iter().enumerate() {
                worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
            }

            for (i, row) in sheet.rows.iter().enumerate() {
                let row_num = i as u32 + 1;
                for (col, cell) in row.iter().enumerate() {
                    match cell {
                        Cell::Text(text) => worksheet.write_string(row_num, col as u16, text)?,
                        Cell::Hours(hours) => worksheet.write_number_with_format(row_num, col as u16, *hours, &hours_format)?,
                    };
                }
            }

            for (col, width) in sheet.column_widths().into_iter().enumerate() {
                worksheet.set_column_width(col as u16, width as f64 + COLUMN_PADDING)?;
            }
        }

        workbook.save(path)?;
        Ok(())
    }
}

/// Turns aggregated records into the report file for one month.
pub struct ReportWriter<K: TableSink = FileSink> {
    config: OutputConfig,
    sink: K,
}

impl ReportWriter<FileSink> {
    pub fn new(config: OutputConfig) -> Self {
        Self::with_sink(config, FileSink)
    }
}

impl<K: TableSink> ReportWriter<K> {
    pub fn with_sink(config: OutputConfig, sink: K) -> Self {
        Self { config, sink }
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// `{prefix}_{YYYY}_{MM}.{ext}` for `spec`, or for the current month.
    pub fn filename(&self, spec: Option<MonthSpec>, format: ExportFormat) -> String {
        let spec = spec.unwrap_or_else(MonthSpec::current);
        format!(
            "{}_{:04}_{:02}.{}",
            self.config.filename_prefix,
            spec.year,
            spec.month,
            format.extension()
        )
    }

    /// Full output path: the configured directory joined with [`filename`](Self::filename).
    pub fn output_path(&self, spec: Option<MonthSpec>, format: ExportFormat) -> PathBuf {
        self.config.directory.join(self.filename(spec, format))
    }

    /// Writes the report and returns where it went.
    ///
    /// An empty `records` slice is not an error: a notice is printed,
    /// nothing is written and `Ok(None)` comes back.
    ///
    /// # Errors
    ///
    /// Filesystem, CSV and workbook failures from the sink.
    pub fn write(
        &self,
        records: &[AggregatedRecord],
        spec: Option<MonthSpec>,
        format: ExportFormat,
    ) -> Result<Option<PathBuf>, ExportError> {
        if records.is_empty() {
            let month = spec.unwrap_or_else(MonthSpec::current);
            msg_info!(Message::NoTimeLogsFound(month.to_string()));
            return Ok(None);
        }

        let path = self.output_path(spec, format);
        match format {
            ExportFormat::Csv => self.sink.write_delimited(&path, &detail_sheet(records))?,
            ExportFormat::Excel => {
                let sheets = [detail_sheet(records), person_sheet(records), ticket_sheet(records)];
                self.sink.write_workbook(&path, &sheets)?
            }
        }
        tracing::debug!(path = %path.display(), rows = records.len(), ?format, "report written");

        Ok(Some(path))
    }
}
