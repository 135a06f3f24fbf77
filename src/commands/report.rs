//! Monthly worklog report: fetch, aggregate, write.
//!
//! This is the default command. It resolves the month from `--date` (or
//! the clock), pulls the month's worklogs from Jira, sums them per person
//! and ticket, and writes a CSV or Excel file named after the month.
//!
//! ```bash
//! # Current month as CSV in the configured output directory
//! jira-timelogs
//!
//! # March 2024 as a workbook with per-person and per-ticket summaries
//! jira-timelogs --date 2024-03 --format excel
//!
//! # Also print the aggregated table
//! jira-timelogs --date 2024-03 --show
//! ```

use crate::{
    api::{Jira, WorklogSource},
    libs::{
        config::Config,
        export::{ExportFormat, ReportWriter, TableSink},
        formatter::format_hours,
        messages::Message,
        month::MonthSpec,
        summary::{aggregate, total_hours},
        view::View,
        worklog::{AggregatedRecord, WorklogFetcher},
    },
    msg_debug, msg_error_anyhow, msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Month to report, as YYYY-MM. Defaults to the current month.
    #[arg(short, long, value_name = "YYYY-MM")]
    pub date: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: ExportFormat,

    /// Directory for the report file; overrides the configured one.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Print the aggregated table after writing the file.
    #[arg(long)]
    pub show: bool,
}

/// What a report run produced.
#[derive(Debug)]
pub struct ReportOutcome {
    pub records: Vec<AggregatedRecord>,
    /// `None` when there was nothing to write.
    pub path: Option<PathBuf>,
}

pub async fn cmd(args: ReportArgs) -> Result<()> {
    // Validate before touching the network or the config file
    let spec = MonthSpec::validate(args.date.as_deref())?;

    let config = Config::read()?.with_env();
    let mut output = config.output();
    if let Some(dir) = args.output_dir {
        output.directory = dir;
    }

    let fetcher = WorklogFetcher::new(Jira::new(&config.jira()?)?);
    let writer = ReportWriter::new(output);

    let outcome = generate(&fetcher, &writer, spec, args.format).await?;

    if args.show && !outcome.records.is_empty() {
        View::aggregated(&outcome.records);
    }

    Ok(())
}

/// Runs the whole pipeline against the given source and sink.
///
/// # Errors
///
/// Tracker failures are reported as "Failed to fetch time logs" and sink
/// failures as "Failed to write report", each carrying the underlying
/// error text. Nothing is retried.
pub async fn generate<S, K>(
    fetcher: &WorklogFetcher<S>,
    writer: &ReportWriter<K>,
    spec: Option<MonthSpec>,
    format: ExportFormat,
) -> Result<ReportOutcome>
where
    S: WorklogSource,
    K: TableSink,
{
    let month = spec.unwrap_or_else(MonthSpec::current);
    let range = month.range()?;

    msg_info!(Message::FetchingTimeLogs(month.to_string()));
    let worklogs = fetcher
        .fetch(&range)
        .await
        .map_err(|err| msg_error_anyhow!(Message::JiraFetchFailed(err.to_string())))?;
    msg_debug!(Message::FetchedWorklogs(worklogs.len()));

    let records = aggregate(&worklogs);
    msg_debug!(Message::AggregatedRecords(records.len()));

    let path = writer
        .write(&records, Some(month), format)
        .map_err(|err| msg_error_anyhow!(Message::ExportFailed(err.to_string())))?;
    if let Some(path) = &path {
        msg_success!(Message::TimeLogsSaved(path.display().to_string()));
        msg_info!(Message::ReportTotalHours(format_hours(total_hours(&records))));
    }

    Ok(ReportOutcome { records, path })
}
