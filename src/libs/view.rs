use super::formatter::{format_hours, format_hours_hm};
use super::summary::total_hours;
use super::worklog::AggregatedRecord;
use prettytable::{row, Table};

pub struct View {}

impl View {
    /// Aggregated rows as a terminal table, closed by a total line.
    pub fn aggregated_table(records: &[AggregatedRecord]) -> Table {
        let mut table = Table::new();

        table.add_row(row!["ASSIGNEE", "TICKET", "DESCRIPTION", "HOURS", "HH:MM"]);
        for record in records {
            table.add_row(row![
                record.assignee,
                record.ticket_id,
                record.ticket_summary,
                r->format_hours(record.total_hours),
                r->format_hours_hm(record.total_hours)
            ]);
        }

        let total = total_hours(records);
        table.add_row(row!["TOTAL", "", "", r->format_hours(total), r->format_hours_hm(total)]);
        table
    }

    pub fn aggregated(records: &[AggregatedRecord]) {
        Self::aggregated_table(records).printstd();
    }
}
