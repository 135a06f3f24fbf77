//! Aggregation of worklog records into per-person, per-ticket totals.
//!
//! ## Rounding
//!
//! Group sums are computed in full `f64` precision and rounded once, at the
//! end, to two decimals with `f64::round` on the value scaled by 100. That
//! is round-half-away-from-zero, i.e. half-up for the non-negative hours
//! handled here: `0.125` becomes `0.13`. Values whose binary representation
//! lies just under a `.xx5` boundary (`1.005` is stored as `1.00499...`)
//! round down, as the stored value dictates.

use crate::libs::worklog::{AggregatedRecord, WorklogRecord};
use std::collections::BTreeMap;

/// Rounds hours to two decimal places, half away from zero.
pub fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

/// Groups records by (assignee, ticket id, ticket summary) and sums hours.
///
/// The summary is part of the key: a ticket renamed mid-month shows up as
/// two rows. Output is sorted by assignee, then ticket id (byte-wise,
/// case-sensitive), with the summary as the final tie-break, so identical
/// input always yields identical output regardless of input order.
pub fn aggregate(records: &[WorklogRecord]) -> Vec<AggregatedRecord> {
    let mut groups: BTreeMap<(&str, &str, &str), f64> = BTreeMap::new();
    for record in records {
        let key = (record.assignee.as_str(), record.ticket_id.as_str(), record.ticket_summary.as_str());
        *groups.entry(key).or_insert(0.0) += record.hours;
    }

    groups
        .into_iter()
        .map(|((assignee, ticket_id, ticket_summary), hours)| AggregatedRecord {
            assignee: assignee.to_string(),
            ticket_id: ticket_id.to_string(),
            ticket_summary: ticket_summary.to_string(),
            total_hours: round_hours(hours),
        })
        .collect()
}

/// Total hours for one assignee across all tickets.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonTotal {
    pub assignee: String,
    pub total_hours: f64,
}

/// Total hours for one ticket across all assignees.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketTotal {
    pub ticket_id: String,
    pub ticket_summary: String,
    pub total_hours: f64,
}

/// Pivot by assignee, sorted by assignee name ascending.
pub fn totals_by_person(records: &[AggregatedRecord]) -> Vec<PersonTotal> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for record in records {
        *totals.entry(record.assignee.as_str()).or_insert(0.0) += record.total_hours;
    }
    totals
        .into_iter()
        .map(|(assignee, hours)| PersonTotal {
            assignee: assignee.to_string(),
            total_hours: round_hours(hours),
        })
        .collect()
}

/// Pivot by (ticket id, description), sorted by description ascending.
///
/// Tickets sharing a description keep ticket-id order.
pub fn totals_by_ticket(records: &[AggregatedRecord]) -> Vec<TicketTotal> {
    let mut totals: BTreeMap<(&str, &str), f64> = BTreeMap::new();
    for record in records {
        *totals
            .entry((record.ticket_summary.as_str(), record.ticket_id.as_str()))
            .or_insert(0.0) += record.total_hours;
    }
    totals
        .into_iter()
        .map(|((ticket_summary, ticket_id), hours)| TicketTotal {
            ticket_id: ticket_id.to_string(),
            ticket_summary: ticket_summary.to_string(),
            total_hours: round_hours(hours),
        })
        .collect()
}

/// Grand total of all aggregated rows, rounded to two decimals.
pub fn total_hours(records: &[AggregatedRecord]) -> f64 {
    round_hours(records.iter().map(|record| record.total_hours).sum())
}
