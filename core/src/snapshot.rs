//! Snapshot serialization — full queue state to/from JSON.
//!
//! A snapshot captures everything needed to resume the counter after a
//! restart. Field names are the on-disk contract and must not change.
//! Array order is significant: `queue` is head to tail, `servedTickets`
//! oldest to newest.

use crate::{
    error::{QueueError, QueueResult},
    ticket::TicketRecord,
    types::TicketNumber,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRecord {
    pub last_ticket_given: TicketNumber,
    pub last_reset_date:   String,
    pub queue:             Vec<TicketRecord>,
    pub served_tickets:    Vec<TicketRecord>,
    pub current_ticket:    Option<TicketRecord>,
}

impl SnapshotRecord {
    /// The calendar day this snapshot belongs to.
    pub fn reset_date(&self) -> QueueResult<NaiveDate> {
        NaiveDate::parse_from_str(&self.last_reset_date, DATE_FORMAT).map_err(|e| {
            QueueError::parse(
                "lastResetDate",
                format!("'{}' is not a YYYY-MM-DD date: {e}", self.last_reset_date),
            )
        })
    }

    pub fn to_json(&self) -> QueueResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode a snapshot payload. Anything that does not match the
    /// schema is a parse error.
    pub fn from_json(json: &str) -> QueueResult<Self> {
        serde_json::from_str(json).map_err(QueueError::MalformedSnapshot)
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
