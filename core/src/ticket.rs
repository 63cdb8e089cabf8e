//! Ticket ledger — a single customer's place in line.
//!
//! A ticket is created with its issue time stamped from the wall clock
//! and is served at most once. The record form is what lands in the
//! snapshot file; `from_record` is the only way persisted data becomes
//! a `Ticket`, so every timestamp is validated there.

use crate::{
    error::{QueueError, QueueResult},
    types::{self, TicketNumber, Timestamp},
};
use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    number:      TicketNumber,
    time_issued: Timestamp,
    time_served: Option<Timestamp>,
}

/// On-disk shape of a ticket.
///
/// `timeTaken` is the field name older snapshot files used for the
/// issue time; it is still accepted on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketRecord {
    pub number:      TicketNumber,
    #[serde(default, alias = "timeTaken")]
    pub time_issued: Option<String>,
    #[serde(default)]
    pub time_served: Option<String>,
}

impl Ticket {
    /// Issue a new ticket stamped with the current time.
    pub fn create(number: TicketNumber) -> Self {
        Self {
            number,
            time_issued: types::now(),
            time_served: None,
        }
    }

    /// Build a ticket from known timestamps.
    pub fn with_times(
        number: TicketNumber,
        time_issued: Timestamp,
        time_served: Option<Timestamp>,
    ) -> Self {
        Self { number, time_issued, time_served }
    }

    /// Stamp the service time. A second call overwrites the first.
    pub fn mark_served(mut self) -> Self {
        if let Some(previous) = self.time_served {
            log::debug!("ticket #{} re-marked served (was {previous})", self.number);
        }
        // Clamp so a wall clock stepping backwards never yields a negative wait.
        self.time_served = Some(types::now().max(self.time_issued));
        self
    }

    pub fn number(&self) -> TicketNumber { self.number }
    pub fn time_issued(&self) -> Timestamp { self.time_issued }
    pub fn time_served(&self) -> Option<Timestamp> { self.time_served }
    pub fn is_served(&self) -> bool { self.time_served.is_some() }

    /// Time between issue and service, if served.
    pub fn wait_duration(&self) -> Option<Duration> {
        self.time_served.map(|served| served - self.time_issued)
    }

    pub fn to_record(&self) -> TicketRecord {
        TicketRecord {
            number:      self.number,
            time_issued: Some(format_timestamp(self.time_issued)),
            time_served: self.time_served.map(format_timestamp),
        }
    }

    pub fn from_record(record: &TicketRecord) -> QueueResult<Self> {
        if record.number == 0 {
            return Err(QueueError::parse("number", "ticket numbers start at 1"));
        }
        let time_issued = match &record.time_issued {
            Some(raw) => parse_timestamp("timeIssued", raw)?,
            None => return Err(QueueError::parse("timeIssued", "missing")),
        };
        let time_served = record
            .time_served
            .as_deref()
            .map(|raw| parse_timestamp("timeServed", raw))
            .transpose()?;

        if let Some(served) = time_served {
            if served < time_issued {
                return Err(QueueError::parse(
                    "timeServed",
                    format!("ticket #{} served before it was issued", record.number),
                ));
            }
        }
        Ok(Self { number: record.number, time_issued, time_served })
    }
}

pub fn format_timestamp(ts: Timestamp) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse an ISO-8601 timestamp. Naive local date-times are taken as-is;
/// RFC 3339 strings carrying an offset are converted to local time.
pub fn parse_timestamp(field: &str, raw: &str) -> QueueResult<Timestamp> {
    if let Ok(ts) = raw.parse::<Timestamp>() {
        return Ok(ts);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Local).naive_local())
        .map_err(|e| QueueError::parse(field, format!("'{raw}' is not an ISO-8601 timestamp: {e}")))
}
