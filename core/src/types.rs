//! Shared primitive types used across the queue.

use chrono::{Local, NaiveDate, NaiveDateTime};

/// A ticket number. Numbering starts at 1 each day.
pub type TicketNumber = u64;

/// Wall-clock instant, naive local time.
pub type Timestamp = NaiveDateTime;

/// Current local wall-clock time.
pub fn now() -> Timestamp {
    Local::now().naive_local()
}

/// Current local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
