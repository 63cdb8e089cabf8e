//! The queue engine — the heart of the service counter.
//!
//! TICKET FLOW (fixed):
//!   take_ticket  → tail of the waiting queue
//!   serve_next   → head of the waiting queue → current ticket + served history
//!
//! RULES:
//!   - Ticket numbers come from `last_ticket_given` only, never from callers.
//!   - The waiting queue is strict FIFO.
//!   - `current_ticket` is a view of the newest history entry; the wait
//!     estimator never counts it twice.
//!   - Restore decodes everything before assigning anything, so a bad
//!     snapshot leaves the engine untouched.
//!   - A snapshot from an earlier calendar day is discarded, not loaded.

use crate::{
    error::{QueueError, QueueResult},
    snapshot::{format_date, SnapshotRecord},
    ticket::Ticket,
    types::{self, TicketNumber},
};
use chrono::NaiveDate;
use std::collections::VecDeque;

/// What a customer is told when they take a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitEstimate {
    /// Nobody ahead.
    NoWait,
    /// Whole minutes, rounded down.
    Minutes(u64),
    /// People are ahead but nothing has been served yet today.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketReceipt {
    pub ticket:       Ticket,
    pub people_ahead: usize,
    pub estimate:     WaitEstimate,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueueStatus {
    pub current_ticket_number: Option<TicketNumber>,
    pub waiting_numbers:       Vec<TicketNumber>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// First run; started empty.
    NoSnapshot,
    /// Snapshot from an earlier day; discarded and started empty.
    NewDayReset { snapshot_date: NaiveDate },
    /// Same-day snapshot loaded.
    Restored { last_ticket_given: TicketNumber, waiting: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueEngine {
    last_ticket_given: TicketNumber,
    waiting:           VecDeque<Ticket>,
    current_ticket:    Option<Ticket>,
    served:            Vec<Ticket>,
}

impl QueueEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next ticket and place it at the back of the queue.
    pub fn take_ticket(&mut self) -> TicketReceipt {
        self.last_ticket_given += 1;
        let ticket = Ticket::create(self.last_ticket_given);
        self.waiting.push_back(ticket.clone());

        let people_ahead = self.waiting.len() - 1;
        let estimate = if people_ahead == 0 {
            WaitEstimate::NoWait
        } else {
            match self.average_wait_minutes() {
                Some(avg) => WaitEstimate::Minutes((avg * people_ahead as f64).floor() as u64),
                None => WaitEstimate::Unavailable,
            }
        };

        log::debug!(
            "issued ticket #{} people_ahead={people_ahead} estimate={estimate:?}",
            ticket.number()
        );
        TicketReceipt { ticket, people_ahead, estimate }
    }

    /// Serve the ticket at the head of the queue. `None` when nobody is waiting.
    pub fn serve_next(&mut self) -> Option<Ticket> {
        let ticket = self.waiting.pop_front()?.mark_served();
        self.current_ticket = Some(ticket.clone());
        self.served.push(ticket.clone());

        log::debug!(
            "serving ticket #{} ({} still waiting)",
            ticket.number(),
            self.waiting.len()
        );
        Some(ticket)
    }

    /// Mean wait of every served ticket, in minutes.
    /// `None` until at least one ticket has been served.
    pub fn average_wait_minutes(&self) -> Option<f64> {
        let current = self
            .current_ticket
            .as_ref()
            .filter(|c| !self.served.iter().any(|s| s.number() == c.number()));

        let waits: Vec<f64> = self
            .served
            .iter()
            .chain(current)
            .filter_map(Ticket::wait_duration)
            .map(|d| d.num_milliseconds() as f64 / 1000.0)
            .collect();

        if waits.is_empty() {
            return None;
        }
        let mean_seconds = waits.iter().sum::<f64>() / waits.len() as f64;
        Some(mean_seconds / 60.0)
    }

    pub fn status(&self) -> QueueStatus {
        QueueStatus {
            current_ticket_number: self.current_ticket.as_ref().map(Ticket::number),
            waiting_numbers:       self.waiting.iter().map(Ticket::number).collect(),
        }
    }

    pub fn current(&self) -> Option<&Ticket> {
        self.current_ticket.as_ref()
    }

    /// Waiting tickets, head first.
    pub fn waiting(&self) -> impl Iterator<Item = &Ticket> {
        self.waiting.iter()
    }

    /// Served tickets, oldest first.
    pub fn served(&self) -> &[Ticket] {
        &self.served
    }

    pub fn last_ticket_given(&self) -> TicketNumber {
        self.last_ticket_given
    }

    pub fn snapshot(&self) -> SnapshotRecord {
        SnapshotRecord {
            last_ticket_given: self.last_ticket_given,
            last_reset_date:   format_date(types::today()),
            queue:             self.waiting.iter().map(Ticket::to_record).collect(),
            served_tickets:    self.served.iter().map(Ticket::to_record).collect(),
            current_ticket:    self.current_ticket.as_ref().map(Ticket::to_record),
        }
    }

    pub fn snapshot_json(&self) -> QueueResult<String> {
        self.snapshot().to_json()
    }

    /// Load state from a snapshot, comparing its date against today.
    pub fn restore(&mut self, record: Option<&SnapshotRecord>) -> QueueResult<RestoreOutcome> {
        self.restore_on(record, types::today())
    }

    pub fn restore_json(&mut self, json: &str) -> QueueResult<RestoreOutcome> {
        let record = SnapshotRecord::from_json(json)?;
        self.restore(Some(&record))
    }

    /// Load state from a snapshot, treating `today` as the current date.
    pub fn restore_on(
        &mut self,
        record: Option<&SnapshotRecord>,
        today: NaiveDate,
    ) -> QueueResult<RestoreOutcome> {
        let Some(record) = record else {
            log::info!("no snapshot found, starting with an empty queue");
            *self = Self::default();
            return Ok(RestoreOutcome::NoSnapshot);
        };

        let snapshot_date = record.reset_date()?;
        if snapshot_date < today {
            log::info!("snapshot from {snapshot_date} predates {today}, starting a new day");
            *self = Self::default();
            return Ok(RestoreOutcome::NewDayReset { snapshot_date });
        }

        let restored = Self::decode(record)?;
        *self = restored;

        let outcome = RestoreOutcome::Restored {
            last_ticket_given: self.last_ticket_given,
            waiting:           self.waiting.len(),
        };
        log::info!(
            "restored snapshot: last_ticket_given={} waiting={} served={}",
            self.last_ticket_given,
            self.waiting.len(),
            self.served.len()
        );
        Ok(outcome)
    }

    fn decode(record: &SnapshotRecord) -> QueueResult<Self> {
        let last = record.last_ticket_given;

        let waiting = record
            .queue
            .iter()
            .map(Ticket::from_record)
            .collect::<QueueResult<VecDeque<_>>>()?;
        let served = record
            .served_tickets
            .iter()
            .map(Ticket::from_record)
            .collect::<QueueResult<Vec<_>>>()?;
        let current_ticket = record
            .current_ticket
            .as_ref()
            .map(Ticket::from_record)
            .transpose()?;

        for ticket in waiting.iter().chain(&served).chain(&current_ticket) {
            if ticket.number() > last {
                return Err(QueueError::parse(
                    "lastTicketGiven",
                    format!("ticket #{} was never issued (last issued #{last})", ticket.number()),
                ));
            }
        }
        if let Some(t) = waiting.iter().find(|t| t.is_served()) {
            return Err(QueueError::parse(
                "queue",
                format!("waiting ticket #{} already has a service time", t.number()),
            ));
        }
        if waiting.iter().zip(waiting.iter().skip(1)).any(|(a, b)| a.number() >= b.number()) {
            return Err(QueueError::parse("queue", "ticket numbers are not in issue order"));
        }
        if let Some(t) = served.iter().chain(&current_ticket).find(|t| !t.is_served()) {
            return Err(QueueError::parse(
                "servedTickets",
                format!("ticket #{} has no service time", t.number()),
            ));
        }

        Ok(Self {
            last_ticket_given: last,
            waiting,
            current_ticket,
            served,
        })
    }
}
