//! Single-counter ticket queue: ticket issue, FIFO service, wait
//! estimation, and day-scoped snapshot persistence.

pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod snapshot;
pub mod store;
pub mod ticket;
pub mod types;

pub use engine::{QueueEngine, QueueStatus, RestoreOutcome, TicketReceipt, WaitEstimate};
pub use error::{QueueError, QueueResult};
pub use snapshot::SnapshotRecord;
pub use store::SnapshotStore;
pub use ticket::{Ticket, TicketRecord};
