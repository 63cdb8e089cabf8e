//! Ticket issue, service order and wait estimation.

use chrono::Duration;
use queue_core::{
    snapshot::{format_date, SnapshotRecord},
    types, QueueEngine, Ticket, WaitEstimate,
};

/// Engine restored from a same-day record with the given served and waiting tickets.
fn engine_with(served: Vec<Ticket>, waiting: Vec<Ticket>) -> QueueEngine {
    let last = served
        .iter()
        .chain(&waiting)
        .map(Ticket::number)
        .max()
        .unwrap_or(0);
    let record = SnapshotRecord {
        last_ticket_given: last,
        last_reset_date:   format_date(types::today()),
        queue:             waiting.iter().map(Ticket::to_record).collect(),
        current_ticket:    served.last().map(Ticket::to_record),
        served_tickets:    served.iter().map(Ticket::to_record).collect(),
    };
    let mut engine = QueueEngine::new();
    engine.restore(Some(&record)).expect("restore");
    engine
}

fn served_after(number: u64, minutes: i64) -> Ticket {
    let issued = types::now() - Duration::minutes(minutes);
    Ticket::with_times(number, issued, Some(issued + Duration::minutes(minutes)))
}

#[test]
fn tickets_are_numbered_without_gaps() {
    let mut engine = QueueEngine::new();
    let numbers: Vec<u64> = (0..25).map(|_| engine.take_ticket().ticket.number()).collect();
    assert_eq!(numbers, (1..=25).collect::<Vec<_>>());
    assert_eq!(engine.status().waiting_numbers, numbers);
}

#[test]
fn numbering_continues_after_service() {
    let mut engine = QueueEngine::new();
    engine.take_ticket();
    engine.take_ticket();
    engine.serve_next();
    engine.serve_next();
    assert_eq!(engine.take_ticket().ticket.number(), 3);
}

#[test]
fn serve_next_on_empty_queue_changes_nothing() {
    let mut engine = QueueEngine::new();
    engine.take_ticket();
    engine.serve_next();
    let before = engine.clone();

    assert!(engine.serve_next().is_none());
    assert_eq!(engine, before);
    assert_eq!(engine.last_ticket_given(), 1);
    assert_eq!(engine.served().len(), 1);
    assert_eq!(engine.current().map(Ticket::number), Some(1));
}

#[test]
fn serve_after_take_moves_ticket_to_history() {
    let mut engine = QueueEngine::new();
    engine.take_ticket();
    let served = engine.serve_next().expect("a ticket to serve");

    assert_eq!(engine.waiting().count(), 0);
    assert_eq!(engine.served().len(), 1);
    let entry = &engine.served()[0];
    assert_eq!(entry, &served);
    let time_served = entry.time_served().expect("time served set");
    assert!(time_served >= entry.time_issued());
}

#[test]
fn service_is_first_in_first_out() {
    let mut engine = QueueEngine::new();
    for _ in 0..4 {
        engine.take_ticket();
    }
    let order: Vec<u64> = std::iter::from_fn(|| engine.serve_next())
        .map(|t| t.number())
        .collect();
    assert_eq!(order, vec![1, 2, 3, 4]);
    assert_eq!(engine.status().current_ticket_number, Some(4));
}

#[test]
fn status_reports_current_and_waiting() {
    let mut engine = QueueEngine::new();
    assert_eq!(engine.status().current_ticket_number, None);

    for _ in 0..3 {
        engine.take_ticket();
    }
    engine.serve_next();

    let status = engine.status();
    assert_eq!(status.current_ticket_number, Some(1));
    assert_eq!(status.waiting_numbers, vec![2, 3]);
}

#[test]
fn average_wait_is_unavailable_before_service() {
    let mut engine = QueueEngine::new();
    engine.take_ticket();
    assert!(engine.average_wait_minutes().is_none());
}

#[test]
fn two_minute_wait_averages_two_minutes() {
    let engine = engine_with(vec![served_after(1, 2)], vec![]);
    let avg = engine.average_wait_minutes().expect("average available");
    assert!((avg - 2.0).abs() <= 0.1, "avg = {avg}");
}

#[test]
fn average_spans_all_served_tickets() {
    let engine = engine_with(vec![served_after(1, 2), served_after(2, 4), served_after(3, 9)], vec![]);
    let avg = engine.average_wait_minutes().unwrap();
    assert!((avg - 5.0).abs() <= 0.1, "avg = {avg}");
}

#[test]
fn estimate_scales_with_people_ahead() {
    let waiting = (2..=4).map(Ticket::create).collect();
    let mut engine = engine_with(vec![served_after(1, 5)], waiting);

    let receipt = engine.take_ticket();
    assert_eq!(receipt.ticket.number(), 5);
    assert_eq!(receipt.people_ahead, 3);
    assert_eq!(receipt.estimate, WaitEstimate::Minutes(15));
}

#[test]
fn estimate_rounds_down() {
    // 90s average, one person ahead → 1.5 minutes → 1
    let issued = types::now() - Duration::seconds(90);
    let served = Ticket::with_times(1, issued, Some(issued + Duration::seconds(90)));
    let mut engine = engine_with(vec![served], vec![Ticket::create(2)]);

    assert_eq!(engine.take_ticket().estimate, WaitEstimate::Minutes(1));
}

#[test]
fn nobody_ahead_means_no_wait_even_with_history() {
    let mut engine = engine_with(vec![served_after(1, 5)], vec![]);
    let receipt = engine.take_ticket();
    assert_eq!(receipt.people_ahead, 0);
    assert_eq!(receipt.estimate, WaitEstimate::NoWait);
}
