//! queue-desk: interactive counter menu over the queue engine.
//!
//! Usage:
//!   queue-desk
//!   queue-desk --data queue_data.json
//!   queue-desk --config desk.json --autosave

use anyhow::Result;
use queue_core::{
    command::DeskCommand,
    config::DeskConfig,
    ticket::Ticket,
    types::Timestamp,
    QueueEngine, QueueError, RestoreOutcome, SnapshotStore, WaitEstimate,
};
use std::env;
use std::io::{self, BufRead, Write};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = match arg_value(&args, "--config") {
        Some(path) => DeskConfig::load(path)?,
        None => DeskConfig::default(),
    };
    if let Some(path) = arg_value(&args, "--data") {
        config.snapshot_path = path.into();
    }
    if args.iter().any(|a| a == "--autosave") {
        config.autosave = true;
    }
    log::debug!("config: {config:?}");

    let store = SnapshotStore::new(config.snapshot_path.clone());
    let mut engine = QueueEngine::new();
    restore(&mut engine, &store);

    run_menu(&mut engine, &store, &config)
}

fn restore(engine: &mut QueueEngine, store: &SnapshotStore) {
    let record = match store.load() {
        Ok(record) => record,
        Err(e) => {
            set_aside(store, &e);
            return;
        }
    };
    match engine.restore(record.as_ref()) {
        Ok(RestoreOutcome::NoSnapshot) => {
            println!("\nNo existing data file found, starting fresh.\n");
        }
        Ok(RestoreOutcome::NewDayReset { snapshot_date }) => {
            println!("\nSaved queue is from {snapshot_date}, starting a new day.\n");
        }
        Ok(RestoreOutcome::Restored { waiting, .. }) => {
            println!(
                "\nQueue state loaded from {} ({waiting} waiting).\n",
                store.path().display()
            );
        }
        Err(e) => set_aside(store, &e),
    }
}

/// Keep an unusable snapshot on disk under another name before the
/// first save replaces it.
fn set_aside(store: &SnapshotStore, e: &QueueError) {
    match store.set_aside() {
        Ok(bad) => println!(
            "\nSnapshot {} is unusable ({e}); kept as {}, starting fresh.\n",
            store.path().display(),
            bad.display()
        ),
        Err(move_err) => {
            log::error!("could not move unusable snapshot aside: {move_err}");
            println!(
                "\nSnapshot {} is unusable ({e}) and will be replaced on the next save.\n",
                store.path().display()
            );
        }
    }
}

fn run_menu(engine: &mut QueueEngine, store: &SnapshotStore, config: &DeskConfig) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        println!("=== Barber Queue System ===");
        for (i, cmd) in DeskCommand::ALL.iter().enumerate() {
            println!("{}. {}", i + 1, cmd.label());
        }
        print!("Select an option (1-{}): ", DeskCommand::ALL.len());
        stdout.flush()?;

        buffer.clear();
        if handle.read_line(&mut buffer)? == 0 {
            // EOF behaves like Exit.
            save(engine, store);
            break;
        }

        let cmd: DeskCommand = match buffer.parse() {
            Ok(cmd) => cmd,
            Err(e) => {
                log::debug!("{e}");
                println!("\nInvalid option. Please try again.\n");
                continue;
            }
        };

        match cmd {
            DeskCommand::TakeTicket  => take_ticket(engine),
            DeskCommand::ViewCurrent => view_current(engine),
            DeskCommand::ServeNext   => serve_next(engine),
            DeskCommand::ViewStatus  => view_status(engine),
            DeskCommand::AverageWait => average_wait(engine),
            DeskCommand::Save        => save(engine, store),
            DeskCommand::Exit => {
                save(engine, store);
                println!("\nGoodbye!\n");
                break;
            }
        }

        if config.autosave && cmd.mutates() {
            save(engine, store);
        }
    }
    Ok(())
}

fn take_ticket(engine: &mut QueueEngine) {
    let receipt = engine.take_ticket();
    println!("\nYour ticket number is {}.", receipt.ticket.number());
    println!("There are {} people ahead of you.", receipt.people_ahead);
    match receipt.estimate {
        WaitEstimate::NoWait => println!("No wait, you're next!"),
        WaitEstimate::Minutes(m) => println!("Estimated wait: {m} minutes."),
        WaitEstimate::Unavailable => println!("Estimated wait: not available yet."),
    }
    println!("Time taken: {}\n", clock(receipt.ticket.time_issued()));
}

fn view_current(engine: &QueueEngine) {
    match engine.current() {
        Some(ticket) => {
            println!("\nCurrently serving ticket #{}", ticket.number());
            print_times(ticket);
            println!();
        }
        None => println!("\nNo ticket is currently being served.\n"),
    }
}

fn serve_next(engine: &mut QueueEngine) {
    match engine.serve_next() {
        Some(ticket) => {
            println!("\nNow serving ticket #{}.", ticket.number());
            print_times(&ticket);
            println!();
        }
        None => println!("\nNo one is currently in the queue.\n"),
    }
}

fn view_status(engine: &QueueEngine) {
    let status = engine.status();
    println!("\nQueue Status:");
    match status.current_ticket_number {
        Some(n) => println!("- Currently serving: {n}"),
        None => println!("- Currently serving: None"),
    }
    println!("- People waiting: {}", status.waiting_numbers.len());
    if !status.waiting_numbers.is_empty() {
        println!("- Tickets in queue:");
        for ticket in engine.waiting() {
            println!(
                "  Ticket #{} (taken at {})",
                ticket.number(),
                clock(ticket.time_issued())
            );
        }
    }
    println!();
}

fn average_wait(engine: &QueueEngine) {
    match engine.average_wait_minutes() {
        Some(avg) => println!(
            "\nAverage wait: {avg:.1} minutes over {} served.\n",
            engine.served().len()
        ),
        None => println!("\nNo customers served yet, average wait not available.\n"),
    }
}

fn save(engine: &QueueEngine, store: &SnapshotStore) {
    match store.save(&engine.snapshot()) {
        Ok(()) => println!("\nQueue state saved to {}\n", store.path().display()),
        Err(e) => {
            log::error!("save failed: {e}");
            println!("\nCould not save queue state: {e}\n");
        }
    }
}

fn print_times(ticket: &Ticket) {
    println!("Time taken: {}", clock(ticket.time_issued()));
    if let Some(served) = ticket.time_served() {
        println!("Time served: {}", clock(served));
    }
}

fn clock(ts: Timestamp) -> String {
    ts.format("%I:%M:%S %p").to_string()
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
