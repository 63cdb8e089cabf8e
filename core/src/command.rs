use std::str::FromStr;

/// Everything the counter menu can ask the engine to do.
/// Menu numbering follows declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeskCommand {
    // ── Customer side ─────────────────────────────
    TakeTicket,
    ViewCurrent,

    // ── Counter side ──────────────────────────────
    ServeNext,
    ViewStatus,
    AverageWait,

    // ── Persistence ───────────────────────────────
    Save,
    Exit,
}

impl DeskCommand {
    pub const ALL: [DeskCommand; 7] = [
        DeskCommand::TakeTicket,
        DeskCommand::ViewCurrent,
        DeskCommand::ServeNext,
        DeskCommand::ViewStatus,
        DeskCommand::AverageWait,
        DeskCommand::Save,
        DeskCommand::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DeskCommand::TakeTicket  => "Take a Ticket",
            DeskCommand::ViewCurrent => "View Current Ticket Being Served",
            DeskCommand::ServeNext   => "Serve Next Customer",
            DeskCommand::ViewStatus  => "View Queue Status",
            DeskCommand::AverageWait => "View Average Wait Time",
            DeskCommand::Save        => "Save Queue to File",
            DeskCommand::Exit        => "Exit",
        }
    }

    /// Commands after which autosave kicks in.
    pub fn mutates(self) -> bool {
        matches!(self, DeskCommand::TakeTicket | DeskCommand::ServeNext)
    }
}

impl FromStr for DeskCommand {
    type Err = String;

    /// Parse a menu choice, `"1"`..=`"7"`, surrounding whitespace ignored.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let choice = input.trim();
        choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| format!("invalid option '{choice}'"))
    }
}
