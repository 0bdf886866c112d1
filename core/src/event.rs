use serde::{Deserialize, Serialize};

use crate::*;

/// Final figures of a finished game.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Fraction of safe cells revealed, in `[0, 1]`.
    pub progress: f64,
    pub cells_revealed: CellCount,
    pub total_safe_cells: CellCount,
    /// As reported by the host's timer.
    pub elapsed_secs: u32,
}

/// Everything the engine tells its host. Events are queued in the order they happen.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// First successful reveal of a game.
    GameStart,
    GameWin(GameSummary),
    GameOver(GameSummary),
    /// Total mines minus flags placed. Negative when over-flagged.
    MinesCounterUpdate { mines_left: i32 },
    ProgressUpdate { progress: f64 },
    /// One per revealed cell, cascade members included.
    CellRevealed { coords: Coord2 },
    FlagToggled { coords: Coord2, flagged: bool },
    /// Size of the suspected-mark set after a toggle.
    BombMarked { count: CellCount },
}

impl GameEvent {
    pub const fn summary(&self) -> Option<GameSummary> {
        match self {
            Self::GameWin(summary) | Self::GameOver(summary) => Some(*summary),
            _ => None,
        }
    }

    pub const fn is_game_end(&self) -> bool {
        matches!(self, Self::GameWin(_) | Self::GameOver(_))
    }
}
