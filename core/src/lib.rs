#![no_std]

extern crate alloc;

use core::fmt;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use event::*;
pub use gesture::*;
pub use grid::*;
pub use placer::*;
pub use stats::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod event;
mod gesture;
mod grid;
mod placer;
mod stats;
mod types;

/// Board geometry. Always holds at least one mine and at least one safe cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    rows: Coord,
    cols: Coord,
    mines: CellCount,
}

#[derive(Deserialize)]
struct RawGameConfig {
    rows: Coord,
    cols: Coord,
    mines: CellCount,
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = GameError;

    fn try_from(raw: RawGameConfig) -> Result<Self> {
        Self::new(raw.rows, raw.cols, raw.mines)
    }
}

impl GameConfig {
    const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        let cells = mult(rows, cols);
        if mines == 0 || mines >= cells {
            return Err(GameError::Configuration { mines, cells });
        }
        Ok(Self::new_unchecked(rows, cols, mines))
    }

    pub const fn rows(&self) -> Coord {
        self.rows
    }

    pub const fn cols(&self) -> Coord {
        self.cols
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn total_safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }

    pub const fn contains(&self, (row, col): Coord2) -> bool {
        row < self.rows && col < self.cols
    }

    pub(crate) const fn linear_index(&self, (row, col): Coord2) -> usize {
        row as usize * self.cols as usize + col as usize
    }

    pub(crate) const fn coords_at(&self, index: usize) -> Coord2 {
        let cols = self.cols as usize;
        ((index / cols) as Coord, (index % cols) as Coord)
    }
}

impl fmt::Display for GameConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} with {} mines", self.rows, self.cols, self.mines)
    }
}

/// Board presets offered by the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn config(self) -> GameConfig {
        use Difficulty::*;
        match self {
            Easy => GameConfig::new_unchecked(9, 9, 10),
            Medium => GameConfig::new_unchecked(16, 16, 40),
            Hard => GameConfig::new_unchecked(16, 30, 99),
        }
    }

    pub fn from_config(config: GameConfig) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.config() == config)
    }
}

impl From<Difficulty> for GameConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}

/// Play mode chosen by the host. Stored and reported, rules are identical for all modes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Classic,
    Timed,
    Blitz,
    Survival,
}

/// What a resolved player input asks for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    Reveal,
    Flag,
    Mark,
}

/// A host input already resolved to a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInput {
    pub coords: Coord2,
    pub action: PlayerAction,
}

impl PlayerInput {
    pub const fn new(coords: Coord2, action: PlayerAction) -> Self {
        Self { coords, action }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
    Restarted,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
            Self::Restarted => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
    Restarted,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
            Restarted => true,
        }
    }
}

/// Outcome of [`GameEngine::handle`], whichever action it dispatched to.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InputOutcome {
    Reveal(RevealOutcome),
    Mark(MarkOutcome),
}

impl InputOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Reveal(outcome) => outcome.has_update(),
            Self::Mark(outcome) => outcome.has_update(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_zero_mines() {
        assert_eq!(
            GameConfig::new(9, 9, 0),
            Err(GameError::Configuration { mines: 0, cells: 81 })
        );
    }

    #[test]
    fn config_rejects_full_board() {
        assert!(GameConfig::new(3, 3, 9).is_err());
        assert!(GameConfig::new(3, 3, 10).is_err());
        assert!(GameConfig::new(0, 5, 1).is_err());
    }

    #[test]
    fn config_accepts_one_safe_cell() {
        let config = GameConfig::new(3, 3, 8).unwrap();
        assert_eq!(config.total_safe_cells(), 1);
    }

    #[test]
    fn difficulty_presets() {
        assert_eq!(Difficulty::Easy.config().total_safe_cells(), 71);
        assert_eq!(Difficulty::Medium.config().size(), (16, 16));
        assert_eq!(Difficulty::Hard.config().total_cells(), 480);
        assert_eq!(
            Difficulty::from_config(GameConfig::new(16, 30, 99).unwrap()),
            Some(Difficulty::Hard)
        );
        assert_eq!(Difficulty::from_config(GameConfig::new(5, 5, 3).unwrap()), None);
    }

    #[test]
    fn linear_index_round_trips_coords() {
        let config = GameConfig::new(4, 7, 3).unwrap();
        assert_eq!(config.linear_index((2, 5)), 19);
        assert_eq!(config.coords_at(19), (2, 5));
    }

    #[test]
    fn config_deserialization_validates() {
        let ok: GameConfig = serde_json::from_str(r#"{"rows":9,"cols":9,"mines":10}"#).unwrap();
        assert_eq!(ok, Difficulty::Easy.config());

        let bad = serde_json::from_str::<GameConfig>(r#"{"rows":2,"cols":2,"mines":4}"#);
        assert!(bad.is_err());
    }
}
