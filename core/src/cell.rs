use serde::{Deserialize, Serialize};

/// Player annotation on an unrevealed cell. A cell carries at most one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Annotation {
    #[default]
    None,
    Flagged,
    SuspectedMarked,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    mine: bool,
    revealed: bool,
    annotation: Annotation,
    adjacent_mines: u8,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.mine
    }

    pub const fn is_revealed(self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self.annotation, Annotation::Flagged)
    }

    pub const fn is_suspected(self) -> bool {
        matches!(self.annotation, Annotation::SuspectedMarked)
    }

    pub const fn annotation(self) -> Annotation {
        self.annotation
    }

    /// Mines among the neighbors. Only meaningful for safe cells once mines are placed.
    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    /// Whether a reveal may act on this cell.
    pub const fn is_revealable(self) -> bool {
        !self.revealed && matches!(self.annotation, Annotation::None)
    }

    pub(crate) fn set_mine(&mut self) {
        self.mine = true;
    }

    pub(crate) fn set_adjacent_mines(&mut self, count: u8) {
        self.adjacent_mines = count;
    }

    pub(crate) fn set_revealed(&mut self) {
        self.revealed = true;
    }

    pub(crate) fn set_annotation(&mut self, annotation: Annotation) {
        self.annotation = annotation;
    }
}
