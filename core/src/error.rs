use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {mines} mines do not fit a board of {cells} cells")]
    Configuration { mines: CellCount, cells: CellCount },
    #[error("Mine layout does not match the board")]
    InvalidLayout,
}

pub type Result<T> = core::result::Result<T, GameError>;
