use crate::Ax;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid configuration: {mines} mines do not fit a board of {cells} cells")]
    InvalidConfig { mines: Ax, cells: Ax },
    #[error("cell id out of range")]
    InvalidCellId,
}

pub type Result<T> = core::result::Result<T, GameError>;
