//! Per-cell state.

use std::fmt;
use std::ops::Not;

/// State of a single cell. Cells carry no metadata beyond this.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CellState {
    /// The cell is empty.
    #[default]
    Dead = 0,
    /// The cell is populated.
    Alive = 1,
}

impl CellState {
    /// Whether this cell is [`CellState::Alive`].
    pub fn is_alive(self) -> bool {
        self == Self::Alive
    }

    /// Single-character rendering used by [`Grid`](crate::Grid)'s `Display`.
    pub fn as_char(self) -> char {
        match self {
            Self::Alive => '#',
            Self::Dead => '.',
        }
    }
}

impl Not for CellState {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Self::Alive => Self::Dead,
            Self::Dead => Self::Alive,
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            Self::Alive
        } else {
            Self::Dead
        }
    }
}

impl From<CellState> for bool {
    fn from(state: CellState) -> Self {
        state.is_alive()
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alive => write!(f, "alive"),
            Self::Dead => write!(f, "dead"),
        }
    }
}
