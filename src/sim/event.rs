/// Events emitted as the animated beam advances.
/// The game layer consumes these for win/lose decisions and sound.

use crate::domain::cell::{Cell, ColorKey};

/// Emitted once per animation sweep when the beam tip reaches the far
/// end of a segment whose terminal cell has gameplay consequences.
/// Callers drain the list returned by `BeamSession::tick` each frame;
/// nothing is buffered between frames.
#[derive(Clone, Debug, PartialEq)]
pub struct CellReached {
    /// The terminal cell, carrying its own payload (alarm seconds,
    /// target color requirement).
    pub cell: Cell,
    pub row: usize,
    pub col: usize,
    /// Beam color on arrival.
    pub color: Option<ColorKey>,
}
