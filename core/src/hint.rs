use alloc::vec::Vec;
use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Hints granted at the start of every session.
pub const HINTS_PER_SESSION: u8 = 3;

/// How long a hint preview stays on screen.
pub const HINT_PREVIEW_DURATION: Duration = Duration::from_secs(1);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintState {
    active: bool,
    remaining: u8,
}

impl Default for HintState {
    fn default() -> Self {
        Self {
            active: false,
            remaining: HINTS_PER_SESSION,
        }
    }
}

impl HintState {
    pub const fn is_active(&self) -> bool {
        self.active
    }

    pub const fn remaining(&self) -> u8 {
        self.remaining
    }

    /// Spends one hint, returns false when none are left or one is already armed.
    pub(crate) fn arm(&mut self) -> bool {
        if self.active || self.remaining == 0 {
            return false;
        }
        self.active = true;
        self.remaining -= 1;
        true
    }

    /// Consumes the armed hint, returns false when none was armed.
    pub(crate) fn take(&mut self) -> bool {
        core::mem::replace(&mut self.active, false)
    }
}

/// Marks the hidden cells of the 3×3 block around `center` as previewed and returns them.
///
/// Only the `previewed` marker changes: no cell becomes revealed and no counter moves.
pub(crate) fn show_preview(board: &mut Board, center: Coord2) -> Vec<Coord2> {
    let cells: Vec<_> = NeighborIter::block(center, board.size())
        .filter(|&pos| board.cell(pos).is_hidden())
        .collect();
    for &pos in &cells {
        board.cell_mut(pos).previewed = true;
    }
    log::debug!("Hint preview around {:?} shows {} cells", center, cells.len());
    cells
}

/// Hides the cells a preview opened, whatever happened to the session meanwhile.
pub(crate) fn hide_preview(board: &mut Board, cells: &[Coord2]) {
    for &pos in cells {
        if let Ok(cell) = board.cell_at_mut(pos) {
            cell.previewed = false;
        }
    }
}
