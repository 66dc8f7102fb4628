use serde::{Deserialize, Serialize};

/// One grid position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Mines among the up-to-8 neighbors, meaningless on a mine.
    pub adjacent_mines: u8,
    pub revealed: bool,
    pub mine: bool,
    pub flagged: bool,
    /// Shown by a hint preview without being revealed.
    pub previewed: bool,
}

impl Cell {
    pub const fn is_hidden(&self) -> bool {
        !self.revealed
    }

    /// What the player sees in this cell, ignoring whether it is currently visible.
    pub const fn content(&self) -> CellContent {
        if self.mine {
            CellContent::Mine
        } else if self.adjacent_mines == 0 {
            CellContent::Empty
        } else {
            CellContent::Count(self.adjacent_mines)
        }
    }

    pub const fn visibility(&self) -> Visibility {
        if self.revealed || self.previewed {
            Visibility::Shown
        } else if self.flagged {
            Visibility::Flagged
        } else {
            Visibility::Hidden
        }
    }

    pub const fn view(&self) -> CellView {
        CellView {
            content: self.content(),
            visibility: self.visibility(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellContent {
    Mine,
    Count(u8),
    Empty,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Hidden,
    Shown,
    Flagged,
}

/// Render-ready state of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub content: CellContent,
    pub visibility: Visibility,
}
