use alloc::collections::{BTreeSet, VecDeque};

use crate::*;

/// Reveals one hidden, unflagged cell on a board whose mines are already placed, and cascades
/// from it when it borders no mines. Terminal evaluation is left to the caller.
///
/// Returns `HitMine` or `Revealed`.
pub(crate) fn reveal_cell(board: &mut Board, session: &mut Session, coords: Coord2) -> RevealOutcome {
    let cell = board.cell_mut(coords);
    debug_assert!(cell.is_hidden() && !cell.flagged);

    cell.revealed = true;
    session.revealed_count += 1;

    if cell.mine {
        // a struck mine ends up revealed and flagged exactly once
        if !cell.flagged {
            cell.flagged = true;
            session.correctly_flagged_count += 1;
        }
        session.mines_hit += 1;
        session.lives_remaining = session.lives_remaining.saturating_sub(1);
        log::debug!(
            "Hit mine at {:?}, {} lives left",
            coords,
            session.lives_remaining
        );
        return RevealOutcome::HitMine;
    }

    let adjacent_mines = cell.adjacent_mines;
    log::debug!("Revealed cell at {:?}, mine count: {}", coords, adjacent_mines);
    if adjacent_mines == 0 {
        session.revealed_count += cascade(board, coords);
    }
    RevealOutcome::Revealed
}

/// Flood-fills outward from a revealed zero-count cell.
///
/// Mines and flagged cells are walls, numbered cells are opened but do not propagate. Returns
/// how many cells were newly revealed.
fn cascade(board: &mut Board, origin: Coord2) -> CellCount {
    let mut opened = 0;
    let mut visited = BTreeSet::from([origin]);
    let mut to_visit: VecDeque<_> = board.iter_neighbors(origin).collect();
    log::trace!("Starting flood-fill from {:?}", origin);

    while let Some(coords) = to_visit.pop_front() {
        if !visited.insert(coords) {
            continue;
        }

        let cell = board.cell_mut(coords);
        if cell.revealed || cell.mine || cell.flagged {
            continue;
        }

        cell.revealed = true;
        opened += 1;
        let adjacent_mines = cell.adjacent_mines;
        log::trace!("Flood opened cell at {:?}, mine count: {}", coords, adjacent_mines);

        if adjacent_mines == 0 {
            to_visit.extend(
                board
                    .iter_neighbors(coords)
                    .filter(|pos| !visited.contains(pos)),
            );
        }
    }

    opened
}

/// Toggles the flag on a hidden cell; only flags on mines count toward the win.
pub(crate) fn toggle_flag(board: &mut Board, session: &mut Session, coords: Coord2) -> FlagOutcome {
    let cell = board.cell_mut(coords);
    if cell.revealed {
        return FlagOutcome::Unchanged;
    }

    cell.flagged = !cell.flagged;
    if cell.mine {
        if cell.flagged {
            session.correctly_flagged_count += 1;
        } else {
            session.correctly_flagged_count -= 1;
        }
    }
    log::debug!("Flag at {:?} is now {}", coords, cell.flagged);

    if cell.flagged {
        FlagOutcome::Flagged
    } else {
        FlagOutcome::Unflagged
    }
}
