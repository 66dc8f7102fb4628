/// Single coordinate axis, used for the board side length and for positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Number of cells on a square board of side `size`.
pub const fn square(size: Coord) -> CellCount {
    let size = size as CellCount;
    size.saturating_mul(size)
}

/// Iterates the cells of the 3×3 block centered on `center`, clipped to a square board of
/// side `size`, in row-major order.
///
/// The center itself is yielded only when `include_center` is set, which lets the same walk
/// serve both neighbor counting and the hint neighborhood.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    size: Coord,
    include_center: bool,
    step: u8,
}

impl NeighborIter {
    pub const fn neighbors(center: Coord2, size: Coord) -> Self {
        Self {
            center,
            size,
            include_center: false,
            step: 0,
        }
    }

    pub const fn block(center: Coord2, size: Coord) -> Self {
        Self {
            center,
            size,
            include_center: true,
            step: 0,
        }
    }

    fn offset(value: Coord, delta: u8, size: Coord) -> Option<Coord> {
        // delta is 0, 1 or 2 and stands for -1, 0, +1
        let shifted = (value as u16 + delta as u16).checked_sub(1)?;
        (shifted < size as u16).then_some(shifted as Coord)
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while self.step < 9 {
            let (dr, dc) = (self.step / 3, self.step % 3);
            self.step += 1;

            if dr == 1 && dc == 1 && !self.include_center {
                continue;
            }

            let row = Self::offset(self.center.0, dr, self.size);
            let col = Self::offset(self.center.1, dc, self.size);
            if let (Some(row), Some(col)) = (row, col) {
                return Some((row, col));
            }
        }
        None
    }
}
