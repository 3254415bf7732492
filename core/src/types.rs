/// Single coordinate axis, used for the board side and for positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`, column first.
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

/// Number of cells on a square board with the given side.
pub const fn square(side: Coord) -> CellCount {
    let side = side as CellCount;
    side.saturating_mul(side)
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Shifts `coords` by `delta`, returning a value only while it stays on a board of side `side`.
fn shift(coords: Coord2, delta: (i8, i8), side: Coord) -> Option<Coord2> {
    let next_x = coords.0.checked_add_signed(delta.0)?;
    let next_y = coords.1.checked_add_signed(delta.1)?;
    (next_x < side && next_y < side).then_some((next_x, next_y))
}

/// Iterates the up to 8 neighbors of a cell, clipped at the board edges.
#[derive(Clone, Debug)]
pub struct Neighbors {
    center: Coord2,
    side: Coord,
    index: u8,
}

impl Neighbors {
    pub fn new(center: Coord2, side: Coord) -> Self {
        Self {
            center,
            side,
            index: 0,
        }
    }
}

impl Iterator for Neighbors {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&delta) = DISPLACEMENTS.get(usize::from(self.index)) {
            self.index += 1;
            if let Some(coords) = shift(self.center, delta, self.side) {
                return Some(coords);
            }
        }
        None
    }
}
