use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Where the mines are on a square board, independent of any play state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (width, height) = mine_mask.dim();
        if width != height || width == 0 || Coord::try_from(width).is_err() {
            return Err(GameError::InvalidBoardShape);
        }

        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count();
        Ok(Self {
            mine_mask,
            // bounded by the side check above
            mine_count: mine_count as CellCount,
        })
    }

    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        if size == 0 {
            return Err(GameError::InvalidBoardShape);
        }
        let mut mine_mask: Array2<bool> = Array2::default((size, size).to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn size(&self) -> Coord {
        // checked on construction
        self.mine_mask.dim().0 as Coord
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        square(self.size())
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.mine_mask
            .get(coords.to_nd_index())
            .copied()
            .unwrap_or(false)
    }

    pub(crate) fn into_mask(self) -> Array2<bool> {
        self.mine_mask
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_mines_from_coords() {
        let layout = MineLayout::from_mine_coords(3, &[(0, 0), (2, 1), (0, 0)]).unwrap();
        assert_eq!(layout.size(), 3);
        assert_eq!(layout.mine_count(), 2);
        assert_eq!(layout.safe_cell_count(), 7);
        assert!(layout[(2, 1)]);
        assert!(!layout.contains_mine((1, 2)));
    }

    #[test]
    fn rejects_out_of_bounds_mines() {
        assert_eq!(
            MineLayout::from_mine_coords(2, &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn rejects_non_square_masks() {
        let mask: Array2<bool> = Array2::default([3, 2]);
        assert_eq!(
            MineLayout::from_mine_mask(mask),
            Err(GameError::InvalidBoardShape)
        );
        assert_eq!(
            MineLayout::from_mine_coords(0, &[]),
            Err(GameError::InvalidBoardShape)
        );
    }
}
