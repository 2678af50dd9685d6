use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};


#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BoardShape {
    pub num_rows: u8,
    pub num_diagonals: u8,
}

impl BoardShape {
    pub const fn new(num_rows: u8, num_diagonals: u8) -> Self { Self { num_rows, num_diagonals } }

    pub fn contains(self, coord: Coord) -> bool {
        coord.row < self.num_rows && coord.diagonal < self.num_diagonals
    }

    // Smallest shape that contains all given coordinates.
    pub fn enclosing(coords: impl IntoIterator<Item = Coord>) -> Self {
        coords.into_iter().fold(Self::new(0, 0), |shape, coord| Self {
            num_rows: shape.num_rows.max(coord.row.saturating_add(1)),
            num_diagonals: shape.num_diagonals.max(coord.diagonal.saturating_add(1)),
        })
    }

    pub fn coords(self) -> impl Iterator<Item = Coord> {
        (0..self.num_rows)
            .cartesian_product(0..self.num_diagonals)
            .map(|(row, diagonal)| Coord { row, diagonal })
    }
}


// Address of a field on the diagonal grid. Both components are 0-based.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: u8,
    pub diagonal: u8,
}

impl Coord {
    pub const fn new(row: u8, diagonal: u8) -> Self { Self { row, diagonal } }

    pub fn to_index(self) -> (usize, usize) { (self.row as usize, self.diagonal as usize) }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({}, {})", self.row, self.diagonal)
    }
}

// Wire form: "row diagonal".
impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.row, self.diagonal)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enclosing_shape() {
        let shape = BoardShape::enclosing([Coord::new(0, 3), Coord::new(5, 1)]);
        assert_eq!(shape, BoardShape::new(6, 4));
        assert!(shape.contains(Coord::new(5, 3)));
        assert!(!shape.contains(Coord::new(6, 0)));
        assert!(!shape.contains(Coord::new(0, 4)));
    }

    #[test]
    fn enclosing_empty() {
        assert_eq!(BoardShape::enclosing([]), BoardShape::new(0, 0));
    }

    #[test]
    fn coords_cover_shape() {
        let coords = BoardShape::new(2, 3).coords().collect_vec();
        assert_eq!(coords.len(), 6);
        assert_eq!(coords.first(), Some(&Coord::new(0, 0)));
        assert_eq!(coords.last(), Some(&Coord::new(1, 2)));
    }
}
