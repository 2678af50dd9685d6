use std::fmt;

use ndarray::{Array, Array2};

use crate::coord::{BoardShape, Coord};
use crate::piece::PieceId;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GridItem {
    Piece(PieceId),
    Empty,
    // Either outside of the board shape or a hole in it.
    OutOfBounds,
}

impl GridItem {
    pub fn piece(self) -> Option<PieceId> {
        match self {
            GridItem::Piece(id) => Some(id),
            GridItem::Empty | GridItem::OutOfBounds => None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Cell {
    NoField,
    Field(Option<PieceId>),
}

// Occupancy index of the board. Boards on a diagonal grid are not rectangular, so the shape is
// the enclosing rectangle and cells that are not playable are marked as such.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    data: Array2<Cell>,
}

impl Grid {
    // Coordinates must be below `u8::MAX`, otherwise the shape cannot hold them.
    pub fn new(fields: &[Coord]) -> Self {
        let shape = BoardShape::enclosing(fields.iter().copied());
        let mut data = Array::from_elem(
            (shape.num_rows as usize, shape.num_diagonals as usize),
            Cell::NoField,
        );
        for &coord in fields {
            data[coord.to_index()] = Cell::Field(None);
        }
        Grid { data }
    }

    pub fn shape(&self) -> BoardShape {
        BoardShape {
            num_rows: self.data.shape()[0] as u8,
            num_diagonals: self.data.shape()[1] as u8,
        }
    }

    pub fn is_field(&self, coord: Coord) -> bool {
        matches!(self.data.get(coord.to_index()), Some(Cell::Field(_)))
    }

    pub fn get(&self, coord: Coord) -> GridItem {
        match self.data.get(coord.to_index()) {
            None | Some(Cell::NoField) => GridItem::OutOfBounds,
            Some(Cell::Field(None)) => GridItem::Empty,
            Some(Cell::Field(Some(id))) => GridItem::Piece(*id),
        }
    }

    // Returns the previous occupant. Panics if `coord` is not a field: callers must only pass
    // coordinates obtained from the catalog.
    #[track_caller]
    pub fn set(&mut self, coord: Coord, piece: Option<PieceId>) -> Option<PieceId> {
        let shape = self.shape();
        match self.data.get_mut(coord.to_index()) {
            Some(Cell::Field(occupant)) => std::mem::replace(occupant, piece),
            _ => panic!("{}", not_a_field_message(coord, shape)),
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = Coord> + '_ {
        self.shape().coords().filter(|&coord| self.is_field(coord))
    }
}

fn not_a_field_message(coord: Coord, shape: BoardShape) -> String {
    format!(
        "Coord ({}, {}) is not a field of the {}x{} board",
        coord.row, coord.diagonal, shape.num_rows, shape.num_diagonals
    )
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid ")?;
        f.debug_map()
            .entries(
                self.fields().filter_map(|coord| self.get(coord).piece().map(|id| (coord, id))),
            )
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holes_are_out_of_bounds() {
        let g = Grid::new(&[Coord::new(0, 0), Coord::new(1, 1)]);
        assert_eq!(g.shape(), BoardShape::new(2, 2));
        assert_eq!(g.get(Coord::new(0, 0)), GridItem::Empty);
        assert_eq!(g.get(Coord::new(0, 1)), GridItem::OutOfBounds);
        assert_eq!(g.get(Coord::new(5, 5)), GridItem::OutOfBounds);
        assert_eq!(g.fields().count(), 2);
    }

    #[test]
    fn set_returns_previous_occupant() {
        let mut g = Grid::new(&[Coord::new(0, 0)]);
        assert_eq!(g.set(Coord::new(0, 0), Some(PieceId(3))), None);
        assert_eq!(g.get(Coord::new(0, 0)), GridItem::Piece(PieceId(3)));
        assert_eq!(g.set(Coord::new(0, 0), None), Some(PieceId(3)));
        assert_eq!(g.get(Coord::new(0, 0)), GridItem::Empty);
    }

    #[test]
    #[should_panic]
    fn set_on_hole_panics() {
        let mut g = Grid::new(&[Coord::new(0, 0), Coord::new(1, 1)]);
        g.set(Coord::new(1, 0), Some(PieceId(0)));
    }
}
