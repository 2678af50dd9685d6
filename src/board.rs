use std::fmt;

use itertools::Itertools;

use crate::coord::{BoardShape, Coord};
use crate::error::SessionError;
use crate::grid::{Grid, GridItem};
use crate::piece::{Piece, PieceId};
use crate::player::{Player, PlayerNumber};
use crate::snapshot::GameSnapshot;


// A playable field. Values are only handed out by `BoardCatalog`, so holding a `Field` means the
// coordinates exist on the board.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Field {
    coord: Coord,
}

impl Field {
    pub fn coord(self) -> Coord { self.coord }
    pub fn row(self) -> u8 { self.coord.row }
    pub fn diagonal(self) -> u8 { self.coord.diagonal }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { fmt::Display::fmt(&self.coord, f) }
}


// Static board geometry plus the current position of every piece.
#[derive(Clone, Debug)]
pub struct BoardCatalog {
    grid: Grid,
    players: Vec<Player>,
    pieces: Vec<Piece>,
}

impl BoardCatalog {
    pub fn from_snapshot(snapshot: &GameSnapshot) -> Result<Self, SessionError> {
        if let Some(coord) = snapshot.fields.iter().duplicates().next() {
            return Err(SessionError::InvalidSnapshot(format!("duplicate field {coord:?}")));
        }
        // The grid is sized by the largest coordinate plus one, which must fit into `u8`.
        if let Some(coord) =
            snapshot.fields.iter().find(|c| c.row == u8::MAX || c.diagonal == u8::MAX)
        {
            return Err(SessionError::InvalidSnapshot(format!("field {coord:?} is out of range")));
        }
        if let Some(number) = snapshot.players.iter().map(|p| p.number).duplicates().next() {
            return Err(SessionError::InvalidSnapshot(format!("duplicate player {number}")));
        }
        let mut catalog = BoardCatalog {
            grid: Grid::new(&snapshot.fields),
            players: snapshot.players.clone(),
            pieces: Vec::with_capacity(snapshot.pieces.len()),
        };
        for setup in &snapshot.pieces {
            let owner = catalog.player(setup.owner).ok_or_else(|| {
                SessionError::InvalidSnapshot(format!(
                    "piece at {:?} belongs to unknown player {}",
                    setup.at, setup.owner
                ))
            })?;
            let color = owner.color;
            let field = match catalog.grid.get(setup.at) {
                GridItem::Empty => Field { coord: setup.at },
                GridItem::Piece(_) => {
                    return Err(SessionError::InvalidSnapshot(format!(
                        "two pieces at {:?}",
                        setup.at
                    )));
                }
                GridItem::OutOfBounds => {
                    return Err(SessionError::InvalidSnapshot(format!(
                        "piece at {:?} is off the board",
                        setup.at
                    )));
                }
            };
            let id = PieceId(catalog.pieces.len());
            catalog.grid.set(field.coord, Some(id));
            catalog.pieces.push(Piece { id, owner: setup.owner, color, field });
        }
        Ok(catalog)
    }

    pub fn shape(&self) -> BoardShape { self.grid.shape() }

    pub fn field_at(&self, row: u8, diagonal: u8) -> Result<Field, SessionError> {
        let coord = Coord::new(row, diagonal);
        if self.grid.is_field(coord) {
            Ok(Field { coord })
        } else {
            Err(SessionError::UnknownField { row, diagonal })
        }
    }

    pub fn piece_at(&self, field: Field) -> Option<&Piece> {
        self.grid.get(field.coord).piece().map(|id| &self.pieces[id.0])
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> { self.pieces.get(id.0) }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.grid.fields().map(|coord| Field { coord })
    }
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> { self.pieces.iter() }
    pub fn pieces_of(&self, owner: PlayerNumber) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(move |piece| piece.is_owned_by(owner))
    }

    pub fn players(&self) -> &[Player] { &self.players }
    pub fn player(&self, number: PlayerNumber) -> Option<&Player> {
        self.players.iter().find(|p| p.number == number)
    }

    // Moving onto the piece's own field is allowed and changes nothing.
    pub fn move_piece(&mut self, id: PieceId, to: Field) -> Result<(), SessionError> {
        let from = self.piece(id).ok_or(SessionError::UnknownPieceId(id))?.field;
        match self.grid.get(to.coord) {
            GridItem::Piece(other) if other != id => {
                return Err(SessionError::OccupiedField { row: to.row(), diagonal: to.diagonal() });
            }
            GridItem::OutOfBounds => {
                return Err(SessionError::UnknownField { row: to.row(), diagonal: to.diagonal() });
            }
            GridItem::Piece(_) | GridItem::Empty => {}
        }
        self.grid.set(from.coord, None);
        self.grid.set(to.coord, Some(id));
        self.pieces[id.0].field = to;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PieceColor;
    use crate::test_util::{sample_snapshot, P1, P2};

    fn catalog() -> BoardCatalog { BoardCatalog::from_snapshot(&sample_snapshot()).unwrap() }

    #[test]
    fn field_lookup() {
        let catalog = catalog();
        assert_eq!(catalog.field_at(3, 2).unwrap().coord(), Coord::new(3, 2));
        assert_eq!(
            catalog.field_at(8, 0),
            Err(SessionError::UnknownField { row: 8, diagonal: 0 })
        );
        assert_eq!(catalog.fields().count(), 64);
    }

    #[test]
    fn piece_lookup() {
        let catalog = catalog();
        let piece = catalog.piece_at(catalog.field_at(2, 1).unwrap()).unwrap();
        assert_eq!(piece.owner, P1);
        assert_eq!(piece.color, PieceColor::Red);
        assert!(catalog.piece_at(catalog.field_at(3, 2).unwrap()).is_none());
        assert_eq!(catalog.pieces_of(P2).count(), 2);
    }

    #[test]
    fn move_piece_updates_both_sides() {
        let mut catalog = catalog();
        let from = catalog.field_at(2, 1).unwrap();
        let to = catalog.field_at(3, 2).unwrap();
        let id = catalog.piece_at(from).unwrap().id;
        catalog.move_piece(id, to).unwrap();
        assert!(catalog.piece_at(from).is_none());
        assert_eq!(catalog.piece_at(to).unwrap().id, id);
        assert_eq!(catalog.piece(id).unwrap().field, to);
    }

    #[test]
    fn move_onto_occupied_field_is_rejected() {
        let mut catalog = catalog();
        let from = catalog.field_at(2, 1).unwrap();
        let to = catalog.field_at(5, 4).unwrap();
        let id = catalog.piece_at(from).unwrap().id;
        assert_eq!(
            catalog.move_piece(id, to),
            Err(SessionError::OccupiedField { row: 5, diagonal: 4 })
        );
        assert_eq!(catalog.piece(id).unwrap().field, from);
    }

    #[test]
    fn snapshot_with_overlapping_pieces() {
        let mut snapshot = sample_snapshot();
        let first = snapshot.pieces[0].clone();
        snapshot.pieces.push(first);
        assert!(matches!(
            BoardCatalog::from_snapshot(&snapshot),
            Err(SessionError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn snapshot_with_unknown_owner() {
        let mut snapshot = sample_snapshot();
        snapshot.pieces[0].owner = PlayerNumber(9);
        assert!(matches!(
            BoardCatalog::from_snapshot(&snapshot),
            Err(SessionError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn snapshot_with_piece_off_board() {
        let mut snapshot = sample_snapshot();
        snapshot.pieces[0].at = Coord::new(10, 10);
        assert!(matches!(
            BoardCatalog::from_snapshot(&snapshot),
            Err(SessionError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn snapshot_with_field_at_coordinate_limit() {
        for coord in [Coord::new(255, 0), Coord::new(3, 255)] {
            let mut snapshot = sample_snapshot();
            snapshot.fields.push(coord);
            assert!(matches!(
                BoardCatalog::from_snapshot(&snapshot),
                Err(SessionError::InvalidSnapshot(_))
            ));
        }
        let mut snapshot = sample_snapshot();
        snapshot.fields.push(Coord::new(254, 254));
        let catalog = BoardCatalog::from_snapshot(&snapshot).unwrap();
        assert_eq!(catalog.shape(), BoardShape::new(255, 255));
    }
}
