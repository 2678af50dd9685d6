use crate::board::{BoardCatalog, Field};
use crate::color::PieceColor;
use crate::coord::Coord;
use crate::error::SessionError;
use crate::piece::PieceId;


// Anything the interaction layer can point at.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BoardElement {
    Piece(PieceId),
    Field(Field),
}

impl BoardElement {
    // What a click at `coord` hits: the piece standing there, otherwise the bare field.
    pub fn at(catalog: &BoardCatalog, coord: Coord) -> Result<Self, SessionError> {
        let field = catalog.field_at(coord.row, coord.diagonal)?;
        Ok(match catalog.piece_at(field) {
            Some(piece) => BoardElement::Piece(piece.id),
            None => BoardElement::Field(field),
        })
    }

    pub fn is_piece(self) -> bool { matches!(self, BoardElement::Piece(_)) }
    pub fn is_field(self) -> bool { matches!(self, BoardElement::Field(_)) }

    // Fields have no color.
    pub fn color(self, catalog: &BoardCatalog) -> Option<PieceColor> {
        match self {
            BoardElement::Piece(id) => catalog.piece(id).map(|piece| piece.color),
            BoardElement::Field(_) => None,
        }
    }
}
