// Text form of a move, as exchanged with the authority:
//
//   MOVE <fromRow> <fromDiagonal> <toRow> <toDiagonal>
//
// Coordinates are non-negative integers. Any other shape is rejected as a whole.

use std::fmt;

use itertools::Itertools;

use crate::board::{BoardCatalog, Field};
use crate::coord::Coord;
use crate::error::SessionError;
use crate::piece::Piece;


pub const MOVE_VERB: &str = "MOVE";
const NUM_TOKENS: usize = 5;

// Coordinates here are raw: they are only checked against the board by `resolve_*`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MoveCommand {
    pub from: Coord,
    pub to: Coord,
}

impl MoveCommand {
    pub fn encode(from: Field, to: Field) -> Self {
        MoveCommand { from: from.coord(), to: to.coord() }
    }

    pub fn to_wire(self) -> String { format!("{MOVE_VERB} {} {}", self.from, self.to) }

    pub fn decode(raw: &str) -> Result<Self, SessionError> {
        let tokens = raw.split_whitespace().collect_vec();
        let [verb, from_row, from_diagonal, to_row, to_diagonal]: [&str; NUM_TOKENS] =
            tokens.try_into().map_err(|tokens: Vec<&str>| {
                SessionError::MalformedCommand(format!(
                    "expected {NUM_TOKENS} tokens, got {} in '{raw}'",
                    tokens.len()
                ))
            })?;
        if verb != MOVE_VERB {
            return Err(SessionError::MalformedCommand(format!(
                "expected '{MOVE_VERB}', got '{verb}'"
            )));
        }
        let from =
            Coord::new(parse_coordinate(from_row, raw)?, parse_coordinate(from_diagonal, raw)?);
        let to = Coord::new(parse_coordinate(to_row, raw)?, parse_coordinate(to_diagonal, raw)?);
        Ok(MoveCommand { from, to })
    }

    // The piece standing on the source field.
    pub fn resolve_piece<'a>(&self, catalog: &'a BoardCatalog) -> Result<&'a Piece, SessionError> {
        let unknown_piece = || SessionError::UnknownPiece {
            row: self.from.row,
            diagonal: self.from.diagonal,
        };
        let field =
            catalog.field_at(self.from.row, self.from.diagonal).map_err(|_| unknown_piece())?;
        catalog.piece_at(field).ok_or_else(unknown_piece)
    }

    pub fn resolve_field(&self, catalog: &BoardCatalog) -> Result<Field, SessionError> {
        catalog.field_at(self.to.row, self.to.diagonal)
    }
}

impl fmt::Display for MoveCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.to_wire()) }
}

fn parse_coordinate(token: &str, raw: &str) -> Result<u8, SessionError> {
    token.parse().map_err(|_| {
        SessionError::MalformedCommand(format!("invalid coordinate '{token}' in '{raw}'"))
    })
}
