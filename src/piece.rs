use serde::{Deserialize, Serialize};

use crate::board::Field;
use crate::color::PieceColor;
use crate::player::PlayerNumber;


// Dense index into the catalog's piece list. Only meaningful for the catalog that issued it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct PieceId(pub usize);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Piece {
    pub id: PieceId,
    pub owner: PlayerNumber,
    // Derived from the owner when the catalog is built.
    pub color: PieceColor,
    pub field: Field,
}

impl Piece {
    pub fn is_owned_by(&self, player: PlayerNumber) -> bool { self.owner == player }
}
