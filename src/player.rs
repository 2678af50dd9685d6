use std::fmt;

use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::color::PieceColor;


// Identity assigned to a participant by the authority. Stable for the whole game.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerNumber(pub u8);

impl fmt::Display for PlayerNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "#{}", self.0) }
}


#[derive(Clone, Copy, PartialEq, Eq, Debug, new, Serialize, Deserialize)]
pub struct Player {
    pub number: PlayerNumber,
    pub color: PieceColor,
}
