use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::player::{Player, PlayerNumber};


#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PieceSetup {
    pub owner: PlayerNumber,
    pub at: Coord,
}

// Authoritative game state at the moment the local participant joins.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub fields: Vec<Coord>,
    pub players: Vec<Player>,
    pub pieces: Vec<PieceSetup>,
}

// Payload of the `GAME` message that opens a session.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GameWelcome {
    pub player_number: PlayerNumber,
    pub snapshot: GameSnapshot,
}
