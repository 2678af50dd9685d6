// Sample game states shared by unit and integration tests.

use crate::color::PieceColor;
use crate::coord::{BoardShape, Coord};
use crate::player::{Player, PlayerNumber};
use crate::snapshot::{GameSnapshot, GameWelcome, PieceSetup};


pub const P1: PlayerNumber = PlayerNumber(1);
pub const P2: PlayerNumber = PlayerNumber(2);

pub fn sample_players() -> Vec<Player> {
    vec![Player::new(P1, PieceColor::Red), Player::new(P2, PieceColor::Blue)]
}

// Rectangular board with every (row, diagonal) pair playable.
pub fn rectangular_snapshot(
    shape: BoardShape, players: Vec<Player>, pieces: &[(PlayerNumber, u8, u8)],
) -> GameSnapshot {
    GameSnapshot {
        fields: shape.coords().collect(),
        players,
        pieces: pieces
            .iter()
            .map(|&(owner, row, diagonal)| PieceSetup { owner, at: Coord::new(row, diagonal) })
            .collect(),
    }
}

// 8x8 board. Player 1 (red) has pieces at (2, 1) and (2, 3), player 2 (blue) at (5, 4) and (5, 6).
pub fn sample_snapshot() -> GameSnapshot {
    rectangular_snapshot(BoardShape::new(8, 8), sample_players(), &[
        (P1, 2, 1),
        (P1, 2, 3),
        (P2, 5, 4),
        (P2, 5, 6),
    ])
}

pub fn sample_welcome(player_number: PlayerNumber) -> GameWelcome {
    GameWelcome { player_number, snapshot: sample_snapshot() }
}
