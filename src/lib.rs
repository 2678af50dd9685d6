#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod board;
pub mod client;
pub mod color;
pub mod command;
pub mod coord;
pub mod element;
pub mod error;
pub mod event;
pub mod grid;
pub mod piece;
pub mod player;
pub mod session;
pub mod snapshot;
pub mod test_util;

pub use board::{BoardCatalog, Field};
pub use client::{ClientState, EventReaction, IncomingEvent, LocalEvent};
pub use color::PieceColor;
pub use command::MoveCommand;
pub use coord::{BoardShape, Coord};
pub use element::BoardElement;
pub use error::SessionError;
pub use event::{ClientCommand, ServerEvent};
pub use piece::{Piece, PieceId};
pub use player::{Player, PlayerNumber};
pub use session::{BoardSession, Notification, TurnLabels, TurnState};
pub use snapshot::{GameSnapshot, GameWelcome, PieceSetup};
