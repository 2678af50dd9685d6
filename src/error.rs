use std::fmt;

use crate::piece::PieceId;


// Errors raised by the session core.
//
// Selecting a piece that belongs to somebody else is deliberately absent: that is a normal
// misclick and is ignored rather than reported.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SessionError {
    // Wire text could not be parsed. The offending event is dropped, the session continues.
    MalformedCommand(String),
    // The coordinates do not name a field of the local board.
    UnknownField { row: u8, diagonal: u8 },
    // No local piece matches the reference.
    UnknownPiece { row: u8, diagonal: u8 },
    // A piece handle that was not issued by the local catalog.
    UnknownPieceId(PieceId),
    // A confirmed move targets a field that is taken locally.
    OccupiedField { row: u8, diagonal: u8 },
    // The starting snapshot sent by the authority is inconsistent.
    InvalidSnapshot(String),
    // A game event arrived before the session was established.
    NoSession,
}

impl SessionError {
    // Local state no longer matches the authority. Continuing would mean acting on stale state,
    // so these are fatal for the session.
    pub fn is_desync(&self) -> bool {
        matches!(
            self,
            SessionError::UnknownField { .. }
                | SessionError::UnknownPiece { .. }
                | SessionError::UnknownPieceId(_)
                | SessionError::OccupiedField { .. }
        )
    }

    pub fn is_fatal(&self) -> bool { !matches!(self, SessionError::MalformedCommand(_)) }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::MalformedCommand(message) => write!(f, "malformed command: {message}"),
            SessionError::UnknownField { row, diagonal } => {
                write!(f, "no field at ({row}, {diagonal})")
            }
            SessionError::UnknownPiece { row, diagonal } => {
                write!(f, "no piece at ({row}, {diagonal})")
            }
            SessionError::UnknownPieceId(id) => write!(f, "no piece with id {}", id.0),
            SessionError::OccupiedField { row, diagonal } => {
                write!(f, "field ({row}, {diagonal}) is already occupied")
            }
            SessionError::InvalidSnapshot(message) => write!(f, "invalid game snapshot: {message}"),
            SessionError::NoSession => write!(f, "no game in progress"),
        }
    }
}

impl std::error::Error for SessionError {}
