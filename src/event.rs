// Session messages exchanged with the authority. One message per text frame; the first token is
// the verb. Only `MOVE` carries coordinates, see `command`.

use crate::command::{MOVE_VERB, MoveCommand};
use crate::error::SessionError;
use crate::snapshot::GameWelcome;


const GAME_VERB: &str = "GAME";
const ACTIVATE_VERB: &str = "ACTIVATE";
const DEACTIVATE_VERB: &str = "DEACTIVATE";
const SKIP_VERB: &str = "SKIP";
const REJECTED_VERB: &str = "REJECTED";
const DISCONNECTED_VERB: &str = "DISCONNECTED";
const LABEL_VERB: &str = "LABEL";
const GAME_OVER_VERB: &str = "GAMEOVER";
const QUIT_VERB: &str = "QUIT";

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ServerEvent {
    // Opens the session: assigns the local player and sends the starting position.
    Welcome(Box<GameWelcome>),
    ActivateTurn,
    DeactivateTurn,
    // The authority skipped our turn (e.g. on timeout).
    SkipTurn,
    MoveConfirmed(MoveCommand),
    // The last submitted move was not accepted; we may try again.
    MoveRejected,
    OpponentDisconnected,
    Label(String),
    GameOver(String),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ClientCommand {
    Move(MoveCommand),
    Skip,
    Quit,
}

impl ServerEvent {
    pub fn parse(raw: &str) -> Result<Self, SessionError> {
        let raw = raw.trim();
        let (verb, rest) = split_verb(raw);
        match verb {
            GAME_VERB => {
                let welcome = serde_json::from_str(rest).map_err(|err| {
                    SessionError::MalformedCommand(format!("bad {GAME_VERB} payload: {err}"))
                })?;
                Ok(ServerEvent::Welcome(Box::new(welcome)))
            }
            MOVE_VERB => Ok(ServerEvent::MoveConfirmed(MoveCommand::decode(raw)?)),
            LABEL_VERB => Ok(ServerEvent::Label(rest.to_owned())),
            GAME_OVER_VERB => Ok(ServerEvent::GameOver(rest.to_owned())),
            ACTIVATE_VERB | DEACTIVATE_VERB | SKIP_VERB | REJECTED_VERB | DISCONNECTED_VERB => {
                if !rest.is_empty() {
                    return Err(SessionError::MalformedCommand(format!(
                        "unexpected arguments for {verb}: '{rest}'"
                    )));
                }
                Ok(match verb {
                    ACTIVATE_VERB => ServerEvent::ActivateTurn,
                    DEACTIVATE_VERB => ServerEvent::DeactivateTurn,
                    SKIP_VERB => ServerEvent::SkipTurn,
                    REJECTED_VERB => ServerEvent::MoveRejected,
                    _ => ServerEvent::OpponentDisconnected,
                })
            }
            _ => Err(SessionError::MalformedCommand(format!("unknown message '{raw}'"))),
        }
    }

    // Serialization is only needed by whoever plays the authority (tests, tooling).
    pub fn to_wire(&self) -> String {
        match self {
            ServerEvent::Welcome(welcome) => {
                // Serializing plain data structs cannot fail.
                let payload = serde_json::to_string(welcome).unwrap_or_default();
                format!("{GAME_VERB} {payload}")
            }
            ServerEvent::ActivateTurn => ACTIVATE_VERB.to_owned(),
            ServerEvent::DeactivateTurn => DEACTIVATE_VERB.to_owned(),
            ServerEvent::SkipTurn => SKIP_VERB.to_owned(),
            ServerEvent::MoveConfirmed(command) => command.to_wire(),
            ServerEvent::MoveRejected => REJECTED_VERB.to_owned(),
            ServerEvent::OpponentDisconnected => DISCONNECTED_VERB.to_owned(),
            ServerEvent::Label(text) => format!("{LABEL_VERB} {text}"),
            ServerEvent::GameOver(text) => format!("{GAME_OVER_VERB} {text}"),
        }
    }
}

impl ClientCommand {
    pub fn to_wire(self) -> String {
        match self {
            ClientCommand::Move(command) => command.to_wire(),
            ClientCommand::Skip => SKIP_VERB.to_owned(),
            ClientCommand::Quit => QUIT_VERB.to_owned(),
        }
    }

    pub fn parse(raw: &str) -> Result<Self, SessionError> {
        let raw = raw.trim();
        match raw {
            SKIP_VERB => Ok(ClientCommand::Skip),
            QUIT_VERB => Ok(ClientCommand::Quit),
            _ => MoveCommand::decode(raw).map(ClientCommand::Move),
        }
    }
}

fn split_verb(raw: &str) -> (&str, &str) {
    match raw.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim_start()),
        None => (raw, ""),
    }
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::coord::Coord;
    use crate::test_util::{P2, sample_welcome};

    #[test]
    fn parse_simple_events() {
        assert_eq!(ServerEvent::parse("ACTIVATE").unwrap(), ServerEvent::ActivateTurn);
        assert_eq!(ServerEvent::parse(" DEACTIVATE\n").unwrap(), ServerEvent::DeactivateTurn);
        assert_eq!(ServerEvent::parse("SKIP").unwrap(), ServerEvent::SkipTurn);
        assert_eq!(ServerEvent::parse("REJECTED").unwrap(), ServerEvent::MoveRejected);
        assert_eq!(ServerEvent::parse("DISCONNECTED").unwrap(), ServerEvent::OpponentDisconnected);
        assert_eq!(
            ServerEvent::parse("LABEL Player 2 is thinking").unwrap(),
            ServerEvent::Label("Player 2 is thinking".to_owned())
        );
        assert_eq!(
            ServerEvent::parse("MOVE 5 4 4 3").unwrap(),
            ServerEvent::MoveConfirmed(MoveCommand { from: Coord::new(5, 4), to: Coord::new(4, 3) })
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        for raw in ["", "HELLO", "ACTIVATE now", "MOVE 1 2", "GAME {", "GAME"] {
            assert!(
                matches!(ServerEvent::parse(raw), Err(SessionError::MalformedCommand(_))),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn welcome_survives_the_wire() {
        let event = ServerEvent::Welcome(Box::new(sample_welcome(P2)));
        assert_eq!(ServerEvent::parse(&event.to_wire()).unwrap(), event);
    }

    #[test]
    fn client_commands() {
        assert_eq!(ClientCommand::Skip.to_wire(), "SKIP");
        assert_eq!(ClientCommand::Quit.to_wire(), "QUIT");
        assert_eq!(ClientCommand::parse("MOVE 2 1 3 2").unwrap().to_wire(), "MOVE 2 1 3 2");
        assert!(ClientCommand::parse("SKIP 1").is_err());
    }
}
