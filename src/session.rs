// Turn and selection tracking for the local participant.
//
// Every transition goes through `BoardSession`; the selection lives inside `TurnState`, so a held
// piece without an active turn cannot be expressed. Outgoing commands are handed to the transport
// through a channel and never awaited. UI effects are queued as `Notification`s.

use std::collections::VecDeque;
use std::sync::mpsc;

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use crate::board::{BoardCatalog, Field};
use crate::command::MoveCommand;
use crate::element::BoardElement;
use crate::error::SessionError;
use crate::event::ClientCommand;
use crate::piece::{Piece, PieceId};
use crate::player::Player;
use crate::snapshot::GameWelcome;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TurnState {
    // Not our turn.
    Idle,
    // Our turn, nothing picked up yet.
    Armed,
    // Our turn, holding one of our pieces.
    PieceHeld(PieceId),
    // Disconnected or game over. Nothing happens anymore.
    Closed,
}

impl TurnState {
    pub fn is_active(self) -> bool { matches!(self, TurnState::Armed | TurnState::PieceHeld(_)) }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Notification {
    TurnLabelChanged(String),
    InteractionEnabled(bool),
    Disconnected,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnLabels {
    pub my_turn: String,
    pub waiting: String,
    pub opponent_left: String,
    // "{}" is replaced with the message from the authority.
    pub game_over: String,
}

impl Default for TurnLabels {
    fn default() -> Self {
        TurnLabels {
            my_turn: "Your turn".to_owned(),
            waiting: "Waiting for your turn...".to_owned(),
            opponent_left: "Your opponent has left the game".to_owned(),
            game_over: "Game over: {}".to_owned(),
        }
    }
}

pub struct BoardSession {
    catalog: BoardCatalog,
    me: Player,
    state: TurnState,
    labels: TurnLabels,
    commands_tx: mpsc::Sender<ClientCommand>,
    notifications: VecDeque<Notification>,
}

impl BoardSession {
    pub fn new(
        catalog: BoardCatalog, me: Player, labels: TurnLabels,
        commands_tx: mpsc::Sender<ClientCommand>,
    ) -> Self {
        BoardSession {
            catalog,
            me,
            state: TurnState::Idle,
            labels,
            commands_tx,
            notifications: VecDeque::new(),
        }
    }

    pub fn from_welcome(
        welcome: &GameWelcome, labels: TurnLabels, commands_tx: mpsc::Sender<ClientCommand>,
    ) -> Result<Self, SessionError> {
        let catalog = BoardCatalog::from_snapshot(&welcome.snapshot)?;
        let me = *catalog.player(welcome.player_number).ok_or_else(|| {
            SessionError::InvalidSnapshot(format!(
                "player {} is not seated at this board",
                welcome.player_number
            ))
        })?;
        info!("Joined the game as player {} ({})", me.number, me.color);
        let mut session = BoardSession::new(catalog, me, labels, commands_tx);
        session.notify_label(session.labels.waiting.clone());
        Ok(session)
    }

    pub fn catalog(&self) -> &BoardCatalog { &self.catalog }
    pub fn me(&self) -> Player { self.me }
    pub fn state(&self) -> TurnState { self.state }
    pub fn is_active(&self) -> bool { self.state.is_active() }
    pub fn is_closed(&self) -> bool { self.state == TurnState::Closed }
    pub fn labels(&self) -> &TurnLabels { &self.labels }

    pub fn selection(&self) -> Option<&Piece> {
        match self.state {
            TurnState::PieceHeld(id) => self.catalog.piece(id),
            TurnState::Idle | TurnState::Armed | TurnState::Closed => None,
        }
    }

    pub fn next_notification(&mut self) -> Option<Notification> { self.notifications.pop_front() }

    pub fn activate_turn(&mut self) {
        match self.state {
            TurnState::Idle => {
                self.state = TurnState::Armed;
                self.notifications.push_back(Notification::InteractionEnabled(true));
                self.notify_label(self.labels.my_turn.clone());
            }
            TurnState::Armed | TurnState::PieceHeld(_) => {
                warn!("Turn activated while already active ({:?}); ignoring", self.state);
            }
            TurnState::Closed => debug!("Ignoring turn activation: session closed"),
        }
    }

    pub fn deactivate_turn(&mut self) {
        match self.state {
            TurnState::Armed | TurnState::PieceHeld(_) => self.go_idle(),
            TurnState::Idle => debug!("Turn deactivated while idle"),
            TurnState::Closed => debug!("Ignoring turn deactivation: session closed"),
        }
    }

    // Local decision to pass. The authority is told first, then the turn ends locally.
    pub fn request_skip(&mut self) {
        if !self.state.is_active() {
            debug!("Ignoring skip request in state {:?}", self.state);
            return;
        }
        if self.send(ClientCommand::Skip) {
            self.go_idle();
        }
    }

    pub fn select_element(&mut self, element: BoardElement) -> Result<(), SessionError> {
        if !self.state.is_active() {
            debug!("Ignoring {:?} in state {:?}", element, self.state);
            return Ok(());
        }
        match element {
            BoardElement::Piece(id) => {
                let piece = self.catalog.piece(id).ok_or(SessionError::UnknownPieceId(id))?;
                if piece.is_owned_by(self.me.number) {
                    self.state = TurnState::PieceHeld(id);
                } else {
                    debug!("Ignoring selection of {:?} owned by player {}", id, piece.owner);
                }
            }
            BoardElement::Field(target) => match self.state {
                TurnState::PieceHeld(id) => self.submit_move(id, target)?,
                _ => debug!("Ignoring field {} selected with no piece held", target),
            },
        }
        Ok(())
    }

    // The move is sent and the turn ends right away, before the authority answers. This prevents
    // a second move from being queued while the first one is in flight. There is no rollback: if
    // the authority disagrees, it says so with a new turn event.
    fn submit_move(&mut self, id: PieceId, target: Field) -> Result<(), SessionError> {
        let from = self.catalog.piece(id).ok_or(SessionError::UnknownPieceId(id))?.field;
        let command = MoveCommand::encode(from, target);
        debug!("Submitting {}", command);
        if self.send(ClientCommand::Move(command)) {
            self.go_idle();
        }
        Ok(())
    }

    // Updates the board only. Whose turn it is is decided by separate events.
    pub fn apply_confirmed_move(&mut self, command: &MoveCommand) -> Result<(), SessionError> {
        if self.is_closed() {
            debug!("Ignoring confirmed move {}: session closed", command);
            return Ok(());
        }
        let id = command.resolve_piece(&self.catalog)?.id;
        let to = command.resolve_field(&self.catalog)?;
        self.catalog.move_piece(id, to)
    }

    pub fn handle_move_rejected(&mut self) {
        info!("Move rejected by the authority");
        self.activate_turn();
    }

    pub fn handle_opponent_disconnected(&mut self) {
        if self.is_closed() {
            return;
        }
        info!("Opponent disconnected");
        self.notify_label(self.labels.opponent_left.clone());
        self.close();
    }

    pub fn handle_game_over(&mut self, message: &str) {
        if self.is_closed() {
            return;
        }
        info!("Game over: {}", message);
        self.notify_label(self.labels.game_over.replace("{}", message));
        self.close();
    }

    pub fn set_label(&mut self, text: String) {
        if !self.is_closed() {
            self.notify_label(text);
        }
    }

    pub fn request_disconnect(&mut self) {
        if !self.is_closed() {
            info!("Leaving the game");
            self.close();
        }
    }

    fn go_idle(&mut self) {
        self.state = TurnState::Idle;
        self.notifications.push_back(Notification::InteractionEnabled(false));
        self.notify_label(self.labels.waiting.clone());
    }

    // Tells the transport to leave and makes the session terminal.
    fn close(&mut self) {
        if self.state.is_active() {
            self.notifications.push_back(Notification::InteractionEnabled(false));
        }
        // The transport may already be gone, in which case there is nobody to tell.
        let _ = self.commands_tx.send(ClientCommand::Quit);
        self.state = TurnState::Closed;
        self.notifications.push_back(Notification::Disconnected);
    }

    // Returns false if the transport is gone, in which case the session is closed.
    fn send(&mut self, command: ClientCommand) -> bool {
        if self.commands_tx.send(command).is_ok() {
            return true;
        }
        error!("Transport closed, cannot send {:?}", command);
        self.close();
        false
    }

    fn notify_label(&mut self, text: String) {
        self.notifications.push_back(Notification::TurnLabelChanged(text));
    }
}
