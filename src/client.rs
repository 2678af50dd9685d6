// Single consumer of everything that can change the session: network messages, local input and
// transport shutdown all arrive as `IncomingEvent`s through one queue, so transitions never race.

use std::collections::VecDeque;
use std::sync::mpsc;

use log::{debug, error, warn};

use crate::element::BoardElement;
use crate::error::SessionError;
use crate::event::{ClientCommand, ServerEvent};
use crate::session::{BoardSession, Notification, TurnLabels};


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LocalEvent {
    ElementSelected(BoardElement),
    VoluntarySkipRequested,
    CloseRequested,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum IncomingEvent {
    // Raw text of one message from the authority.
    Network(String),
    // The transport will not deliver anything anymore.
    NetworkClosed,
    Local(LocalEvent),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum EventReaction {
    Continue,
    ExitOk,
    ExitWithError(String),
}

pub struct ClientState {
    labels: TurnLabels,
    commands_tx: mpsc::Sender<ClientCommand>,
    session: Option<BoardSession>,
    // Set once the client is done. Any later event is dropped.
    finished: bool,
    // Notifications produced while no session exists.
    notifications: VecDeque<Notification>,
}

impl ClientState {
    pub fn new(labels: TurnLabels, commands_tx: mpsc::Sender<ClientCommand>) -> Self {
        ClientState {
            labels,
            commands_tx,
            session: None,
            finished: false,
            notifications: VecDeque::new(),
        }
    }

    pub fn session(&self) -> Option<&BoardSession> { self.session.as_ref() }
    pub fn is_finished(&self) -> bool { self.finished }

    pub fn next_notification(&mut self) -> Option<Notification> {
        self.notifications
            .pop_front()
            .or_else(|| self.session.as_mut().and_then(|s| s.next_notification()))
    }

    pub fn apply_event(&mut self, event: IncomingEvent) -> EventReaction {
        if self.finished {
            debug!("Dropping {:?}: client finished", event);
            return EventReaction::ExitOk;
        }
        let result = match event {
            IncomingEvent::Network(raw) => self.process_server_message(&raw),
            IncomingEvent::NetworkClosed => {
                warn!("Connection to the server lost");
                self.shut_down();
                return EventReaction::ExitWithError("Connection to the server lost".to_owned());
            }
            IncomingEvent::Local(event) => self.process_local_event(event),
        };
        match result {
            Ok(()) => {
                if self.finished || self.session.as_ref().is_some_and(|s| s.is_closed()) {
                    self.finished = true;
                    EventReaction::ExitOk
                } else {
                    EventReaction::Continue
                }
            }
            Err(err) if !err.is_fatal() => {
                warn!("Dropping server message: {}", err);
                EventReaction::Continue
            }
            Err(err) => {
                if err.is_desync() {
                    error!("Out of sync with the server: {}", err);
                } else {
                    error!("{}", err);
                }
                self.shut_down();
                EventReaction::ExitWithError(err.to_string())
            }
        }
    }

    pub fn process_server_message(&mut self, raw: &str) -> Result<(), SessionError> {
        let event = ServerEvent::parse(raw)?;
        match self.session.as_mut() {
            Some(session) => apply_server_event(session, event),
            None => self.start_session(event),
        }
    }

    fn start_session(&mut self, event: ServerEvent) -> Result<(), SessionError> {
        let ServerEvent::Welcome(welcome) = event else {
            return Err(SessionError::NoSession);
        };
        self.session = Some(BoardSession::from_welcome(
            &welcome,
            self.labels.clone(),
            self.commands_tx.clone(),
        )?);
        Ok(())
    }

    fn process_local_event(&mut self, event: LocalEvent) -> Result<(), SessionError> {
        match event {
            LocalEvent::CloseRequested => self.shut_down(),
            LocalEvent::ElementSelected(element) => match self.session.as_mut() {
                Some(session) => session.select_element(element)?,
                None => debug!("Ignoring {:?}: game not started", element),
            },
            LocalEvent::VoluntarySkipRequested => match self.session.as_mut() {
                Some(session) => session.request_skip(),
                None => debug!("Ignoring skip request: game not started"),
            },
        }
        Ok(())
    }

    // Voluntary or forced, the end is the same: transport told to quit, session terminal.
    fn shut_down(&mut self) {
        match self.session.as_mut() {
            Some(session) => session.request_disconnect(),
            None => {
                let _ = self.commands_tx.send(ClientCommand::Quit);
                self.notifications.push_back(Notification::Disconnected);
            }
        }
        self.finished = true;
    }
}

fn apply_server_event(session: &mut BoardSession, event: ServerEvent) -> Result<(), SessionError> {
    match event {
        ServerEvent::Welcome(_) => {
            return Err(SessionError::MalformedCommand("duplicate game welcome".to_owned()));
        }
        ServerEvent::ActivateTurn => session.activate_turn(),
        ServerEvent::DeactivateTurn | ServerEvent::SkipTurn => session.deactivate_turn(),
        ServerEvent::MoveConfirmed(command) => session.apply_confirmed_move(&command)?,
        ServerEvent::MoveRejected => session.handle_move_rejected(),
        ServerEvent::OpponentDisconnected => session.handle_opponent_disconnected(),
        ServerEvent::Label(text) => session.set_label(text),
        ServerEvent::GameOver(message) => session.handle_game_over(&message),
    }
    Ok(())
}
