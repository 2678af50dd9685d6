use std::fmt;
use std::io;
use std::net::{TcpStream, ToSocketAddrs};
use std::sync::mpsc;
use std::thread;

use checkers_session::client::{ClientState, EventReaction, IncomingEvent, LocalEvent};
use checkers_session::coord::Coord;
use checkers_session::element::BoardElement;
use checkers_session::event::ClientCommand;
use checkers_session::session::{Notification, TurnState};
use crossterm::style::{self, Stylize};
use crossterm::{cursor, event as term_event, execute, terminal};
use itertools::Itertools;
use log::{error, info, warn};
use scopeguard::defer;
use tungstenite::protocol;
use url::Url;

use crate::client_config::ClientConfig;
use crate::network::{self, CommunicationError};
use crate::tui;


enum ConsoleEvent {
    Session(IncomingEvent),
    Terminal(term_event::Event),
    Tick,
}

// What the screen shows besides the board. Updated from session notifications only.
struct ScreenState {
    turn_label: String,
    interaction_enabled: bool,
    disconnected: bool,
    keyboard_input: String,
    command_error: Option<String>,
}

fn writeln_raw(stdout: &mut io::Stdout, v: impl fmt::Display) -> io::Result<()> {
    let s = v.to_string();
    // Note. Not using `lines()` because it removes trailing new line.
    for line in s.split('\n') {
        execute!(stdout, style::Print(line), cursor::MoveToNextLine(1), cursor::Hide)?;
    }
    Ok(())
}

fn render(
    stdout: &mut io::Stdout, client_state: &ClientState, screen: &ScreenState,
) -> io::Result<()> {
    execute!(stdout, cursor::MoveTo(0, 0))?;
    match client_state.session() {
        Some(session) => {
            let selected = match session.state() {
                TurnState::PieceHeld(id) => Some(id),
                TurnState::Idle | TurnState::Armed | TurnState::Closed => None,
            };
            let me = session.me();
            writeln_raw(stdout, format!("Player {} ({})\n", me.number, me.color))?;
            writeln_raw(stdout, tui::render_board(session.catalog(), selected))?;
            // Note. Don't clear the board to avoid blinking.
            execute!(stdout, terminal::Clear(terminal::ClearType::FromCursorDown))?;
        }
        None => {
            execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
            writeln_raw(stdout, "Waiting for the game to start...")?;
        }
    }

    let label_style =
        if screen.interaction_enabled { style::Color::Green } else { style::Color::Grey };
    writeln_raw(stdout, screen.turn_label.as_str().with(label_style))?;
    let input_style =
        if screen.interaction_enabled { style::Color::White } else { style::Color::DarkGrey };
    writeln_raw(stdout, format!("> {}▂\n", screen.keyboard_input).with(input_style))?;
    if screen.disconnected {
        writeln_raw(stdout, "Disconnected".with(style::Color::Magenta))?;
    }
    if let Some(ref err) = screen.command_error {
        writeln_raw(stdout, err.clone().with(style::Color::Red))?;
    }
    Ok(())
}

// Keyboard input is either "<row> <diagonal>" or a slash command.
fn parse_input(input: &str) -> Result<Option<LocalEvent>, String> {
    match input.strip_prefix('/') {
        Some("skip") => Ok(Some(LocalEvent::VoluntarySkipRequested)),
        Some("quit") => Ok(Some(LocalEvent::CloseRequested)),
        Some(cmd) => Err(format!("Unknown command: '{}'", cmd)),
        None => Ok(None),
    }
}

fn parse_coord(input: &str) -> Result<Coord, String> {
    let Some((row, diagonal)) = input.split_whitespace().collect_tuple() else {
        return Err(format!("Expected '<row> <diagonal>', got '{}'", input));
    };
    match (row.parse(), diagonal.parse()) {
        (Ok(row), Ok(diagonal)) => Ok(Coord::new(row, diagonal)),
        _ => Err(format!("Invalid coordinates: '{}'", input)),
    }
}

fn local_event_from_input(
    client_state: &ClientState, input: &str,
) -> Result<Option<LocalEvent>, String> {
    if let Some(event) = parse_input(input)? {
        return Ok(Some(event));
    }
    let Some(session) = client_state.session() else {
        return Err("Cannot select: game not started".to_owned());
    };
    let coord = parse_coord(input)?;
    let element = BoardElement::at(session.catalog(), coord).map_err(|err| err.to_string())?;
    Ok(Some(LocalEvent::ElementSelected(element)))
}

pub fn run(server_address: String, config: ClientConfig) -> io::Result<()> {
    let server_addr = (server_address.as_str(), config.port).to_socket_addrs()?.collect_vec();
    info!("Connecting to {:?}...", server_addr);
    let stream = TcpStream::connect(&server_addr[..])?;
    let ws_request = Url::parse(&format!("ws://{}:{}", server_address, config.port))
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
    let (mut socket_in, _) = tungstenite::client(ws_request, stream)
        .map_err(|err| io::Error::other(err.to_string()))?;
    let mut socket_out = network::clone_websocket(&socket_in, protocol::Role::Client)?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
    defer! {
        let _ = execute!(io::stdout(), terminal::LeaveAlternateScreen, cursor::Show);
        let _ = terminal::disable_raw_mode();
    };

    let (tx, rx) = mpsc::channel();
    let tx_net = tx.clone();
    let tx_local = tx.clone();
    let tx_tick = tx;
    thread::spawn(move || {
        loop {
            match network::read_text(&mut socket_in) {
                Ok(text) => {
                    if tx_net.send(ConsoleEvent::Session(IncomingEvent::Network(text))).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    match err {
                        CommunicationError::Closed => info!("Server closed the connection"),
                        err => warn!("Connection error: {:?}", err),
                    }
                    let _ = tx_net.send(ConsoleEvent::Session(IncomingEvent::NetworkClosed));
                    return;
                }
            }
        }
    });
    thread::spawn(move || {
        while let Ok(ev) = term_event::read() {
            if tx_local.send(ConsoleEvent::Terminal(ev)).is_err() {
                return;
            }
        }
    });
    let tick_interval = config.tick_interval;
    thread::spawn(move || {
        loop {
            thread::sleep(tick_interval);
            if tx_tick.send(ConsoleEvent::Tick).is_err() {
                return;
            }
        }
    });

    let (server_tx, server_rx) = mpsc::channel::<ClientCommand>();
    thread::spawn(move || {
        for command in server_rx {
            if let Err(err) = network::write_text(&mut socket_out, command.to_wire()) {
                error!("Cannot send {:?}: {:?}", command, err);
                return;
            }
            if command == ClientCommand::Quit {
                let _ = socket_out.close(None);
                let _ = socket_out.flush();
                return;
            }
        }
    });

    let mut client_state = ClientState::new(config.labels.clone(), server_tx);
    let mut screen = ScreenState {
        turn_label: String::new(),
        interaction_enabled: false,
        disconnected: false,
        keyboard_input: String::new(),
        command_error: None,
    };
    for event in rx {
        let reaction = match event {
            ConsoleEvent::Session(event) => client_state.apply_event(event),
            ConsoleEvent::Terminal(term_event::Event::Key(key)) => match key.code {
                term_event::KeyCode::Char(ch) => {
                    screen.keyboard_input.push(ch);
                    EventReaction::Continue
                }
                term_event::KeyCode::Backspace => {
                    screen.keyboard_input.pop();
                    EventReaction::Continue
                }
                term_event::KeyCode::Enter => {
                    let input = std::mem::take(&mut screen.keyboard_input);
                    match local_event_from_input(&client_state, input.trim()) {
                        Ok(Some(event)) => {
                            screen.command_error = None;
                            client_state.apply_event(IncomingEvent::Local(event))
                        }
                        Ok(None) => EventReaction::Continue,
                        Err(err) => {
                            screen.command_error = Some(err);
                            EventReaction::Continue
                        }
                    }
                }
                term_event::KeyCode::Esc => {
                    client_state.apply_event(IncomingEvent::Local(LocalEvent::CloseRequested))
                }
                _ => EventReaction::Continue,
            },
            ConsoleEvent::Terminal(_) => EventReaction::Continue,
            ConsoleEvent::Tick => {
                // Any event triggers repaint, so no additional action is required.
                EventReaction::Continue
            }
        };
        while let Some(notification) = client_state.next_notification() {
            match notification {
                Notification::TurnLabelChanged(label) => screen.turn_label = label,
                Notification::InteractionEnabled(enabled) => screen.interaction_enabled = enabled,
                Notification::Disconnected => screen.disconnected = true,
            }
        }
        render(&mut stdout, &client_state, &screen)?;
        match reaction {
            EventReaction::Continue => {}
            EventReaction::ExitOk => return Ok(()),
            EventReaction::ExitWithError(message) => return Err(io::Error::other(message)),
        }
    }
    Err(io::Error::other("Unexpected end of events stream"))
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn slash_commands() {
        assert_eq!(parse_input("/skip"), Ok(Some(LocalEvent::VoluntarySkipRequested)));
        assert_eq!(parse_input("/quit"), Ok(Some(LocalEvent::CloseRequested)));
        assert!(parse_input("/resign").is_err());
        assert_eq!(parse_input("2 1"), Ok(None));
    }

    #[test]
    fn coordinates() {
        assert_eq!(parse_coord("2 1"), Ok(Coord::new(2, 1)));
        assert_eq!(parse_coord(" 10   3 "), Ok(Coord::new(10, 3)));
        assert!(parse_coord("2").is_err());
        assert!(parse_coord("2 1 3").is_err());
        assert!(parse_coord("a b").is_err());
        assert!(parse_coord("300 1").is_err());
    }
}
