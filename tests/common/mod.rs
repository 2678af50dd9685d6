// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use std::sync::mpsc;

use checkers_session::board::BoardCatalog;
use checkers_session::coord::Coord;
use checkers_session::element::BoardElement;
use checkers_session::event::ClientCommand;
use checkers_session::player::PlayerNumber;
use checkers_session::session::{BoardSession, Notification, TurnLabels};
use checkers_session::test_util::sample_welcome;
use itertools::Itertools;


// A session on the sample board, with the receiving end of its transport.
#[allow(dead_code)]
pub fn sample_session(me: PlayerNumber) -> (BoardSession, mpsc::Receiver<ClientCommand>) {
    let (commands_tx, commands_rx) = mpsc::channel();
    let welcome = sample_welcome(me);
    let mut session =
        BoardSession::from_welcome(&welcome, TurnLabels::default(), commands_tx).unwrap();
    drain_notifications(&mut session);
    (session, commands_rx)
}

#[allow(dead_code)]
pub fn drain_notifications(session: &mut BoardSession) -> Vec<Notification> {
    std::iter::from_fn(|| session.next_notification()).collect_vec()
}

#[allow(dead_code)]
pub fn sent(commands_rx: &mpsc::Receiver<ClientCommand>) -> Vec<String> {
    commands_rx.try_iter().map(|command| command.to_wire()).collect_vec()
}

#[allow(dead_code)]
pub fn element_at(catalog: &BoardCatalog, row: u8, diagonal: u8) -> BoardElement {
    BoardElement::at(catalog, Coord::new(row, diagonal)).unwrap()
}

#[allow(dead_code)]
pub fn field_element(catalog: &BoardCatalog, row: u8, diagonal: u8) -> BoardElement {
    BoardElement::Field(catalog.field_at(row, diagonal).unwrap())
}

#[macro_export]
macro_rules! select {
    ($session:ident @ $row:literal, $diagonal:literal) => {{
        let element = common::element_at($session.catalog(), $row, $diagonal);
        $session.select_element(element)
    }};
}
