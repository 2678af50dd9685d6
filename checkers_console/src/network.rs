use std::io;
use std::net::TcpStream;

use tungstenite::protocol::Role;
use tungstenite::{Message, WebSocket};


pub const DEFAULT_PORT: u16 = 38617;


#[derive(Debug)]
pub enum CommunicationError {
    Socket(tungstenite::Error),
    // The peer closed the connection.
    Closed,
    Protocol(String),
}

pub fn write_text<S>(socket: &mut WebSocket<S>, text: String) -> Result<(), CommunicationError>
where
    S: io::Read + io::Write,
{
    socket.send(Message::text(text)).map_err(CommunicationError::Socket)
}

// Returns the next text message, skipping control frames.
pub fn read_text<S>(socket: &mut WebSocket<S>) -> Result<String, CommunicationError>
where
    S: io::Read + io::Write,
{
    loop {
        match socket.read() {
            Ok(Message::Text(text)) => return Ok(text.to_string()),
            Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_)) => {}
            Ok(Message::Close(_)) => return Err(CommunicationError::Closed),
            Ok(Message::Binary(_)) => {
                return Err(CommunicationError::Protocol("Expected text, got binary".to_owned()));
            }
            Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => {
                return Err(CommunicationError::Closed);
            }
            Err(err) => return Err(CommunicationError::Socket(err)),
        }
    }
}

// Improvement potential: Instead of cloning the socket, consider calling
//   TcpStream.set_nonblocking on the underlying stream and doing read/writes in the same thread.
pub fn clone_websocket(
    socket: &WebSocket<TcpStream>, role: Role,
) -> io::Result<WebSocket<TcpStream>> {
    let stream = socket.get_ref().try_clone()?;
    let config = *socket.get_config();
    Ok(WebSocket::from_raw_socket(stream, role, Some(config)))
}
