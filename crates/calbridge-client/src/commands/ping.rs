//! Ping command.

use std::path::PathBuf;

use crate::error::{ClientError, ClientResult};
use crate::socket::SocketClient;

use super::REQUEST_TIMEOUT;

/// Prints `pong` if the module on `socket` answers.
pub async fn run(socket: PathBuf) -> ClientResult<()> {
    let client = SocketClient::new(socket, REQUEST_TIMEOUT);
    if client.ping().await? {
        println!("pong");
        Ok(())
    } else {
        Err(ClientError::Connection(format!(
            "no module answering on {}",
            client.socket_path().display()
        )))
    }
}
