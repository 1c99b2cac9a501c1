//! TCP front-end of the agent.
//!
//! This module defines the [`Server`] type, which owns the listening socket and the single
//! [`GameSession`]. Connections are served one at a time, in arrival order, inside the accept
//! loop:
//!
//! 1. read one line (blocking, no timeout)
//! 2. decode it as a [`Command`]
//! 3. let the session compute the [`Response`](crate::protocol::Response)
//! 4. write the reply line and close the connection
//!
//! A line that cannot be decoded (empty, not JSON, not an object) closes the connection without
//! writing anything. Failures of one connection are logged and never stop the loop.
//!
//! # Example
//!
//! ```no_run
//! use renju_agent::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let server = Server::bind(Configuration::new(), 5000)?;
//!     server.run()
//! }
//! ```

use std::io::{BufRead, BufReader, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};

use anyhow::Context;
use tracing::{debug, info, instrument, trace, warn};

use crate::configuration::Configuration;
use crate::protocol::Command;
use crate::session::GameSession;
use crate::strategy::{MoveStrategy, TieredStrategy};

/// Listening socket plus the game it serves.
#[derive(Debug)]
pub struct Server<S = TieredStrategy> {
    listener: TcpListener,
    session: GameSession<S>,
    config: Configuration,
}

impl Server<TieredStrategy> {
    /// Binds `config.address:port` with the built-in [`TieredStrategy`].
    ///
    /// Port `0` lets the OS pick one, see [`Server::local_addr`].
    ///
    /// # Errors
    /// When the socket cannot be bound.
    pub fn bind(config: Configuration, port: u16) -> anyhow::Result<Self> {
        Self::bind_with_strategy(config, port, TieredStrategy)
    }
}

impl<S: MoveStrategy> Server<S> {
    /// Binds `config.address:port`, answering moves with `strategy`.
    ///
    /// # Errors
    /// When the socket cannot be bound.
    #[instrument(skip(config, strategy), fields(address = %config.address))]
    pub fn bind_with_strategy(config: Configuration, port: u16, strategy: S) -> anyhow::Result<Self> {
        let addr = SocketAddr::new(config.address, port);
        let listener =
            TcpListener::bind(addr).with_context(|| format!("could not listen on {addr}"))?;
        info!(addr = %listener.local_addr()?, "listening");

        Ok(Server {
            listener,
            session: GameSession::with_strategy(config.team_name.clone(), strategy),
            config,
        })
    }

    /// Address actually bound
    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        self.listener
            .local_addr()
            .context("could not read local address")
    }

    /// The game served by this server
    pub fn session(&self) -> &GameSession<S> {
        &self.session
    }

    /// Serves connections until the process is stopped.
    pub fn run(mut self) -> ! {
        loop {
            self.serve_next();
        }
    }

    /// Waits for the next connection and serves it.
    ///
    /// Errors are logged, never returned: the caller can keep serving.
    pub fn serve_next(&mut self) {
        match self.listener.accept() {
            Ok((stream, peer)) => {
                if let Err(e) = self.handle_connection(stream, peer) {
                    warn!(%peer, "connection dropped: {e:#}");
                }
            }
            Err(e) => warn!("accept failed: {e}"),
        }
    }

    #[instrument(skip(self, stream))]
    fn handle_connection(&mut self, stream: TcpStream, peer: SocketAddr) -> anyhow::Result<()> {
        let mut line = String::new();
        let n = BufReader::new(&stream)
            .read_line(&mut line)
            .context("read error")?;
        if n == 0 {
            debug!("closed by peer before any request");
            return Ok(());
        }
        trace!(request = line.trim_end());

        let command = Command::decode(&line).context("malformed request")?;
        let response = self.session.handle(&command, self.config.move_timeout);
        let reply = response.to_line().context("could not encode reply")?;
        trace!(reply = reply.trim_end());

        (&stream)
            .write_all(reply.as_bytes())
            .context("write error")?;
        // peer may already be gone, the reply is written either way
        let _ = stream.shutdown(Shutdown::Both);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};
    use std::thread;

    use super::*;
    use crate::board::{Stone, CENTER};

    fn local_server() -> Server {
        let config = Configuration::new().with_address(IpAddr::V4(Ipv4Addr::LOCALHOST));
        Server::bind(config, 0).unwrap()
    }

    /// Sends `request` on a fresh connection while the server handles exactly one connection.
    fn exchange(server: &mut Server, request: &'static [u8]) -> Vec<u8> {
        let addr = server.local_addr().unwrap();
        let client = thread::spawn(move || {
            let mut stream = TcpStream::connect(addr).unwrap();
            stream.write_all(request).unwrap();
            stream.shutdown(Shutdown::Write).unwrap();
            let mut reply = vec![];
            std::io::Read::read_to_end(&mut stream, &mut reply).unwrap();
            reply
        });
        server.serve_next();
        client.join().unwrap()
    }

    #[test]
    fn start_then_move() {
        let mut server = local_server();
        let reply = exchange(&mut server, b"{\"command\":\"start\"}\n");
        assert_eq!(reply, b"{\"move\":{\"x\":15,\"y\":15},\"team\":\"TEAM ANGLERS\"}\n");
        assert_eq!(server.session().board().get(CENTER), Stone::Agent);

        let reply = exchange(
            &mut server,
            b"{\"command\":\"move\",\"opponentMove\":{\"x\":15,\"y\":16}}\n",
        );
        assert_eq!(reply, b"{\"move\":{\"x\":16,\"y\":16},\"team\":\"TEAM ANGLERS\"}\n");
    }

    #[test]
    fn malformed_gets_no_reply() {
        let mut server = local_server();
        assert!(exchange(&mut server, b"\n").is_empty());
        assert!(exchange(&mut server, b"{not json\n").is_empty());
        assert!(exchange(&mut server, b"").is_empty());
        assert!(server.session().board().is_board_empty());
    }

    #[test]
    fn request_without_newline() {
        let mut server = local_server();
        let reply = exchange(&mut server, b"{\"command\":\"reset\"}");
        assert_eq!(reply, b"{\"reply\":\"ok\"}\n");
    }
}
