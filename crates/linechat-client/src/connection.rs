//! The single stream to the chat peer.
//!
//! Sends and receives strictly alternate, driven by the session loop, so the
//! connection needs no locking. One [`Connection::send`] is one message on
//! the wire and one [`Connection::receive`] is taken to be one message back.

use std::{
    io::{self, ErrorKind, Read, Write},
    net::{Shutdown, SocketAddr, TcpStream},
};

use crate::{error::ClientError, resolver::Endpoint};

/// Byte stream a [`Connection`] runs over.
///
/// Implemented for [`TcpStream`]; tests substitute in-memory streams.
pub trait Stream: Read + Write {
    /// Shut down both directions of the stream.
    fn shutdown(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Stream for TcpStream {
    fn shutdown(&mut self) -> io::Result<()> {
        TcpStream::shutdown(self, Shutdown::Both)
    }
}

/// Exclusively owned bidirectional stream to the peer.
///
/// Closed exactly once: [`Connection::close`] consumes the connection, and
/// dropping it on an error path releases the socket as well.
#[derive(Debug)]
pub struct Connection<S = TcpStream> {
    /// Underlying stream
    stream: S,
    /// Peer address, when connected over the network
    peer: Option<SocketAddr>,
}

impl Connection<TcpStream> {
    /// Connect to `endpoint`.
    ///
    /// The endpoint is consumed whether or not the connection succeeds. A
    /// socket that fails to connect is released before the error returns.
    ///
    /// # Errors
    ///
    /// - `ClientError::Connect` if the stream cannot be established
    pub fn connect(endpoint: Endpoint) -> Result<Self, ClientError> {
        let addr = endpoint.into_addr();
        let stream = TcpStream::connect(addr).map_err(|source| ClientError::Connect { addr, source })?;

        tracing::info!(%addr, "connected to peer");

        Ok(Self { stream, peer: Some(addr) })
    }
}

impl<S: Stream> Connection<S> {
    /// Wrap an already established stream.
    pub fn from_stream(stream: S) -> Self {
        Self { stream, peer: None }
    }

    /// Peer address, if known.
    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.peer
    }

    /// Send one framed message.
    ///
    /// Writes the whole buffer and returns its length.
    ///
    /// # Errors
    ///
    /// - `ClientError::Send` on any transport failure
    pub fn send(&mut self, bytes: &[u8]) -> Result<usize, ClientError> {
        self.stream.write_all(bytes).map_err(ClientError::Send)?;
        self.stream.flush().map_err(ClientError::Send)?;

        tracing::trace!(bytes = bytes.len(), "sent");

        Ok(bytes.len())
    }

    /// Receive one message into `buf`, blocking until data arrives.
    ///
    /// Issues a single read. Returns the number of bytes received, where `0`
    /// means the peer shut down its side in an orderly way.
    ///
    /// # Errors
    ///
    /// - `ClientError::Receive` on any transport failure other than an
    ///   interrupted read, which is retried
    pub fn receive(&mut self, buf: &mut [u8]) -> Result<usize, ClientError> {
        loop {
            match self.stream.read(buf) {
                Ok(received) => {
                    tracing::trace!(bytes = received, "received");
                    return Ok(received);
                },
                Err(e) if e.kind() == ErrorKind::Interrupted => {},
                Err(e) => return Err(ClientError::Receive(e)),
            }
        }
    }

    /// Close the connection.
    ///
    /// A peer that already went away is not an error.
    pub fn close(mut self) -> io::Result<()> {
        match self.stream.shutdown() {
            Ok(()) => {
                tracing::debug!(peer = ?self.peer, "connection closed");
                Ok(())
            },
            Err(e) if e.kind() == ErrorKind::NotConnected => Ok(()),
            Err(e) => Err(e),
        }
    }
}
