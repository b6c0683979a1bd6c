//! Error types for the chat client.
//!
//! [`ClientError`] covers everything that ends a session abnormally:
//! resolution, connection, transport and console failures. None of them are
//! retried; the caller reports the error and exits. An orderly peer shutdown
//! is not an error and is reported as a [`crate::Termination`] instead.
//!
//! [`SessionError`] is raised by the pure session state machine and only
//! indicates a driver bug or an unencodable message.

use std::{io, net::SocketAddr};

use linechat_proto::ProtocolError;
use thiserror::Error;

use crate::session::SessionState;

/// Errors that end a chat session abnormally.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Host and port could not be turned into an IPv4 stream endpoint.
    #[error("could not resolve {host}:{port}: {reason}")]
    Resolution {
        /// Host as given by the user
        host: String,
        /// Port as given by the user
        port: String,
        /// Resolver diagnostic
        reason: String,
    },

    /// Stream to the resolved endpoint could not be established.
    #[error("connecting to {addr} failed: {source}")]
    Connect {
        /// Endpoint address
        addr: SocketAddr,
        /// Underlying OS error
        #[source]
        source: io::Error,
    },

    /// Transport failure while sending a message.
    #[error("error sending data: {0}")]
    Send(#[source] io::Error),

    /// Transport failure while waiting for a reply.
    #[error("error receiving data: {0}")]
    Receive(#[source] io::Error),

    /// Console read or write failed.
    #[error("console I/O error: {0}")]
    Console(#[from] io::Error),

    /// Session state machine rejected an event.
    #[error("session error: {0}")]
    Session(#[from] SessionError),
}

impl ClientError {
    /// Process exit status for this error.
    ///
    /// Every abnormal end is fatal and shares one non-zero status.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

/// Errors raised by the session state machine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Event does not fit the current state.
    #[error("invalid state transition: cannot {operation} from {state:?}")]
    InvalidState {
        /// Current state when the event arrived
        state: SessionState,
        /// Event that was rejected
        operation: &'static str,
    },

    /// Session produced no further actions before terminating.
    #[error("session stalled in {0:?}")]
    Stalled(SessionState),

    /// Message could not be framed.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}
