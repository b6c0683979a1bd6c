//! Turn-taking chat session.
//!
//! The session alternates strictly between the user and the peer. It is a
//! pure state machine: [`ChatSession::handle`] takes an event and returns the
//! actions for the driver to execute, so the whole loop is testable without
//! a console or a socket.
//!
//! # State Machine
//!
//! ```text
//!                    line          Sent           reply
//! ┌───────────────┐ ──────> ┌─────────┐ ──────> ┌───────────────┐ ──────> ┌────────────┐
//! │ PromptingUser │         │ Sending │         │ AwaitingReply │         │ Displaying │
//! └───────────────┘ <────────────────────────────────────────────────────── └────────────┘
//!         │                                 Displayed        │
//!         │ \quit / input closed                             │ peer closed
//!         ↓                                                  ↓
//!   ┌────────────┐                                    ┌────────────┐
//!   │ Terminated │                                    │ Terminated │
//!   └────────────┘                                    └────────────┘
//! ```

use bytes::Bytes;
use linechat_proto::{ChatFrame, Handle, QUIT_COMMAND, encode_message};

use crate::{config::SessionConfig, error::SessionError, input::InputLine};

/// Notice printed when the user leaves.
pub const GOODBYE: &str = "Goodbye!";

/// Notice printed when the peer closes the connection.
pub const PEER_CLOSED: &str = "The connection was terminated by the server.";

/// Why a session ended.
///
/// Every termination is a normal end: the process exits with status 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// User entered the quit command
    UserQuit,
    /// Console input ended
    InputClosed,
    /// Peer shut down the connection
    PeerClosed,
}

impl Termination {
    /// Notice shown to the user for this termination.
    pub fn notice(self) -> &'static str {
        match self {
            Self::UserQuit | Self::InputClosed => GOODBYE,
            Self::PeerClosed => PEER_CLOSED,
        }
    }
}

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the user to type a line
    PromptingUser,
    /// Framed message handed to the driver for sending
    Sending,
    /// Waiting for the peer's reply
    AwaitingReply,
    /// Reply handed to the driver for display
    Displaying,
    /// Session over
    Terminated(Termination),
}

/// Events the driver feeds into the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// User entered a line.
    Input(InputLine),
    /// Console input ended.
    InputClosed,
    /// Framed message was sent.
    Sent,
    /// Peer replied with these bytes.
    ///
    /// An empty payload is treated as [`SessionEvent::PeerClosed`].
    Received(Bytes),
    /// Peer shut down the connection (zero-length receive).
    PeerClosed,
    /// Reply was shown to the user.
    Displayed,
}

impl SessionEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::Input(_) => "accept input",
            Self::InputClosed => "close input",
            Self::Sent => "complete send",
            Self::Received(_) => "accept reply",
            Self::PeerClosed => "handle peer shutdown",
            Self::Displayed => "complete display",
        }
    }
}

/// Actions the session produces for the driver to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Print this prompt without a trailing newline.
    Prompt(String),
    /// Read one bounded line from the console and report it.
    ReadInput,
    /// Send this framed payload and report [`SessionEvent::Sent`].
    Send(Bytes),
    /// Clear the receive buffer, block for a reply and report it.
    Receive,
    /// Print this reply on its own line and report
    /// [`SessionEvent::Displayed`].
    Display(String),
    /// Print this notice on its own line.
    Notice(String),
    /// Stop the loop; the caller closes the connection.
    Terminate(Termination),
}

/// Turn-taking session state machine.
///
/// Owns the user's handle for the lifetime of the session. Holds no I/O
/// resources.
#[derive(Debug, Clone)]
pub struct ChatSession {
    /// Current state
    state: SessionState,
    /// User's handle, fixed at construction
    handle: Handle,
    /// Input limits
    config: SessionConfig,
    /// Messages sent so far
    sent: u64,
    /// Replies received so far
    received: u64,
}

impl ChatSession {
    /// Create a session in [`SessionState::PromptingUser`].
    pub fn new(handle: Handle, config: SessionConfig) -> Self {
        Self { state: SessionState::PromptingUser, handle, config, sent: 0, received: 0 }
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Input limits.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Number of messages sent.
    pub fn messages_sent(&self) -> u64 {
        self.sent
    }

    /// Number of replies received.
    pub fn replies_received(&self) -> u64 {
        self.received
    }

    /// Actions that open the first turn.
    ///
    /// # Errors
    ///
    /// - `SessionError::InvalidState` unless the session is waiting for the
    ///   user
    pub fn start(&self) -> Result<Vec<SessionAction>, SessionError> {
        match self.state {
            SessionState::PromptingUser => Ok(self.prompt()),
            state => Err(SessionError::InvalidState { state, operation: "start" }),
        }
    }

    /// Process an event and return actions.
    ///
    /// # Errors
    ///
    /// - `SessionError::InvalidState` if the event does not fit the current
    ///   state; the state is left unchanged
    /// - `SessionError::Protocol` if the user's line cannot be framed
    pub fn handle(&mut self, event: SessionEvent) -> Result<Vec<SessionAction>, SessionError> {
        match (self.state, event) {
            (SessionState::PromptingUser, SessionEvent::Input(line)) => {
                if line.text == QUIT_COMMAND {
                    return Ok(self.terminate(Termination::UserQuit));
                }

                if line.truncated {
                    tracing::info!(limit = self.config.message_limit(), "message truncated");
                }

                let payload = encode_message(&self.handle, &line.text)?;
                self.state = SessionState::Sending;
                Ok(vec![SessionAction::Send(payload)])
            },
            (SessionState::PromptingUser, SessionEvent::InputClosed) => {
                Ok(self.terminate(Termination::InputClosed))
            },
            (SessionState::Sending, SessionEvent::Sent) => {
                self.sent += 1;
                self.state = SessionState::AwaitingReply;
                Ok(vec![SessionAction::Receive])
            },
            (SessionState::AwaitingReply, SessionEvent::Received(payload)) if payload.is_empty() => {
                Ok(self.terminate(Termination::PeerClosed))
            },
            (SessionState::AwaitingReply, SessionEvent::Received(payload)) => {
                let frame = ChatFrame::decode(&payload)?;
                self.received += 1;
                self.state = SessionState::Displaying;
                Ok(vec![SessionAction::Display(frame.to_string())])
            },
            (SessionState::AwaitingReply, SessionEvent::PeerClosed) => {
                Ok(self.terminate(Termination::PeerClosed))
            },
            (SessionState::Displaying, SessionEvent::Displayed) => {
                self.state = SessionState::PromptingUser;
                Ok(self.prompt())
            },
            (state, event) => Err(SessionError::InvalidState { state, operation: event.name() }),
        }
    }

    fn prompt(&self) -> Vec<SessionAction> {
        vec![SessionAction::Prompt(format!("{}> ", self.handle)), SessionAction::ReadInput]
    }

    fn terminate(&mut self, reason: Termination) -> Vec<SessionAction> {
        tracing::debug!(?reason, sent = self.sent, received = self.received, "session terminated");
        self.state = SessionState::Terminated(reason);
        vec![SessionAction::Notice(reason.notice().to_string()), SessionAction::Terminate(reason)]
    }
}
