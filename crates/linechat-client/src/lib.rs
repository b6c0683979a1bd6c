//! Client
//!
//! Single-connection chat client for the line chat protocol. The user picks
//! a handle, then the client and its peer take turns: the user types a line,
//! it is sent as `handle> text`, and the client blocks until the peer's reply
//! arrives and is shown.
//!
//! # Architecture
//!
//! [`ChatSession`] is a pure state machine: it consumes [`SessionEvent`]s and
//! returns [`SessionAction`]s, never touching the console or the socket.
//! [`driver::run_session`] executes those actions with blocking I/O, and
//! [`run`] wires resolution, connection and identity capture around it.
//!
//! # Components
//!
//! - [`resolve`]: Host and port to an IPv4 [`Endpoint`]
//! - [`Connection`]: The single stream to the peer
//! - [`read_bounded_line`]: Length-limited console input with draining
//! - [`capture_identity`]: One-time handle prompt
//! - [`ChatSession`]: Turn-taking state machine
//! - [`SessionConfig`]: Input limits

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod connection;
pub mod driver;
mod error;
mod identity;
mod input;
mod resolver;
mod session;

pub use config::SessionConfig;
pub use connection::{Connection, Stream};
pub use driver::{run, run_session, run_with_connection};
pub use error::{ClientError, SessionError};
pub use identity::{capture_identity, name_prompt};
pub use input::{InputLine, read_bounded_line};
pub use linechat_proto::Handle;
pub use resolver::{Endpoint, resolve};
pub use session::{
    ChatSession, GOODBYE, PEER_CLOSED, SessionAction, SessionEvent, SessionState, Termination,
};
