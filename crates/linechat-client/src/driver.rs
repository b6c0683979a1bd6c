//! Blocking session driver.
//!
//! Executes [`SessionAction`]s against the console and the connection and
//! feeds the outcomes back into the [`ChatSession`] until it terminates.
//! Everything here blocks the calling thread; there are no timeouts.

use std::{
    collections::VecDeque,
    io::{BufRead, Write},
};

use bytes::Bytes;
use linechat_proto::limits::MAX_FRAME_BYTES;

use crate::{
    config::SessionConfig,
    connection::{Connection, Stream},
    error::{ClientError, SessionError},
    identity::capture_identity,
    input::read_bounded_line,
    resolver::resolve,
    session::{ChatSession, SessionAction, SessionEvent, Termination},
};

/// Resolve, connect, capture the user's handle and run the chat.
///
/// The connection is closed once on every path, including errors.
///
/// # Errors
///
/// Any [`ClientError`]; each one is fatal for the session.
pub fn run<R: BufRead, W: Write>(
    config: &SessionConfig,
    host: &str,
    port: &str,
    input: &mut R,
    output: &mut W,
) -> Result<Termination, ClientError> {
    let endpoint = resolve(host, port)?;
    let connection = Connection::connect(endpoint)?;

    run_with_connection(config, connection, input, output)
}

/// Capture the user's handle and run the chat over `connection`.
///
/// Consumes and closes the connection.
///
/// # Errors
///
/// Any [`ClientError`]; the connection is closed before it is returned.
pub fn run_with_connection<S: Stream, R: BufRead, W: Write>(
    config: &SessionConfig,
    mut connection: Connection<S>,
    input: &mut R,
    output: &mut W,
) -> Result<Termination, ClientError> {
    let result = match capture_identity(input, output, config.handle_limit()) {
        Ok(Some(handle)) => {
            let session = ChatSession::new(handle, config.clone());
            run_session(session, input, output, &mut connection)
        },
        Ok(None) => {
            let termination = Termination::InputClosed;
            writeln!(output, "{}", termination.notice())
                .map(|()| termination)
                .map_err(ClientError::from)
        },
        Err(e) => Err(e),
    };

    let peer = connection.peer_addr();
    if let Err(e) = connection.close() {
        tracing::warn!(?peer, error = %e, "failed to close connection");
    }

    result
}

/// Drive `session` to termination.
///
/// One receive buffer of [`MAX_FRAME_BYTES`] is allocated up front, zeroed
/// before every read, and released when the loop ends.
///
/// # Errors
///
/// - `ClientError::Send` / `ClientError::Receive` on transport failure
/// - `ClientError::Console` if the console fails
/// - `ClientError::Session` if the session rejects an event
pub fn run_session<S: Stream, R: BufRead, W: Write>(
    mut session: ChatSession,
    input: &mut R,
    output: &mut W,
    connection: &mut Connection<S>,
) -> Result<Termination, ClientError> {
    let mut receive_buf = vec![0u8; MAX_FRAME_BYTES];
    let mut pending: VecDeque<SessionAction> = session.start()?.into();

    while let Some(action) = pending.pop_front() {
        let event = match action {
            SessionAction::Prompt(prompt) => {
                write!(output, "{prompt}")?;
                output.flush()?;
                None
            },
            SessionAction::ReadInput => {
                let line = read_bounded_line(input, session.config().message_limit())?;
                Some(line.map_or(SessionEvent::InputClosed, SessionEvent::Input))
            },
            SessionAction::Send(payload) => {
                let sent = connection.send(&payload)?;
                tracing::debug!(bytes = sent, "message sent");
                Some(SessionEvent::Sent)
            },
            SessionAction::Receive => {
                receive_buf.fill(0);
                let received = connection.receive(&mut receive_buf)?;
                tracing::debug!(bytes = received, "reply received");

                if received == 0 {
                    Some(SessionEvent::PeerClosed)
                } else {
                    Some(SessionEvent::Received(Bytes::copy_from_slice(&receive_buf[..received])))
                }
            },
            SessionAction::Display(text) => {
                writeln!(output, "{text}")?;
                output.flush()?;
                Some(SessionEvent::Displayed)
            },
            SessionAction::Notice(text) => {
                writeln!(output, "{text}")?;
                output.flush()?;
                None
            },
            SessionAction::Terminate(reason) => {
                tracing::info!(
                    ?reason,
                    sent = session.messages_sent(),
                    received = session.replies_received(),
                    "session ended"
                );
                return Ok(reason);
            },
        };

        if let Some(event) = event {
            pending.extend(session.handle(event)?);
        }
    }

    Err(SessionError::Stalled(session.state()).into())
}
