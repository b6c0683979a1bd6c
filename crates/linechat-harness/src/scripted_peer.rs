//! Single-connection scripted TCP peer.
//!
//! Speaks the same convention as the paired server: one message per read,
//! one reply per write, strictly alternating with the client.

use std::{
    io::{self, Read, Write},
    net::{Shutdown, SocketAddr, TcpListener},
    thread::{self, JoinHandle},
};

use linechat_proto::limits::MAX_FRAME_BYTES;

/// One step of a peer script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerStep {
    /// Read one message from the client and record it.
    ///
    /// Ends the script if the client has shut down.
    Receive,
    /// Write these bytes as one message.
    Send(Vec<u8>),
    /// Shut down the connection and end the script.
    Close,
}

impl PeerStep {
    /// Reply with `handle> text`.
    pub fn reply(handle: &str, text: &str) -> Self {
        Self::Send(format!("{handle}> {text}").into_bytes())
    }
}

/// What the peer observed while playing its script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeerTranscript {
    /// Messages received from the client, in order
    pub received: Vec<Vec<u8>>,
    /// Whether the client shut the connection down during a receive
    pub saw_shutdown: bool,
}

impl PeerTranscript {
    /// Received messages decoded as UTF-8, lossily.
    pub fn received_text(&self) -> Vec<String> {
        self.received.iter().map(|m| String::from_utf8_lossy(m).into_owned()).collect()
    }
}

/// TCP peer bound to an ephemeral loopback port.
///
/// The script runs on its own thread as soon as the peer is spawned. The
/// listener accepts exactly one connection.
#[derive(Debug)]
pub struct ScriptedPeer {
    /// Address the listener is bound to
    addr: SocketAddr,
    /// Script thread
    handle: JoinHandle<io::Result<PeerTranscript>>,
}

impl ScriptedPeer {
    /// Bind to `127.0.0.1:0` and start playing `script`.
    pub fn spawn(script: Vec<PeerStep>) -> io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;

        let handle = thread::Builder::new()
            .name("scripted-peer".to_string())
            .spawn(move || play(&listener, script))?;

        Ok(Self { addr, handle })
    }

    /// Listener host, as a client would pass it.
    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    /// Listener port, as a client would pass it.
    pub fn port(&self) -> String {
        self.addr.port().to_string()
    }

    /// Wait for the script to finish and return the transcript.
    pub fn join(self) -> io::Result<PeerTranscript> {
        self.handle.join().map_err(|_| io::Error::other("scripted peer panicked"))?
    }
}

fn play(listener: &TcpListener, script: Vec<PeerStep>) -> io::Result<PeerTranscript> {
    let (mut stream, client) = listener.accept()?;
    tracing::debug!(%client, steps = script.len(), "scripted peer accepted client");

    let mut transcript = PeerTranscript::default();
    let mut buf = vec![0u8; MAX_FRAME_BYTES];

    for step in script {
        match step {
            PeerStep::Receive => {
                let received = stream.read(&mut buf)?;
                if received == 0 {
                    transcript.saw_shutdown = true;
                    break;
                }
                transcript.received.push(buf[..received].to_vec());
            },
            PeerStep::Send(bytes) => stream.write_all(&bytes)?,
            PeerStep::Close => {
                stream.shutdown(Shutdown::Both)?;
                break;
            },
        }
    }

    Ok(transcript)
}
