//! Test harness for the line chat client.
//!
//! Stand-ins for the paired server so the client can be exercised end to
//! end without one:
//!
//! - [`ScriptedPeer`]: A real TCP listener on loopback that accepts one
//!   connection and plays a fixed script of receives and replies.
//! - [`MemoryStream`]: An in-memory [`linechat_client::Stream`] with scripted
//!   reads, recorded writes and injectable failures.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod memory_stream;
pub mod scripted_peer;

pub use memory_stream::{MemoryStream, ReadStep, StreamLog};
pub use scripted_peer::{PeerStep, PeerTranscript, ScriptedPeer};
