//! Address resolution.
//!
//! The paired server listens on an IPv4 stream socket, so the system
//! resolver is asked for IPv4 stream addresses only. The first one it
//! returns is used; there is no ranking and no fallback to later candidates.

use std::{
    fmt, io,
    net::{SocketAddr, SocketAddrV4},
};

use dns_lookup::{AddrFamily, AddrInfoHints, SockType, getaddrinfo};

use crate::error::ClientError;

/// A resolved, connectable IPv4 address.
///
/// Not `Clone`: an endpoint is consumed by exactly one
/// [`crate::Connection::connect`].
#[derive(Debug, PartialEq, Eq)]
pub struct Endpoint {
    addr: SocketAddrV4,
}

impl Endpoint {
    /// Wrap an already known address.
    pub fn new(addr: SocketAddrV4) -> Self {
        Self { addr }
    }

    /// Consume the endpoint, yielding its socket address.
    pub fn into_addr(self) -> SocketAddr {
        SocketAddr::V4(self.addr)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.addr, f)
    }
}

/// Resolve `host` and `port` to an IPv4 endpoint.
///
/// `port` is either a decimal port number or a service name such as `ssh`.
///
/// # Errors
///
/// - `ClientError::Resolution` if the port is out of range, the host or
///   service cannot be resolved, or the host has no IPv4 address
pub fn resolve(host: &str, port: &str) -> Result<Endpoint, ClientError> {
    let resolution_error = |reason: String| ClientError::Resolution {
        host: host.to_string(),
        port: port.to_string(),
        reason,
    };

    if port.bytes().all(|b| b.is_ascii_digit()) {
        port.parse::<u16>().map_err(|e| resolution_error(format!("invalid port: {e}")))?;
    }

    let hints = AddrInfoHints {
        address: AddrFamily::Inet.into(),
        socktype: SockType::Stream.into(),
        ..AddrInfoHints::default()
    };

    let mut candidates = getaddrinfo(Some(host), Some(port), Some(hints))
        .map_err(|e| resolution_error(io::Error::from(e).to_string()))?;

    let addr = candidates
        .find_map(|candidate| match candidate.map(|info| info.sockaddr) {
            Ok(SocketAddr::V4(v4)) => Some(v4),
            Ok(SocketAddr::V6(_)) | Err(_) => None,
        })
        .ok_or_else(|| resolution_error("no IPv4 address".to_string()))?;

    tracing::debug!(%host, %addr, "resolved endpoint");

    Ok(Endpoint::new(addr))
}
