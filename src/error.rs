// ABOUTME: Error types for the simulated SMSC sessions, listeners and process startup
// ABOUTME: Structured thiserror enums with automatic conversion from I/O and codec errors

use crate::codec::CodecError;
use std::io;
use std::net::SocketAddr;
use thiserror::Error;

/// Reasons a session's read loop ends early.
///
/// Neither variant is reported to the peer; the session just closes its
/// socket and releases its registry entry.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Transport failure while reading or writing (peer reset, broken pipe)
    #[error("Connection error: {0}")]
    Connection(#[from] io::Error),

    /// Framing error on the inbound stream
    #[error("Protocol error: {0}")]
    Codec(#[from] CodecError),
}

/// Errors raised while starting or running the simulator process.
#[derive(Debug, Error)]
pub enum SimulatorError {
    /// An operator's listen socket could not be bound
    #[error("{operator}: cannot listen on {addr}: {source}")]
    Bind {
        operator: String,
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// A selected operator key is not in the registry
    #[error("Unknown operator '{0}' (known: {1})")]
    UnknownOperator(String, String),

    /// Selection resolved to nothing
    #[error("No operators selected")]
    NoOperators,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for simulator operations
pub type SimResult<T> = Result<T, SimulatorError>;
