//! Error types
//!
//! The core does no I/O during a tick, so every error here is a contract
//! violation surfaced at the call that broke it (bad arguments, bad level
//! data, bad configuration).

use std::fmt;

/// Unified error type for simulation setup and body mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PhysicsError {
    /// Both an absolute position and a relative delta were passed to a
    /// position update.
    ConflictingPositionUpdate,
    /// A level grid contains a code with no tile shape.
    UnknownTileCode {
        /// The offending code
        code: u8,
        /// Grid column
        x: usize,
        /// Grid row
        y: usize,
    },
    /// A configuration value is out of range.
    InvalidConfiguration {
        /// Which value and why
        reason: &'static str,
    },
    /// JSON config or level data could not be parsed.
    Parse {
        /// Parser message
        message: String,
    },
    /// Config or level file could not be read.
    Io {
        /// OS error message
        message: String,
    },
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConflictingPositionUpdate => {
                write!(f, "position update given both an absolute coordinate and a delta")
            }
            Self::UnknownTileCode { code, x, y } => {
                write!(f, "unknown tile code {code} at grid ({x}, {y})")
            }
            Self::InvalidConfiguration { reason } => {
                write!(f, "invalid configuration: {reason}")
            }
            Self::Parse { message } => write!(f, "parse error: {message}"),
            Self::Io { message } => write!(f, "I/O error: {message}"),
        }
    }
}

impl std::error::Error for PhysicsError {}

impl From<serde_json::Error> for PhysicsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for PhysicsError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}
