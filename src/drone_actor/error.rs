//! Error types for the drone registry.

use crate::framework::ActorError;
use thiserror::Error;

/// Errors that can occur during drone registry operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DroneError {
    /// The requested drone does not exist.
    #[error("drone not found: {0}")]
    NotFound(String),

    /// Structurally invalid input (blank code, battery over 100%, ...).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The operation is not permitted given the drone's current status.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A compare-and-swap on the drone's status failed: another request won
    /// the race between read and write.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The registry itself is unreachable; the request may be retried.
    #[error("drone registry unavailable: {0}")]
    Unavailable(String),
}

impl From<ActorError<DroneError>> for DroneError {
    fn from(e: ActorError<DroneError>) -> Self {
        match e {
            ActorError::Entity(inner) => inner,
            ActorError::NotFound(id) => DroneError::NotFound(id),
            other => DroneError::Unavailable(other.to_string()),
        }
    }
}
