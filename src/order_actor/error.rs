//! Error types for the order lifecycle engine and dispatch coordinator.

use crate::framework::ActorError;
use crate::model::OrderStatus;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order does not exist.
    #[error("order not found: {0}")]
    NotFound(String),

    /// Structurally invalid input (empty item list, zero quantity, ...).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The operation is not permitted given the order's current state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The requested status move is not an edge of the transition table.
    #[error("illegal transition from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Another request won a race this one depended on.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The drone-side half of a coupled operation failed; the order was left
    /// unchanged.
    #[error("dispatch failure: {0}")]
    DispatchFailure(String),

    /// The order store itself is unreachable; the request may be retried.
    #[error("order store unavailable: {0}")]
    Unavailable(String),
}

impl From<ActorError<OrderError>> for OrderError {
    fn from(e: ActorError<OrderError>) -> Self {
        match e {
            ActorError::Entity(inner) => inner,
            ActorError::NotFound(id) => OrderError::NotFound(id),
            other => OrderError::Unavailable(other.to_string()),
        }
    }
}
