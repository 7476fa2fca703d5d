//! # Framework Errors
//!
//! Infrastructure failures are kept separate from entity failures so callers
//! can always distinguish "your request was rejected" (entity error, map to a
//! 4xx-equivalent) from "the system is having trouble" (closed channels,
//! which typed clients surface as an `Unavailable` kind).

/// Errors produced by the actor plumbing, generic over the entity's own
/// error type `E`.
#[derive(Debug, thiserror::Error)]
pub enum ActorError<E> {
    /// The actor's request channel is closed (actor shut down or panicked).
    #[error("actor closed")]
    Closed,
    /// The actor dropped the response channel without answering.
    #[error("actor dropped response channel")]
    Dropped,
    /// No entity with the requested ID exists in the store.
    #[error("not found: {0}")]
    NotFound(String),
    /// The entity itself rejected the operation.
    #[error("{0}")]
    Entity(E),
}
