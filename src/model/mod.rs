//! Pure data structures for the dispatch domain.
//!
//! Everything here is plain state plus invariant helpers; asynchronous
//! behavior (hooks, actions, cross-actor calls) lives in the actor modules.

pub mod drone;
pub mod event;
pub mod order;

pub use drone::*;
pub use event::*;
pub use order::*;
