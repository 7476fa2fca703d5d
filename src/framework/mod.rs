//! # Resource Actor Framework
//!
//! Generic building blocks for the actor system that backs the order store
//! and the drone registry.
//!
//! Each aggregate type (Order, Drone) gets one [`ResourceActor`] running in
//! its own Tokio task. The actor owns the store and processes requests
//! **sequentially**, which is what makes the domain guarantees cheap:
//!
//! - All mutations of a given order are linearized through the Order actor,
//!   so no two status transitions can race or lose audit events.
//! - Drone reservation is a compare-and-swap on the drone's status field,
//!   serialized by the Drone actor loop. Two concurrent reservation attempts
//!   are processed one after the other and exactly one wins.
//!
//! ## Key Types
//!
//! - [`ActorEntity`]: the trait an aggregate must implement to be managed.
//! - [`ResourceActor`]: the generic actor that owns the store.
//! - [`ResourceClient`]: the cloneable, type-safe handle for sending requests.
//! - [`ActorError`]: infrastructure failures, wrapping the entity's own error type.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use entity::ActorEntity;
pub use error::ActorError;
pub use message::{ResourceRequest, Response};
pub use mock::MockClient;
