//! Drone registry actor: fleet records, availability, and the
//! compare-and-swap status transitions the dispatch coordinator relies on.
//!
//! The registry is independent of orders; it only knows which order holds a
//! reservation, never why.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::DroneClient;
use crate::framework::ResourceActor;
use crate::model::Drone;

/// Creates a new Drone actor and its client.
pub fn new() -> (ResourceActor<Drone>, DroneClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    let client = DroneClient::new(generic_client);
    (actor, client)
}
