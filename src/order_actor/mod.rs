//! Order actor: the lifecycle state machine and the dispatch coordinator.
//!
//! One actor task owns every order, so all transitions on a given order are
//! linearized. The drone-coupled operations talk to the drone registry
//! through the [`DroneClient`](crate::clients::DroneClient) carried in
//! [`OrderContext`].

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::OrderContext;
pub use error::*;

use crate::clients::OrderClient;
use crate::framework::ResourceActor;
use crate::model::Order;

/// Creates a new Order actor and its client.
pub fn new() -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    let client = OrderClient::new(generic_client);
    (actor, client)
}
