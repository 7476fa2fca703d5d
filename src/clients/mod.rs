//! Domain-facing clients over the generic actor channel.
//!
//! Callers never see `ActorError` or raw action enums; each client narrows
//! the generic CRUD-plus-actions surface to the operations its aggregate
//! actually supports and returns the aggregate's own error type.

pub mod actor_client;
pub mod drone_client;
pub mod order_client;

pub use actor_client::ActorClient;
pub use drone_client::DroneClient;
pub use order_client::OrderClient;
