//! # Canteen Dispatch
//!
//! Order lifecycle tracking and drone dispatch coordination for a
//! multi-canteen food ordering platform.
//!
//! ## Core Components
//!
//! - **[framework]**: the generic [`ResourceActor`](framework::ResourceActor)
//!   and [`ActorEntity`](framework::ActorEntity) trait. One actor task per
//!   aggregate type; sequential processing makes the concurrency guarantees.
//! - **[model]**: pure data structures ([`Order`](model::Order),
//!   [`Drone`](model::Drone), the status transition table, the audit trail).
//! - **[order_actor]** / **[drone_actor]**: the two aggregates' behavior.
//!   The order actor is also the dispatch coordinator: its drone-coupled
//!   actions validate order preconditions first, then perform the drone-side
//!   compare-and-swap, and only then mutate the order.
//! - **[clients]**: type-safe wrappers ([`OrderClient`](clients::OrderClient),
//!   [`DroneClient`](clients::DroneClient)) that hide the message passing.
//! - **[directory]**: narrow traits for the surrounding platform (menu
//!   catalog, canteens, users), injected as context.
//! - **[lifecycle]**: orchestration; see
//!   [`DispatchSystem`](lifecycle::DispatchSystem).
//!
//! ## Guarantees
//!
//! - Every status change of an order appends exactly one audit event; the
//!   order's status always equals its latest event.
//! - Status moves follow an explicit transition table; backward moves and
//!   transitions out of terminal states are rejected.
//! - A drone serves at most one order at a time; reservation is won by
//!   exactly one of any set of concurrent claimants.
//! - If the drone-side half of a coupled operation fails, the order is left
//!   unchanged.
//!
//! ## Testing
//!
//! See [`framework::mock`] for scripted clients that inject drone-side
//! failures without spawning a real registry.

pub mod clients;
pub mod directory;
pub mod drone_actor;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
