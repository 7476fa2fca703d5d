//! # ActorEntity Trait
//!
//! The contract an aggregate (Order, Drone) must satisfy to be managed by the
//! generic [`ResourceActor`](crate::framework::ResourceActor). The associated
//! types enforce type safety end to end: an order actor cannot be sent a
//! drone payload, and every operation returns the entity's own error type.
//!
//! # Async & Context
//! The trait is `#[async_trait]` so hooks can call other actors (the Order
//! entity drives drone reservation from inside `handle_action`). The
//! `Context` type is injected into every hook when the actor starts, which is
//! how the Order actor receives the drone client and the directory
//! collaborators ("late binding": dependencies go to `run()`, not `new()`).

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum of resource-specific operations (e.g. `Reserve`, `StartDelivery`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Predicate payload for `list` requests (e.g. "orders of customer 7
    /// with status SHIPPED").
    type Filter: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity. One enum per actor: the union of
    /// everything its operations can fail with.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full entity from the ID and payload.
    /// This is called synchronously before `on_create`; structural input
    /// validation belongs here.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Store-wide admission check, evaluated against every existing entity
    /// before a new one is inserted. Return an error to reject the insert.
    ///
    /// The drone registry uses this to enforce unique drone codes at the one
    /// choke point that sees the whole store.
    fn conflicts_with(&self, _existing: &Self) -> Option<Self::Error> {
        None
    }

    /// Whether this entity matches a `list` filter.
    fn matches(&self, _filter: &Self::Filter) -> bool {
        true
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is constructed but before it is stored.
    /// Use this hook for validation and side effects that need the context
    /// (the Order entity verifies the customer and canteen exist and
    /// snapshots line-item prices here). If it fails, nothing is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the store.
    /// Return an error to veto the removal (orders are never deleted; a
    /// reserved or airborne drone cannot be decommissioned).
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action. All domain state machine
    /// logic lives behind this method, so legality checks cannot be bypassed
    /// by callers holding a raw client.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
