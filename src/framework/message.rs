//! # Generic Messages
//!
//! Message types exchanged between [`ResourceClient`](crate::framework::ResourceClient)
//! and [`ResourceActor`](crate::framework::ResourceActor).
//!
//! The variants map to standard resource lifecycle operations (Create, Get,
//! List, Update, Delete) plus an `Action` variant for domain-specific
//! operations that do not fit the CRUD mold: status transitions, drone
//! reservation, dispatch. The associated types of [`ActorEntity`] keep every
//! payload type-checked per entity.

use crate::framework::entity::ActorEntity;
use crate::framework::error::ActorError;
use tokio::sync::oneshot;

/// One-shot response channel carrying either a value or an actor error
/// wrapping the entity's error type.
pub type Response<T, E> = oneshot::Sender<Result<T, ActorError<E>>>;

/// Internal request type sent to a resource actor.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    List {
        filter: T::Filter,
        respond_to: Response<Vec<T>, T::Error>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T, T::Error>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<(), T::Error>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
}
