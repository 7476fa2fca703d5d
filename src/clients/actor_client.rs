//! Shared plumbing for the domain clients.

use crate::framework::{ActorEntity, ActorError, ResourceClient};
use async_trait::async_trait;

/// Common shape of a domain client wrapping a [`ResourceClient`].
///
/// Implementors provide the raw channel handle and a way to say "this id
/// does not exist" in their own error vocabulary; the blanket methods handle
/// the infrastructure-to-domain error translation and turn `Ok(None)`
/// lookups into that not-found error.
#[async_trait]
pub trait ActorClient<T>
where
    T: ActorEntity,
    T::Error: From<ActorError<T::Error>>,
{
    fn inner(&self) -> &ResourceClient<T>;

    fn not_found(id: &T::Id) -> T::Error;

    async fn fetch(&self, id: T::Id) -> Result<T, T::Error> {
        match self.inner().get(id.clone()).await {
            Ok(Some(entity)) => Ok(entity),
            Ok(None) => Err(Self::not_found(&id)),
            Err(e) => Err(T::Error::from(e)),
        }
    }

    async fn act(&self, id: T::Id, action: T::Action) -> Result<T::ActionResult, T::Error> {
        self.inner()
            .perform_action(id, action)
            .await
            .map_err(T::Error::from)
    }
}
