//! Client for the drone registry actor.

use crate::clients::actor_client::ActorClient;
use crate::drone_actor::{DroneAction, DroneActionResult, DroneError};
use crate::framework::ResourceClient;
use crate::model::{Drone, DroneCreate, DroneFilter, DroneId, DroneStatus, DroneUpdate, OrderId};

/// Cloneable handle for fleet management and the dispatch-side
/// compare-and-swap operations.
#[derive(Clone)]
pub struct DroneClient {
    inner: ResourceClient<Drone>,
}

impl ActorClient<Drone> for DroneClient {
    fn inner(&self) -> &ResourceClient<Drone> {
        &self.inner
    }

    fn not_found(id: &DroneId) -> DroneError {
        DroneError::NotFound(id.to_string())
    }
}

impl DroneClient {
    pub fn new(inner: ResourceClient<Drone>) -> Self {
        Self { inner }
    }

    /// Adds a drone to the fleet. Codes must be unique across the registry.
    pub async fn register(&self, params: DroneCreate) -> Result<DroneId, DroneError> {
        self.inner.create(params).await.map_err(DroneError::from)
    }

    pub async fn get(&self, id: DroneId) -> Result<Drone, DroneError> {
        self.fetch(id).await
    }

    pub async fn list(&self, filter: DroneFilter) -> Result<Vec<Drone>, DroneError> {
        self.inner.list(filter).await.map_err(DroneError::from)
    }

    /// Lists the drones currently free to take a reservation.
    pub async fn available(&self) -> Result<Vec<Drone>, DroneError> {
        self.list(DroneFilter {
            status: Some(DroneStatus::Idle),
        })
        .await
    }

    pub async fn update(&self, id: DroneId, update: DroneUpdate) -> Result<Drone, DroneError> {
        self.inner
            .update(id, update)
            .await
            .map_err(DroneError::from)
    }

    /// Removes a drone from the fleet. Refused while it serves an order.
    pub async fn decommission(&self, id: DroneId) -> Result<(), DroneError> {
        self.inner.delete(id).await.map_err(DroneError::from)
    }

    /// Claims `id` for `order_id`; fails with `Conflict` unless the drone is
    /// idle at the moment the actor processes the request.
    pub async fn reserve(&self, id: DroneId, order_id: OrderId) -> Result<(), DroneError> {
        match self.act(id, DroneAction::Reserve { order_id }).await? {
            DroneActionResult::Reserved => Ok(()),
            other => Err(DroneError::Unavailable(format!(
                "unexpected action result: {other:?}"
            ))),
        }
    }

    pub async fn launch(&self, id: DroneId, order_id: OrderId) -> Result<(), DroneError> {
        match self.act(id, DroneAction::Launch { order_id }).await? {
            DroneActionResult::Launched => Ok(()),
            other => Err(DroneError::Unavailable(format!(
                "unexpected action result: {other:?}"
            ))),
        }
    }

    pub async fn release(&self, id: DroneId, order_id: OrderId) -> Result<(), DroneError> {
        match self.act(id, DroneAction::Release { order_id }).await? {
            DroneActionResult::Released => Ok(()),
            other => Err(DroneError::Unavailable(format!(
                "unexpected action result: {other:?}"
            ))),
        }
    }

    /// Fleet maintenance status change (in or out of service).
    pub async fn set_status(&self, id: DroneId, status: DroneStatus) -> Result<(), DroneError> {
        match self.act(id, DroneAction::SetStatus(status)).await? {
            DroneActionResult::StatusSet(_) => Ok(()),
            other => Err(DroneError::Unavailable(format!(
                "unexpected action result: {other:?}"
            ))),
        }
    }

    pub async fn update_telemetry(
        &self,
        id: DroneId,
        battery_percent: Option<u8>,
        location: Option<String>,
    ) -> Result<(), DroneError> {
        match self
            .act(
                id,
                DroneAction::UpdateTelemetry {
                    battery_percent,
                    location,
                },
            )
            .await?
        {
            DroneActionResult::TelemetryUpdated => Ok(()),
            other => Err(DroneError::Unavailable(format!(
                "unexpected action result: {other:?}"
            ))),
        }
    }
}
