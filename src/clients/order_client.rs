//! Client for the order actor: the coordinator's public surface.

use crate::clients::actor_client::ActorClient;
use crate::framework::ResourceClient;
use crate::model::{
    DeliveryMethod, DroneId, Order, OrderCreate, OrderFilter, OrderId, OrderStatus,
    OrderStatusEvent,
};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};

/// Cloneable handle for placing orders and driving them through fulfillment.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl ActorClient<Order> for OrderClient {
    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn not_found(id: &OrderId) -> OrderError {
        OrderError::NotFound(id.to_string())
    }
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Places a new order. Collaborator lookups, price snapshotting and the
    /// initial PENDING timeline event all happen inside the actor before the
    /// order becomes visible.
    pub async fn create_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        self.inner.create(params).await.map_err(OrderError::from)
    }

    pub async fn get(&self, id: OrderId) -> Result<Order, OrderError> {
        self.fetch(id).await
    }

    /// Lists matching orders, newest first.
    pub async fn list(&self, filter: OrderFilter) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.inner.list(filter).await.map_err(OrderError::from)?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// Returns the order's full status history, oldest first.
    pub async fn timeline(&self, id: OrderId) -> Result<Vec<OrderStatusEvent>, OrderError> {
        Ok(self.fetch(id).await?.timeline.events().to_vec())
    }

    pub async fn apply_transition(
        &self,
        id: OrderId,
        target: OrderStatus,
        note: Option<String>,
    ) -> Result<OrderStatus, OrderError> {
        match self
            .act(id, OrderAction::ApplyTransition { target, note })
            .await?
        {
            OrderActionResult::Transitioned(status) => Ok(status),
            other => Err(OrderError::Unavailable(format!(
                "unexpected action result: {other:?}"
            ))),
        }
    }

    pub async fn cancel(&self, id: OrderId, reason: Option<String>) -> Result<(), OrderError> {
        match self.act(id, OrderAction::Cancel { reason }).await? {
            OrderActionResult::Canceled => Ok(()),
            other => Err(OrderError::Unavailable(format!(
                "unexpected action result: {other:?}"
            ))),
        }
    }

    pub async fn change_delivery_method(
        &self,
        id: OrderId,
        method: DeliveryMethod,
    ) -> Result<(), OrderError> {
        match self
            .act(id, OrderAction::ChangeDeliveryMethod(method))
            .await?
        {
            OrderActionResult::DeliveryMethodChanged(_) => Ok(()),
            other => Err(OrderError::Unavailable(format!(
                "unexpected action result: {other:?}"
            ))),
        }
    }

    /// Reserves `drone_id` for the order. Exactly one of several concurrent
    /// callers wins; the rest get `Conflict`.
    pub async fn assign_drone(&self, id: OrderId, drone_id: DroneId) -> Result<(), OrderError> {
        match self.act(id, OrderAction::AssignDrone(drone_id)).await? {
            OrderActionResult::DroneAssigned(_) => Ok(()),
            other => Err(OrderError::Unavailable(format!(
                "unexpected action result: {other:?}"
            ))),
        }
    }

    /// Launches the assigned drone and marks the order SHIPPED. Returns the
    /// drone now flying the order.
    pub async fn start_delivery(&self, id: OrderId) -> Result<DroneId, OrderError> {
        match self.act(id, OrderAction::StartDelivery).await? {
            OrderActionResult::DeliveryStarted { drone_id } => Ok(drone_id),
            other => Err(OrderError::Unavailable(format!(
                "unexpected action result: {other:?}"
            ))),
        }
    }

    /// Completes the handoff: the order becomes DELIVERED and the drone goes
    /// back to the idle pool.
    pub async fn mark_delivered(&self, id: OrderId) -> Result<(), OrderError> {
        match self.act(id, OrderAction::MarkDelivered).await? {
            OrderActionResult::Delivered => Ok(()),
            other => Err(OrderError::Unavailable(format!(
                "unexpected action result: {other:?}"
            ))),
        }
    }
}
