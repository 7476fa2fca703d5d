//! Action messages understood by the order actor.

use crate::model::{DeliveryMethod, DroneId, OrderStatus};

/// Domain operations on a single order, processed one at a time by its actor.
///
/// Plain status moves go through [`OrderAction::ApplyTransition`]; the
/// drone-coupled moves (`AssignDrone`, `StartDelivery`, `MarkDelivered`) and
/// cancellation have dedicated variants because they touch the drone registry
/// as well as the order.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Move the order to `target` along the transition table.
    ///
    /// For drone orders the `Shipped` and `Delivered` targets are reserved
    /// for `StartDelivery` and `MarkDelivered`; `Canceled` always goes
    /// through `Cancel`.
    ApplyTransition {
        target: OrderStatus,
        note: Option<String>,
    },
    /// Cancel the order, releasing any reserved drone first.
    Cancel { reason: Option<String> },
    /// Switch between drone and manual delivery while still on the ground.
    ChangeDeliveryMethod(DeliveryMethod),
    /// Reserve a drone for this order (compare-and-swap on the drone side).
    AssignDrone(DroneId),
    /// Launch the assigned drone and mark the order SHIPPED.
    StartDelivery,
    /// Complete the handoff: mark DELIVERED and return the drone to the pool.
    MarkDelivered,
}

/// What each action reports back on success.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderActionResult {
    Transitioned(OrderStatus),
    Canceled,
    DeliveryMethodChanged(DeliveryMethod),
    DroneAssigned(DroneId),
    DeliveryStarted { drone_id: DroneId },
    Delivered,
}
