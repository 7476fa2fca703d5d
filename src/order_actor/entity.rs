//! `ActorEntity` implementation for [`Order`]: the lifecycle engine plus the
//! drone-coupled dispatch operations.
//!
//! Every drone-coupled action follows the same shape: validate the order's
//! preconditions first (pure, no side effects), then perform the drone-side
//! compare-and-swap through the registry client, and only after that succeeds
//! mutate the order with [`Order::record_transition`], which cannot fail.
//! A failure on the drone side therefore always leaves the order exactly as
//! it was, with no compensation step to get wrong.

use crate::clients::DroneClient;
use crate::directory::Directories;
use crate::drone_actor::DroneError;
use crate::framework::ActorEntity;
use crate::model::{
    AuditTrail, DeliveryMethod, Order, OrderCreate, OrderFilter, OrderId, OrderLine, OrderStatus,
};
use crate::order_actor::actions::{OrderAction, OrderActionResult};
use crate::order_actor::error::OrderError;
use async_trait::async_trait;
use chrono::Utc;

/// Dependencies injected into the order actor at `run()` time.
pub struct OrderContext {
    /// Client for the drone registry actor.
    pub drones: DroneClient,
    /// Read-only collaborators owned by the surrounding platform.
    pub directories: Directories,
}

/// Maps a drone registry error onto the order-side error surface.
fn dispatch_error(e: DroneError) -> OrderError {
    match e {
        DroneError::NotFound(id) => OrderError::NotFound(id),
        DroneError::Conflict(msg) => OrderError::Conflict(msg),
        other => OrderError::DispatchFailure(other.to_string()),
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Filter = OrderFilter;
    type Context = OrderContext;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        if params.items.is_empty() {
            return Err(OrderError::BadRequest(
                "order must contain at least one item".to_string(),
            ));
        }
        if params.delivery_address.trim().is_empty() {
            return Err(OrderError::BadRequest(
                "delivery address must not be blank".to_string(),
            ));
        }
        for item in &params.items {
            if item.quantity == 0 {
                return Err(OrderError::BadRequest(format!(
                    "quantity for food item {} must be positive",
                    item.food_id
                )));
            }
        }

        // Names and prices are snapshotted in on_create, once the catalog
        // has answered.
        let lines = params
            .items
            .into_iter()
            .map(|req| OrderLine {
                food_id: req.food_id,
                food_name: String::new(),
                unit_price_cents: 0,
                quantity: req.quantity,
                subtotal_cents: 0,
            })
            .collect();

        let now = Utc::now();
        Ok(Order {
            id,
            customer_id: params.customer_id,
            canteen_id: params.canteen_id,
            delivery_method: params.delivery_method.unwrap_or(DeliveryMethod::Drone),
            status: OrderStatus::Pending,
            amount_total_cents: 0,
            delivery_address: params.delivery_address,
            remarks: params.remarks,
            pickup_code: None,
            drone_id: None,
            lines,
            timeline: AuditTrail::new(),
            created_at: now,
            updated_at: now,
        })
    }

    fn matches(&self, filter: &OrderFilter) -> bool {
        filter.customer_id.map_or(true, |c| self.customer_id == c)
            && filter.canteen_id.map_or(true, |c| self.canteen_id == c)
            && filter.status.map_or(true, |s| self.status == s)
    }

    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), OrderError> {
        if !ctx.directories.users.user_exists(self.customer_id).await {
            return Err(OrderError::BadRequest(format!(
                "unknown customer {}",
                self.customer_id
            )));
        }
        if !ctx.directories.canteens.canteen_exists(self.canteen_id).await {
            return Err(OrderError::BadRequest(format!(
                "unknown canteen {}",
                self.canteen_id
            )));
        }

        let mut total = 0i64;
        for line in &mut self.lines {
            let info = ctx
                .directories
                .catalog
                .lookup_food(line.food_id)
                .await
                .ok_or_else(|| {
                    OrderError::BadRequest(format!("unknown food item {}", line.food_id))
                })?;
            line.food_name = info.name;
            line.unit_price_cents = info.unit_price_cents;
            line.subtotal_cents = info.unit_price_cents * line.quantity as i64;
            total += line.subtotal_cents;
        }
        self.amount_total_cents = total;

        if self.delivery_method == DeliveryMethod::Drone {
            self.issue_pickup_code();
        }
        self.timeline
            .append(OrderStatus::Pending, self.created_at, "order created");
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &OrderContext) -> Result<(), OrderError> {
        Ok(())
    }

    async fn on_delete(&self, _ctx: &OrderContext) -> Result<(), OrderError> {
        Err(OrderError::InvalidState(
            "orders are never deleted; cancel instead".to_string(),
        ))
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        ctx: &OrderContext,
    ) -> Result<OrderActionResult, OrderError> {
        match action {
            OrderAction::ApplyTransition { target, note } => {
                if target == OrderStatus::Canceled {
                    return Err(OrderError::BadRequest(
                        "cancellation goes through the cancel operation".to_string(),
                    ));
                }
                if self.delivery_method == DeliveryMethod::Drone
                    && matches!(target, OrderStatus::Shipped | OrderStatus::Delivered)
                {
                    return Err(OrderError::BadRequest(format!(
                        "drone orders reach {target} through the dispatch operations"
                    )));
                }
                if !self.status.allows(target) {
                    return Err(OrderError::InvalidTransition {
                        from: self.status,
                        to: target,
                    });
                }
                let note = note.unwrap_or_else(|| format!("moved to {target}"));
                self.record_transition(target, note);
                Ok(OrderActionResult::Transitioned(target))
            }

            OrderAction::Cancel { reason } => {
                if !self.status.allows(OrderStatus::Canceled) {
                    return Err(OrderError::InvalidTransition {
                        from: self.status,
                        to: OrderStatus::Canceled,
                    });
                }
                // Give the drone back before the order becomes terminal, so a
                // failed release never strands a CANCELED order holding a
                // reservation.
                if let Some(drone_id) = self.drone_id {
                    ctx.drones
                        .release(drone_id, self.id)
                        .await
                        .map_err(dispatch_error)?;
                    self.drone_id = None;
                }
                let note = reason.unwrap_or_else(|| "canceled by customer".to_string());
                self.record_transition(OrderStatus::Canceled, note);
                Ok(OrderActionResult::Canceled)
            }

            OrderAction::ChangeDeliveryMethod(method) => {
                if !matches!(self.status, OrderStatus::Pending | OrderStatus::Confirmed) {
                    return Err(OrderError::InvalidState(format!(
                        "delivery method is fixed once the order is {}",
                        self.status
                    )));
                }
                if method != self.delivery_method {
                    match method {
                        DeliveryMethod::Manual => {
                            if let Some(drone_id) = self.drone_id {
                                ctx.drones
                                    .release(drone_id, self.id)
                                    .await
                                    .map_err(dispatch_error)?;
                                self.drone_id = None;
                            }
                            self.pickup_code = None;
                        }
                        DeliveryMethod::Drone => {
                            if self.pickup_code.is_none() {
                                self.issue_pickup_code();
                            }
                        }
                    }
                    self.delivery_method = method;
                    self.updated_at = Utc::now();
                }
                Ok(OrderActionResult::DeliveryMethodChanged(method))
            }

            OrderAction::AssignDrone(drone_id) => {
                if self.delivery_method != DeliveryMethod::Drone {
                    return Err(OrderError::InvalidState(
                        "only drone orders can reserve a drone".to_string(),
                    ));
                }
                if let Some(held) = self.drone_id {
                    return Err(OrderError::Conflict(format!(
                        "{} already holds {held}",
                        self.id
                    )));
                }
                if !self.status.allows(OrderStatus::Shipped) {
                    return Err(OrderError::InvalidState(format!(
                        "a {} order cannot be dispatched",
                        self.status
                    )));
                }
                ctx.drones
                    .reserve(drone_id, self.id)
                    .await
                    .map_err(dispatch_error)?;
                self.drone_id = Some(drone_id);
                self.updated_at = Utc::now();
                Ok(OrderActionResult::DroneAssigned(drone_id))
            }

            OrderAction::StartDelivery => {
                if self.delivery_method != DeliveryMethod::Drone {
                    return Err(OrderError::InvalidState(
                        "only drone orders can start a drone delivery".to_string(),
                    ));
                }
                let drone_id = self.drone_id.ok_or_else(|| {
                    OrderError::InvalidState(format!("{} has no drone assigned", self.id))
                })?;
                if !self.status.allows(OrderStatus::Shipped) {
                    return Err(OrderError::InvalidTransition {
                        from: self.status,
                        to: OrderStatus::Shipped,
                    });
                }
                ctx.drones
                    .launch(drone_id, self.id)
                    .await
                    .map_err(dispatch_error)?;
                self.record_transition(OrderStatus::Shipped, "drone airborne");
                Ok(OrderActionResult::DeliveryStarted { drone_id })
            }

            OrderAction::MarkDelivered => {
                if self.status != OrderStatus::Shipped {
                    return Err(OrderError::InvalidTransition {
                        from: self.status,
                        to: OrderStatus::Delivered,
                    });
                }
                if let Some(drone_id) = self.drone_id {
                    ctx.drones
                        .release(drone_id, self.id)
                        .await
                        .map_err(dispatch_error)?;
                    self.drone_id = None;
                }
                self.record_transition(OrderStatus::Delivered, "delivered");
                Ok(OrderActionResult::Delivered)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::StaticDirectory;
    use crate::drone_actor::DroneActionResult;
    use crate::framework::{ActorError, MockClient};
    use crate::model::{Drone, DroneId, OrderLineReq};

    fn directories() -> Directories {
        StaticDirectory::new()
            .with_food(1, "braised noodles", 1500)
            .with_food(2, "milk tea", 800)
            .with_canteen(3, "North Canteen")
            .with_user(7, "Li Lei", "13800000000")
            .into_directories()
    }

    fn context(mock: &MockClient<Drone>) -> OrderContext {
        OrderContext {
            drones: DroneClient::new(mock.client()),
            directories: directories(),
        }
    }

    fn create_params() -> OrderCreate {
        OrderCreate {
            customer_id: 7,
            canteen_id: 3,
            delivery_method: None,
            delivery_address: "Dorm 4, Room 512".to_string(),
            remarks: Some("no cilantro".to_string()),
            items: vec![
                OrderLineReq {
                    food_id: 1,
                    quantity: 2,
                },
                OrderLineReq {
                    food_id: 2,
                    quantity: 1,
                },
            ],
        }
    }

    async fn created_order(ctx: &OrderContext) -> Order {
        let mut order = Order::from_create_params(OrderId(1), create_params()).unwrap();
        order.on_create(ctx).await.unwrap();
        order
    }

    #[tokio::test]
    async fn create_snapshots_prices_and_defaults_to_drone_delivery() {
        let mock = MockClient::<Drone>::new();
        let ctx = context(&mock);
        let order = created_order(&ctx).await;

        assert_eq!(order.delivery_method, DeliveryMethod::Drone);
        assert_eq!(order.amount_total_cents, 2 * 1500 + 800);
        assert_eq!(order.lines[0].food_name, "braised noodles");
        assert!(order.pickup_code.is_some());
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.timeline.len(), 1);
        assert!(order.check_invariants());
    }

    #[tokio::test]
    async fn create_rejects_unknown_food() {
        let mock = MockClient::<Drone>::new();
        let ctx = context(&mock);
        let mut params = create_params();
        params.items[0].food_id = 99;
        let mut order = Order::from_create_params(OrderId(1), params).unwrap();
        let err = order.on_create(&ctx).await.unwrap_err();
        assert!(matches!(err, OrderError::BadRequest(_)));
    }

    #[tokio::test]
    async fn start_delivery_requires_an_assigned_drone() {
        let mock = MockClient::<Drone>::new();
        let ctx = context(&mock);
        let mut order = created_order(&ctx).await;

        let err = order
            .handle_action(OrderAction::StartDelivery, &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidState(_)));
        assert_eq!(order.status, OrderStatus::Pending);
        mock.verify();
    }

    #[tokio::test]
    async fn failed_launch_leaves_the_order_untouched() {
        let mut mock = MockClient::<Drone>::new();
        // Reservation succeeds, launch fails.
        mock.expect_action().return_ok(DroneActionResult::Reserved);
        mock.expect_action().return_err(ActorError::Entity(
            DroneError::InvalidState("battery too low".to_string()),
        ));
        let ctx = context(&mock);
        let mut order = created_order(&ctx).await;

        order
            .handle_action(OrderAction::AssignDrone(DroneId(5)), &ctx)
            .await
            .unwrap();
        let before = order.clone();

        let err = order
            .handle_action(OrderAction::StartDelivery, &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::DispatchFailure(_)));
        assert_eq!(order.status, before.status);
        assert_eq!(order.drone_id, before.drone_id);
        assert_eq!(order.timeline.len(), before.timeline.len());
        mock.verify();
    }

    #[tokio::test]
    async fn delivered_releases_the_drone_and_clears_the_link() {
        let mut mock = MockClient::<Drone>::new();
        mock.expect_action().return_ok(DroneActionResult::Reserved);
        mock.expect_action().return_ok(DroneActionResult::Launched);
        mock.expect_action().return_ok(DroneActionResult::Released);
        let ctx = context(&mock);
        let mut order = created_order(&ctx).await;

        order
            .handle_action(OrderAction::AssignDrone(DroneId(5)), &ctx)
            .await
            .unwrap();
        order
            .handle_action(OrderAction::StartDelivery, &ctx)
            .await
            .unwrap();
        let result = order
            .handle_action(OrderAction::MarkDelivered, &ctx)
            .await
            .unwrap();

        assert_eq!(result, OrderActionResult::Delivered);
        assert_eq!(order.status, OrderStatus::Delivered);
        assert_eq!(order.drone_id, None);
        assert!(order.check_invariants());
        mock.verify();
    }

    #[tokio::test]
    async fn cancel_after_shipping_is_rejected() {
        let mut mock = MockClient::<Drone>::new();
        mock.expect_action().return_ok(DroneActionResult::Reserved);
        mock.expect_action().return_ok(DroneActionResult::Launched);
        let ctx = context(&mock);
        let mut order = created_order(&ctx).await;

        order
            .handle_action(OrderAction::AssignDrone(DroneId(5)), &ctx)
            .await
            .unwrap();
        order
            .handle_action(OrderAction::StartDelivery, &ctx)
            .await
            .unwrap();

        let err = order
            .handle_action(OrderAction::Cancel { reason: None }, &ctx)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidTransition {
                from: OrderStatus::Shipped,
                to: OrderStatus::Canceled,
            }
        );
        mock.verify();
    }

    #[tokio::test]
    async fn switching_to_manual_releases_the_reservation() {
        let mut mock = MockClient::<Drone>::new();
        mock.expect_action().return_ok(DroneActionResult::Reserved);
        mock.expect_action().return_ok(DroneActionResult::Released);
        let ctx = context(&mock);
        let mut order = created_order(&ctx).await;

        order
            .handle_action(OrderAction::AssignDrone(DroneId(5)), &ctx)
            .await
            .unwrap();
        order
            .handle_action(
                OrderAction::ChangeDeliveryMethod(DeliveryMethod::Manual),
                &ctx,
            )
            .await
            .unwrap();

        assert_eq!(order.delivery_method, DeliveryMethod::Manual);
        assert_eq!(order.drone_id, None);
        assert_eq!(order.pickup_code, None);
        mock.verify();
    }

    #[tokio::test]
    async fn plain_transitions_follow_the_table() {
        let mock = MockClient::<Drone>::new();
        let ctx = context(&mock);
        let mut order = created_order(&ctx).await;

        order
            .handle_action(
                OrderAction::ApplyTransition {
                    target: OrderStatus::Confirmed,
                    note: None,
                },
                &ctx,
            )
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Confirmed);

        let err = order
            .handle_action(
                OrderAction::ApplyTransition {
                    target: OrderStatus::Pending,
                    note: None,
                },
                &ctx,
            )
            .await
            .unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidTransition {
                from: OrderStatus::Confirmed,
                to: OrderStatus::Pending,
            }
        );

        // SHIPPED is reserved for the dispatch path on drone orders.
        let err = order
            .handle_action(
                OrderAction::ApplyTransition {
                    target: OrderStatus::Shipped,
                    note: None,
                },
                &ctx,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::BadRequest(_)));
    }
}
