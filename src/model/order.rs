//! Order aggregate: header, immutable line items, and the status transition
//! table.
//!
//! The transition table is the single source of truth for which status moves
//! are legal. The actor layer consults it before mutating anything, so
//! legality checks cannot drift apart across call sites the way scattered
//! `if` checks do.

use crate::model::drone::DroneId;
use crate::model::event::AuditTrail;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Fulfillment status of an order.
///
/// The happy path runs PENDING → CONFIRMED → PACKED → SHIPPED → DELIVERED →
/// COMPLETED. CANCELED is reachable only before the order ships. CANCELED
/// and COMPLETED are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Packed,
    Shipped,
    Delivered,
    Completed,
    Canceled,
}

impl OrderStatus {
    /// The legal targets from this status, as an explicit table.
    ///
    /// Forward moves along the fulfillment sequence may skip stages (a
    /// canteen that never marks PACKED can still ship), backward moves are
    /// always illegal, and cancellation is only possible while the order is
    /// still on the ground.
    pub fn allowed_targets(self) -> &'static [OrderStatus] {
        use OrderStatus::*;
        match self {
            Pending => &[Confirmed, Packed, Shipped, Delivered, Completed, Canceled],
            Confirmed => &[Packed, Shipped, Delivered, Completed, Canceled],
            Packed => &[Shipped, Delivered, Completed, Canceled],
            Shipped => &[Delivered, Completed],
            Delivered => &[Completed],
            Completed | Canceled => &[],
        }
    }

    pub fn allows(self, target: OrderStatus) -> bool {
        self.allowed_targets().contains(&target)
    }

    /// A terminal status permits no further transitions.
    pub fn is_terminal(self) -> bool {
        self.allowed_targets().is_empty()
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Packed => "PACKED",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Canceled => "CANCELED",
        };
        write!(f, "{}", name)
    }
}

/// How the order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryMethod {
    Drone,
    Manual,
}

impl Display for DeliveryMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryMethod::Drone => write!(f, "DRONE"),
            DeliveryMethod::Manual => write!(f, "MANUAL"),
        }
    }
}

/// Immutable snapshot of one purchased item, priced at order-creation time.
///
/// Later menu edits never change what the customer agreed to pay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub food_id: u64,
    pub food_name: String,
    pub unit_price_cents: i64,
    pub quantity: u32,
    pub subtotal_cents: i64,
}

/// One requested item in a checkout payload, before snapshotting.
#[derive(Debug, Clone)]
pub struct OrderLineReq {
    pub food_id: u64,
    pub quantity: u32,
}

/// Payload for creating a new order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub customer_id: u64,
    pub canteen_id: u64,
    /// Defaults to drone delivery when unspecified.
    pub delivery_method: Option<DeliveryMethod>,
    pub delivery_address: String,
    pub remarks: Option<String>,
    pub items: Vec<OrderLineReq>,
}

/// Listing filter; `None` fields match everything.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub customer_id: Option<u64>,
    pub canteen_id: Option<u64>,
    pub status: Option<OrderStatus>,
}

/// A customer's purchase against one canteen, tracked through fulfillment.
///
/// Invariants (enforced by the order actor, checked by [`Order::check_invariants`]):
/// - `drone_id` is `Some` only while `delivery_method == Drone`.
/// - `status` always equals the code of the most recent timeline event.
/// - Orders are never deleted; cancellation is a terminal status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: u64,
    pub canteen_id: u64,
    pub delivery_method: DeliveryMethod,
    pub status: OrderStatus,
    /// Total in minor currency units, computed from the line snapshots.
    pub amount_total_cents: i64,
    pub delivery_address: String,
    pub remarks: Option<String>,
    /// Handoff verification code, issued for drone deliveries.
    pub pickup_code: Option<String>,
    /// The drone currently serving this order, if any.
    pub drone_id: Option<DroneId>,
    pub lines: Vec<OrderLine>,
    pub timeline: AuditTrail,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Applies an already-validated transition: set the status, bump
    /// `updated_at`, and append exactly one timeline event. Callers must
    /// check [`OrderStatus::allows`] first; this method never fails so the
    /// combined mutation cannot be left half-done.
    pub fn record_transition(&mut self, target: OrderStatus, note: impl Into<String>) {
        let now = Utc::now();
        self.status = target;
        self.updated_at = now;
        self.timeline.append(target, now, note);
    }

    /// Issues the handoff code used when the drone reaches the customer.
    pub fn issue_pickup_code(&mut self) {
        let seed = self.created_at.timestamp_subsec_micros() as u64 + self.id.0 as u64 * 7919;
        self.pickup_code = Some(format!("{:06}", seed % 1_000_000));
    }

    /// Debug-mode consistency check across the aggregate.
    pub fn check_invariants(&self) -> bool {
        let drone_ok = self.drone_id.is_none() || self.delivery_method == DeliveryMethod::Drone;
        let trail_ok = self
            .timeline
            .last()
            .map(|e| e.code == self.status)
            .unwrap_or(false);
        drone_ok && trail_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Packed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Completed,
        OrderStatus::Canceled,
    ];

    #[test]
    fn terminal_states_allow_nothing() {
        for target in ALL {
            assert!(!OrderStatus::Completed.allows(target));
            assert!(!OrderStatus::Canceled.allows(target));
        }
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Canceled.is_terminal());
    }

    #[test]
    fn forward_moves_may_skip_stages() {
        assert!(OrderStatus::Pending.allows(OrderStatus::Shipped));
        assert!(OrderStatus::Confirmed.allows(OrderStatus::Delivered));
        assert!(OrderStatus::Shipped.allows(OrderStatus::Delivered));
    }

    #[test]
    fn backward_moves_are_illegal() {
        assert!(!OrderStatus::Shipped.allows(OrderStatus::Confirmed));
        assert!(!OrderStatus::Delivered.allows(OrderStatus::Packed));
        assert!(!OrderStatus::Confirmed.allows(OrderStatus::Pending));
    }

    #[test]
    fn self_transitions_are_illegal() {
        for status in ALL {
            assert!(!status.allows(status), "{status} -> {status} must be rejected");
        }
    }

    #[test]
    fn cancellation_only_before_shipping() {
        assert!(OrderStatus::Pending.allows(OrderStatus::Canceled));
        assert!(OrderStatus::Confirmed.allows(OrderStatus::Canceled));
        assert!(OrderStatus::Packed.allows(OrderStatus::Canceled));
        assert!(!OrderStatus::Shipped.allows(OrderStatus::Canceled));
        assert!(!OrderStatus::Delivered.allows(OrderStatus::Canceled));
    }

    #[test]
    fn record_transition_keeps_status_and_trail_in_sync() {
        let mut order = Order {
            id: OrderId(1),
            customer_id: 7,
            canteen_id: 3,
            delivery_method: DeliveryMethod::Drone,
            status: OrderStatus::Pending,
            amount_total_cents: 1200,
            delivery_address: "Dorm 4, Room 512".into(),
            remarks: None,
            pickup_code: None,
            drone_id: None,
            lines: vec![],
            timeline: AuditTrail::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        order.timeline.append(OrderStatus::Pending, order.created_at, "order created");

        order.record_transition(OrderStatus::Shipped, "drone airborne");
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.timeline.len(), 2);
        assert!(order.check_invariants());
    }
}
