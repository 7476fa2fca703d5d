//! Append-only audit trail of order status changes.
//!
//! One [`OrderStatusEvent`] is recorded per successful transition, including
//! the initial PENDING event at order creation. Events are never mutated or
//! deleted, and the trail keeps `occurred_at` monotonically non-decreasing so
//! a timeline read always comes back in transition order.

use crate::model::order::OrderStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single entry in an order's timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStatusEvent {
    /// Status the order entered.
    pub code: OrderStatus,
    /// When the transition took effect.
    pub occurred_at: DateTime<Utc>,
    /// Free-text context ("drone airborne", a cancellation reason, ...).
    pub note: String,
    pub created_at: DateTime<Utc>,
}

/// The append-only sequence of status events for one order.
///
/// The only way in is [`AuditTrail::append`]; there is no mutable access to
/// recorded events. The trail is owned by its `Order` and lives inside the
/// order actor, so an order update and its event append commit together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditTrail {
    events: Vec<OrderStatusEvent>,
}

impl AuditTrail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one event, clamping `occurred_at` so the sequence never goes
    /// backwards even if the wall clock does.
    pub fn append(
        &mut self,
        code: OrderStatus,
        occurred_at: DateTime<Utc>,
        note: impl Into<String>,
    ) -> &OrderStatusEvent {
        let occurred_at = match self.events.last() {
            Some(last) if last.occurred_at > occurred_at => last.occurred_at,
            _ => occurred_at,
        };
        let idx = self.events.len();
        self.events.push(OrderStatusEvent {
            code,
            occurred_at,
            note: note.into(),
            created_at: Utc::now(),
        });
        &self.events[idx]
    }

    /// All events, ascending by `occurred_at`.
    pub fn events(&self) -> &[OrderStatusEvent] {
        &self.events
    }

    pub fn last(&self) -> Option<&OrderStatusEvent> {
        self.events.last()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn append_keeps_occurred_at_monotonic() {
        let mut trail = AuditTrail::new();
        let t0 = Utc::now();
        trail.append(OrderStatus::Pending, t0, "order created");
        // A clock that jumped backwards must not reorder the timeline.
        trail.append(OrderStatus::Shipped, t0 - Duration::seconds(5), "drone airborne");

        let events = trail.events();
        assert_eq!(events.len(), 2);
        assert!(events[0].occurred_at <= events[1].occurred_at);
        assert_eq!(trail.last().unwrap().code, OrderStatus::Shipped);
    }
}
