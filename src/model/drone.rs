//! Drone record and fleet status model.
//!
//! The dispatch coordinator only ever flips `status` (and the matching
//! `reserved_by` marker); battery, location and administrative fields belong
//! to fleet maintenance and are updated field-by-field so the two sides never
//! clobber each other.

use crate::model::order::OrderId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for drones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DroneId(pub u32);

impl From<u32> for DroneId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for DroneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "drone_{}", self.0)
    }
}

/// Operational status of a drone.
///
/// RESERVED is the sub-state that closes the double-assignment race: the
/// drone is claimed by an order but not yet airborne, and is not available
/// for any other reservation. The only path into RESERVED is the
/// compare-and-swap `Reserve` action, serialized by the drone actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DroneStatus {
    Idle,
    Reserved,
    InMission,
    Maintenance,
}

impl DroneStatus {
    /// Whether the drone currently belongs to some order's dispatch.
    pub fn is_dispatched(self) -> bool {
        matches!(self, DroneStatus::Reserved | DroneStatus::InMission)
    }
}

impl Display for DroneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DroneStatus::Idle => "IDLE",
            DroneStatus::Reserved => "RESERVED",
            DroneStatus::InMission => "IN_MISSION",
            DroneStatus::Maintenance => "MAINTENANCE",
        };
        write!(f, "{}", name)
    }
}

/// Payload for registering a new drone with the fleet.
#[derive(Debug, Clone)]
pub struct DroneCreate {
    /// Fleet code painted on the airframe, unique across the registry.
    pub code: String,
    pub model: String,
    pub max_payload_kg: f64,
    pub battery_percent: u8,
    pub location: Option<String>,
    pub note: Option<String>,
}

/// Administrative edits. The fleet code is the drone's public identity and
/// is immutable after registration; re-register to change it.
#[derive(Debug, Clone, Default)]
pub struct DroneUpdate {
    pub model: Option<String>,
    pub max_payload_kg: Option<f64>,
    pub note: Option<String>,
}

/// Filter for fleet listings.
#[derive(Debug, Clone, Default)]
pub struct DroneFilter {
    pub status: Option<DroneStatus>,
}

/// One delivery drone in the fleet.
///
/// Invariant: `reserved_by` is `Some` iff `status` is RESERVED or
/// IN_MISSION, and names the single order holding the drone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drone {
    pub id: DroneId,
    pub code: String,
    pub model: String,
    pub max_payload_kg: f64,
    pub battery_percent: u8,
    pub location: Option<String>,
    pub status: DroneStatus,
    pub reserved_by: Option<OrderId>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Drone {
    pub fn is_available(&self) -> bool {
        self.status == DroneStatus::Idle
    }

    pub fn check_invariants(&self) -> bool {
        self.status.is_dispatched() == self.reserved_by.is_some()
    }
}
