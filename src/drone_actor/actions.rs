//! Custom actions for the Drone actor.
//!
//! `Reserve`, `Launch` and `Release` are the dispatch-side compare-and-swap
//! transitions: each checks the drone's current status (and, for launch and
//! release, the holding order) and fails with `Conflict` when the
//! observation no longer holds. Because the drone actor processes one action
//! at a time, the check and the write are a single atomic step.
//!
//! `SetStatus` and `UpdateTelemetry` belong to fleet maintenance and never
//! touch a dispatched drone's reservation.

use crate::model::{DroneStatus, OrderId};

/// Domain-specific operations on a drone, beyond standard CRUD.
#[derive(Debug, Clone)]
pub enum DroneAction {
    /// CAS IDLE → RESERVED, claiming the drone for `order_id`.
    Reserve { order_id: OrderId },
    /// CAS RESERVED → IN_MISSION; only the holding order may launch.
    Launch { order_id: OrderId },
    /// CAS RESERVED/IN_MISSION → IDLE; only the holding order may release.
    /// Releasing an already-idle drone is a no-op so retries are safe.
    Release { order_id: OrderId },
    /// Fleet maintenance: take the drone in or out of service. Refused while
    /// the drone is reserved or airborne.
    SetStatus(DroneStatus),
    /// Fleet maintenance: field-level telemetry write. Never touches status.
    UpdateTelemetry {
        battery_percent: Option<u8>,
        location: Option<String>,
    },
}

/// Results from drone actions; variants match 1:1 with [`DroneAction`].
#[derive(Debug, Clone, PartialEq)]
pub enum DroneActionResult {
    Reserved,
    Launched,
    Released,
    StatusSet(DroneStatus),
    TelemetryUpdated,
}
