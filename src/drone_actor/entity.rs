//! Entity trait implementation for the Drone record.
//!
//! All status flips happen inside `handle_action`, serialized by the drone
//! actor's message loop. That loop is the "single row lock": a reservation
//! check and the write that claims the drone cannot be interleaved by
//! another request.

use crate::drone_actor::actions::{DroneAction, DroneActionResult};
use crate::drone_actor::error::DroneError;
use crate::framework::ActorEntity;
use crate::model::{Drone, DroneCreate, DroneFilter, DroneId, DroneStatus, DroneUpdate};
use async_trait::async_trait;
use chrono::Utc;

#[async_trait]
impl ActorEntity for Drone {
    type Id = DroneId;
    type Create = DroneCreate;
    type Update = DroneUpdate;
    type Action = DroneAction;
    type ActionResult = DroneActionResult;
    type Filter = DroneFilter;
    type Context = ();
    type Error = DroneError;

    fn from_create_params(id: DroneId, params: DroneCreate) -> Result<Self, DroneError> {
        let code = params.code.trim();
        if code.is_empty() {
            return Err(DroneError::BadRequest("drone code must not be blank".into()));
        }
        if params.model.trim().is_empty() {
            return Err(DroneError::BadRequest("drone model must not be blank".into()));
        }
        if !(params.max_payload_kg > 0.0) {
            return Err(DroneError::BadRequest(format!(
                "max payload must be positive, got {}",
                params.max_payload_kg
            )));
        }
        if params.battery_percent > 100 {
            return Err(DroneError::BadRequest(format!(
                "battery percentage out of range: {}",
                params.battery_percent
            )));
        }

        let now = Utc::now();
        Ok(Self {
            id,
            code: code.to_string(),
            model: params.model,
            max_payload_kg: params.max_payload_kg,
            battery_percent: params.battery_percent,
            location: params.location,
            status: DroneStatus::Idle,
            reserved_by: None,
            note: params.note,
            created_at: now,
            updated_at: now,
        })
    }

    /// Fleet codes are unique; the store scan at admission is the one choke
    /// point that can see every registered drone.
    fn conflicts_with(&self, existing: &Self) -> Option<DroneError> {
        if self.code == existing.code {
            Some(DroneError::BadRequest(format!(
                "drone code '{}' already exists",
                self.code
            )))
        } else {
            None
        }
    }

    fn matches(&self, filter: &DroneFilter) -> bool {
        filter.status.map_or(true, |s| self.status == s)
    }

    async fn on_update(&mut self, update: DroneUpdate, _ctx: &()) -> Result<(), DroneError> {
        if let Some(model) = update.model {
            self.model = model;
        }
        if let Some(payload) = update.max_payload_kg {
            if !(payload > 0.0) {
                return Err(DroneError::BadRequest(format!(
                    "max payload must be positive, got {payload}"
                )));
            }
            self.max_payload_kg = payload;
        }
        if let Some(note) = update.note {
            self.note = Some(note);
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// A drone serving an order cannot be decommissioned.
    async fn on_delete(&self, _ctx: &()) -> Result<(), DroneError> {
        if self.status.is_dispatched() {
            return Err(DroneError::InvalidState(format!(
                "drone {} is {} and cannot be decommissioned",
                self.code, self.status
            )));
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: DroneAction,
        _ctx: &(),
    ) -> Result<DroneActionResult, DroneError> {
        match action {
            DroneAction::Reserve { order_id } => {
                if self.status != DroneStatus::Idle {
                    return Err(DroneError::Conflict(format!(
                        "drone {} no longer available: status {}, expected IDLE",
                        self.code, self.status
                    )));
                }
                self.status = DroneStatus::Reserved;
                self.reserved_by = Some(order_id);
                self.updated_at = Utc::now();
                Ok(DroneActionResult::Reserved)
            }
            DroneAction::Launch { order_id } => {
                if self.status != DroneStatus::Reserved || self.reserved_by != Some(order_id) {
                    return Err(DroneError::Conflict(format!(
                        "drone {} cannot launch for {}: status {}, reserved by {}",
                        self.code,
                        order_id,
                        self.status,
                        self.reserved_by
                            .map(|o| o.to_string())
                            .unwrap_or_else(|| "nobody".into())
                    )));
                }
                self.status = DroneStatus::InMission;
                self.updated_at = Utc::now();
                Ok(DroneActionResult::Launched)
            }
            DroneAction::Release { order_id } => {
                match self.status {
                    // Retry-safe: the release already happened.
                    DroneStatus::Idle => Ok(DroneActionResult::Released),
                    DroneStatus::Reserved | DroneStatus::InMission
                        if self.reserved_by == Some(order_id) =>
                    {
                        self.status = DroneStatus::Idle;
                        self.reserved_by = None;
                        self.updated_at = Utc::now();
                        Ok(DroneActionResult::Released)
                    }
                    _ => Err(DroneError::Conflict(format!(
                        "drone {} is not held by {}: status {}, reserved by {}",
                        self.code,
                        order_id,
                        self.status,
                        self.reserved_by
                            .map(|o| o.to_string())
                            .unwrap_or_else(|| "nobody".into())
                    ))),
                }
            }
            DroneAction::SetStatus(target) => {
                if target.is_dispatched() {
                    return Err(DroneError::BadRequest(format!(
                        "status {target} is managed by dispatch, not fleet maintenance"
                    )));
                }
                if self.status.is_dispatched() {
                    return Err(DroneError::InvalidState(format!(
                        "drone {} is {} and cannot be set to {}",
                        self.code, self.status, target
                    )));
                }
                self.status = target;
                self.updated_at = Utc::now();
                Ok(DroneActionResult::StatusSet(target))
            }
            DroneAction::UpdateTelemetry {
                battery_percent,
                location,
            } => {
                if let Some(battery) = battery_percent {
                    if battery > 100 {
                        return Err(DroneError::BadRequest(format!(
                            "battery percentage out of range: {battery}"
                        )));
                    }
                    self.battery_percent = battery;
                }
                if let Some(loc) = location {
                    self.location = Some(loc);
                }
                self.updated_at = Utc::now();
                Ok(DroneActionResult::TelemetryUpdated)
            }
        }
    }
}
