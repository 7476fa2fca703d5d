//! The running system: both actors, wired and spawned.

use crate::clients::{DroneClient, OrderClient};
use crate::directory::Directories;
use crate::order_actor::OrderContext;
use crate::{drone_actor, order_actor};
use tokio::task::JoinHandle;
use tracing::info;

/// Owns the actor tasks and hands out clients.
///
/// Dropping the system without calling [`DispatchSystem::shutdown`] aborts
/// nothing; the actors simply drain and exit once every client clone is gone.
pub struct DispatchSystem {
    pub order_client: OrderClient,
    pub drone_client: DroneClient,
    handles: Vec<JoinHandle<()>>,
}

impl DispatchSystem {
    /// Creates and starts the whole system against the given collaborators.
    pub fn new(directories: Directories) -> Self {
        let (drone_actor, drone_client) = drone_actor::new();
        let (order_actor, order_client) = order_actor::new();

        let drone_handle = tokio::spawn(drone_actor.run(()));
        let order_handle = tokio::spawn(order_actor.run(OrderContext {
            drones: drone_client.clone(),
            directories,
        }));

        info!("dispatch system started");
        Self {
            order_client,
            drone_client,
            handles: vec![drone_handle, order_handle],
        }
    }

    /// Drops the clients to close the channels, then waits for both actors
    /// to drain and exit. No messages already accepted are lost.
    pub async fn shutdown(self) {
        let Self {
            order_client,
            drone_client,
            handles,
        } = self;
        drop(order_client);
        drop(drone_client);

        for handle in handles {
            let _ = handle.await;
        }
        info!("dispatch system stopped");
    }
}
