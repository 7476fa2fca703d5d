//! Demo binary: walks one order through the full drone delivery flow.

use canteen_dispatch::directory::StaticDirectory;
use canteen_dispatch::lifecycle::{setup_tracing, DispatchSystem};
use canteen_dispatch::model::{DroneCreate, OrderCreate, OrderLineReq};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    info!("starting canteen dispatch system");

    let directories = StaticDirectory::new()
        .with_food(1, "braised beef noodles", 1800)
        .with_food(2, "iced milk tea", 900)
        .with_canteen(3, "North Campus Canteen")
        .with_user(7, "Li Lei", "13800000000")
        .into_directories();
    let system = DispatchSystem::new(directories);

    let drone_id = async {
        info!("registering a delivery drone");
        system
            .drone_client
            .register(DroneCreate {
                code: "DR-001".to_string(),
                model: "SkyCarrier 2".to_string(),
                max_payload_kg: 5.0,
                battery_percent: 100,
                location: Some("North Campus pad".to_string()),
                note: None,
            })
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(tracing::info_span!("fleet_setup"))
    .await?;

    info!(drone_id = %drone_id, "drone registered");

    let order_id = async {
        info!("placing a drone delivery order");
        system
            .order_client
            .create_order(OrderCreate {
                customer_id: 7,
                canteen_id: 3,
                delivery_method: None,
                delivery_address: "Dorm 4, Room 512".to_string(),
                remarks: Some("no cilantro".to_string()),
                items: vec![
                    OrderLineReq {
                        food_id: 1,
                        quantity: 1,
                    },
                    OrderLineReq {
                        food_id: 2,
                        quantity: 2,
                    },
                ],
            })
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(tracing::info_span!("checkout"))
    .await?;

    info!(order_id = %order_id, "order placed");

    let dispatch = async {
        system.order_client.assign_drone(order_id, drone_id).await?;
        info!(drone_id = %drone_id, "drone reserved");

        let flying = system.order_client.start_delivery(order_id).await?;
        info!(drone_id = %flying, "drone airborne");

        system.order_client.mark_delivered(order_id).await?;
        info!("order delivered, drone released");
        Ok::<_, canteen_dispatch::order_actor::OrderError>(())
    }
    .instrument(tracing::info_span!("dispatch"))
    .await;

    match dispatch {
        Ok(()) => {
            let timeline = system
                .order_client
                .timeline(order_id)
                .await
                .map_err(|e| e.to_string())?;
            for event in &timeline {
                info!(status = %event.code, note = %event.note, "timeline");
            }
        }
        Err(e) => error!(error = %e, "dispatch failed"),
    }

    system.shutdown().await;
    info!("done");
    Ok(())
}
