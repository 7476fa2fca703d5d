//! End-to-end tests with all real actors: the full delivery flow, the
//! reservation race, and the lifecycle guard rails.

use canteen_dispatch::directory::{Directories, StaticDirectory};
use canteen_dispatch::drone_actor::DroneError;
use canteen_dispatch::lifecycle::DispatchSystem;
use canteen_dispatch::model::{
    DeliveryMethod, DroneCreate, DroneStatus, OrderCreate, OrderId, OrderLineReq, OrderStatus,
};
use canteen_dispatch::order_actor::OrderError;

fn directories() -> Directories {
    StaticDirectory::new()
        .with_food(1, "braised beef noodles", 1800)
        .with_food(2, "iced milk tea", 900)
        .with_canteen(3, "North Campus Canteen")
        .with_user(7, "Li Lei", "13800000000")
        .into_directories()
}

fn drone_params(code: &str) -> DroneCreate {
    DroneCreate {
        code: code.to_string(),
        model: "SkyCarrier 2".to_string(),
        max_payload_kg: 5.0,
        battery_percent: 100,
        location: Some("North Campus pad".to_string()),
        note: None,
    }
}

fn order_params() -> OrderCreate {
    OrderCreate {
        customer_id: 7,
        canteen_id: 3,
        delivery_method: None,
        delivery_address: "Dorm 4, Room 512".to_string(),
        remarks: None,
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
    }
}

#[tokio::test]
async fn full_drone_delivery_flow() {
    let system = DispatchSystem::new(directories());

    let drone_id = system
        .drone_client
        .register(drone_params("DR-001"))
        .await
        .expect("drone registration failed");

    let order_id = system
        .order_client
        .create_order(order_params())
        .await
        .expect("order creation failed");

    let order = system.order_client.get(order_id).await.unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.delivery_method, DeliveryMethod::Drone);
    assert_eq!(order.amount_total_cents, 1800 + 2 * 900);
    assert!(order.pickup_code.is_some());

    // Dispatch straight from PENDING; the canteen never marked intermediate
    // stages.
    system
        .order_client
        .assign_drone(order_id, drone_id)
        .await
        .expect("reservation failed");
    let drone = system.drone_client.get(drone_id).await.unwrap();
    assert_eq!(drone.status, DroneStatus::Reserved);
    assert_eq!(drone.reserved_by, Some(order_id));

    let flying = system.order_client.start_delivery(order_id).await.unwrap();
    assert_eq!(flying, drone_id);
    let drone = system.drone_client.get(drone_id).await.unwrap();
    assert_eq!(drone.status, DroneStatus::InMission);

    system.order_client.mark_delivered(order_id).await.unwrap();
    let drone = system.drone_client.get(drone_id).await.unwrap();
    assert_eq!(drone.status, DroneStatus::Idle);
    assert_eq!(drone.reserved_by, None);

    system
        .order_client
        .apply_transition(order_id, OrderStatus::Completed, None)
        .await
        .unwrap();

    let timeline = system.order_client.timeline(order_id).await.unwrap();
    let codes: Vec<OrderStatus> = timeline.iter().map(|e| e.code).collect();
    assert_eq!(
        codes,
        vec![
            OrderStatus::Pending,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Completed,
        ]
    );
    assert!(timeline
        .windows(2)
        .all(|pair| pair[0].occurred_at <= pair[1].occurred_at));

    let order = system.order_client.get(order_id).await.unwrap();
    assert_eq!(order.status, OrderStatus::Completed);
    assert_eq!(order.drone_id, None);

    system.shutdown().await;
}

#[tokio::test]
async fn second_reservation_of_a_busy_drone_conflicts() {
    let system = DispatchSystem::new(directories());
    let drone_id = system
        .drone_client
        .register(drone_params("DR-001"))
        .await
        .unwrap();

    let first = system.order_client.create_order(order_params()).await.unwrap();
    let second = system.order_client.create_order(order_params()).await.unwrap();

    system.order_client.assign_drone(first, drone_id).await.unwrap();

    let err = system
        .order_client
        .assign_drone(second, drone_id)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Conflict(_)));

    // The loser's order is untouched and the winner still holds the drone.
    let loser = system.order_client.get(second).await.unwrap();
    assert_eq!(loser.drone_id, None);
    let drone = system.drone_client.get(drone_id).await.unwrap();
    assert_eq!(drone.reserved_by, Some(first));

    system.shutdown().await;
}

#[tokio::test]
async fn concurrent_reservations_have_exactly_one_winner() {
    let system = DispatchSystem::new(directories());
    let drone_id = system
        .drone_client
        .register(drone_params("DR-001"))
        .await
        .unwrap();

    let mut order_ids = Vec::new();
    for _ in 0..8 {
        order_ids.push(system.order_client.create_order(order_params()).await.unwrap());
    }

    let mut tasks = Vec::new();
    for order_id in order_ids {
        let client = system.order_client.clone();
        tasks.push(tokio::spawn(async move {
            client.assign_drone(order_id, drone_id).await
        }));
    }

    let mut wins = 0;
    let mut conflicts = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(()) => wins += 1,
            Err(OrderError::Conflict(_)) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(wins, 1);
    assert_eq!(conflicts, 7);

    let drone = system.drone_client.get(drone_id).await.unwrap();
    assert_eq!(drone.status, DroneStatus::Reserved);
    assert!(drone.reserved_by.is_some());

    system.shutdown().await;
}

#[tokio::test]
async fn cancellation_frees_the_drone_for_the_next_order() {
    let system = DispatchSystem::new(directories());
    let drone_id = system
        .drone_client
        .register(drone_params("DR-001"))
        .await
        .unwrap();

    let first = system.order_client.create_order(order_params()).await.unwrap();
    system.order_client.assign_drone(first, drone_id).await.unwrap();

    system
        .order_client
        .cancel(first, Some("changed my mind".to_string()))
        .await
        .unwrap();

    let canceled = system.order_client.get(first).await.unwrap();
    assert_eq!(canceled.status, OrderStatus::Canceled);
    assert_eq!(canceled.drone_id, None);
    let timeline = system.order_client.timeline(first).await.unwrap();
    assert_eq!(timeline.last().unwrap().note, "changed my mind");

    // The drone went back to the pool and can serve someone else.
    let second = system.order_client.create_order(order_params()).await.unwrap();
    system.order_client.assign_drone(second, drone_id).await.unwrap();
    let drone = system.drone_client.get(drone_id).await.unwrap();
    assert_eq!(drone.reserved_by, Some(second));

    system.shutdown().await;
}

#[tokio::test]
async fn cancel_after_delivery_is_rejected() {
    let system = DispatchSystem::new(directories());
    let drone_id = system
        .drone_client
        .register(drone_params("DR-001"))
        .await
        .unwrap();
    let order_id = system.order_client.create_order(order_params()).await.unwrap();

    system.order_client.assign_drone(order_id, drone_id).await.unwrap();
    system.order_client.start_delivery(order_id).await.unwrap();
    system.order_client.mark_delivered(order_id).await.unwrap();

    let err = system.order_client.cancel(order_id, None).await.unwrap_err();
    assert_eq!(
        err,
        OrderError::InvalidTransition {
            from: OrderStatus::Delivered,
            to: OrderStatus::Canceled,
        }
    );

    system.shutdown().await;
}

#[tokio::test]
async fn manual_orders_ship_through_plain_transitions() {
    let system = DispatchSystem::new(directories());

    let mut params = order_params();
    params.delivery_method = Some(DeliveryMethod::Manual);
    let order_id = system.order_client.create_order(params).await.unwrap();

    let order = system.order_client.get(order_id).await.unwrap();
    assert_eq!(order.pickup_code, None);

    for target in [
        OrderStatus::Confirmed,
        OrderStatus::Packed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Completed,
    ] {
        system
            .order_client
            .apply_transition(order_id, target, None)
            .await
            .unwrap();
    }

    let order = system.order_client.get(order_id).await.unwrap();
    assert_eq!(order.status, OrderStatus::Completed);
    assert_eq!(order.timeline.len(), 6);

    system.shutdown().await;
}

#[tokio::test]
async fn fleet_guard_rails() {
    let system = DispatchSystem::new(directories());
    let drone_id = system
        .drone_client
        .register(drone_params("DR-001"))
        .await
        .unwrap();

    // Codes are unique across the registry.
    let err = system
        .drone_client
        .register(drone_params("DR-001"))
        .await
        .unwrap_err();
    assert!(matches!(err, DroneError::BadRequest(_)));

    // A drone serving an order cannot be decommissioned.
    let order_id = system.order_client.create_order(order_params()).await.unwrap();
    system.order_client.assign_drone(order_id, drone_id).await.unwrap();
    let err = system.drone_client.decommission(drone_id).await.unwrap_err();
    assert!(matches!(err, DroneError::InvalidState(_)));

    // Nor put into maintenance.
    let err = system
        .drone_client
        .set_status(drone_id, DroneStatus::Maintenance)
        .await
        .unwrap_err();
    assert!(matches!(err, DroneError::InvalidState(_)));

    // After the delivery completes, both are allowed again.
    system.order_client.start_delivery(order_id).await.unwrap();
    system.order_client.mark_delivered(order_id).await.unwrap();
    system
        .drone_client
        .set_status(drone_id, DroneStatus::Maintenance)
        .await
        .unwrap();
    let err = system
        .order_client
        .assign_drone(
            system.order_client.create_order(order_params()).await.unwrap(),
            drone_id,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Conflict(_)));

    system
        .drone_client
        .set_status(drone_id, DroneStatus::Idle)
        .await
        .unwrap();
    system.drone_client.decommission(drone_id).await.unwrap();

    let err = system.order_client.get(OrderId(99)).await.unwrap_err();
    assert!(matches!(err, OrderError::NotFound(_)));

    system.shutdown().await;
}
