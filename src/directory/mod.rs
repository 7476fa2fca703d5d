//! External collaborators consumed by the order actor.
//!
//! The surrounding platform (menu catalog, canteen administration, user
//! accounts) is simple record management owned elsewhere; this core only
//! needs lookup and existence calls. Each collaborator is a narrow
//! `#[async_trait]` trait held as `Arc<dyn …>` in the order actor's injected
//! context, so tests and the demo binary can swap in the in-memory
//! [`StaticDirectory`] without touching the actors.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Menu snapshot for one food item, priced in minor currency units.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodInfo {
    pub name: String,
    pub unit_price_cents: i64,
}

/// Display enrichment for one customer.
#[derive(Debug, Clone, PartialEq)]
pub struct UserInfo {
    pub name: String,
    pub phone: String,
}

/// Menu catalog: consulted once per line item at order creation to snapshot
/// name and price. Never consulted afterwards.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn lookup_food(&self, food_id: u64) -> Option<FoodInfo>;
}

/// Canteen directory: existence check and display name only.
#[async_trait]
pub trait CanteenDirectory: Send + Sync {
    async fn canteen_exists(&self, canteen_id: u64) -> bool;
    async fn canteen_name(&self, canteen_id: u64) -> Option<String>;
}

/// User directory: existence check and display enrichment only.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn user_exists(&self, customer_id: u64) -> bool;
    async fn user_display_info(&self, customer_id: u64) -> Option<UserInfo>;
}

/// The bundle of collaborator handles the order actor runs with.
#[derive(Clone)]
pub struct Directories {
    pub catalog: Arc<dyn Catalog>,
    pub canteens: Arc<dyn CanteenDirectory>,
    pub users: Arc<dyn UserDirectory>,
}

/// In-memory implementation of all three collaborators, for tests and the
/// demo binary.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    foods: HashMap<u64, FoodInfo>,
    canteens: HashMap<u64, String>,
    users: HashMap<u64, UserInfo>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_food(mut self, food_id: u64, name: &str, unit_price_cents: i64) -> Self {
        self.foods.insert(
            food_id,
            FoodInfo {
                name: name.to_string(),
                unit_price_cents,
            },
        );
        self
    }

    pub fn with_canteen(mut self, canteen_id: u64, name: &str) -> Self {
        self.canteens.insert(canteen_id, name.to_string());
        self
    }

    pub fn with_user(mut self, customer_id: u64, name: &str, phone: &str) -> Self {
        self.users.insert(
            customer_id,
            UserInfo {
                name: name.to_string(),
                phone: phone.to_string(),
            },
        );
        self
    }

    /// Wraps this directory into the handle bundle the order actor expects.
    pub fn into_directories(self) -> Directories {
        let shared = Arc::new(self);
        Directories {
            catalog: shared.clone(),
            canteens: shared.clone(),
            users: shared,
        }
    }
}

#[async_trait]
impl Catalog for StaticDirectory {
    async fn lookup_food(&self, food_id: u64) -> Option<FoodInfo> {
        self.foods.get(&food_id).cloned()
    }
}

#[async_trait]
impl CanteenDirectory for StaticDirectory {
    async fn canteen_exists(&self, canteen_id: u64) -> bool {
        self.canteens.contains_key(&canteen_id)
    }

    async fn canteen_name(&self, canteen_id: u64) -> Option<String> {
        self.canteens.get(&canteen_id).cloned()
    }
}

#[async_trait]
impl UserDirectory for StaticDirectory {
    async fn user_exists(&self, customer_id: u64) -> bool {
        self.users.contains_key(&customer_id)
    }

    async fn user_display_info(&self, customer_id: u64) -> Option<UserInfo> {
        self.users.get(&customer_id).cloned()
    }
}
