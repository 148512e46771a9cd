//! Persistence seams for the four tables.
//!
//! Each trait owns one table. Cross-table checks (an order's user, a line
//! item's order and product) are done by the implementation at insert time.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Order, OrderProduct, OrderStatus, OrderWithProducts, Product, User};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not Found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error")]
    Backend(#[from] sea_orm::DbErr),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone)]
pub struct NewUser {
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: i64,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: NewUser) -> StoreResult<User>;

    async fn read(&self, username: &str) -> StoreResult<User>;

    async fn list(&self) -> StoreResult<Vec<User>>;

    /// Returns the removed row. Fails with `Conflict` while the user owns orders.
    async fn delete(&self, username: &str) -> StoreResult<User>;
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn create(&self, product: NewProduct) -> StoreResult<Product>;

    async fn read(&self, id: i32) -> StoreResult<Product>;

    async fn list(&self) -> StoreResult<Vec<Product>>;

    /// Returns the removed row. Fails with `Conflict` while order products reference it.
    async fn delete(&self, name: &str) -> StoreResult<Product>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn create(&self, status: OrderStatus, user_id: i32) -> StoreResult<Order>;

    async fn read(&self, id: i32) -> StoreResult<Order>;

    async fn read_with_products(&self, id: i32) -> StoreResult<OrderWithProducts>;

    async fn list_all(&self) -> StoreResult<Vec<Order>>;

    async fn list_by_user(&self, user_id: i32) -> StoreResult<Vec<Order>>;

    /// Removes the order and every order product that belongs to it.
    async fn delete(&self, id: i32) -> StoreResult<Order>;
}

#[async_trait]
pub trait OrderProductStore: Send + Sync {
    async fn create(&self, order_id: i32, product_id: i32, quantity: i32)
    -> StoreResult<OrderProduct>;

    async fn delete(&self, id: i32) -> StoreResult<OrderProduct>;
}

pub(crate) fn check_price(price: i64) -> StoreResult<()> {
    if price < 0 {
        return Err(StoreError::Validation("price must not be negative".into()));
    }
    Ok(())
}

pub(crate) fn check_quantity(quantity: i32) -> StoreResult<()> {
    if quantity <= 0 {
        return Err(StoreError::Validation(
            "quantity must be greater than 0".into(),
        ));
    }
    Ok(())
}
