use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{
    NewProduct, NewUser, OrderProductStore, OrderStore, ProductStore, StoreError, StoreResult,
    UserStore, check_price, check_quantity,
};
use crate::models::{Order, OrderProduct, OrderStatus, OrderWithProducts, Product, User};

/// Process-local backend holding every table behind one lock.
///
/// Ids come from per-table sequences that start at 1 and are never reused,
/// the same way `SERIAL` columns behave.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    products: BTreeMap<i32, Product>,
    orders: BTreeMap<i32, Order>,
    order_products: BTreeMap<i32, OrderProduct>,
    seq: Sequences,
}

#[derive(Default)]
struct Sequences {
    users: i32,
    products: i32,
    orders: i32,
    order_products: i32,
}

fn next_id(seq: &mut i32) -> i32 {
    *seq += 1;
    *seq
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, user: NewUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(StoreError::Conflict("username already exists".into()));
        }
        let id = next_id(&mut tables.seq.users);
        let user = User {
            id,
            firstname: user.firstname,
            lastname: user.lastname,
            username: user.username,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn read(&self, username: &str) -> StoreResult<User> {
        let tables = self.tables.read().await;
        tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().cloned().collect())
    }

    async fn delete(&self, username: &str) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        let id = tables
            .users
            .values()
            .find(|u| u.username == username)
            .map(|u| u.id)
            .ok_or(StoreError::NotFound)?;
        if tables.orders.values().any(|o| o.user_id == id) {
            return Err(StoreError::Conflict("user still has orders".into()));
        }
        tables.users.remove(&id).ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn create(&self, product: NewProduct) -> StoreResult<Product> {
        check_price(product.price)?;
        let mut tables = self.tables.write().await;
        if tables.products.values().any(|p| p.name == product.name) {
            return Err(StoreError::Conflict("product name already exists".into()));
        }
        let id = next_id(&mut tables.seq.products);
        let product = Product {
            id,
            name: product.name,
            price: product.price,
            created_at: Utc::now(),
        };
        tables.products.insert(id, product.clone());
        Ok(product)
    }

    async fn read(&self, id: i32) -> StoreResult<Product> {
        let tables = self.tables.read().await;
        tables.products.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn list(&self) -> StoreResult<Vec<Product>> {
        let tables = self.tables.read().await;
        Ok(tables.products.values().cloned().collect())
    }

    async fn delete(&self, name: &str) -> StoreResult<Product> {
        let mut tables = self.tables.write().await;
        let id = tables
            .products
            .values()
            .find(|p| p.name == name)
            .map(|p| p.id)
            .ok_or(StoreError::NotFound)?;
        if tables.order_products.values().any(|op| op.product_id == id) {
            return Err(StoreError::Conflict(
                "product is still part of an order".into(),
            ));
        }
        tables.products.remove(&id).ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn create(&self, status: OrderStatus, user_id: i32) -> StoreResult<Order> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user_id) {
            return Err(StoreError::Validation(format!(
                "user {user_id} does not exist"
            )));
        }
        let id = next_id(&mut tables.seq.orders);
        let order = Order {
            id,
            status,
            user_id,
            created_at: Utc::now(),
        };
        tables.orders.insert(id, order.clone());
        Ok(order)
    }

    async fn read(&self, id: i32) -> StoreResult<Order> {
        let tables = self.tables.read().await;
        tables.orders.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn read_with_products(&self, id: i32) -> StoreResult<OrderWithProducts> {
        let tables = self.tables.read().await;
        let order = tables.orders.get(&id).cloned().ok_or(StoreError::NotFound)?;
        let products = tables
            .order_products
            .values()
            .filter(|op| op.order_id == id)
            .cloned()
            .collect();
        Ok(OrderWithProducts { order, products })
    }

    async fn list_all(&self) -> StoreResult<Vec<Order>> {
        let tables = self.tables.read().await;
        Ok(tables.orders.values().cloned().collect())
    }

    async fn list_by_user(&self, user_id: i32) -> StoreResult<Vec<Order>> {
        let tables = self.tables.read().await;
        Ok(tables
            .orders
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: i32) -> StoreResult<Order> {
        let mut tables = self.tables.write().await;
        let order = tables.orders.remove(&id).ok_or(StoreError::NotFound)?;
        tables.order_products.retain(|_, op| op.order_id != id);
        Ok(order)
    }
}

#[async_trait]
impl OrderProductStore for MemoryStore {
    async fn create(
        &self,
        order_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> StoreResult<OrderProduct> {
        check_quantity(quantity)?;
        let mut tables = self.tables.write().await;
        if !tables.orders.contains_key(&order_id) {
            return Err(StoreError::Validation(format!(
                "order {order_id} does not exist"
            )));
        }
        if !tables.products.contains_key(&product_id) {
            return Err(StoreError::Validation(format!(
                "product {product_id} does not exist"
            )));
        }
        let id = next_id(&mut tables.seq.order_products);
        let item = OrderProduct {
            id,
            order_id,
            product_id,
            quantity,
            created_at: Utc::now(),
        };
        tables.order_products.insert(id, item.clone());
        Ok(item)
    }

    async fn delete(&self, id: i32) -> StoreResult<OrderProduct> {
        let mut tables = self.tables.write().await;
        tables.order_products.remove(&id).ok_or(StoreError::NotFound)
    }
}
