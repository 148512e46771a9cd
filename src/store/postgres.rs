use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
    SqlErr, ActiveValue::NotSet,
};

use super::{
    NewProduct, NewUser, OrderProductStore, OrderStore, ProductStore, StoreError, StoreResult,
    UserStore, check_price, check_quantity,
};
use crate::{
    db::OrmConn,
    entity::{
        order_products::{
            ActiveModel as OrderProductActive, Model as OrderProductModel,
        },
        orders::{ActiveModel as OrderActive, Column as OrderCol, Model as OrderModel},
        products::{ActiveModel as ProductActive, Column as ProdCol, Model as ProductModel},
        users::{ActiveModel as UserActive, Column as UserCol, Model as UserModel},
        OrderProducts, Orders, Products, Users,
    },
    models::{Order, OrderProduct, OrderStatus, OrderWithProducts, Product, User},
};

/// PostgreSQL backend. Constraints in `migrations/` back up every check done here.
#[derive(Clone)]
pub struct PgStore {
    orm: OrmConn,
}

impl PgStore {
    pub fn new(orm: OrmConn) -> Self {
        Self { orm }
    }
}

/// Unique violations become conflicts, dangling references become validation errors.
fn on_insert(err: DbErr, conflict: &str) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::Conflict(conflict.into()),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            StoreError::Validation("referenced row does not exist".into())
        }
        _ => StoreError::Backend(err),
    }
}

/// A restricting foreign key means something still points at the row.
fn on_delete(err: DbErr, conflict: &str) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => StoreError::Conflict(conflict.into()),
        _ => StoreError::Backend(err),
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create(&self, user: NewUser) -> StoreResult<User> {
        let model = UserActive {
            id: NotSet,
            firstname: Set(user.firstname),
            lastname: Set(user.lastname),
            username: Set(user.username),
            password_hash: Set(user.password_hash),
            created_at: NotSet,
        }
        .insert(&self.orm)
        .await
        .map_err(|e| on_insert(e, "username already exists"))?;
        Ok(user_from_entity(model))
    }

    async fn read(&self, username: &str) -> StoreResult<User> {
        Users::find()
            .filter(UserCol::Username.eq(username))
            .one(&self.orm)
            .await?
            .map(user_from_entity)
            .ok_or(StoreError::NotFound)
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        let users = Users::find()
            .order_by_asc(UserCol::Id)
            .all(&self.orm)
            .await?
            .into_iter()
            .map(user_from_entity)
            .collect();
        Ok(users)
    }

    async fn delete(&self, username: &str) -> StoreResult<User> {
        let model = Users::find()
            .filter(UserCol::Username.eq(username))
            .one(&self.orm)
            .await?
            .ok_or(StoreError::NotFound)?;
        let result = model
            .clone()
            .delete(&self.orm)
            .await
            .map_err(|e| on_delete(e, "user still has orders"))?;
        if result.rows_affected == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(user_from_entity(model))
    }
}

#[async_trait]
impl ProductStore for PgStore {
    async fn create(&self, product: NewProduct) -> StoreResult<Product> {
        check_price(product.price)?;
        let model = ProductActive {
            id: NotSet,
            name: Set(product.name),
            price: Set(product.price),
            created_at: NotSet,
        }
        .insert(&self.orm)
        .await
        .map_err(|e| on_insert(e, "product name already exists"))?;
        Ok(product_from_entity(model))
    }

    async fn read(&self, id: i32) -> StoreResult<Product> {
        Products::find_by_id(id)
            .one(&self.orm)
            .await?
            .map(product_from_entity)
            .ok_or(StoreError::NotFound)
    }

    async fn list(&self) -> StoreResult<Vec<Product>> {
        let products = Products::find()
            .order_by_asc(ProdCol::Id)
            .all(&self.orm)
            .await?
            .into_iter()
            .map(product_from_entity)
            .collect();
        Ok(products)
    }

    async fn delete(&self, name: &str) -> StoreResult<Product> {
        let model = Products::find()
            .filter(ProdCol::Name.eq(name))
            .one(&self.orm)
            .await?
            .ok_or(StoreError::NotFound)?;
        let result = model
            .clone()
            .delete(&self.orm)
            .await
            .map_err(|e| on_delete(e, "product is still part of an order"))?;
        if result.rows_affected == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(product_from_entity(model))
    }
}

#[async_trait]
impl OrderStore for PgStore {
    async fn create(&self, status: OrderStatus, user_id: i32) -> StoreResult<Order> {
        if Users::find_by_id(user_id).one(&self.orm).await?.is_none() {
            return Err(StoreError::Validation(format!(
                "user {user_id} does not exist"
            )));
        }
        let model = OrderActive {
            id: NotSet,
            status: Set(status.as_str().to_string()),
            user_id: Set(user_id),
            created_at: NotSet,
        }
        .insert(&self.orm)
        .await
        .map_err(|e| on_insert(e, "order already exists"))?;
        order_from_entity(model)
    }

    async fn read(&self, id: i32) -> StoreResult<Order> {
        let model = Orders::find_by_id(id)
            .one(&self.orm)
            .await?
            .ok_or(StoreError::NotFound)?;
        order_from_entity(model)
    }

    async fn read_with_products(&self, id: i32) -> StoreResult<OrderWithProducts> {
        let (order, items) = Orders::find_by_id(id)
            .find_with_related(OrderProducts)
            .all(&self.orm)
            .await?
            .into_iter()
            .next()
            .ok_or(StoreError::NotFound)?;

        let mut products: Vec<OrderProduct> =
            items.into_iter().map(order_product_from_entity).collect();
        products.sort_by_key(|item| item.id);

        Ok(OrderWithProducts {
            order: order_from_entity(order)?,
            products,
        })
    }

    async fn list_all(&self) -> StoreResult<Vec<Order>> {
        Orders::find()
            .order_by_asc(OrderCol::Id)
            .all(&self.orm)
            .await?
            .into_iter()
            .map(order_from_entity)
            .collect()
    }

    async fn list_by_user(&self, user_id: i32) -> StoreResult<Vec<Order>> {
        Orders::find()
            .filter(OrderCol::UserId.eq(user_id))
            .order_by_asc(OrderCol::Id)
            .all(&self.orm)
            .await?
            .into_iter()
            .map(order_from_entity)
            .collect()
    }

    async fn delete(&self, id: i32) -> StoreResult<Order> {
        let model = Orders::find_by_id(id)
            .one(&self.orm)
            .await?
            .ok_or(StoreError::NotFound)?;
        // order_products rows go with it through ON DELETE CASCADE.
        let result = Orders::delete_by_id(id).exec(&self.orm).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::NotFound);
        }
        order_from_entity(model)
    }
}

#[async_trait]
impl OrderProductStore for PgStore {
    async fn create(
        &self,
        order_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> StoreResult<OrderProduct> {
        check_quantity(quantity)?;
        if Orders::find_by_id(order_id).one(&self.orm).await?.is_none() {
            return Err(StoreError::Validation(format!(
                "order {order_id} does not exist"
            )));
        }
        if Products::find_by_id(product_id).one(&self.orm).await?.is_none() {
            return Err(StoreError::Validation(format!(
                "product {product_id} does not exist"
            )));
        }
        let model = OrderProductActive {
            id: NotSet,
            order_id: Set(order_id),
            product_id: Set(product_id),
            quantity: Set(quantity),
            created_at: NotSet,
        }
        .insert(&self.orm)
        .await
        .map_err(|e| on_insert(e, "order product already exists"))?;
        Ok(order_product_from_entity(model))
    }

    async fn delete(&self, id: i32) -> StoreResult<OrderProduct> {
        let model = OrderProducts::find_by_id(id)
            .one(&self.orm)
            .await?
            .ok_or(StoreError::NotFound)?;
        let result = OrderProducts::delete_by_id(id).exec(&self.orm).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(order_product_from_entity(model))
    }
}

fn user_from_entity(model: UserModel) -> User {
    User {
        id: model.id,
        firstname: model.firstname,
        lastname: model.lastname,
        username: model.username,
        password_hash: model.password_hash,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        name: model.name,
        price: model.price,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn order_from_entity(model: OrderModel) -> StoreResult<Order> {
    let status = model
        .status
        .parse::<OrderStatus>()
        .map_err(|e| StoreError::Backend(DbErr::Type(e.to_string())))?;
    Ok(Order {
        id: model.id,
        status,
        user_id: model.user_id,
        created_at: model.created_at.with_timezone(&Utc),
    })
}

fn order_product_from_entity(model: OrderProductModel) -> OrderProduct {
    OrderProduct {
        id: model.id,
        order_id: model.order_id,
        product_id: model.product_id,
        quantity: model.quantity,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
