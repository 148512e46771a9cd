use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::flexible_id;
use crate::models::{Order, OrderStatus};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub status: OrderStatus,
    #[serde(deserialize_with = "flexible_id")]
    pub user_id: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddOrderProductRequest {
    pub quantity: i32,
    #[serde(deserialize_with = "flexible_id")]
    pub order_id: i32,
    #[serde(deserialize_with = "flexible_id")]
    pub product_id: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOrderRequest {
    #[serde(deserialize_with = "flexible_id")]
    pub order_id: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOrderProductRequest {
    #[serde(deserialize_with = "flexible_id")]
    pub order_product_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct OrderList {
    #[schema(value_type = Vec<Order>)]
    pub items: Vec<Order>,
}
