use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};

use crate::{
    dto::orders::{
        AddOrderProductRequest, CreateOrderRequest, DeleteOrderProductRequest,
        DeleteOrderRequest, OrderList,
    },
    error::AppResult,
    middleware::{auth::AuthUser, json::JsonBody},
    models::{Order, OrderProduct, OrderWithProducts},
    response::ApiResponse,
    routes::params::OrderListQuery,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/orders",
            get(list_orders).post(create_order).delete(delete_order),
        )
        .route(
            "/orders/products",
            post(add_order_product).delete(delete_order_product),
        )
        .route("/orders/{id}", get(get_order))
}

#[utoipa::path(
    get,
    path = "/orders",
    params(OrderListQuery),
    responses(
        (status = 200, description = "All orders, or one user's orders", body = ApiResponse<OrderList>)
    ),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::list_orders(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Created order", body = ApiResponse<Order>),
        (status = 400, description = "Unknown user or bad status"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(payload): JsonBody<CreateOrderRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = order_service::create_order(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = i32, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order with its products", body = ApiResponse<OrderWithProducts>),
        (status = 404, description = "Order not found")
    ),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<OrderWithProducts>>> {
    let resp = order_service::get_order(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/orders",
    request_body = DeleteOrderRequest,
    responses(
        (status = 200, description = "Deleted order, its products went with it", body = ApiResponse<Order>),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn delete_order(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(payload): JsonBody<DeleteOrderRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = order_service::delete_order(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/orders/products",
    request_body = AddOrderProductRequest,
    responses(
        (status = 200, description = "Created order product", body = ApiResponse<OrderProduct>),
        (status = 400, description = "Unknown order or product, or quantity below 1"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn add_order_product(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(payload): JsonBody<AddOrderProductRequest>,
) -> AppResult<Json<ApiResponse<OrderProduct>>> {
    let resp = order_service::add_product(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/orders/products",
    request_body = DeleteOrderProductRequest,
    responses(
        (status = 200, description = "Deleted order product", body = ApiResponse<OrderProduct>),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Order product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn delete_order_product(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(payload): JsonBody<DeleteOrderProductRequest>,
) -> AppResult<Json<ApiResponse<OrderProduct>>> {
    let resp = order_service::remove_product(&state, &user, payload).await?;
    Ok(Json(resp))
}
