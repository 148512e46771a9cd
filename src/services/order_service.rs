use crate::{
    dto::orders::{
        AddOrderProductRequest, CreateOrderRequest, DeleteOrderProductRequest,
        DeleteOrderRequest, OrderList,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Order, OrderProduct, OrderWithProducts},
    response::{ApiResponse, Meta},
    routes::params::OrderListQuery,
    state::AppState,
};

pub async fn create_order(
    state: &AppState,
    actor: &AuthUser,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    let order = state
        .orders
        .create(payload.status, payload.user_id)
        .await?;

    tracing::info!(
        order_id = order.id,
        user_id = order.user_id,
        status = %order.status,
        by = %actor.username,
        "order created"
    );
    Ok(ApiResponse::success("Order created", order, Some(Meta::empty())))
}

pub async fn list_orders(
    state: &AppState,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let items = match query.user_id {
        Some(user_id) => state.orders.list_by_user(user_id).await?,
        None => state.orders.list_all().await?,
    };
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Ok", OrderList { items }, Some(meta)))
}

pub async fn get_order(state: &AppState, id: i32) -> AppResult<ApiResponse<OrderWithProducts>> {
    let order = state.orders.read_with_products(id).await?;
    Ok(ApiResponse::success("OK", order, Some(Meta::empty())))
}

pub async fn add_product(
    state: &AppState,
    actor: &AuthUser,
    payload: AddOrderProductRequest,
) -> AppResult<ApiResponse<OrderProduct>> {
    let item = state
        .order_products
        .create(payload.order_id, payload.product_id, payload.quantity)
        .await?;

    tracing::info!(
        order_product_id = item.id,
        order_id = item.order_id,
        product_id = item.product_id,
        quantity = item.quantity,
        by = %actor.username,
        "product added to order"
    );
    Ok(ApiResponse::success(
        "Product added to order",
        item,
        Some(Meta::empty()),
    ))
}

pub async fn remove_product(
    state: &AppState,
    actor: &AuthUser,
    payload: DeleteOrderProductRequest,
) -> AppResult<ApiResponse<OrderProduct>> {
    let item = state
        .order_products
        .delete(payload.order_product_id)
        .await?;

    tracing::info!(order_product_id = item.id, by = %actor.username, "order product deleted");
    Ok(ApiResponse::success("Deleted", item, Some(Meta::empty())))
}

pub async fn delete_order(
    state: &AppState,
    actor: &AuthUser,
    payload: DeleteOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    let order = state.orders.delete(payload.order_id).await?;
    tracing::info!(order_id = order.id, by = %actor.username, "order deleted");
    Ok(ApiResponse::success("Deleted", order, Some(Meta::empty())))
}
