use crate::{
    dto::products::{CreateProductRequest, ProductList},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Product,
    response::{ApiResponse, Meta},
    state::AppState,
    store::NewProduct,
};

pub async fn list_products(state: &AppState) -> AppResult<ApiResponse<ProductList>> {
    let items = state.products.list().await?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_product(state: &AppState, id: i32) -> AppResult<ApiResponse<Product>> {
    let product = state.products.read(id).await?;
    Ok(ApiResponse::success("Product", product, None))
}

pub async fn create_product(
    state: &AppState,
    actor: &AuthUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }

    let product = state
        .products
        .create(NewProduct {
            name: payload.name,
            price: payload.price,
        })
        .await?;

    tracing::info!(product_id = product.id, by = %actor.username, "product created");
    Ok(ApiResponse::success(
        "Product created",
        product,
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(
    state: &AppState,
    actor: &AuthUser,
    name: &str,
) -> AppResult<ApiResponse<Product>> {
    let product = state.products.delete(name).await?;
    tracing::info!(product_id = product.id, by = %actor.username, "product deleted");
    Ok(ApiResponse::success("Deleted", product, Some(Meta::empty())))
}
