use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        orders::{
            AddOrderProductRequest, CreateOrderRequest, DeleteOrderProductRequest,
            DeleteOrderRequest, OrderList,
        },
        products::{CreateProductRequest, DeleteProductRequest, ProductList},
        users::{
            AuthenticateRequest, CreateUserRequest, DeleteUserRequest, TokenResponse, UserList,
            UserWithToken,
        },
    },
    models::{Order, OrderProduct, OrderStatus, OrderWithProducts, Product, User},
    response::{ApiResponse, Meta},
    routes::{health, orders, params, products, users},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        users::create_user,
        users::authenticate,
        users::list_users,
        users::get_user,
        users::delete_user,
        products::list_products,
        products::get_product,
        products::create_product,
        products::delete_product,
        orders::list_orders,
        orders::create_order,
        orders::get_order,
        orders::delete_order,
        orders::add_order_product,
        orders::delete_order_product
    ),
    components(
        schemas(
            User,
            Product,
            Order,
            OrderStatus,
            OrderProduct,
            OrderWithProducts,
            CreateUserRequest,
            AuthenticateRequest,
            DeleteUserRequest,
            TokenResponse,
            UserWithToken,
            UserList,
            CreateProductRequest,
            DeleteProductRequest,
            ProductList,
            CreateOrderRequest,
            AddOrderProductRequest,
            DeleteOrderRequest,
            DeleteOrderProductRequest,
            OrderList,
            params::OrderListQuery,
            Meta,
            ApiResponse<Order>,
            ApiResponse<OrderList>,
            ApiResponse<OrderWithProducts>,
            ApiResponse<Product>,
            ApiResponse<ProductList>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Users", description = "User and token endpoints"),
        (name = "Products", description = "Product endpoints"),
        (name = "Orders", description = "Order and order product endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_resource_path() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/users",
            "/users/authenticate",
            "/products",
            "/orders",
            "/orders/products",
            "/orders/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
