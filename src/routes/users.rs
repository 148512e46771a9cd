use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::{
    dto::users::{
        AuthenticateRequest, CreateUserRequest, DeleteUserRequest, TokenResponse, UserList,
        UserWithToken,
    },
    error::AppResult,
    middleware::{auth::AuthUser, json::JsonBody},
    models::User,
    response::ApiResponse,
    services::user_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(list_users).post(create_user).delete(delete_user),
        )
        .route("/users/authenticate", post(authenticate))
        .route("/users/{username}", get(get_user))
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "Created user and a token for it", body = ApiResponse<UserWithToken>),
        (status = 400, description = "Missing or empty field"),
        (status = 409, description = "Username already taken")
    ),
    tag = "Users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateUserRequest>,
) -> AppResult<Json<ApiResponse<UserWithToken>>> {
    let resp = user_service::create_user(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/users/authenticate",
    request_body = AuthenticateRequest,
    responses(
        (status = 200, description = "Token for the user", body = ApiResponse<TokenResponse>),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Users"
)]
pub async fn authenticate(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<AuthenticateRequest>,
) -> AppResult<Json<ApiResponse<TokenResponse>>> {
    let resp = user_service::authenticate(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "List users", body = ApiResponse<UserList>),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn list_users(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<UserList>>> {
    let resp = user_service::list_users(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/users/{username}",
    params(
        ("username" = String, Path, description = "Username")
    ),
    responses(
        (status = 200, description = "Get user", body = ApiResponse<User>),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(username): Path<String>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::get_user(&state, &username).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/users",
    request_body = DeleteUserRequest,
    responses(
        (status = 200, description = "Deleted user", body = ApiResponse<User>),
        (status = 404, description = "User not found"),
        (status = 409, description = "User still has orders")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(payload): JsonBody<DeleteUserRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::delete_user(&state, &user, &payload.username).await?;
    Ok(Json(resp))
}
