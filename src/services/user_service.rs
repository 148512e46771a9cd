use crate::{
    dto::users::{AuthenticateRequest, CreateUserRequest, TokenResponse, UserList, UserWithToken},
    error::{AppError, AppResult},
    middleware::auth::{AuthError, AuthUser},
    models::User,
    response::{ApiResponse, Meta},
    state::AppState,
    store::{NewUser, StoreError},
};

pub async fn create_user(
    state: &AppState,
    payload: CreateUserRequest,
) -> AppResult<ApiResponse<UserWithToken>> {
    let CreateUserRequest {
        firstname,
        lastname,
        username,
        password,
    } = payload;

    let fields = [
        ("firstname", &firstname),
        ("lastname", &lastname),
        ("username", &username),
        ("password", &password),
    ];
    if let Some((name, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(AppError::BadRequest(format!("{name} must not be empty")));
    }

    let password_hash = state
        .hasher
        .hash(&password)
        .map_err(|e| AppError::Internal(e.into()))?;

    let user = state
        .users
        .create(NewUser {
            firstname,
            lastname,
            username,
            password_hash,
        })
        .await?;

    let token = state.tokens.issue(&user)?;
    tracing::info!(user_id = user.id, username = %user.username, "user created");

    Ok(ApiResponse::success(
        "User created",
        UserWithToken { user, token },
        Some(Meta::empty()),
    ))
}

pub async fn authenticate(
    state: &AppState,
    payload: AuthenticateRequest,
) -> AppResult<ApiResponse<TokenResponse>> {
    let AuthenticateRequest { username, password } = payload;

    let user = match state.users.read(&username).await {
        Ok(user) => user,
        Err(StoreError::NotFound) => return Err(AuthError::InvalidCredentials.into()),
        Err(err) => return Err(err.into()),
    };

    if !state.hasher.verify(&password, &user.password_hash) {
        tracing::debug!(username = %username, "password mismatch");
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = state.tokens.issue(&user)?;
    Ok(ApiResponse::success(
        "Authenticated",
        TokenResponse { token },
        Some(Meta::empty()),
    ))
}

pub async fn list_users(state: &AppState) -> AppResult<ApiResponse<UserList>> {
    let items = state.users.list().await?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Users", UserList { items }, Some(meta)))
}

pub async fn get_user(state: &AppState, username: &str) -> AppResult<ApiResponse<User>> {
    let user = state.users.read(username).await?;
    Ok(ApiResponse::success("User", user, Some(Meta::empty())))
}

pub async fn delete_user(
    state: &AppState,
    actor: &AuthUser,
    username: &str,
) -> AppResult<ApiResponse<User>> {
    let user = state.users.delete(username).await?;
    tracing::info!(user_id = user.id, by = %actor.username, "user deleted");
    Ok(ApiResponse::success("Deleted", user, Some(Meta::empty())))
}
