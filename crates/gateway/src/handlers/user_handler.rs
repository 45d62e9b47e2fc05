//! User handlers.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use common::{AppError, AppResult};
use domain::User;

use crate::extractors::{UserId, ValidatedJson};
use crate::state::AppState;

/// User creation request with validation
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    /// Display name
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    #[schema(example = "John Doe")]
    pub name: String,
    /// Email address, unique across users
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "john.doe@example.com")]
    pub email: String,
}

/// Identifier assigned to a newly created user
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateUserResponse {
    pub id: Uuid,
}

/// User update request with validation
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    /// New display name
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    #[schema(example = "Jane Doe")]
    pub name: String,
    /// New email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane.doe@example.com")]
    pub email: String,
}

/// Search query string
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Case-insensitive substring of the user name
    pub name: Option<String>,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(search_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = CreateUserResponse),
        (status = 400, description = "Malformed body or validation error"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<CreateUserResponse>)> {
    tracing::info!("Received request to create user");

    let id = state
        .user_service
        .add(payload.name, payload.email)
        .await
        .map_err(|e| {
            tracing::error!("Error creating user: {}", e);
            AppError::from(e)
        })?;

    tracing::info!(user_id = %id, "User created successfully");
    Ok((StatusCode::CREATED, Json(CreateUserResponse { id })))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User profile", body = User),
        (status = 400, description = "Invalid ID format"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> AppResult<Json<User>> {
    tracing::info!(user_id = %id, "Received request to get user");

    let user = state.user_service.get_by_id(id).await.map_err(|e| {
        tracing::error!("Error getting user: {}", e);
        AppError::from(e)
    })?;

    if user.is_empty() {
        tracing::info!(user_id = %id, "User not found");
        return Err(AppError::NotFound);
    }

    Ok(Json(user))
}

/// Update user name and email
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated successfully"),
        (status = 400, description = "Invalid ID, malformed body or validation error"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    UserId(id): UserId,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<StatusCode> {
    tracing::info!(user_id = %id, "Received request to update user");

    state
        .user_service
        .update(id, payload.name, payload.email)
        .await
        .map_err(|e| {
            tracing::error!(user_id = %id, "Error updating user: {}", e);
            AppError::from(e)
        })?;

    tracing::info!(user_id = %id, "User updated successfully");
    Ok(StatusCode::OK)
}

/// Delete user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted successfully"),
        (status = 400, description = "Invalid ID format"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> AppResult<StatusCode> {
    tracing::info!(user_id = %id, "Received request to delete user");

    state.user_service.delete(id).await.map_err(|e| {
        tracing::error!(user_id = %id, "Error deleting user: {}", e);
        AppError::from(e)
    })?;

    tracing::info!(user_id = %id, "User deleted successfully");
    Ok(StatusCode::OK)
}

/// Search users by name
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching users", body = Vec<User>),
        (status = 400, description = "Missing name parameter")
    )
)]
pub async fn search_users(
    State(state): State<AppState>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> AppResult<Json<Vec<User>>> {
    let Query(params) = query?;

    let name = match params.name {
        Some(name) if !name.is_empty() => name,
        _ => {
            tracing::error!("Error: name parameter is required");
            return Err(AppError::bad_request("name parameter is required"));
        }
    };

    tracing::info!(name = %name, "Received request to search users");

    let users = state.user_service.search(&name).await.map_err(|e| {
        tracing::error!("Error searching users: {}", e);
        AppError::from(e)
    })?;

    tracing::info!(count = users.len(), name = %name, "Search completed");
    Ok(Json(users))
}
