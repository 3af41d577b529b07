use axum::{
    extract::{Request, State},
    http::{Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::{
    dto::{CreatedUserResponse, UserInput, UserRecord},
    extractors::{JsonBody, UserId},
};
use crate::{error::ApiError, state::AppState};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route_layer(middleware::from_fn(reject_implicit_methods))
}

/// `get` also answers HEAD; only the listed methods are served here.
async fn reject_implicit_methods(req: Request, next: Next) -> Response {
    if req.method() == Method::HEAD || req.method() == Method::OPTIONS {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }
    next.run(req).await
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserRecord>>, ApiError> {
    let users = state.users.list().await?;
    Ok(Json(users))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<UserInput>,
) -> Result<Json<CreatedUserResponse>, ApiError> {
    let id = state.users.create(&payload).await?;
    info!(user_id = id, login = %payload.login, "user created");
    Ok(Json(CreatedUserResponse { id }))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> Result<Json<UserRecord>, ApiError> {
    match state.users.get(id).await? {
        Some(user) => Ok(Json(user)),
        None => {
            warn!(user_id = id, "user not found");
            Err(ApiError::NotFound)
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    UserId(id): UserId,
    JsonBody(payload): JsonBody<UserInput>,
) -> Result<StatusCode, ApiError> {
    if state.users.update(id, &payload).await? == 0 {
        warn!(user_id = id, "update of missing user");
        return Err(ApiError::NotFound);
    }
    info!(user_id = id, "user updated");
    Ok(StatusCode::OK)
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> Result<StatusCode, ApiError> {
    if state.users.delete(id).await? == 0 {
        warn!(user_id = id, "delete of missing user");
        return Err(ApiError::NotFound);
    }
    info!(user_id = id, "user deleted");
    Ok(StatusCode::OK)
}
