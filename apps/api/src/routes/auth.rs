//! Registration and login.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::{info, warn};

use crate::auth::{hash_password, verify_password};
use crate::dto::{AuthResponse, LoginRequest, RegisterRequest, UserDto};
use crate::error::{ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::AppState;
use sweetify_core::validation::{validate_password, validate_username};
use sweetify_core::{Role, User};

fn auth_response(state: &AppState, user: User) -> ApiResult<AuthResponse> {
    let token = state.jwt().issue(&user.id, user.role)?;
    Ok(AuthResponse {
        user: UserDto::from(user),
        token,
    })
}

/// `POST /api/auth/register`
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let username = req.username.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    validate_username(&username)?;
    validate_password(&password)?;
    let username = username.trim();

    let role = match req.role.as_deref() {
        None | Some("") => Role::default(),
        Some(raw) => raw.parse::<Role>()?,
    };

    if state.db().users().get_by_username(username).await?.is_some() {
        return Err(ApiError::Conflict("Username already exists".to_string()));
    }

    let password_hash = hash_password(&password)?;
    // A concurrent registration can still win the race; the UNIQUE index
    // turns that into the same Conflict via From<DbError>.
    let user = state
        .db()
        .users()
        .create(username, &password_hash, role)
        .await?;

    info!(user_id = %user.id, username = %user.username, role = %user.role, "User registered");

    Ok((StatusCode::CREATED, Json(auth_response(&state, user)?)))
}

/// `POST /api/auth/login`
///
/// Unknown usernames and wrong passwords produce the same response.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let (Some(username), Some(password)) = (req.username, req.password) else {
        return Err(ApiError::Validation(
            "Please provide username and password".to_string(),
        ));
    };

    let user = state.db().users().get_by_username(username.trim()).await?;

    match user {
        Some(user) if verify_password(&password, &user.password_hash) => {
            info!(user_id = %user.id, "User logged in");
            Ok(Json(auth_response(&state, user)?))
        }
        _ => {
            warn!(username = %username, "Failed login attempt");
            Err(ApiError::InvalidCredentials)
        }
    }
}
