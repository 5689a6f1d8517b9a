//! Authentication handlers
//!
//! Login distinguishes its failures deliberately: unknown username is 404,
//! wrong password is 401, and a correct password on an inactive account is
//! 403 — the wrong-password case never reveals account status.

use axum::{extract::State, http::StatusCode, Extension, Json};
use domain_identity::{hash_password, issue_token, verify_login, AccountStatus, TokenClaims};
use infra_db::{NewUser, UsersRepository};
use tracing::info;
use validator::Validate;

use crate::dto::auth::{
    LoginRequest, LoginResponse, SignupRequest, UserProfileResponse, UserSummary, VerifyResponse,
};
use crate::dto::MessageResponse;
use crate::error::ApiError;
use crate::handlers::current_user;
use crate::AppState;

/// Registers a new user account
///
/// Username and email collisions surface as 409 via the unique constraints.
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    request.validate()?;

    let password_hash = hash_password(&request.password)?;
    let user = UsersRepository::new(state.pool.clone())
        .create(NewUser {
            username: request.username,
            email: request.email,
            password_hash,
            name: request.name,
            mobile: request.mobile,
            address: request.address,
        })
        .await?;

    info!(username = %user.username, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::ok("User registered successfully")),
    ))
}

/// Authenticates a user and issues a bearer token
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = UsersRepository::new(state.pool.clone())
        .find_by_username(&request.username)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    verify_login(
        &request.password,
        &user.password_hash,
        AccountStatus::parse(&user.status),
    )?;

    let issued = issue_token(
        &user.username,
        &state.config.jwt_secret,
        state.config.jwt_expiration_secs,
    )?;

    info!(username = %user.username, "user logged in");
    Ok(Json(LoginResponse {
        success: true,
        token: issued.token,
        user: UserSummary {
            username: user.username,
            name: user.name,
            email: user.email,
        },
    }))
}

/// Revokes the presented token
///
/// The token's `jti` joins the revocation set until the token would have
/// expired anyway; verification of this exact token fails from here on.
pub async fn logout(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
) -> Result<Json<MessageResponse>, ApiError> {
    let jti = claims.token_id()?;
    state.revocations.revoke(jti, claims.expires_at()).await?;

    info!(username = %claims.sub, "user logged out");
    Ok(Json(MessageResponse::ok("Logged out successfully")))
}

/// Confirms the presented token and returns its subject
pub async fn verify(
    Extension(claims): Extension<TokenClaims>,
) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        success: true,
        username: claims.sub,
    })
}

/// Returns the authenticated user's stored profile
pub async fn user_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
) -> Result<Json<UserProfileResponse>, ApiError> {
    let user = current_user(&state, &claims).await?;

    Ok(Json(UserProfileResponse {
        username: user.username,
        email: user.email,
        name: user.name,
        mobile: user.mobile,
        address: user.address,
        role: user.role,
        status: user.status,
        created_at: user.created_at,
    }))
}
