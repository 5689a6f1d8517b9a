//! Insurance policy handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use core_kernel::UserId;
use domain_claims::PolicyStatus;
use domain_identity::TokenClaims;
use infra_db::{InsuranceRepository, NewInsurance};
use tracing::info;
use validator::Validate;

use crate::dto::insurance::{
    CreatePolicyRequest, CreatedResponse, PolicyNumbersQuery, PolicyNumbersResponse,
    PolicyResponse,
};
use crate::error::ApiError;
use crate::handlers::current_user;
use crate::AppState;

/// Registers a policy for the authenticated user
pub async fn create_policy(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Json(request): Json<CreatePolicyRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    request.validate()?;
    if request.insurance_to < request.insurance_from {
        return Err(ApiError::Validation(
            "insurance_to precedes insurance_from".to_string(),
        ));
    }

    let user = current_user(&state, &claims).await?;
    let id = InsuranceRepository::new(state.pool.clone())
        .create(NewInsurance {
            user_id: UserId::new(user.id),
            insurance_code: request.insurance_code.clone(),
            policy_number: request.policy_number.clone(),
            insurance_from: request.insurance_from,
            insurance_to: request.insurance_to,
            insurance_type: request.insurance_type,
            insured: request.insured,
            occupation: request.occupation,
            insurance_details: request.insurance_details,
        })
        .await?;

    info!(
        user = %user.username,
        insurance_code = %request.insurance_code,
        policy_number = %request.policy_number,
        "policy registered"
    );
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            success: true,
            message: "Policy registered successfully".to_string(),
            id,
        }),
    ))
}

/// Lists the authenticated user's policies
pub async fn list_policies(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
) -> Result<Json<Vec<PolicyResponse>>, ApiError> {
    let user = current_user(&state, &claims).await?;
    let rows = InsuranceRepository::new(state.pool.clone())
        .list_for_user(UserId::new(user.id))
        .await?;

    Ok(Json(
        rows.into_iter()
            .map(|r| PolicyResponse {
                id: r.id,
                insurance_code: r.insurance_code,
                policy_number: r.policy_number,
                insurance_from: r.insurance_from,
                insurance_to: r.insurance_to,
                insurance_type: r.insurance_type,
                insured: r.insured,
                occupation: r.occupation,
                insurance_details: r.insurance_details,
                status: PolicyStatus::parse(&r.status).as_str().to_string(),
                created_at: r.created_at,
            })
            .collect(),
    ))
}

/// Lists the policy numbers carried by one insurance code
pub async fn policy_numbers(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Query(query): Query<PolicyNumbersQuery>,
) -> Result<Json<PolicyNumbersResponse>, ApiError> {
    let user = current_user(&state, &claims).await?;
    let numbers = InsuranceRepository::new(state.pool.clone())
        .policy_numbers(UserId::new(user.id), &query.insurance_code)
        .await?;

    Ok(Json(PolicyNumbersResponse {
        success: true,
        insurance_code: query.insurance_code,
        policy_numbers: numbers,
    }))
}
