//! Claims handlers
//!
//! Claim intake and the two submission paths that converge on the same
//! tables: the step-by-step wizard (image step, then details step) and the
//! combined submission that takes details plus a batch of images in one
//! multipart request. The combined path persists everything in a single
//! transaction; a failure anywhere rolls the whole submission back.

use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    Extension, Json,
};
use core_kernel::{ClaimId, PropertyDetailsId, UserId};
use domain_claims::{validate_claims_code, ClaimStatus, PolicyRef, SubmissionStage};
use domain_identity::TokenClaims;
use domain_valuation::{apply_exchange_rate, compute_value};
use infra_db::{
    ClaimsRepository, NewAssessment, NewClaim, NewOverride, NewPropertyDetails, NewPropertyImage,
    OverridesRepository, SubmissionRepository,
};
use rust_decimal::Decimal;
use tracing::{info, warn};
use validator::Validate;

use crate::dto::claims::{
    ClaimSummary, ClaimsCodesQuery, ClaimsCodesResponse, CreateClaimRequest, ImageResult,
    OverrideRequest, PropertyDetailsRequest, PropertySubmissionResponse, ReviewRequest,
    SubmitFinalResponse, WizardImageResponse,
};
use crate::dto::MessageResponse;
use crate::error::ApiError;
use crate::handlers::{current_user, read_multipart};
use crate::pipeline::{analyze_one, BatchOutcome, ImageFailure};
use crate::storage::{file_format, stored_name};
use crate::AppState;

fn decimal_from_f64(value: f64, field: &str) -> Result<Decimal, ApiError> {
    Decimal::from_f64_retain(value)
        .ok_or_else(|| ApiError::Validation(format!("field '{}' is not a valid number", field)))
}

/// Files a new claim against a policy referenced by value
///
/// A duplicate claims code is a 409; the unique constraint decides races.
pub async fn create_claim(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Json(request): Json<CreateClaimRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    request.validate()?;
    validate_claims_code(&request.claims_code)?;
    let policy = PolicyRef::new(&request.insurance_code, &request.policy_number)?;

    let user = current_user(&state, &claims).await?;
    ClaimsRepository::new(state.pool.clone())
        .create(NewClaim {
            user_id: UserId::new(user.id),
            claims_code: request.claims_code.trim().to_string(),
            insurance_code: policy.insurance_code,
            policy_number: policy.policy_number,
            claim_details: request.claim_details,
            time_of_loss: request.time_of_loss,
            situation_of_loss: request.situation_of_loss,
            cause_of_loss: request.cause_of_loss,
        })
        .await?;

    info!(user = %user.username, claims_code = %request.claims_code, "claim filed");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::ok("Claim filed successfully")),
    ))
}

/// Lists the user's claims with policy fields and latest recommended value
pub async fn list_claims(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
) -> Result<Json<Vec<ClaimSummary>>, ApiError> {
    let user = current_user(&state, &claims).await?;
    let rows = ClaimsRepository::new(state.pool.clone())
        .list_with_values(UserId::new(user.id))
        .await?;

    Ok(Json(
        rows.into_iter()
            .map(|r| ClaimSummary {
                id: r.id,
                claims_code: r.claims_code,
                insurance_code: r.insurance_code,
                policy_number: r.policy_number,
                claim_details: r.claim_details,
                time_of_loss: r.time_of_loss,
                status: ClaimStatus::parse(&r.status).as_str().to_string(),
                created_at: r.created_at,
                insurance_type: r.insurance_type,
                insured: r.insured,
                claim_recommended: r.claim_recommended,
            })
            .collect(),
    ))
}

/// Lists the claims codes the user has filed against one policy number
pub async fn claims_for_policy(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Query(query): Query<ClaimsCodesQuery>,
) -> Result<Json<ClaimsCodesResponse>, ApiError> {
    let user = current_user(&state, &claims).await?;
    let codes = ClaimsRepository::new(state.pool.clone())
        .codes_for_policy(UserId::new(user.id), &query.policy_number)
        .await?;

    Ok(Json(ClaimsCodesResponse {
        success: true,
        policy_number: query.policy_number,
        claims_codes: codes,
    }))
}

/// Wizard image step: analyze and persist one photograph
///
/// Single-image path: a decode or classifier failure fails the whole
/// request. Measurement soft-fails and is recorded as zeros.
pub async fn submit_image(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    multipart: Multipart,
) -> Result<Json<WizardImageResponse>, ApiError> {
    let form = read_multipart(multipart).await?;
    let claims_code = form.require("claims_code")?.to_string();
    let file_desc = form.optional("file_desc");
    let (original_name, bytes) = form
        .files
        .first()
        .ok_or_else(|| ApiError::missing_field("image"))?;

    let user = current_user(&state, &claims).await?;
    let claims_repo = ClaimsRepository::new(state.pool.clone());
    let claim = claims_repo.get_by_code(UserId::new(user.id), &claims_code).await?;

    let analysis = analyze_one(
        state.classifier.as_ref(),
        state.measurer.as_ref(),
        original_name,
        bytes,
    )?;

    let name = stored_name(original_name, None);
    let path = state.images.save(&name, bytes).await?;

    let submissions = SubmissionRepository::new(state.pool.clone());
    let mut tx = submissions.begin().await?;

    // The image step can run before the details step; park the image under
    // a placeholder details row that the details step later fills in.
    let details_id = match claims_repo.latest_property_details(ClaimId::new(claim.id)).await? {
        Some(details) => PropertyDetailsId::new(details.id),
        None => {
            submissions
                .insert_property_details(
                    &mut tx,
                    &NewPropertyDetails {
                        claims_id: ClaimId::new(claim.id),
                        property_type: None,
                        wall_type: None,
                        damage_area: 0.0,
                        damage_length: 0.0,
                        damage_breadth: 0.0,
                        damage_height: 1.0,
                        rate_per_sqft: Decimal::ZERO,
                    },
                )
                .await?
        }
    };

    submissions
        .insert_image(
            &mut tx,
            &NewPropertyImage {
                claim_property_details_id: details_id,
                file_name: name.clone(),
                file_location: Some(path.to_string_lossy().into_owned()),
                file_format: file_format(&name),
                file_desc,
            },
        )
        .await?;

    let c = &analysis.classification;
    submissions
        .insert_assessment(
            &mut tx,
            &NewAssessment {
                claims_id: ClaimId::new(claim.id),
                ai_decision: c.predicted_class.clone(),
                confidence: c.confidence,
                crack_percent: c.crack_percent,
                non_crack_percent: c.non_crack_percent,
            },
        )
        .await?;

    tx.commit()
        .await
        .map_err(|e| ApiError::Database(e.to_string()))?;

    let progress = claims_repo.progress(ClaimId::new(claim.id)).await?;
    let stage = SubmissionStage::from_progress(
        progress.has_details,
        progress.image_count as u64,
        progress.has_value,
    );

    info!(user = %user.username, claims_code = %claims_code, image = %name, "wizard image stored");
    Ok(Json(WizardImageResponse {
        success: true,
        message: "Image analyzed and stored".to_string(),
        claims_code,
        stage: stage.as_str().to_string(),
        result: ImageResult::from_analysis(&analysis, Some(name)),
    }))
}

/// Wizard details step: property details, value computation, finalization
///
/// The recommended value is the submitted damage area times the rate, with
/// the configured exchange rate applied once when conversion is requested.
/// This step finalizes the claim: value stored, status flipped to active.
pub async fn submit_property(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Json(request): Json<PropertyDetailsRequest>,
) -> Result<Json<PropertySubmissionResponse>, ApiError> {
    request.validate()?;

    let user = current_user(&state, &claims).await?;
    let claims_repo = ClaimsRepository::new(state.pool.clone());
    let claim = claims_repo.get_by_code(UserId::new(user.id), &request.claims_code).await?;

    let area = decimal_from_f64(request.damage_area, "damage_area")?;
    let mut value = compute_value(area, request.rate_per_sqft);
    if request.convert_currency {
        let rate = decimal_from_f64(state.config.exchange_rate, "exchange_rate")?;
        value = apply_exchange_rate(value, rate)?;
    }

    let details = NewPropertyDetails {
        claims_id: ClaimId::new(claim.id),
        property_type: request.property_type,
        wall_type: request.wall_type,
        damage_area: request.damage_area,
        damage_length: request.damage_length,
        damage_breadth: request.damage_breadth,
        damage_height: request.damage_height,
        rate_per_sqft: request.rate_per_sqft,
    };

    let submissions = SubmissionRepository::new(state.pool.clone());
    let mut tx = submissions.begin().await?;

    match claims_repo.latest_property_details(ClaimId::new(claim.id)).await? {
        Some(existing) => {
            submissions
                .update_property_details(&mut tx, PropertyDetailsId::new(existing.id), &details)
                .await?
        }
        None => {
            submissions.insert_property_details(&mut tx, &details).await?;
        }
    }

    submissions
        .insert_claim_value(&mut tx, ClaimId::new(claim.id), &claim.claims_code, value)
        .await?;
    submissions.activate_claim(&mut tx, ClaimId::new(claim.id)).await?;

    tx.commit()
        .await
        .map_err(|e| ApiError::Database(e.to_string()))?;

    info!(
        user = %user.username,
        claims_code = %claim.claims_code,
        claim_recommended = %value,
        "wizard details finalized"
    );
    Ok(Json(PropertySubmissionResponse {
        success: true,
        message: "Property details saved, claim finalized".to_string(),
        claims_code: claim.claims_code,
        claim_recommended: value,
        stage: SubmissionStage::Finalized.as_str().to_string(),
    }))
}

/// Combined submission: details plus a batch of images in one request
///
/// Per-image analysis failures are recorded and the batch continues; the
/// persisted assessment aggregates the group (mean confidence over the
/// classified images, decision and class percentages from the last
/// processed image). The recommended value comes from the submitted damage
/// area and rate, not from the measured pixels.
pub async fn submit_final(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    multipart: Multipart,
) -> Result<Json<SubmitFinalResponse>, ApiError> {
    let form = read_multipart(multipart).await?;
    let claims_code = form.require("claims_code")?.to_string();
    let damage_area = form.parse_f64("damage_area")?;
    let rate_per_sqft: Decimal = form
        .require("rate_per_sqft")?
        .parse()
        .map_err(|_| ApiError::Validation("field 'rate_per_sqft' must be a number".to_string()))?;
    let damage_length = form.parse_f64_or("damage_length", 0.0)?;
    let damage_breadth = form.parse_f64_or("damage_breadth", 0.0)?;
    let damage_height = form.parse_f64_or("damage_height", 1.0)?;

    if form.files.is_empty() {
        return Err(ApiError::missing_field("images"));
    }

    let user = current_user(&state, &claims).await?;
    let claims_repo = ClaimsRepository::new(state.pool.clone());
    let claim = claims_repo.get_by_code(UserId::new(user.id), &claims_code).await?;

    // Analyze and store as one indexed pass. A failed image is recorded
    // and skipped: no file, no row, and the batch continues.
    let mut outcome = BatchOutcome::default();
    let mut stored: Vec<(String, std::path::PathBuf)> = Vec::new();
    for (idx, (original_name, bytes)) in form.files.iter().enumerate() {
        match analyze_one(
            state.classifier.as_ref(),
            state.measurer.as_ref(),
            original_name,
            bytes,
        ) {
            Ok(analysis) => {
                let name = stored_name(original_name, Some(idx));
                let path = state.images.save(&name, bytes).await?;
                stored.push((name, path));
                outcome.analyses.push(analysis);
            }
            Err(e) => {
                warn!(image = %original_name, error = %e, "image analysis failed, continuing batch");
                outcome.failures.push(ImageFailure {
                    original_name: original_name.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    if outcome.processed() == 0 {
        return Err(ApiError::Validation(
            "none of the uploaded images could be processed".to_string(),
        ));
    }

    let area = decimal_from_f64(damage_area, "damage_area")?;
    let value = compute_value(area, rate_per_sqft);

    let submissions = SubmissionRepository::new(state.pool.clone());
    let mut tx = submissions.begin().await?;

    let details_id = submissions
        .insert_property_details(
            &mut tx,
            &NewPropertyDetails {
                claims_id: ClaimId::new(claim.id),
                property_type: form.optional("property_type"),
                wall_type: form.optional("wall_type"),
                damage_area,
                damage_length,
                damage_breadth,
                damage_height,
                rate_per_sqft,
            },
        )
        .await?;

    for (name, path) in &stored {
        submissions
            .insert_image(
                &mut tx,
                &NewPropertyImage {
                    claim_property_details_id: details_id,
                    file_name: name.clone(),
                    file_location: Some(path.to_string_lossy().into_owned()),
                    file_format: file_format(name),
                    file_desc: None,
                },
            )
            .await?;
    }

    // Group aggregate: mean confidence across classified images; the last
    // image's decision and percentages are the cost basis, kept exactly.
    let confidence = outcome
        .mean_confidence()
        .ok_or_else(|| ApiError::Internal("no confidence for processed batch".to_string()))?;
    let last = outcome
        .last_classification()
        .ok_or_else(|| ApiError::Internal("no classification for processed batch".to_string()))?;
    submissions
        .insert_assessment(
            &mut tx,
            &NewAssessment {
                claims_id: ClaimId::new(claim.id),
                ai_decision: last.predicted_class.clone(),
                confidence,
                crack_percent: last.crack_percent,
                non_crack_percent: last.non_crack_percent,
            },
        )
        .await?;

    submissions
        .insert_claim_value(&mut tx, ClaimId::new(claim.id), &claim.claims_code, value)
        .await?;
    submissions.activate_claim(&mut tx, ClaimId::new(claim.id)).await?;

    tx.commit()
        .await
        .map_err(|e| ApiError::Database(e.to_string()))?;

    let mut results: Vec<ImageResult> = outcome
        .analyses
        .iter()
        .zip(stored.iter())
        .map(|(analysis, (name, _))| ImageResult::from_analysis(analysis, Some(name.clone())))
        .collect();
    results.extend(outcome.failures.iter().map(ImageResult::failed));

    info!(
        user = %user.username,
        claims_code = %claim.claims_code,
        total = outcome.total(),
        processed = outcome.processed(),
        claim_recommended = %value,
        "combined submission finalized"
    );
    Ok(Json(SubmitFinalResponse {
        success: true,
        message: "Claim submission finalized".to_string(),
        claims_code: claim.claims_code,
        total_images: outcome.total(),
        processed_images: outcome.processed(),
        confidence: Some(confidence),
        ai_decision: Some(last.predicted_class.clone()),
        claim_recommended: value,
        results,
    }))
}

/// Records a human review against the claim's latest assessment
pub async fn review(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Json(request): Json<ReviewRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    request.validate()?;

    let user = current_user(&state, &claims).await?;
    let claim = ClaimsRepository::new(state.pool.clone())
        .get_by_code(UserId::new(user.id), &request.claims_code)
        .await?;

    SubmissionRepository::new(state.pool.clone())
        .record_review(
            ClaimId::new(claim.id),
            &request.user_inference,
            request.final_damage_area,
            request.final_damage_cost,
        )
        .await?;

    info!(user = %user.username, claims_code = %request.claims_code, "assessment reviewed");
    Ok(Json(MessageResponse::ok("Review recorded")))
}

/// Upserts a manual per-image override
///
/// Keyed by (claim, image index); saving twice for the same slot rewrites
/// the row in place, last write wins.
pub async fn save_manual_override(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Json(request): Json<OverrideRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    request.validate()?;

    let user = current_user(&state, &claims).await?;
    let claim = ClaimsRepository::new(state.pool.clone())
        .get_by_code(UserId::new(user.id), &request.claims_code)
        .await?;

    OverridesRepository::new(state.pool.clone())
        .upsert(NewOverride {
            claims_id: ClaimId::new(claim.id),
            image_index: request.image_index,
            image_filename: request.image_filename,
            ai_decision: request.ai_decision,
            confidence: request.confidence,
            length_ft: request.length_ft,
            width_ft: request.width_ft,
            area_sqft: request.area_sqft,
            claim_recommended: request.claim_recommended,
            crack_detected: request.crack_detected,
        })
        .await?;

    info!(
        user = %user.username,
        claims_code = %request.claims_code,
        image_index = request.image_index,
        "manual override saved"
    );
    Ok(Json(MessageResponse::ok("Override saved")))
}
