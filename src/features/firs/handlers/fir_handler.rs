use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::firs::dtos::{FirRegisteredDto, FirResponseDto, RegisterFirDto};
use crate::features::firs::services::FirService;
use crate::shared::types::{ApiResponse, Meta};

/// File a new FIR
///
/// The priority is assigned at filing time and never recomputed.
#[utoipa::path(
    post,
    path = "/api/firs",
    request_body = RegisterFirDto,
    responses(
        (status = 201, description = "FIR registered", body = ApiResponse<FirRegisteredDto>),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Classification or storage failure")
    ),
    tag = "firs"
)]
pub async fn register_fir(
    State(service): State<Arc<FirService>>,
    AppJson(dto): AppJson<RegisterFirDto>,
) -> Result<(StatusCode, Json<ApiResponse<FirRegisteredDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let registered = service.register(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(registered),
            Some("FIR registered".to_string()),
            None,
        )),
    ))
}

/// List FIRs filed by a submitter
#[utoipa::path(
    get,
    path = "/api/firs/by-submitter/{submitter_id}",
    params(
        ("submitter_id" = String, Path, description = "Submitter identifier")
    ),
    responses(
        (status = 200, description = "Submitter's FIRs, most recent first", body = ApiResponse<Vec<FirResponseDto>>),
        (status = 500, description = "Storage failure")
    ),
    tag = "firs"
)]
pub async fn list_firs_by_submitter(
    State(service): State<Arc<FirService>>,
    Path(submitter_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<FirResponseDto>>>> {
    let firs = service.list_by_submitter(&submitter_id).await?;
    let meta = Meta::total_of(&firs);
    Ok(Json(ApiResponse::success(Some(firs), None, Some(meta))))
}

/// List all FIRs for review, High priority first
#[utoipa::path(
    get,
    path = "/api/firs",
    responses(
        (status = 200, description = "All FIRs ordered by priority", body = ApiResponse<Vec<FirResponseDto>>),
        (status = 500, description = "Storage failure")
    ),
    tag = "firs"
)]
pub async fn list_all_firs(
    State(service): State<Arc<FirService>>,
) -> Result<Json<ApiResponse<Vec<FirResponseDto>>>> {
    let firs = service.list_all().await?;
    let meta = Meta::total_of(&firs);
    Ok(Json(ApiResponse::success(Some(firs), None, Some(meta))))
}

/// List High priority FIRs, most recently filed first
#[utoipa::path(
    get,
    path = "/api/firs/alerts",
    responses(
        (status = 200, description = "High priority FIRs", body = ApiResponse<Vec<FirResponseDto>>),
        (status = 500, description = "Storage failure")
    ),
    tag = "firs"
)]
pub async fn list_priority_alerts(
    State(service): State<Arc<FirService>>,
) -> Result<Json<ApiResponse<Vec<FirResponseDto>>>> {
    let firs = service.list_priority_alerts().await?;
    let meta = Meta::total_of(&firs);
    Ok(Json(ApiResponse::success(Some(firs), None, Some(meta))))
}
