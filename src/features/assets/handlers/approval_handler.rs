use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::{debug, info};

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppJsonRejection};
use crate::features::assets::dtos::{AssetUpdateDto, UpdateResultDto};
use crate::features::assets::services::AssetService;
use crate::shared::types::ApiResponse;

const INVALID_APPROVAL_DATA: &str = "Invalid approval data.";

/// Apply a general approval or rejection
pub async fn update_asset_general(
    State(service): State<Arc<dyn AssetService>>,
    payload: std::result::Result<AppJson<AssetUpdateDto>, AppJsonRejection>,
) -> Result<Json<ApiResponse<UpdateResultDto>>> {
    let dto = approval_payload(payload)?;

    let rows_affected = service.update_asset_data(&dto).await?;
    if rows_affected == 0 {
        return Err(AppError::BadRequest(
            "Failed to update asset data (General Approval).".to_string(),
        ));
    }

    info!(
        "General approval applied for MasterID {:?}: {} rows",
        dto.master_id, rows_affected
    );
    Ok(Json(ApiResponse::success(
        Some(UpdateResultDto { rows_affected }),
        Some("Asset data updated successfully (General Approval).".to_string()),
        None,
    )))
}

/// Apply an inward approval or rejection
pub async fn update_asset_inward(
    State(service): State<Arc<dyn AssetService>>,
    payload: std::result::Result<AppJson<AssetUpdateDto>, AppJsonRejection>,
) -> Result<Json<ApiResponse<UpdateResultDto>>> {
    let dto = approval_payload(payload)?;

    let rows_affected = service.update_status_on_inward(&dto).await?;
    if rows_affected == 0 {
        return Err(AppError::BadRequest(
            "Failed to update asset status (Inward Approval).".to_string(),
        ));
    }

    info!(
        "Inward approval applied for MasterID {:?}: {} rows",
        dto.master_id, rows_affected
    );
    Ok(Json(ApiResponse::success(
        Some(UpdateResultDto { rows_affected }),
        Some("Asset status updated successfully (Inward Approval).".to_string()),
        None,
    )))
}

/// Both approval endpoints reject a missing body and an unset master id
/// before anything reaches the database
fn approval_payload(
    payload: std::result::Result<AppJson<AssetUpdateDto>, AppJsonRejection>,
) -> Result<AssetUpdateDto> {
    let AppJson(dto) = payload.map_err(|rejection| {
        debug!("Rejected approval payload: {}", rejection.detail());
        AppError::BadRequest(INVALID_APPROVAL_DATA.to_string())
    })?;

    if !dto.has_master_id() {
        return Err(AppError::BadRequest(INVALID_APPROVAL_DATA.to_string()));
    }

    Ok(dto)
}
