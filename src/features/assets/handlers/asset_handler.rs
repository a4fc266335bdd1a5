use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppQuery;
use crate::features::assets::dtos::AttachmentPathQuery;
use crate::features::assets::models::Asset;
use crate::features::assets::services::AssetService;
use crate::modules::procedures::Record;
use crate::shared::types::{ApiResponse, Meta};

/// Get asset details by instance id
pub async fn get_asset(
    State(service): State<Arc<dyn AssetService>>,
    Path(instance_id): Path<String>,
) -> Result<Json<ApiResponse<Asset>>> {
    let asset = service
        .get_asset_by_instance_id(&instance_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Asset details not found for Instance ID: {}",
                instance_id
            ))
        })?;

    Ok(Json(ApiResponse::success(Some(asset), None, None)))
}

/// Get attachment path rows for a master/instance pair
///
/// Both `masterId` and `instanceId` query parameters are required.
pub async fn get_attachment_path(
    State(service): State<Arc<dyn AssetService>>,
    AppQuery(query): AppQuery<AttachmentPathQuery>,
) -> Result<Json<ApiResponse<Vec<Record>>>> {
    let (Some(master_id), Some(instance_id)) = (
        non_blank(query.master_id.as_deref()),
        non_blank(query.instance_id.as_deref()),
    ) else {
        return Err(AppError::BadRequest(
            "Both masterId and instanceId query parameters are required.".to_string(),
        ));
    };

    let records = service
        .get_attachment_path(master_id, instance_id)
        .await?;

    if records.is_empty() {
        return Err(AppError::NotFound(format!(
            "Attachment path not found for MasterID: {}, InstanceID: {}",
            master_id, instance_id
        )));
    }

    Ok(rows_response(records))
}

/// Get master id lookup rows
pub async fn get_asset_master_id(
    State(service): State<Arc<dyn AssetService>>,
    Path((master_id, instance_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<Vec<Record>>>> {
    let records = service
        .get_asset_master_id(&master_id, &instance_id)
        .await?;

    if records.is_empty() {
        return Err(AppError::NotFound(format!(
            "Master ID data not found for MasterID: {}, InstanceID: {}",
            master_id, instance_id
        )));
    }

    Ok(rows_response(records))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn rows_response(records: Vec<Record>) -> Json<ApiResponse<Vec<Record>>> {
    let meta = Meta {
        total: records.len() as i64,
    };
    Json(ApiResponse::success(Some(records), None, Some(meta)))
}
