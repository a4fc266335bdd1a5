use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use tracing::{debug, info};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppQuery;
use crate::features::assets::dtos::{
    AttachmentMetadataQuery, UpdateResultDto, UploadAcknowledgementDto,
};
use crate::features::assets::models::Identifier;
use crate::features::assets::services::AssetService;
use crate::shared::types::ApiResponse;

const NO_FILE_UPLOADED: &str = "No file uploaded or missing form data.";

/// Update the stored filename and path for a master/instance pair
pub async fn update_attachment_metadata(
    State(service): State<Arc<dyn AssetService>>,
    AppQuery(query): AppQuery<AttachmentMetadataQuery>,
) -> Result<Json<ApiResponse<UpdateResultDto>>> {
    query.validate().map_err(|e| {
        debug!("Attachment metadata validation failed: {}", e);
        AppError::Validation(
            "Missing required parameters for attachment metadata update.".to_string(),
        )
    })?;

    let rows_affected = service
        .update_attachment_details(
            &query.master_id,
            &query.instance_id,
            &query.file_name,
            query.file_path.as_deref(),
        )
        .await?;

    if rows_affected == 0 {
        return Err(AppError::BadRequest(
            "Failed to update attachment metadata.".to_string(),
        ));
    }

    Ok(Json(ApiResponse::success(
        Some(UpdateResultDto { rows_affected }),
        Some("Attachment metadata updated successfully.".to_string()),
        None,
    )))
}

/// Accept an attachment upload
///
/// Accepts multipart/form-data with:
/// - `file`: The file (required, non-empty)
/// - `masterId`: Master identifier (required, non-zero)
/// - `instanceId`: Instance identifier (required, non-zero)
///
/// The content is counted and discarded. Callers record the stored
/// location through the metadata endpoint.
pub async fn upload_attachment_file(
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<ApiResponse<UploadAcknowledgementDto>>> {
    let mut multipart = multipart.map_err(|e| {
        debug!("Multipart request rejected: {}", e.body_text());
        AppError::BadRequest(NO_FILE_UPLOADED.to_string())
    })?;

    let mut file: Option<(String, u64)> = None;
    let mut master_id: Option<Identifier> = None;
    let mut instance_id: Option<Identifier> = None;

    // Process multipart fields
    while let Some(mut field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_ascii_lowercase();

        match field_name.as_str() {
            "file" => {
                let file_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());

                let mut size: u64 = 0;
                while let Some(chunk) = field.chunk().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })? {
                    size += chunk.len() as u64;
                }

                file = Some((file_name, size));
            }
            "masterid" => master_id = Some(read_identifier(field).await?),
            "instanceid" => instance_id = Some(read_identifier(field).await?),
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let (file_name, size) = file.filter(|(_, size)| *size > 0).ok_or_else(|| {
        AppError::BadRequest(NO_FILE_UPLOADED.to_string())
    })?;

    let (master_id, instance_id) = match (master_id, instance_id) {
        (Some(master), Some(instance)) if !master.is_unset() && !instance.is_unset() => {
            (master, instance)
        }
        _ => {
            return Err(AppError::BadRequest(
                "Missing MasterId or InstanceId in form data.".to_string(),
            ))
        }
    };

    info!(
        "Attachment {} ({} bytes) received for MasterID {}, InstanceID {}",
        file_name, size, master_id, instance_id
    );

    let message = format!(
        "File {} received. Metadata must be updated separately using the /attachment/metadata endpoint.",
        file_name
    );

    Ok(Json(ApiResponse::success(
        Some(UploadAcknowledgementDto {
            file_name,
            size,
            master_id: master_id.as_param(),
            instance_id: instance_id.as_param(),
        }),
        Some(message),
        None,
    )))
}

async fn read_identifier(field: axum::extract::multipart::Field<'_>) -> Result<Identifier> {
    let name = field.name().unwrap_or("").to_string();
    let text = field.text().await.map_err(|e| {
        AppError::BadRequest(format!("Failed to read {} field: {}", name, e))
    })?;
    Ok(Identifier::Text(text))
}

#[cfg(test)]
mod tests {
    use axum_test::multipart::{MultipartForm, Part};
    use serde_json::Value;

    use crate::shared::test_helpers::{test_server, MockAssetService};

    fn pdf_part(content: &'static [u8]) -> Part {
        Part::bytes(content)
            .file_name("handover.pdf")
            .mime_type("application/pdf")
    }

    #[tokio::test]
    async fn test_metadata_update_success() {
        let service = MockAssetService {
            rows_affected: 1,
            ..Default::default()
        };
        let (server, service) = test_server(service);

        let response = server
            .post("/api/asset/attachment/metadata")
            .add_query_param("masterId", "10")
            .add_query_param("instanceId", "20")
            .add_query_param("fileName", "handover.pdf")
            .add_query_param("filePath", "/wf/10/20")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["message"], "Attachment metadata updated successfully.");
        assert_eq!(
            service.calls(),
            vec!["update_attachment_details:10:20:handover.pdf:/wf/10/20".to_string()]
        );
    }

    #[tokio::test]
    async fn test_metadata_update_missing_params() {
        let service = MockAssetService {
            rows_affected: 1,
            ..Default::default()
        };
        let (server, service) = test_server(service);

        let response = server
            .post("/api/asset/attachment/metadata")
            .add_query_param("masterId", "10")
            .add_query_param("instanceId", "20")
            .await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(
            body["message"],
            "Missing required parameters for attachment metadata update."
        );
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn test_metadata_update_without_path_zero_rows() {
        let (server, service) = test_server(MockAssetService::default());

        let response = server
            .post("/api/asset/attachment/metadata")
            .add_query_param("masterId", "10")
            .add_query_param("instanceId", "20")
            .add_query_param("fileName", "handover.pdf")
            .await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["message"], "Failed to update attachment metadata.");
        assert_eq!(
            service.calls(),
            vec!["update_attachment_details:10:20:handover.pdf:-".to_string()]
        );
    }

    #[tokio::test]
    async fn test_upload_acknowledges_without_persisting() {
        let (server, service) = test_server(MockAssetService::default());

        let form = MultipartForm::new()
            .add_text("masterId", "10")
            .add_text("instanceId", "20")
            .add_part("file", pdf_part(b"%PDF-1.4 test"));

        let response = server
            .post("/api/asset/attachment/uploadfile")
            .multipart(form)
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(
            body["message"],
            "File handover.pdf received. Metadata must be updated separately using the /attachment/metadata endpoint."
        );
        assert_eq!(body["data"]["file_name"], "handover.pdf");
        assert_eq!(body["data"]["size"], 13);
        assert_eq!(body["data"]["master_id"], "10");
        assert_eq!(body["data"]["instance_id"], "20");
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn test_upload_accepts_pascal_case_fields() {
        let (server, _) = test_server(MockAssetService::default());

        let form = MultipartForm::new()
            .add_text("MasterId", "A100")
            .add_text("InstanceId", "B200")
            .add_part("File", pdf_part(b"x"));

        let response = server
            .post("/api/asset/attachment/uploadfile")
            .multipart(form)
            .await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_upload_requires_non_empty_file() {
        let (server, _) = test_server(MockAssetService::default());

        let form = MultipartForm::new()
            .add_text("masterId", "10")
            .add_text("instanceId", "20");
        let response = server
            .post("/api/asset/attachment/uploadfile")
            .multipart(form)
            .await;
        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["message"], "No file uploaded or missing form data.");

        let form = MultipartForm::new()
            .add_text("masterId", "10")
            .add_text("instanceId", "20")
            .add_part("file", pdf_part(b""));
        let response = server
            .post("/api/asset/attachment/uploadfile")
            .multipart(form)
            .await;
        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_upload_without_form_data_uses_envelope() {
        let (server, service) = test_server(MockAssetService::default());

        let response = server.post("/api/asset/attachment/uploadfile").await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "No file uploaded or missing form data.");
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn test_upload_requires_identifiers() {
        let (server, _) = test_server(MockAssetService::default());

        let form = MultipartForm::new()
            .add_text("masterId", "0")
            .add_text("instanceId", "20")
            .add_part("file", pdf_part(b"data"));
        let response = server
            .post("/api/asset/attachment/uploadfile")
            .multipart(form)
            .await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["message"], "Missing MasterId or InstanceId in form data.");

        let form = MultipartForm::new()
            .add_text("masterId", "10")
            .add_part("file", pdf_part(b"data"));
        let response = server
            .post("/api/asset/attachment/uploadfile")
            .multipart(form)
            .await;

        response.assert_status_bad_request();
    }
}
