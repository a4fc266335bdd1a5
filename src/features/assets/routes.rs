use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::features::assets::handlers::{
    get_asset, get_asset_master_id, get_attachment_path, update_asset_general,
    update_asset_inward, update_attachment_metadata, upload_attachment_file,
};
use crate::features::assets::services::AssetService;

/// Allowance for multipart boundaries and form fields on top of the file itself
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Create routes for the asset approval feature
pub fn routes(service: Arc<dyn AssetService>, max_upload_size: usize) -> Router {
    Router::new()
        .route("/api/asset/attachmentpath", get(get_attachment_path))
        .route(
            "/api/asset/masterid/{master_id}/{instance_id}",
            get(get_asset_master_id),
        )
        .route("/api/asset/approval/general", put(update_asset_general))
        .route("/api/asset/approval/inward", put(update_asset_inward))
        .route(
            "/api/asset/attachment/metadata",
            post(update_attachment_metadata),
        )
        .route(
            "/api/asset/attachment/uploadfile",
            post(upload_attachment_file)
                .layer(DefaultBodyLimit::max(max_upload_size + MULTIPART_OVERHEAD)),
        )
        .route("/api/asset/{instance_id}", get(get_asset))
        .with_state(service)
}
