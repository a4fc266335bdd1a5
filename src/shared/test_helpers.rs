use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;

use crate::core::error::{AppError, Result};
use crate::features::assets::dtos::AssetUpdateDto;
use crate::features::assets::models::{Asset, Identifier};
use crate::features::assets::{routes, AssetService};
use crate::modules::procedures::Record;

const TEST_MAX_UPLOAD_SIZE: usize = 1024 * 1024;

/// In-memory [`AssetService`] returning canned results and recording every call
#[derive(Default)]
pub struct MockAssetService {
    pub asset: Option<Asset>,
    pub attachment_rows: Vec<Record>,
    pub master_rows: Vec<Record>,
    pub rows_affected: u64,
    /// Fail every call with a database error
    pub fail: bool,
    pub(crate) calls: Mutex<Vec<String>>,
}

impl MockAssetService {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

fn id(value: Option<&Identifier>) -> String {
    value.map(Identifier::as_param).unwrap_or_else(|| "-".to_string())
}

#[async_trait]
impl AssetService for MockAssetService {
    async fn get_asset_by_instance_id(&self, instance_id: &str) -> Result<Option<Asset>> {
        self.record(format!("get_asset_by_instance_id:{}", instance_id))?;
        Ok(self.asset.clone())
    }

    async fn get_attachment_path(
        &self,
        master_id: &str,
        instance_id: &str,
    ) -> Result<Vec<Record>> {
        self.record(format!("get_attachment_path:{}:{}", master_id, instance_id))?;
        Ok(self.attachment_rows.clone())
    }

    async fn get_asset_master_id(
        &self,
        master_id: &str,
        instance_id: &str,
    ) -> Result<Vec<Record>> {
        self.record(format!("get_asset_master_id:{}:{}", master_id, instance_id))?;
        Ok(self.master_rows.clone())
    }

    async fn update_asset_data(&self, update: &AssetUpdateDto) -> Result<u64> {
        self.record(format!(
            "update_asset_data:{}:{}",
            id(update.master_id.as_ref()),
            id(update.instance_id.as_ref())
        ))?;
        Ok(self.rows_affected)
    }

    async fn update_status_on_inward(&self, update: &AssetUpdateDto) -> Result<u64> {
        self.record(format!(
            "update_status_on_inward:{}:{}:{}:{}",
            id(update.master_id.as_ref()),
            id(update.instance_id.as_ref()),
            update.rid,
            update.amt_id
        ))?;
        Ok(self.rows_affected)
    }

    async fn update_attachment_details(
        &self,
        master_id: &str,
        instance_id: &str,
        file_name: &str,
        file_path: Option<&str>,
    ) -> Result<u64> {
        self.record(format!(
            "update_attachment_details:{}:{}:{}:{}",
            master_id,
            instance_id,
            file_name,
            file_path.unwrap_or("-")
        ))?;
        Ok(self.rows_affected)
    }
}

/// Serve the asset routes over the given mock, returning the mock for call inspection
pub fn test_server(service: MockAssetService) -> (TestServer, Arc<MockAssetService>) {
    let service = Arc::new(service);
    let shared: Arc<dyn AssetService> = service.clone();
    let server = TestServer::new(routes(shared, TEST_MAX_UPLOAD_SIZE)).unwrap();
    (server, service)
}
