use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, error};

use crate::core::error::{AppError, Result};
use crate::features::assets::dtos::AssetUpdateDto;
use crate::features::assets::models::{Asset, Identifier};
use crate::modules::procedures::{ProcedureCall, Record, ScalarValue};

pub const GET_ASSET_DATA_BY_MASTER_ID: &str = "Asset Management_GetAssetDataByMasterID";
pub const GET_ATTACHMENT_PATH_BY_MASTER_ID: &str = "AssetManagement_GetAttachmentPathByMasterID";
pub const GET_ASSET_MASTER_ID: &str = "Asset Management_GetAssetMasterID";
pub const UPDATE_ASSET_DATA: &str = "AssetManagement_UpdateAssetData";
pub const UPDATE_STATUS_ON_INWARD: &str = "AssetManagement_UpdateStatusOnInward";
pub const UPDATE_ATTACHMENT_DETAILS_BY_WF: &str = "AssetManagement_updateAttachmentDetailsByWF";

/// Data access for the asset approval workflow.
///
/// Every method is a single stored procedure call.
#[async_trait]
pub trait AssetService: Send + Sync {
    /// First row of the asset data procedure, `None` when it yields nothing
    async fn get_asset_by_instance_id(&self, instance_id: &str) -> Result<Option<Asset>>;

    async fn get_attachment_path(&self, master_id: &str, instance_id: &str)
        -> Result<Vec<Record>>;

    async fn get_asset_master_id(&self, master_id: &str, instance_id: &str)
        -> Result<Vec<Record>>;

    /// General approval/rejection, returns affected rows
    async fn update_asset_data(&self, update: &AssetUpdateDto) -> Result<u64>;

    /// Inward approval/rejection, returns affected rows
    async fn update_status_on_inward(&self, update: &AssetUpdateDto) -> Result<u64>;

    async fn update_attachment_details(
        &self,
        master_id: &str,
        instance_id: &str,
        file_name: &str,
        file_path: Option<&str>,
    ) -> Result<u64>;
}

/// [`AssetService`] backed by PostgreSQL routines
pub struct PgAssetService {
    pool: PgPool,
}

impl PgAssetService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_records(&self, call: ProcedureCall) -> Result<Vec<Record>> {
        // Connection goes back to the pool when dropped at the end of the call
        let mut conn = self.pool.acquire().await?;

        let records = call.fetch_records(&mut conn).await.map_err(|e| {
            error!("Procedure {} failed: {:?}", call.name(), e);
            AppError::Database(e)
        })?;

        debug!("Procedure {} returned {} rows", call.name(), records.len());
        Ok(records)
    }

    async fn execute(&self, call: ProcedureCall) -> Result<u64> {
        let mut conn = self.pool.acquire().await?;

        let result = call.fetch_first(&mut conn).await.map_err(|e| {
            error!("Procedure {} failed: {:?}", call.name(), e);
            AppError::Database(e)
        })?;

        let rows_affected = rows_affected(call.name(), result.as_ref())?;
        debug!("Procedure {} affected {} rows", call.name(), rows_affected);
        Ok(rows_affected)
    }
}

#[async_trait]
impl AssetService for PgAssetService {
    async fn get_asset_by_instance_id(&self, instance_id: &str) -> Result<Option<Asset>> {
        let mut conn = self.pool.acquire().await?;
        let call = asset_data_call(instance_id);

        let record = call.fetch_first(&mut conn).await.map_err(|e| {
            error!("Procedure {} failed: {:?}", call.name(), e);
            AppError::Database(e)
        })?;

        Ok(record.as_ref().map(Asset::from_record))
    }

    async fn get_attachment_path(
        &self,
        master_id: &str,
        instance_id: &str,
    ) -> Result<Vec<Record>> {
        self.fetch_records(pair_lookup_call(
            GET_ATTACHMENT_PATH_BY_MASTER_ID,
            master_id,
            instance_id,
        ))
        .await
    }

    async fn get_asset_master_id(
        &self,
        master_id: &str,
        instance_id: &str,
    ) -> Result<Vec<Record>> {
        self.fetch_records(pair_lookup_call(GET_ASSET_MASTER_ID, master_id, instance_id))
            .await
    }

    async fn update_asset_data(&self, update: &AssetUpdateDto) -> Result<u64> {
        self.execute(general_approval_call(update)).await
    }

    async fn update_status_on_inward(&self, update: &AssetUpdateDto) -> Result<u64> {
        self.execute(inward_approval_call(update)).await
    }

    async fn update_attachment_details(
        &self,
        master_id: &str,
        instance_id: &str,
        file_name: &str,
        file_path: Option<&str>,
    ) -> Result<u64> {
        self.execute(attachment_details_call(
            master_id,
            instance_id,
            file_name,
            file_path,
        ))
        .await
    }
}

fn asset_data_call(instance_id: &str) -> ProcedureCall {
    ProcedureCall::new(GET_ASSET_DATA_BY_MASTER_ID).text("InstanceID", instance_id.to_string())
}

fn pair_lookup_call(procedure: &'static str, master_id: &str, instance_id: &str) -> ProcedureCall {
    ProcedureCall::new(procedure)
        .text("MasterID", master_id.to_string())
        .text("InstanceID", instance_id.to_string())
}

fn identifier_param(id: Option<&Identifier>) -> Option<String> {
    id.map(Identifier::as_param)
}

fn general_approval_call(update: &AssetUpdateDto) -> ProcedureCall {
    ProcedureCall::new(UPDATE_ASSET_DATA)
        .boolean("PhysicalVerification", update.physical_verification)
        .boolean("PhysicalVerificationApp", update.physical_verification_app)
        .int("Status", update.status)
        .text("Comments", update.comments.clone())
        .text("MasterID", identifier_param(update.master_id.as_ref()))
        .text("InstanceID", identifier_param(update.instance_id.as_ref()))
}

fn inward_approval_call(update: &AssetUpdateDto) -> ProcedureCall {
    ProcedureCall::new(UPDATE_STATUS_ON_INWARD)
        .boolean("PhysicalVerification", update.physical_verification)
        .boolean("PhysicalVerificationApp", update.physical_verification_app)
        .int("Status", update.status)
        .text("Comments", update.comments.clone())
        .text("MasterID", identifier_param(update.master_id.as_ref()))
        .text("InstanceID", identifier_param(update.instance_id.as_ref()))
        .int("RID", update.rid)
        .int("AMTID", update.amt_id)
}

fn attachment_details_call(
    master_id: &str,
    instance_id: &str,
    file_name: &str,
    file_path: Option<&str>,
) -> ProcedureCall {
    ProcedureCall::new(UPDATE_ATTACHMENT_DETAILS_BY_WF)
        .text("MasterID", master_id.to_string())
        .text("InstanceID", instance_id.to_string())
        .text("FileName", file_name.to_string())
        .text("FilePath", file_path.map(str::to_string))
}

/// Write routines report their affected-row count in the first column.
/// No row or a null count means nothing changed.
fn rows_affected(procedure: &str, result: Option<&Record>) -> Result<u64> {
    match result.and_then(Record::first) {
        None | Some(ScalarValue::Null) => Ok(0),
        Some(value) => value
            .as_i64()
            .map(|n| n.max(0) as u64)
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "{} returned a non-numeric row count: {:?}",
                    procedure, value
                ))
            }),
    }
}
