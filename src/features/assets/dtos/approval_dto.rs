use serde::{Deserialize, Serialize};

use crate::features::assets::models::Identifier;

/// Approval or rejection payload for the general and inward approval endpoints.
///
/// Field names follow the workflow client's casing (`MasterID`, `RID`, ...);
/// camelCase spellings are accepted too.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetUpdateDto {
    #[serde(rename = "MasterID", alias = "masterId", alias = "masterID", default)]
    pub master_id: Option<Identifier>,

    #[serde(
        rename = "InstanceID",
        alias = "instanceId",
        alias = "instanceID",
        default
    )]
    pub instance_id: Option<Identifier>,

    #[serde(
        rename = "PhysicalVerification",
        alias = "physicalVerification",
        default
    )]
    pub physical_verification: bool,

    #[serde(
        rename = "PhysicalVerificationApp",
        alias = "physicalVerificationApp",
        default
    )]
    pub physical_verification_app: bool,

    #[serde(rename = "Status", alias = "status", default)]
    pub status: i32,

    #[serde(rename = "Comments", alias = "comments", default)]
    pub comments: Option<String>,

    /// Asset record id, only consumed by the inward procedure
    #[serde(rename = "RID", alias = "rid", default)]
    pub rid: i32,

    /// Asset master table id, only consumed by the inward procedure
    #[serde(rename = "AMTID", alias = "amtid", alias = "amtId", default)]
    pub amt_id: i32,
}

impl AssetUpdateDto {
    pub fn has_master_id(&self) -> bool {
        Identifier::is_present(self.master_id.as_ref())
    }
}

/// Result of a write procedure
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateResultDto {
    pub rows_affected: u64,
}
