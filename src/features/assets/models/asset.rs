use serde::{Deserialize, Serialize};

use crate::modules::procedures::{Record, ScalarValue};

/// Read-only projection of one asset record as returned by
/// `Asset Management_GetAssetDataByMasterID`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    // Employee details
    pub name: Option<String>,
    pub date: Option<String>,

    // Asset details
    pub type_of_asset: Option<String>,
    pub carry_out_request_no: Option<String>,
    pub project_name: Option<String>,
    pub institute: Option<String>,
    pub model_name: Option<String>,
    pub model_code: Option<String>,
    pub asset_number: Option<String>,
    pub imei: Option<String>,
    pub serial_no: Option<String>,
    pub initiator_status: Option<String>,

    // Attachment and state details
    pub physical_verification: Option<String>,
    #[serde(rename = "oI_Status")]
    pub oi_status: i32,
    pub file_name: Option<String>,
    pub file_path: Option<String>,
    pub rid: i32,
}

impl Asset {
    /// Project a result row onto the asset shape by column name.
    ///
    /// Columns the row lacks stay null (or 0 for the integer fields); extra
    /// columns are ignored.
    pub fn from_record(record: &Record) -> Self {
        let text = |column: &str| record.get(column).and_then(ScalarValue::as_text);
        let int = |column: &str| {
            record
                .get(column)
                .and_then(ScalarValue::as_i64)
                .and_then(|n| i32::try_from(n).ok())
                .unwrap_or_default()
        };

        Self {
            name: text("Name"),
            date: text("Date"),
            type_of_asset: text("TypeOfAsset"),
            carry_out_request_no: text("CarryOutRequestNo"),
            project_name: text("ProjectName"),
            institute: text("Institute"),
            model_name: text("ModelName"),
            model_code: text("ModelCode"),
            asset_number: text("AssetNumber"),
            imei: text("IMEI"),
            serial_no: text("SerialNo"),
            initiator_status: text("InitiatorStatus"),
            physical_verification: text("PhysicalVerification"),
            oi_status: int("OI_Status"),
            file_name: text("FileName"),
            file_path: text("FilePath"),
            rid: int("RID"),
        }
    }
}
