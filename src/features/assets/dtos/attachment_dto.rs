use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query parameters for the attachment path lookup
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentPathQuery {
    #[serde(alias = "masterID", alias = "MasterID")]
    pub master_id: Option<String>,
    #[serde(alias = "instanceID", alias = "InstanceID")]
    pub instance_id: Option<String>,
}

/// Query parameters for updating the stored attachment filename and path.
///
/// Missing parameters deserialize to empty strings so validation reports
/// them together with blank ones.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentMetadataQuery {
    #[serde(default, alias = "masterID", alias = "MasterID")]
    #[validate(length(min = 1, message = "masterId is required"))]
    pub master_id: String,

    #[serde(default, alias = "instanceID", alias = "InstanceID")]
    #[validate(length(min = 1, message = "instanceId is required"))]
    pub instance_id: String,

    #[serde(default, alias = "FileName")]
    #[validate(length(min = 1, message = "fileName is required"))]
    pub file_name: String,

    #[serde(default, alias = "FilePath")]
    pub file_path: Option<String>,
}

/// Acknowledgement for an uploaded attachment. The file content is read
/// only to measure it and is never stored.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadAcknowledgementDto {
    pub file_name: String,
    pub size: u64,
    pub master_id: String,
    pub instance_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_query_requires_fields() {
        let query = AttachmentMetadataQuery {
            master_id: "10".to_string(),
            instance_id: "20".to_string(),
            file_name: "scan.pdf".to_string(),
            file_path: None,
        };
        assert!(query.validate().is_ok());

        let query = AttachmentMetadataQuery {
            master_id: "10".to_string(),
            instance_id: String::new(),
            file_name: String::new(),
            file_path: Some("/docs".to_string()),
        };
        let errors = query.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("instance_id"));
        assert!(fields.contains_key("file_name"));
        assert!(!fields.contains_key("master_id"));
    }
}
