pub mod approval_dto;
pub mod attachment_dto;

pub use approval_dto::{AssetUpdateDto, UpdateResultDto};
pub use attachment_dto::{AttachmentMetadataQuery, AttachmentPathQuery, UploadAcknowledgementDto};
