pub mod approval_handler;
pub mod asset_handler;
pub mod attachment_handler;

pub use approval_handler::{update_asset_general, update_asset_inward};
pub use asset_handler::{get_asset, get_asset_master_id, get_attachment_path};
pub use attachment_handler::{update_attachment_metadata, upload_attachment_file};
