mod asset_service;

pub use asset_service::{AssetService, PgAssetService};
