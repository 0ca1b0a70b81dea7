pub mod asset_url;

pub use asset_url::AssetUrlHelper;
