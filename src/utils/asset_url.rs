use crate::config::AssetsConfig;
use crate::storage::images::image_path;

/// Builds public URLs for stored assets.
#[derive(Clone, Debug)]
pub struct AssetUrlHelper {
    base_url_with_slash: String,
}

impl AssetUrlHelper {
    pub fn new(assets_config: &AssetsConfig) -> Self {
        let base_url = &assets_config.base_url;
        let base_url_with_slash = if base_url.ends_with('/') {
            base_url.clone()
        } else {
            format!("{}/", base_url)
        };

        Self { base_url_with_slash }
    }

    /// Full URL for a path relative to the assets root.
    ///
    /// ```ignore
    /// let helper = AssetUrlHelper::new(&assets_config);
    /// helper.build_url("images/1700000000123.png");
    /// // "http://localhost:8000/assets/images/1700000000123.png"
    /// ```
    pub fn build_url(&self, path: &str) -> String {
        let clean_path = path.trim_start_matches('/');
        format!("{}{}", self.base_url_with_slash, clean_path)
    }

    /// URL of an employee image given the filename stored on the row.
    pub fn build_image_url(&self, filename: &str) -> String {
        self.build_url(&image_path(filename))
    }
}
