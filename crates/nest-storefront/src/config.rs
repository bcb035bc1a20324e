//! Storefront configuration.

use crate::StorefrontError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Top-level storefront configuration, loaded from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Store display name.
    pub store_name: String,
    /// Session lifetime in milliseconds.
    pub session_ttl_millis: i64,
    /// Image hosting settings.
    pub media: MediaConfig,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            store_name: "Nestmart".to_string(),
            session_ttl_millis: nest_auth::Session::DEFAULT_DURATION_MILLIS,
            media: MediaConfig::default(),
        }
    }
}

/// Settings for the hosted image CDN.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MediaConfig {
    /// Upload endpoint URL.
    pub endpoint: String,
    /// Unsigned upload preset name sent with each upload.
    pub upload_preset: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.cloudinary.com/v1_1/demo/image/upload".to_string(),
            upload_preset: "unsigned".to_string(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StorefrontError> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| StorefrontError::Config(format!("{}: {}", path.as_ref().display(), e)))?;
        toml::from_str(&text).map_err(|e| StorefrontError::Config(e.to_string()))
    }

    /// Load configuration, falling back to defaults if the file is
    /// missing or malformed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "using default configuration");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.store_name, "Nestmart");
        assert!(config.session_ttl_millis > 0);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: StorefrontConfig = toml::from_str(
            r#"
            store_name = "Corner Shop"

            [media]
            upload_preset = "shop_uploads"
            "#,
        )
        .unwrap();

        assert_eq!(config.store_name, "Corner Shop");
        assert_eq!(config.media.upload_preset, "shop_uploads");
        // Unspecified fields keep their defaults.
        assert_eq!(
            config.session_ttl_millis,
            nest_auth::Session::DEFAULT_DURATION_MILLIS
        );
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let config = StorefrontConfig::load_or_default("/definitely/not/here.toml");
        assert_eq!(config, StorefrontConfig::default());
    }
}
