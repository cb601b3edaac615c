//! Application configuration, loaded from environment variables.

use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_PAGE_SIZE: usize = 25;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Directory uploaded attachments are written to and served from.
    pub media_root: PathBuf,
    /// Largest accepted single upload.
    pub max_upload_bytes: usize,
    /// Rows per page in record lists.
    pub page_size: usize,
    /// Shown in the page header and `<title>`.
    pub site_title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            media_root: PathBuf::from("./media"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            page_size: DEFAULT_PAGE_SIZE,
            site_title: "ZisoDB".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unparseable values keep their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let media_root = lookup("ZISO_MEDIA_ROOT")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.media_root);
        let max_upload_bytes = parsed(&lookup, "ZISO_MAX_UPLOAD_BYTES", defaults.max_upload_bytes);
        let page_size = match parsed(&lookup, "ZISO_PAGE_SIZE", defaults.page_size) {
            0 => {
                tracing::warn!("ZISO_PAGE_SIZE must be positive -- using {}", DEFAULT_PAGE_SIZE);
                DEFAULT_PAGE_SIZE
            }
            size => size,
        };
        let site_title = lookup("ZISO_SITE_TITLE")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.site_title);

        Self {
            media_root,
            max_upload_bytes,
            page_size,
            site_title,
        }
    }
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("{key}={raw:?} is not valid -- using {default}");
            default
        }),
    }
}

/// Development switches enabled with `--dev feature,feature`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DevMode {
    /// Keep records in process memory instead of Postgres.
    pub in_memory: bool,
}

impl DevMode {
    pub fn from_features(features: &str) -> Self {
        let mut mode = Self::default();
        for feature in features.split(',').map(str::trim).filter(|f| !f.is_empty()) {
            match feature {
                "in-memory" => mode.in_memory = true,
                other => tracing::warn!("Unknown dev feature '{other}' ignored"),
            }
        }
        mode
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(config.media_root, PathBuf::from("./media"));
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.page_size, 25);
        assert_eq!(config.site_title, "ZisoDB");
    }

    #[test]
    fn values_are_read_and_bad_ones_ignored() {
        let config = AppConfig::from_lookup(lookup(&[
            ("ZISO_MEDIA_ROOT", "/srv/media"),
            ("ZISO_MAX_UPLOAD_BYTES", "lots"),
            ("ZISO_PAGE_SIZE", "0"),
            ("ZISO_SITE_TITLE", "Due diligence"),
        ]));
        assert_eq!(config.media_root, PathBuf::from("/srv/media"));
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.page_size, 25);
        assert_eq!(config.site_title, "Due diligence");

        let config = AppConfig::from_lookup(lookup(&[("ZISO_PAGE_SIZE", " 50 ")]));
        assert_eq!(config.page_size, 50);
    }

    #[test]
    fn dev_features_are_parsed() {
        assert_eq!(DevMode::from_features(""), DevMode::default());
        assert!(DevMode::from_features("in-memory").in_memory);
        assert!(DevMode::from_features("verbose, in-memory").in_memory);
    }
}
