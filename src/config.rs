//! Runtime Configuration
//!
//! The script endpoint comes from the build environment (`PCM_SCRIPT_URL`)
//! and may be overridden by an `app-config` JSON block in `index.html`.

use serde::Deserialize;

use crate::error::ConfigError;

/// Element id of the optional JSON override block
pub const CONFIG_ELEMENT_ID: &str = "app-config";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub script_url: String,
    pub log_level: log::LevelFilter,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigOverrides {
    script_url: Option<String>,
    log_level: Option<String>,
}

impl AppConfig {
    /// Build from the compile-time value and the page's JSON block (later wins)
    pub fn from_sources(compile_time_url: Option<&str>, page_json: Option<&str>) -> Result<Self, ConfigError> {
        let overrides: ConfigOverrides = match page_json.map(str::trim).filter(|s| !s.is_empty()) {
            Some(json) => serde_json::from_str(json).map_err(|e| ConfigError::InvalidJson(e.to_string()))?,
            None => ConfigOverrides::default(),
        };

        let script_url = overrides
            .script_url
            .or_else(|| compile_time_url.map(str::to_string))
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::MissingScriptUrl)?;

        if !(script_url.starts_with("https://") || script_url.starts_with("http://")) {
            return Err(ConfigError::InvalidScriptUrl(script_url));
        }

        let log_level = overrides
            .log_level
            .and_then(|l| l.parse().ok())
            .unwrap_or(log::LevelFilter::Info);

        Ok(Self { script_url, log_level })
    }

    /// Read both sources from the running page
    pub fn load() -> Result<Self, ConfigError> {
        let page_json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        Self::from_sources(option_env!("PCM_SCRIPT_URL"), page_json.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_time_only() {
        let cfg = AppConfig::from_sources(Some("https://script.example/exec"), None).unwrap();
        assert_eq!(cfg.script_url, "https://script.example/exec");
        assert_eq!(cfg.log_level, log::LevelFilter::Info);
    }

    #[test]
    fn test_page_block_overrides() {
        let json = r#"{"scriptUrl": "https://other.example/exec", "logLevel": "debug"}"#;
        let cfg = AppConfig::from_sources(Some("https://script.example/exec"), Some(json)).unwrap();
        assert_eq!(cfg.script_url, "https://other.example/exec");
        assert_eq!(cfg.log_level, log::LevelFilter::Debug);
    }

    #[test]
    fn test_errors() {
        assert_eq!(AppConfig::from_sources(None, None), Err(ConfigError::MissingScriptUrl));
        assert_eq!(AppConfig::from_sources(None, Some("  ")), Err(ConfigError::MissingScriptUrl));
        assert!(matches!(AppConfig::from_sources(Some("ftp://x"), None), Err(ConfigError::InvalidScriptUrl(_))));
        assert!(matches!(AppConfig::from_sources(None, Some("{not json")), Err(ConfigError::InvalidJson(_))));
    }
}
