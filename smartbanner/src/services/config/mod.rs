//! Banner configuration
//!
//! Callers pass a partial options object; every absent key falls back to its
//! default through `#[serde(default)]`; an explicit `null` on a non-optional
//! key reads as that type's empty value. Field names on the wire match the
//! option names page authors already use (`daysHidden`, `verIOS`, ...).

use crate::services::errors::{BannerError, BannerResult};
use crate::utils::Platform;
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_PRICE: &str = "FREE";
pub const DEFAULT_BUTTON: &str = "VIEW";
pub const DEFAULT_GOOGLE_PLAY_LABEL: &str = "In Google Play";
pub const DEFAULT_APP_STORE_LABEL: &str = "On the App Store";
pub const DEFAULT_SHOW_DELAY_MS: u32 = 300;
pub const DEFAULT_DAYS_HIDDEN: u32 = 15;
pub const DEFAULT_DAYS_REMIND: u32 = 30;

/// Options for one banner instance. Immutable once handed to the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerConfig {
    /// Force the banner type instead of detecting it
    #[serde(rename = "type")]
    pub platform: Option<Platform>,

    /// Icon URL. Falls back to the page's apple-touch-icon links
    pub icon: Option<String>,

    /// Application title. Falls back to the page `<title>`
    pub title: Option<String>,

    /// Application author. Falls back to `<meta name="author">`, then the host name
    pub author: Option<String>,

    /// Price text; an empty string hides the price segment
    #[serde(deserialize_with = "null_as_empty")]
    pub price: String,

    /// Call-to-action button text
    #[serde(deserialize_with = "null_as_empty")]
    pub button: String,

    /// Store URL. Generated from the app id when absent
    pub url: Option<String>,

    #[serde(rename = "inGooglePlay", deserialize_with = "null_as_empty")]
    pub in_google_play: String,

    #[serde(rename = "inAppStore", deserialize_with = "null_as_empty")]
    pub in_app_store: String,

    /// App Store storefront language, e.g. `"us"`
    #[serde(rename = "appStoreLang")]
    pub app_store_lang: Option<String>,

    /// Delay before the banner slides in, in milliseconds
    #[serde(rename = "showDelay", deserialize_with = "null_as_empty")]
    pub show_delay_ms: u32,

    /// Slide animation time in seconds. `None` reads it from the stylesheet
    #[serde(rename = "animTime")]
    pub animation_secs: Option<f64>,

    /// Days to keep the banner hidden after the user closes it
    #[serde(rename = "daysHidden", deserialize_with = "null_as_empty")]
    pub days_hidden: u32,

    /// Days to keep the banner hidden after the user follows the store link
    #[serde(rename = "daysRemind", deserialize_with = "null_as_empty")]
    pub days_remind: u32,

    /// Lowest iOS version to show the banner on
    #[serde(rename = "verIOS")]
    pub min_ios_version: Option<f64>,

    /// Lowest Android version to show the banner on
    #[serde(rename = "verAndroid")]
    pub min_android_version: Option<f64>,
}

/// `null` reads as the empty value of the field's type, the way a JS options
/// merge copies it: `price: null` hides the price, `daysHidden: null` is 0 days.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            platform: None,
            icon: None,
            title: None,
            author: None,
            price: DEFAULT_PRICE.to_string(),
            button: DEFAULT_BUTTON.to_string(),
            url: None,
            in_google_play: DEFAULT_GOOGLE_PLAY_LABEL.to_string(),
            in_app_store: DEFAULT_APP_STORE_LABEL.to_string(),
            app_store_lang: None,
            show_delay_ms: DEFAULT_SHOW_DELAY_MS,
            animation_secs: None,
            days_hidden: DEFAULT_DAYS_HIDDEN,
            days_remind: DEFAULT_DAYS_REMIND,
            min_ios_version: None,
            min_android_version: None,
        }
    }
}

impl BannerConfig {
    /// Merge a JSON options object over the defaults
    pub fn from_json(json: &str) -> BannerResult<Self> {
        serde_json::from_str(json).map_err(BannerError::from)
    }

    /// Merge a JS options object over the defaults. `undefined`/`null` gives the defaults.
    pub fn from_js(options: wasm_bindgen::JsValue) -> BannerResult<Self> {
        if options.is_undefined() || options.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(options).map_err(|e| BannerError::Configuration {
            field: "options".to_string(),
            value: e.to_string(),
        })
    }

    /// Store label shown after the price
    pub fn store_label(&self, platform: Platform) -> &str {
        match platform {
            Platform::Ios => &self.in_app_store,
            Platform::Android => &self.in_google_play,
        }
    }

    /// Check option values, collecting every violation
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if let Some(secs) = self.animation_secs {
            if !secs.is_finite() || secs < 0.0 {
                errors.push(format!("animTime must be a non-negative number of seconds, got {secs}"));
            }
        }

        if self.min_ios_version.is_some_and(|v| !v.is_finite()) {
            errors.push("verIOS must be a finite version number".to_string());
        }

        if self.min_android_version.is_some_and(|v| !v.is_finite()) {
            errors.push("verAndroid must be a finite version number".to_string());
        }

        if self.url.as_deref().is_some_and(|u| u.trim().is_empty()) {
            errors.push("url must not be blank when provided".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BannerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.price, "FREE");
        assert_eq!(config.show_delay_ms, 300);
        assert_eq!(config.days_hidden, 15);
        assert_eq!(config.days_remind, 30);
    }

    #[test]
    fn test_partial_options_merge_over_defaults() {
        let config = BannerConfig::from_json(
            r#"{"type": "android", "title": "Acme", "daysHidden": 2, "verIOS": 4.3, "price": ""}"#,
        )
        .unwrap();

        assert_eq!(config.platform, Some(Platform::Android));
        assert_eq!(config.title.as_deref(), Some("Acme"));
        assert_eq!(config.days_hidden, 2);
        assert_eq!(config.min_ios_version, Some(4.3));
        assert_eq!(config.price, "");
        // untouched keys keep their defaults
        assert_eq!(config.button, "VIEW");
        assert_eq!(config.days_remind, 30);
        assert_eq!(config.in_app_store, "On the App Store");
    }

    #[test]
    fn test_null_options_are_absent() {
        let config = BannerConfig::from_json(r#"{"type": null, "animTime": null}"#).unwrap();
        assert_eq!(config, BannerConfig::default());
    }

    #[test]
    fn test_null_required_options_become_empty() {
        let config = BannerConfig::from_json(
            r#"{
                "price": null,
                "button": null,
                "inGooglePlay": null,
                "inAppStore": null,
                "showDelay": null,
                "daysHidden": null,
                "daysRemind": null
            }"#,
        )
        .unwrap();

        assert_eq!(config.price, "");
        assert_eq!(config.button, "");
        assert_eq!(config.in_google_play, "");
        assert_eq!(config.in_app_store, "");
        assert_eq!(config.show_delay_ms, 0);
        assert_eq!(config.days_hidden, 0);
        assert_eq!(config.days_remind, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_present_values_still_parse_through_null_handling() {
        let config =
            BannerConfig::from_json(r#"{"price": "$1.99", "showDelay": 0, "daysRemind": 7}"#)
                .unwrap();
        assert_eq!(config.price, "$1.99");
        assert_eq!(config.show_delay_ms, 0);
        assert_eq!(config.days_remind, 7);
        assert_eq!(config.days_hidden, 15);
    }

    #[test]
    fn test_malformed_options_are_rejected() {
        let err = BannerConfig::from_json(r#"{"daysHidden": "soon"}"#).unwrap_err();
        assert!(matches!(err, BannerError::Serialization(_)));
    }

    #[test]
    fn test_invalid_config() {
        let config = BannerConfig {
            animation_secs: Some(-1.0),
            min_android_version: Some(f64::NAN),
            ..Default::default()
        };

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_store_label_follows_platform() {
        let config = BannerConfig::default();
        assert_eq!(config.store_label(Platform::Ios), "On the App Store");
        assert_eq!(config.store_label(Platform::Android), "In Google Play");
    }
}
