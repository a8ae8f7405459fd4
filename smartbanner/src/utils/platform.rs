//! Platform Detection Utilities
//!
//! Classifies the runtime as iOS, Android or unsupported from the user agent
//! string and the navigator standalone flag.
//!
//! iOS is only accepted below the version that ships Safari's native smart app
//! banner (6), unless the browser is Chrome for iOS, which never shows the
//! native banner. This keeps users from seeing two prompts for the same app.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// First iOS version whose Safari renders `apple-itunes-app` natively
pub const IOS_NATIVE_BANNER_VERSION: f64 = 6.0;

static IOS_DEVICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)iPad|iPhone|iPod").expect("valid iOS device pattern"));
static SAFARI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Safari").expect("valid Safari pattern"));
static CHROME_IOS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)CriOS").expect("valid CriOS pattern"));
static ANDROID_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Android (\d+(?:\.\d+)?)").expect("valid Android version pattern")
});

/// Mobile platforms a banner can be shown for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
}

impl Platform {
    /// Identifier used in the banner's modifier class (`sb_ios`, `sb_android`)
    pub fn id(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
        }
    }

    /// Name of the `<meta>` tag carrying the store application id
    pub fn app_id_meta(&self) -> &'static str {
        match self {
            Platform::Ios => "apple-itunes-app",
            Platform::Android => "google-play-app",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Everything the detector looks at
#[derive(Debug, Clone, Copy, Default)]
pub struct DetectionInput<'a> {
    pub user_agent: &'a str,
    /// `navigator.standalone`, set when running from the home screen or an app shell
    pub standalone: bool,
    pub min_ios_version: Option<f64>,
    pub min_android_version: Option<f64>,
}

/// Classify the runtime. Pure function of its input.
pub fn detect_platform(input: &DetectionInput<'_>) -> Option<Platform> {
    if input.standalone {
        return None;
    }

    let ua = input.user_agent;

    if IOS_DEVICE.is_match(ua) {
        if !SAFARI.is_match(ua) {
            return None;
        }
        if CHROME_IOS.is_match(ua) {
            return Some(Platform::Ios);
        }
        let min = input.min_ios_version.unwrap_or(0.0);
        return match ios_version(ua) {
            Some(version) if version < IOS_NATIVE_BANNER_VERSION && version >= min => {
                Some(Platform::Ios)
            }
            _ => None,
        };
    }

    let min = input.min_android_version.unwrap_or(0.0);
    match android_version(ua) {
        Some(version) if version >= min => Some(Platform::Android),
        _ => None,
    }
}

/// Version token following `"OS "`: three characters, first `_` read as a
/// decimal point. `"OS 5_1_1"` gives 5.1 and `"OS 10_3"` gives 10.
pub fn ios_version(user_agent: &str) -> Option<f64> {
    let start = user_agent.find("OS ")? + 3;
    let token: String = user_agent[start..].chars().take(3).collect();
    let token = token.replacen('_', ".", 1);
    let token = token.trim();
    token.strip_suffix('.').unwrap_or(token).parse().ok()
}

/// `Android <major>[.<minor>]` as a number
pub fn android_version(user_agent: &str) -> Option<f64> {
    ANDROID_VERSION
        .captures(user_agent)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
