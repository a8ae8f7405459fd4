//! Metadata Resolver
//!
//! Derives everything the banner displays from the configuration, falling
//! back to the host page's metadata. Resolution runs once per page load.

use crate::services::config::BannerConfig;
use crate::services::page::PageContext;
use crate::utils::Platform;
use regex::Regex;
use std::sync::LazyLock;

/// Icon path tried at the page origin when no touch-icon link exists
pub const DEFAULT_TOUCH_ICON: &str = "apple-touch-icon.png";

const PLAY_STORE_BASE: &str = "market://details?id=";
const APP_STORE_BASE: &str = "https://itunes.apple.com";

static APP_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"app-id=([^\s,]+)").expect("valid app-id pattern"));
static TITLE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[|\-·].*$").expect("valid title suffix pattern"));

/// Display and identity values for one banner
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBanner {
    pub platform: Platform,
    pub app_id: String,
    pub title: String,
    pub author: String,
    pub icon: String,
    pub store_url: String,
    pub store_label: String,
}

/// Resolve the banner for `platform`. `None` when the page declares no app id
/// for that platform; there is no other source for it.
pub fn resolve(
    platform: Platform,
    config: &BannerConfig,
    page: &dyn PageContext,
) -> Option<ResolvedBanner> {
    let app_id = app_id(platform, page)?;

    let title = configured(&config.title).unwrap_or_else(|| page_title(&page.title()));
    let author = configured(&config.author)
        .or_else(|| page.meta_content("author"))
        .unwrap_or_else(|| page.host());
    let icon = configured(&config.icon).unwrap_or_else(|| touch_icon(page));
    let store_url = configured(&config.url)
        .unwrap_or_else(|| store_url(platform, &app_id, config.app_store_lang.as_deref()));

    Some(ResolvedBanner {
        platform,
        title,
        author,
        icon,
        store_url,
        store_label: config.store_label(platform).to_string(),
        app_id,
    })
}

/// Store id from `<meta name="apple-itunes-app|google-play-app" content="app-id=...">`
pub fn app_id(platform: Platform, page: &dyn PageContext) -> Option<String> {
    let content = page.meta_content(platform.app_id_meta())?;
    APP_ID
        .captures(&content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Page title without a trailing `| site`, `- tagline` or `· section` suffix
pub fn page_title(raw: &str) -> String {
    TITLE_SUFFIX.replace(raw, "").into_owned()
}

/// Canonical store link for an app id
pub fn store_url(platform: Platform, app_id: &str, app_store_lang: Option<&str>) -> String {
    match platform {
        Platform::Android => format!("{PLAY_STORE_BASE}{app_id}"),
        Platform::Ios => match app_store_lang.filter(|lang| !lang.is_empty()) {
            Some(lang) => format!("{APP_STORE_BASE}/{lang}/app/id{app_id}"),
            None => format!("{APP_STORE_BASE}/app/id{app_id}"),
        },
    }
}

fn touch_icon(page: &dyn PageContext) -> String {
    page.link_href("apple-touch-icon-precomposed")
        .or_else(|| page.link_href("apple-touch-icon"))
        .unwrap_or_else(|| format!("{}/{}", page.origin(), DEFAULT_TOUCH_ICON))
}

/// Configured strings count only when non-empty
fn configured(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}
