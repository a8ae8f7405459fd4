//! Smart app banner for mobile web pages.
//!
//! Detects iOS and Android visitors and slides in a dismissible banner that
//! links to the app's store page, remembering when the user closed it or
//! followed the link.

pub mod app;
pub use app::{BannerHost, BannerState, Launch, SkipReason, SmartBanner};

pub mod components;
pub mod services;
pub mod utils;

pub use services::config::BannerConfig;
pub use services::errors::{BannerError, BannerResult};
pub use utils::Platform;

#[cfg(test)]
mod testing;

#[cfg(all(test, target_arch = "wasm32"))]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);
