//! Banner lifecycle and its browser entry points

pub mod controller;

#[cfg(target_arch = "wasm32")]
pub mod exports;

pub use controller::{BannerHost, BannerState, Launch, SkipReason, SmartBanner};
