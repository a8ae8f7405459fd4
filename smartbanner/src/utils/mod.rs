//! Utility Functions and Cross-Cutting Concerns
//!
//! - **console_macros**: logging macros (browser console on wasm32, `tracing` elsewhere)
//! - **platform**: user agent based platform detection

pub mod console_macros;
pub mod platform;

pub use platform::*;
