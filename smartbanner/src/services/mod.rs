//! Infrastructure Services
//!
//! - **config**: banner options merged over defaults
//! - **errors**: error type shared across the crate
//! - **metadata**: app identity and display fields from config or page metadata
//! - **page**: read-only access to the host page
//! - **scheduler**: timer deferral
//! - **storage**: expiring dismissal records (cookies, localStorage, memory)
//! - **surface**: banner insertion, styling and click wiring
//!
//! Each browser-facing service is a trait with a web-sys implementation that
//! only exists on wasm32, so the decision logic also builds and tests natively.

pub mod config;
pub mod errors;
pub mod metadata;
pub mod page;
pub mod scheduler;
pub mod storage;
pub mod surface;
