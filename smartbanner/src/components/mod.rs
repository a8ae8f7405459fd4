//! Banner Presentation
//!
//! - **markup**: typed element tree with escaping HTML serialization
//! - **banner**: builds the banner and placeholder trees from resolved metadata
//! - **mount**: Dioxus component that creates the banner when a page mounts
//!
//! The trees are plain data; the browser surface materializes them into live
//! DOM nodes.

pub mod banner;
pub mod markup;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod mount;

pub use banner::{build_banner, build_placeholder, BANNER_ID};
pub use markup::ElementNode;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use mount::SmartBannerMount;
