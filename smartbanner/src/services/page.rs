//! Read-only view of the host page: navigator, location and `<head>` metadata

/// What the banner reads from the page it is embedded in
pub trait PageContext {
    /// `navigator.userAgent`
    fn user_agent(&self) -> String;

    /// `navigator.standalone`: launched from the home screen or inside an app shell
    fn is_standalone(&self) -> bool;

    /// `document.title`
    fn title(&self) -> String;

    /// `content` of the first `<meta name="{name}">`
    fn meta_content(&self, name: &str) -> Option<String>;

    /// `href` of the first `<link rel="{rel}">`
    fn link_href(&self, rel: &str) -> Option<String>;

    /// `location.host`
    fn host(&self) -> String;

    /// `location.origin`
    fn origin(&self) -> String;
}

#[cfg(target_arch = "wasm32")]
pub use browser::DomPage;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::PageContext;
    use crate::services::errors::{BannerError, BannerResult};
    use web_sys::{Document, Window};

    /// `PageContext` over the live `window`/`document`
    pub struct DomPage {
        window: Window,
        document: Document,
    }

    impl DomPage {
        pub fn new(window: Window) -> BannerResult<Self> {
            let document = window
                .document()
                .ok_or_else(|| BannerError::dom("page", "window has no document"))?;
            Ok(Self { window, document })
        }

        fn attribute_of_first(&self, selector: &str, attribute: &str) -> Option<String> {
            self.document
                .query_selector(selector)
                .ok()
                .flatten()
                .and_then(|element| element.get_attribute(attribute))
        }
    }

    impl PageContext for DomPage {
        fn user_agent(&self) -> String {
            self.window.navigator().user_agent().unwrap_or_default()
        }

        fn is_standalone(&self) -> bool {
            // Safari-only property, absent from web-sys bindings
            js_sys::Reflect::get(&self.window.navigator(), &"standalone".into())
                .ok()
                .and_then(|v| v.as_bool())
                .unwrap_or(false)
        }

        fn title(&self) -> String {
            self.document.title()
        }

        fn meta_content(&self, name: &str) -> Option<String> {
            self.attribute_of_first(&format!("meta[name=\"{name}\"]"), "content")
        }

        fn link_href(&self, rel: &str) -> Option<String> {
            self.attribute_of_first(&format!("link[rel=\"{rel}\"]"), "href")
        }

        fn host(&self) -> String {
            self.window.location().host().unwrap_or_default()
        }

        fn origin(&self) -> String {
            self.window.location().origin().unwrap_or_default()
        }
    }
}
