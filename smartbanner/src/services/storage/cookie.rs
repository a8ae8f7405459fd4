//! `document.cookie` backend
//!
//! Entries are written as `name=<uri-encoded value>; expires=<UTC date>; path=/;`
//! and read back by scanning the cookie header for `name=`.

use chrono::{DateTime, Utc};

/// `Date.prototype.toUTCString()` format, as cookies expect
pub fn to_utc_string(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Assignment string for `document.cookie = ...`. `encoded_value` must already be URI-encoded.
pub fn cookie_assignment(name: &str, encoded_value: &str, expires: Option<DateTime<Utc>>) -> String {
    match expires {
        Some(at) => format!("{name}={encoded_value}; expires={}; path=/;", to_utc_string(at)),
        None => format!("{name}={encoded_value}; path=/;"),
    }
}

/// Raw (still encoded) value of `name` in a `document.cookie` header
pub fn find_cookie<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies
        .split(';')
        .map(|pair| pair.trim_start())
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
}

#[cfg(target_arch = "wasm32")]
pub use browser::CookieStore;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{cookie_assignment, find_cookie};
    use crate::services::errors::{BannerError, BannerResult};
    use crate::services::storage::{expiry_after, Clock, ExpiringStore};
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use web_sys::HtmlDocument;

    /// Expiring flags kept in the page's cookies. Expiry is enforced by the browser.
    pub struct CookieStore {
        document: HtmlDocument,
        clock: Rc<dyn Clock>,
    }

    impl CookieStore {
        pub fn new(document: web_sys::Document, clock: Rc<dyn Clock>) -> BannerResult<Self> {
            let document = document
                .dyn_into::<HtmlDocument>()
                .map_err(|_| BannerError::dom("cookie", "document is not an HTML document"))?;
            Ok(Self { document, clock })
        }
    }

    impl ExpiringStore for CookieStore {
        fn get(&self, key: &str) -> BannerResult<Option<String>> {
            let cookies = self.document.cookie()?;
            match find_cookie(&cookies, key) {
                Some(raw) => {
                    let decoded = js_sys::decode_uri_component(raw)?;
                    Ok(decoded.as_string())
                }
                None => Ok(None),
            }
        }

        fn set(&self, key: &str, value: &str, days: u32) -> BannerResult<()> {
            let encoded: String = js_sys::encode_uri_component(value).into();
            let expires = expiry_after(self.clock.now(), days);
            self.document
                .set_cookie(&cookie_assignment(key, &encoded, expires))
                .map_err(|e| BannerError::storage(key, format!("{:?}", e)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_utc_string_matches_browser_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 5, 7).unwrap();
        assert_eq!(to_utc_string(at), "Fri, 01 Mar 2024 09:05:07 GMT");
    }

    #[test]
    fn test_cookie_assignment() {
        let at = Utc.with_ymd_and_hms(2024, 3, 16, 0, 0, 0).unwrap();
        assert_eq!(
            cookie_assignment("smbcls", "true", Some(at)),
            "smbcls=true; expires=Sat, 16 Mar 2024 00:00:00 GMT; path=/;"
        );
        assert_eq!(cookie_assignment("smbinstl", "true", None), "smbinstl=true; path=/;");
    }

    #[test]
    fn test_find_cookie() {
        let header = "theme=dark; smbcls=true; xsmbinstl=nope; smbinstl=a%20b";
        assert_eq!(find_cookie(header, "smbcls"), Some("true"));
        assert_eq!(find_cookie(header, "smbinstl"), Some("a%20b"));
        assert_eq!(find_cookie(header, "theme"), Some("dark"));
        assert_eq!(find_cookie(header, "missing"), None);
        assert_eq!(find_cookie("", "smbcls"), None);
    }

    #[test]
    fn test_find_cookie_requires_exact_name() {
        assert_eq!(find_cookie("smbclsx=1", "smbcls"), None);
        assert_eq!(find_cookie("smbcls=", "smbcls"), Some(""));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use crate::services::storage::{ExpiringStore, SystemClock};
    use std::rc::Rc;
    use wasm_bindgen_test::*;

    fn store() -> CookieStore {
        let document = web_sys::window().unwrap().document().unwrap();
        CookieStore::new(document, Rc::new(SystemClock)).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_cookie_store_writes_document_cookie() {
        let store = store();
        store.set("sb_test_flag", "a b", 1).unwrap();
        assert_eq!(store.get("sb_test_flag").unwrap().as_deref(), Some("a b"));

        // expire it again
        let document: web_sys::HtmlDocument = wasm_bindgen::JsCast::unchecked_into(
            web_sys::window().unwrap().document().unwrap(),
        );
        document
            .set_cookie("sb_test_flag=; expires=Thu, 01 Jan 1970 00:00:00 GMT; path=/;")
            .unwrap();
        assert_eq!(store.get("sb_test_flag").unwrap(), None);
    }
}
