//! JavaScript entry points
//!
//! Mirrors the classic global API: `smartBanner(options)` creates the banner
//! once per page, and `smartBannerShow/Hide/Remove/Destroy` act on the live
//! one. The host lives in a thread-local because the page itself is the owner.

use super::controller::{BannerHost, Launch};
use crate::services::config::BannerConfig;
use crate::services::errors::BannerResult;
use crate::console_error;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

thread_local! {
    static HOST: RefCell<Option<Rc<BannerHost>>> = const { RefCell::new(None) };
}

fn host() -> BannerResult<Rc<BannerHost>> {
    HOST.with(|slot| {
        if let Some(host) = slot.borrow().as_ref() {
            return Ok(host.clone());
        }
        let host = Rc::new(BannerHost::browser()?);
        *slot.borrow_mut() = Some(host.clone());
        Ok(host)
    })
}

/// Create the page's banner from a merged configuration
pub fn mount(config: BannerConfig) -> BannerResult<Launch> {
    host()?.create(config)
}

/// Tear down the page's banner immediately, if there is one
pub fn unmount() {
    match host() {
        Ok(host) => {
            if let Some(banner) = host.current() {
                banner.destroy();
            }
        }
        Err(e) => console_error!("[SmartBanner] No browser host: {}", e),
    }
}

fn with_current(action: impl FnOnce(&super::SmartBanner)) -> Result<(), JsValue> {
    if let Some(banner) = host()?.current() {
        action(&banner);
    }
    Ok(())
}

#[wasm_bindgen(js_name = smartBanner)]
pub fn smart_banner(options: JsValue) -> Result<(), JsValue> {
    let config = BannerConfig::from_js(options)?;
    mount(config)?;
    Ok(())
}

#[wasm_bindgen(js_name = smartBannerShow)]
pub fn smart_banner_show() -> Result<(), JsValue> {
    with_current(|banner| banner.show())
}

#[wasm_bindgen(js_name = smartBannerHide)]
pub fn smart_banner_hide() -> Result<(), JsValue> {
    with_current(|banner| banner.hide())
}

#[wasm_bindgen(js_name = smartBannerRemove)]
pub fn smart_banner_remove() -> Result<(), JsValue> {
    with_current(|banner| banner.remove())
}

#[wasm_bindgen(js_name = smartBannerDestroy)]
pub fn smart_banner_destroy() -> Result<(), JsValue> {
    with_current(|banner| banner.destroy())
}

/// Debug name of the current lifecycle state, e.g. `"Shown"`
#[wasm_bindgen(js_name = smartBannerState)]
pub fn smart_banner_state() -> Result<String, JsValue> {
    Ok(format!("{:?}", host()?.state()))
}
