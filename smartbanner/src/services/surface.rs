//! Banner Surface
//!
//! The only place the controller touches the document: inserting and removing
//! the two elements, writing inline styles, measuring, and wiring the two
//! click targets.

use crate::components::markup::ElementNode;
use crate::services::errors::BannerResult;
use std::rc::Rc;

/// Which of the two inserted elements a style write targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Banner,
    Placeholder,
}

/// User gestures the banner reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BannerAction {
    /// Close control
    Close,
    /// Store link, alongside its normal navigation
    Accept,
}

pub trait BannerSurface {
    /// Insert `placeholder` then `banner` as the first children of `<body>`
    fn attach(&self, banner: &ElementNode, placeholder: &ElementNode) -> BannerResult<()>;

    /// Rendered box height of the attached banner, in pixels
    fn banner_height(&self) -> f64;

    /// Computed `transition-duration` of the attached banner
    fn transition_duration(&self) -> Option<String>;

    fn set_style(&self, part: Part, property: &str, value: &str);

    /// Register the handler for a gesture on the attached banner
    fn bind(&self, action: BannerAction, handler: Rc<dyn Fn()>) -> BannerResult<()>;

    /// Remove both elements and drop every handler. Safe to call when detached.
    fn detach(&self);
}

#[cfg(target_arch = "wasm32")]
pub use browser::DomSurface;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{BannerAction, BannerSurface, Part};
    use crate::components::banner::{CLOSE_CLASS, LINK_CLASS};
    use crate::components::markup::ElementNode;
    use crate::services::errors::{BannerError, BannerResult};
    use crate::{console_debug, console_warn};
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, Event, HtmlElement, Window};

    struct Attached {
        banner: HtmlElement,
        placeholder: HtmlElement,
        listeners: Vec<(Element, Closure<dyn FnMut(Event)>)>,
    }

    /// `BannerSurface` over the live document body
    pub struct DomSurface {
        window: Window,
        document: Document,
        attached: RefCell<Option<Attached>>,
    }

    impl DomSurface {
        pub fn new(window: Window) -> BannerResult<Self> {
            let document = window
                .document()
                .ok_or_else(|| BannerError::dom("surface", "window has no document"))?;
            Ok(Self {
                window,
                document,
                attached: RefCell::new(None),
            })
        }

        fn element(&self, node: &ElementNode) -> BannerResult<HtmlElement> {
            node.materialize(&self.document)?
                .dyn_into::<HtmlElement>()
                .map_err(|_| BannerError::dom("materialize", format!("<{}> is not an HTML element", node.tag)))
        }
    }

    impl BannerSurface for DomSurface {
        fn attach(&self, banner: &ElementNode, placeholder: &ElementNode) -> BannerResult<()> {
            let body = self
                .document
                .body()
                .ok_or_else(|| BannerError::dom("attach", "document has no body"))?;

            let banner = self.element(banner)?;
            let placeholder = self.element(placeholder)?;

            let banner_node: &web_sys::Node = &banner;
            body.insert_before(banner_node, body.first_child().as_ref())?;
            if let Err(e) = body.insert_before(&placeholder, Some(banner_node)) {
                // nothing tracks the banner yet, so take it back out
                banner.remove();
                return Err(e.into());
            }

            console_debug!("[DomSurface] Banner attached to body");
            *self.attached.borrow_mut() = Some(Attached {
                banner,
                placeholder,
                listeners: Vec::new(),
            });
            Ok(())
        }

        fn banner_height(&self) -> f64 {
            self.attached
                .borrow()
                .as_ref()
                .map(|a| f64::from(a.banner.offset_height()))
                .unwrap_or(0.0)
        }

        fn transition_duration(&self) -> Option<String> {
            let attached = self.attached.borrow();
            let banner = &attached.as_ref()?.banner;
            self.window
                .get_computed_style(banner)
                .ok()
                .flatten()
                .and_then(|style| style.get_property_value("transition-duration").ok())
        }

        fn set_style(&self, part: Part, property: &str, value: &str) {
            let attached = self.attached.borrow();
            let Some(attached) = attached.as_ref() else {
                return;
            };
            let element = match part {
                Part::Banner => &attached.banner,
                Part::Placeholder => &attached.placeholder,
            };
            if let Err(e) = element.style().set_property(property, value) {
                console_warn!("[DomSurface] Failed to set {} on {:?}: {:?}", property, part, e);
            }
        }

        fn bind(&self, action: BannerAction, handler: Rc<dyn Fn()>) -> BannerResult<()> {
            let mut attached = self.attached.borrow_mut();
            let attached = attached
                .as_mut()
                .ok_or_else(|| BannerError::dom("bind", "banner is not attached"))?;

            let class = match action {
                BannerAction::Close => CLOSE_CLASS,
                BannerAction::Accept => LINK_CLASS,
            };
            let target = attached
                .banner
                .query_selector(&format!(".{class}"))?
                .ok_or_else(|| BannerError::dom("bind", format!("no .{class} in banner")))?;

            let listener = Closure::<dyn FnMut(Event)>::new(move |_event: Event| handler());
            target.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())?;
            attached.listeners.push((target, listener));
            Ok(())
        }

        fn detach(&self) {
            let Some(attached) = self.attached.borrow_mut().take() else {
                return;
            };
            for (target, listener) in &attached.listeners {
                let _ = target.remove_event_listener_with_callback(
                    "click",
                    listener.as_ref().unchecked_ref(),
                );
            }
            attached.banner.remove();
            attached.placeholder.remove();
            console_debug!("[DomSurface] Banner detached from body");
        }
    }
}
