//! In-memory stand-ins for the browser collaborators

use crate::components::markup::ElementNode;
use crate::services::errors::{BannerError, BannerResult};
use crate::services::page::PageContext;
use crate::services::scheduler::Scheduler;
use crate::services::storage::Clock;
use crate::services::surface::{BannerAction, BannerSurface, Part};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

pub const IPHONE_IOS5: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 5_0 like Mac OS X) AppleWebKit/534.46 (KHTML, like Gecko) Version/5.1 Mobile/9A334 Safari/7534.48.3";
pub const ANDROID_4: &str = "Mozilla/5.0 (Linux; U; Android 4.0.3; en-us; Galaxy Nexus Build/IML74K) AppleWebKit/534.30 (KHTML, like Gecko) Version/4.0 Mobile Safari/534.30";
pub const DESKTOP_FIREFOX: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:120.0) Gecko/20100101 Firefox/120.0";

pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self {
            now: Cell::new(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()),
        }
    }
}

impl ManualClock {
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_days(&self, days: i64) {
        self.advance(Duration::days(days));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// Virtual-time scheduler; tasks run only when time is advanced
#[derive(Default)]
pub struct ManualScheduler {
    now_ms: Cell<u64>,
    next_seq: Cell<u64>,
    tasks: RefCell<Vec<(u64, u64, Box<dyn FnOnce()>)>>,
}

impl ManualScheduler {
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Delays of the queued tasks, relative to now, in scheduling order
    pub fn pending_delays(&self) -> Vec<u64> {
        let now = self.now_ms.get();
        self.tasks.borrow().iter().map(|(due, _, _)| due - now).collect()
    }

    /// Advance virtual time, running due tasks in (due time, scheduling) order
    pub fn advance(&self, ms: u64) {
        let target = self.now_ms.get() + ms;
        loop {
            let next = {
                let mut tasks = self.tasks.borrow_mut();
                let index = tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, (due, _, _))| *due <= target)
                    .min_by_key(|(_, (due, seq, _))| (*due, *seq))
                    .map(|(i, _)| i);
                index.map(|i| tasks.remove(i))
            };
            match next {
                Some((due, _, task)) => {
                    self.now_ms.set(due);
                    task();
                }
                None => break,
            }
        }
        self.now_ms.set(target);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        let due = self.now_ms.get() + u64::from(delay_ms);
        self.tasks.borrow_mut().push((due, seq, task));
    }
}

/// Surface that records what the controller does to the document
pub struct RecordingSurface {
    pub height: f64,
    pub computed_duration: Option<String>,
    pub fail_attach: bool,
    attached: RefCell<Option<(ElementNode, ElementNode)>>,
    attach_count: Cell<usize>,
    styles: RefCell<HashMap<(Part, String), String>>,
    handlers: RefCell<HashMap<BannerAction, Rc<dyn Fn()>>>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            height: 78.0,
            computed_duration: Some("0.4s".to_string()),
            fail_attach: false,
            attached: RefCell::new(None),
            attach_count: Cell::new(0),
            styles: RefCell::new(HashMap::new()),
            handlers: RefCell::new(HashMap::new()),
        }
    }
}

impl RecordingSurface {
    /// Surface whose document has no body to insert into
    pub fn failing_attach() -> Self {
        Self {
            fail_attach: true,
            ..Self::default()
        }
    }

    pub fn with_computed_duration(duration: Option<&str>) -> Self {
        Self {
            computed_duration: duration.map(str::to_string),
            ..Self::default()
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached.borrow().is_some()
    }

    pub fn attach_count(&self) -> usize {
        self.attach_count.get()
    }

    pub fn banner(&self) -> Option<ElementNode> {
        self.attached.borrow().as_ref().map(|(banner, _)| banner.clone())
    }

    pub fn style(&self, part: Part, property: &str) -> Option<String> {
        self.styles
            .borrow()
            .get(&(part, property.to_string()))
            .cloned()
    }

    /// Simulate a click; does nothing when the banner is gone
    pub fn click(&self, action: BannerAction) {
        let handler = self.handlers.borrow().get(&action).cloned();
        if let Some(handler) = handler {
            handler();
        }
    }
}

impl BannerSurface for RecordingSurface {
    fn attach(&self, banner: &ElementNode, placeholder: &ElementNode) -> BannerResult<()> {
        if self.fail_attach {
            return Err(BannerError::dom("attach", "document has no body"));
        }
        self.attach_count.set(self.attach_count.get() + 1);
        *self.attached.borrow_mut() = Some((banner.clone(), placeholder.clone()));
        Ok(())
    }

    fn banner_height(&self) -> f64 {
        if self.is_attached() {
            self.height
        } else {
            0.0
        }
    }

    fn transition_duration(&self) -> Option<String> {
        self.computed_duration.clone()
    }

    fn set_style(&self, part: Part, property: &str, value: &str) {
        if self.is_attached() {
            self.styles
                .borrow_mut()
                .insert((part, property.to_string()), value.to_string());
        }
    }

    fn bind(&self, action: BannerAction, handler: Rc<dyn Fn()>) -> BannerResult<()> {
        self.handlers.borrow_mut().insert(action, handler);
        Ok(())
    }

    fn detach(&self) {
        self.attached.borrow_mut().take();
        self.handlers.borrow_mut().clear();
        self.styles.borrow_mut().clear();
    }
}

/// Fixed page metadata
pub struct StaticPage {
    user_agent: String,
    standalone: bool,
    title: String,
    metas: HashMap<String, String>,
    links: HashMap<String, String>,
    host: String,
    origin: String,
}

impl Default for StaticPage {
    fn default() -> Self {
        Self {
            user_agent: String::new(),
            standalone: false,
            title: String::new(),
            metas: HashMap::new(),
            links: HashMap::new(),
            host: "example.test".to_string(),
            origin: "https://example.test".to_string(),
        }
    }
}

impl StaticPage {
    pub fn with_user_agent(mut self, ua: &str) -> Self {
        self.user_agent = ua.to_string();
        self
    }

    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_meta(mut self, name: &str, content: &str) -> Self {
        self.metas.insert(name.to_string(), content.to_string());
        self
    }

    pub fn with_link(mut self, rel: &str, href: &str) -> Self {
        self.links.insert(rel.to_string(), href.to_string());
        self
    }

    pub fn with_host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    pub fn with_origin(mut self, origin: &str) -> Self {
        self.origin = origin.to_string();
        self
    }
}

impl PageContext for StaticPage {
    fn user_agent(&self) -> String {
        self.user_agent.clone()
    }

    fn is_standalone(&self) -> bool {
        self.standalone
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn meta_content(&self, name: &str) -> Option<String> {
        self.metas.get(name).cloned()
    }

    fn link_href(&self, rel: &str) -> Option<String> {
        self.links.get(rel).cloned()
    }

    fn host(&self) -> String {
        self.host.clone()
    }

    fn origin(&self) -> String {
        self.origin.clone()
    }
}
