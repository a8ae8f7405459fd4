//! Lifecycle Controller
//!
//! Orchestrates detection, resolution, insertion and the show/hide/remove
//! sequence of a single banner, and persists the user's decision.
//!
//! ```text
//! Uninitialized -> Detecting -> Aborted(reason)
//!                  Detecting -> Built -> Shown -> AnimatingOut -> Removed
//! ```
//!
//! A [`BannerHost`] is owned by the embedding page and allows at most one
//! live [`SmartBanner`] at a time. Everything runs on the browser's single
//! thread; timers are fire-and-forget and are never cancelled.

use crate::components::banner::{build_banner, build_placeholder};
use crate::services::config::BannerConfig;
use crate::services::errors::{BannerError, BannerResult};
use crate::services::metadata::{resolve, ResolvedBanner};
use crate::services::page::PageContext;
use crate::services::scheduler::Scheduler;
use crate::services::storage::{find_dismissal, record_dismissal, Dismissal, ExpiringStore};
use crate::services::surface::{BannerAction, BannerSurface, Part};
use crate::utils::{detect_platform, DetectionInput};
use crate::{console_debug, console_error, console_info, console_warn};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Added to the measured `offsetHeight` so the banner fully clears the viewport when hidden
pub const HEIGHT_CORRECTION_PX: f64 = 2.0;

/// Why a page got no banner. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Running from the home screen or inside an app shell
    Standalone,
    /// Not iOS/Android, or outside the configured version range
    UnsupportedPlatform,
    /// The user closed the banner or followed the store link recently
    PreviouslyDismissed(Dismissal),
    /// No `app-id=` metadata for the detected platform
    MissingAppId,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Standalone => f.write_str("running standalone"),
            SkipReason::UnsupportedPlatform => f.write_str("unsupported platform"),
            SkipReason::PreviouslyDismissed(Dismissal::Closed) => f.write_str("closed by user"),
            SkipReason::PreviouslyDismissed(Dismissal::Accepted) => {
                f.write_str("store link already followed")
            }
            SkipReason::MissingAppId => f.write_str("no app id metadata"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerState {
    Uninitialized,
    Detecting,
    Aborted(SkipReason),
    /// Inserted, positioned above the viewport, waiting for the show delay
    Built,
    /// Slid in; the CSS transition runs without being awaited
    Shown,
    /// Sliding out, removal scheduled
    AnimatingOut,
    Removed,
}

/// Outcome of [`BannerHost::create`]
pub enum Launch {
    Created(SmartBanner),
    /// A banner is already live on this host; nothing was done
    AlreadyActive,
    Skipped(SkipReason),
}

impl Launch {
    pub fn banner(&self) -> Option<&SmartBanner> {
        match self {
            Launch::Created(banner) => Some(banner),
            _ => None,
        }
    }
}

struct Shared {
    store: Rc<dyn ExpiringStore>,
    scheduler: Rc<dyn Scheduler>,
    surface: Rc<dyn BannerSurface>,
    live: RefCell<Option<Rc<RefCell<Instance>>>>,
    last_state: Cell<BannerState>,
}

struct Instance {
    config: Rc<BannerConfig>,
    resolved: ResolvedBanner,
    state: BannerState,
    height: f64,
    animation_secs: f64,
}

/// Owner of the banner slot for one page
pub struct BannerHost {
    page: Rc<dyn PageContext>,
    shared: Rc<Shared>,
}

impl BannerHost {
    pub fn new(
        page: Rc<dyn PageContext>,
        store: Rc<dyn ExpiringStore>,
        scheduler: Rc<dyn Scheduler>,
        surface: Rc<dyn BannerSurface>,
    ) -> Self {
        Self {
            page,
            shared: Rc::new(Shared {
                store,
                scheduler,
                surface,
                live: RefCell::new(None),
                last_state: Cell::new(BannerState::Uninitialized),
            }),
        }
    }

    /// Host wired to the current window: DOM metadata, cookies and `setTimeout`
    #[cfg(target_arch = "wasm32")]
    pub fn browser() -> BannerResult<Self> {
        use crate::services::page::DomPage;
        use crate::services::scheduler::TimeoutScheduler;
        use crate::services::storage::{Clock, CookieStore, SystemClock};
        use crate::services::surface::DomSurface;

        let window = web_sys::window().ok_or_else(|| BannerError::dom("host", "no window"))?;
        let document = window
            .document()
            .ok_or_else(|| BannerError::dom("host", "window has no document"))?;
        let clock: Rc<dyn Clock> = Rc::new(SystemClock);

        Ok(Self::new(
            Rc::new(DomPage::new(window.clone())?),
            Rc::new(CookieStore::new(document, clock)?),
            Rc::new(TimeoutScheduler),
            Rc::new(DomSurface::new(window)?),
        ))
    }

    /// The live banner, if any
    pub fn current(&self) -> Option<SmartBanner> {
        self.shared.live.borrow().as_ref().map(|instance| SmartBanner {
            instance: instance.clone(),
            shared: self.shared.clone(),
        })
    }

    /// State of the live banner, or the outcome of the last attempt
    pub fn state(&self) -> BannerState {
        self.current()
            .map(|banner| banner.state())
            .unwrap_or_else(|| self.shared.last_state.get())
    }

    /// Detect, build and schedule the banner. A no-op while a banner is live.
    pub fn create(&self, config: BannerConfig) -> BannerResult<Launch> {
        if self.shared.live.borrow().is_some() {
            console_debug!("[SmartBanner] Banner already live, ignoring create");
            return Ok(Launch::AlreadyActive);
        }

        config.validate().map_err(BannerError::InvalidConfig)?;
        let config = Rc::new(config);

        self.shared.last_state.set(BannerState::Detecting);
        let resolved = match self.detect(&config) {
            Ok(resolved) => resolved,
            Err(reason) => {
                console_info!("[SmartBanner] Not showing banner: {}", reason);
                self.shared.last_state.set(BannerState::Aborted(reason));
                return Ok(Launch::Skipped(reason));
            }
        };

        console_info!(
            "[SmartBanner] Building {} banner for app {}",
            resolved.platform,
            resolved.app_id
        );

        match self.build(config, resolved) {
            Ok(banner) => Ok(Launch::Created(banner)),
            Err(e) => {
                console_error!("[SmartBanner] Failed to insert banner: {}", e);
                self.shared.surface.detach();
                self.shared.live.borrow_mut().take();
                self.shared.last_state.set(BannerState::Uninitialized);
                Err(e)
            }
        }
    }

    fn detect(&self, config: &BannerConfig) -> Result<ResolvedBanner, SkipReason> {
        let standalone = self.page.is_standalone();
        if standalone {
            return Err(SkipReason::Standalone);
        }

        let user_agent = self.page.user_agent();
        let platform = config
            .platform
            .or_else(|| {
                detect_platform(&DetectionInput {
                    user_agent: &user_agent,
                    standalone,
                    min_ios_version: config.min_ios_version,
                    min_android_version: config.min_android_version,
                })
            })
            .ok_or(SkipReason::UnsupportedPlatform)?;

        if let Some(dismissal) = find_dismissal(self.shared.store.as_ref()) {
            return Err(SkipReason::PreviouslyDismissed(dismissal));
        }

        resolve(platform, config, self.page.as_ref()).ok_or(SkipReason::MissingAppId)
    }

    fn build(&self, config: Rc<BannerConfig>, resolved: ResolvedBanner) -> BannerResult<SmartBanner> {
        let surface = &self.shared.surface;

        surface.attach(&build_banner(&resolved, &config), &build_placeholder())?;

        // Measured once; later reflows are not tracked
        let height = surface.banner_height() + HEIGHT_CORRECTION_PX;
        surface.set_style(Part::Banner, "top", &format!("-{height}px"));

        let animation_secs =
            resolve_animation_secs(config.animation_secs, surface.transition_duration());
        let duration = format!("{animation_secs}s");
        surface.set_style(Part::Banner, "transition-duration", &duration);
        surface.set_style(Part::Placeholder, "transition-duration", &duration);

        let show_delay = config.show_delay_ms;
        let instance = Rc::new(RefCell::new(Instance {
            config,
            resolved,
            state: BannerState::Built,
            height,
            animation_secs,
        }));
        *self.shared.live.borrow_mut() = Some(instance.clone());

        let banner = SmartBanner {
            instance,
            shared: self.shared.clone(),
        };

        let weak = banner.downgrade();
        surface.bind(
            BannerAction::Close,
            Rc::new(move || {
                if let Some(banner) = weak.upgrade() {
                    banner.close();
                }
            }),
        )?;
        let weak = banner.downgrade();
        surface.bind(
            BannerAction::Accept,
            Rc::new(move || {
                if let Some(banner) = weak.upgrade() {
                    banner.accept();
                }
            }),
        )?;

        let pending = banner.clone();
        self.shared
            .scheduler
            .schedule(show_delay, Box::new(move || pending.reveal()));

        console_debug!(
            "[SmartBanner] Built: height {}px, animation {}s, showing in {}ms",
            height,
            animation_secs,
            show_delay
        );
        Ok(banner)
    }
}

/// Handle to one inserted banner. Cheap to clone; all clones control the same banner.
#[derive(Clone)]
pub struct SmartBanner {
    instance: Rc<RefCell<Instance>>,
    shared: Rc<Shared>,
}

impl SmartBanner {
    pub fn state(&self) -> BannerState {
        self.instance.borrow().state
    }

    /// Banner height including the correction, as measured at insertion
    pub fn height(&self) -> f64 {
        self.instance.borrow().height
    }

    pub fn animation_secs(&self) -> f64 {
        self.instance.borrow().animation_secs
    }

    pub fn resolved(&self) -> ResolvedBanner {
        self.instance.borrow().resolved.clone()
    }

    pub fn config(&self) -> Rc<BannerConfig> {
        self.instance.borrow().config.clone()
    }

    /// Slide the banner in and open the placeholder. Does not change the state.
    pub fn show(&self) {
        let Some(height) = self.attached_height() else {
            return;
        };
        let surface = &self.shared.surface;
        surface.set_style(Part::Banner, "top", "0");
        surface.set_style(Part::Placeholder, "height", &format!("{height}px"));
    }

    /// Slide the banner out and collapse the placeholder, keeping both in the document
    pub fn hide(&self) {
        let Some(height) = self.attached_height() else {
            return;
        };
        let surface = &self.shared.surface;
        surface.set_style(Part::Banner, "top", &format!("-{height}px"));
        surface.set_style(Part::Placeholder, "height", "0");
    }

    /// Hide, then detach once the slide-out animation has had time to finish
    pub fn remove(&self) {
        let animation_secs = {
            let mut instance = self.instance.borrow_mut();
            if instance.state == BannerState::Removed {
                return;
            }
            instance.state = BannerState::AnimatingOut;
            instance.animation_secs
        };

        self.hide();

        let delay_ms = (animation_secs * 1000.0).round() as u32;
        let banner = self.clone();
        self.shared
            .scheduler
            .schedule(delay_ms, Box::new(move || banner.destroy()));
        console_debug!("[SmartBanner] Removing in {}ms", delay_ms);
    }

    /// Detach both elements immediately and release the host slot
    pub fn destroy(&self) {
        {
            let mut instance = self.instance.borrow_mut();
            if instance.state == BannerState::Removed {
                return;
            }
            instance.state = BannerState::Removed;
        }

        self.shared.surface.detach();

        let mut live = self.shared.live.borrow_mut();
        if live
            .as_ref()
            .is_some_and(|current| Rc::ptr_eq(current, &self.instance))
        {
            *live = None;
        }
        self.shared.last_state.set(BannerState::Removed);
        console_info!("[SmartBanner] Banner removed");
    }

    /// Close control: remember for `daysHidden` days, then remove
    pub fn close(&self) {
        self.dismiss(Dismissal::Closed);
    }

    /// Store link followed: remember for `daysRemind` days, then remove
    pub fn accept(&self) {
        self.dismiss(Dismissal::Accepted);
    }

    fn dismiss(&self, dismissal: Dismissal) {
        let config = {
            let instance = self.instance.borrow();
            if !matches!(instance.state, BannerState::Built | BannerState::Shown) {
                console_debug!("[SmartBanner] Ignoring {:?} while {:?}", dismissal, instance.state);
                return;
            }
            instance.config.clone()
        };

        if let Err(e) = record_dismissal(self.shared.store.as_ref(), dismissal, &config) {
            console_warn!("[SmartBanner] Could not persist {:?}: {}", dismissal, e);
        }
        console_info!("[SmartBanner] {:?} by user", dismissal);
        self.remove();
    }

    /// Show-delay timer. A banner already leaving is shown and immediately
    /// hidden again so the removal sequence stays intact.
    fn reveal(&self) {
        let state = self.state();
        match state {
            BannerState::Built => {
                self.instance.borrow_mut().state = BannerState::Shown;
                self.show();
                console_debug!("[SmartBanner] Shown");
            }
            BannerState::AnimatingOut => {
                self.show();
                self.hide();
            }
            _ => {}
        }
    }

    fn attached_height(&self) -> Option<f64> {
        let instance = self.instance.borrow();
        (instance.state != BannerState::Removed).then_some(instance.height)
    }

    fn downgrade(&self) -> WeakBanner {
        WeakBanner {
            instance: Rc::downgrade(&self.instance),
            shared: Rc::downgrade(&self.shared),
        }
    }
}

/// Handle held by DOM listeners so the surface does not keep the banner alive
struct WeakBanner {
    instance: Weak<RefCell<Instance>>,
    shared: Weak<Shared>,
}

impl WeakBanner {
    fn upgrade(&self) -> Option<SmartBanner> {
        Some(SmartBanner {
            instance: self.instance.upgrade()?,
            shared: self.shared.upgrade()?,
        })
    }
}

/// Configured time if positive, else the stylesheet's computed
/// `transition-duration`, else zero
pub fn resolve_animation_secs(configured: Option<f64>, computed: Option<String>) -> f64 {
    configured
        .filter(|secs| *secs > 0.0)
        .or_else(|| computed.as_deref().and_then(parse_css_duration))
        .unwrap_or(0.0)
}

/// First entry of a CSS time list, in seconds: `"0.4s"`, `"400ms"`, `"0.3s, 1s"`
pub fn parse_css_duration(value: &str) -> Option<f64> {
    let first = value.split(',').next()?.trim();
    let secs = if let Some(ms) = first.strip_suffix("ms") {
        ms.trim().parse::<f64>().ok()? / 1000.0
    } else {
        first.strip_suffix('s').unwrap_or(first).trim().parse::<f64>().ok()?
    };
    (secs.is_finite() && secs >= 0.0).then_some(secs)
}
