//! Timer deferral for the show delay and the post-hide removal

/// Fire-and-forget delayed callbacks. There is no cancellation.
pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

#[cfg(target_arch = "wasm32")]
pub use browser::TimeoutScheduler;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::Scheduler;
    use gloo_timers::callback::Timeout;

    /// `setTimeout`-backed scheduler
    #[derive(Debug, Clone, Copy, Default)]
    pub struct TimeoutScheduler;

    impl Scheduler for TimeoutScheduler {
        fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
            Timeout::new(delay_ms, task).forget();
        }
    }
}
