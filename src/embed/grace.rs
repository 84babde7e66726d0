/// Loading grace period for a card's embed container
use gloo_timers::callback::Timeout;

/// Fires `on_elapsed` once after `delay_ms` unless dropped first.
///
/// Hold it for as long as the embed it guards; a URL change or unmount
/// drops it and the callback never runs.
pub struct LoadingGrace {
    _timeout: Timeout,
}

impl LoadingGrace {
    pub fn start(delay_ms: u32, on_elapsed: impl FnOnce() + 'static) -> Self {
        LoadingGrace {
            _timeout: Timeout::new(delay_ms, on_elapsed),
        }
    }
}
