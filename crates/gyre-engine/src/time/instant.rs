#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Instant;

#[cfg(target_arch = "wasm32")]
pub use web::Instant;

/// `std::time::Instant` is unavailable on `wasm32-unknown-unknown`; this is a
/// monotonic stand-in backed by `performance.now()`.
#[cfg(target_arch = "wasm32")]
mod web {
    use std::time::Duration;

    #[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
    pub struct Instant {
        millis: f64,
    }

    impl Instant {
        pub fn now() -> Self {
            let millis = web_sys::window()
                .and_then(|w| w.performance())
                .map(|p| p.now())
                .unwrap_or(0.0);
            Self { millis }
        }

        pub fn saturating_duration_since(&self, earlier: Instant) -> Duration {
            let delta = (self.millis - earlier.millis).max(0.0);
            Duration::from_secs_f64(delta / 1000.0)
        }
    }
}
