//! Time sources used by the driver
//!
//! The driver reads two clocks that must stay distinct:
//! - a coarse millisecond clock gating how often reads are allowed (throttle)
//! - a fine microsecond clock measuring the interval used to integrate gyro rates
//!
//! Both come from one [`Clock`] implementation but are sampled independently.

/// Monotonic time source
///
/// On embedded targets this is usually a thin wrapper around the HAL timer
/// (`embassy_time::Instant`, `rp2040_hal::Timer`, ...).
///
/// # Example
///
/// ```ignore
/// struct EmbassyClock;
///
/// impl Clock for EmbassyClock {
///     fn now_ms(&self) -> u64 {
///         embassy_time::Instant::now().as_millis()
///     }
///     fn now_us(&self) -> u64 {
///         embassy_time::Instant::now().as_micros()
///     }
/// }
/// ```
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin
    fn now_ms(&self) -> u64;

    /// Microseconds since an arbitrary fixed origin
    fn now_us(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }

    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}

/// Seconds elapsed between two microsecond timestamps
///
/// Uses saturating subtraction so a clock that goes backwards yields zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn elapsed_seconds(since_us: u64, now_us: u64) -> f32 {
    now_us.saturating_sub(since_us) as f32 * 1e-6
}
