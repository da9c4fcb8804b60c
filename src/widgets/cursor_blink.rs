use std::time::Duration;

/// Delay between mount and the first blink cycle
pub const BLINK_DELAY: Duration = Duration::from_millis(1000);

/// Length of one transparent → opaque → transparent cycle
pub const BLINK_PERIOD: Duration = Duration::from_millis(800);

/// Cursor blink curve (rendering-agnostic)
///
/// Keyframes: transparent at 0%, opaque at 50%, transparent at 100%, linear in
/// between, repeated forever after the initial delay. Independent of the text
/// animation; it only needs the time since the widget was mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorBlink {
    pub delay: Duration,
    pub period: Duration,
    pub enabled: bool,
}

impl Default for CursorBlink {
    fn default() -> Self {
        Self {
            delay: BLINK_DELAY,
            period: BLINK_PERIOD,
            enabled: true,
        }
    }
}

impl CursorBlink {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    /// Opacity in `0.0..=1.0` at `since_mount`
    ///
    /// `None` while the animation has not started yet (or is disabled): the
    /// cursor then keeps its own, un-animated color.
    pub fn opacity(&self, since_mount: Duration) -> Option<f32> {
        if !self.enabled || self.period.is_zero() || since_mount < self.delay {
            return None;
        }

        let into_cycle = (since_mount - self.delay).as_nanos() % self.period.as_nanos();
        let progress = into_cycle as f64 / self.period.as_nanos() as f64;
        let opacity = if progress <= 0.5 {
            progress * 2.0
        } else {
            (1.0 - progress) * 2.0
        };

        Some(opacity.clamp(0.0, 1.0) as f32)
    }

    /// Whether a frame at `since_mount` can look different from the last one
    pub fn is_animating(&self, since_mount: Duration) -> bool {
        self.opacity(since_mount).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: u64) -> Option<f32> {
        CursorBlink::default().opacity(Duration::from_millis(ms))
    }

    #[test]
    fn test_not_started_before_delay() {
        assert_eq!(at(0), None);
        assert_eq!(at(999), None);
    }

    #[test]
    fn test_keyframes() {
        assert_eq!(at(1000), Some(0.0));
        assert_eq!(at(1400), Some(1.0));
        assert_eq!(at(1800), Some(0.0));
        assert_eq!(at(1800 + 400), Some(1.0));
    }

    #[test]
    fn test_linear_between_keyframes() {
        let quarter = at(1200).unwrap();
        assert!((quarter - 0.5).abs() < 1e-6);
        let three_quarters = at(1600).unwrap();
        assert!((three_quarters - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_disabled_never_animates() {
        let blink = CursorBlink::new(false);
        assert_eq!(blink.opacity(Duration::from_millis(1400)), None);
        assert!(!blink.is_animating(Duration::from_secs(60)));
    }
}
