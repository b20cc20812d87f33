use std::fmt::Display;
use std::time::Duration;

/// Playback speed as shown on the speed control. Higher is faster.
///
/// The setting maps inversely onto the delay between two steps: `delay = 101 - setting`
/// milliseconds, so the fastest setting waits 1 ms and the slowest 100 ms.
///
/// ```
/// use std::time::Duration;
/// use sortviz_core::Speed;
///
/// assert_eq!(Speed::new(100).delay(), Duration::from_millis(1));
/// assert_eq!(Speed::new(1).delay(), Duration::from_millis(100));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Speed(u8);

impl Speed {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 100;

    /// Creates a speed, clamping `setting` into `[Speed::MIN, Speed::MAX]`.
    pub fn new(setting: u8) -> Self {
        Self(setting.clamp(Self::MIN, Self::MAX))
    }

    pub fn setting(self) -> u8 {
        self.0
    }

    pub fn delay(self) -> Duration {
        Duration::from_millis(u64::from(101 - self.0))
    }

    pub fn faster(self, by: u8) -> Self {
        Self::new(self.0.saturating_add(by))
    }

    pub fn slower(self, by: u8) -> Self {
        Self::new(self.0.saturating_sub(by))
    }
}

impl Default for Speed {
    // 50 ms between steps
    fn default() -> Self {
        Self(51)
    }
}

impl Display for Speed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} ms/step)", self.0, self.delay().as_millis())
    }
}
