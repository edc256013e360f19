//! Key debounce window

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reference debounce window (ms)
pub const DEBOUNCE_MS: u32 = 200;

/// What opens a new debounce window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DebouncePolicy {
    /// Only a scan that returned a key
    #[default]
    ConfirmedKey,
    /// Any scan that consumed a detect flag, including ones where no column
    /// matched (suppresses bursts of edge noise as well)
    ScanAttempt,
}

/// Minimum spacing between accepted key detections
///
/// Timestamps are milliseconds from a wrapping `u32` counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debounce {
    window_ms: u32,
    policy: DebouncePolicy,
    /// When the current window opened; `None` until the first stamp
    last_ms: Option<u32>,
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(DEBOUNCE_MS, DebouncePolicy::default())
    }
}

impl Debounce {
    /// Create a debounce gate
    pub const fn new(window_ms: u32, policy: DebouncePolicy) -> Self {
        Self {
            window_ms,
            policy,
            last_ms: None,
        }
    }

    /// Check if a scan at `now_ms` falls inside the window
    pub fn is_blocked(&self, now_ms: u32) -> bool {
        match self.last_ms {
            Some(last) => now_ms.wrapping_sub(last) < self.window_ms,
            None => false,
        }
    }

    /// Record the outcome of a scan that consumed a detect flag
    pub fn record(&mut self, now_ms: u32, matched: bool) {
        let stamp = match self.policy {
            DebouncePolicy::ConfirmedKey => matched,
            DebouncePolicy::ScanAttempt => true,
        };

        if stamp {
            self.last_ms = Some(now_ms);
        }
    }

    /// Forget the last stamp
    pub fn clear(&mut self) {
        self.last_ms = None;
    }

    /// Active policy
    pub fn policy(&self) -> DebouncePolicy {
        self.policy
    }

    /// Window length in milliseconds
    pub fn window_ms(&self) -> u32 {
        self.window_ms
    }
}
