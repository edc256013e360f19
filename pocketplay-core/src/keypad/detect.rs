//! Interrupt-to-scanner key detect flag

use portable_atomic::{AtomicBool, AtomicU8, Ordering};

/// Single-slot flag set by the pin-change interrupt
///
/// The interrupt handler calls [`signal`](Self::signal); the scanner
/// consumes it with [`take`](Self::take), an atomic test-and-clear, so an
/// edge landing between the check and the clear can never be lost. An edge
/// that lands after `take` but before the columns are read is seen on a
/// later scan, at most one full row cycle later.
///
/// The active row is published here too so handlers can tell which row the
/// edge belongs to.
#[derive(Debug)]
pub struct KeyDetect {
    pending: AtomicBool,
    row: AtomicU8,
}

impl Default for KeyDetect {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyDetect {
    /// Create a cleared flag
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
            row: AtomicU8::new(0),
        }
    }

    /// Mark a key edge as detected (interrupt side)
    pub fn signal(&self) {
        self.pending.store(true, Ordering::Release);
    }

    /// Consume the flag, returning whether it was set (scanner side)
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    /// Check the flag without consuming it
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Drop any pending detection
    pub fn clear(&self) {
        self.pending.store(false, Ordering::Release);
    }

    /// Publish the row the scanner is driving
    pub fn set_active_row(&self, row: u8) {
        self.row.store(row, Ordering::Release);
    }

    /// Row the scanner is currently driving
    pub fn active_row(&self) -> u8 {
        self.row.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_clears() {
        let detect = KeyDetect::new();
        assert!(!detect.take());

        detect.signal();
        assert!(detect.is_pending());
        assert!(detect.take());
        assert!(!detect.take());
    }

    #[test]
    fn test_repeated_signals_collapse() {
        let detect = KeyDetect::new();
        detect.signal();
        detect.signal();
        assert!(detect.take());
        assert!(!detect.is_pending());
    }

    #[test]
    fn test_active_row_published() {
        static DETECT: KeyDetect = KeyDetect::new();
        DETECT.set_active_row(3);
        assert_eq!(DETECT.active_row(), 3);
    }
}
