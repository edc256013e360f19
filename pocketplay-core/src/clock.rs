//! Half-second clock counter
//!
//! The clock counts timer interrupts at 2 Hz. Each interrupt flips the
//! half-second phase; every second flip (phase wrapping back to 0) carries
//! into the whole-second counter.
//!
//! ```text
//! tick:     1    2    3    4    5
//! phase:  0→1  1→0  0→1  1→0  0→1
//! seconds:  0    1    1    2    2
//! ```
//!
//! This type holds no synchronization of its own. The driver keeps it inside
//! a critical-section mutex so the interrupt handler and the main flow always
//! see both fields updated together.

/// Reference interrupt rate
pub const TICK_HZ: u32 = 2;

/// Snapshot of the clock counters
///
/// Handed to tick callbacks and returned by readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockReading {
    /// Whole seconds elapsed
    pub seconds: u32,
    /// Half-second phase (0 or 1)
    pub phase: u8,
}

impl ClockReading {
    /// Total half-second ticks (`seconds * 2 + phase`), wrapping on overflow
    pub fn total_half_ticks(&self) -> u32 {
        self.seconds.wrapping_mul(2).wrapping_add(self.phase as u32)
    }
}

/// Clock counter state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockState {
    seconds: u32,
    phase: u8,
    running: bool,
}

impl ClockState {
    /// Create a zeroed, stopped clock
    pub const fn new() -> Self {
        Self {
            seconds: 0,
            phase: 0,
            running: false,
        }
    }

    /// Advance by one timer interrupt
    ///
    /// Returns `false` without touching the counters when the clock is
    /// stopped. Otherwise the phase toggles first, then the seconds carry.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }

        self.phase ^= 1;
        if self.phase == 0 {
            self.seconds = self.seconds.wrapping_add(1);
        }

        true
    }

    /// Zero both counters
    ///
    /// The running flag is left alone: a running clock keeps counting from
    /// zero, a stopped one stays stopped.
    pub fn reset(&mut self) {
        self.seconds = 0;
        self.phase = 0;
    }

    /// Set the running flag
    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Check if ticks are being counted
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whole seconds elapsed
    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    /// Current half-second phase (0 or 1)
    pub fn phase(&self) -> u8 {
        self.phase
    }

    /// Total half-second ticks, wrapping on overflow
    pub fn total_half_ticks(&self) -> u32 {
        self.reading().total_half_ticks()
    }

    /// Snapshot of the counters
    pub fn reading(&self) -> ClockReading {
        ClockReading {
            seconds: self.seconds,
            phase: self.phase,
        }
    }
}
