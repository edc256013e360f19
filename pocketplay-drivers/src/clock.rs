//! Half-second game clock
//!
//! The clock is split in two so the interrupt handler never needs a `&mut`:
//!
//! - [`ClockCounter`] holds the counters and the tick callback. It is meant
//!   to live in a `static` and is shared between the timer interrupt and the
//!   main flow.
//! - [`Clock`] owns the timer peripheral and borrows the counter. It is the
//!   handle the game loop uses to start, stop and reset the clock.
//!
//! ```ignore
//! static COUNTER: ClockCounter = ClockCounter::new();
//!
//! #[interrupt]
//! fn TIMER1_COMPA() {
//!     COUNTER.on_interrupt();
//! }
//! ```
//!
//! Every read or write of the counters happens inside a critical section, so
//! `seconds` and the half-second phase are always observed together.

use core::cell::Cell;

use critical_section::Mutex;
use pocketplay_core::clock::{ClockReading, ClockState};
use pocketplay_core::config::ClockConfig;
use pocketplay_hal::{CompareTimer, TickPeriod};

/// Function called from the tick interrupt with the updated counters
pub type TickCallback = fn(ClockReading);

/// Clock errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// No prescaler/compare pair produces the requested tick rate
    UnreachableRate,
}

/// Interrupt-shared clock counters
pub struct ClockCounter {
    state: Mutex<Cell<ClockState>>,
    callback: Mutex<Cell<Option<TickCallback>>>,
}

impl Default for ClockCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockCounter {
    /// Create a zeroed, stopped counter with no callback
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(Cell::new(ClockState::new())),
            callback: Mutex::new(Cell::new(None)),
        }
    }

    /// Create a zeroed, stopped counter that calls `callback` on every tick
    pub const fn with_callback(callback: TickCallback) -> Self {
        Self {
            state: Mutex::new(Cell::new(ClockState::new())),
            callback: Mutex::new(Cell::new(Some(callback))),
        }
    }

    /// Timer compare-match handler
    ///
    /// Does nothing while the clock is stopped. Otherwise advances the
    /// counters and then runs the callback with the new reading. The
    /// callback runs after the critical section ends, so it may read the
    /// clock itself.
    pub fn on_interrupt(&self) {
        let fired = critical_section::with(|cs| {
            let cell = self.state.borrow(cs);
            let mut state = cell.get();
            if !state.tick() {
                return None;
            }
            cell.set(state);
            Some((state.reading(), self.callback.borrow(cs).get()))
        });

        if let Some((reading, Some(callback))) = fired {
            callback(reading);
        }
    }

    /// Consistent snapshot of both counters
    pub fn reading(&self) -> ClockReading {
        critical_section::with(|cs| self.state.borrow(cs).get().reading())
    }

    /// Check if ticks are being counted
    pub fn is_running(&self) -> bool {
        critical_section::with(|cs| self.state.borrow(cs).get().is_running())
    }

    /// Replace (or remove) the tick callback
    pub fn set_callback(&self, callback: Option<TickCallback>) {
        critical_section::with(|cs| self.callback.borrow(cs).set(callback));
    }

    fn update<R>(&self, f: impl FnOnce(&mut ClockState) -> R) -> R {
        critical_section::with(|cs| {
            let cell = self.state.borrow(cs);
            let mut state = cell.get();
            let result = f(&mut state);
            cell.set(state);
            result
        })
    }
}

/// Game clock driver
pub struct Clock<'a, T> {
    counter: &'a ClockCounter,
    timer: T,
}

impl<'a, T: CompareTimer> Clock<'a, T> {
    /// Create a clock over a shared counter and a timer peripheral
    ///
    /// The timer is not touched until [`Clock::configure`].
    pub fn new(counter: &'a ClockCounter, timer: T) -> Self {
        Self { counter, timer }
    }

    /// Program the timer for the configured tick rate
    ///
    /// The timer is set up with interrupts masked and the compare interrupt
    /// left disabled; call [`Clock::start`] to begin counting.
    pub fn configure(&mut self, config: &ClockConfig) -> Result<TickPeriod, ClockError> {
        let period = config.period().ok_or(ClockError::UnreachableRate)?;

        let timer = &mut self.timer;
        critical_section::with(|_| timer.configure(period));

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "clock: prescaler {} compare {}",
            period.prescaler,
            period.compare
        );

        Ok(period)
    }

    /// Start counting ticks
    ///
    /// No-op when already running. The counters keep their values.
    pub fn start(&mut self) {
        let timer = &mut self.timer;
        self.counter.update(|state| {
            if !state.is_running() {
                timer.enable_interrupt();
                state.set_running(true);
            }
        });
    }

    /// Stop counting ticks
    ///
    /// No-op when already stopped. The counters keep their values.
    pub fn stop(&mut self) {
        let timer = &mut self.timer;
        self.counter.update(|state| {
            if state.is_running() {
                timer.disable_interrupt();
                state.set_running(false);
            }
        });
    }

    /// Zero the counters and restart the timer period
    ///
    /// A running clock keeps running; the next tick is a full period away.
    pub fn reset(&mut self) {
        let timer = &mut self.timer;
        self.counter.update(|state| {
            state.reset();
            timer.restart();
        });

        #[cfg(feature = "defmt")]
        defmt::debug!("clock: reset");
    }

    /// Whole seconds since the last reset
    pub fn seconds(&self) -> u32 {
        self.counter.reading().seconds
    }

    /// Half-second ticks since the last reset (`seconds * 2 + phase`)
    pub fn total_half_ticks(&self) -> u32 {
        self.counter.reading().total_half_ticks()
    }

    /// Both counters at once
    pub fn reading(&self) -> ClockReading {
        self.counter.reading()
    }

    /// Check if the clock is counting
    pub fn is_running(&self) -> bool {
        self.counter.is_running()
    }

    /// Replace the tick callback
    pub fn set_tick_callback(&mut self, callback: Option<TickCallback>) {
        self.counter.set_callback(callback);
    }

    /// Give back the timer peripheral
    pub fn release(self) -> T {
        self.timer
    }
}
