//! Configuration type definitions
//!
//! Defaults match the reference board: ATmega-class timer at 16 MHz ticking
//! at 2 Hz, 200 ms keypad debounce, 16x2 LCD driven with simulator margins.

use pocketplay_hal::TickPeriod;

use crate::clock::TICK_HZ;
use crate::keypad::{DebouncePolicy, DEBOUNCE_MS, SETTLE_US};
use crate::lcd::{BusTiming, LCD_COLS, LCD_ROWS, ROW_OFFSETS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Longest row supported by the HD44780 address map
pub const MAX_COLUMNS: u8 = 40;

/// Clock timer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockConfig {
    /// Interrupt rate (Hz); two ticks make one second
    pub tick_hz: u32,
    /// Timer input clock before the prescaler (Hz)
    pub timer_clock_hz: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            tick_hz: TICK_HZ,
            timer_clock_hz: 16_000_000,
        }
    }
}

impl ClockConfig {
    /// Timer period for this configuration, if reachable
    pub fn period(&self) -> Option<TickPeriod> {
        TickPeriod::for_rate(self.timer_clock_hz, self.tick_hz)
    }
}

/// Keypad scanner configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeypadConfig {
    /// Minimum time between accepted keys (ms)
    pub debounce_ms: u32,
    /// Column settle time after switching rows (µs)
    pub settle_us: u32,
    /// What opens a debounce window
    pub debounce_policy: DebouncePolicy,
}

impl Default for KeypadConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_MS,
            settle_us: SETTLE_US,
            debounce_policy: DebouncePolicy::ConfirmedKey,
        }
    }
}

/// Character LCD configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Visible columns
    pub columns: u8,
    /// Visible rows (at most 4)
    pub rows: u8,
    /// Use the widened simulator timing profile
    pub simulation: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            columns: LCD_COLS,
            rows: LCD_ROWS,
            simulation: true,
        }
    }
}

impl DisplayConfig {
    /// Bus timing profile for the configured mode
    pub fn timing(&self) -> BusTiming {
        BusTiming::for_mode(self.simulation)
    }

    /// Check the geometry against the controller's address map
    pub fn is_valid(&self) -> bool {
        (1..=MAX_COLUMNS).contains(&self.columns)
            && self.rows >= 1
            && self.rows as usize <= ROW_OFFSETS.len()
    }
}

/// Complete peripheral configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceConfig {
    pub clock: ClockConfig,
    pub keypad: KeypadConfig,
    pub display: DisplayConfig,
}
