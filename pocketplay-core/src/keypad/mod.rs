//! 4x4 matrix keypad logic
//!
//! The scanner drives one row low at a time and reads the four columns
//! through pull-ups, so a closed key pulls its column low only while its row
//! is active. A pin-change interrupt on the columns sets [`KeyDetect`];
//! the polled scan consumes it.

pub mod debounce;
pub mod detect;

pub use debounce::{Debounce, DebouncePolicy, DEBOUNCE_MS};
pub use detect::KeyDetect;

/// Number of row lines
pub const ROWS: usize = 4;

/// Number of column lines
pub const COLS: usize = 4;

/// Column settle time after switching rows (µs)
pub const SETTLE_US: u32 = 500;

/// Symbol printed on each key, indexed `[row][col]`
pub type KeyMap = [[char; COLS]; ROWS];

/// Standard telephone-style membrane keypad layout
pub const DEFAULT_KEYMAP: KeyMap = [
    ['1', '2', '3', 'A'],
    ['4', '5', '6', 'B'],
    ['7', '8', '9', 'C'],
    ['*', '0', '#', 'D'],
];

/// Round-robin row selector
///
/// Every scan advances to the next row whether or not a key was found, so
/// the edge interrupt (which only fires for keys on the active row) gets a
/// chance on every row within [`ROWS`] scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RowCycle {
    current: u8,
}

impl RowCycle {
    /// Start with row 0 active
    pub const fn new() -> Self {
        Self { current: 0 }
    }

    /// Currently active row
    pub fn current(&self) -> u8 {
        self.current
    }

    /// Move to the next row
    ///
    /// Returns `(previous, next)` so the caller can release the old row
    /// before driving the new one.
    pub fn advance(&mut self) -> (u8, u8) {
        let previous = self.current;
        self.current = self.next();
        (previous, self.current)
    }

    /// Row that the next [`RowCycle::advance`] moves to
    pub fn next(&self) -> u8 {
        (self.current + 1) % ROWS as u8
    }
}
