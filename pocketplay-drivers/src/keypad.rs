//! 4x4 matrix keypad scanner
//!
//! Rows are outputs idling high; columns are inputs with pull-ups. One row
//! is driven low per scan, so a pressed key pulls its column low only while
//! its row is the active one. A pin-change interrupt on the columns raises
//! the shared [`KeyDetect`] flag; [`KeyScanner::get_key`] only reads the
//! columns when that flag was set.
//!
//! ```text
//!            C0   C1   C2   C3   (pull-up inputs, pin-change irq)
//!   R0 ──────┼────┼────┼────┼─
//!   R1 ──────┼────┼────┼────┼─   one row low at a time,
//!   R2 ──────┼────┼────┼────┼─   advanced every scan
//!   R3 ──────┼────┼────┼────┼─
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use pocketplay_core::config::KeypadConfig;
use pocketplay_core::keypad::{
    Debounce, KeyDetect, KeyMap, RowCycle, COLS, DEFAULT_KEYMAP, ROWS,
};
use pocketplay_hal::{Monotonic, PinChangeInterrupt};

/// Debounced keypad scanner
///
/// Row and column pins must share an error type, as pins from one HAL do.
pub struct KeyScanner<'a, R, C, D, M, I> {
    rows: [R; ROWS],
    cols: [C; COLS],
    delay: D,
    clock: M,
    irq: I,
    detect: &'a KeyDetect,
    keymap: KeyMap,
    cycle: RowCycle,
    debounce: Debounce,
    settle_us: u32,
}

impl<'a, R, C, D, M, I, E> KeyScanner<'a, R, C, D, M, I>
where
    R: OutputPin<Error = E>,
    C: InputPin<Error = E>,
    D: DelayNs,
    M: Monotonic,
    I: PinChangeInterrupt,
{
    /// Create a scanner with the default keymap
    ///
    /// Nothing is driven until [`KeyScanner::init`].
    pub fn new(
        rows: [R; ROWS],
        cols: [C; COLS],
        delay: D,
        clock: M,
        irq: I,
        detect: &'a KeyDetect,
        config: &KeypadConfig,
    ) -> Self {
        Self {
            rows,
            cols,
            delay,
            clock,
            irq,
            detect,
            keymap: DEFAULT_KEYMAP,
            cycle: RowCycle::new(),
            debounce: Debounce::new(config.debounce_ms, config.debounce_policy),
            settle_us: config.settle_us,
        }
    }

    /// Use a different key layout
    pub fn with_keymap(mut self, keymap: KeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Put every row in the idle (high) state and arm the column interrupt
    ///
    /// Any detect flag raised before this point is discarded.
    pub fn init(&mut self) -> Result<(), E> {
        for row in self.rows.iter_mut() {
            row.set_high()?;
        }

        self.cycle = RowCycle::new();
        self.debounce.clear();
        self.detect.set_active_row(self.cycle.current());
        self.detect.clear();
        self.irq.arm();

        Ok(())
    }

    /// Scan one row and return the key pressed on it, if any
    ///
    /// The debounce window is measured from the start of the scan that
    /// opened it.
    ///
    /// Inside the debounce window this returns `None` without touching the
    /// pins. Otherwise the next row becomes active, the columns get time to
    /// settle, and they are read only if the pin-change interrupt fired since
    /// the last scan. The flag is consumed whether or not a key is found.
    pub fn get_key(&mut self) -> Result<Option<char>, E> {
        let now = self.clock.now_ms();
        if self.debounce.is_blocked(now) {
            return Ok(None);
        }

        // The cycle only moves once both row lines have switched
        let previous = self.cycle.current();
        let next = self.cycle.next();
        self.rows[previous as usize].set_high()?;
        self.rows[next as usize].set_low()?;
        self.cycle.advance();
        self.detect.set_active_row(next);
        self.delay.delay_us(self.settle_us);

        if !self.detect.take() {
            return Ok(None);
        }

        let key = self.scan_columns(next as usize)?;
        self.debounce.record(now, key.is_some());

        #[cfg(feature = "defmt")]
        match key {
            Some(key) => defmt::debug!("keypad: '{}' on row {}", key, next),
            None => defmt::trace!("keypad: edge on row {} without a key", next),
        }

        Ok(key)
    }

    /// First column pulled low on the active row
    fn scan_columns(&mut self, row: usize) -> Result<Option<char>, E> {
        for (col, pin) in self.cols.iter_mut().enumerate() {
            if pin.is_low()? {
                return Ok(Some(self.keymap[row][col]));
            }
        }
        Ok(None)
    }

    /// Row driven low by the last scan
    pub fn current_row(&self) -> u8 {
        self.cycle.current()
    }

    /// Debounce gate state
    pub fn debounce(&self) -> &Debounce {
        &self.debounce
    }

    /// Disarm the column interrupt and return every row to idle
    pub fn shutdown(&mut self) -> Result<(), E> {
        self.irq.disarm();
        for row in self.rows.iter_mut() {
            row.set_high()?;
        }
        Ok(())
    }
}
