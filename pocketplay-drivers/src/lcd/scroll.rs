//! Marquee scrolling

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use pocketplay_core::config::types::MAX_COLUMNS;
use pocketplay_core::lcd::{ScrollDirection, ScrollStart, ScrollState};

use super::{CharDisplay, DisplayError};

impl<P, D, E> CharDisplay<P, D>
where
    P: OutputPin<Error = E>,
    D: DelayNs,
{
    /// Show `text` on `row`, scrolling it if it is wider than the display
    ///
    /// Text that fits is drawn once, centered, after clearing the screen,
    /// and any running scroll is dropped. Longer text is queued and nothing
    /// is drawn until the first [`CharDisplay::update_scroll`].
    pub fn start_scroll(
        &mut self,
        text: &str,
        row: u8,
        direction: ScrollDirection,
    ) -> Result<(), DisplayError<E>> {
        if row >= self.config.rows {
            return Err(DisplayError::InvalidPosition);
        }

        let bytes = text.as_bytes();
        match self
            .marquee
            .start(bytes, row, direction, self.config.columns)?
        {
            ScrollStart::Static { col } => {
                self.clear()?;
                self.set_cursor(col, row)?;
                self.print_bytes(bytes)
            }
            ScrollStart::Scrolling => Ok(()),
        }
    }

    /// Draw the current window and move it one step
    ///
    /// Does nothing unless a scroll is in progress. Call at a steady rate
    /// from the game loop.
    ///
    /// A display wider than [`MAX_COLUMNS`] cannot be scrolled and reports
    /// [`DisplayError::InvalidPosition`].
    pub fn update_scroll(&mut self) -> Result<(), DisplayError<E>> {
        if !self.marquee.is_scrolling() {
            return Ok(());
        }

        let mut buf = [0u8; MAX_COLUMNS as usize];
        let buf = buf
            .get_mut(..self.config.columns as usize)
            .ok_or(DisplayError::InvalidPosition)?;
        let Some(window) = self.marquee.window(buf) else {
            return Ok(());
        };

        let row = self.marquee.row();
        self.set_cursor(0, row)?;
        self.print_bytes(window)?;
        self.marquee.advance();
        Ok(())
    }

    /// Drop the scroll text and return to idle
    ///
    /// The screen is left as it is.
    pub fn stop_scroll(&mut self) {
        self.marquee.stop();
    }

    /// Change direction of a running scroll without restarting it
    pub fn set_scroll_direction(&mut self, direction: ScrollDirection) {
        self.marquee.set_direction(direction);
    }

    /// Check if a scroll is in progress
    pub fn is_scrolling(&self) -> bool {
        self.marquee.is_scrolling()
    }

    /// Index of the first character shown by the next update
    pub fn scroll_position(&self) -> usize {
        self.marquee.position()
    }

    /// Idle, static or scrolling
    pub fn scroll_state(&self) -> ScrollState {
        self.marquee.state()
    }
}
