//! HD44780 character LCD driver
//!
//! Drives the controller write-only over a 4-bit parallel bus (RS, E and
//! D4-D7; R/W tied low). There is no busy-flag polling: every transfer is
//! followed by a fixed wait from the active [`BusTiming`] profile.
//!
//! The driver is split by concern:
//!
//! - `bus` - nibble protocol, init sequence, cursor and text
//! - `scroll` - marquee scrolling on top of [`Marquee`]
//! - `glyph` - custom characters in CGRAM

mod bus;
mod glyph;
mod scroll;

use core::fmt;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use pocketplay_core::config::DisplayConfig;
use pocketplay_core::lcd::{
    BusTiming, DisplayControl, GlyphError, GlyphSlots, Marquee, TextTooLong,
};

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError<E> {
    /// A bus pin could not be driven
    Bus(E),
    /// Column or row outside the configured grid
    InvalidPosition,
    /// Marquee text longer than the scroll buffer
    ScrollTooLong,
    /// Bad glyph slot or batch size
    Glyph(GlyphError),
}

impl<E> From<GlyphError> for DisplayError<E> {
    fn from(e: GlyphError) -> Self {
        DisplayError::Glyph(e)
    }
}

impl<E> From<TextTooLong> for DisplayError<E> {
    fn from(_: TextTooLong) -> Self {
        DisplayError::ScrollTooLong
    }
}

/// Character LCD on a 4-bit bus
pub struct CharDisplay<P, D> {
    rs: P,
    en: P,
    /// D4..D7
    data: [P; 4],
    delay: D,
    config: DisplayConfig,
    timing: BusTiming,
    control: DisplayControl,
    marquee: Marquee,
    glyphs: GlyphSlots,
}

impl<P, D> CharDisplay<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Create a display driver
    ///
    /// The bus timing follows `config.simulation`. Nothing is sent until
    /// [`CharDisplay::init`].
    pub fn new(rs: P, en: P, data: [P; 4], delay: D, config: DisplayConfig) -> Self {
        Self {
            rs,
            en,
            data,
            delay,
            config,
            timing: config.timing(),
            control: DisplayControl::default(),
            marquee: Marquee::new(),
            glyphs: GlyphSlots::new(),
        }
    }

    /// Geometry and mode
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Active bus timing profile
    pub fn timing(&self) -> &BusTiming {
        &self.timing
    }

    /// Last display/cursor/blink flags sent
    pub fn control(&self) -> DisplayControl {
        self.control
    }

    /// Give back the pins and delay as `(rs, en, data, delay)`
    pub fn release(self) -> (P, P, [P; 4], D) {
        (self.rs, self.en, self.data, self.delay)
    }
}

impl<P, D> fmt::Write for CharDisplay<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.print(s).map_err(|_| fmt::Error)
    }
}
