//! HD44780 character LCD logic
//!
//! Everything the display driver needs that is independent of the pins:
//! the controller's command set and address maps, bus timing profiles,
//! the marquee scroll state machine and custom glyph bookkeeping.

pub mod command;
pub mod glyph;
pub mod marquee;
pub mod timing;

pub use command::{DisplayControl, ROW_OFFSETS};
pub use glyph::{Glyph, GlyphError, GlyphSlots, GLYPH_HEIGHT, GLYPH_SLOTS};
pub use marquee::{Marquee, ScrollDirection, ScrollStart, ScrollState, TextTooLong, MAX_SCROLL_LEN};
pub use timing::BusTiming;

/// Visible columns on the reference module
pub const LCD_COLS: u8 = 16;

/// Visible rows on the reference module
pub const LCD_ROWS: u8 = 2;
