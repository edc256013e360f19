//! Custom glyphs

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use pocketplay_core::lcd::command::{cgram_address, cmd};
use pocketplay_core::lcd::glyph::{check_count, check_slot};
use pocketplay_core::lcd::{Glyph, GLYPH_SLOTS};

use super::{CharDisplay, DisplayError};

impl<P, D, E> CharDisplay<P, D>
where
    P: OutputPin<Error = E>,
    D: DelayNs,
{
    /// Program one glyph slot
    ///
    /// A slot of 8 or more is rejected before anything is sent. Afterwards
    /// the address counter points back at DDRAM address 0, so the next
    /// write goes to the screen again.
    pub fn create_char(&mut self, slot: u8, glyph: &Glyph) -> Result<(), DisplayError<E>> {
        if let Err(e) = check_slot(slot) {
            #[cfg(feature = "defmt")]
            defmt::warn!("lcd: glyph slot {} out of range", slot);
            return Err(e.into());
        }

        self.command(cgram_address(slot))?;
        for &row in glyph.iter() {
            self.write_char(row)?;
        }
        self.command(cmd::SET_DDRAM_ADDR)?;

        self.glyphs.mark(slot);
        Ok(())
    }

    /// Program slots `0..glyphs.len()` in order
    ///
    /// More than eight glyphs is rejected before anything is sent. A bus
    /// error stops at the failing slot; earlier slots stay programmed.
    pub fn create_chars(&mut self, glyphs: &[Glyph]) -> Result<(), DisplayError<E>> {
        check_count(glyphs.len())?;

        for (slot, glyph) in glyphs.iter().enumerate() {
            self.create_char(slot as u8, glyph)?;
        }
        Ok(())
    }

    /// Write the character code of a glyph slot at the cursor
    ///
    /// Slots outside `0..8` are ignored.
    pub fn write_custom_char(&mut self, slot: u8) -> Result<(), DisplayError<E>> {
        if (slot as usize) < GLYPH_SLOTS {
            self.write_char(slot)?;
        }
        Ok(())
    }

    /// Number of slots programmed since init
    pub fn glyph_count(&self) -> u8 {
        self.glyphs.count()
    }

    /// Check whether a slot has been programmed since init
    pub fn has_glyph(&self, slot: u8) -> bool {
        self.glyphs.is_programmed(slot)
    }
}
