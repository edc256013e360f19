//! Custom glyphs in character-generator RAM
//!
//! The controller has eight 5x8 glyph slots. Character codes 0-7 written to
//! display RAM render the glyph in that slot instead of the ROM font.

/// Number of programmable glyph slots
pub const GLYPH_SLOTS: usize = 8;

/// Rows per glyph (5x8 font)
pub const GLYPH_HEIGHT: usize = 8;

/// Glyph bitmap, one byte per row, low 5 bits used (bit 4 = leftmost pixel)
pub type Glyph = [u8; GLYPH_HEIGHT];

/// Ball used by the paddle games
pub const BALL: Glyph = [
    0b00000, 0b00000, 0b00100, 0b01110, 0b01110, 0b00100, 0b00000, 0b00000,
];

/// Paddle hugging the left edge of its cell
pub const LEFT_PADDLE: Glyph = [
    0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000,
];

/// Paddle hugging the right edge of its cell
pub const RIGHT_PADDLE: Glyph = [
    0b00001, 0b00001, 0b00001, 0b00001, 0b00001, 0b00001, 0b00001, 0b00001,
];

/// Glyph programming errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GlyphError {
    /// Slot index is 8 or more
    Slot(u8),
    /// More than 8 glyphs requested at once
    Count(usize),
}

/// Validate a slot index
pub fn check_slot(slot: u8) -> Result<(), GlyphError> {
    if (slot as usize) < GLYPH_SLOTS {
        Ok(())
    } else {
        Err(GlyphError::Slot(slot))
    }
}

/// Validate a batch size
pub fn check_count(count: usize) -> Result<(), GlyphError> {
    if count <= GLYPH_SLOTS {
        Ok(())
    } else {
        Err(GlyphError::Count(count))
    }
}

/// Which slots have been programmed since init
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GlyphSlots {
    mask: u8,
}

impl GlyphSlots {
    /// No slots programmed
    pub const fn new() -> Self {
        Self { mask: 0 }
    }

    /// Mark a slot as programmed (out-of-range slots are ignored)
    pub fn mark(&mut self, slot: u8) {
        if check_slot(slot).is_ok() {
            self.mask |= 1 << slot;
        }
    }

    /// Check whether a slot holds a custom glyph
    pub fn is_programmed(&self, slot: u8) -> bool {
        check_slot(slot).is_ok() && self.mask & (1 << slot) != 0
    }

    /// Number of programmed slots (0-8)
    pub fn count(&self) -> u8 {
        self.mask.count_ones() as u8
    }

    /// Forget all slots
    pub fn clear(&mut self) {
        self.mask = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_bounds() {
        assert_eq!(check_slot(0), Ok(()));
        assert_eq!(check_slot(7), Ok(()));
        assert_eq!(check_slot(8), Err(GlyphError::Slot(8)));
        assert_eq!(check_slot(255), Err(GlyphError::Slot(255)));
    }

    #[test]
    fn test_count_bounds() {
        assert_eq!(check_count(0), Ok(()));
        assert_eq!(check_count(8), Ok(()));
        assert_eq!(check_count(9), Err(GlyphError::Count(9)));
    }

    #[test]
    fn test_slot_tracking() {
        let mut slots = GlyphSlots::new();
        slots.mark(0);
        slots.mark(3);
        slots.mark(3);
        slots.mark(9);

        assert_eq!(slots.count(), 2);
        assert!(slots.is_programmed(3));
        assert!(!slots.is_programmed(1));
        assert!(!slots.is_programmed(9));

        slots.clear();
        assert_eq!(slots.count(), 0);
    }

    #[test]
    fn test_builtin_glyphs_fit_5_columns() {
        for glyph in [BALL, LEFT_PADDLE, RIGHT_PADDLE] {
            assert!(glyph.iter().all(|row| *row < 0b100000));
        }
    }
}
