//! HD44780 instruction set
//!
//! Instructions are a command bit (the highest set bit) OR'd with its
//! option flags.

/// Instruction codes
pub mod cmd {
    pub const CLEAR_DISPLAY: u8 = 0x01;
    pub const RETURN_HOME: u8 = 0x02;
    pub const ENTRY_MODE_SET: u8 = 0x04;
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const CURSOR_SHIFT: u8 = 0x10;
    pub const FUNCTION_SET: u8 = 0x20;
    pub const SET_CGRAM_ADDR: u8 = 0x40;
    pub const SET_DDRAM_ADDR: u8 = 0x80;
}

/// Option flags
pub mod flag {
    // Entry mode
    pub const ENTRY_INCREMENT: u8 = 0x02;
    pub const ENTRY_SHIFT: u8 = 0x01;

    // Display control
    pub const DISPLAY_ON: u8 = 0x04;
    pub const CURSOR_ON: u8 = 0x02;
    pub const BLINK_ON: u8 = 0x01;

    // Function set
    pub const MODE_8BIT: u8 = 0x10;
    pub const MODE_4BIT: u8 = 0x00;
    pub const TWO_LINE: u8 = 0x08;
    pub const ONE_LINE: u8 = 0x00;
    pub const FONT_5X10: u8 = 0x04;
    pub const FONT_5X8: u8 = 0x00;
}

/// Nibble sent three times after power-on to force 8-bit mode
pub const WAKE_NIBBLE: u8 = 0x03;

/// Nibble that switches an 8-bit controller to the 4-bit interface
pub const FOUR_BIT_NIBBLE: u8 = 0x02;

/// DDRAM address of column 0 on each row
///
/// Rows 2-3 only exist on 4-row modules.
pub const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// Function set used at init: 4-bit bus, two lines, 5x8 font
pub const FUNCTION_4BIT_2LINE: u8 =
    cmd::FUNCTION_SET | flag::MODE_4BIT | flag::TWO_LINE | flag::FONT_5X8;

/// Entry mode used at init: cursor moves right, display does not shift
pub const ENTRY_LEFT_TO_RIGHT: u8 = cmd::ENTRY_MODE_SET | flag::ENTRY_INCREMENT;

/// Set-DDRAM-address instruction for a grid position
///
/// Returns `None` if the row has no offset.
pub fn ddram_address(col: u8, row: u8) -> Option<u8> {
    let offset = *ROW_OFFSETS.get(row as usize)?;
    Some(cmd::SET_DDRAM_ADDR | (offset.wrapping_add(col) & 0x7F))
}

/// Set-CGRAM-address instruction for the first row of a glyph slot
pub fn cgram_address(slot: u8) -> u8 {
    cmd::SET_CGRAM_ADDR | ((slot & 0x07) << 3)
}

/// Display on/off, cursor and blink flags
///
/// The controller takes all three in a single instruction, so the driver
/// keeps the last value and changes one flag at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayControl {
    pub display: bool,
    pub cursor: bool,
    pub blink: bool,
}

impl Default for DisplayControl {
    /// Display on, cursor and blink off (the init state)
    fn default() -> Self {
        Self {
            display: true,
            cursor: false,
            blink: false,
        }
    }
}

impl DisplayControl {
    /// Encode as a display-control instruction
    pub fn instruction(&self) -> u8 {
        let mut bits = cmd::DISPLAY_CONTROL;
        if self.display {
            bits |= flag::DISPLAY_ON;
        }
        if self.cursor {
            bits |= flag::CURSOR_ON;
        }
        if self.blink {
            bits |= flag::BLINK_ON;
        }
        bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_instructions() {
        assert_eq!(FUNCTION_4BIT_2LINE, 0x28);
        assert_eq!(ENTRY_LEFT_TO_RIGHT, 0x06);
        assert_eq!(DisplayControl::default().instruction(), 0x0C);
    }

    #[test]
    fn test_ddram_address() {
        assert_eq!(ddram_address(0, 0), Some(0x80));
        assert_eq!(ddram_address(5, 1), Some(0x80 | 0x45));
        assert_eq!(ddram_address(0, 2), Some(0x80 | 0x14));
        assert_eq!(ddram_address(3, 3), Some(0x80 | 0x57));
        assert_eq!(ddram_address(0, 4), None);
    }

    #[test]
    fn test_cgram_address() {
        assert_eq!(cgram_address(0), 0x40);
        assert_eq!(cgram_address(1), 0x48);
        assert_eq!(cgram_address(7), 0x78);
    }

    #[test]
    fn test_display_control_flags() {
        let mut control = DisplayControl::default();
        control.cursor = true;
        control.blink = true;
        assert_eq!(control.instruction(), 0x0F);

        control.display = false;
        assert_eq!(control.instruction(), 0x0B);
    }
}
