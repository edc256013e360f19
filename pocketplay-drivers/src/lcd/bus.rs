//! 4-bit bus protocol, init sequence and text output

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};
use pocketplay_core::lcd::command::{
    self, cmd, flag, ENTRY_LEFT_TO_RIGHT, FOUR_BIT_NIBBLE, WAKE_NIBBLE,
};
use pocketplay_core::lcd::timing::{FOUR_BIT_SWITCH_US, POWER_ON_MS, WAKE_DELAYS_US};
use pocketplay_core::lcd::DisplayControl;

use super::{CharDisplay, DisplayError};

type Result<T, E> = core::result::Result<T, DisplayError<E>>;

impl<P, D, E> CharDisplay<P, D>
where
    P: OutputPin<Error = E>,
    D: DelayNs,
{
    /// Strobe E so the controller latches D4-D7
    fn pulse_enable(&mut self) -> Result<(), E> {
        self.en.set_low().map_err(DisplayError::Bus)?;
        self.delay.delay_ns(self.timing.enable_setup_ns);
        self.en.set_high().map_err(DisplayError::Bus)?;
        self.delay.delay_ns(self.timing.enable_pulse_ns);
        self.en.set_low().map_err(DisplayError::Bus)?;
        self.delay.delay_ns(self.timing.enable_settle_ns);
        Ok(())
    }

    /// Put the low four bits of `value` on D4-D7 and latch them
    fn send_nibble(&mut self, value: u8) -> Result<(), E> {
        for (bit, pin) in self.data.iter_mut().enumerate() {
            let level = PinState::from((value >> bit) & 0x01 != 0);
            pin.set_state(level).map_err(DisplayError::Bus)?;
        }
        self.pulse_enable()
    }

    /// Send a full byte as two nibbles, high first, then wait for execution
    fn send_byte(&mut self, value: u8, rs: PinState) -> Result<(), E> {
        self.rs.set_state(rs).map_err(DisplayError::Bus)?;
        self.send_nibble(value >> 4)?;
        self.send_nibble(value & 0x0F)?;
        self.delay.delay_us(self.timing.busy_wait_us);
        Ok(())
    }

    /// Send an instruction byte (RS low)
    pub fn command(&mut self, value: u8) -> Result<(), E> {
        self.send_byte(value, PinState::Low)
    }

    /// Send a data byte (RS high) to the current DDRAM or CGRAM address
    pub fn write_char(&mut self, value: u8) -> Result<(), E> {
        self.send_byte(value, PinState::High)
    }

    /// Run the power-on initialization sequence
    ///
    /// Leaves the display on with cursor and blink off, the entry mode set
    /// to left-to-right, the screen cleared, and no scroll in progress.
    pub fn init(&mut self) -> Result<(), E> {
        self.rs.set_low().map_err(DisplayError::Bus)?;
        self.en.set_low().map_err(DisplayError::Bus)?;
        for pin in self.data.iter_mut() {
            pin.set_low().map_err(DisplayError::Bus)?;
        }

        self.delay.delay_ms(POWER_ON_MS);

        // The controller may be in either bus mode after power-on; three
        // 0x3 nibbles force 8-bit mode before switching to 4-bit
        for wait_us in WAKE_DELAYS_US {
            self.send_nibble(WAKE_NIBBLE)?;
            self.delay.delay_us(wait_us);
        }
        self.send_nibble(FOUR_BIT_NIBBLE)?;
        self.delay.delay_us(FOUR_BIT_SWITCH_US);

        let lines = if self.config.rows > 1 {
            flag::TWO_LINE
        } else {
            flag::ONE_LINE
        };
        self.command(cmd::FUNCTION_SET | flag::MODE_4BIT | lines | flag::FONT_5X8)?;

        self.control = DisplayControl::default();
        self.command(self.control.instruction())?;
        self.command(ENTRY_LEFT_TO_RIGHT)?;
        self.clear()?;

        self.marquee.stop();
        self.glyphs.clear();

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "lcd: {}x{} ready (simulation timing: {})",
            self.config.columns,
            self.config.rows,
            self.config.simulation
        );

        Ok(())
    }

    /// Blank the screen and move the cursor to (0, 0)
    pub fn clear(&mut self) -> Result<(), E> {
        self.command(cmd::CLEAR_DISPLAY)?;
        self.delay.delay_us(self.timing.long_recovery_us);
        Ok(())
    }

    /// Move the cursor to (0, 0) and undo any display shift
    pub fn home(&mut self) -> Result<(), E> {
        self.command(cmd::RETURN_HOME)?;
        self.delay.delay_us(self.timing.long_recovery_us);
        Ok(())
    }

    /// Move the cursor
    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), E> {
        if col >= self.config.columns || row >= self.config.rows {
            return Err(DisplayError::InvalidPosition);
        }
        let address = command::ddram_address(col, row).ok_or(DisplayError::InvalidPosition)?;
        self.command(address)
    }

    /// Write a string at the cursor
    ///
    /// Bytes go to the controller unchanged; non-ASCII text shows whatever
    /// the character ROM has at those codes.
    pub fn print(&mut self, text: &str) -> Result<(), E> {
        self.print_bytes(text.as_bytes())
    }

    /// Write raw character codes at the cursor
    pub fn print_bytes(&mut self, bytes: &[u8]) -> Result<(), E> {
        for &byte in bytes {
            self.write_char(byte)?;
        }
        Ok(())
    }

    /// Move the cursor and write a string
    pub fn print_at(&mut self, col: u8, row: u8, text: &str) -> Result<(), E> {
        self.set_cursor(col, row)?;
        self.print(text)
    }

    /// Show the display contents
    pub fn display_on(&mut self) -> Result<(), E> {
        self.update_control(|c| c.display = true)
    }

    /// Blank the display without losing its contents
    pub fn display_off(&mut self) -> Result<(), E> {
        self.update_control(|c| c.display = false)
    }

    /// Show the underline cursor
    pub fn cursor_on(&mut self) -> Result<(), E> {
        self.update_control(|c| c.cursor = true)
    }

    /// Hide the underline cursor
    pub fn cursor_off(&mut self) -> Result<(), E> {
        self.update_control(|c| c.cursor = false)
    }

    /// Blink the character under the cursor
    pub fn blink_on(&mut self) -> Result<(), E> {
        self.update_control(|c| c.blink = true)
    }

    /// Stop blinking the cursor position
    pub fn blink_off(&mut self) -> Result<(), E> {
        self.update_control(|c| c.blink = false)
    }

    /// Change one display-control flag and resend all three
    fn update_control(&mut self, f: impl FnOnce(&mut DisplayControl)) -> Result<(), E> {
        let mut control = self.control;
        f(&mut control);
        self.command(control.instruction())?;
        self.control = control;
        Ok(())
    }
}
