//! Test doubles shared by the driver tests

use core::cell::{Cell, RefCell};
use core::convert::Infallible;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use pocketplay_core::lcd::command::{cmd, ROW_OFFSETS};
use pocketplay_hal::{CompareTimer, Monotonic, PinChangeInterrupt, TickPeriod};

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// Delay that records every request in nanoseconds
#[derive(Clone, Default)]
pub struct MockDelay {
    pub log: Rc<RefCell<Vec<u32>>>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_ns(&self) -> u64 {
        self.log.borrow().iter().map(|&ns| ns as u64).sum()
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(ns);
    }
}

/// Manually advanced millisecond clock
///
/// With a non-zero `step`, time also moves forward after every read.
#[derive(Default)]
pub struct MockMonotonic {
    pub now: Cell<u32>,
    pub step: Cell<u32>,
}

impl MockMonotonic {
    pub fn at(ms: u32) -> Self {
        Self {
            now: Cell::new(ms),
            step: Cell::new(0),
        }
    }

    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl Monotonic for MockMonotonic {
    fn now_ms(&self) -> u32 {
        let now = self.now.get();
        self.now.set(now.wrapping_add(self.step.get()));
        now
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Configure(TickPeriod),
    EnableInterrupt,
    DisableInterrupt,
    Restart,
}

/// Compare timer that records calls
#[derive(Default)]
pub struct MockTimer {
    pub events: Vec<TimerEvent>,
    pub interrupt_enabled: bool,
}

impl MockTimer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CompareTimer for MockTimer {
    fn configure(&mut self, period: TickPeriod) {
        self.interrupt_enabled = false;
        self.events.push(TimerEvent::Configure(period));
    }

    fn enable_interrupt(&mut self) {
        self.interrupt_enabled = true;
        self.events.push(TimerEvent::EnableInterrupt);
    }

    fn disable_interrupt(&mut self) {
        self.interrupt_enabled = false;
        self.events.push(TimerEvent::DisableInterrupt);
    }

    fn restart(&mut self) {
        self.events.push(TimerEvent::Restart);
    }
}

// ---------------------------------------------------------------------------
// Keypad matrix
// ---------------------------------------------------------------------------

/// Physical 4x4 key matrix with pull-ups on the columns
#[derive(Default)]
pub struct KeyMatrix {
    /// Output level of each row line (true = high)
    pub rows: [bool; 4],
    /// Key held down, as `(row, col)`
    pub pressed: Option<(usize, usize)>,
    /// Row lines driven low, in order
    pub activations: Vec<usize>,
    /// Row whose line refuses to be driven low
    pub faulty_row: Option<usize>,
}

pub type SharedMatrix = Rc<RefCell<KeyMatrix>>;

pub fn key_matrix() -> SharedMatrix {
    Rc::new(RefCell::new(KeyMatrix::default()))
}

pub struct MockRow {
    index: usize,
    matrix: SharedMatrix,
}

pub struct MockCol {
    index: usize,
    matrix: SharedMatrix,
}

pub fn row_pins(matrix: &SharedMatrix) -> [MockRow; 4] {
    core::array::from_fn(|index| MockRow {
        index,
        matrix: matrix.clone(),
    })
}

pub fn col_pins(matrix: &SharedMatrix) -> [MockCol; 4] {
    core::array::from_fn(|index| MockCol {
        index,
        matrix: matrix.clone(),
    })
}

impl ErrorType for MockRow {
    type Error = PinFault;
}

impl OutputPin for MockRow {
    fn set_low(&mut self) -> Result<(), PinFault> {
        let mut matrix = self.matrix.borrow_mut();
        if matrix.faulty_row == Some(self.index) {
            return Err(PinFault);
        }
        matrix.rows[self.index] = false;
        matrix.activations.push(self.index);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), PinFault> {
        self.matrix.borrow_mut().rows[self.index] = true;
        Ok(())
    }
}

impl ErrorType for MockCol {
    type Error = PinFault;
}

impl InputPin for MockCol {
    fn is_high(&mut self) -> Result<bool, PinFault> {
        self.is_low().map(|low| !low)
    }

    fn is_low(&mut self) -> Result<bool, PinFault> {
        let matrix = self.matrix.borrow();
        Ok(match matrix.pressed {
            Some((row, col)) => col == self.index && !matrix.rows[row],
            None => false,
        })
    }
}

/// Pin-change interrupt with an observable mask
#[derive(Clone, Default)]
pub struct MockIrq {
    pub armed: Rc<Cell<bool>>,
}

impl PinChangeInterrupt for MockIrq {
    fn arm(&mut self) {
        self.armed.set(true);
    }

    fn disarm(&mut self) {
        self.armed.set(false);
    }

    fn is_armed(&self) -> bool {
        self.armed.get()
    }
}

// ---------------------------------------------------------------------------
// HD44780 bus model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line {
    Rs,
    E,
    Data(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Ddram,
    Cgram,
}

/// Controller model that decodes the 4-bit bus on each E falling edge
///
/// After power-on the controller is in 8-bit mode and the first four
/// nibbles (three wake-ups and the switch to 4-bit) are taken on their own.
/// Every later pair of nibbles forms one byte, high nibble first.
pub struct Hd44780 {
    rs: bool,
    e: bool,
    data: [bool; 4],
    single_nibbles_left: usize,
    pending_high: Option<u8>,
    target: Target,
    address: usize,
    /// Every nibble latched, with the RS level at the time
    pub nibbles: Vec<(bool, u8)>,
    /// Instruction bytes received after the 4-bit switch
    pub commands: Vec<u8>,
    /// Data bytes received (DDRAM or CGRAM)
    pub data_bytes: Vec<u8>,
    pub ddram: [u8; 0x80],
    pub cgram: [u8; 64],
    pub display_control: u8,
}

pub type SharedLcd = Rc<RefCell<Hd44780>>;

impl Hd44780 {
    pub fn new() -> Self {
        Self {
            rs: false,
            e: false,
            data: [false; 4],
            single_nibbles_left: 4,
            pending_high: None,
            target: Target::Ddram,
            address: 0,
            nibbles: Vec::new(),
            commands: Vec::new(),
            data_bytes: Vec::new(),
            ddram: [b' '; 0x80],
            cgram: [0; 64],
            display_control: 0,
        }
    }

    /// Visible text of `row`, `columns` wide
    pub fn row_text(&self, row: usize, columns: usize) -> Vec<u8> {
        let start = ROW_OFFSETS[row] as usize;
        self.ddram[start..start + columns].to_vec()
    }

    /// Bitmap stored in a glyph slot
    pub fn glyph(&self, slot: usize) -> [u8; 8] {
        let mut rows = [0; 8];
        rows.copy_from_slice(&self.cgram[slot * 8..slot * 8 + 8]);
        rows
    }

    /// Forget recorded traffic but keep memory contents
    pub fn clear_log(&mut self) {
        self.nibbles.clear();
        self.commands.clear();
        self.data_bytes.clear();
    }

    fn set_line(&mut self, line: Line, high: bool) {
        match line {
            Line::Rs => self.rs = high,
            Line::Data(bit) => self.data[bit] = high,
            Line::E => {
                let falling = self.e && !high;
                self.e = high;
                if falling {
                    self.latch();
                }
            }
        }
    }

    fn latch(&mut self) {
        let nibble = self
            .data
            .iter()
            .enumerate()
            .fold(0u8, |acc, (bit, &high)| acc | ((high as u8) << bit));
        self.nibbles.push((self.rs, nibble));

        if self.single_nibbles_left > 0 {
            self.single_nibbles_left -= 1;
            return;
        }

        match self.pending_high.take() {
            None => self.pending_high = Some(nibble),
            Some(high) => {
                let byte = (high << 4) | nibble;
                if self.rs {
                    self.write_data(byte);
                } else {
                    self.execute(byte);
                }
            }
        }
    }

    fn execute(&mut self, byte: u8) {
        self.commands.push(byte);

        if byte & cmd::SET_DDRAM_ADDR != 0 {
            self.target = Target::Ddram;
            self.address = (byte & 0x7F) as usize;
        } else if byte & cmd::SET_CGRAM_ADDR != 0 {
            self.target = Target::Cgram;
            self.address = (byte & 0x3F) as usize;
        } else if byte & cmd::DISPLAY_CONTROL != 0 && byte < cmd::CURSOR_SHIFT {
            self.display_control = byte;
        } else if byte == cmd::CLEAR_DISPLAY {
            self.ddram = [b' '; 0x80];
            self.target = Target::Ddram;
            self.address = 0;
        } else if byte & !0x01 == cmd::RETURN_HOME {
            self.target = Target::Ddram;
            self.address = 0;
        }
    }

    fn write_data(&mut self, byte: u8) {
        self.data_bytes.push(byte);
        match self.target {
            Target::Ddram => {
                self.ddram[self.address] = byte;
                self.address = (self.address + 1) % self.ddram.len();
            }
            Target::Cgram => {
                self.cgram[self.address] = byte;
                self.address = (self.address + 1) % self.cgram.len();
            }
        }
    }
}

/// One of the six LCD bus lines
pub struct LcdPin {
    line: Line,
    lcd: SharedLcd,
}

impl ErrorType for LcdPin {
    type Error = Infallible;
}

impl OutputPin for LcdPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.lcd.borrow_mut().set_line(self.line, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.lcd.borrow_mut().set_line(self.line, true);
        Ok(())
    }
}

/// LCD model plus its pins as `(rs, en, [d4, d5, d6, d7])`
pub fn lcd_bus() -> (SharedLcd, LcdPin, LcdPin, [LcdPin; 4]) {
    let lcd = Rc::new(RefCell::new(Hd44780::new()));
    let pin = |line| LcdPin {
        line,
        lcd: lcd.clone(),
    };
    let rs = pin(Line::Rs);
    let en = pin(Line::E);
    let data = core::array::from_fn(|bit| pin(Line::Data(bit)));
    (lcd, rs, en, data)
}

/// Output pin that always fails
pub struct FaultyPin;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinFault;

impl embedded_hal::digital::Error for PinFault {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

impl ErrorType for FaultyPin {
    type Error = PinFault;
}

impl OutputPin for FaultyPin {
    fn set_low(&mut self) -> Result<(), PinFault> {
        Err(PinFault)
    }

    fn set_high(&mut self) -> Result<(), PinFault> {
        Err(PinFault)
    }
}
