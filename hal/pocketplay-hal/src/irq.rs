//! Pin-change interrupt source
//!
//! The keypad wakes the scanner through an edge interrupt on its column
//! lines. The handler itself is board code; drivers only need to arm and
//! disarm the source.

/// Edge interrupt on a group of input lines
///
/// Implementations enable the chip's pin-change (or EXTI) mask for the lines
/// they were built with. The interrupt handler is expected to call
/// `KeyDetect::signal()` on the shared detect flag.
pub trait PinChangeInterrupt {
    /// Enable the interrupt for every line in the group
    fn arm(&mut self);

    /// Disable the interrupt for every line in the group
    fn disarm(&mut self);

    /// Check whether the interrupt is currently enabled
    fn is_armed(&self) -> bool;
}

impl<T: PinChangeInterrupt + ?Sized> PinChangeInterrupt for &mut T {
    fn arm(&mut self) {
        T::arm(self)
    }

    fn disarm(&mut self) {
        T::disarm(self)
    }

    fn is_armed(&self) -> bool {
        T::is_armed(self)
    }
}
