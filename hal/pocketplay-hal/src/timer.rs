//! Compare-match timer abstraction
//!
//! The clock runs off a free-running counter that resets on a compare match
//! (CTC mode on AVR, alarm + reload on most Cortex-M parts) and raises an
//! interrupt each time it does.

/// Prescaler divisors available on the reference timer
pub const PRESCALERS: [u16; 5] = [1, 8, 64, 256, 1024];

/// Prescaler and compare value that produce a given interrupt rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickPeriod {
    /// Input clock divisor
    pub prescaler: u16,
    /// Counter value at which the match fires (the counter counts 0..=compare)
    pub compare: u16,
}

impl TickPeriod {
    /// Find the finest period for `tick_hz` on a timer clocked at `input_hz`
    ///
    /// Picks the smallest prescaler whose compare value fits in 16 bits.
    /// Returns `None` if the rate is zero, faster than the input clock, or
    /// too slow even with the largest prescaler.
    ///
    /// For the reference board (16 MHz, 2 Hz) this yields prescaler 256 and
    /// compare 31249.
    pub fn for_rate(input_hz: u32, tick_hz: u32) -> Option<Self> {
        if tick_hz == 0 {
            return None;
        }

        for &prescaler in PRESCALERS.iter() {
            let ticks = input_hz / (prescaler as u32 * tick_hz);
            if ticks == 0 {
                return None;
            }
            let compare = ticks - 1;
            if compare <= u16::MAX as u32 {
                return Some(Self {
                    prescaler,
                    compare: compare as u16,
                });
            }
        }

        None
    }

    /// Interrupt rate this period actually produces on `input_hz`, in mHz
    ///
    /// Integer division can make this differ slightly from the requested rate.
    pub fn actual_millihertz(&self, input_hz: u32) -> u32 {
        let divisor = self.prescaler as u64 * (self.compare as u64 + 1);
        ((input_hz as u64 * 1000) / divisor) as u32
    }
}

/// Free-running timer with a compare-match interrupt
///
/// Implementations own the timer peripheral registers. All methods are
/// called with interrupts masked by the clock driver where ordering matters,
/// so implementations do not need their own critical sections.
pub trait CompareTimer {
    /// Program the timer for `period` in compare-match mode
    ///
    /// Leaves the compare interrupt disabled.
    fn configure(&mut self, period: TickPeriod);

    /// Unmask the compare-match interrupt
    fn enable_interrupt(&mut self);

    /// Mask the compare-match interrupt
    fn disable_interrupt(&mut self);

    /// Restart the counter from zero so the next match is a full period away
    fn restart(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_board_rate() {
        let period = TickPeriod::for_rate(16_000_000, 2).unwrap();
        assert_eq!(period.prescaler, 256);
        assert_eq!(period.compare, 31_249);
        assert_eq!(period.actual_millihertz(16_000_000), 2_000);
    }

    #[test]
    fn test_fast_rate_uses_no_prescaler() {
        let period = TickPeriod::for_rate(16_000_000, 1_000).unwrap();
        assert_eq!(period.prescaler, 1);
        assert_eq!(period.compare, 15_999);
    }

    #[test]
    fn test_unreachable_rates() {
        // Zero rate
        assert_eq!(TickPeriod::for_rate(16_000_000, 0), None);
        // Faster than the input clock
        assert_eq!(TickPeriod::for_rate(1_000, 2_000), None);
        // Too slow for a 16-bit compare even at /1024
        assert_eq!(TickPeriod::for_rate(1_000_000_000, 1), None);
    }
}
