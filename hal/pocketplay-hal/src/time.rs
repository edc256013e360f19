//! Monotonic time source

/// Millisecond uptime counter
///
/// The value wraps at `u32::MAX` (about 49.7 days). Consumers compare
/// timestamps with `wrapping_sub` so the wrap is harmless.
pub trait Monotonic {
    /// Milliseconds since boot
    fn now_ms(&self) -> u32;
}

impl<T: Monotonic + ?Sized> Monotonic for &T {
    fn now_ms(&self) -> u32 {
        T::now_ms(self)
    }
}
