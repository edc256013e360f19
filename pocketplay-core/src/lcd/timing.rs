//! Bus timing profiles
//!
//! The busy flag is not wired on this board, so every instruction is
//! followed by a fixed wait long enough for the slowest one it could be.
//! Circuit simulators sample the bus far more coarsely than real silicon
//! and need wider margins, hence two profiles.

/// Wait after power-up before the first wake nibble (ms)
pub const POWER_ON_MS: u32 = 50;

/// Waits after each of the three wake nibbles (µs)
pub const WAKE_DELAYS_US: [u32; 3] = [5_000, 1_000, 200];

/// Wait after switching to the 4-bit interface (µs)
pub const FOUR_BIT_SWITCH_US: u32 = 1_000;

/// Recovery time of clear and return-home (µs); the datasheet asks for 1.52 ms
pub const LONG_RECOVERY_US: u32 = 2_000;

/// Delays around each enable pulse and after each instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusTiming {
    /// E low before rising, address setup (ns)
    pub enable_setup_ns: u32,
    /// E high pulse width (ns)
    pub enable_pulse_ns: u32,
    /// E low after falling, before the next nibble (ns)
    pub enable_settle_ns: u32,
    /// Execution wait after a full instruction or data byte (µs)
    pub busy_wait_us: u32,
    /// Execution wait after clear and return-home (µs)
    pub long_recovery_us: u32,
}

impl BusTiming {
    /// Datasheet margins for a real HD44780
    pub const HARDWARE: Self = Self {
        enable_setup_ns: 140,
        enable_pulse_ns: 450,
        enable_settle_ns: 50_000,
        busy_wait_us: 50,
        long_recovery_us: LONG_RECOVERY_US,
    };

    /// Widened margins for circuit simulators
    pub const SIMULATION: Self = Self {
        enable_setup_ns: 1_000,
        enable_pulse_ns: 1_000,
        enable_settle_ns: 100_000,
        busy_wait_us: 2_000,
        long_recovery_us: LONG_RECOVERY_US,
    };

    /// Pick the profile for a mode
    pub const fn for_mode(simulation: bool) -> Self {
        if simulation {
            Self::SIMULATION
        } else {
            Self::HARDWARE
        }
    }
}
