//! Hardware driver implementations
//!
//! Concrete drivers built on `embedded-hal` pins and delays plus the
//! `pocketplay-hal` traits:
//!
//! - [`clock::Clock`] - Half-second game clock on a compare-match timer
//! - [`keypad::KeyScanner`] - Debounced 4x4 matrix keypad
//! - [`lcd::CharDisplay`] - HD44780 character LCD on a 4-bit bus

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod clock;
pub mod keypad;
pub mod lcd;

#[cfg(test)]
mod mock;

pub use clock::{Clock, ClockCounter, TickCallback};
pub use keypad::KeyScanner;
pub use lcd::{CharDisplay, DisplayError};
