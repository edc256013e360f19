//! Board-agnostic core logic for the handheld's peripheral layer
//!
//! This crate contains everything that does not touch a pin or a register:
//!
//! - Half-second clock counter state
//! - Keypad key map, row cycling, debounce and the interrupt detect flag
//! - HD44780 command set, bus timing profiles, marquee scrolling and glyphs
//! - Device configuration types and parser
//!
//! The drivers in `pocketplay-drivers` wrap these around real hardware.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod clock;
pub mod config;
pub mod keypad;
pub mod lcd;
