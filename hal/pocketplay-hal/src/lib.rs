//! Pocketplay Hardware Abstraction Layer
//!
//! `embedded-hal` 1.0 already covers digital I/O and busy-wait delays. This
//! crate defines the remaining hardware seams the peripheral drivers need,
//! so chip-specific code only has to implement a handful of small traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Game loop (out of tree)                │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pocketplay-drivers                     │
//! │  Clock · KeyScanner · CharDisplay       │
//! └─────────────────────────────────────────┘
//!         │                       │
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ pocketplay-   │       │ embedded-hal  │
//! │ hal (traits)  │       │ pins · delays │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`timer::CompareTimer`] - Free-running timer with a compare-match interrupt
//! - [`irq::PinChangeInterrupt`] - Edge interrupt source on a group of input lines
//! - [`time::Monotonic`] - Millisecond uptime counter

#![no_std]
#![deny(unsafe_code)]

pub mod irq;
pub mod time;
pub mod timer;

// Re-export key traits at crate root for convenience
pub use irq::PinChangeInterrupt;
pub use time::Monotonic;
pub use timer::{CompareTimer, TickPeriod, PRESCALERS};
