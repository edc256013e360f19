//! Device configuration
//!
//! Types describing the reference board, plus a small parser for the
//! `device.toml` subset used to override them.

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, ParseError};
pub use types::{ClockConfig, DeviceConfig, DisplayConfig, KeypadConfig};
