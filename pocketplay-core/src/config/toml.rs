//! Minimal TOML parser for device configuration
//!
//! Handles only the subset `device.toml` uses, without allocating.
//!
//! Supported features:
//! - `[clock]`, `[keypad]` and `[display]` section headers
//! - Key = value pairs (integer, boolean, string)
//! - Underscore digit separators in integers (`16_000_000`)
//! - Comments (# ...)
//!
//! Keys outside a section, unknown sections and unknown keys are errors so
//! that typos do not silently fall back to defaults.

use super::types::DeviceConfig;
use crate::keypad::DebouncePolicy;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Line is neither a header nor `key = value`
    MalformedLine,
    /// Key not known in its section (or outside any section)
    UnknownKey,
    /// Value has the wrong type
    InvalidValue,
    /// Value parsed but is not usable (zero tick rate, too many rows, ...)
    OutOfRange,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Clock,
    Keypad,
    Display,
}

/// Parse `device.toml` contents on top of the default configuration
pub fn parse_config(input: &str) -> Result<DeviceConfig, ParseError> {
    let mut config = DeviceConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            let header = line
                .strip_suffix(']')
                .ok_or(ParseError::InvalidSection)?;
            section = parse_section_header(&header[1..])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::MalformedLine)?;
        apply_value(&mut config, section, key, value)?;
    }

    validate(&config)?;
    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "clock" => Ok(Section::Clock),
        "keypad" => Ok(Section::Keypad),
        "display" => Ok(Section::Display),
        _ => Err(ParseError::InvalidSection),
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = match value.find('#') {
        // Make sure # is not inside a string
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn apply_value(
    config: &mut DeviceConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Clock, "tick_hz") => config.clock.tick_hz = parse_u32(value)?,
        (Section::Clock, "timer_clock_hz") => config.clock.timer_clock_hz = parse_u32(value)?,

        (Section::Keypad, "debounce_ms") => config.keypad.debounce_ms = parse_u32(value)?,
        (Section::Keypad, "settle_us") => config.keypad.settle_us = parse_u32(value)?,
        (Section::Keypad, "debounce_policy") => {
            config.keypad.debounce_policy = parse_policy(parse_string(value)?)?
        }

        (Section::Display, "columns") => config.display.columns = parse_u8(value)?,
        (Section::Display, "rows") => config.display.rows = parse_u8(value)?,
        (Section::Display, "simulation") => config.display.simulation = parse_bool(value)?,

        _ => return Err(ParseError::UnknownKey),
    }

    Ok(())
}

fn validate(config: &DeviceConfig) -> Result<(), ParseError> {
    if config.clock.period().is_none() {
        return Err(ParseError::OutOfRange);
    }

    if !config.display.is_valid() {
        return Err(ParseError::OutOfRange);
    }

    Ok(())
}

fn parse_string(value: &str) -> Result<&str, ParseError> {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        Ok(&value[1..value.len() - 1])
    } else {
        Err(ParseError::InvalidValue)
    }
}

/// Parse a decimal integer, allowing `_` between digits
fn parse_u32(value: &str) -> Result<u32, ParseError> {
    if value.is_empty() || value.starts_with('_') || value.ends_with('_') {
        return Err(ParseError::InvalidValue);
    }

    let mut result: u32 = 0;
    for ch in value.chars() {
        if ch == '_' {
            continue;
        }
        let digit = ch.to_digit(10).ok_or(ParseError::InvalidValue)?;
        result = result
            .checked_mul(10)
            .and_then(|r| r.checked_add(digit))
            .ok_or(ParseError::OutOfRange)?;
    }

    Ok(result)
}

fn parse_u8(value: &str) -> Result<u8, ParseError> {
    u8::try_from(parse_u32(value)?).map_err(|_| ParseError::OutOfRange)
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_policy(value: &str) -> Result<DebouncePolicy, ParseError> {
    match value {
        "confirmed_key" => Ok(DebouncePolicy::ConfirmedKey),
        "scan_attempt" => Ok(DebouncePolicy::ScanAttempt),
        _ => Err(ParseError::InvalidValue),
    }
}
