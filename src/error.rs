//! Unified error types for the AXP192 monitor.
//!
//! The decoding and scaling core is total and never fails; everything that
//! can fail (bus transfers in the I2C adapter, configuration parsing) funnels
//! into [`Error`].  All variants are `Copy` so they can be logged and passed
//! around without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An I2C transfer with the PMIC failed.
    Bus(BusError),
    /// Configuration is invalid or could not be parsed.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "bus: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Bus errors
// ---------------------------------------------------------------------------

/// A failed register transfer.  Carries the register address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    Read(u8),
    Write(u8),
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(reg) => write!(f, "read of register 0x{reg:02X} failed"),
            Self::Write(reg) => write!(f, "write of register 0x{reg:02X} failed"),
        }
    }
}

impl From<BusError> for Error {
    fn from(e: BusError) -> Self {
        Self::Bus(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The document is not valid JSON or does not match the schema.
    Parse,
    /// A field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// An unknown monitor type name.
    UnknownMonitor,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse => write!(f, "parse error"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
            Self::UnknownMonitor => write!(f, "unknown monitor type"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
