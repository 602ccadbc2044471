//=========================================================================
// Errors
//=========================================================================
//
// Recoverable configuration errors.
//
// Nothing in the simulation itself fails: bad tunables are rejected at
// the setter, stale references degrade to "no platform". These types
// only describe why a configuration change was refused.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== SettingError ========================================================

/// Reason a tunable or property update was rejected.
///
/// The target is left unchanged whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingError {
    /// Numeric tunables must be zero or positive.
    #[error("{name} must not be negative (got {value})")]
    Negative { name: &'static str, value: f64 },

    /// NaN is never a valid tunable.
    #[error("{name} must be a number (got NaN)")]
    NotANumber { name: &'static str },

    /// Slope angle must lie in `[0, 90)` degrees.
    #[error("slope max angle must be in [0, 90) degrees (got {0})")]
    AngleOutOfRange(f64),

    /// Property name is not one of the persisted keys.
    #[error("unknown property: {0}")]
    UnknownProperty(String),

    /// Property value could not be parsed for its type.
    #[error("invalid value {value:?} for property {name}")]
    InvalidValue { name: String, value: String },
}

//=== ConfigError =========================================================

/// Failure while loading persisted settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Malformed or mistyped JSON.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Well-formed settings carrying a rejected value.
    #[error("invalid setting: {0}")]
    Invalid(#[from] SettingError),
}

//=========================================================================
// Unit Tests
//=========================================================================
