//=========================================================================
// Platformer Settings
//=========================================================================
//
// Persisted tunables of a platformer character.
//
// Keys match the persisted property names exactly. Missing keys take
// their default value; present keys are validated with the same rules
// as the controller setters.
//
//=========================================================================

//=== External Dependencies ===============================================

use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use crate::core::error::{ConfigError, SettingError};

//=== Validation ==========================================================

pub(crate) fn check_non_negative(name: &'static str, value: f64) -> Result<(), SettingError> {
    if value.is_nan() {
        return Err(SettingError::NotANumber { name });
    }
    if value < 0.0 {
        return Err(SettingError::Negative { name, value });
    }
    Ok(())
}

pub(crate) fn check_slope_angle(angle: f64) -> Result<(), SettingError> {
    if !(0.0..90.0).contains(&angle) {
        return Err(SettingError::AngleOutOfRange(angle));
    }
    Ok(())
}

/// Maximum vertical-per-horizontal ratio climbed automatically.
///
/// Exactly 1 at 45 degrees.
pub(crate) fn slope_climbing_factor(angle: f64) -> f64 {
    if angle == 45.0 {
        1.0
    } else {
        angle.to_radians().tan()
    }
}

//=== PlatformerSettings ==================================================

/// Tunables of a [`PlatformerController`](super::PlatformerController).
///
/// # Example
///
/// ```
/// use aetheric_platformer::core::platformer::PlatformerSettings;
///
/// let settings = PlatformerSettings::from_json(r#"{ "gravity": 800, "jumpSpeed": 500 }"#).unwrap();
/// assert_eq!(settings.gravity, 800.0);
/// assert_eq!(settings.max_speed, 250.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlatformerSettings {
    pub gravity: f64,
    pub max_falling_speed: f64,
    pub acceleration: f64,
    pub deceleration: f64,
    pub max_speed: f64,
    pub jump_speed: f64,
    pub ignore_default_controls: bool,
    pub slope_max_angle: f64,
}

impl Default for PlatformerSettings {
    fn default() -> Self {
        Self {
            gravity: 1000.0,
            max_falling_speed: 700.0,
            acceleration: 1500.0,
            deceleration: 1500.0,
            max_speed: 250.0,
            jump_speed: 600.0,
            ignore_default_controls: false,
            slope_max_angle: 45.0,
        }
    }
}

impl PlatformerSettings {
    /// Rejects negative tunables and slope angles outside `[0, 90)`.
    pub fn validate(&self) -> Result<(), SettingError> {
        check_non_negative("gravity", self.gravity)?;
        check_non_negative("maxFallingSpeed", self.max_falling_speed)?;
        check_non_negative("acceleration", self.acceleration)?;
        check_non_negative("deceleration", self.deceleration)?;
        check_non_negative("maxSpeed", self.max_speed)?;
        check_non_negative("jumpSpeed", self.jump_speed)?;
        check_slope_angle(self.slope_max_angle)
    }

    /// Parses and validates settings.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_persisted_defaults() {
        let settings = PlatformerSettings::default();
        assert_eq!(settings.gravity, 1000.0);
        assert_eq!(settings.max_falling_speed, 700.0);
        assert_eq!(settings.acceleration, 1500.0);
        assert_eq!(settings.deceleration, 1500.0);
        assert_eq!(settings.max_speed, 250.0);
        assert_eq!(settings.jump_speed, 600.0);
        assert!(!settings.ignore_default_controls);
        assert_eq!(settings.slope_max_angle, 45.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn json_uses_persisted_key_names() {
        let json = PlatformerSettings::default().to_json().unwrap();
        for key in [
            "gravity",
            "maxFallingSpeed",
            "acceleration",
            "deceleration",
            "maxSpeed",
            "jumpSpeed",
            "ignoreDefaultControls",
            "slopeMaxAngle",
        ] {
            assert!(json.contains(&format!("\"{}\"", key)), "missing {}", key);
        }
    }

    #[test]
    fn missing_keys_take_defaults() {
        let settings = PlatformerSettings::from_json(r#"{"ignoreDefaultControls": true}"#).unwrap();
        assert!(settings.ignore_default_controls);
        assert_eq!(settings.gravity, 1000.0);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = PlatformerSettings::from_json(r#"{"gravity": -1}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(SettingError::Negative { name: "gravity", .. })
        ));

        let err = PlatformerSettings::from_json(r#"{"slopeMaxAngle": 90}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(SettingError::AngleOutOfRange(_))));

        let err = PlatformerSettings::from_json(r#"{"gravity": "heavy"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Serde(_)));
    }

    #[test]
    fn nan_is_reported_as_not_a_number() {
        assert_eq!(
            check_non_negative("gravity", f64::NAN),
            Err(SettingError::NotANumber { name: "gravity" })
        );
        assert!(matches!(
            check_non_negative("gravity", -0.5),
            Err(SettingError::Negative { name: "gravity", .. })
        ));
        assert!(check_non_negative("gravity", 0.0).is_ok());
        assert!(check_slope_angle(f64::NAN).is_err());
    }

    #[test]
    fn climbing_factor_is_exact_at_45() {
        assert_eq!(slope_climbing_factor(45.0), 1.0);
        assert_eq!(slope_climbing_factor(0.0), 0.0);
        assert!((slope_climbing_factor(60.0) - 3f64.sqrt()).abs() < 1e-12);
    }
}
