//! Vehicle Configuration
//!
//! Plain data describing the vehicle's axles and control maxima. Host
//! tooling edits this (typically as JSON) before or between runs; the
//! drive controller only reads it.

use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use simcore::WheelId;
use thiserror::Error;

/// Axle counts past this are flagged at load; nothing enforces it and
/// the drive loop handles any number.
pub const AXLE_COUNT_ADVISORY: usize = 12;

/// One axle: a left/right wheel pair sharing motor and steering flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxleConfig {
    /// Handle to the axle's left wheel actuator.
    pub left_wheel: WheelId,
    /// Handle to the axle's right wheel actuator.
    pub right_wheel: WheelId,
    /// Whether the wheels on this axle are powered.
    #[serde(default)]
    pub motor: bool,
    /// Whether the wheels on this axle steer.
    #[serde(default)]
    pub steering: bool,
}

impl AxleConfig {
    pub fn new(left_wheel: WheelId, right_wheel: WheelId) -> Self {
        AxleConfig {
            left_wheel,
            right_wheel,
            motor: false,
            steering: false,
        }
    }

    /// Mark this axle's wheels as powered.
    pub fn powered(mut self) -> Self {
        self.motor = true;
        self
    }

    /// Mark this axle's wheels as steering.
    pub fn steered(mut self) -> Self {
        self.steering = true;
        self
    }
}

/// Full drive configuration for one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleConfig {
    /// Axles in application order.
    pub axles: Vec<AxleConfig>,
    /// Torque applied to powered wheels at full gas (N*m).
    pub max_motor_torque: f64,
    /// Torque applied by the handbrake at full pull (N*m).
    pub max_brake_torque: f64,
    /// Maximum deflection of steering-enabled wheels (degrees).
    pub max_steering_angle: f64,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        // Two-axle cart: front axle steers, rear axle drives
        VehicleConfig {
            axles: vec![
                AxleConfig::new(WheelId(0), WheelId(1)).steered(),
                AxleConfig::new(WheelId(2), WheelId(3)).powered(),
            ],
            max_motor_torque: 1000.0,
            max_brake_torque: 2000.0,
            max_steering_angle: 30.0,
        }
    }
}

impl VehicleConfig {
    /// Configuration with no axles and zero maxima, for building up
    /// with the `with_*` methods.
    pub fn empty() -> Self {
        VehicleConfig {
            axles: Vec::new(),
            max_motor_torque: 0.0,
            max_brake_torque: 0.0,
            max_steering_angle: 0.0,
        }
    }

    /// Append an axle.
    pub fn with_axle(mut self, axle: AxleConfig) -> Self {
        self.axles.push(axle);
        self
    }

    /// Set the full-gas motor torque (N*m).
    pub fn with_motor_torque(mut self, max_motor_torque: f64) -> Self {
        self.max_motor_torque = max_motor_torque;
        self
    }

    /// Set the full-pull handbrake torque (N*m).
    pub fn with_brake_torque(mut self, max_brake_torque: f64) -> Self {
        self.max_brake_torque = max_brake_torque;
        self
    }

    /// Set the maximum steering deflection (degrees).
    pub fn with_steering_angle(mut self, max_steering_angle: f64) -> Self {
        self.max_steering_angle = max_steering_angle;
        self
    }

    /// Every wheel handle referenced by the configuration, in axle
    /// order, left before right.
    pub fn wheel_ids(&self) -> impl Iterator<Item = WheelId> + '_ {
        self.axles
            .iter()
            .flat_map(|axle| [axle.left_wheel, axle.right_wheel])
    }

    /// Parse a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: VehicleConfig = serde_json::from_str(json)?;
        config.log_summary();
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    fn log_summary(&self) {
        info!(
            "vehicle config: {} axle(s), steer {:.1} deg, motor {:.0} N*m, brake {:.0} N*m",
            self.axles.len(),
            self.max_steering_angle,
            self.max_motor_torque,
            self.max_brake_torque
        );
        if self.axles.len() > AXLE_COUNT_ADVISORY {
            warn!(
                "vehicle config has {} axles (expected at most {})",
                self.axles.len(),
                AXLE_COUNT_ADVISORY
            );
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read vehicle config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse vehicle config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_front_steer_rear_drive() {
        let config = VehicleConfig::default();
        assert_eq!(config.axles.len(), 2);
        assert!(config.axles[0].steering && !config.axles[0].motor);
        assert!(config.axles[1].motor && !config.axles[1].steering);
    }

    #[test]
    fn test_json_round_trip() {
        let config = VehicleConfig::default()
            .with_motor_torque(750.0)
            .with_axle(AxleConfig::new(WheelId(4), WheelId(5)));
        let json = serde_json::to_string(&config).unwrap();
        let parsed = VehicleConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_flags_default_false_in_json() {
        let json = r#"{
            "axles": [{ "left_wheel": 0, "right_wheel": 1 }],
            "max_motor_torque": 100.0,
            "max_brake_torque": 200.0,
            "max_steering_angle": 25.0
        }"#;
        let config = VehicleConfig::from_json(json).unwrap();
        assert!(!config.axles[0].motor);
        assert!(!config.axles[0].steering);
    }

    #[test]
    fn test_axle_count_past_advisory_still_loads() {
        let mut config = VehicleConfig::empty();
        for i in 0..13 {
            config = config.with_axle(AxleConfig::new(WheelId(2 * i), WheelId(2 * i + 1)));
        }
        let json = serde_json::to_string(&config).unwrap();
        let parsed = VehicleConfig::from_json(&json).unwrap();
        assert_eq!(parsed.axles.len(), 13);
    }

    #[test]
    fn test_wheel_ids_in_axle_order() {
        let config = VehicleConfig::default();
        let ids: Vec<usize> = config.wheel_ids().map(|id| id.0).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let result = VehicleConfig::from_json("{ \"axles\": 5 }");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
