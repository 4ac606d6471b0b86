use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::{InputError, RigError};

/// Axis names the host input source is expected to recognize.
pub const AXIS_STEERING: &str = "Steering";
pub const AXIS_GAS: &str = "Gas";
pub const AXIS_BRAKE: &str = "Brake";
pub const AXIS_HANDBRAKE: &str = "Handbrake";

/// Opaque handle to a host-owned wheel actuator.
///
/// The rig that owns the actuators decides what the index means; the
/// drive mapping only passes it through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WheelId(pub usize);

impl std::fmt::Display for WheelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "wheel#{}", self.0)
    }
}

/// World-space pose of a wheel as resolved by the host physics engine
/// for the current tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelPose {
    pub position: Vector3<f64>,
    pub orientation: UnitQuaternion<f64>,
}

impl Default for WheelPose {
    fn default() -> Self {
        WheelPose {
            position: Vector3::zeros(),
            orientation: UnitQuaternion::identity(),
        }
    }
}

/// One wheel's physics-side controls and resolved pose.
///
/// Steer angle is in degrees, torques in newton-meters. Suspension,
/// friction, and contact resolution behind these fields are the host's
/// business.
pub trait WheelActuator {
    fn set_steer_angle(&mut self, degrees: f64);
    fn set_motor_torque(&mut self, newton_meters: f64);
    fn set_brake_torque(&mut self, newton_meters: f64);

    fn steer_angle(&self) -> f64;
    fn motor_torque(&self) -> f64;
    fn brake_torque(&self) -> f64;

    /// Pose resolved by the physics engine for the current tick.
    fn world_pose(&self) -> WheelPose;
}

/// A renderable transform node, typically the wheel mesh.
pub trait VisualNode {
    fn set_world_pose(&mut self, pose: &WheelPose);
}

/// The host-side collection of wheel actuators and their visuals.
///
/// Resolves the opaque `WheelId` handles that appear in the vehicle
/// configuration. `sync_visual` mirrors the actuator's resolved pose
/// onto the wheel's visual node; a wheel with no visual attached is a
/// silent no-op.
pub trait WheelRig {
    fn actuator(&mut self, id: WheelId) -> Option<&mut dyn WheelActuator>;

    /// Copy the wheel's physics pose onto its visual node.
    fn sync_visual(&mut self, id: WheelId) -> Result<(), RigError>;
}

/// Named-axis input, normalized by the host (nominally [-1, 1] for
/// steering/gas/brake, [0, 1] for handbrake; not validated here).
pub trait InputSource {
    fn axis(&self, name: &str) -> Result<f64, InputError>;
}

/// Fixed-step tick context supplied by the host scheduler.
#[derive(Debug, Clone, Copy)]
pub struct SimContext {
    pub dt: f64,
    pub t: f64,
}

pub trait Model {
    fn reset(&mut self);
}
