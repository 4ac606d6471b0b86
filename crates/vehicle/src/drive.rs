//! Drive Controller
//!
//! Per-tick mapping from normalized player input to physical vehicle
//! controls: steering angle and motor/brake torques, scaled linearly
//! against the configured maxima and written to every configured axle.
//! Stateless; the host invokes it once per fixed simulation step.

use log::trace;
use simcore::{
    DriveError, InputError, InputSource, Model, RigError, SimContext, WheelRig, AXIS_BRAKE,
    AXIS_GAS, AXIS_HANDBRAKE, AXIS_STEERING,
};

use crate::config::VehicleConfig;

/// Normalized input axes for one tick. Steering, gas, and brake are
/// nominally [-1, 1] and handbrake [0, 1], but nothing validates that.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DriveInputs {
    pub steering: f64,
    pub gas: f64,
    pub brake: f64,
    pub handbrake: f64,
}

impl DriveInputs {
    /// Read the four drive axes from an input source.
    pub fn read(source: &dyn InputSource) -> Result<Self, InputError> {
        Ok(DriveInputs {
            steering: source.axis(AXIS_STEERING)?,
            gas: source.axis(AXIS_GAS)?,
            brake: source.axis(AXIS_BRAKE)?,
            handbrake: source.axis(AXIS_HANDBRAKE)?,
        })
    }
}

/// Physical control values for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DriveControls {
    /// Steering deflection in degrees.
    pub steering_angle: f64,
    /// Drive torque per powered wheel (N*m); negative reverses.
    pub motor_torque: f64,
    /// Handbrake torque per powered wheel (N*m).
    pub brake_torque: f64,
}

/// Scale input axes into physical controls.
///
/// Pure linear scaling; inputs are deliberately not clamped, so
/// out-of-range axes propagate into out-of-range controls.
pub fn compute_controls(inputs: &DriveInputs, config: &VehicleConfig) -> DriveControls {
    let throttle = inputs.gas - inputs.brake;
    DriveControls {
        steering_angle: config.max_steering_angle * inputs.steering,
        motor_torque: config.max_motor_torque * throttle,
        brake_torque: config.max_brake_torque * inputs.handbrake,
    }
}

/// Write the controls to every configured axle, then mirror each
/// wheel's resolved pose onto its visual.
///
/// Steering axles get the steer angle on both wheels; powered axles get
/// motor and brake torque on both wheels; axles with neither flag keep
/// their actuator state. Visuals are synced for every configured wheel
/// regardless of flags. A wheel handle the rig cannot resolve fails the
/// tick immediately.
pub fn apply_to_axles(
    controls: &DriveControls,
    config: &VehicleConfig,
    rig: &mut dyn WheelRig,
) -> Result<(), RigError> {
    for axle in &config.axles {
        for id in [axle.left_wheel, axle.right_wheel] {
            let wheel = rig.actuator(id).ok_or(RigError::UnknownWheel(id))?;
            if axle.steering {
                wheel.set_steer_angle(controls.steering_angle);
            }
            if axle.motor {
                wheel.set_motor_torque(controls.motor_torque);
                wheel.set_brake_torque(controls.brake_torque);
            }
        }
        // Visuals track every configured wheel, driven or not.
        rig.sync_visual(axle.left_wheel)?;
        rig.sync_visual(axle.right_wheel)?;
    }
    Ok(())
}

/// Stateless per-tick drive mapping over a vehicle configuration.
#[derive(Debug, Clone)]
pub struct DriveController {
    pub config: VehicleConfig,
}

impl DriveController {
    pub fn new(config: VehicleConfig) -> Self {
        DriveController { config }
    }

    /// Run one tick: read the drive axes, compute controls, apply them
    /// to the rig. Returns the controls for telemetry.
    pub fn step_drive(
        &self,
        ctx: SimContext,
        input: &dyn InputSource,
        rig: &mut dyn WheelRig,
    ) -> Result<DriveControls, DriveError> {
        let inputs = DriveInputs::read(input)?;
        let controls = compute_controls(&inputs, &self.config);
        trace!(
            "t={:.3}: steer {:.2} deg, motor {:.1} N*m, brake {:.1} N*m",
            ctx.t,
            controls.steering_angle,
            controls.motor_torque,
            controls.brake_torque
        );
        apply_to_axles(&controls, &self.config, rig)?;
        Ok(controls)
    }
}

impl Model for DriveController {
    fn reset(&mut self) {
        // No per-tick state to reset beyond config
    }
}
