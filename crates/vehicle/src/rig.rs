//! Bench Wheel Rig
//!
//! An in-memory stand-in for the host engine's wheel colliders, used by
//! the harness and tests. Each wheel stores the actuator fields the
//! drive controller writes and integrates a toy spin/steer pose so the
//! visual mirror has something to observe. It is a bench double, not a
//! physics model; suspension and tire contact stay with the real host.

use nalgebra::{UnitQuaternion, Vector3};
use simcore::{Model, RigError, SimContext, VisualNode, WheelActuator, WheelId, WheelPose, WheelRig};

/// Rotational inertia used for the toy spin integration (kg*m^2).
const BENCH_WHEEL_INERTIA: f64 = 0.8;

/// Visual transform for one wheel mesh.
#[derive(Debug, Clone, Copy, Default)]
pub struct BenchVisual {
    pub pose: WheelPose,
}

impl VisualNode for BenchVisual {
    fn set_world_pose(&mut self, pose: &WheelPose) {
        self.pose = *pose;
    }
}

/// One bench wheel: actuator fields plus integrated spin state.
#[derive(Debug, Clone)]
pub struct BenchWheel {
    steer_angle: f64,
    motor_torque: f64,
    brake_torque: f64,
    /// Mount point in world space; the bench rig does not translate.
    mount: Vector3<f64>,
    spin_velocity: f64,
    spin_angle: f64,
    visual: Option<BenchVisual>,
}

impl BenchWheel {
    fn new(mount: Vector3<f64>, visual: Option<BenchVisual>) -> Self {
        BenchWheel {
            steer_angle: 0.0,
            motor_torque: 0.0,
            brake_torque: 0.0,
            mount,
            spin_velocity: 0.0,
            spin_angle: 0.0,
            visual,
        }
    }

    /// Wheel spin rate (rad/s) from the toy integration.
    pub fn spin_velocity(&self) -> f64 {
        self.spin_velocity
    }

    fn step(&mut self, dt: f64) {
        // Semi-implicit Euler: motor torque spins the wheel up, brake
        // torque bleeds spin toward zero without reversing it.
        self.spin_velocity += self.motor_torque / BENCH_WHEEL_INERTIA * dt;
        let brake_step = self.brake_torque / BENCH_WHEEL_INERTIA * dt;
        if self.spin_velocity.abs() <= brake_step {
            self.spin_velocity = 0.0;
        } else {
            self.spin_velocity -= brake_step * self.spin_velocity.signum();
        }
        self.spin_angle += self.spin_velocity * dt;
    }
}

impl WheelActuator for BenchWheel {
    fn set_steer_angle(&mut self, degrees: f64) {
        self.steer_angle = degrees;
    }

    fn set_motor_torque(&mut self, newton_meters: f64) {
        self.motor_torque = newton_meters;
    }

    fn set_brake_torque(&mut self, newton_meters: f64) {
        self.brake_torque = newton_meters;
    }

    fn steer_angle(&self) -> f64 {
        self.steer_angle
    }

    fn motor_torque(&self) -> f64 {
        self.motor_torque
    }

    fn brake_torque(&self) -> f64 {
        self.brake_torque
    }

    fn world_pose(&self) -> WheelPose {
        // Yaw from steering, pitch from accumulated spin
        WheelPose {
            position: self.mount,
            orientation: UnitQuaternion::from_euler_angles(
                0.0,
                self.spin_angle,
                self.steer_angle.to_radians(),
            ),
        }
    }
}

/// Index-addressed collection of bench wheels; `WheelId(n)` resolves to
/// the n-th added wheel.
#[derive(Debug, Clone, Default)]
pub struct BenchRig {
    wheels: Vec<BenchWheel>,
}

impl BenchRig {
    pub fn new() -> Self {
        BenchRig { wheels: Vec::new() }
    }

    /// Add a wheel with a visual mesh attached.
    pub fn add_wheel(&mut self, mount: Vector3<f64>) -> WheelId {
        self.wheels
            .push(BenchWheel::new(mount, Some(BenchVisual::default())));
        WheelId(self.wheels.len() - 1)
    }

    /// Add a wheel with no visual child; `sync_visual` is a no-op for it.
    pub fn add_bare_wheel(&mut self, mount: Vector3<f64>) -> WheelId {
        self.wheels.push(BenchWheel::new(mount, None));
        WheelId(self.wheels.len() - 1)
    }

    pub fn wheel(&self, id: WheelId) -> Option<&BenchWheel> {
        self.wheels.get(id.0)
    }

    pub fn wheel_count(&self) -> usize {
        self.wheels.len()
    }

    /// Current pose of the wheel's visual mesh, if it has one.
    pub fn visual_pose(&self, id: WheelId) -> Option<WheelPose> {
        self.wheels
            .get(id.0)
            .and_then(|wheel| wheel.visual.as_ref())
            .map(|visual| visual.pose)
    }

    /// Advance the toy spin integration one fixed step.
    pub fn step_physics(&mut self, ctx: SimContext) {
        for wheel in &mut self.wheels {
            wheel.step(ctx.dt);
        }
    }
}

impl WheelRig for BenchRig {
    fn actuator(&mut self, id: WheelId) -> Option<&mut dyn WheelActuator> {
        self.wheels
            .get_mut(id.0)
            .map(|wheel| wheel as &mut dyn WheelActuator)
    }

    fn sync_visual(&mut self, id: WheelId) -> Result<(), RigError> {
        let wheel = self.wheels.get_mut(id.0).ok_or(RigError::UnknownWheel(id))?;
        let pose = wheel.world_pose();
        if let Some(visual) = &mut wheel.visual {
            visual.set_world_pose(&pose);
        }
        Ok(())
    }
}

impl Model for BenchRig {
    fn reset(&mut self) {
        for wheel in &mut self.wheels {
            wheel.steer_angle = 0.0;
            wheel.motor_torque = 0.0;
            wheel.brake_torque = 0.0;
            wheel.spin_velocity = 0.0;
            wheel.spin_angle = 0.0;
            if let Some(visual) = &mut wheel.visual {
                visual.pose = WheelPose::default();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_motor_torque_spins_wheel_up() {
        let mut rig = BenchRig::new();
        let id = rig.add_wheel(Vector3::zeros());
        rig.actuator(id).unwrap().set_motor_torque(80.0);

        rig.step_physics(SimContext { dt: 0.01, t: 0.0 });

        // 80 N*m on 0.8 kg*m^2 for 0.01 s => 1 rad/s
        assert_relative_eq!(rig.wheel(id).unwrap().spin_velocity(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_brake_stops_without_reversing() {
        let mut rig = BenchRig::new();
        let id = rig.add_wheel(Vector3::zeros());
        rig.actuator(id).unwrap().set_motor_torque(80.0);
        rig.step_physics(SimContext { dt: 0.01, t: 0.0 });

        rig.actuator(id).unwrap().set_motor_torque(0.0);
        rig.actuator(id).unwrap().set_brake_torque(1000.0);
        for i in 0..10 {
            rig.step_physics(SimContext {
                dt: 0.01,
                t: 0.01 * (i + 1) as f64,
            });
            assert!(rig.wheel(id).unwrap().spin_velocity() >= 0.0);
        }
        assert_relative_eq!(rig.wheel(id).unwrap().spin_velocity(), 0.0);
    }

    #[test]
    fn test_sync_visual_mirrors_pose() {
        let mut rig = BenchRig::new();
        let id = rig.add_wheel(Vector3::new(1.0, -0.75, 0.3));
        rig.actuator(id).unwrap().set_steer_angle(90.0);

        rig.sync_visual(id).unwrap();

        let visual = rig.visual_pose(id).unwrap();
        let wheel_pose = rig.wheel(id).unwrap().world_pose();
        assert_relative_eq!((visual.position - wheel_pose.position).norm(), 0.0);
        assert!(visual.orientation.angle_to(&wheel_pose.orientation) < 1e-9);
    }

    #[test]
    fn test_sync_visual_on_bare_wheel_is_noop() {
        let mut rig = BenchRig::new();
        let id = rig.add_bare_wheel(Vector3::zeros());
        rig.sync_visual(id).unwrap();
        assert!(rig.visual_pose(id).is_none());
    }

    #[test]
    fn test_sync_visual_unknown_wheel_errors() {
        let mut rig = BenchRig::new();
        let err = rig.sync_visual(WheelId(7)).unwrap_err();
        assert_eq!(err, RigError::UnknownWheel(WheelId(7)));
    }

    #[test]
    fn test_reset_clears_spin_and_controls() {
        let mut rig = BenchRig::new();
        let id = rig.add_wheel(Vector3::zeros());
        rig.actuator(id).unwrap().set_motor_torque(80.0);
        rig.step_physics(SimContext { dt: 0.01, t: 0.0 });

        rig.reset();

        let wheel = rig.wheel(id).unwrap();
        assert_relative_eq!(wheel.spin_velocity(), 0.0);
        assert_relative_eq!(wheel.motor_torque(), 0.0);
    }
}
