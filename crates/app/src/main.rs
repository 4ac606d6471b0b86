//! Cart harness: drives the input-to-drive mapping against the bench
//! rig for a short scripted run (pull away, corner, handbrake stop).
//!
//! Usage: `cart-sim-app [vehicle-config.json]`; without an argument
//! the built-in two-axle cart is used.

use std::error::Error;
use std::path::Path;

use log::{info, LevelFilter};
use nalgebra::Vector3;
use simcore::SimContext;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use vehicle::{BenchRig, DriveController, FixedInput, ScriptedInput, VehicleConfig};

/// Fixed simulation step (s).
const DT: f64 = 0.02;

/// Ticks per script phase (2 s at 50 Hz).
const PHASE_TICKS: usize = 100;

/// Wheel mount geometry for the bench rig (m).
const WHEELBASE: f64 = 1.6;
const HALF_TRACK: f64 = 0.75;

/// Lay out one bench wheel per handle the config references: axles as
/// rows along -x, left wheels at +y. Handles the config skips get a
/// bare wheel at the origin so every id still resolves.
fn build_rig(config: &VehicleConfig) -> BenchRig {
    let wheel_count = config
        .wheel_ids()
        .map(|id| id.0 + 1)
        .max()
        .unwrap_or(0);
    let mut mounts = vec![None; wheel_count];
    for (row, axle) in config.axles.iter().enumerate() {
        let x = -WHEELBASE * row as f64;
        mounts[axle.left_wheel.0] = Some(Vector3::new(x, HALF_TRACK, 0.0));
        mounts[axle.right_wheel.0] = Some(Vector3::new(x, -HALF_TRACK, 0.0));
    }

    let mut rig = BenchRig::new();
    for mount in mounts {
        match mount {
            Some(mount) => rig.add_wheel(mount),
            None => rig.add_bare_wheel(Vector3::zeros()),
        };
    }
    rig
}

fn drive_script() -> ScriptedInput {
    ScriptedInput::new(Vec::new())
        .hold(FixedInput::new(0.0, 1.0, 0.0, 0.0), PHASE_TICKS)
        .hold(FixedInput::new(0.6, 0.6, 0.0, 0.0), PHASE_TICKS)
        .hold(FixedInput::new(0.0, 0.0, 0.0, 1.0), PHASE_TICKS)
}

fn main() -> Result<(), Box<dyn Error>> {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let config = match std::env::args().nth(1) {
        Some(path) => VehicleConfig::from_path(Path::new(&path))?,
        None => VehicleConfig::default(),
    };

    let mut rig = build_rig(&config);
    let mut script = drive_script();
    // First powered wheel, for the spin readout
    let driven = config
        .axles
        .iter()
        .find(|axle| axle.motor)
        .map(|axle| axle.left_wheel);
    let controller = DriveController::new(config);
    info!("bench rig ready with {} wheel(s)", rig.wheel_count());

    let mut t = 0.0;
    for tick in 0.. {
        if script.is_finished() {
            break;
        }
        let ctx = SimContext { dt: DT, t };
        let controls = controller.step_drive(ctx, &script, &mut rig)?;
        rig.step_physics(ctx);
        script.advance();
        t += DT;

        if tick % 50 == 0 {
            let spin = driven
                .and_then(|id| rig.wheel(id))
                .map(|wheel| wheel.spin_velocity())
                .unwrap_or(0.0);
            info!(
                "t={:5.2}s steer {:6.2} deg, motor {:7.1} N*m, brake {:7.1} N*m, driven spin {:6.2} rad/s",
                t, controls.steering_angle, controls.motor_torque, controls.brake_torque, spin
            );
        }
    }

    info!("run complete at t={:.2}s", t);
    Ok(())
}
