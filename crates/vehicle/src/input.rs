//! Scripted input sources for harness and test use.

use serde::{Deserialize, Serialize};
use simcore::{InputError, InputSource, AXIS_BRAKE, AXIS_GAS, AXIS_HANDBRAKE, AXIS_STEERING};

/// Constant axis values, held until changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FixedInput {
    pub steering: f64,
    pub gas: f64,
    pub brake: f64,
    pub handbrake: f64,
}

impl FixedInput {
    pub fn new(steering: f64, gas: f64, brake: f64, handbrake: f64) -> Self {
        FixedInput {
            steering,
            gas,
            brake,
            handbrake,
        }
    }

    /// All axes at rest.
    pub fn coast() -> Self {
        FixedInput::default()
    }
}

impl InputSource for FixedInput {
    fn axis(&self, name: &str) -> Result<f64, InputError> {
        match name {
            AXIS_STEERING => Ok(self.steering),
            AXIS_GAS => Ok(self.gas),
            AXIS_BRAKE => Ok(self.brake),
            AXIS_HANDBRAKE => Ok(self.handbrake),
            other => Err(InputError::UnknownAxis(other.to_string())),
        }
    }
}

/// Replays one input frame per tick; the last frame holds once the
/// script runs out, so the vehicle keeps doing whatever it was told
/// last.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptedInput {
    frames: Vec<FixedInput>,
    #[serde(skip)]
    tick: usize,
}

impl ScriptedInput {
    pub fn new(frames: Vec<FixedInput>) -> Self {
        ScriptedInput { frames, tick: 0 }
    }

    /// Hold `frame` for `ticks` ticks, then continue the script.
    pub fn hold(mut self, frame: FixedInput, ticks: usize) -> Self {
        self.frames.extend(std::iter::repeat_n(frame, ticks));
        self
    }

    pub fn current(&self) -> FixedInput {
        match self.frames.get(self.tick.min(self.frames.len().saturating_sub(1))) {
            Some(frame) => *frame,
            None => FixedInput::coast(),
        }
    }

    /// Move to the next frame; call once per tick after sampling.
    pub fn advance(&mut self) {
        self.tick += 1;
    }

    pub fn is_finished(&self) -> bool {
        self.tick >= self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn axis(&self, name: &str) -> Result<f64, InputError> {
        self.current().axis(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_input_serves_named_axes() {
        let input = FixedInput::new(0.5, 1.0, 0.25, 0.75);
        assert_eq!(input.axis(AXIS_STEERING).unwrap(), 0.5);
        assert_eq!(input.axis(AXIS_GAS).unwrap(), 1.0);
        assert_eq!(input.axis(AXIS_BRAKE).unwrap(), 0.25);
        assert_eq!(input.axis(AXIS_HANDBRAKE).unwrap(), 0.75);
    }

    #[test]
    fn test_unknown_axis_fails_fast() {
        let input = FixedInput::coast();
        let err = input.axis("Clutch").unwrap_err();
        assert_eq!(err, InputError::UnknownAxis("Clutch".to_string()));
    }

    #[test]
    fn test_script_advances_then_holds_last_frame() {
        let mut script = ScriptedInput::new(vec![
            FixedInput::new(0.0, 1.0, 0.0, 0.0),
            FixedInput::new(1.0, 0.0, 0.0, 0.0),
        ]);

        assert_eq!(script.axis(AXIS_GAS).unwrap(), 1.0);
        script.advance();
        assert_eq!(script.axis(AXIS_STEERING).unwrap(), 1.0);
        script.advance();
        // Past the end: last frame holds
        assert!(script.is_finished());
        assert_eq!(script.axis(AXIS_STEERING).unwrap(), 1.0);
    }

    #[test]
    fn test_empty_script_coasts() {
        let script = ScriptedInput::new(Vec::new());
        assert_eq!(script.current(), FixedInput::coast());
    }
}
