use thiserror::Error;

use crate::traits::WheelId;

/// Input source failures. An axis name the host does not recognize is
/// a configuration defect, surfaced immediately.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("input source has no axis named \"{0}\"")]
    UnknownAxis(String),
}

/// Wheel rig failures. A wheel handle the rig cannot resolve means the
/// vehicle configuration and the rig disagree; there is nothing to
/// recover, so callers fail the tick.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RigError {
    #[error("rig has no actuator for {0}")]
    UnknownWheel(WheelId),
}

/// Anything that can go wrong during one drive-mapping tick.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DriveError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Rig(#[from] RigError),
}
