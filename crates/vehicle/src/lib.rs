//! Vehicle configuration and the input-to-drive mapping
//!
//! This crate provides:
//! - The axle/vehicle configuration edited by host tooling
//! - The drive controller that scales input axes into steering angle
//!   and wheel torques and applies them to a wheel rig
//! - Scripted input sources and a bench rig for harness/test use

pub mod config;
pub mod drive;
pub mod input;
pub mod rig;

pub use config::*;
pub use drive::*;
pub use input::*;
pub use rig::*;
