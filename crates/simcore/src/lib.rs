//! Shared types and capability traits for the cart simulation
//!
//! The host engine owns wheel physics, visual transforms, and input
//! devices; this crate defines the seams through which the drive
//! mapping talks to them, plus the error taxonomy shared across crates.

pub mod error;
pub mod traits;

pub use error::*;
pub use traits::*;
