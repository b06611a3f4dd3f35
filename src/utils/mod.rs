//! Utils Module - Shared Helpers
//!
//! Constants, display formatting and server telemetry.

pub mod constants;
pub mod telemetry;

pub use constants::*;
pub use telemetry::*;
