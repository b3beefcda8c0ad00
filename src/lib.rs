//! Signal Timing Library
//!
//! Webster delay estimation, green-split optimization and fluid queue
//! simulation for a two-phase signalized intersection.

pub mod signal;

#[cfg(feature = "chart")]
pub mod chart;
