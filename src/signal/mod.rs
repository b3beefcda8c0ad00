//! Signal timing core
//!
//! All the analytical logic for the two-phase intersection: Webster delay
//! estimation, green-split optimization, and fluid queue simulation. Pure
//! and synchronous; the CLI and chart layers consume its outputs.

mod delay;
mod intersection;
mod optimizer;
mod queue;
mod types;

// Re-export public types for external use
// These may not be used within this crate but are part of the public API
#[allow(unused_imports)]
pub use delay::DelayModel;
#[allow(unused_imports)]
pub use intersection::SignalIntersection;
#[allow(unused_imports)]
pub use optimizer::{OptimizerSettings, TimingOptimizer, TimingPlan};
#[allow(unused_imports)]
pub use queue::{Phase, QueueSimulator};
#[allow(unused_imports)]
pub use types::{
    Approach, DelayEstimate, GreenSplit, QueueTrace, SignalError, TraceSample,
    DEFAULT_CYCLE_LENGTH, DEFAULT_LOST_TIME, DEFAULT_NUM_CYCLES, DEFAULT_TIME_STEP,
    DEFAULT_TOLERANCE, MIN_GREEN, STABILITY_LIMIT,
};
