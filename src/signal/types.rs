//! Core types for the signal timing model
//!
//! Plain data types shared by the delay model, the optimizer and the
//! queue simulator.

use std::fmt;

/// Lost time per cycle (seconds) when none is specified
pub const DEFAULT_LOST_TIME: f64 = 6.0;

/// Minimum green time floor for each approach (seconds)
pub const MIN_GREEN: f64 = 10.0;

/// Degree-of-saturation limit above which a split is treated as unstable.
/// Webster's formula blows up as x approaches 1, so the cutoff sits below it.
pub const STABILITY_LIMIT: f64 = 0.95;

/// Integration step for the queue simulator (seconds)
pub const DEFAULT_TIME_STEP: f64 = 0.1;

/// Cycle length assumed when none is specified (seconds)
pub const DEFAULT_CYCLE_LENGTH: f64 = 90.0;

/// Number of cycles the queue simulator runs by default
pub const DEFAULT_NUM_CYCLES: u32 = 3;

/// Relative bracket-width tolerance for the green-split search
pub const DEFAULT_TOLERANCE: f64 = 1e-5;

/// One approach to the intersection: steady arrival demand and the
/// service rate it gets while its phase is green.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Approach {
    /// Arrival rate in vehicles per second
    pub arrival_rate: f64,
    /// Saturation flow in vehicles per second while green
    pub saturation_flow: f64,
}

impl Approach {
    pub fn new(arrival_rate: f64, saturation_flow: f64) -> Self {
        Self {
            arrival_rate,
            saturation_flow,
        }
    }

    /// Demand-to-capacity ratio ignoring signal timing (λ/μ)
    pub fn flow_ratio(&self) -> f64 {
        self.arrival_rate / self.saturation_flow
    }
}

/// Allocation of green time between the two approaches within one cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreenSplit {
    /// Green time for approach 1 (seconds)
    pub g1: f64,
    /// Green time for approach 2 (seconds)
    pub g2: f64,
}

impl GreenSplit {
    pub fn new(g1: f64, g2: f64) -> Self {
        Self { g1, g2 }
    }

    /// The split that divides the available green evenly
    pub fn equal(cycle_length: f64, lost_time: f64) -> Self {
        let g = (cycle_length - lost_time) / 2.0;
        Self { g1: g, g2: g }
    }

    /// Total green time across both phases (seconds)
    pub fn total(&self) -> f64 {
        self.g1 + self.g2
    }
}

/// Outcome of evaluating a green split against the delay model
///
/// The degree-of-saturation diagnostics are kept on both arms so callers
/// can see how far past the limit an unstable split landed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DelayEstimate {
    /// Both approaches operate below the stability limit
    Stable {
        /// Average delay per vehicle on approach 1 (seconds)
        d1: f64,
        /// Average delay per vehicle on approach 2 (seconds)
        d2: f64,
        /// Degree of saturation for approach 1
        x1: f64,
        /// Degree of saturation for approach 2
        x2: f64,
    },
    /// At least one approach is at or past the stability limit
    Oversaturated { x1: f64, x2: f64 },
}

impl DelayEstimate {
    pub fn is_stable(&self) -> bool {
        matches!(self, DelayEstimate::Stable { .. })
    }

    /// Degree-of-saturation pair, available on both arms
    pub fn saturation(&self) -> (f64, f64) {
        match *self {
            DelayEstimate::Stable { x1, x2, .. } => (x1, x2),
            DelayEstimate::Oversaturated { x1, x2 } => (x1, x2),
        }
    }

    /// Per-vehicle delays, if the split is stable
    pub fn delays(&self) -> Option<(f64, f64)> {
        match *self {
            DelayEstimate::Stable { d1, d2, .. } => Some((d1, d2)),
            DelayEstimate::Oversaturated { .. } => None,
        }
    }
}

/// One sample of the simulated queue state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceSample {
    /// Simulated time (seconds)
    pub time: f64,
    /// Queue length on approach 1 (vehicles)
    pub q1: f64,
    /// Queue length on approach 2 (vehicles)
    pub q2: f64,
}

/// Time series of queue lengths produced by the queue simulator
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueueTrace {
    samples: Vec<TraceSample>,
}

impl QueueTrace {
    pub fn new(samples: Vec<TraceSample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[TraceSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn final_sample(&self) -> Option<&TraceSample> {
        self.samples.last()
    }

    /// Peak queue length reached on each approach over the whole trace
    pub fn max_queues(&self) -> (f64, f64) {
        self.samples.iter().fold((0.0, 0.0), |(m1, m2), s| {
            (m1.max(s.q1), m2.max(s.q2))
        })
    }
}

/// Errors surfaced by intersection construction and timing optimization
#[derive(Debug, Clone, PartialEq)]
pub enum SignalError {
    /// A construction parameter failed validation
    InvalidConfig(String),
    /// No stable green split exists within the search bounds for this cycle
    Infeasible { cycle_length: f64 },
}

impl fmt::Display for SignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            SignalError::Infeasible { cycle_length } => write!(
                f,
                "no feasible green split for cycle length {:.1}s",
                cycle_length
            ),
        }
    }
}

impl std::error::Error for SignalError {}
