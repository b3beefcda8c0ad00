//! Webster delay estimation for a two-phase intersection
//!
//! Pure functions of the green split and cycle length; no state beyond the
//! immutable approach parameters.

use log::debug;

use super::types::{Approach, DelayEstimate, GreenSplit, STABILITY_LIMIT};

/// Steady-state delay model based on Webster's formula
#[derive(Debug, Clone, Copy)]
pub struct DelayModel {
    approaches: [Approach; 2],
    stability_limit: f64,
}

impl DelayModel {
    pub fn new(approaches: [Approach; 2]) -> Self {
        Self::with_stability_limit(approaches, STABILITY_LIMIT)
    }

    /// Build a model with a non-default saturation cutoff
    pub fn with_stability_limit(approaches: [Approach; 2], stability_limit: f64) -> Self {
        Self {
            approaches,
            stability_limit,
        }
    }

    pub fn approaches(&self) -> [Approach; 2] {
        self.approaches
    }

    pub fn stability_limit(&self) -> f64 {
        self.stability_limit
    }

    /// Evaluate a green split, returning per-approach delays and
    /// degrees of saturation.
    ///
    /// Callers must supply positive green times; the optimizer guarantees
    /// this before calling.
    pub fn evaluate(&self, split: GreenSplit, cycle_length: f64) -> DelayEstimate {
        let [a1, a2] = self.approaches;

        // Degree of saturation: demand ratio scaled by the inverse green share
        let x1 = a1.flow_ratio() * (cycle_length / split.g1);
        let x2 = a2.flow_ratio() * (cycle_length / split.g2);

        if x1 >= self.stability_limit || x2 >= self.stability_limit {
            debug!(
                "split ({:.2}s, {:.2}s) unstable at cycle {:.1}s: x1={:.3}, x2={:.3}",
                split.g1, split.g2, cycle_length, x1, x2
            );
            return DelayEstimate::Oversaturated { x1, x2 };
        }

        let d1 = webster_delay(cycle_length, split.g1, x1, a1.saturation_flow);
        let d2 = webster_delay(cycle_length, split.g2, x2, a2.saturation_flow);

        DelayEstimate::Stable { d1, d2, x1, x2 }
    }

    /// Aggregate vehicle-seconds of delay per cycle, weighted by arrival
    /// rate. Infinite when the split is unstable; this is the objective the
    /// optimizer minimizes.
    pub fn total_delay(&self, split: GreenSplit, cycle_length: f64) -> f64 {
        match self.evaluate(split, cycle_length) {
            DelayEstimate::Stable { d1, d2, .. } => {
                let [a1, a2] = self.approaches;
                a1.arrival_rate * d1 + a2.arrival_rate * d2
            }
            DelayEstimate::Oversaturated { .. } => f64::INFINITY,
        }
    }
}

/// Average per-vehicle delay at one approach: uniform cyclic delay plus the
/// overflow term that grows as saturation approaches capacity.
fn webster_delay(cycle_length: f64, green: f64, x: f64, saturation_flow: f64) -> f64 {
    let green_share = green / cycle_length;
    let uniform = cycle_length * (1.0 - green_share).powi(2) / (2.0 * (1.0 - x));
    let overflow = x * x / (2.0 * saturation_flow * (1.0 - x));
    uniform + overflow
}
