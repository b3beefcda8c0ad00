//! Green-split optimization for a fixed cycle length
//!
//! The two-variable split collapses to a one-dimensional search: g2 is
//! always derived from the cycle-length constraint, and g1 ranges over a
//! bounded interval that keeps both greens above the minimum floor.

use log::debug;

use super::delay::DelayModel;
use super::types::{GreenSplit, SignalError, DEFAULT_TOLERANCE, MIN_GREEN};

/// (sqrt(5) - 1) / 2, the golden-section interior ratio
const INV_PHI: f64 = 0.618_033_988_749_894_9;

/// Tunable search parameters, defaulting to the standard minimum green
/// floor and convergence tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizerSettings {
    /// Minimum green time granted to each approach (seconds)
    pub min_green: f64,
    /// Relative bracket-width tolerance for convergence
    pub tolerance: f64,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            min_green: MIN_GREEN,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Optimizer output: the recommended split and its objective value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingPlan {
    /// Green time for approach 1 (seconds)
    pub g1: f64,
    /// Green time for approach 2 (seconds)
    pub g2: f64,
    /// Total system delay at the optimum (vehicle-seconds per cycle)
    pub total_delay: f64,
}

impl TimingPlan {
    pub fn split(&self) -> GreenSplit {
        GreenSplit::new(self.g1, self.g2)
    }
}

/// Bounded derivative-free minimizer of total system delay over g1
#[derive(Debug, Clone, Copy)]
pub struct TimingOptimizer {
    delay: DelayModel,
    lost_time: f64,
    settings: OptimizerSettings,
}

impl TimingOptimizer {
    pub fn new(delay: DelayModel, lost_time: f64) -> Self {
        Self::with_settings(delay, lost_time, OptimizerSettings::default())
    }

    pub fn with_settings(delay: DelayModel, lost_time: f64, settings: OptimizerSettings) -> Self {
        Self {
            delay,
            lost_time,
            settings,
        }
    }

    pub fn settings(&self) -> OptimizerSettings {
        self.settings
    }

    /// Find the green split minimizing total system delay for the given
    /// cycle length.
    ///
    /// Returns `SignalError::Infeasible` when the search interval is empty
    /// or no point in it yields a stable split.
    pub fn optimize(&self, cycle_length: f64) -> Result<TimingPlan, SignalError> {
        let lower = self.settings.min_green;
        let upper = cycle_length - self.lost_time - self.settings.min_green;
        if !(upper > lower) {
            return Err(SignalError::Infeasible { cycle_length });
        }

        let g1 = self.golden_section(lower, upper, cycle_length);
        let g2 = cycle_length - g1 - self.lost_time;
        let total_delay = self.objective(g1, cycle_length);

        debug!(
            "cycle {:.1}s: converged to g1={:.3}s, g2={:.3}s, delay={:.4}",
            cycle_length, g1, g2, total_delay
        );

        if !total_delay.is_finite() {
            return Err(SignalError::Infeasible { cycle_length });
        }

        Ok(TimingPlan {
            g1,
            g2,
            total_delay,
        })
    }

    /// Objective for a candidate g1. The derived g2 must stay positive;
    /// outside that region the objective is infinite, which also covers
    /// the stability cliff inside the delay model.
    fn objective(&self, g1: f64, cycle_length: f64) -> f64 {
        let g2 = cycle_length - g1 - self.lost_time;
        if g2 <= 0.0 {
            return f64::INFINITY;
        }
        self.delay.total_delay(GreenSplit::new(g1, g2), cycle_length)
    }

    /// Golden-section search on [a, b]. The objective is discontinuous at
    /// the stability boundary, so only bracket comparisons are used; the
    /// infinite arm loses every comparison and the bracket slides off it.
    fn golden_section(&self, mut a: f64, mut b: f64, cycle_length: f64) -> f64 {
        let mut c = b - INV_PHI * (b - a);
        let mut d = a + INV_PHI * (b - a);
        let mut fc = self.objective(c, cycle_length);
        let mut fd = self.objective(d, cycle_length);

        while b - a > self.settings.tolerance * (a.abs() + b.abs()) {
            if fc <= fd {
                b = d;
                d = c;
                fd = fc;
                c = b - INV_PHI * (b - a);
                fc = self.objective(c, cycle_length);
            } else {
                a = c;
                c = d;
                fc = fd;
                d = a + INV_PHI * (b - a);
                fd = self.objective(d, cycle_length);
            }
        }

        (a + b) / 2.0
    }
}
