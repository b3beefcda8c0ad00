//! Intersection facade tying the model components together
//!
//! Holds the validated, immutable traffic parameters and hands out the
//! delay model, optimizer and queue simulator configured with them.

use super::delay::DelayModel;
use super::optimizer::{OptimizerSettings, TimingOptimizer, TimingPlan};
use super::queue::QueueSimulator;
use super::types::{
    Approach, DelayEstimate, GreenSplit, QueueTrace, SignalError, DEFAULT_LOST_TIME,
};

/// A two-phase signalized intersection with fixed traffic parameters
#[derive(Debug, Clone, Copy)]
pub struct SignalIntersection {
    approaches: [Approach; 2],
    lost_time: f64,
}

impl SignalIntersection {
    /// Build an intersection, validating every parameter up front.
    ///
    /// Rejects non-positive or non-finite arrival rates, saturation flows
    /// that do not exceed their arrival rate (the approach could never
    /// clear), and negative or non-finite lost time.
    pub fn new(
        arrival_rates: [f64; 2],
        saturation_flows: [f64; 2],
        lost_time: f64,
    ) -> Result<Self, SignalError> {
        for (i, (&rate, &flow)) in arrival_rates.iter().zip(&saturation_flows).enumerate() {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(SignalError::InvalidConfig(format!(
                    "approach {} arrival rate must be positive and finite, got {}",
                    i + 1,
                    rate
                )));
            }
            if !flow.is_finite() || flow <= rate {
                return Err(SignalError::InvalidConfig(format!(
                    "approach {} saturation flow ({}) must exceed its arrival rate ({})",
                    i + 1,
                    flow,
                    rate
                )));
            }
        }
        if !lost_time.is_finite() || lost_time < 0.0 {
            return Err(SignalError::InvalidConfig(format!(
                "lost time must be non-negative and finite, got {}",
                lost_time
            )));
        }

        Ok(Self {
            approaches: [
                Approach::new(arrival_rates[0], saturation_flows[0]),
                Approach::new(arrival_rates[1], saturation_flows[1]),
            ],
            lost_time,
        })
    }

    /// Build an intersection with the standard 6-second lost time
    pub fn with_default_lost_time(
        arrival_rates: [f64; 2],
        saturation_flows: [f64; 2],
    ) -> Result<Self, SignalError> {
        Self::new(arrival_rates, saturation_flows, DEFAULT_LOST_TIME)
    }

    pub fn approaches(&self) -> [Approach; 2] {
        self.approaches
    }

    pub fn lost_time(&self) -> f64 {
        self.lost_time
    }

    pub fn delay_model(&self) -> DelayModel {
        DelayModel::new(self.approaches)
    }

    pub fn optimizer(&self) -> TimingOptimizer {
        TimingOptimizer::new(self.delay_model(), self.lost_time)
    }

    /// Optimizer with non-default search settings
    pub fn optimizer_with(&self, settings: OptimizerSettings) -> TimingOptimizer {
        TimingOptimizer::with_settings(self.delay_model(), self.lost_time, settings)
    }

    pub fn queue_simulator(&self) -> QueueSimulator {
        QueueSimulator::new(self.approaches)
    }

    /// Per-approach delay and saturation for a given split
    pub fn evaluate(&self, split: GreenSplit, cycle_length: f64) -> DelayEstimate {
        self.delay_model().evaluate(split, cycle_length)
    }

    /// Arrival-weighted total system delay; infinite when unstable
    pub fn total_delay(&self, split: GreenSplit, cycle_length: f64) -> f64 {
        self.delay_model().total_delay(split, cycle_length)
    }

    /// Best green split for the given cycle length
    pub fn optimize_timing(&self, cycle_length: f64) -> Result<TimingPlan, SignalError> {
        self.optimizer().optimize(cycle_length)
    }

    /// Queue evolution under a given split, starting from empty queues
    pub fn simulate_queues(
        &self,
        split: GreenSplit,
        cycle_length: f64,
        num_cycles: u32,
    ) -> QueueTrace {
        self.queue_simulator().simulate(split, cycle_length, num_cycles)
    }
}
