//! Fixed-Step Clock
//!
//! Converts wall-clock frame time into a whole number of fixed steps.
//! Leftover time stays in the accumulator for the next frame; a step is
//! never split.

use tracing::warn;

use crate::config::SimConfig;

/// Slack when comparing the accumulator against the step size.
///
/// Feeding exactly `k * step` seconds must run `k` steps even though the
/// repeated subtraction in `f64` may leave `step - 1e-17`.
const ACCUMULATOR_SLACK: f64 = 1.0e-9;

/// Outcome of one `advance` call.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepPlan {
    /// Fixed steps to run now
    pub steps: u32,
    /// Seconds of backlog discarded by the catch-up cap
    pub dropped_backlog: f64,
}

/// Accumulator plus step size for one arena session.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationClock {
    accumulator: f64,
    step: f64,
    max_steps_per_call: Option<u32>,
    total_steps: u64,
}

impl SimulationClock {
    /// Create a clock.
    ///
    /// `max_steps_per_call` of `None` lets a long stall run every step it owes.
    pub fn new(step: f64, max_steps_per_call: Option<u32>) -> Self {
        Self {
            accumulator: 0.0,
            step,
            max_steps_per_call: max_steps_per_call.map(|cap| cap.max(1)),
            total_steps: 0,
        }
    }

    /// Create a clock from configuration.
    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.fixed_step, config.max_steps_per_call)
    }

    /// Fixed step size in seconds.
    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Time not yet consumed by a step.
    #[inline]
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Steps planned since creation.
    #[inline]
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Fraction of a step sitting in the accumulator (0..1), for render
    /// interpolation.
    pub fn alpha(&self) -> f64 {
        (self.accumulator / self.step).clamp(0.0, 1.0)
    }

    /// Add elapsed wall-clock time and return how many steps to run.
    ///
    /// Negative or non-finite elapsed time counts as zero.
    pub fn advance(&mut self, elapsed: f64) -> StepPlan {
        if elapsed.is_finite() && elapsed > 0.0 {
            self.accumulator += elapsed;
        }

        let mut plan = StepPlan::default();
        while self.accumulator + ACCUMULATOR_SLACK >= self.step {
            if self.max_steps_per_call.is_some_and(|cap| plan.steps >= cap) {
                plan.dropped_backlog = self.accumulator;
                self.accumulator = 0.0;
                warn!(
                    dropped_secs = plan.dropped_backlog,
                    steps = plan.steps,
                    "fixed-step catch-up capped; dropping backlog"
                );
                break;
            }
            self.accumulator = (self.accumulator - self.step).max(0.0);
            plan.steps += 1;
        }

        self.total_steps += u64::from(plan.steps);
        plan
    }

    /// Forget any accumulated time.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::FIXED_STEP_SECS as DT;

    fn uncapped() -> SimulationClock {
        SimulationClock::new(DT, None)
    }

    #[test]
    fn test_zero_elapsed_runs_nothing() {
        let mut clock = uncapped();
        for _ in 0..100 {
            assert_eq!(clock.advance(0.0).steps, 0);
        }
        assert_eq!(clock.accumulator(), 0.0);
        assert_eq!(clock.total_steps(), 0);
    }

    #[test]
    fn test_exact_step_runs_one() {
        let mut clock = uncapped();
        assert_eq!(clock.advance(DT).steps, 1);
        assert!(clock.accumulator() < 1e-9);
    }

    #[test]
    fn test_whole_steps_plus_remainder() {
        for k in 0..10u32 {
            let epsilon = 0.004;
            let mut clock = uncapped();
            let plan = clock.advance(k as f64 * DT + epsilon);
            assert_eq!(plan.steps, k);
            assert!((clock.accumulator() - epsilon).abs() < 1e-9);
        }
    }

    #[test]
    fn test_exact_multiples() {
        for k in 1..20u32 {
            let mut clock = uncapped();
            assert_eq!(clock.advance(k as f64 * DT).steps, k);
        }
    }

    #[test]
    fn test_remainder_carries_over() {
        let mut clock = uncapped();
        assert_eq!(clock.advance(DT * 0.6).steps, 0);
        assert_eq!(clock.advance(DT * 0.6).steps, 1);
        assert!((clock.accumulator() - DT * 0.2).abs() < 1e-9);
        assert!((clock.alpha() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_negative_and_nan_ignored() {
        let mut clock = uncapped();
        assert_eq!(clock.advance(-1.0).steps, 0);
        assert_eq!(clock.advance(f64::NAN).steps, 0);
        assert_eq!(clock.accumulator(), 0.0);
    }

    #[test]
    fn test_uncapped_catch_up() {
        let mut clock = uncapped();
        let plan = clock.advance(2.0);
        assert_eq!(plan.steps, 120);
        assert_eq!(plan.dropped_backlog, 0.0);
    }

    #[test]
    fn test_cap_drops_backlog() {
        let mut clock = SimulationClock::new(DT, Some(8));
        let plan = clock.advance(1.0);
        assert_eq!(plan.steps, 8);
        assert!(plan.dropped_backlog > 0.8);
        assert_eq!(clock.accumulator(), 0.0);

        // Normal frames afterwards are unaffected.
        assert_eq!(clock.advance(DT).steps, 1);
        assert_eq!(clock.total_steps(), 9);
    }

    #[test]
    fn test_cap_not_hit_when_within_limit() {
        let mut clock = SimulationClock::new(DT, Some(8));
        let plan = clock.advance(8.0 * DT + 0.001);
        assert_eq!(plan.steps, 8);
        assert_eq!(plan.dropped_backlog, 0.0);
        assert!((clock.accumulator() - 0.001).abs() < 1e-9);
    }

    #[test]
    fn test_reset_clears_accumulator() {
        let mut clock = uncapped();
        clock.advance(DT * 0.5);
        clock.reset();
        assert_eq!(clock.accumulator(), 0.0);
    }
}
