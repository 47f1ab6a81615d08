/*
    Scarab, chaser spacecraft trajectory propagation
    Copyright (C) 2024-onwards The scarab developers

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use super::error_ctrl::ErrorCtrl;
use super::{
    DynamicsSnafu, IntegrationDetails, InvalidStepSnafu, InvalidTimeSpanSnafu, ObserverSnafu,
    PropagationError, Propagator, StepObserver,
};
use crate::dynamics::Dynamics;
use crate::time::Duration;
use crate::State;
use snafu::{ensure, ResultExt};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

// A step is stretched to the stop time if it would otherwise leave a remainder smaller than this fraction of itself.
const STEP_SNAP_FRACTION: f64 = 1e-9;

/// A propagator instance is a propagator in use: it holds the current state and time of the chaser,
/// the details of the previous step, and the step size to attempt next.
#[derive(Debug)]
pub struct PropInstance<'a, D: Dynamics, E: ErrorCtrl> {
    /// Current state of the chaser
    pub state: State,
    /// The time of this state, in seconds
    pub time: f64,
    /// Butcher table and options
    pub prop: &'a Propagator<D, E>,
    /// Details of the last accepted step
    pub details: IntegrationDetails,
    pub(crate) step_size: f64, // Stores the adapted step for the _next_ call
    pub(crate) fixed_step: bool,
    // Stage derivatives, allocated once
    pub(crate) k: Vec<State>,
}

impl<D: Dynamics, E: ErrorCtrl> PropInstance<'_, D, E> {
    /// Overrides the next step size, and whether it is fixed
    pub fn set_step(&mut self, step_size: f64, fixed: bool) {
        self.step_size = step_size;
        self.fixed_step = fixed;
    }

    fn until_time_observer_option(
        &mut self,
        stop_time: f64,
        mut observer: Option<&mut dyn StepObserver>,
    ) -> Result<State, PropagationError> {
        ensure!(
            self.time.is_finite() && stop_time.is_finite() && stop_time >= self.time,
            InvalidTimeSpanSnafu {
                start: self.time,
                end: stop_time
            }
        );
        ensure!(
            self.step_size.is_finite() && self.step_size > 0.0,
            InvalidStepSnafu {
                step: self.step_size
            }
        );
        if stop_time == self.time {
            return Ok(self.state);
        }

        let duration = stop_time - self.time;
        #[cfg(not(target_arch = "wasm32"))]
        let tick = Instant::now();
        let log_progress = duration >= 120.0;

        if log_progress {
            info!(
                "Propagating for {} until t = {stop_time} s",
                Duration::from_seconds(duration)
            );
        }

        let mut steps: usize = 0;
        while self.time < stop_time {
            let remaining = stop_time - self.time;
            let is_final = self.step_size >= remaining - STEP_SNAP_FRACTION * self.step_size;
            let prev_step_size = self.step_size;
            let attempt = if is_final { remaining } else { self.step_size };

            let (used, next_state) = self.derive(attempt)?;

            if used >= remaining {
                // Land exactly on the stop time, and keep the step size for subsequent calls
                self.time = stop_time;
                self.step_size = prev_step_size;
            } else {
                self.time += used;
            }
            self.state = next_state;
            steps += 1;

            if let Some(obs) = observer.as_deref_mut() {
                obs.observe(&self.state, self.time).context(ObserverSnafu)?;
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            if log_progress {
                let tock: Duration = tick.elapsed().into();
                info!("Done in {} ({} steps)", tock, steps);
            }
        }
        #[cfg(target_arch = "wasm32")]
        debug!("Done ({} steps)", steps);

        Ok(self.state)
    }

    /// This method propagates the provided Dynamics for the provided duration, in seconds.
    pub fn for_duration(&mut self, duration: f64) -> Result<State, PropagationError> {
        let stop_time = self.time + duration;
        self.until_time_observer_option(stop_time, None)
    }

    /// Propagates the provided Dynamics until the provided time. Returns the end state.
    pub fn until_time(&mut self, stop_time: f64) -> Result<State, PropagationError> {
        self.until_time_observer_option(stop_time, None)
    }

    /// Propagates the provided Dynamics until the provided time, calling the observer after each
    /// accepted step. Returns the end state.
    ///
    /// The observer is *not* called with the current state: it only sees the states which this call computes.
    pub fn until_time_with_observer(
        &mut self,
        stop_time: f64,
        observer: &mut dyn StepObserver,
    ) -> Result<State, PropagationError> {
        self.until_time_observer_option(stop_time, Some(observer))
    }

    /// Take a single propagator step of at most the current step size.
    pub fn single_step(&mut self) -> Result<(), PropagationError> {
        ensure!(
            self.step_size.is_finite() && self.step_size > 0.0,
            InvalidStepSnafu {
                step: self.step_size
            }
        );
        let (t, state_vec) = self.derive(self.step_size)?;
        self.time += t;
        self.state = state_vec;

        Ok(())
    }

    /// Attempts a step of at most `step` seconds from the current state, without updating it.
    ///
    /// Returns the step actually taken and the state at its end. Adaptive methods retry with a
    /// smaller step until the error estimate is within the tolerance, and store the step to
    /// attempt next in `self.step_size`.
    fn derive(&mut self, step: f64) -> Result<(f64, State), PropagationError> {
        let state_vec = self.state;
        let time = self.time;
        // The error is always written before being read
        self.details.attempts = 1;
        // Mutable because we may change it below
        let mut step_size = step;
        loop {
            let ki = self
                .prop
                .dynamics
                .eom(time, &state_vec)
                .context(DynamicsSnafu)?;
            self.k[0] = ki;
            let mut a_idx: usize = 0;
            for i in 0..(self.prop.stages - 1) {
                // c_i is the sum of row i of A, and w_i the weighted sum of the previous stages
                let mut ci: f64 = 0.0;
                let mut wi = State::zeros();
                for kj in &self.k[0..i + 1] {
                    let a_ij = self.prop.a_coeffs[a_idx];
                    ci += a_ij;
                    wi += a_ij * kj;
                    a_idx += 1;
                }

                let ki = self
                    .prop
                    .dynamics
                    .eom(time + ci * step_size, &(state_vec + step_size * wi))
                    .context(DynamicsSnafu)?;
                self.k[i + 1] = ki;
            }
            let mut next_state = state_vec;
            // The error estimate is the difference between the propagated and the embedded solutions
            let mut error_est = State::zeros();
            for (i, ki) in self.k.iter().enumerate() {
                let b_i = self.prop.b_coeffs[i];
                if !self.fixed_step {
                    let b_i_star = self.prop.b_coeffs[i + self.prop.stages];
                    error_est += step_size * (b_i - b_i_star) * ki;
                }
                next_state += step_size * b_i * ki;
            }

            if self.fixed_step {
                self.details.step = step_size;
                self.details.error = 0.0;
                return Ok((step_size, next_state));
            }

            self.details.error = E::estimate(&error_est, &next_state, &state_vec);
            let opts = &self.prop.opts;
            if self.details.error <= opts.tolerance {
                self.details.step = step_size;
                if self.details.error < opts.tolerance {
                    // Grow the next step
                    let proposed_step = 0.9
                        * step_size
                        * (opts.tolerance / self.details.error)
                            .powf(1.0 / f64::from(self.prop.order));
                    step_size = proposed_step.min(opts.max_step);
                }
                self.step_size = step_size;
                return Ok((self.details.step, next_state));
            }

            ensure!(
                step_size > opts.min_step && self.details.attempts < opts.attempts,
                super::ToleranceNotMetSnafu {
                    time,
                    step: step_size,
                    error: self.details.error,
                    tolerance: opts.tolerance,
                    attempts: self.details.attempts,
                }
            );

            // Retry with a smaller step
            self.details.attempts += 1;
            let proposed_step = 0.9
                * step_size
                * (opts.tolerance / self.details.error).powf(1.0 / f64::from(self.prop.order - 1));
            debug!(
                "t = {time} s: error {:.3e} above tolerance with a step of {step_size} s, retrying with {proposed_step} s",
                self.details.error
            );
            step_size = proposed_step.max(opts.min_step);
        }
    }

    /// Details of the last accepted step.
    pub fn latest_details(&self) -> IntegrationDetails {
        self.details
    }
}
