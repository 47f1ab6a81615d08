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

use snafu::prelude::*;
use std::fmt;

/// Error estimate reductions of adaptive steps.
pub mod error_ctrl;
pub use self::error_ctrl::*;

// Re-Export
mod instance;
pub use instance::*;
mod propagator;
pub use propagator::*;
mod rk_methods;
pub use rk_methods::*;
mod options;
pub use options::*;

use crate::dynamics::DynamicsError;
use crate::md::trajectory::TrajError;
use crate::State;

/// Step size, error and number of tries of the last accepted step. See [`PropInstance::latest_details`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegrationDetails {
    /// step size used, in seconds
    pub step: f64,
    /// error in the previous integration step
    pub error: f64,
    /// number of attempts needed by an adaptive step size to be within the tolerance
    pub attempts: u8,
}

impl fmt::Display for IntegrationDetails {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "IntegrationDetails {{step: {} s, error: {:.3e}, attempts: {}}}",
            self.step, self.error, self.attempts
        )
    }
}

/// Observer called by the propagator after every accepted step, in strictly increasing time.
pub trait StepObserver {
    fn observe(&mut self, state: &State, time: f64) -> Result<(), TrajError>;
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum PropagationError {
    #[snafu(display("dynamics failed: {source}"))]
    Dynamics { source: DynamicsError },
    #[snafu(display("step observer failed: {source}"))]
    Observer { source: TrajError },
    #[snafu(display(
        "could not meet tolerance {tolerance:e} at t = {time} s: error {error:e} with a step of {step} s after {attempts} attempts"
    ))]
    ToleranceNotMet {
        time: f64,
        step: f64,
        error: f64,
        tolerance: f64,
        attempts: u8,
    },
    #[snafu(display("cannot propagate from t = {start} s to t = {end} s"))]
    InvalidTimeSpan { start: f64, end: f64 },
    #[snafu(display("step size must be finite and strictly positive, got {step} s"))]
    InvalidStep { step: f64 },
}
