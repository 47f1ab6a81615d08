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

use super::{AccelModel, CancelledSnafu, Dynamics, DynamicsError, ModelRegistry};
use crate::linalg::{Vector3, Vector6};
use crate::{CartesianState, State};
use rayon::prelude::*;
use snafu::ensure;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// `OrbitalDynamics` provides the equations of motion of the chaser: its velocity, and the sum of
/// the accelerations of every model in the registry.
#[derive(Clone)]
pub struct OrbitalDynamics<'a> {
    registry: &'a ModelRegistry,
    cancel: Option<Arc<AtomicBool>>,
    parallel: bool,
}

impl<'a> OrbitalDynamics<'a> {
    /// Initialize orbital dynamics from a frozen registry of acceleration models.
    pub fn new(registry: &'a ModelRegistry) -> Self {
        Self {
            registry,
            cancel: None,
            parallel: false,
        }
    }

    /// Every evaluation checks this flag, and fails with [`DynamicsError::Cancelled`] once it is raised.
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Evaluate the models on the rayon thread pool. The reduction happens in registry order, so
    /// the result is identical to the sequential evaluation.
    pub fn with_parallel_models(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn registry(&self) -> &ModelRegistry {
        self.registry
    }

    /// Sum of all of the model accelerations at this state and time, in km/s^2.
    pub fn total_acceleration(
        &self,
        state: &State,
        time: f64,
    ) -> Result<Vector3<f64>, DynamicsError> {
        let mut d_v = Vector3::zeros();
        if self.parallel && self.registry.len() > 1 {
            let models: Vec<&dyn AccelModel> = self.registry.models().collect();
            let accels = models
                .par_iter()
                .map(|model| model.eom(state, time))
                .collect::<Result<Vec<_>, _>>()?;
            for model_acc in accels {
                d_v += model_acc;
            }
        } else {
            for model in self.registry.models() {
                d_v += model.eom(state, time)?;
            }
        }
        Ok(d_v)
    }
}

impl Dynamics for OrbitalDynamics<'_> {
    fn eom(&self, time: f64, state: &State) -> Result<State, DynamicsError> {
        if let Some(flag) = &self.cancel {
            ensure!(!flag.load(Ordering::Relaxed), CancelledSnafu { time });
        }

        let body_acceleration = self.total_acceleration(state, time)?;
        let d_x = Vector6::from_iterator(
            state
                .velocity()
                .iter()
                .chain(body_acceleration.iter())
                .cloned(),
        );

        if d_x.iter().any(|x| !x.is_finite()) {
            let mut derivative = [0.0; 6];
            derivative.copy_from_slice(d_x.as_slice());
            return Err(DynamicsError::NonFiniteDerivative { time, derivative });
        }

        Ok(d_x)
    }
}

/// Computes the state derivative `[v, sum of accelerations]` of this state at this time.
pub fn state_derivative(
    state: &State,
    time: f64,
    registry: &ModelRegistry,
) -> Result<State, DynamicsError> {
    OrbitalDynamics::new(registry).eom(time, state)
}
