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

use super::error_ctrl::{ErrorCtrl, RSSCartesianStep};
use super::{CashKarp45, Dormand45, IntegrationDetails, PropInstance, PropOpts, RK, RK4Fixed};
use crate::dynamics::Dynamics;
use crate::State;

/// Integrates a set of dynamics forward in time with the Runge Kutta method chosen at construction.
///
/// Start a propagation with [`Propagator::with`].
#[derive(Clone, Debug)]
pub struct Propagator<D: Dynamics, E: ErrorCtrl> {
    pub dynamics: D,
    pub opts: PropOpts<E>,
    pub(crate) order: u8,
    // Derivative evaluations per attempted step
    pub(crate) stages: usize,
    pub(crate) a_coeffs: &'static [f64],
    pub(crate) b_coeffs: &'static [f64],
}

impl<D: Dynamics, E: ErrorCtrl> Propagator<D, E> {
    /// Propagator using the Butcher table of `T`.
    pub fn new<T: RK>(dynamics: D, opts: PropOpts<E>) -> Self {
        Self {
            dynamics,
            opts,
            stages: T::STAGES,
            order: T::ORDER,
            a_coeffs: T::A_COEFFS,
            b_coeffs: T::B_COEFFS,
        }
    }

    pub fn set_tolerance(&mut self, tol: f64) {
        self.opts.tolerance = tol;
    }

    pub fn set_max_step(&mut self, step: f64) {
        self.opts.set_max_step(step);
    }

    pub fn set_min_step(&mut self, step: f64) {
        self.opts.set_min_step(step);
    }

    /// A Dormand Prince 4-5 propagator with custom propagator options.
    pub fn dp45(dynamics: D, opts: PropOpts<E>) -> Self {
        Self::new::<Dormand45>(dynamics, opts)
    }

    /// A Cash Karp 4-5 propagator with custom propagator options.
    pub fn ck45(dynamics: D, opts: PropOpts<E>) -> Self {
        Self::new::<CashKarp45>(dynamics, opts)
    }

    /// Starts a propagation of these dynamics from `state` at `time` (in seconds).
    pub fn with(&self, state: State, time: f64) -> PropInstance<'_, D, E> {
        let k = vec![State::zeros(); self.stages];
        // Adaptive steps, the first one included, stay within the step bounds
        let init_step = if self.opts.fixed_step {
            self.opts.init_step
        } else {
            self.opts.init_step.max(self.opts.min_step).min(self.opts.max_step)
        };
        PropInstance {
            state,
            time,
            prop: self,
            details: IntegrationDetails {
                step: init_step,
                error: 0.0,
                attempts: 1,
            },
            step_size: init_step,
            fixed_step: self.opts.fixed_step,
            k,
        }
    }
}

impl<D: Dynamics> Propagator<D, RSSCartesianStep> {
    /// Dormand45 with the default options.
    pub fn default(dynamics: D) -> Self {
        Self::new::<Dormand45>(dynamics, PropOpts::default())
    }

    /// A classic RK4 with a fixed step, in seconds.
    pub fn rk4(dynamics: D, step: f64) -> Self {
        Self::new::<RK4Fixed>(dynamics, PropOpts::with_fixed_step(step))
    }
}
