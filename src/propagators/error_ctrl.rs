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

use crate::linalg::Vector3;
use crate::{CartesianState, State};

// Below this displacement (km or km/s), the error is used as is instead of relative to the displacement.
const REL_ERR_THRESH: f64 = 0.1;

/// Reduces the embedded error estimate of a step to a single number compared against the tolerance.
pub trait ErrorCtrl: Copy + Send + Sync {
    /// `error_est` is the difference between the two solutions of the embedded method,
    /// `candidate` the state at the end of the step and `cur_state` the state at its start.
    fn estimate(error_est: &State, candidate: &State, cur_state: &State) -> f64;
}

/// Largest component error, relative to the change of that component over the step when the
/// change is large enough.
///
/// Mixes kilometers and kilometers per second, so prefer one of the RSS controllers.
#[derive(Clone, Copy, Debug, Default)]
pub struct LargestError;
impl ErrorCtrl for LargestError {
    fn estimate(error_est: &State, candidate: &State, cur_state: &State) -> f64 {
        let delta = candidate - cur_state;
        error_est
            .iter()
            .zip(delta.iter())
            .map(|(err_i, delta_i)| {
                if *delta_i > REL_ERR_THRESH {
                    (err_i / delta_i).abs()
                } else {
                    err_i.abs()
                }
            })
            .fold(0.0, f64::max)
    }
}

/// Norm of the error relative to the norm of the change over the step.
pub fn rss_step(
    prop_err: &Vector3<f64>,
    candidate: &Vector3<f64>,
    cur_state: &Vector3<f64>,
) -> f64 {
    let mag = (candidate - cur_state).norm();
    let err = prop_err.norm();
    if mag > REL_ERR_THRESH {
        err / mag
    } else {
        err
    }
}

/// Norm of the error relative to the mean magnitude of the vector over the step.
///
/// Stricter than [`rss_step`]: very small tolerances make the propagation slow.
pub fn rss_state(
    prop_err: &Vector3<f64>,
    candidate: &Vector3<f64>,
    cur_state: &Vector3<f64>,
) -> f64 {
    let mag = 0.5 * (candidate + cur_state).norm();
    let err = prop_err.norm();
    if mag > REL_ERR_THRESH {
        err / mag
    } else {
        err
    }
}

/// [`rss_step`] on the position and on the velocity, whichever is worst. Default controller.
#[derive(Clone, Copy, Debug, Default)]
pub struct RSSCartesianStep;
impl ErrorCtrl for RSSCartesianStep {
    fn estimate(error_est: &State, candidate: &State, cur_state: &State) -> f64 {
        let pos = rss_step(
            &error_est.radius(),
            &candidate.radius(),
            &cur_state.radius(),
        );
        let vel = rss_step(
            &error_est.velocity(),
            &candidate.velocity(),
            &cur_state.velocity(),
        );
        pos.max(vel)
    }
}

/// [`rss_state`] on the position and on the velocity, whichever is worst.
#[derive(Clone, Copy, Debug, Default)]
pub struct RSSCartesianState;
impl ErrorCtrl for RSSCartesianState {
    fn estimate(error_est: &State, candidate: &State, cur_state: &State) -> f64 {
        let pos = rss_state(
            &error_est.radius(),
            &candidate.radius(),
            &cur_state.radius(),
        );
        let vel = rss_state(
            &error_est.velocity(),
            &candidate.velocity(),
            &cur_state.velocity(),
        );
        pos.max(vel)
    }
}
