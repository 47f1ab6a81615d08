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

use super::{AccelModel, DynamicsError, ModelParameter, SingularPositionSnafu};
use crate::linalg::Vector3;
use crate::{CartesianState, State};
use snafu::ensure;
use std::fmt;

/// Point mass gravity of the central body, `-mu * r / |r|^3`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CentralGravity {
    /// Gravitational parameter of the central body (km^3/s^2)
    pub mu_km3_s2: f64,
}

impl CentralGravity {
    pub fn new(mu_km3_s2: f64) -> Self {
        Self { mu_km3_s2 }
    }
}

impl fmt::Display for CentralGravity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "central gravity (mu = {} km^3/s^2)", self.mu_km3_s2)
    }
}

impl AccelModel for CentralGravity {
    /// Errors with [`DynamicsError::SingularPosition`] at the origin instead of returning NaNs.
    fn eom(&self, state: &State, time: f64) -> Result<Vector3<f64>, DynamicsError> {
        let radius = state.radius();
        let rmag = radius.norm();
        ensure!(
            rmag > 0.0,
            SingularPositionSnafu {
                model: self.to_string(),
                time
            }
        );

        Ok((-self.mu_km3_s2 / rmag.powi(3)) * radius)
    }

    fn parameters(&self) -> Vec<ModelParameter> {
        vec![ModelParameter::new(
            "gravitational_parameter",
            self.mu_km3_s2,
            "km^3 s^-2",
        )]
    }
}
