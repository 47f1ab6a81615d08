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
use crate::State;
use serde_derive::{Deserialize, Serialize};
use snafu::Snafu;

use std::fmt;
use std::str::FromStr;

/// Cartesian-based orbital dynamics: the state derivative assembled from a model registry.
pub mod orbital;
pub use self::orbital::*;

/// Point mass gravity of the central body.
pub mod gravity;
pub use self::gravity::*;

/// Radiation pressure models.
pub mod solarpressure;
pub use self::solarpressure::*;

/// Construction of the frozen set of acceleration models used by a run.
pub mod registry;
pub use self::registry::*;

/// A trait for models with equations of motion that can be integrated.
///
/// Implementors must be pure: the propagator may call `eom` any number of times per step and with
/// trial states which are never accepted.
pub trait Dynamics: Send + Sync {
    /// Defines the equations of motion.
    ///
    /// - `time`: Time in seconds past the simulation epoch.
    /// - `state`: The state vector, which changes at each integration stage.
    fn eom(&self, time: f64, state: &State) -> Result<State, DynamicsError>;
}

/// A trait for immutable dynamics that return an acceleration (e.g., central body gravity).
///
/// Models are evaluated independently from one another for the same state and time, so an
/// implementation must not rely on any side effect.
pub trait AccelModel: Send + Sync + fmt::Display {
    /// Defines the equations of motion for this acceleration model, in km/s^2.
    fn eom(&self, state: &State, time: f64) -> Result<Vector3<f64>, DynamicsError>;

    /// Parameters captured at construction, reported in the simulation metadata.
    fn parameters(&self) -> Vec<ModelParameter> {
        Vec::new()
    }
}

/// A named parameter of an acceleration model.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelParameter {
    pub name: String,
    pub value: f64,
    pub unit: &'static str,
}

impl ModelParameter {
    pub fn new(name: &str, value: f64, unit: &'static str) -> Self {
        Self {
            name: name.to_string(),
            value,
            unit,
        }
    }
}

impl fmt::Display for ModelParameter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {} {}", self.name, self.value, self.unit)
    }
}

/// Identifier of an acceleration model, used as the key of the [`ModelRegistry`].
///
/// The ordering of the variants is the order in which the models are summed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelId {
    CentralGravity,
    RadiationPressure,
}

impl ModelId {
    /// All of the built-in model identifiers.
    pub const ALL: [ModelId; 2] = [ModelId::CentralGravity, ModelId::RadiationPressure];

    /// Name used to select this model in a configuration file.
    pub fn name(&self) -> &'static str {
        match self {
            ModelId::CentralGravity => "central_gravity",
            ModelId::RadiationPressure => "radiation_pressure",
        }
    }

    /// Resolves a configuration name to its identifier.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.name() == name)
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ModelId {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| RegistryError::UnknownModelName {
            name: s.to_string(),
        })
    }
}

/// Dynamical model errors.
#[derive(Clone, Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DynamicsError {
    /// The acceleration direction is undefined at this position.
    #[snafu(display("{model} is singular at t = {time} s: the position is at the origin"))]
    SingularPosition { model: String, time: f64 },
    /// At least one component of the state derivative is NaN or infinite.
    #[snafu(display("non-finite state derivative {derivative:?} at t = {time} s"))]
    NonFiniteDerivative { time: f64, derivative: [f64; 6] },
    /// The cancellation flag was raised by the caller.
    #[snafu(display("propagation cancelled at t = {time} s"))]
    Cancelled { time: f64 },
}
