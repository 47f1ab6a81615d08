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

use super::{AccelModel, CentralGravity, ModelId, ModelParameter, RadiationPressure};
use super::RadiationPressureSettings;
use snafu::Snafu;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use typed_builder::TypedBuilder;

/// Builds an acceleration model from the run-level parameters.
pub type ModelConstructor = fn(&ModelParameters) -> Result<Box<dyn AccelModel>, RegistryError>;

/// Run-level inputs from which any of the built-in models can be constructed.
#[derive(Clone, Debug, PartialEq, TypedBuilder)]
#[builder(doc)]
pub struct ModelParameters {
    /// Gravitational parameter of the central body (km^3/s^2)
    pub gravitational_parameter: f64,
    /// Radiation pressure settings, only set if that model is switched on
    #[builder(default, setter(strip_option))]
    pub radiation_pressure: Option<RadiationPressureSettings>,
    /// Mass of the chaser (kg)
    #[builder(default, setter(strip_option))]
    pub chaser_mass: Option<f64>,
}

/// Errors raised while building a registry, always before any integration starts.
#[derive(Clone, Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum RegistryError {
    #[snafu(display("unknown acceleration model `{name}`, expected one of {}", known_names()))]
    UnknownModelName { name: String },
    #[snafu(display("acceleration model `{name}` is listed more than once"))]
    DuplicateModelName { name: String },
    #[snafu(display("acceleration model `{model}` requires {what}"))]
    MissingModelSettings { model: ModelId, what: &'static str },
    #[snafu(display("acceleration model `{model}` is misconfigured: {reason}"))]
    InvalidModelSettings { model: ModelId, reason: String },
}

fn known_names() -> String {
    ModelId::ALL
        .iter()
        .map(|id| format!("`{}`", id.name()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn build_central_gravity(params: &ModelParameters) -> Result<Box<dyn AccelModel>, RegistryError> {
    Ok(Box::new(CentralGravity::new(params.gravitational_parameter)))
}

fn build_radiation_pressure(
    params: &ModelParameters,
) -> Result<Box<dyn AccelModel>, RegistryError> {
    let settings =
        params
            .radiation_pressure
            .as_ref()
            .ok_or(RegistryError::MissingModelSettings {
                model: ModelId::RadiationPressure,
                what: "radiation pressure settings with a status of true",
            })?;
    let mass = params
        .chaser_mass
        .ok_or(RegistryError::MissingModelSettings {
            model: ModelId::RadiationPressure,
            what: "the chaser mass",
        })?;
    Ok(Box::new(RadiationPressure::new(settings, mass)?))
}

/// The frozen set of acceleration models of one run, keyed by their identifier.
///
/// Models are iterated (and therefore summed) in [`ModelId`] order, which makes repeated runs
/// bit-identical. The registry is only mutable until it is borrowed by the dynamics.
#[derive(Default)]
pub struct ModelRegistry {
    models: BTreeMap<ModelId, Box<dyn AccelModel>>,
}

impl ModelRegistry {
    /// An empty registry: a chaser with no acceleration at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default set: exactly one central gravity model.
    pub fn defaults(params: &ModelParameters) -> Self {
        let mut me = Self::new();
        me.insert(
            ModelId::CentralGravity,
            Box::new(CentralGravity::new(params.gravitational_parameter)),
        );
        debug!("default acceleration models: {me}");
        me
    }

    /// Builds the registry from a list of model names.
    ///
    /// Every name is resolved and checked for duplicates before any model is constructed, and a
    /// registry is only returned if all of them succeed.
    pub fn from_names<S: AsRef<str>>(
        names: &[S],
        params: &ModelParameters,
    ) -> Result<Self, RegistryError> {
        let mut seen = BTreeSet::new();
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let id: ModelId = name.parse()?;
            if !seen.insert(id) {
                return Err(RegistryError::DuplicateModelName {
                    name: name.to_string(),
                });
            }
            ids.push(id);
        }

        let mut me = Self::new();
        for id in ids {
            let model = Self::constructor(id)(params)?;
            me.insert(id, model);
        }
        debug!("selected acceleration models: {me}");
        Ok(me)
    }

    /// Returns the constructor of a built-in model.
    pub fn constructor(id: ModelId) -> ModelConstructor {
        match id {
            ModelId::CentralGravity => build_central_gravity,
            ModelId::RadiationPressure => build_radiation_pressure,
        }
    }

    /// Adds (or replaces) the model stored under this identifier, returning the previous one.
    pub fn insert(
        &mut self,
        id: ModelId,
        model: Box<dyn AccelModel>,
    ) -> Option<Box<dyn AccelModel>> {
        self.models.insert(id, model)
    }

    pub fn get(&self, id: ModelId) -> Option<&dyn AccelModel> {
        self.models.get(&id).map(|model| model.as_ref())
    }

    pub fn contains(&self, id: ModelId) -> bool {
        self.models.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Identifiers of the models, in summation order.
    pub fn ids(&self) -> impl Iterator<Item = ModelId> + '_ {
        self.models.keys().copied()
    }

    /// The models, in summation order.
    pub fn models(&self) -> impl Iterator<Item = &dyn AccelModel> + '_ {
        self.models.values().map(|model| model.as_ref())
    }

    /// All model parameters, tagged with the model they belong to.
    pub fn parameters(&self) -> Vec<(ModelId, ModelParameter)> {
        self.models
            .iter()
            .flat_map(|(id, model)| model.parameters().into_iter().map(|p| (*id, p)))
            .collect()
    }
}

impl fmt::Display for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "[]");
        }
        let models = self
            .models
            .values()
            .map(|model| format!("{model}"))
            .collect::<Vec<_>>();
        write!(f, "[{}]", models.join(", "))
    }
}

impl fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.models.keys()).finish()
    }
}
