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

use super::output::OutputSettings;
use super::{ConfigError, ConfigRepr, InvalidConfigSnafu};
use crate::dynamics::{ModelId, ModelParameters, RadiationPressureSettings};
use crate::propagators::{PropOpts, RSSCartesianStep};
use crate::State;
use serde_derive::{Deserialize, Serialize};
use snafu::ensure;
use std::fmt;
use typed_builder::TypedBuilder;

/// Mass properties of a spacecraft.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    /// Mass (kg)
    pub mass: f64,
}

/// Radiation pressure section of the configuration. The other fields are only required when the
/// status is `true`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RadiationPressureConfig {
    pub status: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radiation_pressure: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radiation_pressure_coefficient: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radiation_pressure_area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector_to_source: Option<[f64; 3]>,
}

/// The available integration methods.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorKind {
    /// Classic fourth order Runge Kutta, fixed step
    Rk4,
    /// Dormand Prince 5(4), adaptive step
    #[default]
    Dormand45,
    /// Cash Karp 5(4), adaptive step
    CashKarp45,
}

impl IntegratorKind {
    pub fn is_adaptive(&self) -> bool {
        !matches!(self, Self::Rk4)
    }
}

impl fmt::Display for IntegratorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Rk4 => write!(f, "RK4 (fixed step)"),
            Self::Dormand45 => write!(f, "Dormand Prince 5(4)"),
            Self::CashKarp45 => write!(f, "Cash Karp 5(4)"),
        }
    }
}

/// Optional integrator section of the configuration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IntegratorConfig {
    #[serde(default)]
    pub method: IntegratorKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_step: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_step: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempts: Option<u8>,
}

/// The simulator input, as written in a YAML file.
///
/// ```yaml
/// initial_state: [7000.0, 0.0, 0.0, 0.0, 7.5, 0.0]
/// start_time: 0.0
/// end_time: 5400.0
/// initial_step: 10.0
/// gravitational_parameter: 398600.4418
/// chaser:
///   mass: 100.0
/// target:
///   mass: 1000.0
/// output:
///   metadata_file: metadata.csv
///   state_history_file: state_history.csv
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Position (km) and velocity (km/s) of the chaser at the start time
    pub initial_state: [f64; 6],
    /// Seconds
    pub start_time: f64,
    /// Seconds
    pub end_time: f64,
    /// Seconds
    pub initial_step: f64,
    /// Gravitational parameter of the central body (km^3/s^2)
    pub gravitational_parameter: f64,
    pub chaser: BodyConfig,
    pub target: BodyConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radiation_pressure: Option<RadiationPressureConfig>,
    /// Names of the acceleration models, the default set is used if absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integrator: Option<IntegratorConfig>,
    pub output: OutputSettings,
}

impl ConfigRepr for SimulatorConfig {}

fn check_finite(field: &str, value: f64) -> Result<f64, ConfigError> {
    ensure!(
        value.is_finite(),
        InvalidConfigSnafu {
            field,
            reason: format!("must be a finite number, got {value}")
        }
    );
    Ok(value)
}

fn check_positive(field: &str, value: f64) -> Result<f64, ConfigError> {
    check_finite(field, value)?;
    ensure!(
        value > 0.0,
        InvalidConfigSnafu {
            field,
            reason: format!("must be strictly positive, got {value}")
        }
    );
    Ok(value)
}

fn check_non_negative(field: &str, value: f64) -> Result<f64, ConfigError> {
    check_finite(field, value)?;
    ensure!(
        value >= 0.0,
        InvalidConfigSnafu {
            field,
            reason: format!("must not be negative, got {value}")
        }
    );
    Ok(value)
}

fn require(field: &str, value: Option<f64>) -> Result<f64, ConfigError> {
    value.ok_or_else(|| ConfigError::InvalidConfig {
        field: field.to_string(),
        reason: "is required when the radiation pressure status is true".to_string(),
    })
}

impl SimulatorConfig {
    /// Checks every field and returns the settings of the run.
    pub fn validate(&self) -> Result<SimulatorSettings, ConfigError> {
        for (i, x) in self.initial_state.iter().enumerate() {
            check_finite(&format!("initial_state[{i}]"), *x)?;
        }
        let start_time = check_finite("start_time", self.start_time)?;
        let end_time = check_finite("end_time", self.end_time)?;
        ensure!(
            end_time >= start_time,
            InvalidConfigSnafu {
                field: "end_time",
                reason: format!("must not be before the start time ({start_time} s)")
            }
        );
        let initial_step = check_positive("initial_step", self.initial_step)?;
        let mu = check_positive("gravitational_parameter", self.gravitational_parameter)?;
        let chaser_mass = check_positive("chaser.mass", self.chaser.mass)?;
        let target_mass = check_positive("target.mass", self.target.mass)?;

        let radiation_pressure = match self.radiation_pressure {
            Some(cfg) if cfg.status => {
                let vector_to_source = cfg.vector_to_source.ok_or_else(|| {
                    ConfigError::InvalidConfig {
                        field: "radiation_pressure.vector_to_source".to_string(),
                        reason: "is required when the radiation pressure status is true"
                            .to_string(),
                    }
                })?;
                for (i, x) in vector_to_source.iter().enumerate() {
                    check_finite(&format!("radiation_pressure.vector_to_source[{i}]"), *x)?;
                }
                ensure!(
                    vector_to_source.iter().any(|x| *x != 0.0),
                    InvalidConfigSnafu {
                        field: "radiation_pressure.vector_to_source",
                        reason: "must not be the zero vector"
                    }
                );
                Some(RadiationPressureSettings {
                    radiation_pressure: check_non_negative(
                        "radiation_pressure.radiation_pressure",
                        require(
                            "radiation_pressure.radiation_pressure",
                            cfg.radiation_pressure,
                        )?,
                    )?,
                    radiation_pressure_coefficient: check_non_negative(
                        "radiation_pressure.radiation_pressure_coefficient",
                        require(
                            "radiation_pressure.radiation_pressure_coefficient",
                            cfg.radiation_pressure_coefficient,
                        )?,
                    )?,
                    radiation_pressure_area: check_non_negative(
                        "radiation_pressure.radiation_pressure_area",
                        require(
                            "radiation_pressure.radiation_pressure_area",
                            cfg.radiation_pressure_area,
                        )?,
                    )?,
                    vector_to_source,
                })
            }
            _ => None,
        };

        // Model names are resolved by the registry when the simulator is built
        if let Some(names) = &self.models {
            if radiation_pressure.is_some()
                && !names.iter().any(|n| n == ModelId::RadiationPressure.name())
            {
                warn!("radiation pressure is switched on but not listed in `models`: it will not be applied");
            }
        } else if radiation_pressure.is_some() {
            warn!("radiation pressure is switched on but `models` is not set: only the default models will be applied");
        }

        let integrator = {
            let cfg = self.integrator.unwrap_or_default();
            let defaults = PropOpts::<RSSCartesianStep>::default();
            let tolerance = check_positive(
                "integrator.tolerance",
                cfg.tolerance.unwrap_or(defaults.tolerance),
            )?;
            let min_step = check_positive(
                "integrator.min_step",
                cfg.min_step.unwrap_or(defaults.min_step),
            )?;
            let max_step = check_positive(
                "integrator.max_step",
                cfg.max_step.unwrap_or(defaults.max_step),
            )?;
            ensure!(
                max_step >= min_step,
                InvalidConfigSnafu {
                    field: "integrator.max_step",
                    reason: format!("must not be less than the minimum step ({min_step} s)")
                }
            );
            let attempts = cfg.attempts.unwrap_or(defaults.attempts);
            ensure!(
                attempts > 0,
                InvalidConfigSnafu {
                    field: "integrator.attempts",
                    reason: "must be at least one"
                }
            );
            IntegratorSettings {
                method: cfg.method,
                initial_step,
                tolerance,
                min_step,
                max_step,
                attempts,
            }
        };

        Ok(SimulatorSettings {
            initial_state: State::from_column_slice(&self.initial_state),
            start_time,
            end_time,
            gravitational_parameter: mu,
            chaser_mass,
            target_mass,
            radiation_pressure,
            models: self.models.clone(),
            integrator,
            output: self.output.clone(),
        })
    }
}

/// Validated integration settings.
#[derive(Copy, Clone, Debug, PartialEq, TypedBuilder)]
#[builder(doc)]
pub struct IntegratorSettings {
    #[builder(default)]
    pub method: IntegratorKind,
    /// Seconds
    pub initial_step: f64,
    #[builder(default = 1e-12)]
    pub tolerance: f64,
    #[builder(default = 0.001)]
    pub min_step: f64,
    #[builder(default = 2700.0)]
    pub max_step: f64,
    #[builder(default = 50)]
    pub attempts: u8,
}

impl IntegratorSettings {
    /// Propagator options matching these settings.
    pub fn prop_opts(&self) -> PropOpts<RSSCartesianStep> {
        if self.method.is_adaptive() {
            PropOpts::builder()
                .init_step(self.initial_step)
                .min_step(self.min_step)
                .max_step(self.max_step)
                .tolerance(self.tolerance)
                .attempts(self.attempts)
                .error_ctrl(RSSCartesianStep)
                .build()
        } else {
            PropOpts::with_fixed_step(self.initial_step)
        }
    }
}

/// The validated settings of a simulation run.
#[derive(Clone, Debug, PartialEq, TypedBuilder)]
#[builder(doc)]
pub struct SimulatorSettings {
    pub initial_state: State,
    /// Seconds
    pub start_time: f64,
    /// Seconds
    pub end_time: f64,
    /// Gravitational parameter of the central body (km^3/s^2)
    pub gravitational_parameter: f64,
    /// Chaser mass (kg)
    #[builder(default = 1.0)]
    pub chaser_mass: f64,
    /// Target mass (kg)
    #[builder(default = 1.0)]
    pub target_mass: f64,
    #[builder(default, setter(strip_option))]
    pub radiation_pressure: Option<RadiationPressureSettings>,
    /// Acceleration models to use, the default set if `None`
    #[builder(default, setter(strip_option))]
    pub models: Option<Vec<String>>,
    pub integrator: IntegratorSettings,
    #[builder(default)]
    pub output: OutputSettings,
}

impl SimulatorSettings {
    /// Run-level inputs from which the acceleration models are built.
    pub fn model_parameters(&self) -> ModelParameters {
        ModelParameters {
            gravitational_parameter: self.gravitational_parameter,
            radiation_pressure: self.radiation_pressure,
            chaser_mass: Some(self.chaser_mass),
        }
    }

    pub fn initial_step(&self) -> f64 {
        self.integrator.initial_step
    }
}

impl fmt::Display for SimulatorSettings {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = &self.initial_state;
        writeln!(f, "Numerical integration settings")?;
        writeln!(
            f,
            "  initial state            [{}; {}; {}; {}; {}; {}]",
            s[0], s[1], s[2], s[3], s[4], s[5]
        )?;
        writeln!(f, "  start time               {} s", self.start_time)?;
        writeln!(f, "  end time                 {} s", self.end_time)?;
        writeln!(f, "  initial step             {} s", self.integrator.initial_step)?;
        writeln!(f, "  method                   {}", self.integrator.method)?;
        if self.integrator.method.is_adaptive() {
            writeln!(
                f,
                "  tolerance                {:e} (steps in [{}, {}] s, {} attempts)",
                self.integrator.tolerance,
                self.integrator.min_step,
                self.integrator.max_step,
                self.integrator.attempts
            )?;
        }
        writeln!(f, "Chaser mass                {} kg", self.chaser_mass)?;
        writeln!(f, "Target mass                {} kg", self.target_mass)?;
        writeln!(
            f,
            "Gravitational parameter    {} km^3 s^-2",
            self.gravitational_parameter
        )?;
        match &self.radiation_pressure {
            Some(srp) => {
                writeln!(f, "Radiation pressure         ON")?;
                writeln!(f, "  pressure                 {} N m^-2", srp.radiation_pressure)?;
                writeln!(
                    f,
                    "  coefficient              {}",
                    srp.radiation_pressure_coefficient
                )?;
                writeln!(f, "  area                     {} m^2", srp.radiation_pressure_area)?;
                writeln!(
                    f,
                    "  vector to source         [{}; {}; {}]",
                    srp.vector_to_source[0], srp.vector_to_source[1], srp.vector_to_source[2]
                )?;
            }
            None => writeln!(f, "Radiation pressure         OFF")?,
        }
        match &self.models {
            Some(names) => writeln!(f, "Acceleration models        {}", names.join(", "))?,
            None => writeln!(f, "Acceleration models        default")?,
        }
        writeln!(f, "Metadata file              {}", self.output.metadata_file.display())?;
        write!(
            f,
            "State history file         {}",
            self.output.state_history_file.display()
        )
    }
}
