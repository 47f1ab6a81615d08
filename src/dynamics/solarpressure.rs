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

use super::{AccelModel, DynamicsError, ModelId, ModelParameter, RegistryError};
use crate::linalg::Vector3;
use crate::State;
use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// Radiation pressure inputs, as found in the simulator configuration when the model is switched on.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RadiationPressureSettings {
    /// Radiation pressure (N/m^2)
    pub radiation_pressure: f64,
    /// Radiation pressure coefficient (unitless)
    pub radiation_pressure_coefficient: f64,
    /// Area subject to radiation pressure (m^2)
    pub radiation_pressure_area: f64,
    /// Vector from the chaser toward the radiation source, e.g. the Sun. Only its direction is used.
    pub vector_to_source: [f64; 3],
}

/// Radiation pressure from a fixed, distant source.
///
/// The chaser is pushed directly away from the source with a force `P * C_R * A`, and the
/// resulting acceleration is converted from m/s^2 to km/s^2.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadiationPressure {
    /// Radiation pressure (N/m^2)
    pub pressure_n_m2: f64,
    /// Radiation pressure coefficient (unitless)
    pub coefficient: f64,
    /// Area subject to radiation pressure (m^2)
    pub area_m2: f64,
    /// Mass of the chaser (kg)
    pub mass_kg: f64,
    /// Unit vector from the chaser toward the source
    source_dir: Vector3<f64>,
}

impl RadiationPressure {
    /// Builds the model, checking that the source direction and the mass are usable.
    pub fn new(settings: &RadiationPressureSettings, mass_kg: f64) -> Result<Self, RegistryError> {
        let to_source = Vector3::from(settings.vector_to_source);
        let dist = to_source.norm();
        if !dist.is_finite() || dist == 0.0 {
            return Err(RegistryError::InvalidModelSettings {
                model: ModelId::RadiationPressure,
                reason: format!(
                    "vector to source {:?} has no direction",
                    settings.vector_to_source
                ),
            });
        }
        for (what, value) in [
            ("pressure", settings.radiation_pressure),
            ("coefficient", settings.radiation_pressure_coefficient),
            ("area", settings.radiation_pressure_area),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RegistryError::InvalidModelSettings {
                    model: ModelId::RadiationPressure,
                    reason: format!("{what} must be finite and non-negative, got {value}"),
                });
            }
        }
        if !mass_kg.is_finite() || mass_kg <= 0.0 {
            return Err(RegistryError::InvalidModelSettings {
                model: ModelId::RadiationPressure,
                reason: format!("chaser mass must be strictly positive, got {mass_kg} kg"),
            });
        }

        Ok(Self {
            pressure_n_m2: settings.radiation_pressure,
            coefficient: settings.radiation_pressure_coefficient,
            area_m2: settings.radiation_pressure_area,
            mass_kg,
            source_dir: to_source / dist,
        })
    }

    /// Unit vector from the chaser toward the radiation source.
    pub fn source_direction(&self) -> Vector3<f64> {
        self.source_dir
    }
}

impl fmt::Display for RadiationPressure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "radiation pressure (P = {} N/m^2, Cr = {}, A = {} m^2, m = {} kg)",
            self.pressure_n_m2, self.coefficient, self.area_m2, self.mass_kg
        )
    }
}

impl AccelModel for RadiationPressure {
    fn eom(&self, _state: &State, _time: f64) -> Result<Vector3<f64>, DynamicsError> {
        let accel_m_s2 = self.pressure_n_m2 * self.coefficient * self.area_m2 / self.mass_kg;
        Ok(-accel_m_s2 * 1e-3 * self.source_dir)
    }

    fn parameters(&self) -> Vec<ModelParameter> {
        vec![
            ModelParameter::new("radiation_pressure", self.pressure_n_m2, "N m^-2"),
            ModelParameter::new("radiation_pressure_coefficient", self.coefficient, "-"),
            ModelParameter::new("radiation_pressure_area", self.area_m2, "m^2"),
            ModelParameter::new("source_direction_x", self.source_dir[0], "-"),
            ModelParameter::new("source_direction_y", self.source_dir[1], "-"),
            ModelParameter::new("source_direction_z", self.source_dir[2], "-"),
        ]
    }
}

#[test]
fn test_srp_direction() {
    let settings = RadiationPressureSettings {
        radiation_pressure: 4.56e-6,
        radiation_pressure_coefficient: 1.8,
        radiation_pressure_area: 10.0,
        vector_to_source: [1.5e8, 0.0, 0.0],
    };
    let srp = RadiationPressure::new(&settings, 500.0).unwrap();
    let accel = srp.eom(&State::zeros(), 0.0).unwrap();
    // Pushed away from the source
    assert!(accel[0] < 0.0);
    assert_eq!(accel[1], 0.0);
    assert_eq!(accel[2], 0.0);
    let expected = 4.56e-6 * 1.8 * 10.0 / 500.0 * 1e-3;
    assert!((accel.norm() - expected).abs() < 1e-24);

    let no_dir = RadiationPressureSettings {
        vector_to_source: [0.0; 3],
        ..settings
    };
    assert!(RadiationPressure::new(&no_dir, 500.0).is_err());
    assert!(RadiationPressure::new(&settings, 0.0).is_err());
}
