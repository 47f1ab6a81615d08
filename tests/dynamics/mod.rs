use scarab::dynamics::{ModelParameters, RadiationPressureSettings};

use crate::EARTH_GM;

mod derivative;
mod models;
mod registry;

pub(crate) fn srp_settings() -> RadiationPressureSettings {
    RadiationPressureSettings {
        radiation_pressure: 4.56e-6,
        radiation_pressure_coefficient: 1.8,
        radiation_pressure_area: 2.0,
        vector_to_source: [1.496e8, 0.0, 0.0],
    }
}

pub(crate) fn srp_params() -> ModelParameters {
    ModelParameters::builder()
        .gravitational_parameter(EARTH_GM)
        .radiation_pressure(srp_settings())
        .chaser_mass(100.0)
        .build()
}
