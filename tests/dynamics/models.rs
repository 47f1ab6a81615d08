extern crate scarab;

use approx::assert_relative_eq;
use scarab::dynamics::{AccelModel, CentralGravity, DynamicsError, RadiationPressure};
use scarab::{CartesianState, State};

use super::srp_settings;
use crate::{leo_state, EARTH_GM};

#[test]
fn central_gravity_points_to_the_origin() {
    let model = CentralGravity::new(EARTH_GM);
    for state in [
        leo_state(),
        State::new(-4000.0, 5000.0, 1200.0, 0.1, 0.2, 0.3),
        State::new(0.0, 0.0, -42164.0, 3.07, 0.0, 0.0),
    ] {
        let acc = model.eom(&state, 0.0).unwrap();
        let r = state.radius();
        // Anti-parallel to the position
        assert_relative_eq!(acc.normalize(), -r.normalize(), epsilon = 1e-14);
        // Inverse square magnitude
        assert_relative_eq!(acc.norm(), EARTH_GM / r.norm_squared(), max_relative = 1e-14);
    }
}

#[test]
fn central_gravity_is_time_invariant() {
    let model = CentralGravity::new(EARTH_GM);
    let state = leo_state();
    assert_eq!(
        model.eom(&state, 0.0).unwrap(),
        model.eom(&state, 86_400.0).unwrap()
    );
}

#[test]
fn central_gravity_singular_at_origin() {
    let model = CentralGravity::new(EARTH_GM);
    let err = model.eom(&State::zeros(), 12.0).unwrap_err();
    assert!(matches!(
        err,
        DynamicsError::SingularPosition { time, .. } if time == 12.0
    ));
}

#[test]
fn radiation_pressure_pushes_away_from_source() {
    let srp = RadiationPressure::new(&srp_settings(), 100.0).unwrap();
    let acc = srp.eom(&leo_state(), 0.0).unwrap();
    // P * Cr * A / m, converted to km/s^2
    let expected = 4.56e-6 * 1.8 * 2.0 / 100.0 * 1e-3;
    assert_relative_eq!(acc.norm(), expected, max_relative = 1e-14);
    assert!(acc[0] < 0.0);
    assert_eq!(acc[1], 0.0);
    assert_eq!(acc[2], 0.0);
    assert_eq!(srp.parameters().len(), 6);
}

#[test]
fn radiation_pressure_rejects_bad_settings() {
    let mut settings = srp_settings();
    assert!(RadiationPressure::new(&settings, 0.0).is_err());
    assert!(RadiationPressure::new(&settings, -5.0).is_err());
    settings.vector_to_source = [0.0; 3];
    assert!(RadiationPressure::new(&settings, 100.0).is_err());

    // A negative input would flip the force toward the source
    let mut settings = srp_settings();
    settings.radiation_pressure_area = -1.0;
    assert!(RadiationPressure::new(&settings, 100.0).is_err());
    let mut settings = srp_settings();
    settings.radiation_pressure = -settings.radiation_pressure;
    assert!(RadiationPressure::new(&settings, 100.0).is_err());
    let mut settings = srp_settings();
    settings.radiation_pressure_coefficient = f64::NAN;
    assert!(RadiationPressure::new(&settings, 100.0).is_err());
}
