extern crate scarab;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use scarab::dynamics::{
    state_derivative, AccelModel, CentralGravity, Dynamics, DynamicsError, ModelId,
    ModelParameter, ModelRegistry, OrbitalDynamics, RadiationPressure,
};
use scarab::linalg::Vector3;
use scarab::{CartesianState, State};

use super::{srp_params, srp_settings};
use crate::{leo_state, EARTH_GM};

#[test]
fn derivative_passes_velocity_through() {
    let registry = ModelRegistry::from_names(&["central_gravity"], &srp_params()).unwrap();
    let state = State::new(-4000.0, 5000.0, 1200.0, 0.1, -0.2, 7.3);
    let d_x = state_derivative(&state, 0.0, &registry).unwrap();
    assert_eq!(d_x.fixed_rows::<3>(0), state.velocity());
}

#[test]
fn derivative_is_the_sum_of_models() {
    let registry =
        ModelRegistry::from_names(&["central_gravity", "radiation_pressure"], &srp_params())
            .unwrap();
    let state = leo_state();
    let d_x = state_derivative(&state, 0.0, &registry).unwrap();

    let gravity = CentralGravity::new(EARTH_GM).eom(&state, 0.0).unwrap();
    let srp = RadiationPressure::new(&srp_settings(), 100.0)
        .unwrap()
        .eom(&state, 0.0)
        .unwrap();
    let expected = gravity + srp;
    assert_eq!(d_x.fixed_rows::<3>(3), expected);
}

#[test]
fn derivative_without_models_is_inertial() {
    let registry = ModelRegistry::new();
    let state = leo_state();
    let d_x = state_derivative(&state, 0.0, &registry).unwrap();
    assert_eq!(d_x, State::new(0.0, 7.5, 0.0, 0.0, 0.0, 0.0));
}

#[test]
fn parallel_models_match_sequential() {
    let registry =
        ModelRegistry::from_names(&["central_gravity", "radiation_pressure"], &srp_params())
            .unwrap();
    let sequential = OrbitalDynamics::new(&registry);
    let parallel = OrbitalDynamics::new(&registry).with_parallel_models(true);
    for state in [
        leo_state(),
        State::new(-4000.0, 5000.0, 1200.0, 0.1, 0.2, 0.3),
    ] {
        assert_eq!(
            sequential.eom(10.0, &state).unwrap(),
            parallel.eom(10.0, &state).unwrap()
        );
    }
}

#[test]
fn cancelled_derivative() {
    let registry = ModelRegistry::from_names(&["central_gravity"], &srp_params()).unwrap();
    let flag = Arc::new(AtomicBool::new(false));
    let dynamics = OrbitalDynamics::new(&registry).with_cancellation(flag.clone());
    assert!(dynamics.eom(0.0, &leo_state()).is_ok());
    flag.store(true, std::sync::atomic::Ordering::Relaxed);
    assert_eq!(
        dynamics.eom(5.0, &leo_state()),
        Err(DynamicsError::Cancelled { time: 5.0 })
    );
}

/// A misbehaving model which returns a non finite acceleration.
struct Blowup;

impl std::fmt::Display for Blowup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "blowup")
    }
}

impl AccelModel for Blowup {
    fn eom(&self, _state: &State, _time: f64) -> Result<Vector3<f64>, DynamicsError> {
        Ok(Vector3::new(f64::INFINITY, 0.0, 0.0))
    }

    fn parameters(&self) -> Vec<ModelParameter> {
        vec![ModelParameter::new("strength", f64::INFINITY, "-")]
    }
}

#[test]
fn non_finite_derivative() {
    let mut registry = ModelRegistry::defaults(&srp_params());
    registry.insert(ModelId::RadiationPressure, Box::new(Blowup));
    let err = state_derivative(&leo_state(), 3.0, &registry).unwrap_err();
    assert!(matches!(
        err,
        DynamicsError::NonFiniteDerivative { time, .. } if time == 3.0
    ));
}
