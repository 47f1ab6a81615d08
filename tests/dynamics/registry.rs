extern crate scarab;

use scarab::dynamics::{
    CentralGravity, ModelId, ModelParameters, ModelRegistry, RegistryError,
};

use super::srp_params;
use crate::EARTH_GM;

fn gravity_only() -> ModelParameters {
    ModelParameters::builder()
        .gravitational_parameter(EARTH_GM)
        .build()
}

#[test]
fn default_registry_is_central_gravity() {
    let registry = ModelRegistry::defaults(&gravity_only());
    assert_eq!(registry.len(), 1);
    assert_eq!(
        registry.ids().collect::<Vec<_>>(),
        vec![ModelId::CentralGravity]
    );
    let params = registry.parameters();
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].0, ModelId::CentralGravity);
    assert_eq!(params[0].1.value, EARTH_GM);
}

#[test]
fn registry_from_names() {
    let registry =
        ModelRegistry::from_names(&["radiation_pressure", "central_gravity"], &srp_params())
            .unwrap();
    // Iteration order is the identifier order, not the order of the names
    assert_eq!(
        registry.ids().collect::<Vec<_>>(),
        vec![ModelId::CentralGravity, ModelId::RadiationPressure]
    );
    assert!(registry.contains(ModelId::RadiationPressure));
    assert_eq!(registry.parameters().len(), 7);

    let empty = ModelRegistry::from_names::<&str>(&[], &gravity_only()).unwrap();
    assert!(empty.is_empty());
}

#[test]
fn registry_unknown_name() {
    let err = ModelRegistry::from_names(&["central_gravity", "j2"], &gravity_only()).unwrap_err();
    assert_eq!(
        err,
        RegistryError::UnknownModelName {
            name: "j2".to_string()
        }
    );
    assert!(format!("{err}").contains("central_gravity"));
    assert!("Central_Gravity".parse::<ModelId>().is_err());
}

#[test]
fn registry_duplicate_name() {
    let err = ModelRegistry::from_names(&["central_gravity", "central_gravity"], &gravity_only())
        .unwrap_err();
    assert_eq!(
        err,
        RegistryError::DuplicateModelName {
            name: "central_gravity".to_string()
        }
    );
}

#[test]
fn registry_missing_settings() {
    let err = ModelRegistry::from_names(&["radiation_pressure"], &gravity_only()).unwrap_err();
    assert!(matches!(
        err,
        RegistryError::MissingModelSettings {
            model: ModelId::RadiationPressure,
            ..
        }
    ));
}

#[test]
fn registry_names_round_trip() {
    for id in ModelId::ALL {
        assert_eq!(id.name().parse::<ModelId>().unwrap(), id);
        assert_eq!(format!("{id}"), id.name());
    }
}

#[test]
fn registry_insert_replaces() {
    let mut registry = ModelRegistry::new();
    assert!(registry
        .insert(ModelId::CentralGravity, Box::new(CentralGravity::new(1.0)))
        .is_none());
    assert!(registry
        .insert(ModelId::CentralGravity, Box::new(CentralGravity::new(EARTH_GM)))
        .is_some());
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.parameters()[0].1.value, EARTH_GM);
}
