extern crate scarab;

use rstest::*;
use scarab::dynamics::RegistryError;
use scarab::io::{ConfigError, ConfigRepr, IntegratorKind, SimulatorConfig};
use scarab::md::Simulator;
use scarab::ScarabError;

use crate::{init_logger, manifest_dir, EARTH_GM};

const LEO_YAML: &str = "
initial_state: [7000.0, 0.0, 0.0, 0.0, 7.5, 0.0]
start_time: 0.0
end_time: 600.0
initial_step: 10.0
gravitational_parameter: 398600.4418
chaser:
  mass: 100.0
target:
  mass: 1000.0
radiation_pressure:
  status: false
output:
  metadata_file: metadata.csv
  state_history_file: state_history.csv
";

#[fixture]
fn leo_cfg() -> SimulatorConfig {
    init_logger();
    SimulatorConfig::loads(LEO_YAML).unwrap()
}

fn invalid_field(cfg: &SimulatorConfig) -> String {
    match cfg.validate() {
        Err(ConfigError::InvalidConfig { field, .. }) => field,
        other => panic!("expected an invalid configuration, got {other:?}"),
    }
}

#[rstest]
fn load_minimal_config(leo_cfg: SimulatorConfig) {
    assert!(leo_cfg.models.is_none());
    assert!(leo_cfg.integrator.is_none());
    assert!(!leo_cfg.output.timestamp);

    let settings = leo_cfg.validate().unwrap();
    assert_eq!(settings.gravitational_parameter, EARTH_GM);
    assert_eq!(settings.initial_state[4], 7.5);
    assert_eq!(settings.initial_step(), 10.0);
    assert_eq!(settings.integrator.method, IntegratorKind::Dormand45);
    assert_eq!(settings.integrator.tolerance, 1e-12);
    assert!(settings.radiation_pressure.is_none());
    assert_eq!(settings.model_parameters().chaser_mass, Some(100.0));
    // The summary is what the binary logs before a run
    assert!(format!("{settings}").contains("Radiation pressure         OFF"));
}

#[test]
fn load_scenario_files() {
    init_logger();
    let scenarios = manifest_dir().join("data").join("scenarios");
    let cfg = SimulatorConfig::load(scenarios.join("leo_chaser.yaml")).unwrap();
    let settings = cfg.validate().unwrap();
    assert!(settings.radiation_pressure.is_some());
    let sim = Simulator::new(settings).unwrap();
    assert_eq!(sim.registry().len(), 2);

    let cfg = SimulatorConfig::load(scenarios.join("leo_chaser_rk4.yaml")).unwrap();
    let settings = cfg.validate().unwrap();
    assert_eq!(settings.integrator.method, IntegratorKind::Rk4);
    assert!(settings.output.timestamp);
    assert!(settings.integrator.prop_opts().fixed_step);
}

#[test]
fn load_many_configs() {
    let many = format!("- {}\n- {}", indent(LEO_YAML), indent(LEO_YAML));
    let cfgs = SimulatorConfig::loads_many(&many).unwrap();
    assert_eq!(cfgs.len(), 2);
    assert_eq!(cfgs[0], cfgs[1]);
}

fn indent(yaml: &str) -> String {
    yaml.trim()
        .lines()
        .collect::<Vec<_>>()
        .join("\n  ")
}

#[test]
fn missing_file() {
    let err = SimulatorConfig::load("this/file/does/not/exist.yaml").unwrap_err();
    assert!(matches!(err, ConfigError::ReadError { .. }));
}

#[test]
fn missing_key() {
    let yaml = LEO_YAML.replace("end_time: 600.0\n", "");
    let err = SimulatorConfig::loads(&yaml).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
    assert!(format!("{err}").contains("end_time"));
}

#[rstest]
fn invalid_values(leo_cfg: SimulatorConfig) {
    let mut cfg = leo_cfg.clone();
    cfg.initial_step = 0.0;
    assert_eq!(invalid_field(&cfg), "initial_step");

    let mut cfg = leo_cfg.clone();
    cfg.end_time = -1.0;
    assert_eq!(invalid_field(&cfg), "end_time");

    let mut cfg = leo_cfg.clone();
    cfg.gravitational_parameter = -EARTH_GM;
    assert_eq!(invalid_field(&cfg), "gravitational_parameter");

    let mut cfg = leo_cfg.clone();
    cfg.initial_state[2] = f64::NAN;
    assert_eq!(invalid_field(&cfg), "initial_state[2]");

    let mut cfg = leo_cfg.clone();
    cfg.chaser.mass = 0.0;
    assert_eq!(invalid_field(&cfg), "chaser.mass");

    let mut cfg = leo_cfg;
    cfg.target.mass = f64::INFINITY;
    assert_eq!(invalid_field(&cfg), "target.mass");
}

#[test]
fn unknown_model_name() {
    init_logger();
    let yaml = format!("{LEO_YAML}models: [central_gravity, bogus]\n");
    let cfg = SimulatorConfig::loads(&yaml).unwrap();
    // Model names are checked when the registry is built, not during validation
    assert!(cfg.validate().is_ok());
    match Simulator::from_config(&cfg) {
        Err(ScarabError::Registry {
            source: RegistryError::UnknownModelName { name },
        }) => assert_eq!(name, "bogus"),
        Err(e) => panic!("expected an unknown model name, got {e}"),
        Ok(_) => panic!("expected an unknown model name"),
    }
}

#[rstest]
fn negative_radiation_pressure_inputs(leo_cfg: SimulatorConfig) {
    let on = "  status: true\n  radiation_pressure: 4.56e-6\n  radiation_pressure_coefficient: 1.8\n  radiation_pressure_area: 2.0\n  vector_to_source: [1.0, 0.0, 0.0]\n";
    let yaml = LEO_YAML.replace("  status: false\n", on);
    assert!(SimulatorConfig::loads(&yaml).unwrap().validate().is_ok());

    for (key, value) in [
        ("radiation_pressure", "4.56e-6"),
        ("radiation_pressure_coefficient", "1.8"),
        ("radiation_pressure_area", "2.0"),
    ] {
        let flipped = yaml.replace(
            &format!("  {key}: {value}\n"),
            &format!("  {key}: -{value}\n"),
        );
        let cfg = SimulatorConfig::loads(&flipped).unwrap();
        assert_eq!(invalid_field(&cfg), format!("radiation_pressure.{key}"));
    }

    // Zero is allowed and disables the force
    let zero = yaml.replace("  radiation_pressure_area: 2.0\n", "  radiation_pressure_area: 0.0\n");
    assert!(SimulatorConfig::loads(&zero).unwrap().validate().is_ok());
    assert!(leo_cfg.validate().is_ok());
}

#[rstest]
fn incomplete_radiation_pressure(leo_cfg: SimulatorConfig) {
    let yaml = LEO_YAML.replace(
        "  status: false\n",
        "  status: true\n  radiation_pressure: 4.56e-6\n  radiation_pressure_coefficient: 1.8\n  vector_to_source: [1.0, 0.0, 0.0]\n",
    );
    let cfg = SimulatorConfig::loads(&yaml).unwrap();
    assert_eq!(invalid_field(&cfg), "radiation_pressure.radiation_pressure_area");

    // Switched off, the other fields are not needed
    assert!(leo_cfg.validate().unwrap().radiation_pressure.is_none());
}

#[rstest]
fn integrator_section(leo_cfg: SimulatorConfig) {
    let yaml = format!("{LEO_YAML}integrator:\n  method: cash_karp45\n  max_step: 30.0\n");
    let settings = SimulatorConfig::loads(&yaml).unwrap().validate().unwrap();
    assert_eq!(settings.integrator.method, IntegratorKind::CashKarp45);
    assert_eq!(settings.integrator.max_step, 30.0);
    assert_eq!(settings.integrator.min_step, 0.001);
    let opts = settings.integrator.prop_opts();
    assert!(!opts.fixed_step);
    assert_eq!(opts.init_step, 10.0);

    let yaml = format!("{LEO_YAML}integrator:\n  min_step: 60.0\n  max_step: 30.0\n");
    let cfg = SimulatorConfig::loads(&yaml).unwrap();
    assert_eq!(invalid_field(&cfg), "integrator.max_step");

    let yaml = format!("{LEO_YAML}integrator:\n  method: leapfrog\n");
    assert!(SimulatorConfig::loads(&yaml).is_err());

    // The section is optional
    assert!(leo_cfg.integrator.is_none());
}
