extern crate scarab;

use scarab::dynamics::ModelRegistry;
use scarab::io::output::{
    metadata_line, write_metadata, write_state_history, OutputError, METADATA_CELL_WIDTH,
};
use scarab::io::{IntegratorKind, OutputSettings};
use scarab::md::trajectory::Traj;
use scarab::md::Simulator;

use crate::{init_logger, leo_settings, leo_state, scratch_dir};

#[test]
fn metadata_line_layout() {
    let line = metadata_line("gravitational_parameter", 398600.4418, "km^3 s^-2");
    assert_eq!(line.len(), 3 * METADATA_CELL_WIDTH + 2);
    let cells: Vec<&str> = line.split(',').collect();
    assert_eq!(cells.len(), 3);
    assert!(cells.iter().all(|c| c.len() == METADATA_CELL_WIDTH));
    assert_eq!(cells[0].trim_end(), "gravitational_parameter");
    assert_eq!(cells[1].trim_end().parse::<f64>().unwrap(), 398600.4418);
    assert_eq!(cells[2].trim_end(), "km^3 s^-2");
}

#[test]
fn write_run_outputs() {
    init_logger();
    let dir = scratch_dir("outputs");
    let mut settings = leo_settings(IntegratorKind::Rk4, 60.0);
    settings.output = OutputSettings::builder()
        .metadata_file(dir.join("nested").join("metadata.csv"))
        .state_history_file(dir.join("state_history.csv"))
        .build();

    let sim = Simulator::new(settings.clone()).unwrap();
    let output = sim.run().unwrap();
    let (metadata_path, history_path) = settings
        .output
        .write(&settings, sim.registry(), &output.trajectory)
        .unwrap();
    assert_eq!(metadata_path, settings.output.metadata_file);

    let metadata = std::fs::read_to_string(&metadata_path).unwrap();
    let names: Vec<&str> = metadata
        .lines()
        .map(|l| l.split(',').next().unwrap().trim_end())
        .collect();
    assert_eq!(
        names,
        vec![
            "gravitational_parameter",
            "initial_x",
            "initial_y",
            "initial_z",
            "initial_vx",
            "initial_vy",
            "initial_vz",
            "start_time",
            "end_time",
            "initial_step",
            "chaser_mass",
            "target_mass",
            "central_gravity.gravitational_parameter",
        ]
    );

    let mut rdr = csv::Reader::from_path(&history_path).unwrap();
    assert_eq!(
        rdr.headers().unwrap().iter().collect::<Vec<_>>(),
        vec!["t", "x", "y", "z", "vx", "vy", "vz"]
    );
    let rows: Vec<Vec<f64>> = rdr
        .records()
        .map(|r| r.unwrap().iter().map(|x| x.parse().unwrap()).collect())
        .collect();
    assert_eq!(rows.len(), output.trajectory.len());
    assert_eq!(rows.len(), 7);
    // Shortest round trip formatting preserves every bit
    for (row, (t, state)) in rows.iter().zip(output.trajectory.iter()) {
        assert_eq!(row[0], *t);
        assert_eq!(&row[1..], state.as_slice());
    }
    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn timestamped_paths() {
    let output = OutputSettings::builder()
        .metadata_file("out/metadata.csv")
        .state_history_file("out/history")
        .timestamp(true)
        .build();
    let stamped = output.actual_path(&output.metadata_file);
    let name = stamped.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("metadata-"), "{name}");
    assert!(name.ends_with(".csv"), "{name}");
    assert_eq!(stamped.parent(), output.metadata_file.parent());
    assert_ne!(stamped, output.metadata_file);

    let stamped = output.actual_path(&output.state_history_file);
    assert!(stamped
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("history-"));

    let plain = OutputSettings::default();
    assert_eq!(plain.actual_path(&plain.metadata_file), plain.metadata_file);
}

#[test]
fn empty_history_is_not_written() {
    let dir = scratch_dir("empty");
    let path = dir.join("empty.csv");
    let err = write_state_history(&path, &Traj::new()).unwrap_err();
    assert!(matches!(err, OutputError::EmptyHistory { .. }));
    assert!(!path.exists());

    let mut traj = Traj::new();
    traj.push(0.0, leo_state()).unwrap();
    write_state_history(&path, &traj).unwrap();
    let settings = leo_settings(IntegratorKind::Dormand45, 10.0);
    write_metadata(dir.join("metadata.csv"), &settings, &ModelRegistry::new()).unwrap();
    let metadata = std::fs::read_to_string(dir.join("metadata.csv")).unwrap();
    assert_eq!(metadata.lines().count(), 12);
    std::fs::remove_dir_all(dir).unwrap();
}
