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

use crate::dynamics::ModelRegistry;
use crate::io::settings::SimulatorSettings;
use crate::md::trajectory::Traj;
use crate::time::Epoch;
use hifitime::prelude::{Format, Formatter};
use serde_derive::{Deserialize, Serialize};
use snafu::prelude::*;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use typed_builder::TypedBuilder;

/// Width of each cell of the metadata file.
pub const METADATA_CELL_WIDTH: usize = 25;

/// Header of the state history file.
pub const STATE_HISTORY_HEADER: [&str; 7] = ["t", "x", "y", "z", "vx", "vy", "vz"];

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum OutputError {
    #[snafu(display("could not write {}: {source}", path.display()))]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("could not write the state history to {}: {source}", path.display()))]
    Csv { path: PathBuf, source: csv::Error },
    #[snafu(display("cannot write an empty state history to {}", path.display()))]
    EmptyHistory { path: PathBuf },
}

/// Where the results of a run are written.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[builder(doc)]
pub struct OutputSettings {
    /// Path of the metadata file (`name,value,unit` lines)
    #[builder(setter(into))]
    pub metadata_file: PathBuf,
    /// Path of the state history CSV file
    #[builder(setter(into))]
    pub state_history_file: PathBuf,
    /// Set to true to append the timestamp to the file names
    #[serde(default)]
    #[builder(default)]
    pub timestamp: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            metadata_file: PathBuf::from("metadata.csv"),
            state_history_file: PathBuf::from("state_history.csv"),
            timestamp: false,
        }
    }
}

impl OutputSettings {
    /// Modifies the provided path to include the timestamp if required.
    pub fn actual_path<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        let mut path_buf = path.as_ref().to_path_buf();
        if !self.timestamp {
            return path_buf;
        }
        let now = match Epoch::now() {
            Ok(now) => now,
            Err(e) => {
                warn!("could not timestamp {}: {e}", path_buf.display());
                return path_buf;
            }
        };
        let stamp = match Format::from_str("%Y-%m-%dT%H-%M-%S") {
            Ok(fmt) => Formatter::new(now, fmt),
            Err(e) => {
                warn!("could not timestamp {}: {e}", path_buf.display());
                return path_buf;
            }
        };
        let stem = path_buf
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let new_file_name = match path_buf.extension() {
            Some(ext) => format!("{stem}-{stamp}.{}", ext.to_string_lossy()),
            None => format!("{stem}-{stamp}"),
        };
        path_buf.set_file_name(new_file_name);
        path_buf
    }

    /// Writes both the metadata and the state history, returning their paths.
    pub fn write(
        &self,
        settings: &SimulatorSettings,
        registry: &ModelRegistry,
        traj: &Traj,
    ) -> Result<(PathBuf, PathBuf), OutputError> {
        let metadata_path = self.actual_path(&self.metadata_file);
        write_metadata(&metadata_path, settings, registry)?;
        info!("Simulation metadata written to {}", metadata_path.display());

        let history_path = self.actual_path(&self.state_history_file);
        write_state_history(&history_path, traj)?;
        info!(
            "State history ({} states) written to {}",
            traj.len(),
            history_path.display()
        );
        Ok((metadata_path, history_path))
    }
}

fn create<P: AsRef<Path>>(path: P) -> Result<File, OutputError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context(IoSnafu { path })?;
        }
    }
    File::create(path).context(IoSnafu { path })
}

/// Formats one metadata line: every cell is left aligned and padded to [`METADATA_CELL_WIDTH`].
pub fn metadata_line(name: &str, value: f64, unit: &str) -> String {
    format!(
        "{name:<w$},{value:<w$},{unit:<w$}",
        w = METADATA_CELL_WIDTH
    )
}

/// Writes the run-level parameters followed by the parameters of every model of the registry.
pub fn write_metadata<P: AsRef<Path>>(
    path: P,
    settings: &SimulatorSettings,
    registry: &ModelRegistry,
) -> Result<(), OutputError> {
    let path = path.as_ref();
    let mut lines = vec![metadata_line(
        "gravitational_parameter",
        settings.gravitational_parameter,
        "km^3 s^-2",
    )];
    for (i, name) in ["x", "y", "z", "vx", "vy", "vz"].iter().enumerate() {
        let unit = if i < 3 { "km" } else { "km s^-1" };
        lines.push(metadata_line(
            &format!("initial_{name}"),
            settings.initial_state[i],
            unit,
        ));
    }
    lines.push(metadata_line("start_time", settings.start_time, "s"));
    lines.push(metadata_line("end_time", settings.end_time, "s"));
    lines.push(metadata_line("initial_step", settings.initial_step(), "s"));
    lines.push(metadata_line("chaser_mass", settings.chaser_mass, "kg"));
    lines.push(metadata_line("target_mass", settings.target_mass, "kg"));
    for (id, param) in registry.parameters() {
        lines.push(metadata_line(
            &format!("{id}.{}", param.name),
            param.value,
            param.unit,
        ));
    }

    let mut writer = BufWriter::new(create(path)?);
    for line in lines {
        writeln!(writer, "{line}").context(IoSnafu { path })?;
    }
    writer.flush().context(IoSnafu { path })
}

/// Writes the trajectory as a CSV file with a `t,x,y,z,vx,vy,vz` header.
pub fn write_state_history<P: AsRef<Path>>(path: P, traj: &Traj) -> Result<(), OutputError> {
    let path = path.as_ref();
    ensure!(!traj.is_empty(), EmptyHistorySnafu { path });

    let mut wtr = csv::Writer::from_writer(create(path)?);
    wtr.write_record(STATE_HISTORY_HEADER)
        .context(CsvSnafu { path })?;
    for (t, state) in traj.iter() {
        wtr.serialize((t, state[0], state[1], state[2], state[3], state[4], state[5]))
            .context(CsvSnafu { path })?;
    }
    wtr.flush().context(IoSnafu { path })
}
