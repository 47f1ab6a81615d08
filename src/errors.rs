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

use snafu::prelude::*;

use crate::dynamics::RegistryError;
use crate::io::output::OutputError;
use crate::io::ConfigError;
use crate::md::trajectory::TrajError;
use crate::propagators::PropagationError;

/// Top level error of a simulation run.
///
/// Configuration and registry errors happen before any integration starts, so a run which fails with
/// either of those never produced a trajectory.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ScarabError {
    #[snafu(context(false), display("invalid configuration: {source}"))]
    Configuration { source: ConfigError },
    #[snafu(context(false), display("could not build the acceleration models: {source}"))]
    Registry { source: RegistryError },
    #[snafu(context(false), display("propagation failed: {source}"))]
    Propagation { source: PropagationError },
    #[snafu(context(false), display("could not record the trajectory: {source}"))]
    Recording { source: TrajError },
    #[snafu(context(false), display("could not write the output: {source}"))]
    Output { source: OutputError },
}
