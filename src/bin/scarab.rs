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

extern crate pretty_env_logger;
#[macro_use]
extern crate log;

use clap::Parser;
use scarab::dynamics::ModelId;
use scarab::io::{ConfigRepr, SimulatorConfig};
use scarab::md::Simulator;
use scarab::ScarabError;
use std::env::{set_var, var};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

const LOG_VAR: &str = "SCARAB_LOG";

/// Propagates a chaser spacecraft under the acceleration models of a YAML configuration.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the simulator configuration (YAML format)
    #[arg(value_name = "CONFIG", required_unless_present = "list_models")]
    config: Option<PathBuf>,

    /// Print the names of the available acceleration models and exit
    #[arg(long)]
    list_models: bool,
}

fn run(config: &Path) -> Result<(), ScarabError> {
    let tick = Instant::now();
    let cfg = SimulatorConfig::load(config)?;
    info!("Loaded configuration `{}`", config.display());

    let simulator = Simulator::from_config(&cfg)?;
    info!("Simulator settings\n{}", simulator.settings());

    let output = simulator.run()?;
    info!("Final state: {}", output.final_state.transpose());
    info!("Last step: {}", output.details);

    simulator.settings().output.write(
        simulator.settings(),
        simulator.registry(),
        &output.trajectory,
    )?;

    let tock: scarab::time::Duration = tick.elapsed().into();
    info!("Simulation completed in {tock}");
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    if var(LOG_VAR).is_err() {
        set_var(LOG_VAR, "INFO");
    }

    if pretty_env_logger::try_init_custom_env(LOG_VAR).is_err() {
        println!("could not init logger");
    }

    if args.list_models {
        for id in ModelId::ALL {
            println!("{}", id.name());
        }
        return ExitCode::SUCCESS;
    }

    let Some(config) = args.config else {
        error!("no configuration file provided");
        return ExitCode::FAILURE;
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
