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

/*! # scarab

Trajectory propagation of a chaser spacecraft under a composable set of acceleration models.

A run builds a frozen [`dynamics::ModelRegistry`], wraps it in the [`dynamics::OrbitalDynamics`]
equations of motion, drives them with one of the Runge Kutta [`propagators`], and records every
accepted step into a [`md::trajectory::Traj`].
*/

/// Provides all the propagators / integrators available in `scarab`.
pub mod propagators;

/// Acceleration models, the registry which holds them for a run, and the state derivative which sums them.
pub mod dynamics;

/// Trajectory storage, step recording, and the simulation driver.
pub mod md;

/// Configuration loading and validation, and the metadata and state history writers.
pub mod io;

mod state;
pub use self::state::{CartesianState, State};

mod errors;
/// Scarab will (almost) never panic and functions which may fail will return an error.
pub use self::errors::ScarabError;

#[macro_use]
extern crate log;
extern crate nalgebra as na;

/// Re-export of hifitime
pub mod time {
    pub use hifitime::*;
}

/// Re-export nalgebra
pub mod linalg {
    pub use na::base::*;
}
