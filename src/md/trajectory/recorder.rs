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

use super::{Traj, TrajError};
use crate::propagators::StepObserver;
use crate::State;

/// Appends every accepted step of a propagation to a trajectory.
///
/// The recorder borrows the trajectory mutably for the duration of the run, so only one recorder
/// may ever write to a given history.
pub struct EventRecorder<'a> {
    history: &'a mut Traj,
}

impl<'a> EventRecorder<'a> {
    pub fn new(history: &'a mut Traj) -> Self {
        Self { history }
    }

    /// Record this state at this time, which must be after all previously recorded times.
    pub fn record(&mut self, state: &State, time: f64) -> Result<(), TrajError> {
        self.history.push(time, *state)
    }

    pub fn history(&self) -> &Traj {
        &*self.history
    }
}

impl StepObserver for EventRecorder<'_> {
    fn observe(&mut self, state: &State, time: f64) -> Result<(), TrajError> {
        self.record(state, time)
    }
}
