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

use super::{NoStateAtSnafu, NonFiniteStateSnafu, NonMonotonicTimeSnafu, TrajError};
use crate::State;
use snafu::{ensure, OptionExt};
use std::fmt;

/// Store the time-ordered history of the states of a run.
#[derive(Clone, Default, PartialEq)]
pub struct Traj {
    /// Optionally name this trajectory
    pub name: Option<String>,
    /// We use a vector because the states are produced in a chronological manner.
    entries: Vec<(f64, State)>,
}

impl Traj {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            name: None,
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Appends the state at this time, which must be strictly after the last recorded time.
    pub fn push(&mut self, time: f64, state: State) -> Result<(), TrajError> {
        ensure!(
            time.is_finite() && state.iter().all(|x| x.is_finite()),
            NonFiniteStateSnafu { time }
        );
        if let Some((prev, _)) = self.entries.last() {
            ensure!(time > *prev, NonMonotonicTimeSnafu { prev: *prev, time });
        }
        self.entries.push((time, state));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first(&self) -> Option<&(f64, State)> {
        self.entries.first()
    }

    pub fn last(&self) -> Option<&(f64, State)> {
        self.entries.last()
    }

    pub fn start_time(&self) -> Option<f64> {
        self.first().map(|(t, _)| *t)
    }

    pub fn end_time(&self) -> Option<f64> {
        self.last().map(|(t, _)| *t)
    }

    /// Iterates over the (time, state) pairs in increasing time.
    pub fn iter(&self) -> impl Iterator<Item = &(f64, State)> {
        self.entries.iter()
    }

    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(t, _)| *t)
    }

    /// Returns the state recorded at exactly this time. No interpolation is performed.
    pub fn at(&self, time: f64) -> Result<State, TrajError> {
        let idx = self
            .entries
            .binary_search_by(|(t, _)| t.total_cmp(&time))
            .ok()
            .context(NoStateAtSnafu { time })?;
        Ok(self.entries[idx].1)
    }
}

impl fmt::Display for Traj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name.as_deref().unwrap_or("Trajectory");
        match (self.start_time(), self.end_time()) {
            (Some(start), Some(end)) => write!(
                f,
                "{name} from t = {start} s to t = {end} s ({:.3} s) [{} states]",
                end - start,
                self.entries.len()
            ),
            _ => write!(f, "{name} [empty]"),
        }
    }
}

impl fmt::Debug for Traj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}",)
    }
}
