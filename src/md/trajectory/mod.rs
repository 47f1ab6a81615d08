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

mod recorder;
mod traj;

pub use recorder::EventRecorder;
pub use traj::Traj;

#[derive(Clone, PartialEq, Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TrajError {
    #[snafu(display("cannot record t = {time} s after t = {prev} s: times must strictly increase"))]
    NonMonotonicTime { prev: f64, time: f64 },
    #[snafu(display("refusing to record a non-finite state at t = {time} s"))]
    NonFiniteState { time: f64 },
    #[snafu(display("no state recorded at t = {time} s"))]
    NoStateAt { time: f64 },
}
