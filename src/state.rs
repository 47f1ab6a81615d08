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

use crate::linalg::{Vector3, Vector6};

/// Cartesian state of the chaser: position (km) in rows 0 to 2 and velocity (km/s) in rows 3 to 5.
///
/// No other layout is valid anywhere in this crate.
pub type State = Vector6<f64>;

/// Accessors on the position and velocity halves of a [`State`].
pub trait CartesianState {
    /// Builds a state from a position (km) and a velocity (km/s).
    fn from_pos_vel(radius: &Vector3<f64>, velocity: &Vector3<f64>) -> Self;

    /// Position vector in km.
    fn radius(&self) -> Vector3<f64>;

    /// Velocity vector in km/s.
    fn velocity(&self) -> Vector3<f64>;

    /// Norm of the position vector in km.
    fn rmag(&self) -> f64 {
        self.radius().norm()
    }

    /// Norm of the velocity vector in km/s.
    fn vmag(&self) -> f64 {
        self.velocity().norm()
    }

    /// Specific orbital energy (km^2/s^2) about a body of gravitational parameter `mu` (km^3/s^2).
    fn energy(&self, mu: f64) -> f64 {
        self.vmag().powi(2) / 2.0 - mu / self.rmag()
    }

    /// Specific angular momentum vector (km^2/s).
    fn hvec(&self) -> Vector3<f64> {
        self.radius().cross(&self.velocity())
    }
}

impl CartesianState for State {
    fn from_pos_vel(radius: &Vector3<f64>, velocity: &Vector3<f64>) -> Self {
        Vector6::new(
            radius[0],
            radius[1],
            radius[2],
            velocity[0],
            velocity[1],
            velocity[2],
        )
    }

    fn radius(&self) -> Vector3<f64> {
        self.fixed_rows::<3>(0).into_owned()
    }

    fn velocity(&self) -> Vector3<f64> {
        self.fixed_rows::<3>(3).into_owned()
    }
}

#[test]
fn test_state_layout() {
    let state = State::new(7000.0, 1.0, -2.0, 0.1, 7.5, -0.3);
    assert_eq!(state.radius(), Vector3::new(7000.0, 1.0, -2.0));
    assert_eq!(state.velocity(), Vector3::new(0.1, 7.5, -0.3));
    assert_eq!(State::from_pos_vel(&state.radius(), &state.velocity()), state);
}
