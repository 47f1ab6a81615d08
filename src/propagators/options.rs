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

use std::fmt;

use super::{ErrorCtrl, RSSCartesianStep};
use typed_builder::TypedBuilder;

/// Step size and tolerance settings of a propagator. Every step is in seconds.
///
/// The minimum and maximum steps, the tolerance and the number of attempts only matter for the
/// adaptive methods. With `fixed_step` set, an embedded method such as [`super::Dormand45`]
/// takes steps of `init_step` and ignores its error estimate.
#[derive(Clone, Copy, Debug, TypedBuilder)]
#[builder(doc)]
pub struct PropOpts<E: ErrorCtrl> {
    #[builder(default = 60.0)]
    pub init_step: f64,
    #[builder(default = 0.001)]
    pub min_step: f64,
    #[builder(default = 2700.0)]
    pub max_step: f64,
    #[builder(default = 1e-12)]
    pub tolerance: f64,
    /// Maximum number of tries of a single step before giving up
    #[builder(default = 50)]
    pub attempts: u8,
    #[builder(default = false)]
    pub fixed_step: bool,
    pub error_ctrl: E,
}

impl<E: ErrorCtrl> PropOpts<E> {
    /// Adaptive step options starting at the maximum step, with 50 attempts per step.
    pub fn with_adaptive_step(min_step: f64, max_step: f64, tolerance: f64, error_ctrl: E) -> Self {
        PropOpts {
            init_step: max_step,
            min_step,
            max_step,
            tolerance,
            attempts: 50,
            fixed_step: false,
            error_ctrl,
        }
    }

    /// Caps the step size, lowering the initial step if needed
    pub fn set_max_step(&mut self, max_step: f64) {
        self.init_step = self.init_step.min(max_step);
        self.max_step = max_step;
    }

    /// Floors the step size, raising the initial step if needed
    pub fn set_min_step(&mut self, min_step: f64) {
        self.init_step = self.init_step.max(min_step);
        self.min_step = min_step;
    }
}

impl<E: ErrorCtrl> fmt::Display for PropOpts<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fixed_step {
            write!(f, "fixed step of {} s", self.init_step)
        } else {
            write!(
                f,
                "adaptive step from {} s in [{}, {}] s, tolerance {:e}, {} attempts",
                self.init_step, self.min_step, self.max_step, self.tolerance, self.attempts,
            )
        }
    }
}

impl PropOpts<RSSCartesianStep> {
    /// Options of a fixed step propagation.
    pub fn with_fixed_step(step: f64) -> Self {
        PropOpts {
            init_step: step,
            min_step: step,
            max_step: step,
            tolerance: 0.0,
            fixed_step: true,
            attempts: 0,
            error_ctrl: RSSCartesianStep,
        }
    }
}

impl Default for PropOpts<RSSCartesianStep> {
    /// 60 s initial step within [1 ms, 2700 s], tolerance of 1e-12, 50 attempts.
    fn default() -> PropOpts<RSSCartesianStep> {
        PropOpts::builder().error_ctrl(RSSCartesianStep).build()
    }
}

#[test]
fn test_options() {
    use super::error_ctrl::RSSCartesianState;

    let fixed = PropOpts::with_fixed_step(0.5);
    assert!(fixed.fixed_step);
    assert_eq!((fixed.min_step, fixed.max_step), (0.5, 0.5));
    assert_eq!(format!("{fixed}"), "fixed step of 0.5 s");

    let adaptive = PropOpts::with_adaptive_step(0.01, 30.0, 1e-10, RSSCartesianState);
    assert!(!adaptive.fixed_step);
    assert_eq!(adaptive.init_step, 30.0);
    assert_eq!(adaptive.attempts, 50);
    assert_eq!(adaptive.tolerance, 1e-10);

    let dflt: PropOpts<RSSCartesianStep> = PropOpts::default();
    assert_eq!(dflt.init_step, 60.0);
    assert_eq!(dflt.min_step, 0.001);
    assert_eq!(dflt.max_step, 2700.0);
    assert_eq!(dflt.tolerance, 1e-12);
    assert_eq!(dflt.attempts, 50);

    let mut opts = PropOpts::builder()
        .init_step(45.0)
        .error_ctrl(RSSCartesianStep)
        .build();
    opts.set_max_step(15.0);
    assert_eq!(opts.init_step, 15.0);
    opts.set_min_step(20.0);
    assert_eq!(opts.init_step, 20.0);
}
