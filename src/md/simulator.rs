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

use super::trajectory::{EventRecorder, Traj};
use crate::dynamics::{ModelRegistry, OrbitalDynamics};
use crate::errors::ScarabError;
use crate::io::{IntegratorKind, SimulatorConfig, SimulatorSettings};
use crate::propagators::{
    CashKarp45, Dormand45, IntegrationDetails, PropOpts, Propagator, RK4Fixed, RSSCartesianStep,
    RK,
};
use crate::State;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// The result of a simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationOutput {
    /// The initial condition followed by every accepted step
    pub trajectory: Traj,
    pub final_state: State,
    /// Details of the last integration step
    pub details: IntegrationDetails,
}

/// A simulation run: the validated settings and the frozen set of acceleration models.
///
/// The registry is built once in `new` and is never modified by `run`, so the same simulator can be
/// run several times and yields the same trajectory every time.
pub struct Simulator {
    settings: SimulatorSettings,
    registry: ModelRegistry,
    cancel: Option<Arc<AtomicBool>>,
    parallel: bool,
}

impl Simulator {
    /// Builds the acceleration models named in the settings, or the default set if none are named.
    pub fn new(settings: SimulatorSettings) -> Result<Self, ScarabError> {
        let params = settings.model_parameters();
        let registry = match &settings.models {
            Some(names) => ModelRegistry::from_names(names.as_slice(), &params)?,
            None => ModelRegistry::defaults(&params),
        };
        Ok(Self::with_registry(settings, registry))
    }

    /// Validates the configuration and builds the simulator from it.
    pub fn from_config(cfg: &SimulatorConfig) -> Result<Self, ScarabError> {
        Self::new(cfg.validate()?)
    }

    /// Uses the provided registry instead of building one from the settings.
    pub fn with_registry(settings: SimulatorSettings, registry: ModelRegistry) -> Self {
        Self {
            settings,
            registry,
            cancel: None,
            parallel: false,
        }
    }

    /// The run fails with a cancellation error at the first derivative evaluation after this flag is raised.
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn with_parallel_models(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn settings(&self) -> &SimulatorSettings {
        &self.settings
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Propagates the chaser from the start time to the end time.
    pub fn run(&self) -> Result<SimulationOutput, ScarabError> {
        let mut dynamics =
            OrbitalDynamics::new(&self.registry).with_parallel_models(self.parallel);
        if let Some(flag) = &self.cancel {
            dynamics = dynamics.with_cancellation(Arc::clone(flag));
        }
        let opts = self.settings.integrator.prop_opts();
        info!(
            "Propagating with {} ({opts}) and acceleration models {}",
            self.settings.integrator.method, self.registry
        );

        match self.settings.integrator.method {
            IntegratorKind::Rk4 => self.propagate::<RK4Fixed>(dynamics, opts),
            IntegratorKind::Dormand45 => self.propagate::<Dormand45>(dynamics, opts),
            IntegratorKind::CashKarp45 => self.propagate::<CashKarp45>(dynamics, opts),
        }
    }

    fn propagate<T: RK>(
        &self,
        dynamics: OrbitalDynamics<'_>,
        opts: PropOpts<RSSCartesianStep>,
    ) -> Result<SimulationOutput, ScarabError> {
        let prop = Propagator::new::<T>(dynamics, opts);
        let mut trajectory = Traj::new();
        trajectory.name = Some("chaser".to_string());

        let mut recorder = EventRecorder::new(&mut trajectory);
        recorder.record(&self.settings.initial_state, self.settings.start_time)?;

        let mut instance = prop.with(self.settings.initial_state, self.settings.start_time);
        let final_state =
            instance.until_time_with_observer(self.settings.end_time, &mut recorder)?;
        let details = instance.latest_details();

        info!("{trajectory}");
        Ok(SimulationOutput {
            trajectory,
            final_state,
            details,
        })
    }
}
