use std::time::Duration;

use bevy::prelude::*;

use crate::config::{SimulationConfig, SpawnerConfig};
use crate::core::Simulation;
use crate::spawner::Spawner;

/// Inserts a [`Simulation`] and steps it once per fixed frame.
///
/// With a spawner configured, particles are emitted on the same fixed
/// schedule right before the step that applies them.
#[derive(Default)]
pub struct VerletPlugin {
    pub config: SimulationConfig,
    pub spawner: Option<SpawnerConfig>,
}

impl VerletPlugin {
    pub fn with_spawner(mut self, spawner: SpawnerConfig) -> Self {
        self.spawner = Some(spawner);
        self
    }
}

impl Plugin for VerletPlugin {
    fn build(&self, app: &mut App) {
        let simulation = Simulation::new(self.config.clone());
        let frame_dt = simulation.config().frame_dt;
        info!(
            "verlet simulation: {} sub-steps of {:.5}s, cell size {}",
            simulation.config().sub_steps,
            simulation.sub_step_dt(),
            simulation.config().cell_size
        );

        app.insert_resource(simulation);
        app.insert_resource(Time::<Fixed>::from_duration(Duration::from_secs_f64(
            frame_dt as f64,
        )));

        match &self.spawner {
            Some(spawner) => {
                app.insert_resource(Spawner::new(spawner.clone()));
                app.add_systems(FixedUpdate, (emit_particles, step_simulation).chain());
            }
            None => {
                app.add_systems(FixedUpdate, step_simulation);
            }
        }
    }
}

pub fn step_simulation(mut simulation: ResMut<Simulation>) {
    simulation.step();
}

pub fn emit_particles(
    time: Res<Time>,
    mut spawner: ResMut<Spawner>,
    mut simulation: ResMut<Simulation>,
) {
    let count = simulation.particle_count() + simulation.pending_spawn_count();
    if let Some(request) = spawner.tick(time.delta_secs(), count, &mut rand::rng()) {
        simulation.queue_spawn(request);
    }
}
