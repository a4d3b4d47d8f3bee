//! Timed particle emitter
//!
//! Emits one launched particle every `spawn_delay` seconds until the
//! simulation reaches `max_particles`. Radii are drawn uniformly from the
//! configured range; colors cycle through a smooth spectrum.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

use crate::command::SpawnRequest;
use crate::config::SpawnerConfig;
use crate::math::Real;

/// Phase advance of the spectrum per second of emitter time
const COLOR_CYCLE_SPEED: Real = 1.0;

#[derive(Resource, Clone, Debug)]
pub struct Spawner {
    config: SpawnerConfig,
    since_last: Real,
    time: Real,
    emitted: usize,
    cap_reported: bool,
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new(SpawnerConfig::default())
    }
}

impl Spawner {
    pub fn new(config: SpawnerConfig) -> Self {
        Self {
            config,
            since_last: 0.0,
            time: 0.0,
            emitted: 0,
            cap_reported: false,
        }
    }

    pub fn config(&self) -> &SpawnerConfig {
        &self.config
    }

    /// Total number of requests produced so far
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Advance the emitter clock by `delta` seconds and maybe produce a request.
    pub fn tick<R: Rng>(
        &mut self,
        delta: Real,
        particle_count: usize,
        rng: &mut R,
    ) -> Option<SpawnRequest> {
        self.since_last += delta;
        self.time += delta;

        if particle_count >= self.config.max_particles {
            if !self.cap_reported {
                info!(
                    "spawner reached the cap of {} particles",
                    self.config.max_particles
                );
                self.cap_reported = true;
            }
            return None;
        }
        if self.since_last < self.config.spawn_delay {
            return None;
        }
        self.since_last = 0.0;

        let radius = if self.config.min_radius < self.config.max_radius {
            rng.random_range(self.config.min_radius..=self.config.max_radius)
        } else {
            self.config.min_radius
        };
        self.emitted += 1;

        Some(
            SpawnRequest::new(self.config.position, radius)
                .with_velocity(self.config.velocity)
                .with_color(spectrum_color(self.time * COLOR_CYCLE_SPEED)),
        )
    }
}

/// Rainbow color for phase `t`; channels are squared sines a third of a turn apart.
pub fn spectrum_color(t: Real) -> Color {
    let r = t.sin();
    let g = (t + 0.33 * TAU).sin();
    let b = (t + 0.66 * TAU).sin();
    Color::srgb(r * r, g * g, b * b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn emits_on_cadence() {
        let config = SpawnerConfig::default().with_spawn_delay(0.05);
        let mut spawner = Spawner::new(config);
        let mut rng = StdRng::seed_from_u64(7);

        assert!(spawner.tick(0.02, 0, &mut rng).is_none());
        assert!(spawner.tick(0.02, 0, &mut rng).is_none());
        assert!(spawner.tick(0.02, 0, &mut rng).is_some());
        // Clock restarts after an emission
        assert!(spawner.tick(0.02, 1, &mut rng).is_none());
        assert_eq!(spawner.emitted(), 1);
    }

    #[test]
    fn stops_at_particle_cap() {
        let config = SpawnerConfig::default()
            .with_spawn_delay(0.0)
            .with_max_particles(3);
        let mut spawner = Spawner::new(config);
        let mut rng = StdRng::seed_from_u64(1);

        assert!(spawner.tick(0.1, 2, &mut rng).is_some());
        assert!(spawner.tick(0.1, 3, &mut rng).is_none());
        assert!(spawner.tick(0.1, 10, &mut rng).is_none());
    }

    #[test]
    fn requests_carry_launch_state() {
        let config = SpawnerConfig::default()
            .with_spawn_delay(0.0)
            .with_radius_range(4.0, 6.0)
            .with_velocity(Vec2::new(500.0, 50.0));
        let mut spawner = Spawner::new(config.clone());
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            let request = spawner.tick(0.016, 0, &mut rng).unwrap();
            assert!((4.0..=6.0).contains(&request.radius));
            assert_eq!(request.position, config.position);
            assert_eq!(request.velocity, Some(Vec2::new(500.0, 50.0)));
            assert!(request.color.is_some());
        }
    }

    #[test]
    fn requests_start_at_configured_position() {
        let config = SpawnerConfig::default()
            .with_spawn_delay(0.0)
            .with_position(Vec2::new(100.0, 50.0));
        let mut spawner = Spawner::new(config);
        let mut rng = StdRng::seed_from_u64(9);
        let request = spawner.tick(0.1, 0, &mut rng).unwrap();
        assert_eq!(request.position, Vec2::new(100.0, 50.0));
    }

    #[test]
    fn fixed_radius_when_range_is_empty() {
        let config = SpawnerConfig::default()
            .with_spawn_delay(0.0)
            .with_radius_range(8.0, 8.0);
        let mut spawner = Spawner::new(config);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(spawner.tick(0.1, 0, &mut rng).unwrap().radius, 8.0);
    }

    #[test]
    fn spectrum_channels_stay_in_unit_range() {
        for step in 0..100 {
            let color = spectrum_color(step as Real * 0.1).to_srgba();
            for channel in [color.red, color.green, color.blue] {
                assert!((0.0..=1.0).contains(&channel));
            }
        }
    }
}
