/// Simple custom benchmarking without criterion
use std::time::Instant;

use bevy::prelude::*;
use verlet2d::core::{SpatialIndex, resolve_collisions};
use verlet2d::{Boundary, CollisionResponse, Particle, Simulation, SimulationConfig};

fn time_it<F: FnMut()>(name: &str, iterations: usize, mut f: F) {
    // Warmup
    for _ in 0..5 {
        f();
    }

    let start = Instant::now();
    for _ in 0..iterations {
        f();
    }
    let elapsed = start.elapsed();

    let avg_ms = elapsed.as_secs_f64() * 1000.0 / iterations as f64;
    println!("{}: {:.3}ms avg ({} iterations)", name, avg_ms, iterations);
}

/// Square lattice of touching particles centered in a large arena
fn create_test_particles(count: usize, radius: f32) -> Vec<Particle> {
    let side = (count as f32).sqrt().ceil() as usize;
    let spacing = radius * 1.9;
    let origin = Vec2::splat(2000.0 - side as f32 * spacing / 2.0);
    let mut particles = Vec::with_capacity(count);

    for x in 0..side {
        for y in 0..side {
            if particles.len() >= count {
                break;
            }
            let position = origin + Vec2::new(x as f32, y as f32) * spacing;
            particles.push(Particle::new(position, radius));
        }
    }

    particles
}

fn create_simulation(count: usize) -> Simulation {
    let config = SimulationConfig::default()
        .with_boundary(Boundary::circle(Vec2::splat(2000.0), 1900.0))
        .with_cell_size(10.0);
    let mut sim = Simulation::new(config);
    for particle in create_test_particles(count, 5.0) {
        sim.add_particle(particle.position, particle.radius);
    }
    sim
}

fn main() {
    println!("\n=== verlet2d Benchmarks ===\n");

    println!("--- Spatial Index Rebuild ---");
    for &count in &[1000, 5000, 10000, 20000] {
        let mut particles = create_test_particles(count, 5.0);
        let mut index = SpatialIndex::new(10.0);

        time_it(&format!("rebuild (n={})", count), 20, || {
            index.rebuild(&mut particles);
        });
    }

    println!("\n--- Collision Pass ---");
    for &count in &[1000, 5000, 10000] {
        let mut particles = create_test_particles(count, 5.0);
        let mut index = SpatialIndex::new(10.0);
        index.rebuild(&mut particles);

        time_it(&format!("resolve_collisions (n={})", count), 20, || {
            resolve_collisions(&mut particles, &index, CollisionResponse::MassWeighted);
        });
    }

    println!("\n--- Full Step (8 sub-steps) ---");
    for &count in &[1000, 5000, 10000] {
        let mut sim = create_simulation(count);

        time_it(&format!("step (n={})", count), 10, || {
            sim.step();
        });
    }

    println!("\n=== Benchmark Complete ===\n");
}
