//! Narrow phase overlap resolution over the uniform grid
//!
//! Pairs are found with a half stencil so each unordered pair of adjacent
//! cells is visited once. Overlaps are corrected positionally in a single
//! pass; stacked contacts converge over the following sub-steps.

use bevy::math::IVec2;

use super::particle::{Particle, ParticleId};
use super::spatial_index::SpatialIndex;
use crate::math::Real;
use crate::utils::inv_exact;

/// Offsets visited from every occupied cell. Together with their negations
/// they cover the full 3x3 neighborhood.
pub const HALF_STENCIL: [IVec2; 5] = [
    IVec2::new(0, 0),
    IVec2::new(1, 0),
    IVec2::new(1, 1),
    IVec2::new(0, 1),
    IVec2::new(-1, 1),
];

/// How the correction of an overlapping pair is shared
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CollisionResponse {
    /// Weighted by radius squared, the larger disc moves less
    #[default]
    MassWeighted,
    /// Both particles move half of the overlap
    EqualSplit,
}

impl CollisionResponse {
    /// Fraction of the overlap moved by the first and second particle
    #[inline]
    fn shares(self, radius_a: Real, radius_b: Real) -> (Real, Real) {
        match self {
            Self::MassWeighted => {
                let mass_a = radius_a * radius_a;
                let mass_b = radius_b * radius_b;
                let ratio_a = mass_a * inv_exact(mass_a + mass_b);
                (1.0 - ratio_a, ratio_a)
            }
            Self::EqualSplit => (0.5, 0.5),
        }
    }
}

/// Push `a` and `b` apart if they overlap. Returns whether a correction was applied.
#[inline]
pub fn resolve_pair(a: &mut Particle, b: &mut Particle, response: CollisionResponse) -> bool {
    let offset = a.position - b.position;
    let distance_squared = offset.length_squared();
    let min_distance = a.radius + b.radius;

    // Coincident centers have no normal; they separate once anything else nudges them
    if distance_squared == 0.0 || distance_squared >= min_distance * min_distance {
        return false;
    }

    let distance = distance_squared.sqrt();
    let normal = offset / distance;
    let overlap = min_distance - distance;
    let (share_a, share_b) = response.shares(a.radius, b.radius);

    a.position += normal * (share_a * overlap);
    b.position -= normal * (share_b * overlap);
    true
}

/// Mutable access to two distinct particles of one slice
#[inline]
fn pair_mut(particles: &mut [Particle], i: ParticleId, j: ParticleId) -> (&mut Particle, &mut Particle) {
    debug_assert_ne!(i, j);
    if i < j {
        let (head, tail) = particles.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = particles.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}

/// One resolution pass over every adjacent pair. Returns the number of
/// corrected contacts.
pub fn resolve_collisions(
    particles: &mut [Particle],
    index: &SpatialIndex,
    response: CollisionResponse,
) -> usize {
    let mut contacts = 0;

    for (cell, bucket) in index.iter_cells() {
        for offset in HALF_STENCIL {
            if offset == IVec2::ZERO {
                for (slot, &i) in bucket.iter().enumerate() {
                    for &j in bucket.iter().skip(slot + 1) {
                        let (a, b) = pair_mut(particles, i, j);
                        contacts += resolve_pair(a, b, response) as usize;
                    }
                }
                continue;
            }

            let Some(neighbor) = index.bucket(cell + offset) else {
                continue;
            };
            for &i in bucket {
                for &j in neighbor {
                    let (a, b) = pair_mut(particles, i, j);
                    contacts += resolve_pair(a, b, response) as usize;
                }
            }
        }
    }

    contacts
}
