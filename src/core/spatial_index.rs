//! Uniform grid broad phase
//!
//! Buckets are keyed by packed cell coordinates and hold the ids of the
//! particles whose position falls inside the cell. Empty buckets are dropped
//! so only occupied cells are ever visited.

use bevy::math::IVec2;
use indexmap::{IndexMap, IndexSet};

use super::particle::{Particle, ParticleId};
use crate::math::{Point, Real, cell_of};

pub type PackedCell = u64;

pub type Bucket = IndexSet<ParticleId>;

#[inline]
pub fn pack_coords(ix: i32, iy: i32) -> PackedCell {
    ((ix as u32 as u64) << 32) | (iy as u32 as u64)
}

#[inline]
pub fn pack_from_ivec(coord: IVec2) -> PackedCell {
    pack_coords(coord.x, coord.y)
}

#[inline]
pub fn unpack_coords(id: PackedCell) -> (i32, i32) {
    let ix = (id >> 32) as u32 as i32;
    let iy = id as u32 as i32;
    (ix, iy)
}

#[inline]
pub fn unpack_to_ivec(id: PackedCell) -> IVec2 {
    let (ix, iy) = unpack_coords(id);
    IVec2::new(ix, iy)
}

#[derive(Clone, Debug)]
pub struct SpatialIndex {
    cell_size: Real,
    cells: IndexMap<PackedCell, Bucket>,
}

impl SpatialIndex {
    pub fn new(cell_size: Real) -> Self {
        Self {
            cell_size,
            cells: IndexMap::new(),
        }
    }

    pub fn cell_size(&self) -> Real {
        self.cell_size
    }

    #[inline]
    pub fn cell_of(&self, position: Point) -> IVec2 {
        cell_of(position, self.cell_size)
    }

    pub fn insert(&mut self, id: ParticleId, cell: IVec2) {
        self.cells
            .entry(pack_from_ivec(cell))
            .or_default()
            .insert(id);
    }

    /// Remove `id` from `cell`, dropping the bucket if it empties.
    pub fn remove(&mut self, id: ParticleId, cell: IVec2) -> bool {
        let packed = pack_from_ivec(cell);
        let Some(bucket) = self.cells.get_mut(&packed) else {
            return false;
        };
        let removed = bucket.swap_remove(&id);
        if bucket.is_empty() {
            self.cells.swap_remove(&packed);
        }
        removed
    }

    /// Move `id` between buckets; a no-op when the cell did not change.
    pub fn relocate(&mut self, id: ParticleId, from: IVec2, to: IVec2) {
        if from == to {
            return;
        }
        self.remove(id, from);
        self.insert(id, to);
    }

    /// Clear every bucket and re-insert all particles from their positions.
    pub fn rebuild(&mut self, particles: &mut [Particle]) {
        self.cells.clear();
        for (id, particle) in particles.iter_mut().enumerate() {
            let cell = particle.update_cell(self.cell_size);
            self.insert(id, cell);
        }
    }

    pub fn bucket(&self, cell: IVec2) -> Option<&Bucket> {
        self.cells.get(&pack_from_ivec(cell))
    }

    pub fn contains(&self, cell: IVec2, id: ParticleId) -> bool {
        self.bucket(cell).is_some_and(|bucket| bucket.contains(&id))
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = (IVec2, &Bucket)> {
        self.cells
            .iter()
            .map(|(&packed, bucket)| (unpack_to_ivec(packed), bucket))
    }

    /// Number of occupied cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Total number of ids over all buckets
    pub fn entry_count(&self) -> usize {
        self.cells.values().map(Bucket::len).sum()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec2;

    #[test]
    fn packing_round_trips_negative_cells() {
        for coord in [IVec2::new(-3, 7), IVec2::new(0, -1), IVec2::new(i32::MIN, i32::MAX)] {
            assert_eq!(unpack_to_ivec(pack_from_ivec(coord)), coord);
        }
    }

    #[test]
    fn relocate_moves_between_buckets() {
        let mut index = SpatialIndex::new(10.0);
        index.insert(4, IVec2::new(0, 0));
        index.insert(5, IVec2::new(0, 0));
        index.relocate(4, IVec2::new(0, 0), IVec2::new(1, 0));

        assert!(!index.contains(IVec2::new(0, 0), 4));
        assert!(index.contains(IVec2::new(1, 0), 4));
        assert!(index.contains(IVec2::new(0, 0), 5));
        assert_eq!(index.entry_count(), 2);
    }

    #[test]
    fn empty_buckets_are_dropped() {
        let mut index = SpatialIndex::new(10.0);
        index.insert(0, IVec2::new(2, 2));
        assert!(index.remove(0, IVec2::new(2, 2)));
        assert!(index.is_empty());
        assert!(!index.remove(0, IVec2::new(2, 2)));
    }

    #[test]
    fn clear_forgets_every_bucket() {
        let mut index = SpatialIndex::new(10.0);
        index.insert(0, IVec2::new(0, 0));
        index.insert(1, IVec2::new(-4, 2));
        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.entry_count(), 0);
        assert!(!index.contains(IVec2::new(-4, 2), 1));
    }

    #[test]
    fn rebuild_uses_floor_of_position() {
        let mut particles = vec![
            Particle::new(Vec2::new(-1.0, 5.0), 1.0),
            Particle::new(Vec2::new(25.0, 39.9), 1.0),
        ];
        let mut index = SpatialIndex::new(20.0);
        index.rebuild(&mut particles);

        assert!(index.contains(IVec2::new(-1, 0), 0));
        assert!(index.contains(IVec2::new(1, 1), 1));
        assert_eq!(particles[1].cell, IVec2::new(1, 1));
        assert_eq!(index.len(), 2);
    }
}
