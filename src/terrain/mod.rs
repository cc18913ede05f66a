use derive_more::Display;

use crate::coords::Coords;

/// Terrain examiners for voxel searches
pub mod examiner;
/// Dense in-memory terrain and its text scenes
pub mod grid;
/// Heightmap loading
pub mod heightmap;

/// How a block affects movement.
#[derive(Copy, Clone, Debug, Default, Display, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Block {
    /// Empty space.
    #[default]
    #[display(".")]
    Air,
    /// Can be moved through and seen through, but is not empty (tall grass,
    /// flowers, signs).
    #[display(",")]
    Transparent,
    /// Obstructs movement and can be stood on.
    #[display("#")]
    Surface,
    /// Obstructs movement but offers no footing (fences, lava, cacti).
    #[display("X")]
    Solid,
}

impl Block {
    #[inline(always)]
    pub fn is_air(&self) -> bool {
        *self == Block::Air
    }
    /// Whether the block can be moved through.
    #[inline(always)]
    pub fn is_transparent(&self) -> bool {
        matches!(self, Block::Air | Block::Transparent)
    }
    /// Whether the block obstructs movement.
    #[inline(always)]
    pub fn is_solid(&self) -> bool {
        !self.is_transparent()
    }
    /// Whether the block can be stood on.
    #[inline(always)]
    pub fn is_surface(&self) -> bool {
        *self == Block::Surface
    }
}

/// Block lookups in a world.
///
/// Implementations must be pure, searches may query the same coordinates
/// repeatedly and in any order.
pub trait Terrain {
    fn block(&self, at: Coords) -> Block;
}

impl<T> Terrain for &T
where
    T: Terrain + ?Sized,
{
    #[inline(always)]
    fn block(&self, at: Coords) -> Block {
        (**self).block(at)
    }
}

/// A bounded selection of the world.
pub trait Region {
    fn contains(&self, at: &Coords) -> bool;
    /// Number of blocks inside the region.
    fn volume(&self) -> u64;
}

/// The blocks between two opposite corners, both included.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
#[display("[{min}..={max}]")]
pub struct Cuboid {
    min: Coords,
    max: Coords,
}

impl Cuboid {
    pub fn new(a: Coords, b: Coords) -> Self {
        Self {
            min: Coords::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Coords::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    pub fn min(&self) -> Coords {
        self.min
    }
    pub fn max(&self) -> Coords {
        self.max
    }
}

impl Region for Cuboid {
    #[inline(always)]
    fn contains(&self, at: &Coords) -> bool {
        (self.min.x..=self.max.x).contains(&at.x)
            && (self.min.y..=self.max.y).contains(&at.y)
            && (self.min.z..=self.max.z).contains(&at.z)
    }

    fn volume(&self) -> u64 {
        let side = |lo: i32, hi: i32| (hi as i64 - lo as i64 + 1) as u64;
        side(self.min.x, self.max.x) * side(self.min.y, self.max.y) * side(self.min.z, self.max.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_classes() {
        assert!(Block::Air.is_air() && Block::Air.is_transparent());
        assert!(!Block::Transparent.is_air() && Block::Transparent.is_transparent());
        assert!(Block::Surface.is_solid() && Block::Surface.is_surface());
        assert!(Block::Solid.is_solid() && !Block::Solid.is_surface());
    }

    #[test]
    fn cuboids() {
        let c = Cuboid::new(Coords::new(2, 0, 2), Coords::new(0, 1, 0));
        assert_eq!(c.min(), Coords::new(0, 0, 0));
        assert_eq!(c.volume(), 18);
        assert!(c.contains(&Coords::new(1, 1, 2)));
        assert!(!c.contains(&Coords::new(1, 2, 1)));

        let unit = Cuboid::new(Coords::new(-1, -1, -1), Coords::new(-1, -1, -1));
        assert_eq!(unit.volume(), 1);
    }
}
