use rustc_hash::FxHashSet;

use crate::coords::Coords;
use crate::coords::Offset;
use crate::terrain::Region;
use crate::terrain::Terrain;

/// The air connected to a seed inside a region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interior {
    locations: FxHashSet<Coords>,
}

impl Interior {
    /// Flood fills the air around `seed`, never leaving `region`.
    ///
    /// Diagonal moves need at least one of the blocks they pass by to be air.
    pub fn find<T, R>(terrain: &T, region: &R, seed: Coords) -> Self
    where
        T: Terrain,
        R: Region,
    {
        let mut locations = FxHashSet::default();
        locations.reserve(region.volume().min(1 << 20) as usize);
        let mut fill = Fill {
            terrain,
            region,
            locations,
        };
        if fill.accepts(seed) {
            fill.spread(seed);
        }
        log::info!(
            "Interior around {seed}: {} blocks",
            fill.locations.len()
        );
        Self {
            locations: fill.locations,
        }
    }

    pub fn locations(&self) -> &FxHashSet<Coords> {
        &self.locations
    }
    #[inline(always)]
    pub fn volume(&self) -> usize {
        self.locations.len()
    }
    #[inline(always)]
    pub fn contains(&self, at: &Coords) -> bool {
        self.locations.contains(at)
    }
}

struct Fill<'a, T, R> {
    terrain: &'a T,
    region: &'a R,
    locations: FxHashSet<Coords>,
}

impl<T, R> Fill<'_, T, R>
where
    T: Terrain,
    R: Region,
{
    #[inline(always)]
    fn accepts(&self, at: Coords) -> bool {
        self.region.contains(&at) && self.terrain.block(at).is_air()
    }

    /// Whether some block between `at` and `at + o` lets air through.
    fn passes(&self, at: Coords, o: Offset) -> bool {
        if o.axes() < 2 {
            return true;
        }
        intermediate_offsets(o).any(|step| self.terrain.block(at.shifted(step)).is_air())
    }

    fn spread(&mut self, seed: Coords) {
        self.locations.insert(seed);
        let mut stack = vec![seed];
        while let Some(at) = stack.pop() {
            for dx in -1..=1 {
                for dy in -1..=1 {
                    for dz in -1..=1 {
                        let o = Offset::new(dx, dy, dz);
                        let next = at.shifted(o);
                        if o.axes() == 0 || self.locations.contains(&next) {
                            continue;
                        }
                        if self.accepts(next) && self.passes(at, o) {
                            self.locations.insert(next);
                            stack.push(next);
                        }
                    }
                }
            }
        }
    }
}

/// The offsets made of a strict, non empty subset of the axes of `o`.
fn intermediate_offsets(o: Offset) -> impl Iterator<Item = Offset> {
    let moved = (o.dx != 0) as u8 | ((o.dy != 0) as u8) << 1 | ((o.dz != 0) as u8) << 2;
    (1u8..7)
        .filter(move |mask| mask & !moved == 0 && *mask != moved)
        .map(move |mask| {
            Offset::new(
                if mask & 1 != 0 { o.dx } else { 0 },
                if mask & 2 != 0 { o.dy } else { 0 },
                if mask & 4 != 0 { o.dz } else { 0 },
            )
        })
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::terrain::Block;
    use crate::terrain::Cuboid;
    use crate::terrain::grid::VoxelGrid;
    use crate::terrain::grid::VoxelScene;

    // A 3x1x2 room, and a sealed 1x1x1 pocket at x=5
    const ROOMS: &str = indoc! {"
        #######
        #######
        #######
        #######
        ---
        #######
        #...#.#
        #...###
        #######
        ---
        #######
        #######
        #######
        #######
    "};

    fn everything() -> Cuboid {
        Cuboid::new(Coords::new(-10, -10, -10), Coords::new(10, 10, 10))
    }

    #[test]
    fn fills_rooms() {
        let scene = VoxelScene::try_from(ROOMS).unwrap();
        let room = Interior::find(&scene.grid, &everything(), Coords::new(2, 1, 1));
        assert_eq!(room.volume(), 6);
        assert!(room.contains(&Coords::new(1, 1, 2)));
        assert!(!room.contains(&Coords::new(5, 1, 1)));

        let pocket = Interior::find(&scene.grid, &everything(), Coords::new(5, 1, 1));
        assert_eq!(pocket.volume(), 1);
    }

    #[test]
    fn seeds_must_be_air_inside_the_region() {
        let scene = VoxelScene::try_from(ROOMS).unwrap();
        assert_eq!(
            Interior::find(&scene.grid, &everything(), Coords::new(0, 0, 0)).volume(),
            0
        );
        let elsewhere = Cuboid::new(Coords::new(20, 20, 20), Coords::new(21, 21, 21));
        assert_eq!(
            Interior::find(&scene.grid, &elsewhere, Coords::new(2, 1, 1)).volume(),
            0
        );
    }

    #[test]
    fn regions_bound_open_space() {
        let grid = VoxelGrid::new(Coords::new(0, 0, 0), Coords::new(1, 1, 1));
        let region = Cuboid::new(Coords::new(0, 0, 0), Coords::new(3, 2, 1));
        let open = Interior::find(&grid, &region, Coords::new(1, 1, 1));
        assert_eq!(open.volume() as u64, region.volume());
    }

    #[test]
    fn fills_large_open_regions() {
        let grid = VoxelGrid::new(Coords::new(0, 0, 0), Coords::new(1, 1, 1));
        let region = Cuboid::new(Coords::new(0, 0, 0), Coords::new(47, 47, 47));
        let open = Interior::find(&grid, &region, Coords::new(0, 0, 0));
        assert_eq!(open.volume() as u64, region.volume());
        assert!(open.contains(&Coords::new(47, 47, 47)));
    }

    #[test]
    fn no_squeezing_through_edges() {
        // Two cells touching along an edge, both blocks beside it filled
        let mut grid = VoxelGrid::new(Coords::new(0, 0, 0), Coords::new(2, 1, 2));
        grid.set(Coords::new(1, 0, 0), Block::Surface);
        grid.set(Coords::new(0, 0, 1), Block::Solid);
        let region = Cuboid::new(Coords::new(0, 0, 0), Coords::new(1, 0, 1));
        let sealed = Interior::find(&grid, &region, Coords::new(0, 0, 0));
        assert_eq!(sealed.volume(), 1);

        grid.set(Coords::new(0, 0, 1), Block::Air);
        let open = Interior::find(&grid, &region, Coords::new(0, 0, 0));
        assert_eq!(open.volume(), 3);
        assert!(open.contains(&Coords::new(1, 0, 1)));
    }

    #[test]
    fn no_squeezing_through_corners() {
        let region = Cuboid::new(Coords::new(0, 0, 0), Coords::new(1, 1, 1));
        let mut grid = VoxelGrid::new(Coords::new(0, 0, 0), Coords::new(2, 2, 2));
        for x in 0..2 {
            for y in 0..2 {
                for z in 0..2 {
                    grid.set(Coords::new(x, y, z), Block::Solid);
                }
            }
        }
        grid.set(Coords::new(0, 0, 0), Block::Air);
        grid.set(Coords::new(1, 1, 1), Block::Air);
        assert_eq!(
            Interior::find(&grid, &region, Coords::new(0, 0, 0)).volume(),
            1
        );

        grid.set(Coords::new(0, 1, 1), Block::Air);
        assert_eq!(
            Interior::find(&grid, &region, Coords::new(0, 0, 0)).volume(),
            3
        );
    }

    #[test]
    fn intermediates() {
        let steps: Vec<Offset> = intermediate_offsets(Offset::new(1, 0, -1)).collect();
        assert_eq!(steps, [Offset::new(1, 0, 0), Offset::new(0, 0, -1)]);
        assert_eq!(intermediate_offsets(Offset::new(1, 1, 1)).count(), 6);
        assert_eq!(intermediate_offsets(Offset::new(0, 1, 0)).count(), 0);
    }
}
