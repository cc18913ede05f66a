use rustc_hash::FxHashSet;

use crate::algorithms::coords::coords_search;
use crate::algorithms::coords::lowest_probe;
use crate::coords::Column;
use crate::coords::ColumnGrid;
use crate::coords::Coords;
use crate::node::VoxelNode;
use crate::settings::Settings;
use crate::terrain::Terrain;
use crate::terrain::examiner::TerrainExaminer;

/// The locations that can be walked to from a start.
///
/// Found in two passes. A depth first fill collects every location that looks
/// standable next to an already collected one, and then each of them is
/// confirmed with a full coordinate search from the start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathArea {
    start: Coords,
    reachable: FxHashSet<Coords>,
    unreachable: FxHashSet<Coords>,
}

impl PathArea {
    pub fn find<T>(terrain: &T, start: Coords, settings: &Settings) -> Self
    where
        T: Terrain,
    {
        let examiner = TerrainExaminer::for_settings(terrain, settings);
        let candidates = Self::fill(&examiner, terrain, start, settings);

        let mut sorted: Vec<Coords> = candidates.into_iter().collect();
        sorted.sort_unstable();

        let mut area = Self {
            start,
            reachable: FxHashSet::default(),
            unreachable: FxHashSet::default(),
        };
        for location in sorted {
            let result = coords_search(
                VoxelNode(start),
                VoxelNode(location),
                settings,
                &examiner,
            );
            if result.is_resolved() {
                area.reachable.insert(location);
            } else {
                log::trace!("Dropping {location}: {}", result.status);
                area.unreachable.insert(location);
            }
        }

        log::info!(
            "Path area from {start}: {} reachable, {} rejected",
            area.reachable.len(),
            area.unreachable.len()
        );
        area
    }

    /// Collects the locations that pass the cheap standing check.
    fn fill<T>(
        examiner: &TerrainExaminer<'_, T>,
        terrain: &T,
        start: Coords,
        settings: &Settings,
    ) -> FxHashSet<Coords>
    where
        T: Terrain,
    {
        let lowest = lowest_probe(settings);
        let mut seen = FxHashSet::default();
        seen.insert(start);
        let mut stack = vec![start];

        while let Some(at) = stack.pop() {
            let mut columns = ColumnGrid::new();
            for column in Column::ALL {
                for dy in (lowest..=1).rev() {
                    if !columns.is_viable(column) {
                        break;
                    }
                    let candidate = at.shifted(column.at(dy));
                    if start.distance_squared(&candidate) > settings.range_squared() {
                        columns.close(column);
                        continue;
                    }

                    let feet = examiner.feet(&VoxelNode(candidate));
                    if terrain.block(feet).is_solid() {
                        columns.close(column);
                    } else if examiner.is_standable(feet) {
                        columns.close(column);
                        if seen.insert(candidate) {
                            stack.push(candidate);
                        }
                    }
                }
            }
        }

        seen
    }

    #[inline(always)]
    pub fn start(&self) -> Coords {
        self.start
    }
    pub fn reachable(&self) -> &FxHashSet<Coords> {
        &self.reachable
    }
    /// Locations the fill collected, but no search could reach.
    pub fn unreachable(&self) -> &FxHashSet<Coords> {
        &self.unreachable
    }

    #[inline(always)]
    pub fn contains(&self, at: &Coords) -> bool {
        self.reachable.contains(at)
    }
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.reachable.len()
    }
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.reachable.is_empty()
    }

    pub fn sorted_reachable(&self) -> Vec<Coords> {
        let mut v: Vec<Coords> = self.reachable.iter().copied().collect();
        v.sort_unstable();
        v
    }
}
