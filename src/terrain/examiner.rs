use crate::coords::Coords;
use crate::coords::Offset;
use crate::examiner::Examiner;
use crate::examiner::Pathability;
use crate::node::VoxelNode;
use crate::score::Score;
use crate::settings::Settings;
use crate::terrain::Terrain;

/// Cost of moving along one axis.
pub const STRAIGHT_COST: u64 = 100;
/// Cost of moving along two axes at once.
pub const DIAGONAL_COST: u64 = 141; // 1.414213562373095
/// Cost of moving along all three axes at once.
pub const CUBIC_COST: u64 = 173; // 1.7320508075688772

/// Which block a voxel node names.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// The block the agent's feet occupy.
    #[default]
    Feet,
    /// The surface block the agent stands on.
    Surface,
}

/// Walking rules over a `Terrain`.
///
/// An agent is two blocks tall. It stands on a surface block, steps up one
/// block when it has head room to do so, drops up to the configured height
/// and never cuts around corners.
#[derive(Copy, Clone, Debug)]
pub struct TerrainExaminer<'t, T> {
    terrain: &'t T,
    anchor: Anchor,
    max_drop_height: i32,
}

impl<'t, T> TerrainExaminer<'t, T>
where
    T: Terrain,
{
    pub fn new(terrain: &'t T, anchor: Anchor, max_drop_height: u32) -> Self {
        Self {
            terrain,
            anchor,
            max_drop_height: crate::settings::drop_reach(max_drop_height),
        }
    }

    /// An examiner following the coordinate convention and drop height of
    /// `settings`.
    pub fn for_settings(terrain: &'t T, settings: &Settings) -> Self {
        let anchor = if settings.surface_search() {
            Anchor::Surface
        } else {
            Anchor::Feet
        };
        Self::new(terrain, anchor, settings.max_drop_height())
    }

    #[inline(always)]
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Where the agent's feet are when at `node`.
    #[inline(always)]
    pub fn feet(&self, node: &VoxelNode) -> Coords {
        match self.anchor {
            Anchor::Feet => node.0,
            Anchor::Surface => node.0.above(),
        }
    }

    #[inline(always)]
    fn passable(&self, at: Coords) -> bool {
        self.terrain.block(at).is_transparent()
    }

    /// Whether an agent fits with its feet at `feet`.
    #[inline(always)]
    pub fn is_standable(&self, feet: Coords) -> bool {
        self.terrain.block(feet.below()).is_surface()
            && self.passable(feet)
            && self.passable(feet.above())
    }

    /// Whether the two blocks beside a diagonal step are clear at body
    /// height.
    fn corners_clear(&self, feet: Coords, o: Offset) -> bool {
        [feet.offset(o.dx, 0, 0), feet.offset(0, 0, o.dz)]
            .into_iter()
            .all(|side| self.passable(side) && self.passable(side.above()))
    }
}

/// Octile distance in three dimensions.
pub fn octile(a: &Coords, b: &Coords) -> u64 {
    let mut d = [
        a.x.abs_diff(b.x) as u64,
        a.y.abs_diff(b.y) as u64,
        a.z.abs_diff(b.z) as u64,
    ];
    d.sort_unstable();
    let [low, mid, high] = d;
    CUBIC_COST * low + DIAGONAL_COST * (mid - low) + STRAIGHT_COST * (high - mid)
}

/// The cost of a single step.
pub fn step_cost(o: Offset) -> u64 {
    let base = match o.axes() {
        0 => 0,
        1 => STRAIGHT_COST,
        2 => DIAGONAL_COST,
        _ => CUBIC_COST,
    };
    let extra_drop = (-o.dy - 1).max(0) as u64;
    base + STRAIGHT_COST * extra_drop
}

impl<T> Examiner<VoxelNode> for TerrainExaminer<'_, T>
where
    T: Terrain,
{
    type Cost = u64;

    fn is_pathable(&self, parent: &VoxelNode, candidate: &VoxelNode) -> Pathability {
        let from = self.feet(parent);
        let to = self.feet(candidate);
        let o = from.offset_to(&to);
        if o.is_vertical() || o.dx.unsigned_abs() > 1 || o.dz.unsigned_abs() > 1 {
            return Pathability::InvalidPoint;
        }
        if o.dy > 1 || o.dy < -self.max_drop_height {
            return Pathability::InvalidPoint;
        }

        if o.dy == 1 {
            // Head height of the neighbouring column
            if !self.passable(to) {
                return Pathability::InvalidColumn;
            }
            if !self.passable(from.above().above()) {
                return Pathability::InvalidPoint;
            }
        } else {
            // Walks off at body height and falls down to `to`
            for y in to.y..=from.y.saturating_add(1) {
                if !self.passable(Coords::new(to.x, y, to.z)) {
                    return Pathability::InvalidColumn;
                }
            }
        }

        if o.is_diagonal() && !self.corners_clear(from, o) {
            return Pathability::InvalidColumn;
        }

        if self.is_standable(to) {
            Pathability::Valid
        } else {
            Pathability::InvalidPoint
        }
    }

    fn score(
        &self,
        parent: &VoxelNode,
        parent_score: Score<u64>,
        candidate: &VoxelNode,
        destination: &VoxelNode,
    ) -> Score<u64> {
        let g = parent_score
            .g()
            .saturating_add(step_cost(parent.0.offset_to(&candidate.0)));
        Score::new(g, octile(&candidate.0, &destination.0))
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::terrain::grid::VoxelScene;

    // A ledge at x=2, a two block wall at x=4 and a pit at x=6.
    const LEDGES: &str = indoc! {"
        ######.#
        ######.#
        ---
        ..#.X...
        ..#.X...
        ---
        ....X...
        ....X...
        ---
        ........
        ........
    "};

    fn check(from: (i32, i32, i32), to: (i32, i32, i32)) -> Pathability {
        let scene = VoxelScene::try_from(LEDGES).unwrap();
        let examiner = TerrainExaminer::new(&scene.grid, Anchor::Feet, 3);
        examiner.is_pathable(&VoxelNode(from.into()), &VoxelNode(to.into()))
    }

    #[test]
    fn level_steps() {
        assert_eq!(check((0, 1, 0), (1, 1, 0)), Pathability::Valid);
        assert_eq!(check((0, 1, 0), (1, 1, 1)), Pathability::Valid);
        // Feet in the ledge
        assert_eq!(check((1, 1, 0), (2, 1, 0)), Pathability::InvalidColumn);
        // Floating
        assert_eq!(check((0, 1, 0), (1, 2, 0)), Pathability::InvalidPoint);
    }

    #[test]
    fn climbing() {
        assert_eq!(check((1, 1, 0), (2, 2, 0)), Pathability::Valid);
        assert_eq!(check((2, 2, 0), (3, 1, 0)), Pathability::Valid);
        // Wall at head height
        assert_eq!(check((3, 1, 0), (4, 2, 0)), Pathability::InvalidColumn);
        assert_eq!(check((3, 1, 0), (4, 1, 0)), Pathability::InvalidColumn);
        // Two blocks up
        assert_eq!(check((1, 1, 0), (2, 3, 0)), Pathability::InvalidPoint);
    }

    #[test]
    fn falling() {
        // Into the pit
        assert_eq!(check((5, 1, 0), (6, 0, 0)), Pathability::InvalidPoint);
        assert_eq!(check((5, 1, 0), (6, -1, 0)), Pathability::InvalidPoint);
        let scene = VoxelScene::try_from(LEDGES).unwrap();
        let shallow = TerrainExaminer::new(&scene.grid, Anchor::Feet, 1);
        assert_eq!(
            shallow.is_pathable(&VoxelNode::new(2, 2, 0), &VoxelNode::new(1, 1, 0)),
            Pathability::Valid
        );
    }

    #[test]
    fn no_corner_cutting() {
        let scene = VoxelScene::try_from(indoc! {"
            ###
            ###
            ---
            .X.
            ...
            ---
            .X.
            ...
        "})
        .unwrap();
        let examiner = TerrainExaminer::new(&scene.grid, Anchor::Feet, 1);
        assert_eq!(
            examiner.is_pathable(&VoxelNode::new(0, 1, 1), &VoxelNode::new(1, 1, 0)),
            Pathability::InvalidColumn
        );
        assert_eq!(
            examiner.is_pathable(&VoxelNode::new(0, 1, 1), &VoxelNode::new(1, 1, 1)),
            Pathability::Valid
        );
        // Crossing the corner of the pillar
        assert_eq!(
            examiner.is_pathable(&VoxelNode::new(0, 1, 0), &VoxelNode::new(1, 1, 1)),
            Pathability::InvalidColumn
        );
    }

    #[test]
    fn surface_anchor() {
        let scene = VoxelScene::try_from(LEDGES).unwrap();
        let examiner = TerrainExaminer::new(&scene.grid, Anchor::Surface, 3);
        assert_eq!(examiner.feet(&VoxelNode::new(0, 0, 0)), Coords::new(0, 1, 0));
        assert_eq!(
            examiner.is_pathable(&VoxelNode::new(1, 0, 0), &VoxelNode::new(2, 1, 0)),
            Pathability::Valid
        );
    }

    #[test]
    fn costs() {
        assert_eq!(step_cost(Offset::new(1, 0, 0)), STRAIGHT_COST);
        assert_eq!(step_cost(Offset::new(1, 1, 1)), CUBIC_COST);
        assert_eq!(step_cost(Offset::new(0, -3, 1)), DIAGONAL_COST + 2 * STRAIGHT_COST);

        let o = Coords::new(0, 0, 0);
        assert_eq!(octile(&o, &Coords::new(3, 0, 0)), 300);
        assert_eq!(octile(&o, &Coords::new(2, -1, 3)), 173 + 141 + 100);
        // Never over estimates a step
        for dx in -1..=1 {
            for dz in -1..=1 {
                for dy in -3..=1 {
                    let offset = Offset::new(dx, dy, dz);
                    assert!(octile(&o, &o.shifted(offset)) <= step_cost(offset));
                }
            }
        }
    }
}
