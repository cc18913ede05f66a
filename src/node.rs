use std::fmt::Debug;
use std::hash::Hash;

use derive_more::Display;

use crate::coords::Coords;

/// A unit of search state.
///
/// Nodes are plain keys, the container that owns a search keeps their parent
/// links and scores. Their order only matters to break score ties.
pub trait Node: Copy + Clone + Debug + PartialEq + Eq + Hash + Ord {}

/// A node of the implicit voxel grid.
///
/// Adjacency is discovered by probing the blocks around it.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[display("{_0}")]
pub struct VoxelNode(pub Coords);
impl Node for VoxelNode {}

impl VoxelNode {
    #[inline(always)]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self(Coords::new(x, y, z))
    }
    #[inline(always)]
    pub const fn coords(&self) -> Coords {
        self.0
    }
}

impl From<Coords> for VoxelNode {
    fn from(c: Coords) -> Self {
        Self(c)
    }
}
