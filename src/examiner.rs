use derive_more::Display;

use crate::cost::Cost;
use crate::node::Node;
use crate::node::VoxelNode;
use crate::score::Score;

/// Whether an edge from an expanded node to a candidate may be taken.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum Pathability {
    /// The candidate may be opened.
    #[display("valid")]
    Valid,
    /// Only this candidate is rejected.
    #[display("invalid point")]
    InvalidPoint,
    /// Every other candidate in the same vertical column of the neighbour
    /// block can be skipped without checking.
    #[display("invalid column")]
    InvalidColumn,
}

/// The validity and scoring policy of a search.
///
/// Examiners are stateless and may be shared by any number of searches.
pub trait Examiner<N: Node> {
    type Cost: Cost;

    fn is_pathable(&self, parent: &N, candidate: &N) -> Pathability;

    /// Scores `candidate` when reached through `parent`.
    fn score(
        &self,
        parent: &N,
        parent_score: Score<Self::Cost>,
        candidate: &N,
        destination: &N,
    ) -> Score<Self::Cost>;

    /// Whether a closed `node` ends the search.
    fn is_destination(&self, node: &N, destination: &N) -> bool {
        node == destination
    }
}

impl<N, E> Examiner<N> for &E
where
    N: Node,
    E: Examiner<N>,
{
    type Cost = E::Cost;

    #[inline(always)]
    fn is_pathable(&self, parent: &N, candidate: &N) -> Pathability {
        (**self).is_pathable(parent, candidate)
    }
    #[inline(always)]
    fn score(
        &self,
        parent: &N,
        parent_score: Score<Self::Cost>,
        candidate: &N,
        destination: &N,
    ) -> Score<Self::Cost> {
        (**self).score(parent, parent_score, candidate, destination)
    }
    #[inline(always)]
    fn is_destination(&self, node: &N, destination: &N) -> bool {
        (**self).is_destination(node, destination)
    }
}

/// Accepts any voxel within `radius` blocks of the destination as the goal.
#[derive(Copy, Clone, Debug)]
pub struct RegionGoal<E> {
    inner: E,
    radius_squared: i64,
}

impl<E> RegionGoal<E>
where
    E: Examiner<VoxelNode>,
{
    pub fn new(inner: E, radius: u32) -> Self {
        Self {
            inner,
            radius_squared: (radius as i64) * (radius as i64),
        }
    }
}

impl<E> Examiner<VoxelNode> for RegionGoal<E>
where
    E: Examiner<VoxelNode>,
{
    type Cost = E::Cost;

    #[inline(always)]
    fn is_pathable(&self, parent: &VoxelNode, candidate: &VoxelNode) -> Pathability {
        self.inner.is_pathable(parent, candidate)
    }
    #[inline(always)]
    fn score(
        &self,
        parent: &VoxelNode,
        parent_score: Score<Self::Cost>,
        candidate: &VoxelNode,
        destination: &VoxelNode,
    ) -> Score<Self::Cost> {
        self.inner
            .score(parent, parent_score, candidate, destination)
    }
    fn is_destination(&self, node: &VoxelNode, destination: &VoxelNode) -> bool {
        node.0.distance_squared(&destination.0) <= self.radius_squared
    }
}
