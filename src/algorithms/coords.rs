use crate::context::Context;
use crate::context::Expansion;
use crate::context::SearchState;
use crate::coords::Column;
use crate::coords::ColumnGrid;
use crate::coords::Coords;
use crate::examiner::Examiner;
use crate::examiner::Pathability;
use crate::node::VoxelNode;
use crate::result::SearchResult;
use crate::settings::Settings;

/// Whether a column is abandoned after its first decisive answer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ColumnPruning {
    #[default]
    Enabled,
    /// Every candidate is examined on its own. Slower, only useful as a
    /// reference.
    Disabled,
}

/// Best-first search over the voxel grid.
///
/// Neighbours are probed as 9 vertical columns around the expanded node,
/// scanned top to bottom from one block up to the drop height down (so the
/// default drop of 1 is the 26-neighbour cube).
#[derive(Copy, Clone, Debug, Default)]
pub struct CoordsSearch {
    pruning: ColumnPruning,
}

impl CoordsSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_column_pruning() -> Self {
        Self {
            pruning: ColumnPruning::Disabled,
        }
    }

    #[inline(always)]
    pub fn pruning(&self) -> ColumnPruning {
        self.pruning
    }
}

/// The lowest `dy` probed below an expanded node.
#[inline(always)]
pub(crate) fn lowest_probe(settings: &Settings) -> i32 {
    -settings.drop_reach()
}

impl Expansion<VoxelNode> for CoordsSearch {
    #[inline(always)]
    fn coords(&self, node: &VoxelNode) -> Coords {
        node.0
    }

    fn expand<E: Examiner<VoxelNode>>(
        &self,
        state: &mut SearchState<'_, VoxelNode, E>,
        node: VoxelNode,
    ) {
        let prune = self.pruning == ColumnPruning::Enabled;
        let lowest = lowest_probe(state.settings());
        let mut columns = ColumnGrid::new();

        for column in Column::ALL {
            for dy in (lowest..=1).rev() {
                if !columns.is_viable(column) {
                    break;
                }
                let candidate = VoxelNode(node.0.shifted(column.at(dy)));

                if !state.in_range(&candidate.0) {
                    if prune {
                        columns.close(column);
                    }
                    continue;
                }

                match state.is_pathable(&node, &candidate) {
                    Pathability::Valid => {
                        state.open(node, candidate);
                        if prune {
                            columns.close(column);
                        }
                    }
                    Pathability::InvalidColumn => {
                        if prune {
                            columns.close(column);
                        }
                    }
                    Pathability::InvalidPoint => {}
                }
            }
        }
    }
}

/// Searches the voxel grid from `start` to `destination`.
pub fn coords_search<E>(
    start: VoxelNode,
    destination: VoxelNode,
    settings: &Settings,
    examiner: &E,
) -> SearchResult<VoxelNode, E::Cost>
where
    E: Examiner<VoxelNode>,
{
    Context::new(CoordsSearch::new(), start, destination, settings, examiner).run()
}
