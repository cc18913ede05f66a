use derive_more::Display;

use crate::cost::Cost;
use crate::node::Node;
use crate::score::Score;

/// Where a search is at.
///
/// `NotStarted → Running → {Resolved, Unresolvable, RangeExceeded,
/// IterationsExceeded}`, the last four being terminal.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    #[display("not started")]
    NotStarted,
    #[display("running")]
    Running,
    /// A path from start to destination was found.
    #[display("resolved")]
    Resolved,
    /// Every reachable node was closed without finding the destination.
    #[display("unresolvable")]
    Unresolvable,
    /// The destination is out of range. Nothing was searched.
    #[display("range exceeded")]
    RangeExceeded,
    /// The iteration budget ran out first.
    #[display("iterations exceeded")]
    IterationsExceeded,
}

impl SearchStatus {
    #[inline(always)]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SearchStatus::NotStarted | SearchStatus::Running)
    }
    #[inline(always)]
    pub fn is_resolved(&self) -> bool {
        *self == SearchStatus::Resolved
    }
}

/// A node on a reconstructed path.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PathStep<N, C>
where
    N: Node,
    C: Cost,
{
    pub node: N,
    /// The node this one was reached from. `None` for the start.
    pub parent: Option<N>,
    pub score: Score<C>,
}

/// The outcome of driving a search to completion.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult<N, C>
where
    N: Node,
    C: Cost,
{
    pub status: SearchStatus,
    /// Start to destination. Empty unless resolved.
    pub path: Vec<PathStep<N, C>>,
    /// Sum of the straight-line distances between consecutive steps.
    pub length: f64,
    /// Expansions spent, not counting the start.
    pub iterations: usize,
    /// Nodes ever opened.
    pub opened: usize,
}

impl<N, C> SearchResult<N, C>
where
    N: Node,
    C: Cost,
{
    pub(crate) fn unresolved(status: SearchStatus, iterations: usize, opened: usize) -> Self {
        debug_assert!(status.is_terminal() && !status.is_resolved());
        Self {
            status,
            path: vec![],
            length: 0.0f64,
            iterations,
            opened,
        }
    }

    #[inline(always)]
    pub fn is_resolved(&self) -> bool {
        self.status.is_resolved()
    }

    /// The nodes on the path, start first.
    pub fn nodes(&self) -> impl Iterator<Item = N> + '_ {
        self.path.iter().map(|p| p.node)
    }

    pub fn start(&self) -> Option<N> {
        self.path.first().map(|p| p.node)
    }
    pub fn end(&self) -> Option<N> {
        self.path.last().map(|p| p.node)
    }

    /// The cost-so-far at the destination.
    pub fn cost(&self) -> Option<C> {
        self.path.last().map(|p| p.score.g())
    }

    /// Checks that the path is chained through its parent links.
    pub fn seems_valid(&self) -> bool {
        match self.path.first() {
            None => !self.is_resolved(),
            Some(first) => {
                first.parent.is_none()
                    && self
                        .path
                        .windows(2)
                        .all(|w| w[1].parent == Some(w[0].node))
            }
        }
    }
}

impl<N, C> std::fmt::Display for SearchResult<N, C>
where
    N: Node + std::fmt::Display,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        const MAX_ELEMENTS_DISPLAYED: usize = 20;

        match (self.start(), self.end()) {
            (Some(start), Some(end)) => {
                write!(
                    f,
                    "Path({}, {} nodes, {:.2} blocks, {}:",
                    self.status,
                    self.path.len(),
                    self.length,
                    start,
                )?;
                for step in self.path.iter().skip(1).take(MAX_ELEMENTS_DISPLAYED) {
                    write!(f, " {}", step.node)?;
                }
                if self.path.len() > MAX_ELEMENTS_DISPLAYED + 1 {
                    write!(f, " ... {end}")?;
                }
                write!(f, ")")
            }
            _ => write!(f, "Path({})", self.status),
        }
    }
}
