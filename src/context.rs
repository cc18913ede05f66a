use crate::container::NodeContainer;
use crate::container::Opened;
use crate::coords::Coords;
use crate::examiner::Examiner;
use crate::examiner::Pathability;
use crate::node::Node;
use crate::result::SearchResult;
use crate::result::SearchStatus;
use crate::score::Score;
use crate::settings::Settings;

/// How one kind of node space discovers neighbours.
///
/// Implementations are stateless dispatchers, the state of a search lives in
/// its `SearchState`.
pub trait Expansion<N: Node> {
    /// Where a node is, for range checks and path lengths.
    fn coords(&self, node: &N) -> Coords;

    /// Opens the pathable neighbours of the closed `node`.
    fn expand<E: Examiner<N>>(&self, state: &mut SearchState<'_, N, E>, node: N);
}

/// Everything an `Expansion` may touch while expanding a node.
#[derive(Debug)]
pub struct SearchState<'a, N, E>
where
    N: Node,
    E: Examiner<N>,
{
    start: N,
    start_coords: Coords,
    destination: N,
    settings: &'a Settings,
    examiner: &'a E,
    container: NodeContainer<N, E::Cost>,
}

impl<N, E> SearchState<'_, N, E>
where
    N: Node,
    E: Examiner<N>,
{
    #[inline(always)]
    pub fn start(&self) -> N {
        self.start
    }
    #[inline(always)]
    pub fn destination(&self) -> N {
        self.destination
    }
    #[inline(always)]
    pub fn settings(&self) -> &Settings {
        self.settings
    }
    #[inline(always)]
    pub fn container(&self) -> &NodeContainer<N, E::Cost> {
        &self.container
    }

    /// Whether `at` is within range of the start.
    #[inline(always)]
    pub fn in_range(&self, at: &Coords) -> bool {
        self.start_coords.distance_squared(at) <= self.settings.range_squared()
    }

    #[inline(always)]
    pub fn is_pathable(&self, parent: &N, candidate: &N) -> Pathability {
        self.examiner.is_pathable(parent, candidate)
    }

    /// Scores `node` against `parent` and opens it.
    pub fn open(&mut self, parent: N, node: N) -> Opened {
        let parent_score = match self.container.score_of(&parent) {
            Some(s) => s,
            None => panic!("Expanded node {parent:?} is not part of this search"),
        };
        let score = self
            .examiner
            .score(&parent, parent_score, &node, &self.destination);
        self.container.open(Some(parent), node, score)
    }

    #[inline(always)]
    fn is_destination(&self, node: &N) -> bool {
        self.examiner.is_destination(node, &self.destination)
    }
}

/// A single search from `start` to `destination`.
///
/// Contexts are driven once with `run` and then only inspected.
#[derive(Debug)]
pub struct Context<'a, N, E, X>
where
    N: Node,
    E: Examiner<N>,
    X: Expansion<N>,
{
    algorithm: X,
    state: SearchState<'a, N, E>,
    status: SearchStatus,
}

impl<'a, N, E, X> Context<'a, N, E, X>
where
    N: Node,
    E: Examiner<N>,
    X: Expansion<N>,
{
    #[must_use]
    pub fn new(
        algorithm: X,
        start: N,
        destination: N,
        settings: &'a Settings,
        examiner: &'a E,
    ) -> Self {
        let start_coords = algorithm.coords(&start);
        Self {
            algorithm,
            state: SearchState {
                start,
                start_coords,
                destination,
                settings,
                examiner,
                container: NodeContainer::new(),
            },
            status: SearchStatus::NotStarted,
        }
    }

    #[inline(always)]
    pub fn status(&self) -> SearchStatus {
        self.status
    }
    #[inline(always)]
    pub fn container(&self) -> &NodeContainer<N, E::Cost> {
        &self.state.container
    }
    #[inline(always)]
    pub fn algorithm(&self) -> &X {
        &self.algorithm
    }

    /// Drives the search to a terminal status.
    ///
    /// # Panics
    ///
    /// When called twice on the same context.
    pub fn run(&mut self) -> SearchResult<N, E::Cost> {
        assert_eq!(
            self.status,
            SearchStatus::NotStarted,
            "Search contexts can't be reused"
        );
        self.status = SearchStatus::Running;

        let result = self.search();
        self.status = result.status;
        log::debug!(
            "Search {:?} -> {:?}: {} after {} iterations ({} nodes opened)",
            self.state.start,
            self.state.destination,
            result.status,
            result.iterations,
            result.opened,
        );
        result
    }

    fn search(&mut self) -> SearchResult<N, E::Cost> {
        let state = &mut self.state;
        let start = state.start;
        let destination_coords = self.algorithm.coords(&state.destination);
        if !state.in_range(&destination_coords) {
            return SearchResult::unresolved(SearchStatus::RangeExceeded, 0, 0);
        }

        state.container.reset();
        state.container.open(None, start, Score::origin());
        let first = state.container.close_best();
        debug_assert_eq!(first, Some(start));
        if state.is_destination(&start) {
            return self.finish(start, 0);
        }
        self.algorithm.expand(&mut self.state, start);

        let mut iterations = 0usize;
        while let Some(node) = self.state.container.close_best() {
            if self.state.is_destination(&node) {
                return self.finish(node, iterations);
            }

            #[cfg(feature = "coz_profile")]
            coz::scope!("NodeExpansion");
            log::trace!("Expanding {node:?}");
            self.algorithm.expand(&mut self.state, node);

            iterations += 1;
            if self.state.settings.iterations_exhausted(iterations) {
                return SearchResult::unresolved(
                    SearchStatus::IterationsExceeded,
                    iterations,
                    self.state.container.len(),
                );
            }
        }

        SearchResult::unresolved(
            SearchStatus::Unresolvable,
            iterations,
            self.state.container.len(),
        )
    }

    /// Reconstructs the path to the closed `last` node.
    fn finish(&self, last: N, iterations: usize) -> SearchResult<N, E::Cost> {
        let state = &self.state;
        let opened = state.container.len();
        let path = state.container.path_to(&last);

        let starts_right = path.first().is_some_and(|p| p.node == state.start);
        let ends_right = path
            .last()
            .is_some_and(|p| state.is_destination(&p.node));
        if !(starts_right && ends_right) {
            return SearchResult::unresolved(SearchStatus::Unresolvable, iterations, opened);
        }

        let length = path
            .windows(2)
            .map(|w| {
                let a = self.algorithm.coords(&w[0].node);
                let b = self.algorithm.coords(&w[1].node);
                a.distance(&b)
            })
            .sum();

        SearchResult {
            status: SearchStatus::Resolved,
            path,
            length,
            iterations,
            opened,
        }
    }
}
