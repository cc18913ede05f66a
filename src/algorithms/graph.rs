use crate::context::Context;
use crate::context::Expansion;
use crate::context::SearchState;
use crate::coords::Coords;
use crate::examiner::Examiner;
use crate::examiner::Pathability;
use crate::graph::Graph;
use crate::graph::GraphNodeId;
use crate::result::SearchResult;
use crate::settings::Settings;

/// Best-first search following the declared links of a `Graph`.
#[derive(Copy, Clone, Debug)]
pub struct GraphSearch<'g> {
    graph: &'g Graph,
}

impl<'g> GraphSearch<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }
}

impl Expansion<GraphNodeId> for GraphSearch<'_> {
    #[inline(always)]
    fn coords(&self, node: &GraphNodeId) -> Coords {
        self.graph.node(*node).coords
    }

    fn expand<E: Examiner<GraphNodeId>>(
        &self,
        state: &mut SearchState<'_, GraphNodeId, E>,
        node: GraphNodeId,
    ) {
        for &candidate in &self.graph.node(node).adjacent {
            // Declared graphs are small, nodes are scored once
            if state.container().contains(&candidate) {
                continue;
            }
            if !state.in_range(&self.coords(&candidate)) {
                continue;
            }
            if state.is_pathable(&node, &candidate) == Pathability::Valid {
                state.open(node, candidate);
            }
        }
    }
}

/// Searches `graph` from `start` to `destination`.
pub fn graph_search<E>(
    graph: &Graph,
    start: GraphNodeId,
    destination: GraphNodeId,
    settings: &Settings,
    examiner: &E,
) -> SearchResult<GraphNodeId, E::Cost>
where
    E: Examiner<GraphNodeId>,
{
    Context::new(GraphSearch::new(graph), start, destination, settings, examiner).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::float_cost::FloatCost;
    use crate::graph::GraphExaminer;
    use crate::result::SearchStatus;

    type GraphResult = SearchResult<GraphNodeId, FloatCost<f64>>;

    /// Two routes from "gate" to "keep", a short one through "bridge" and a
    /// long one through "ford". "tower" is off on its own.
    fn castle() -> Graph {
        Graph::builder()
            .node("gate", Coords::new(0, 0, 0), ["bridge", "ford"])
            .node("bridge", Coords::new(5, 0, 0), ["gate", "keep"])
            .node("ford", Coords::new(0, 0, 8), ["gate", "keep"])
            .node("keep", Coords::new(10, 0, 0), ["bridge", "ford"])
            .node("tower", Coords::new(10, 5, 0), Vec::<&str>::new())
            .build()
            .unwrap()
    }

    fn search(graph: &Graph, from: &str, to: &str, settings: &Settings) -> GraphResult {
        let examiner = GraphExaminer::new(graph);
        graph_search(
            graph,
            graph.get(from).unwrap(),
            graph.get(to).unwrap(),
            settings,
            &examiner,
        )
    }

    fn names<'g>(graph: &'g Graph, result: &GraphResult) -> Vec<&'g str> {
        result.nodes().map(|id| graph.node(id).name.as_str()).collect()
    }

    #[test]
    fn shortest_route() {
        let g = castle();
        let result = search(&g, "gate", "keep", &Settings::default());
        assert_eq!(result.status, SearchStatus::Resolved);
        assert_eq!(names(&g, &result), ["gate", "bridge", "keep"]);
        assert_eq!(result.length, 10.0);
        assert_eq!(result.cost().unwrap().get(), 10.0);
        assert!(result.seems_valid());
    }

    #[test]
    fn unlinked_nodes_are_unresolvable() {
        let g = castle();
        let result = search(&g, "gate", "tower", &Settings::default());
        assert_eq!(result.status, SearchStatus::Unresolvable);
        assert!(result.path.is_empty());
    }

    #[test]
    fn range_limits() {
        let g = castle();
        let settings = Settings::default().with_range(9);
        assert_eq!(
            search(&g, "gate", "keep", &settings).status,
            SearchStatus::RangeExceeded
        );

        let settings = Settings::default().with_range(10);
        let result = search(&g, "bridge", "ford", &settings);
        assert_eq!(result.status, SearchStatus::Resolved);
        assert_eq!(names(&g, &result), ["bridge", "gate", "ford"]);
    }

    #[test]
    fn opened_nodes_keep_their_first_parent() {
        // "mill" is opened from "road" before "lane" finds a shorter way in
        let g = Graph::builder()
            .node("home", Coords::new(0, 0, 0), ["road", "lane"])
            .node("road", Coords::new(4, 0, 0), ["mill"])
            .node("lane", Coords::new(0, 0, 4), ["mill"])
            .node("mill", Coords::new(4, 0, 6), ["town"])
            .node("town", Coords::new(20, 0, 0), Vec::<&str>::new())
            .build()
            .unwrap();
        let result = search(&g, "home", "town", &Settings::default());

        assert_eq!(result.status, SearchStatus::Resolved);
        assert_eq!(names(&g, &result), ["home", "road", "mill", "town"]);
        let through_lane = 4.0 + 20f64.sqrt() + 292f64.sqrt();
        assert!(result.cost().unwrap().get() > through_lane);
    }

    #[test]
    fn graph_searches_are_deterministic() {
        let g = castle();
        let first = search(&g, "ford", "bridge", &Settings::default());
        assert!(first.is_resolved());
        for _ in 0..5 {
            assert_eq!(search(&g, "ford", "bridge", &Settings::default()), first);
        }
    }

    #[test]
    fn start_is_destination() {
        let g = castle();
        let result = search(&g, "tower", "tower", &Settings::default());
        assert_eq!(result.status, SearchStatus::Resolved);
        assert_eq!(names(&g, &result), ["tower"]);
    }
}
