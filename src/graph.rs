use derive_more::Display;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::coords::Coords;
use crate::examiner::Examiner;
use crate::examiner::Pathability;
use crate::float_cost::FloatCost;
use crate::node::Node;
use crate::score::Score;

/// Index of a node in its `Graph`, in declaration order.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[display("#{_0}")]
pub struct GraphNodeId(pub u32);
impl Node for GraphNodeId {}

impl GraphNodeId {
    #[inline(always)]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
    pub name: String,
    pub coords: Coords,
    pub adjacent: SmallVec<[GraphNodeId; 8]>,
}

/// An immutable set of named locations and their declared links.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: Vec<GraphNode>,
    by_name: FxHashMap<String, GraphNodeId>,
}

impl Graph {
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    pub fn get(&self, name: &str) -> Option<GraphNodeId> {
        self.by_name.get(name).copied()
    }

    /// # Panics
    ///
    /// When `id` comes from a different graph.
    #[inline(always)]
    pub fn node(&self, id: GraphNodeId) -> &GraphNode {
        &self.nodes[id.index()]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (GraphNodeId, &GraphNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (GraphNodeId(i as u32), n))
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The closest node within `radius` blocks of `at`.
    pub fn nearest(&self, at: &Coords, radius: u32) -> Option<GraphNodeId> {
        self.nearest_matching(at, radius, |_| true)
    }

    /// The closest node within `radius` blocks of `at` accepted by
    /// `predicate`. Ties go to the earliest declared node.
    pub fn nearest_matching<P>(&self, at: &Coords, radius: u32, predicate: P) -> Option<GraphNodeId>
    where
        P: Fn(&GraphNode) -> bool,
    {
        let radius_squared = (radius as i64) * (radius as i64);
        self.nodes()
            .map(|(id, n)| (n.coords.distance_squared(at), id, n))
            .filter(|(d, _, n)| *d <= radius_squared && predicate(*n))
            .min_by_key(|(d, id, _)| (*d, *id))
            .map(|(_, id, _)| id)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node '{node}' is adjacent to undeclared node '{adjacent}'")]
    UndeclaredNode { node: String, adjacent: String },
    #[error("Node '{0}' was declared twice")]
    DuplicateNode(String),
}

/// Collects node declarations, resolving names once all are known.
#[derive(Clone, Debug, Default)]
pub struct GraphBuilder {
    declared: Vec<(String, Coords, Vec<String>)>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a node, its adjacent nodes may be declared later.
    pub fn node<S, I>(mut self, name: S, coords: Coords, adjacent: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.declared.push((
            name.into(),
            coords,
            adjacent.into_iter().map(Into::into).collect(),
        ));
        self
    }

    pub fn build(self) -> Result<Graph, GraphError> {
        let mut by_name = FxHashMap::default();
        by_name.reserve(self.declared.len());
        for (i, (name, _, _)) in self.declared.iter().enumerate() {
            if by_name.insert(name.clone(), GraphNodeId(i as u32)).is_some() {
                return Err(GraphError::DuplicateNode(name.clone()));
            }
        }

        let mut nodes = Vec::with_capacity(self.declared.len());
        for (name, coords, adjacent) in self.declared {
            let adjacent = adjacent
                .into_iter()
                .map(|a| match by_name.get(&a) {
                    Some(id) => Ok(*id),
                    None => Err(GraphError::UndeclaredNode {
                        node: name.clone(),
                        adjacent: a,
                    }),
                })
                .collect::<Result<_, _>>()?;
            nodes.push(GraphNode {
                name,
                coords,
                adjacent,
            });
        }

        log::debug!("Built graph with {} nodes", nodes.len());
        Ok(Graph { nodes, by_name })
    }
}

/// Takes every declared link, scoring by straight-line distance.
#[derive(Copy, Clone, Debug)]
pub struct GraphExaminer<'g> {
    graph: &'g Graph,
}

impl<'g> GraphExaminer<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }
}

impl Examiner<GraphNodeId> for GraphExaminer<'_> {
    type Cost = FloatCost<f64>;

    #[inline(always)]
    fn is_pathable(&self, _parent: &GraphNodeId, _candidate: &GraphNodeId) -> Pathability {
        Pathability::Valid
    }

    fn score(
        &self,
        parent: &GraphNodeId,
        parent_score: Score<Self::Cost>,
        candidate: &GraphNodeId,
        destination: &GraphNodeId,
    ) -> Score<Self::Cost> {
        let at = &self.graph.node(*candidate).coords;
        let step = FloatCost::between(&self.graph.node(*parent).coords, at);
        let h = FloatCost::between(at, &self.graph.node(*destination).coords);
        Score::new(parent_score.g() + step, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Graph {
        Graph::builder()
            .node("a", Coords::new(0, 0, 0), ["b", "c"])
            .node("b", Coords::new(3, 0, 4), ["a"])
            .node("c", Coords::new(0, 0, 1), ["a", "b"])
            .build()
            .unwrap()
    }

    #[test]
    fn resolves_names() {
        let g = triangle();
        assert_eq!(g.len(), 3);
        let a = g.get("a").unwrap();
        let c = g.get("c").unwrap();
        assert_eq!(g.node(a).adjacent.as_slice(), &[GraphNodeId(1), c]);
        assert_eq!(g.node(c).name, "c");
        assert_eq!(g.get("d"), None);
    }

    #[test]
    fn every_link_is_declared() {
        let err = Graph::builder()
            .node("a", Coords::default(), ["b"])
            .node("b", Coords::default(), ["z"])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            GraphError::UndeclaredNode {
                node: "b".into(),
                adjacent: "z".into()
            }
        );

        let err = Graph::builder()
            .node("a", Coords::default(), Vec::<String>::new())
            .node("a", Coords::default(), Vec::<String>::new())
            .build()
            .unwrap_err();
        assert_eq!(err, GraphError::DuplicateNode("a".into()));
    }

    #[test]
    fn built_graphs_are_closed() {
        let g = triangle();
        for (_, n) in g.nodes() {
            assert!(n.adjacent.iter().all(|a| a.index() < g.len()));
        }
    }

    #[test]
    fn nearest() {
        let g = triangle();
        let b = g.get("b").unwrap();
        let c = g.get("c").unwrap();
        assert_eq!(g.nearest(&Coords::new(0, 0, 1), 0), Some(c));
        assert_eq!(g.nearest(&Coords::new(3, 0, 3), 2), Some(b));
        assert_eq!(g.nearest(&Coords::new(9, 9, 9), 2), None);
        // Both "a" and "c" are in range
        let a = g.get("a").unwrap();
        assert_eq!(g.nearest(&Coords::new(1, 0, 0), 5), Some(a));
        assert_eq!(
            g.nearest_matching(&Coords::new(0, 0, 0), 10, |n| n.name != "a"),
            Some(c)
        );
    }
}
