use std::cmp::min;

use nonmax::NonMaxUsize;
use rustc_hash::FxHashMap;

use crate::cost::Cost;
use crate::node::Node;
use crate::result::PathStep;
use crate::score::Score;

const HEAP_ARITY: usize = 4usize;
#[inline(always)]
#[must_use]
fn up(i: usize) -> usize {
    crate::heap_primitives::index_parent::<HEAP_ARITY>(i)
}
#[inline(always)]
#[must_use]
fn down_left(i: usize) -> usize {
    crate::heap_primitives::index_first_children::<HEAP_ARITY>(i)
}
#[inline(always)]
#[must_use]
fn down_right(i: usize) -> usize {
    crate::heap_primitives::index_last_children::<HEAP_ARITY>(i)
}

/// A reference to a `ContainerEntry`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntryIndex(NonMaxUsize);

impl EntryIndex {
    #[inline(always)]
    fn new(i: usize) -> Self {
        match NonMaxUsize::new(i) {
            Some(i) => Self(i),
            None => unreachable!("NodeContainer can't hold usize::MAX entries"),
        }
    }
    #[inline(always)]
    fn get(&self) -> usize {
        self.0.get()
    }
}

/// The bookkeeping of a node for the duration of one search.
///
/// `parent` and `score` only change while the node is open.
#[derive(Debug)]
#[cfg_attr(feature = "inspect", derive(Clone))]
pub struct ContainerEntry<N, C>
where
    N: Node,
    C: Cost,
{
    pub(crate) node: N,
    pub(crate) parent: Option<EntryIndex>,
    pub(crate) score: Score<C>,
    /// Position in `NodeContainer::open`. Stale once closed.
    pub(crate) heap_index: usize,
    pub(crate) closed: bool,
}

/// An entry in the open heap.
///
/// Ranked by score, and then by node to make the order total.
#[derive(Debug)]
#[cfg_attr(feature = "inspect", derive(Clone))]
pub struct OpenEntry<N, C>
where
    N: Node,
    C: Cost,
{
    pub rank: (Score<C>, N),
    pub entry: EntryIndex,
}

impl<N: Node, C: Cost> PartialEq for OpenEntry<N, C> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.rank.eq(&other.rank)
    }
}
impl<N: Node, C: Cost> Eq for OpenEntry<N, C> {}

impl<N: Node, C: Cost> PartialOrd for OpenEntry<N, C> {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl<N: Node, C: Cost> Ord for OpenEntry<N, C> {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank.cmp(&other.rank)
    }
}

/// What `NodeContainer::open` did with a candidate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Opened {
    /// The node was new.
    Inserted,
    /// The node was open and got a cheaper parent.
    Improved,
    /// The node was open through a path that's as cheap or cheaper.
    Kept,
    /// The node was already closed.
    Closed,
}

/// The open and closed sets of a best-first search.
#[derive(Debug)]
#[cfg_attr(feature = "inspect", derive(Clone))]
pub struct NodeContainer<N, C>
where
    N: Node,
    C: Cost,
{
    /// Every node seen in this search. Parent links are indices into this
    /// list, so they naturally form a tree rooted at the start.
    entries: Vec<ContainerEntry<N, C>>,

    /// An intrusive heap of `OpenEntry` that keeps the referenced entry
    /// updated (`ContainerEntry::heap_index`), so improving a node doesn't
    /// need a linear search for it.
    ///
    /// ```pseudocode
    /// for (i, o) in self.open.enumerate():
    ///   assert_eq(self.entries[o.entry].heap_index, i)
    /// ```
    open: Vec<OpenEntry<N, C>>,

    /// Finds entries from their node.
    index: FxHashMap<N, EntryIndex>,
}

impl<N, C> NodeContainer<N, C>
where
    N: Node,
    C: Cost,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: vec![],
            open: vec![],
            index: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut index = FxHashMap::default();
        index.reserve(capacity);
        Self {
            entries: Vec::with_capacity(capacity),
            open: Vec::with_capacity(capacity),
            index,
        }
    }

    pub fn reset(&mut self) {
        self.entries.clear();
        self.open.clear();
        self.index.clear();
    }

    /// Opens `node` via `parent` with the given `score`.
    ///
    /// `parent` is `None` only for the start of a search, it must otherwise
    /// have been opened in this same container.
    pub fn open(&mut self, parent: Option<N>, node: N, score: Score<C>) -> Opened {
        #[cfg(feature = "coz_profile")]
        coz::scope!("Open");

        let parent_index = parent.map(|p| match self.index.get(&p) {
            Some(i) => *i,
            None => panic!("Parent {p:?} of {node:?} belongs to another search"),
        });

        match self.index.get(&node) {
            Some(entry_index) => {
                let entry = &mut self.entries[entry_index.get()];
                if entry.closed {
                    return Opened::Closed;
                }
                if !score.improves_on(&entry.score) {
                    return Opened::Kept;
                }

                // Found better path to an open node
                entry.parent = parent_index;
                entry.score = score;
                let heap_index = entry.heap_index;
                self.open[heap_index].rank.0 = score;
                let heap_index = self.sift_up(heap_index);
                self.sift_down(heap_index);

                self.verify_heap();
                Opened::Improved
            }
            None => {
                self.push_new(parent_index, node, score);
                Opened::Inserted
            }
        }
    }

    /// Closes the best open node and returns it.
    pub fn close_best(&mut self) -> Option<N> {
        let top = self.pop()?;
        let entry = &mut self.entries[top.entry.get()];
        debug_assert!(!entry.closed);
        entry.closed = true;
        Some(entry.node)
    }

    #[inline(always)]
    #[must_use]
    pub fn contains(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }
    #[inline(always)]
    #[must_use]
    pub fn is_open(&self, node: &N) -> bool {
        self.entry(node).is_some_and(|e| !e.closed)
    }
    #[inline(always)]
    #[must_use]
    pub fn is_closed(&self, node: &N) -> bool {
        self.entry(node).is_some_and(|e| e.closed)
    }

    #[must_use]
    pub fn score_of(&self, node: &N) -> Option<Score<C>> {
        self.entry(node).map(|e| e.score)
    }

    #[must_use]
    pub fn parent_of(&self, node: &N) -> Option<N> {
        let parent = self.entry(node)?.parent?;
        Some(self.entries[parent.get()].node)
    }

    /// Number of nodes ever opened.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    #[inline(always)]
    #[must_use]
    pub fn open_len(&self) -> usize {
        self.open.len()
    }
    #[inline(always)]
    #[must_use]
    pub fn closed_len(&self) -> usize {
        self.entries.len() - self.open.len()
    }

    /// Walks the parent links from `node` back to the root.
    ///
    /// Steps are returned root first.
    #[must_use]
    pub fn path_to(&self, node: &N) -> Vec<PathStep<N, C>> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("PathReconstruction");

        let mut path = vec![];
        let mut next = self.index.get(node).copied();
        while let Some(entry_index) = next {
            let entry = &self.entries[entry_index.get()];
            debug_assert!(entry.parent != Some(entry_index));
            path.push(PathStep {
                node: entry.node,
                parent: entry.parent.map(|p| self.entries[p.get()].node),
                score: entry.score,
            });
            next = entry.parent;
        }
        path.reverse();
        path
    }

    #[inline(always)]
    fn entry(&self, node: &N) -> Option<&ContainerEntry<N, C>> {
        self.index.get(node).map(|i| &self.entries[i.get()])
    }

    fn push_new(&mut self, parent: Option<EntryIndex>, node: N, score: Score<C>) {
        self.verify_heap();

        let heap_index = self.open.len(); // Future heap_index
        let entry = EntryIndex::new(self.entries.len());
        self.entries.push(ContainerEntry {
            node,
            parent,
            score,
            heap_index,
            closed: false,
        });
        self.index.insert(node, entry);
        self.open.push(OpenEntry {
            rank: (score, node),
            entry,
        });
        self.sift_up(heap_index);

        self.verify_heap();
    }

    fn pop(&mut self) -> Option<OpenEntry<N, C>> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("Pop");

        self.verify_heap();
        let len = self.open.len();
        if len <= 1 {
            return self.open.pop();
        }

        self.swap(0, len - 1);
        let top = self.open.pop();
        self.sift_down(0);

        self.verify_heap();
        top
    }

    /// Raises a heap entry
    /// Returns its new index
    #[inline(always)]
    fn sift_up(&mut self, mut index: usize) -> usize {
        debug_assert!(index < self.open.len(), "Index out of bounds");
        while index > 0 {
            let parent = up(index);
            if self.open[parent] <= self.open[index] {
                break;
            }
            self.swap(parent, index);
            index = parent;
        }
        index
    }

    /// Lowers a heap entry
    /// Returns its new index
    #[inline(always)]
    fn sift_down(&mut self, mut index: usize) -> usize {
        let len = self.open.len();
        loop {
            let mut child = down_left(index);
            if child >= len {
                break;
            }
            child += crate::heap_primitives::index_min(
                &self.open[child..min(down_right(index) + 1, len)],
            );
            if self.open[index] <= self.open[child] {
                break;
            }
            self.swap(index, child);
            index = child;
        }
        index
    }

    /// Swaps two heap entries, keeping the intrusive indices in sync.
    #[inline(always)]
    fn swap(&mut self, l: usize, r: usize) {
        self.open.swap(l, r);
        self.entries[self.open[l].entry.get()].heap_index = l;
        self.entries[self.open[r].entry.get()].heap_index = r;
    }

    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    pub(crate) fn verify_heap(&self) {
        // All good... (hopefully)
    }
    #[inline(always)]
    #[cfg(feature = "verify")]
    pub(crate) fn verify_heap(&self) {
        for (i, o) in self.open.iter().enumerate() {
            let entry = &self.entries[o.entry.get()];
            assert_eq!(entry.heap_index, i);
            assert!(!entry.closed, "Closed node {:?} is still open", entry.node);
            assert_eq!(o.rank.0, entry.score);
            if i == 0 {
                continue;
            }
            let p = up(i);
            assert!(
                self.open[p] <= self.open[i],
                "Open[{p}]={:?} !<= child [{i}]={:?}. Out of heap of len={}",
                self.open[p],
                self.open[i],
                self.open.len(),
            );
        }
        assert_eq!(self.index.len(), self.entries.len());
    }

    pub fn write_memory_stats<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        use size::Size;
        use std::mem::size_of;
        use thousands::Separable;

        writeln!(out, "NodeContainer Stats:")?;
        let s = size_of::<ContainerEntry<N, C>>();
        let l = self.entries.len();
        writeln!(
            out,
            "  - |Nodes|:   {} ({})",
            l.separate_with_commas(),
            Size::from_bytes(l * s)
        )?;

        let s = size_of::<OpenEntry<N, C>>();
        let l = self.open.len();
        let c = self.open.capacity();
        writeln!(
            out,
            "  - |Open|:    {} ({})",
            l.separate_with_commas(),
            Size::from_bytes(l * s)
        )?;
        writeln!(
            out,
            "  - |Open|*:   {} ({})",
            c.separate_with_commas(),
            Size::from_bytes(c * s)
        )?;

        let s = size_of::<(N, EntryIndex)>();
        let l = self.index.len();
        let c = self.index.capacity();
        writeln!(
            out,
            "  - |Index|:   {} ({})",
            l.separate_with_commas(),
            Size::from_bytes(l * s)
        )?;
        writeln!(
            out,
            "  - |Index|*:  {} ({})",
            c.separate_with_commas(),
            Size::from_bytes(c * s)
        )?;
        writeln!(
            out,
            "  - Closed nodes: {}",
            self.closed_len().separate_with_commas()
        )?;

        Ok(())
    }
}

impl<N, C> Default for NodeContainer<N, C>
where
    N: Node,
    C: Cost,
{
    fn default() -> Self {
        Self::new()
    }
}
