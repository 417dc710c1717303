//! Single-source shortest paths over a [`SentinelHeap`] open set
//!
//! The heap has no `decrease_key`, so a node whose distance improves is
//! enqueued again and the outdated entry is dropped when it surfaces. The
//! open set therefore holds up to one entry per relaxation, and `capacity`
//! has to be sized for that rather than for the node count. The heap is
//! allocated once at that size, so there is no default: pick it from the
//! graph.
//!
//! ```rust
//! use sentinel_heap::search::dijkstra;
//!
//! let edges: Vec<Vec<(usize, u32)>> = vec![vec![(1, 4), (2, 1)], vec![], vec![(1, 2)]];
//! let paths = dijkstra(0usize, 8, |&n| edges[n].clone())?;
//! assert_eq!(paths.distance(&1), Some(3));
//! assert_eq!(paths.path_to(&1), Some(vec![0, 2, 1]));
//! # Ok::<(), sentinel_heap::HeapError>(())
//! ```

use crate::bounds::SentinelKey;
use crate::error::HeapError;
use crate::sentinel::SentinelHeap;
use rustc_hash::FxHashMap;
use std::hash::Hash;
use std::ops::Add;

/// Settled distances and predecessors from one search
#[derive(Debug, Clone)]
pub struct ShortestPaths<N, C> {
    nodes: Vec<N>,
    index: FxHashMap<N, usize>,
    dist: Vec<Option<C>>,
    pred: Vec<Option<usize>>,
}

impl<N: Clone + Eq + Hash, C: Copy> ShortestPaths<N, C> {
    /// Cost of the cheapest path from the start, `None` if unreachable
    pub fn distance(&self, node: &N) -> Option<C> {
        self.index.get(node).and_then(|&i| self.dist[i])
    }

    /// Nodes on the cheapest path from the start to `node`, both ends included
    pub fn path_to(&self, node: &N) -> Option<Vec<N>> {
        let mut current = *self.index.get(node)?;
        let mut path = vec![self.nodes[current].clone()];
        while let Some(prev) = self.pred[current] {
            path.push(self.nodes[prev].clone());
            current = prev;
        }
        path.reverse();
        Some(path)
    }

    /// Number of nodes reached
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn intern(&mut self, node: N) -> usize {
        if let Some(&i) = self.index.get(&node) {
            return i;
        }
        let i = self.nodes.len();
        self.index.insert(node.clone(), i);
        self.nodes.push(node);
        self.dist.push(None);
        self.pred.push(None);
        i
    }
}

/// Runs Dijkstra's algorithm from `start` until every reachable node is
/// settled.
///
/// `successors` yields `(neighbor, edge_cost)` pairs; costs must not be
/// negative and no path cost may exceed `C::SUPREMUM`.
///
/// # Errors
///
/// Returns [`HeapError::Full`] if more than `capacity` entries are pending at
/// once.
pub fn dijkstra<N, C, F, I>(
    start: N,
    capacity: usize,
    mut successors: F,
) -> Result<ShortestPaths<N, C>, HeapError>
where
    N: Clone + Eq + Hash,
    C: SentinelKey + Add<Output = C> + Default,
    F: FnMut(&N) -> I,
    I: IntoIterator<Item = (N, C)>,
{
    let mut open: SentinelHeap<C, usize> = SentinelHeap::with_capacity(capacity);
    let mut paths = ShortestPaths {
        nodes: Vec::new(),
        index: FxHashMap::default(),
        dist: Vec::new(),
        pred: Vec::new(),
    };
    let mut settled: Vec<bool> = Vec::new();

    let source = paths.intern(start);
    paths.dist[source] = Some(C::default());
    open.try_enqueue(source, C::default())?;

    while let Some((d, current)) = open.dequeue_entry() {
        settled.resize(paths.len(), false);
        if settled[current] || paths.dist[current].is_some_and(|best| d > best) {
            continue;
        }
        settled[current] = true;

        let node = paths.nodes[current].clone();
        for (next, cost) in successors(&node) {
            let j = paths.intern(next);
            let candidate = d + cost;
            if settled.get(j).copied().unwrap_or(false)
                || paths.dist[j].is_some_and(|best| candidate >= best)
            {
                continue;
            }
            paths.dist[j] = Some(candidate);
            paths.pred[j] = Some(current);
            open.try_enqueue(j, candidate).inspect_err(|_| {
                tracing::warn!(capacity, reached = paths.nodes.len(), "search open set is full");
            })?;
        }
    }

    tracing::debug!(reached = paths.len(), "search settled every reachable node");
    Ok(paths)
}
