//! Simple undirected graphs and the connectivity oracle.
//!
//! [`SimpleGraph`] is the ambient graph Γ; [`Subgraph`] is a read-only
//! induced view on a vertex subset, the only shape the rewriting engine
//! ever queries. All queries are pure and deterministic: breadth-first
//! traversals visit neighbors in ascending label order, so tie-breaks
//! among equal-length shortest paths are stable across runs.
//!
//! # Citations
//! - BFS and shortest paths: Cormen et al., "Introduction to Algorithms",
//!   Section 22.2 (2009)

use crate::core::{AmbientSet, Vertex};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

/// Error type for connectivity queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    /// A query endpoint is not a vertex of the (sub)graph.
    UnknownVertex(Vertex),
    /// A shortest-path query between vertices in different components.
    Disconnected(Vertex, Vertex),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::UnknownVertex(v) => write!(f, "unknown vertex {}", v),
            GraphError::Disconnected(i, j) => {
                write!(f, "vertices {} and {} are in different components", i, j)
            }
        }
    }
}

impl std::error::Error for GraphError {}

/// A finite simple undirected graph.
///
/// Stored as an adjacency map. Self-loops are ignored and parallel edges
/// collapse, so the graph is simple by construction. The graph grows
/// monotonically; induced subgraphs are derived views that never mutate
/// the parent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimpleGraph {
    adjacency: HashMap<Vertex, HashSet<Vertex>>,
}

impl SimpleGraph {
    /// Creates an empty graph.
    #[inline]
    pub fn new() -> Self {
        Self {
            adjacency: HashMap::new(),
        }
    }

    /// The cycle graph on vertices `1..=m`.
    ///
    /// The polygon use case: edges `1-2, 2-3, …, (m-1)-m, m-1`.
    pub fn cycle(m: u32) -> Self {
        let mut graph = Self::new();
        if m == 0 {
            return graph;
        }
        for k in 1..=m {
            let next = if k == m { 1 } else { k + 1 };
            graph.add_edge(Vertex::new(k), Vertex::new(next));
        }
        graph
    }

    /// Adds an isolated vertex; a no-op if it already exists.
    pub fn add_vertex(&mut self, v: Vertex) {
        self.adjacency.entry(v).or_default();
    }

    /// Adds an undirected edge, inserting both endpoints.
    ///
    /// Self-loops are ignored.
    pub fn add_edge(&mut self, a: Vertex, b: Vertex) {
        if a == b {
            return;
        }
        self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
    }

    /// Whether `v` is a vertex of the graph.
    #[inline]
    pub fn contains(&self, v: Vertex) -> bool {
        self.adjacency.contains_key(&v)
    }

    /// Whether `a` and `b` are joined by an edge.
    #[inline]
    pub fn has_edge(&self, a: Vertex, b: Vertex) -> bool {
        self.adjacency
            .get(&a)
            .map(|nbrs| nbrs.contains(&b))
            .unwrap_or(false)
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// All vertices in ascending label order.
    pub fn vertices_sorted(&self) -> Vec<Vertex> {
        let mut vertices: Vec<Vertex> = self.adjacency.keys().copied().collect();
        vertices.sort();
        vertices
    }

    /// Neighbors of `v` in ascending label order.
    pub fn neighbors_sorted(&self, v: Vertex) -> Vec<Vertex> {
        let mut neighbors: Vec<Vertex> = self
            .adjacency
            .get(&v)
            .map(|nbrs| nbrs.iter().copied().collect())
            .unwrap_or_default();
        neighbors.sort();
        neighbors
    }

    /// The induced subgraph view on `allowed`, edges inherited.
    ///
    /// Vertices of `allowed` absent from the graph are simply not part of
    /// the view.
    pub fn induced(&self, allowed: AmbientSet) -> Subgraph<'_> {
        Subgraph {
            graph: self,
            allowed,
        }
    }

    /// The whole graph as a view.
    pub fn full_view(&self) -> Subgraph<'_> {
        self.induced(self.vertices_sorted().into_iter().collect())
    }
}

/// A read-only induced subgraph view.
///
/// Holds a reference to the parent graph and the allowed vertex subset;
/// every query filters through both. Views are cheap to narrow and never
/// outlive or mutate the parent.
#[derive(Debug, Clone)]
pub struct Subgraph<'a> {
    graph: &'a SimpleGraph,
    allowed: AmbientSet,
}

impl<'a> Subgraph<'a> {
    /// Narrows the view to `allowed ∩ current`.
    pub fn restrict(&self, allowed: &AmbientSet) -> Subgraph<'a> {
        let narrowed = allowed
            .iter()
            .filter(|&v| self.allowed.contains(v))
            .collect();
        Subgraph {
            graph: self.graph,
            allowed: narrowed,
        }
    }

    /// Whether `v` is a vertex of the view.
    #[inline]
    pub fn contains(&self, v: Vertex) -> bool {
        self.allowed.contains(v) && self.graph.contains(v)
    }

    /// Whether `a` and `b` are joined by an edge inside the view.
    #[inline]
    pub fn has_edge(&self, a: Vertex, b: Vertex) -> bool {
        self.allowed.contains(a) && self.allowed.contains(b) && self.graph.has_edge(a, b)
    }

    /// Neighbors of `v` inside the view, in ascending label order.
    pub fn neighbors_sorted(&self, v: Vertex) -> Vec<Vertex> {
        if !self.allowed.contains(v) {
            return Vec::new();
        }
        self.graph
            .neighbors_sorted(v)
            .into_iter()
            .filter(|&u| self.allowed.contains(u))
            .collect()
    }

    /// True iff `i` and `j` lie in the same connected component.
    pub fn same_component(&self, i: Vertex, j: Vertex) -> bool {
        self.component_of(i).contains(&j)
    }

    /// The minimum-labelled vertex of `i`'s connected component.
    pub fn min_in_component(&self, i: Vertex) -> Result<Vertex, GraphError> {
        if !self.contains(i) {
            return Err(GraphError::UnknownVertex(i));
        }
        let component = self.component_of(i);
        let min = component
            .into_iter()
            .min()
            .expect("component contains at least its start vertex");
        Ok(min)
    }

    /// The second vertex on a shortest path from `i` to `j`.
    ///
    /// BFS explores sorted neighbors, so among multiple geodesics one is
    /// chosen deterministically; any geodesic neighbor is acceptable to
    /// the rewriting identity. Requires `i != j` and both in the same
    /// component; fails with [`GraphError::Disconnected`] otherwise.
    pub fn first_step(&self, i: Vertex, j: Vertex) -> Result<Vertex, GraphError> {
        if !self.contains(i) {
            return Err(GraphError::UnknownVertex(i));
        }
        if !self.contains(j) {
            return Err(GraphError::UnknownVertex(j));
        }
        debug_assert_ne!(i, j, "no first step from a vertex to itself");

        // BFS from i, recording parents, until j is reached.
        let mut parent: HashMap<Vertex, Vertex> = HashMap::new();
        let mut visited: HashSet<Vertex> = HashSet::from([i]);
        let mut queue: VecDeque<Vertex> = VecDeque::from([i]);
        while let Some(v) = queue.pop_front() {
            for u in self.neighbors_sorted(v) {
                if visited.insert(u) {
                    parent.insert(u, v);
                    if u == j {
                        return Ok(self.walk_back_to_first_step(i, j, &parent));
                    }
                    queue.push_back(u);
                }
            }
        }
        Err(GraphError::Disconnected(i, j))
    }

    /// Walks the BFS parent chain from `j` back to the neighbor of `i`.
    fn walk_back_to_first_step(
        &self,
        i: Vertex,
        j: Vertex,
        parent: &HashMap<Vertex, Vertex>,
    ) -> Vertex {
        let mut step = j;
        while let Some(&prev) = parent.get(&step) {
            if prev == i {
                return step;
            }
            step = prev;
        }
        step
    }

    /// The connected component of `start`, as a set.
    fn component_of(&self, start: Vertex) -> HashSet<Vertex> {
        let mut visited: HashSet<Vertex> = HashSet::new();
        if !self.contains(start) {
            return visited;
        }
        visited.insert(start);
        let mut queue: VecDeque<Vertex> = VecDeque::from([start]);
        while let Some(v) = queue.pop_front() {
            for u in self.neighbors_sorted(v) {
                if visited.insert(u) {
                    queue.push_back(u);
                }
            }
        }
        visited
    }
}
