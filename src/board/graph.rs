//! Four-neighbour adjacency graph over grid cells.
//!
//! Nodes are row-major cell indices. Every cell links to its in-bounds
//! up/down/left/right neighbours, so the graph is connected for any
//! non-empty grid.

use std::collections::VecDeque;

use smallvec::SmallVec;

use super::position::Position;

/// Adjacency lists for a `rows x cols` grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdjacencyGraph {
    rows: usize,
    cols: usize,
    /// Neighbour indices per node, in up/down/left/right order.
    neighbors: Vec<SmallVec<[usize; 4]>>,
}

impl AdjacencyGraph {
    /// Build the 4-neighbour graph of a grid.
    #[must_use]
    pub fn grid(rows: usize, cols: usize) -> Self {
        let mut neighbors = Vec::with_capacity(rows * cols);

        for row in 0..rows {
            for col in 0..cols {
                let mut adj = SmallVec::new();
                if row > 0 {
                    adj.push(Position::new(row - 1, col).to_index(cols));
                }
                if row + 1 < rows {
                    adj.push(Position::new(row + 1, col).to_index(cols));
                }
                if col > 0 {
                    adj.push(Position::new(row, col - 1).to_index(cols));
                }
                if col + 1 < cols {
                    adj.push(Position::new(row, col + 1).to_index(cols));
                }
                neighbors.push(adj);
            }
        }

        Self {
            rows,
            cols,
            neighbors,
        }
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Neighbour indices of a node. Empty for unknown nodes.
    #[must_use]
    pub fn neighbors(&self, index: usize) -> &[usize] {
        match self.neighbors.get(index) {
            Some(adj) => adj,
            None => &[],
        }
    }

    /// Are `a` and `b` directly connected?
    #[must_use]
    pub fn are_adjacent(&self, a: usize, b: usize) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// Neighbour positions of a position.
    #[must_use]
    pub fn neighbor_positions(&self, pos: Position) -> Vec<Position> {
        if !pos.in_bounds(self.rows, self.cols) {
            return Vec::new();
        }
        self.neighbors(pos.to_index(self.cols))
            .iter()
            .map(|&i| Position::from_index(i, self.cols))
            .collect()
    }

    /// Shortest path length in edges from `start` to `target`.
    ///
    /// `Some(0)` when they are the same node, `None` when `target` cannot
    /// be reached (or either index is unknown).
    #[must_use]
    pub fn bfs_distance(&self, start: usize, target: usize) -> Option<usize> {
        let n = self.node_count();
        if start >= n || target >= n {
            return None;
        }
        if start == target {
            return Some(0);
        }

        let mut dist: Vec<Option<usize>> = vec![None; n];
        dist[start] = Some(0);
        let mut queue = VecDeque::from([start]);

        while let Some(u) = queue.pop_front() {
            let next = dist[u].map_or(0, |d| d + 1);
            for &v in self.neighbors(u) {
                if dist[v].is_some() {
                    continue;
                }
                if v == target {
                    return Some(next);
                }
                dist[v] = Some(next);
                queue.push_back(v);
            }
        }

        None
    }

    /// Each undirected edge once, as `(smaller, larger)`, sorted.
    #[must_use]
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges: Vec<(usize, usize)> = self
            .neighbors
            .iter()
            .enumerate()
            .flat_map(|(u, adj)| adj.iter().filter(move |&&v| u < v).map(move |&v| (u, v)))
            .collect();
        edges.sort_unstable();
        edges
    }
}
