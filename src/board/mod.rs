//! Board system: grid storage, adjacency graph, and the two variants.
//!
//! ## Key Types
//!
//! - `Position`: `(row, col)` coordinate
//! - `Grid`: Cards in row-major order, dealing and reshuffling
//! - `AdjacencyGraph`: 4-neighbour graph with BFS distance
//! - `Board`: `FreeBoard` or `AdjacencyBoard` behind `SelectionRules`

pub mod graph;
pub mod grid;
pub mod position;
pub mod variants;

pub use graph::AdjacencyGraph;
pub use grid::{CardView, Grid};
pub use position::Position;
pub use variants::{AdjacencyBoard, Board, FreeBoard, SelectionRules};
