//! The two board variants and the selection rules they enforce.
//!
//! - `FreeBoard`: any face-down card may be paired with any other
//! - `AdjacencyBoard`: the second card must neighbour the first
//!
//! `Board` is the closed set of both, so the match engine never probes
//! for optional capabilities. Queries that only make sense on one variant
//! (hints, graph edges, distances) return empty results on the other.

use super::graph::AdjacencyGraph;
use super::grid::Grid;
use super::position::Position;
use crate::cards::Card;
use crate::core::GameMode;

/// Selection legality shared by every board variant.
///
/// ## Implementation Notes
///
/// - `is_first_selection_legal`: face-down and unmatched, nothing else
/// - `is_second_selection_legal`: variant-specific placement rule
///   plus the same card checks
/// - `hint`: positions a second selection may target; empty if the
///   variant places no restriction
pub trait SelectionRules {
    /// The cards on this board.
    fn grid(&self) -> &Grid;

    /// Mutable access to the cards.
    fn grid_mut(&mut self) -> &mut Grid;

    /// Placement rule for the second card of a pairing attempt.
    fn is_placement_legal(&self, first: Position, second: Position) -> bool;

    /// Positions the variant highlights after `first` was selected.
    fn hint(&self, first: Position) -> Vec<Position>;

    /// Adjacency graph, if the variant has one.
    fn graph(&self) -> Option<&AdjacencyGraph>;

    // === Convenience Methods ===

    /// Can `pos` start a pairing attempt?
    fn is_first_selection_legal(&self, pos: Position) -> bool {
        self.grid().get(pos).is_some_and(Card::is_selectable)
    }

    /// Can `second` complete a pairing attempt started at `first`?
    fn is_second_selection_legal(&self, first: Position, second: Position) -> bool {
        first != second
            && self.is_first_selection_legal(second)
            && self.is_placement_legal(first, second)
    }

    /// Shortest path in edges between two positions.
    ///
    /// `None` if either position is out of bounds, the target is
    /// unreachable, or the variant has no graph.
    fn bfs_distance(&self, from: Position, to: Position) -> Option<usize> {
        let graph = self.graph()?;
        let grid = self.grid();
        graph.bfs_distance(grid.index_of(from)?, grid.index_of(to)?)
    }

    /// Undirected graph edges as row-major index pairs.
    fn edges(&self) -> Vec<(usize, usize)> {
        self.graph().map(AdjacencyGraph::edges).unwrap_or_default()
    }
}

/// Simple mode board: no placement restriction.
#[derive(Clone, Debug)]
pub struct FreeBoard {
    grid: Grid,
}

impl FreeBoard {
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self { grid }
    }
}

impl SelectionRules for FreeBoard {
    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    fn is_placement_legal(&self, _first: Position, _second: Position) -> bool {
        true
    }

    fn hint(&self, _first: Position) -> Vec<Position> {
        Vec::new()
    }

    fn graph(&self) -> Option<&AdjacencyGraph> {
        None
    }
}

/// Hard mode board: the second card must be a 4-neighbour of the first.
#[derive(Clone, Debug)]
pub struct AdjacencyBoard {
    grid: Grid,
    graph: AdjacencyGraph,
}

impl AdjacencyBoard {
    /// Wrap a grid and derive its 4-neighbour graph.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        let graph = AdjacencyGraph::grid(grid.rows(), grid.cols());
        Self { grid, graph }
    }
}

impl SelectionRules for AdjacencyBoard {
    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    fn is_placement_legal(&self, first: Position, second: Position) -> bool {
        match (self.grid.index_of(first), self.grid.index_of(second)) {
            (Some(a), Some(b)) => self.graph.are_adjacent(a, b),
            _ => false,
        }
    }

    fn hint(&self, first: Position) -> Vec<Position> {
        self.graph.neighbor_positions(first)
    }

    fn graph(&self) -> Option<&AdjacencyGraph> {
        Some(&self.graph)
    }
}

/// A board of either variant.
#[derive(Clone, Debug)]
pub enum Board {
    Free(FreeBoard),
    Adjacency(AdjacencyBoard),
}

impl Board {
    /// Wrap a grid in the variant a mode plays on.
    #[must_use]
    pub fn for_mode(mode: GameMode, grid: Grid) -> Self {
        match mode {
            GameMode::Simple => Board::Free(FreeBoard::new(grid)),
            GameMode::Hard => Board::Adjacency(AdjacencyBoard::new(grid)),
        }
    }

    /// The mode this variant corresponds to.
    #[must_use]
    pub fn mode(&self) -> GameMode {
        match self {
            Board::Free(_) => GameMode::Simple,
            Board::Adjacency(_) => GameMode::Hard,
        }
    }

    fn rules(&self) -> &dyn SelectionRules {
        match self {
            Board::Free(b) => b,
            Board::Adjacency(b) => b,
        }
    }

    fn rules_mut(&mut self) -> &mut dyn SelectionRules {
        match self {
            Board::Free(b) => b,
            Board::Adjacency(b) => b,
        }
    }
}

impl SelectionRules for Board {
    fn grid(&self) -> &Grid {
        self.rules().grid()
    }

    fn grid_mut(&mut self) -> &mut Grid {
        self.rules_mut().grid_mut()
    }

    fn is_placement_legal(&self, first: Position, second: Position) -> bool {
        self.rules().is_placement_legal(first, second)
    }

    fn hint(&self, first: Position) -> Vec<Position> {
        self.rules().hint(first)
    }

    fn graph(&self) -> Option<&AdjacencyGraph> {
        self.rules().graph()
    }
}
