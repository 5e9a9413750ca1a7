//! Card storage shared by both board variants.
//!
//! `Grid` owns the cards in row-major order and knows how to deal a fresh,
//! uniformly shuffled layout. It also keeps a pattern index so every
//! position holding a given label can be found without scanning.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::position::Position;
use crate::cards::{pattern, Card, PatternId, WILDCARD_LABEL};
use crate::core::{GameRng, Result, SessionError};

/// Renderable snapshot of one card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub id: PatternId,
    pub is_flipped: bool,
    pub is_matched: bool,
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id().clone(),
            is_flipped: card.is_flipped(),
            is_matched: card.is_matched(),
        }
    }
}

/// Cards placed on a `rows x cols` grid.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Row-major.
    cards: Vec<Card>,
    /// Pattern label -> indices holding it. Usually two entries.
    finder: FxHashMap<PatternId, SmallVec<[usize; 2]>>,
}

impl Grid {
    /// Deal a new shuffled layout.
    ///
    /// Builds `total / 2` pairs from `patterns` (see [`pattern::resolve`]),
    /// adds a wildcard when `total` is odd and `allow_wildcard` is set,
    /// shuffles the whole multiset and places it in row-major order.
    pub fn deal(
        rows: usize,
        cols: usize,
        patterns: Option<&[PatternId]>,
        score_weight: u32,
        allow_wildcard: bool,
        rng: &mut GameRng,
    ) -> Result<Self> {
        let total = Self::checked_total(rows, cols, allow_wildcard)?;
        let needed = total / 2;

        let mut cards = Vec::with_capacity(total);
        for label in pattern::resolve(patterns, needed) {
            cards.push(Card::new(label.clone(), score_weight));
            cards.push(Card::new(label, score_weight));
        }
        if total % 2 == 1 {
            cards.push(Card::wildcard());
        }

        rng.shuffle(&mut cards);

        Ok(Self::from_cards(rows, cols, cards))
    }

    /// Place an explicit row-major layout without shuffling.
    ///
    /// A `*` label becomes the wildcard. Used for replays and tests that
    /// need a known arrangement. The layout must be dealable: every label
    /// an even number of times, and one wildcard exactly when the total is
    /// odd (which in turn needs `allow_wildcard`).
    pub fn from_layout(
        rows: usize,
        cols: usize,
        layout: &[PatternId],
        score_weight: u32,
        allow_wildcard: bool,
    ) -> Result<Self> {
        let total = Self::checked_total(rows, cols, allow_wildcard)?;
        if layout.len() != total {
            return Err(SessionError::LayoutMismatch {
                expected: total,
                actual: layout.len(),
            });
        }

        let mut counts: FxHashMap<&PatternId, usize> = FxHashMap::default();
        for id in layout {
            *counts.entry(id).or_insert(0) += 1;
        }

        let wildcards = layout
            .iter()
            .filter(|id| id.as_str() == WILDCARD_LABEL)
            .count();
        if wildcards != total % 2 {
            return Err(SessionError::WildcardCount {
                expected: total % 2,
                actual: wildcards,
            });
        }

        // First offending label in layout order, so the error is stable
        if let Some(unpaired) = layout
            .iter()
            .find(|id| id.as_str() != WILDCARD_LABEL && counts.get(id).is_some_and(|n| n % 2 == 1))
        {
            return Err(SessionError::UnpairedLabel(unpaired.clone()));
        }

        let cards = layout
            .iter()
            .map(|id| {
                if id.as_str() == WILDCARD_LABEL {
                    Card::wildcard()
                } else {
                    Card::new(id.clone(), score_weight)
                }
            })
            .collect();

        Ok(Self::from_cards(rows, cols, cards))
    }

    fn checked_total(rows: usize, cols: usize, allow_wildcard: bool) -> Result<usize> {
        let total = rows
            .checked_mul(cols)
            .ok_or(SessionError::InvalidGridSize { rows, cols })?;
        if total == 0 || (total % 2 == 1 && !allow_wildcard) {
            return Err(SessionError::InvalidGridSize { rows, cols });
        }
        Ok(total)
    }

    fn from_cards(rows: usize, cols: usize, cards: Vec<Card>) -> Self {
        let mut grid = Self {
            rows,
            cols,
            cards,
            finder: FxHashMap::default(),
        };
        grid.rebuild_finder();
        grid
    }

    fn rebuild_finder(&mut self) {
        self.finder.clear();
        for (index, card) in self.cards.iter().enumerate() {
            if card.is_wildcard() {
                continue;
            }
            self.finder.entry(card.id().clone()).or_default().push(index);
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Row-major index of an in-bounds position.
    #[must_use]
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        pos.in_bounds(self.rows, self.cols)
            .then(|| pos.to_index(self.cols))
    }

    /// Position of a row-major index.
    #[must_use]
    pub fn position_of(&self, index: usize) -> Position {
        Position::from_index(index, self.cols)
    }

    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&Card> {
        self.index_of(pos).map(|i| &self.cards[i])
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Card> {
        let index = self.index_of(pos)?;
        self.cards.get_mut(index)
    }

    #[must_use]
    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn card_mut(&mut self, index: usize) -> Option<&mut Card> {
        self.cards.get_mut(index)
    }

    /// All cards in row-major order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Every position currently holding `id`.
    #[must_use]
    pub fn positions_of(&self, id: &PatternId) -> Vec<Position> {
        self.finder
            .get(id)
            .map(|indices| indices.iter().map(|&i| self.position_of(i)).collect())
            .unwrap_or_default()
    }

    /// Indices of cards that are not yet matched.
    #[must_use]
    pub fn unmatched_indices(&self) -> Vec<usize> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, card)| !card.is_matched())
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of cards that can be turned face up.
    #[must_use]
    pub fn selectable_indices(&self) -> Vec<usize> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, card)| card.is_selectable())
            .map(|(i, _)| i)
            .collect()
    }

    /// Turn every face-up, unmatched card face down. Returns how many moved.
    pub fn hide_unmatched(&mut self) -> usize {
        let mut hidden = 0;
        for card in &mut self.cards {
            if card.is_flipped() && !card.is_matched() {
                card.hide();
                hidden += 1;
            }
        }
        hidden
    }

    /// Permute the unmatched cards among their own positions.
    ///
    /// Matched cards keep their positions; the multiset of labels is
    /// unchanged. Unmatched cards are left face down.
    pub fn shuffle_unmatched(&mut self, rng: &mut GameRng) {
        let unmatched = self.unmatched_indices();
        for &i in &unmatched {
            self.cards[i].hide();
        }
        rng.shuffle_subset(&mut self.cards, &unmatched);
        self.rebuild_finder();
    }

    /// Every non-wildcard card is matched.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.cards
            .iter()
            .filter(|card| !card.is_wildcard())
            .all(Card::is_matched)
    }

    /// Face down and unmatched everywhere, layout kept.
    pub fn reset(&mut self) {
        for card in &mut self.cards {
            card.reset();
        }
    }

    /// Row-major snapshot for rendering.
    #[must_use]
    pub fn views(&self) -> Vec<CardView> {
        self.cards.iter().map(CardView::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(labels: &[&str]) -> Vec<PatternId> {
        labels.iter().map(|&l| PatternId::from(l)).collect()
    }

    fn label_counts(grid: &Grid) -> FxHashMap<PatternId, usize> {
        let mut counts = FxHashMap::default();
        for card in grid.cards() {
            *counts.entry(card.id().clone()).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_deal_even_grid() {
        let mut rng = GameRng::new(42);
        let grid = Grid::deal(4, 4, None, 10, true, &mut rng).unwrap();

        assert_eq!(grid.len(), 16);
        let counts = label_counts(&grid);
        assert_eq!(counts.len(), 8);
        assert!(counts.values().all(|&n| n == 2));
        assert!(grid.cards().all(|c| !c.is_wildcard() && c.score_weight() == 10));
    }

    #[test]
    fn test_deal_odd_grid_adds_wildcard() {
        let mut rng = GameRng::new(42);
        let grid = Grid::deal(7, 7, None, 10, true, &mut rng).unwrap();

        assert_eq!(grid.len(), 49);
        assert_eq!(grid.cards().filter(|c| c.is_wildcard()).count(), 1);
        assert_eq!(label_counts(&grid).len(), 25);
    }

    #[test]
    fn test_deal_rejects_bad_sizes() {
        let mut rng = GameRng::new(1);
        assert_eq!(
            Grid::deal(3, 3, None, 10, false, &mut rng).unwrap_err(),
            SessionError::InvalidGridSize { rows: 3, cols: 3 }
        );
        assert!(Grid::deal(0, 4, None, 10, true, &mut rng).is_err());
        assert!(Grid::deal(4, 0, None, 10, true, &mut rng).is_err());
    }

    #[test]
    fn test_deal_is_deterministic() {
        let a = Grid::deal(4, 4, None, 10, true, &mut GameRng::new(9)).unwrap();
        let b = Grid::deal(4, 4, None, 10, true, &mut GameRng::new(9)).unwrap();
        assert_eq!(a.views(), b.views());
    }

    #[test]
    fn test_from_layout() {
        let grid = Grid::from_layout(2, 2, &ids(&["A", "B", "B", "A"]), 5, true).unwrap();
        assert_eq!(grid.get(Position::new(1, 1)).unwrap().id().as_str(), "A");
        assert_eq!(
            grid.positions_of(&"B".into()),
            vec![Position::new(0, 1), Position::new(1, 0)]
        );

        let err = Grid::from_layout(2, 2, &ids(&["A", "A"]), 5, true).unwrap_err();
        assert_eq!(err, SessionError::LayoutMismatch { expected: 4, actual: 2 });
    }

    #[test]
    fn test_from_layout_wildcard() {
        let grid = Grid::from_layout(1, 3, &ids(&["A", "*", "A"]), 5, true).unwrap();
        assert!(grid.card(1).unwrap().is_wildcard());
        assert!(grid.positions_of(&"*".into()).is_empty());
    }

    #[test]
    fn test_from_layout_respects_wildcard_policy() {
        assert_eq!(
            Grid::from_layout(1, 3, &ids(&["A", "*", "A"]), 5, false).unwrap_err(),
            SessionError::InvalidGridSize { rows: 1, cols: 3 }
        );
        assert!(Grid::from_layout(2, 2, &ids(&["A", "B", "B", "A"]), 5, false).is_ok());
    }

    #[test]
    fn test_from_layout_rejects_bad_wildcards() {
        assert_eq!(
            Grid::from_layout(1, 3, &ids(&["*", "*", "*"]), 5, true).unwrap_err(),
            SessionError::WildcardCount { expected: 1, actual: 3 }
        );
        assert_eq!(
            Grid::from_layout(2, 2, &ids(&["A", "*", "*", "A"]), 5, true).unwrap_err(),
            SessionError::WildcardCount { expected: 0, actual: 2 }
        );
        assert_eq!(
            Grid::from_layout(1, 3, &ids(&["A", "A", "A"]), 5, true).unwrap_err(),
            SessionError::WildcardCount { expected: 1, actual: 0 }
        );
    }

    #[test]
    fn test_from_layout_rejects_unpaired_labels() {
        assert_eq!(
            Grid::from_layout(2, 2, &ids(&["A", "B", "C", "A"]), 5, true).unwrap_err(),
            SessionError::UnpairedLabel("B".into())
        );
        assert_eq!(
            Grid::from_layout(2, 3, &ids(&["A", "A", "A", "B", "B", "C"]), 5, true).unwrap_err(),
            SessionError::UnpairedLabel("A".into())
        );
        // A label may appear on four cards, as a cycled pattern list deals
        assert!(Grid::from_layout(2, 2, &ids(&["A", "A", "A", "A"]), 5, true).is_ok());
    }

    #[test]
    fn test_out_of_bounds_lookup() {
        let grid = Grid::from_layout(2, 2, &ids(&["A", "B", "B", "A"]), 5, true).unwrap();
        assert!(grid.get(Position::new(2, 0)).is_none());
        assert!(grid.get(Position::new(0, 2)).is_none());
        assert_eq!(grid.index_of(Position::new(1, 0)), Some(2));
    }

    #[test]
    fn test_hide_unmatched_keeps_matched() {
        let mut grid = Grid::from_layout(2, 2, &ids(&["A", "B", "B", "A"]), 5, true).unwrap();
        grid.card_mut(0).unwrap().set_matched();
        grid.card_mut(3).unwrap().set_matched();
        grid.card_mut(1).unwrap().flip(0);

        assert_eq!(grid.hide_unmatched(), 1);
        assert!(grid.card(0).unwrap().is_flipped());
        assert!(!grid.card(1).unwrap().is_flipped());
        assert_eq!(grid.hide_unmatched(), 0);
    }

    #[test]
    fn test_shuffle_unmatched_preserves_matched_and_multiset() {
        let mut rng = GameRng::new(42);
        let mut grid = Grid::deal(6, 6, None, 10, true, &mut rng).unwrap();

        // Retire the pair holding "A"
        let a_positions = grid.positions_of(&"A".into());
        for &pos in &a_positions {
            grid.get_mut(pos).unwrap().set_matched();
        }
        let before = label_counts(&grid);

        grid.shuffle_unmatched(&mut rng);

        assert_eq!(label_counts(&grid), before);
        for &pos in &a_positions {
            let card = grid.get(pos).unwrap();
            assert!(card.is_matched());
            assert_eq!(card.id().as_str(), "A");
        }
        assert!(grid.cards().filter(|c| !c.is_matched()).all(|c| !c.is_flipped()));
    }

    #[test]
    fn test_shuffle_unmatched_updates_finder() {
        let mut rng = GameRng::new(5);
        let mut grid = Grid::deal(4, 4, None, 10, true, &mut rng).unwrap();
        grid.shuffle_unmatched(&mut rng);

        for label in pattern::generate(8) {
            for pos in grid.positions_of(&label) {
                assert_eq!(grid.get(pos).unwrap().id(), &label);
            }
        }
    }

    #[test]
    fn test_is_completed_ignores_wildcard() {
        let mut grid = Grid::from_layout(1, 3, &ids(&["A", "*", "A"]), 5, true).unwrap();
        assert!(!grid.is_completed());

        grid.card_mut(0).unwrap().set_matched();
        grid.card_mut(2).unwrap().set_matched();
        assert!(grid.is_completed());

        grid.reset();
        assert!(!grid.is_completed());
        assert!(grid.cards().all(Card::is_selectable));
    }
}
