//! The match engine.
//!
//! A `Session` owns one board and drives the selection -> evaluation ->
//! reset cycle. It consults the session clock before accepting a move,
//! the board for legality, and the anti-stall controller on every
//! evaluation. Items modify the clock, the anti-stall window, or the board.
//!
//! ## Timing
//!
//! The engine never waits. After a mismatch both cards stay face up; the
//! caller waits `reveal_duration_ms()` and then calls `hide_all_flipped()`,
//! which is idempotent and safe to call at any time.
//!
//! ## Example
//!
//! ```
//! use memory_maze::core::{GameMode, ManualClock, SessionConfig};
//! use memory_maze::engine::{MatchOutcome, Session};
//!
//! let clock = ManualClock::new();
//! let mut session = Session::builder(GameMode::Simple)
//!     .dimensions(2, 2)
//!     .layout(["A", "B", "B", "A"])
//!     .clock(clock.clone())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(session.select_card(0, 0).unwrap(), MatchOutcome::NotMatched);
//! assert_eq!(session.select_card(1, 1).unwrap(), MatchOutcome::Matched);
//! assert_eq!(session.score(), 20);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};

use super::anti_stall::AntiStall;
use super::items::{ItemEffect, ItemInventory, ItemKind};
use super::report::{Outcome, SessionReport};
use super::score::ScoreBoard;
use super::selection::{HintInfo, MatchOutcome, Selection};
use super::session_clock::SessionClock;
use crate::board::{Board, CardView, Grid, Position, SelectionRules};
use crate::cards::PatternId;
use crate::core::{Clock, GameMode, GameRng, Result, SessionConfig, SessionError, SystemClock};

/// One node of the board graph, for graph renderers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub index: usize,
    pub position: Position,
    pub card: CardView,
}

/// Nodes and undirected edges of the board. Edges are empty on a free board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphState {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<(usize, usize)>,
}

/// A single game from creation to completion or expiry.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    board: Board,
    selection: Selection,
    scores: ScoreBoard,
    anti_stall: AntiStall,
    session_clock: SessionClock,
    items: ItemInventory,
    clock: Box<dyn Clock>,
    /// Stream used by anti-stall reshuffles.
    shuffle_rng: GameRng,
    /// Stream used by force-reveal.
    reveal_rng: GameRng,
    move_count: u32,
    /// Clock reading when the last pair was matched.
    completed_at: Option<u64>,
}

/// Builder for creating a Session.
#[derive(Debug)]
pub struct SessionBuilder {
    mode: GameMode,
    rows: usize,
    cols: usize,
    patterns: Option<Vec<PatternId>>,
    layout: Option<Vec<PatternId>>,
    config: SessionConfig,
    clock: Option<Box<dyn Clock>>,
}

impl SessionBuilder {
    /// Start from the mode's default dimensions and configuration.
    pub fn new(mode: GameMode) -> Self {
        let (rows, cols) = mode.default_dimensions();
        Self {
            mode,
            rows,
            cols,
            patterns: None,
            layout: None,
            config: SessionConfig::for_mode(mode),
            clock: None,
        }
    }

    pub fn dimensions(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    /// Labels to deal pairs from.
    pub fn patterns<I, P>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PatternId>,
    {
        self.patterns = Some(patterns.into_iter().map(Into::into).collect());
        self
    }

    /// Exact row-major layout instead of a shuffled deal. `*` is the wildcard.
    pub fn layout<I, P>(mut self, layout: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PatternId>,
    {
        self.layout = Some(layout.into_iter().map(Into::into).collect());
        self
    }

    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Time source. Defaults to [`SystemClock`].
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Deal the board and start the clock.
    pub fn build(self) -> Result<Session> {
        let config = self.config;
        let clock = self
            .clock
            .unwrap_or_else(|| Box::new(SystemClock::new()));
        let root_rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);

        let grid = match &self.layout {
            Some(layout) => Grid::from_layout(
                self.rows,
                self.cols,
                layout,
                config.score_weight,
                config.allow_wildcard,
            )?,
            None => Grid::deal(
                self.rows,
                self.cols,
                self.patterns.as_deref(),
                config.score_weight,
                config.allow_wildcard,
                &mut root_rng.for_context("layout"),
            )?,
        };

        let now = clock.now_ms();
        info!(
            mode = %self.mode,
            rows = self.rows,
            cols = self.cols,
            seed = root_rng.seed(),
            "session created"
        );

        Ok(Session {
            board: Board::for_mode(self.mode, grid),
            selection: Selection::Idle,
            scores: ScoreBoard::new(),
            anti_stall: AntiStall::new(config.shuffle_threshold, config.gate_until_first_match),
            session_clock: SessionClock::new(config.time_budget_ms, now),
            items: config.starting_items.clone(),
            shuffle_rng: root_rng.for_context("reshuffle"),
            reveal_rng: root_rng.for_context("reveal"),
            clock,
            config,
            move_count: 0,
            completed_at: None,
        })
    }
}

impl Session {
    /// Start a session with the mode's default configuration and the
    /// system clock.
    pub fn new(
        rows: usize,
        cols: usize,
        mode: GameMode,
        patterns: Option<&[PatternId]>,
    ) -> Result<Self> {
        let mut builder = SessionBuilder::new(mode).dimensions(rows, cols);
        if let Some(patterns) = patterns {
            builder = builder.patterns(patterns.iter().cloned());
        }
        builder.build()
    }

    /// Configure a session step by step.
    pub fn builder(mode: GameMode) -> SessionBuilder {
        SessionBuilder::new(mode)
    }

    fn now(&self) -> u64 {
        self.clock.now_ms()
    }

    fn checked_position(&self, row: usize, col: usize) -> Result<Position> {
        let grid = self.board.grid();
        let pos = Position::new(row, col);
        if pos.in_bounds(grid.rows(), grid.cols()) {
            Ok(pos)
        } else {
            Err(SessionError::OutOfBounds {
                row,
                col,
                rows: grid.rows(),
                cols: grid.cols(),
            })
        }
    }

    // === Selection cycle ===

    /// Turn the card at `(row, col)` face up.
    ///
    /// The first card of an attempt always reports `NotMatched`. The second
    /// is compared with the first: equal labels are retired and scored,
    /// different labels stay face up until `hide_all_flipped`.
    ///
    /// Illegal selections (time expired, card face up or matched, or a
    /// non-neighbour second card on an adjacency board) change nothing and
    /// report `NotMatched`.
    #[instrument(skip(self))]
    pub fn select_card(&mut self, row: usize, col: usize) -> Result<MatchOutcome> {
        let pos = self.checked_position(row, col)?;
        let now = self.now();

        if self.session_clock.is_expired(now) {
            debug!("selection rejected: time expired");
            return Ok(MatchOutcome::NotMatched);
        }

        match self.selection {
            Selection::Idle => {
                if !self.board.is_first_selection_legal(pos) {
                    debug!("selection rejected: card not selectable");
                    return Ok(MatchOutcome::NotMatched);
                }
                self.flip(pos, now);
                self.selection = Selection::OneSelected(pos);
                Ok(MatchOutcome::NotMatched)
            }
            Selection::OneSelected(first) => {
                if !self.board.is_second_selection_legal(first, pos) {
                    debug!(%first, "selection rejected: illegal second card");
                    return Ok(MatchOutcome::NotMatched);
                }
                self.flip(pos, now);
                Ok(self.evaluate(first, pos, now))
            }
        }
    }

    fn flip(&mut self, pos: Position, now: u64) {
        if let Some(card) = self.board.grid_mut().get_mut(pos) {
            card.flip(now);
            trace!(%pos, id = %card.id(), "card flipped");
        }
        self.move_count = self.move_count.saturating_add(1);
    }

    fn evaluate(&mut self, first: Position, second: Position, now: u64) -> MatchOutcome {
        self.selection = Selection::Idle;

        let grid = self.board.grid_mut();
        let (Some(a), Some(b)) = (grid.index_of(first), grid.index_of(second)) else {
            return MatchOutcome::NotMatched;
        };
        let pair = match (grid.card(a), grid.card(b)) {
            (Some(c1), Some(c2)) if c1.pairs_with(c2) => {
                Some(u64::from(c1.score_weight()) + u64::from(c2.score_weight()))
            }
            _ => None,
        };

        match pair {
            Some(pair_score) => {
                for index in [a, b] {
                    if let Some(card) = grid.card_mut(index) {
                        card.set_matched();
                    }
                }
                self.scores.add_match(pair_score);
                self.anti_stall.record_match();
                debug!(%first, %second, pair_score, total = self.scores.total(), "pair matched");

                if self.completed_at.is_none() && self.board.grid().is_completed() {
                    self.completed_at = Some(now);
                    info!(
                        score = self.scores.total(),
                        moves = self.move_count,
                        "board completed"
                    );
                }
                MatchOutcome::Matched
            }
            None => {
                let raised = self.anti_stall.record_mismatch(now);
                debug!(
                    %first,
                    %second,
                    fail_streak = self.anti_stall.fail_streak(),
                    reshuffle_pending = raised,
                    "pair mismatched"
                );
                MatchOutcome::NotMatched
            }
        }
    }

    /// Turn every face-up, unmatched card face down, then apply a pending
    /// reshuffle if the suppression window has passed.
    ///
    /// Any half-finished attempt is abandoned, since its first card is no
    /// longer face up.
    pub fn hide_all_flipped(&mut self) {
        let now = self.now();
        let hidden = self.board.grid_mut().hide_unmatched();
        self.selection = Selection::Idle;

        if self.anti_stall.should_apply(now) {
            self.board.grid_mut().shuffle_unmatched(&mut self.shuffle_rng);
            self.anti_stall.mark_applied();
            debug!(hidden, "unmatched cards reshuffled");
        } else if hidden > 0 {
            trace!(hidden, "cards hidden");
        }
    }

    /// Every non-wildcard card is matched.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.board.grid().is_completed()
    }

    /// Restore the initial state on the same layout: all cards face down,
    /// score, streaks and move count cleared, clock restarted. Items are
    /// kept.
    pub fn reset(&mut self) {
        let now = self.now();
        self.board.grid_mut().reset();
        self.selection = Selection::Idle;
        self.scores.clear();
        self.anti_stall.reset();
        self.session_clock.restart(self.config.time_budget_ms, now);
        self.move_count = 0;
        self.completed_at = None;
        info!("session reset");
    }

    // === Time ===

    #[must_use]
    pub fn is_time_expired(&self) -> bool {
        self.session_clock.is_expired(self.now())
    }

    /// Budget minus elapsed time; negative once overrun.
    #[must_use]
    pub fn remaining_time_ms(&self) -> i64 {
        self.session_clock.remaining_ms(self.now())
    }

    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        self.session_clock.elapsed_ms(self.now())
    }

    /// How long the caller should leave a mismatch visible.
    #[must_use]
    pub fn reveal_duration_ms(&self) -> u64 {
        self.config.reveal_duration_ms
    }

    // === Items ===

    /// Remaining count of every item kind.
    #[must_use]
    pub fn item_counts(&self) -> Vec<(ItemKind, u32)> {
        self.items.counts()
    }

    #[must_use]
    pub fn items(&self) -> &ItemInventory {
        &self.items
    }

    /// Grant items, e.g. after a purchase.
    pub fn add_items(&mut self, kind: ItemKind, amount: u32) {
        self.items.add(kind, amount);
    }

    /// Use one item.
    ///
    /// `magnitude` is in seconds for `ExtendTime` and `SuppressShuffle` and
    /// ignored by `ForceReveal`. Nothing changes, and no item is used,
    /// unless the effect can be applied.
    #[instrument(skip(self))]
    pub fn apply_item(&mut self, kind: ItemKind, magnitude: u64) -> Result<ItemEffect> {
        if !self.items.has(kind) {
            return Err(SessionError::ItemUnavailable(kind));
        }
        let now = self.now();
        if self.session_clock.is_expired(now) {
            return Err(SessionError::SessionExpired);
        }

        let effect = match kind {
            ItemKind::ExtendTime => {
                self.session_clock
                    .extend_budget(magnitude.saturating_mul(1_000));
                ItemEffect::TimeExtended {
                    budget_ms: self.session_clock.budget_ms(),
                }
            }
            ItemKind::SuppressShuffle => {
                let until_ms = now.saturating_add(magnitude.saturating_mul(1_000));
                self.anti_stall.suppress(until_ms);
                ItemEffect::ShuffleSuppressed {
                    until_ms: self.anti_stall.suppress_until(),
                }
            }
            ItemKind::ForceReveal => {
                let candidates = self.board.grid().selectable_indices();
                let index = *self
                    .reveal_rng
                    .choose(&candidates)
                    .ok_or(SessionError::NothingToReveal)?;
                let grid = self.board.grid_mut();
                let pos = grid.position_of(index);
                if let Some(card) = grid.card_mut(index) {
                    card.flip(now);
                }
                ItemEffect::Revealed(pos)
            }
        };

        self.items.consume(kind)?;
        info!(%kind, ?effect, remaining = self.items.count(kind), "item applied");
        Ok(effect)
    }

    // === Read-only state ===

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.board.mode()
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.scores.total()
    }

    #[must_use]
    pub fn score_board(&self) -> &ScoreBoard {
        &self.scores
    }

    #[must_use]
    pub fn anti_stall(&self) -> &AntiStall {
        &self.anti_stall
    }

    #[must_use]
    pub fn fail_streak(&self) -> u32 {
        self.anti_stall.fail_streak()
    }

    #[must_use]
    pub fn pending_shuffle(&self) -> bool {
        self.anti_stall.pending_shuffle()
    }

    /// Accepted card flips so far.
    #[must_use]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Row-major `(id, is_flipped, is_matched)` snapshot.
    #[must_use]
    pub fn grid_state(&self) -> Vec<CardView> {
        self.board.grid().views()
    }

    /// Selected card and the positions a second card may target.
    #[must_use]
    pub fn hint_info(&self) -> HintInfo {
        match self.selection.first() {
            Some(first) => HintInfo {
                selected: Some(first),
                neighbors: self.board.hint(first),
            },
            None => HintInfo::default(),
        }
    }

    /// Nodes with card state plus graph edges.
    #[must_use]
    pub fn graph_state(&self) -> GraphState {
        let grid = self.board.grid();
        let nodes = grid
            .cards()
            .enumerate()
            .map(|(index, card)| GraphNode {
                index,
                position: grid.position_of(index),
                card: CardView::from(card),
            })
            .collect();

        GraphState {
            nodes,
            edges: self.board.edges(),
        }
    }

    /// Shortest path between two cells; `None` on a free board.
    #[must_use]
    pub fn bfs_distance(&self, from: Position, to: Position) -> Option<usize> {
        self.board.bfs_distance(from, to)
    }

    /// Every position currently showing or hiding `id`.
    #[must_use]
    pub fn positions_of(&self, id: &PatternId) -> Vec<Position> {
        self.board.grid().positions_of(id)
    }

    /// The face-down card that has gone longest without being seen.
    ///
    /// Never-revealed cards come first; ties go to the earliest grid
    /// position.
    #[must_use]
    pub fn stalest_card(&self) -> Option<Position> {
        let grid = self.board.grid();
        grid.selectable_indices()
            .into_iter()
            .filter_map(|i| grid.card(i).map(|card| (card.last_revealed_at(), i)))
            .min()
            .map(|(_, i)| grid.position_of(i))
    }

    /// Current outcome. Completion wins over a later expiry.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        if self.is_completed() {
            Outcome::Completed
        } else if self.is_time_expired() {
            Outcome::TimeOver
        } else {
            Outcome::InProgress
        }
    }

    /// Result record for the reporting collaborator.
    ///
    /// Elapsed time stops at completion, and at the budget on time-over.
    #[must_use]
    pub fn report(&self) -> SessionReport {
        let outcome = self.outcome();
        let elapsed_ms = match (outcome, self.completed_at) {
            (Outcome::Completed, Some(at)) => self.session_clock.elapsed_ms(at),
            (Outcome::TimeOver, _) => self.session_clock.budget_ms(),
            _ => self.elapsed_ms(),
        };

        SessionReport {
            mode: self.mode(),
            elapsed_ms,
            move_count: self.move_count,
            score: self.score(),
            outcome,
        }
    }
}
