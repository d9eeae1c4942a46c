use web_time::Instant;

use crate::*;

/// Owns one board at a time and drives it from renderer intents.
///
/// The wall-clock timer starts on the first reveal that changes state (not on
/// flags, not on no-ops) and stops on a terminal outcome. A reset replaces the
/// board wholesale and bumps the generation counter.
#[derive(Clone, Debug)]
pub struct GameSession {
    config: GameConfig,
    engine: RevealEngine,
    generation: u64,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
}

impl GameSession {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let layout = RandomBoardGenerator::new(seed).generate(config);
        Self::from_board(config, Board::annotate(layout))
    }

    /// Default 10x10 board with 20 mines.
    pub fn with_defaults(seed: u64) -> Self {
        Self::new(GameConfig::default(), seed)
    }

    /// Runs a session over a prepared board, e.g. a replayed layout.
    pub fn from_board(config: GameConfig, board: Board) -> Self {
        Self {
            config,
            engine: RevealEngine::new(board),
            generation: 0,
            started_at: None,
            ended_at: None,
        }
    }

    /// Discards the board and starts over; nothing of the old game survives
    /// except the incremented generation counter.
    pub fn reset(&mut self, seed: u64) {
        let layout = RandomBoardGenerator::new(seed).generate(self.config);
        self.engine = RevealEngine::new(Board::annotate(layout));
        self.generation += 1;
        self.started_at = None;
        self.ended_at = None;
        log::debug!("new game, generation {}", self.generation);
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn outcome(&self) -> Outcome {
        match self.engine.state() {
            EngineState::Ready | EngineState::Active => Outcome::None,
            EngineState::Won => Outcome::Won,
            EngineState::Lost => Outcome::Lost,
        }
    }

    pub fn flags_remaining(&self) -> Ax {
        self.engine.flags_remaining()
    }

    /// Whole seconds since the timer started, frozen at the terminal outcome;
    /// 0 before the first reveal.
    pub fn elapsed_secs(&self) -> u32 {
        if let Some(started_at) = self.started_at {
            self.ended_at
                .unwrap_or_else(Instant::now)
                .duration_since(started_at)
                .as_secs() as u32
        } else {
            0
        }
    }

    /// Single dispatch entry point for renderer commands.
    pub fn apply(&mut self, intent: Intent) -> GameUpdate {
        match intent {
            Intent::Reveal(id) => self.reveal_intent(id),
            Intent::Flag(id) => self.flag_intent(id),
            Intent::NewGame { seed } => self.new_game_intent(seed),
        }
    }

    pub fn reveal_intent(&mut self, id: CellId) -> GameUpdate {
        match self.engine.reveal(id) {
            Ok(outcome) => {
                if outcome.has_update() && self.started_at.is_none() {
                    self.started_at = Some(Instant::now());
                }
                if self.engine.is_finished() && self.ended_at.is_none() {
                    self.ended_at = Some(Instant::now());
                }
            }
            Err(err) => log::warn!("ignoring reveal intent for cell {}: {}", id, err),
        }
        self.collect_update()
    }

    pub fn flag_intent(&mut self, id: CellId) -> GameUpdate {
        if let Err(err) = self.engine.toggle_flag(id) {
            log::warn!("ignoring flag intent for cell {}: {}", id, err);
        }
        self.collect_update()
    }

    /// Resets and hands back a full-board snapshot for the fresh grid.
    pub fn new_game_intent(&mut self, seed: u64) -> GameUpdate {
        self.reset(seed);
        self.snapshot()
    }

    /// Full-board update for an initial render or re-sync.
    pub fn snapshot(&self) -> GameUpdate {
        let deltas = (0..self.engine.total_cells())
            .map(|id| CellDelta::new(id, self.engine.cell_at(pos_of(id, self.engine.side()))))
            .collect();
        self.update_with(deltas)
    }

    /// Drains the engine journal into an ordered delta list.
    fn collect_update(&mut self) -> GameUpdate {
        let side = self.engine.side();
        let deltas = self
            .engine
            .take_changes()
            .into_iter()
            .map(|id| CellDelta::new(id, self.engine.cell_at(pos_of(id, side))))
            .collect();
        self.update_with(deltas)
    }

    fn update_with(&self, deltas: Vec<CellDelta>) -> GameUpdate {
        GameUpdate {
            deltas,
            flags_remaining: self.flags_remaining(),
            elapsed_secs: self.elapsed_secs(),
            outcome: self.outcome(),
            generation: self.generation,
        }
    }
}
