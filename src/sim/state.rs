//! Game state and core simulation types
//!
//! Everything the movement rules touch lives here: the snake, the pending
//! direction, the food, the score and the phase.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Board is set up, waiting for the first start
    Idle,
    /// Snake moves every tick
    Running,
    /// Game is paused
    Paused,
    /// Snake crashed; only restart leaves this phase
    Dead,
}

/// Rule variant, fixed for the lifetime of a game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Wraparound edges and gold food
    Modern,
    /// Solid walls, normal food only
    Classic,
}

impl Mode {
    pub fn allows_wrap(&self) -> bool {
        matches!(self, Mode::Modern)
    }

    pub fn allows_gold(&self) -> bool {
        matches!(self, Mode::Modern)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Modern => "modern",
            Mode::Classic => "classic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "modern" => Some(Mode::Modern),
            "classic" => Some(Mode::Classic),
            _ => None,
        }
    }
}

/// Integer grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell one step along `dir` (unbounded)
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector (screen coordinates, y grows downward)
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// Food variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FoodKind {
    #[default]
    Normal,
    /// Bonus food: +3 score, +3 length
    Gold,
}

impl FoodKind {
    pub fn score(&self) -> u64 {
        match self {
            FoodKind::Normal => NORMAL_FOOD_SCORE,
            FoodKind::Gold => GOLD_FOOD_SCORE,
        }
    }

    /// Total length gained when eaten
    pub fn growth(&self) -> usize {
        match self {
            FoodKind::Normal => 1,
            FoodKind::Gold => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub cell: Cell,
    pub kind: FoodKind,
}

/// Why the snake died
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Wall,
    SelfHit,
}

impl DeathCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeathCause::Wall => "wall",
            DeathCause::SelfHit => "self",
        }
    }
}

/// Observations for the UI layer (drained once per frame)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    Restarted,
    FoodEaten { kind: FoodKind, score: u64 },
    Died { cause: DeathCause, score: u64 },
    NewBest { mode: Mode, score: u64 },
    /// One explosion frame was simulated; `live` particles remain
    ExplosionFrame { live: usize },
    /// Explosion finished, the game-over overlay may be shown
    GameOverReady,
}

/// Board dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub cols: i32,
    pub rows: i32,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            cols: COLS,
            rows: ROWS,
        }
    }
}

impl Grid {
    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.cols).contains(&cell.x) && (0..self.rows).contains(&cell.y)
    }

    /// Toroidal wrap on each axis independently
    pub fn wrap(&self, cell: Cell) -> Cell {
        Cell::new(cell.x.rem_euclid(self.cols), cell.y.rem_euclid(self.rows))
    }
}

/// Starting snake, head first
pub const START_SNAKE: [Cell; 3] = [Cell::new(8, 10), Cell::new(7, 10), Cell::new(6, 10)];

/// Complete rules state for one game
#[derive(Debug, Clone)]
pub struct GameState {
    pub rng: Pcg32,
    pub mode: Mode,
    pub grid: Grid,
    pub phase: GamePhase,
    /// Head first
    pub snake: VecDeque<Cell>,
    /// Direction applied on the last tick
    pub dir: Direction,
    /// Direction that will be committed on the next tick
    pub next_dir: Direction,
    /// None only when the board is full
    pub food: Option<Food>,
    pub score: u64,
    /// Set by the last fatal tick
    pub death_cause: Option<DeathCause>,
    /// Remaining eat flash ticks
    pub eat_flash: u8,
    /// Pending observations for the UI
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game on the default 20x20 grid
    pub fn new(mode: Mode, seed: u64) -> Self {
        Self::with_grid(mode, Grid::default(), seed)
    }

    pub fn with_grid(mode: Mode, grid: Grid, seed: u64) -> Self {
        let mut state = Self {
            rng: Pcg32::seed_from_u64(seed),
            mode,
            grid,
            phase: GamePhase::Idle,
            snake: VecDeque::new(),
            dir: Direction::Right,
            next_dir: Direction::Right,
            food: None,
            score: 0,
            death_cause: None,
            eat_flash: 0,
            events: Vec::new(),
        };
        state.reset_board();
        state
    }

    /// Put snake, direction, food and score back to their starting values
    fn reset_board(&mut self) {
        self.snake = START_SNAKE.iter().copied().collect();
        self.dir = Direction::Right;
        self.next_dir = Direction::Right;
        self.score = 0;
        self.death_cause = None;
        self.eat_flash = 0;
        self.phase = GamePhase::Idle;
        self.food = self.spawn_food();
    }

    pub fn head(&self) -> Cell {
        // The snake is never empty: reset_board seeds three cells and ticks only grow or shift it
        self.snake.front().copied().unwrap_or(START_SNAKE[0])
    }

    /// idle -> running
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Idle {
            return false;
        }
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Started);
        true
    }

    /// running <-> paused; ignored in other phases
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Running => {
                self.phase = GamePhase::Paused;
                self.events.push(GameEvent::Paused);
                true
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Running;
                self.events.push(GameEvent::Resumed);
                true
            }
            GamePhase::Idle | GamePhase::Dead => false,
        }
    }

    /// Queue a direction for the next tick. Reversals and input while
    /// paused or dead are dropped.
    pub fn steer(&mut self, dir: Direction) -> bool {
        if matches!(self.phase, GamePhase::Paused | GamePhase::Dead) {
            return false;
        }
        if self.dir.is_opposite(dir) {
            return false;
        }
        self.next_dir = dir;
        true
    }

    /// Back to idle with a fresh board. Accepted from any phase.
    pub fn restart(&mut self) {
        self.reset_board();
        self.events.push(GameEvent::Restarted);
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.snake.contains(&cell)
    }

    /// Pick a free cell for new food.
    ///
    /// Random probes first; once those run out the pick is made from the
    /// explicit free-cell list so a crowded board still terminates.
    pub fn spawn_food(&mut self) -> Option<Food> {
        let kind = if self.mode.allows_gold() && self.rng.random_bool(GOLD_CHANCE) {
            FoodKind::Gold
        } else {
            FoodKind::Normal
        };

        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let cell = Cell::new(
                self.rng.random_range(0..self.grid.cols),
                self.rng.random_range(0..self.grid.rows),
            );
            if !self.is_occupied(cell) {
                return Some(Food { cell, kind });
            }
        }

        let free: Vec<Cell> = (0..self.grid.rows)
            .flat_map(|y| (0..self.grid.cols).map(move |x| Cell::new(x, y)))
            .filter(|c| !self.is_occupied(*c))
            .collect();
        if free.is_empty() {
            log::info!("Board full, no room for food");
            return None;
        }
        let cell = free[self.rng.random_range(0..free.len())];
        Some(Food { cell, kind })
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_layout() {
        let state = GameState::new(Mode::Modern, 1);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.snake.iter().copied().collect::<Vec<_>>(), START_SNAKE);
        assert_eq!(state.dir, Direction::Right);
        assert_eq!(state.score, 0);
        let food = state.food.expect("fresh board has room for food");
        assert!(!state.is_occupied(food.cell));
    }

    #[test]
    fn test_phase_transitions() {
        let mut state = GameState::new(Mode::Classic, 7);

        // Pause is meaningless before the game runs
        assert!(!state.toggle_pause());
        assert_eq!(state.phase, GamePhase::Idle);

        assert!(state.start());
        assert_eq!(state.phase, GamePhase::Running);
        assert!(!state.start());

        assert!(state.toggle_pause());
        assert_eq!(state.phase, GamePhase::Paused);
        assert!(state.toggle_pause());
        assert_eq!(state.phase, GamePhase::Running);

        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Started, GameEvent::Paused, GameEvent::Resumed]
        );
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_steer_rejects_reversal_and_paused_input() {
        let mut state = GameState::new(Mode::Modern, 3);
        assert!(!state.steer(Direction::Left));
        assert_eq!(state.next_dir, Direction::Right);

        assert!(state.steer(Direction::Up));
        assert_eq!(state.next_dir, Direction::Up);

        state.start();
        state.toggle_pause();
        assert!(!state.steer(Direction::Down));
        assert_eq!(state.next_dir, Direction::Up);
    }

    #[test]
    fn test_restart_resets_board() {
        let mut state = GameState::new(Mode::Modern, 11);
        state.start();
        state.score = 42;
        state.snake.push_front(Cell::new(9, 10));
        state.phase = GamePhase::Dead;
        state.death_cause = Some(DeathCause::SelfHit);

        state.restart();
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.death_cause, None);
        assert_eq!(state.events.last(), Some(&GameEvent::Restarted));
    }

    #[test]
    fn test_classic_never_spawns_gold() {
        let mut state = GameState::new(Mode::Classic, 5);
        for _ in 0..500 {
            let food = state.spawn_food().unwrap();
            assert_eq!(food.kind, FoodKind::Normal);
        }
    }

    #[test]
    fn test_modern_spawns_some_gold() {
        let mut state = GameState::new(Mode::Modern, 5);
        let golds = (0..1000)
            .filter_map(|_| state.spawn_food())
            .filter(|f| f.kind == FoodKind::Gold)
            .count();
        // 12% of 1000, with generous slack
        assert!((40..250).contains(&golds), "gold count {golds}");
    }

    #[test]
    fn test_spawn_on_nearly_full_board() {
        let grid = Grid { cols: 4, rows: 4 };
        let mut state = GameState::with_grid(Mode::Classic, grid, 9);
        state.snake = (0..4)
            .flat_map(|y| (0..4).map(move |x| Cell::new(x, y)))
            .filter(|c| *c != Cell::new(2, 3))
            .collect();

        let food = state.spawn_food().unwrap();
        assert_eq!(food.cell, Cell::new(2, 3));

        state.snake.push_back(Cell::new(2, 3));
        assert_eq!(state.spawn_food(), None);
    }

    #[test]
    fn test_grid_wrap() {
        let grid = Grid::default();
        assert_eq!(grid.wrap(Cell::new(20, 5)), Cell::new(0, 5));
        assert_eq!(grid.wrap(Cell::new(-1, 5)), Cell::new(19, 5));
        assert_eq!(grid.wrap(Cell::new(3, -1)), Cell::new(3, 19));
        assert_eq!(grid.wrap(Cell::new(3, 20)), Cell::new(3, 0));
        assert!(!grid.contains(Cell::new(20, 0)));
        assert!(grid.contains(Cell::new(19, 19)));
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(Mode::from_str("Modern"), Some(Mode::Modern));
        assert_eq!(Mode::from_str(Mode::Classic.as_str()), Some(Mode::Classic));
        assert_eq!(Mode::from_str("arcade"), None);
    }
}
