use std::collections::HashSet;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use snake_arcade::canvas_size;
use snake_arcade::consts::{COLS, PARTICLES_PER_SEGMENT, ROWS};
use snake_arcade::sim::{
    Cell, Direction, Explosion, FrameStatus, GamePhase, GameState, Mode, TickOutcome, tick,
};

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn mode() -> impl Strategy<Value = Mode> {
    prop_oneof![Just(Mode::Modern), Just(Mode::Classic)]
}

/// Distinct squares, treating stacked tail copies as one square
fn distinct_squares(state: &GameState) -> bool {
    let mut cells: Vec<Cell> = state.snake.iter().copied().collect();
    cells.dedup();
    let unique: HashSet<Cell> = cells.iter().copied().collect();
    unique.len() == cells.len()
}

proptest! {
    #[test]
    fn length_changes_only_by_eating(
        seed in any::<u64>(),
        mode in mode(),
        turns in prop::collection::vec(proptest::option::of(direction()), 1..300),
    ) {
        let mut state = GameState::new(mode, seed);
        state.start();

        for turn in turns {
            if let Some(dir) = turn {
                state.steer(dir);
            }
            let before = state.snake.len();
            match tick(&mut state) {
                TickOutcome::Moved => prop_assert_eq!(state.snake.len(), before),
                TickOutcome::Ate(food) => {
                    prop_assert_eq!(state.snake.len(), before + food.kind.growth())
                }
                TickOutcome::Died(_) => {
                    prop_assert_eq!(state.snake.len(), before);
                    prop_assert_eq!(state.phase, GamePhase::Dead);
                    break;
                }
                TickOutcome::Skipped => prop_assert!(false, "running game skipped a tick"),
            }
            prop_assert!(distinct_squares(&state));
        }
    }

    #[test]
    fn food_never_spawns_on_snake(
        seed in any::<u64>(),
        mode in mode(),
        turns in prop::collection::vec(direction(), 1..300),
    ) {
        let mut state = GameState::new(mode, seed);
        state.start();

        for dir in turns {
            state.steer(dir);
            let outcome = tick(&mut state);
            if let (TickOutcome::Ate(_), Some(food)) = (outcome, state.food) {
                prop_assert!(!state.snake.contains(&food.cell));
            }
            if state.phase == GamePhase::Dead {
                break;
            }
        }
    }

    #[test]
    fn reversal_never_applies(seed in any::<u64>(), mode in mode(), first in direction()) {
        let mut state = GameState::new(mode, seed);
        state.start();
        state.steer(first);
        tick(&mut state);
        prop_assume!(state.phase == GamePhase::Running);

        let dir = state.dir;
        state.steer(dir.opposite());
        tick(&mut state);
        prop_assert_eq!(state.dir, dir);
    }

    #[test]
    fn heads_stay_on_grid(seed in any::<u64>(), turns in prop::collection::vec(direction(), 1..200)) {
        let mut state = GameState::new(Mode::Modern, seed);
        state.start();
        for dir in turns {
            state.steer(dir);
            tick(&mut state);
            if state.phase == GamePhase::Dead {
                break;
            }
            prop_assert!(state.grid.contains(state.head()));
        }
    }

    #[test]
    fn explosion_size_and_termination(seed in any::<u64>(), len in 1usize..150) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let snake: Vec<Cell> = (0..len as i32).map(|i| Cell::new(i % COLS, (i / COLS) % ROWS)).collect();
        let mut explosion = Explosion::new(canvas_size(COLS, ROWS));

        let count = explosion.ignite(&snake, &mut rng);
        prop_assert_eq!(count, len.min(60) * PARTICLES_PER_SEGMENT);

        let mut frames = 0;
        loop {
            frames += 1;
            prop_assert!(frames <= 60);
            if explosion.advance_frame() == FrameStatus::Spent {
                break;
            }
        }
        prop_assert_eq!(explosion.advance_frame(), FrameStatus::Idle);
    }
}
