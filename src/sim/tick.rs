//! Fixed interval movement tick
//!
//! One call moves the snake one cell. Everything that can happen on a tick
//! (wrap, crash, eat, grow) is resolved here.

use super::state::{DeathCause, Food, GameEvent, GamePhase, GameState};
use crate::consts::EAT_FLASH_TICKS;

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running (idle, paused or already dead)
    Skipped,
    Moved,
    Ate(Food),
    /// Fatal collision; emitted exactly once per game
    Died(DeathCause),
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState) -> TickOutcome {
    if state.phase != GamePhase::Running {
        return TickOutcome::Skipped;
    }

    state.eat_flash = state.eat_flash.saturating_sub(1);

    state.dir = state.next_dir;
    let stepped = state.head().step(state.dir);

    let new_head = if state.mode.allows_wrap() {
        state.grid.wrap(stepped)
    } else if state.grid.contains(stepped) {
        stepped
    } else {
        return die(state, DeathCause::Wall);
    };

    // Pre-growth body, head excluded. The tail still counts even though it
    // is about to move away.
    if state.snake.iter().skip(1).any(|c| *c == new_head) {
        return die(state, DeathCause::SelfHit);
    }

    state.snake.push_front(new_head);

    match state.food {
        Some(food) if food.cell == new_head => {
            state.score += food.kind.score();
            // Keeping the tail gives the first cell of growth; the rest are
            // stacked copies of the tail that unfold as the snake moves.
            if let Some(&tail) = state.snake.back() {
                for _ in 1..food.kind.growth() {
                    state.snake.push_back(tail);
                }
            }
            state.eat_flash = EAT_FLASH_TICKS;
            state.food = state.spawn_food();
            state.events.push(GameEvent::FoodEaten {
                kind: food.kind,
                score: state.score,
            });
            TickOutcome::Ate(food)
        }
        _ => {
            state.snake.pop_back();
            TickOutcome::Moved
        }
    }
}

fn die(state: &mut GameState, cause: DeathCause) -> TickOutcome {
    state.phase = GamePhase::Dead;
    state.death_cause = Some(cause);
    state.events.push(GameEvent::Died {
        cause,
        score: state.score,
    });
    log::info!(
        "Snake died ({}) in {} mode with score {}",
        cause.as_str(),
        state.mode.as_str(),
        state.score
    );
    TickOutcome::Died(cause)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Cell, Direction, FoodKind, Mode};

    fn running(mode: Mode, snake: &[(i32, i32)], food: (i32, i32)) -> GameState {
        let mut state = GameState::new(mode, 12345);
        state.snake = snake.iter().map(|&(x, y)| Cell::new(x, y)).collect();
        state.food = Some(Food {
            cell: Cell::new(food.0, food.1),
            kind: FoodKind::Normal,
        });
        state.start();
        state.drain_events();
        state
    }

    fn cells(state: &GameState) -> Vec<Cell> {
        state.snake.iter().copied().collect()
    }

    #[test]
    fn test_tick_moves_without_eating() {
        let mut state = running(Mode::Modern, &[(8, 10), (7, 10), (6, 10)], (3, 3));

        assert_eq!(tick(&mut state), TickOutcome::Moved);
        assert_eq!(state.head(), Cell::new(9, 10));
        assert_eq!(state.snake.back(), Some(&Cell::new(7, 10)));
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_tick_eats_normal_food() {
        let mut state = running(Mode::Modern, &[(8, 10), (7, 10), (6, 10)], (9, 10));

        assert!(matches!(tick(&mut state), TickOutcome::Ate(_)));
        assert_eq!(state.score, 1);
        assert_eq!(
            cells(&state),
            vec![
                Cell::new(9, 10),
                Cell::new(8, 10),
                Cell::new(7, 10),
                Cell::new(6, 10)
            ]
        );
        let food = state.food.unwrap();
        assert!(!state.is_occupied(food.cell));
        assert_eq!(state.eat_flash, EAT_FLASH_TICKS);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::FoodEaten {
                kind: FoodKind::Normal,
                score: 1
            }]
        );
    }

    #[test]
    fn test_tick_eats_gold_food() {
        let mut state = running(Mode::Modern, &[(8, 10), (7, 10), (6, 10)], (9, 10));
        state.food = Some(Food {
            cell: Cell::new(9, 10),
            kind: FoodKind::Gold,
        });

        tick(&mut state);
        assert_eq!(state.score, 3);
        assert_eq!(state.snake.len(), 6);
        assert_eq!(
            state.snake.iter().rev().take(3).collect::<Vec<_>>(),
            vec![&Cell::new(6, 10); 3]
        );

        // Stacked tail copies unfold over the next ticks
        state.food = Some(Food {
            cell: Cell::new(0, 0),
            kind: FoodKind::Normal,
        });
        tick(&mut state);
        tick(&mut state);
        assert_eq!(state.snake.len(), 6);
        assert_eq!(state.snake.back(), Some(&Cell::new(6, 10)));
        tick(&mut state);
        assert_eq!(state.snake.back(), Some(&Cell::new(7, 10)));
    }

    #[test]
    fn test_modern_wraps_each_edge() {
        let cases = [
            (Direction::Right, (19, 10), Cell::new(0, 10)),
            (Direction::Left, (0, 10), Cell::new(19, 10)),
            (Direction::Up, (5, 0), Cell::new(5, 19)),
            (Direction::Down, (5, 19), Cell::new(5, 0)),
        ];
        for (dir, head, expected) in cases {
            let mut state = running(Mode::Modern, &[head], (10, 10));
            state.dir = dir;
            state.next_dir = dir;
            assert_eq!(tick(&mut state), TickOutcome::Moved);
            assert_eq!(state.head(), expected);
        }
    }

    #[test]
    fn test_classic_wall_is_fatal() {
        let mut state = running(Mode::Classic, &[(19, 10), (18, 10), (17, 10)], (3, 3));

        assert_eq!(tick(&mut state), TickOutcome::Died(DeathCause::Wall));
        assert_eq!(state.phase, GamePhase::Dead);
        assert_eq!(state.death_cause, Some(DeathCause::Wall));
        let before = cells(&state);

        // Dead state never advances
        assert_eq!(tick(&mut state), TickOutcome::Skipped);
        assert_eq!(cells(&state), before);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Died {
                cause: DeathCause::Wall,
                score: 0
            }]
        );
    }

    #[test]
    fn test_classic_every_wall_is_fatal() {
        let cases = [
            (Direction::Left, (0, 10)),
            (Direction::Up, (5, 0)),
            (Direction::Down, (5, 19)),
        ];
        for (dir, head) in cases {
            let mut state = running(Mode::Classic, &[head], (10, 10));
            state.dir = dir;
            state.next_dir = dir;
            assert_eq!(tick(&mut state), TickOutcome::Died(DeathCause::Wall));
            assert_eq!(state.head(), Cell::new(head.0, head.1));
        }
    }

    #[test]
    fn test_self_collision() {
        // Hook shape: moving up from (5,5) runs into (5,4)
        let mut state = running(
            Mode::Modern,
            &[(5, 5), (6, 5), (6, 4), (5, 4), (4, 4)],
            (0, 0),
        );
        state.dir = Direction::Left;
        state.next_dir = Direction::Left;
        state.steer(Direction::Up);

        assert_eq!(tick(&mut state), TickOutcome::Died(DeathCause::SelfHit));
        assert_eq!(state.snake.len(), 5);
    }

    #[test]
    fn test_moving_into_current_tail_is_fatal() {
        // 2x2 loop: the tail cell is still occupied when the head is checked
        let mut state = running(Mode::Modern, &[(5, 5), (6, 5), (6, 6), (5, 6)], (0, 0));
        state.dir = Direction::Left;
        state.next_dir = Direction::Down;

        assert_eq!(tick(&mut state), TickOutcome::Died(DeathCause::SelfHit));
    }

    #[test]
    fn test_reversal_never_applies() {
        let mut state = running(Mode::Modern, &[(8, 10), (7, 10), (6, 10)], (3, 3));
        state.steer(Direction::Left);
        tick(&mut state);
        assert_eq!(state.dir, Direction::Right);
        assert_eq!(state.head(), Cell::new(9, 10));
    }

    #[test]
    fn test_paused_and_idle_do_not_move() {
        let mut state = GameState::new(Mode::Modern, 1);
        let before = cells(&state);
        assert_eq!(tick(&mut state), TickOutcome::Skipped);
        assert_eq!(cells(&state), before);

        state.start();
        state.toggle_pause();
        assert_eq!(tick(&mut state), TickOutcome::Skipped);
        assert_eq!(cells(&state), before);
        assert_eq!(state.eat_flash, 0);
    }

    #[test]
    fn test_eat_flash_decays_per_tick() {
        let mut state = running(Mode::Modern, &[(8, 10), (7, 10), (6, 10)], (9, 10));
        tick(&mut state);
        assert_eq!(state.eat_flash, 3);
        state.food = None;
        tick(&mut state);
        tick(&mut state);
        tick(&mut state);
        assert_eq!(state.eat_flash, 0);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(Mode::Modern, 99999);
        let mut state2 = GameState::new(Mode::Modern, 99999);
        state1.start();
        state2.start();

        let turns = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];
        for i in 0..200 {
            let dir = turns[(i / 7) % turns.len()];
            state1.steer(dir);
            state2.steer(dir);
            tick(&mut state1);
            tick(&mut state2);
        }

        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.score, state2.score);
        assert_eq!(cells(&state1), cells(&state2));
        assert_eq!(state1.food, state2.food);
    }
}
