use std::collections::HashSet;

use gridsnake::config::GameConfig;
use gridsnake::food::Food;
use gridsnake::game::{DeathReason, GameState, GameStatus, TickOutcome};
use gridsnake::grid::{Cell, Grid};
use gridsnake::input::Direction;
use gridsnake::snake::Snake;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

fn body(snake: &Snake) -> Vec<Cell> {
    snake.segments().copied().collect()
}

#[test]
fn stepwise_food_collection_and_wall_collision() {
    let mut state =
        GameState::new_with_seed(GameConfig::with_grid(6, 4), 42).expect("valid config");
    state.snake = Snake::new(Cell::new(1, 1), Direction::Right, 1);
    state.food = Food::new(Cell::new(2, 1));

    assert!(matches!(state.tick(), TickOutcome::Ate { .. }));
    assert_eq!(state.status, GameStatus::Running);
    assert_eq!(state.score, 1);
    assert_eq!(state.snake.head(), Cell::new(2, 1));

    state.set_direction(Direction::Up);
    state.tick();
    assert_eq!(state.status, GameStatus::Running);
    assert_eq!(state.snake.head(), Cell::new(2, 0));
    assert_eq!(state.snake.len(), 2);

    assert_eq!(state.tick(), TickOutcome::Died(DeathReason::WallCollision));
    assert_eq!(state.status, GameStatus::GameOver);
}

#[test]
fn four_by_four_walk_into_the_right_wall() {
    let grid = Grid {
        width: 4,
        height: 4,
    };
    let mut snake = Snake::from_segments(
        vec![Cell::new(2, 2), Cell::new(1, 2), Cell::new(0, 2)],
        Direction::Right,
    )
    .expect("valid body");

    assert_eq!(snake.step(), Cell::new(3, 2));
    assert!(!snake.collides_with_wall(grid));
    let expected: HashSet<Cell> = [Cell::new(3, 2), Cell::new(2, 2), Cell::new(1, 2)]
        .into_iter()
        .collect();
    assert_eq!(snake.occupancy(), &expected);

    assert_eq!(snake.step(), Cell::new(4, 2));
    assert!(snake.collides_with_wall(grid));
}

#[test]
fn fed_snake_keeps_its_tail_for_one_step() {
    let mut snake = Snake::from_segments(vec![Cell::new(1, 1), Cell::new(1, 0)], Direction::Down)
        .expect("valid body");
    snake.grow(1);

    assert_eq!(snake.step(), Cell::new(1, 2));
    assert_eq!(snake.growth_pending(), 0);
    assert_eq!(
        body(&snake),
        vec![Cell::new(1, 2), Cell::new(1, 1), Cell::new(1, 0)]
    );

    snake.step();
    assert_eq!(snake.len(), 3);
}

#[test]
fn snake_circling_its_own_tail_never_collides() {
    let grid = Grid {
        width: 2,
        height: 2,
    };
    let mut snake = Snake::from_segments(
        vec![
            Cell::new(0, 0),
            Cell::new(1, 0),
            Cell::new(1, 1),
            Cell::new(0, 1),
        ],
        Direction::Left,
    )
    .expect("valid body");

    // Counter-clockwise loop filling the whole 2x2 board.
    for direction in [Direction::Down, Direction::Right, Direction::Up, Direction::Left]
        .into_iter()
        .cycle()
        .take(12)
    {
        snake.set_direction(direction);
        snake.step();
        assert!(!snake.collides_with_self());
        assert!(!snake.collides_with_wall(grid));
        assert_eq!(snake.occupancy().len(), grid.total_cells());
    }
}

#[test]
fn random_play_preserves_body_invariants() {
    let mut rng = StdRng::seed_from_u64(2024);

    for seed in 0..20 {
        let mut config = GameConfig::with_grid(8, 6);
        config.growth_per_food = 2;
        let mut state = GameState::new_with_seed(config, seed).expect("valid config");

        for _ in 0..500 {
            if rng.gen_bool(0.3) {
                state.set_direction(DIRECTIONS[rng.gen_range(0..DIRECTIONS.len())]);
            }

            let outcome = state.tick();
            if state.is_over() {
                assert!(matches!(
                    outcome,
                    TickOutcome::Died(_) | TickOutcome::BoardFull
                ));
                break;
            }

            let cells = body(&state.snake);
            let unique: HashSet<Cell> = cells.iter().copied().collect();
            assert_eq!(unique.len(), cells.len());
            assert_eq!(&unique, state.snake.occupancy());
            assert!(cells.windows(2).all(|pair| pair[0].is_adjacent_to(pair[1])));
            assert!(cells.iter().all(|cell| state.grid().contains(*cell)));
            assert!(!state.snake.occupies(state.food.position));
            assert!(state.grid().contains(state.food.position));
        }
    }
}

#[test]
fn reversal_input_cannot_kill_the_snake() {
    let mut state =
        GameState::new_with_seed(GameConfig::with_grid(10, 10), 3).expect("valid config");
    state.food = Food::new(Cell::new(0, 0));

    state.set_direction(Direction::Left);
    assert_eq!(state.snake.pending_direction(), Direction::Right);

    assert_eq!(
        state.tick(),
        TickOutcome::Moved {
            head: Cell::new(6, 5)
        }
    );
    assert_eq!(state.status, GameStatus::Running);
}

#[test]
fn food_placement_fails_only_on_a_full_board() {
    let grid = Grid {
        width: 3,
        height: 3,
    };
    let mut rng = StdRng::seed_from_u64(1);
    let mut occupied = HashSet::new();

    for cell in grid.cells() {
        let food = Food::spawn(&mut rng, grid, &occupied).expect("a cell is still free");
        assert!(!occupied.contains(&food.position));
        occupied.insert(cell);
    }

    assert_eq!(occupied.len(), grid.total_cells());
    assert!(Food::spawn(&mut rng, grid, &occupied).is_err());
}
