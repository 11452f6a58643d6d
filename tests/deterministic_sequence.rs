use grid_snake::board::Board;
use grid_snake::config::SessionConfig;
use grid_snake::controller::{StateController, Transition};
use grid_snake::input::{Direction, GameInput};
use grid_snake::session::{Session, Status};
use grid_snake::state::Snapshot;

#[test]
fn five_by_five_board_scenario() {
    let board = Board::new(5).expect("valid size");
    let interior = [6, 7, 8, 11, 12, 13, 16, 17, 18];

    for seed in 0..20 {
        let mut controller = StateController::new_with_seed(board, seed);
        controller.initialize(Direction::Right).expect("initialize");

        let snapshot = controller.snapshot().expect("initialized");
        assert_eq!(snapshot.snake_len(), 1);
        assert_eq!(snapshot.walls().len(), 16);
        assert_eq!(snapshot.free_len(), 7);
        assert!(interior.contains(&snapshot.food()));
        assert_ne!(snapshot.food(), snapshot.head());

        for wall in snapshot.walls().iter() {
            assert_eq!(controller.check_collision(wall), Ok(true));
        }

        let next = snapshot.head() + 1;
        if snapshot.is_free(next) {
            let transition = controller.advance(Direction::Right, next).expect("advance");
            let moved = controller.snapshot().expect("advanced");

            assert_eq!(transition, Transition::Moved);
            assert_eq!(moved.head(), next);
            assert_eq!(moved.snake_len(), 1);
            assert_eq!(moved.free_len(), 7);
        }
    }
}

#[test]
fn stepwise_food_collection_and_wall_collision() {
    let config = SessionConfig {
        grid_size: 6,
        ..SessionConfig::default()
    };
    let board = Board::new(6).expect("valid size");
    let mut session = Session::new_with_seed(config, 42).expect("valid config");

    // Head at (1, 1) heading right with food just ahead at (2, 1).
    session
        .controller_mut()
        .restore(Snapshot::from_parts(board, Direction::Right, vec![7], 8).expect("valid"))
        .expect("restore");
    session.press(GameInput::Toggle).expect("start");
    assert_eq!(session.status(), Status::Running);

    session.tick().expect("tick");
    let snapshot = session.controller().snapshot().expect("state");
    assert_eq!(snapshot.snake(), vec![8, 7]);
    assert_ne!(snapshot.food(), 8);

    session.press(GameInput::Direction(Direction::Up)).expect("press");
    session.tick().expect("tick");
    assert_eq!(session.status(), Status::Lost);
    assert_eq!(session.controller().snake_head(), Ok(8));

    session.press(GameInput::Toggle).expect("reset");
    assert_eq!(session.status(), Status::Start);
    assert_eq!(session.controller().history().len(), 1);
    assert_eq!(session.controller().snapshot().expect("state").snake_len(), 1);
}

#[test]
fn same_seed_replays_same_game() {
    let config = SessionConfig {
        grid_size: 10,
        ..SessionConfig::default()
    };
    let play = || {
        let mut session = Session::new_with_seed(config, 7).expect("valid config");
        session.press(GameInput::Toggle).expect("start");
        let mut heads = Vec::new();
        for turn in [Direction::Up, Direction::Left, Direction::Down, Direction::Right] {
            session.press(GameInput::Direction(turn)).expect("press");
            session.tick().expect("tick");
            if session.status() != Status::Running {
                break;
            }
            heads.push(session.controller().snake_head().expect("head"));
        }
        (heads, session.status())
    };

    assert_eq!(play(), play());
}
