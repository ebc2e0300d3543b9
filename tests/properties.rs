// Property tests for the stores, grid geometry, and step atomicity

use deolang::interpreter::{Engine, ProgramState};
use deolang::io::BufferedIo;
use deolang::memory::heap::Heap;
use deolang::memory::stack::Stack;
use deolang::program::command::Mirror;
use deolang::program::{Direction, Grid, Position};
use proptest::prelude::*;

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

/// Small programs built from real command symbols plus blanks
fn program() -> impl Strategy<Value = String> {
    let symbols: Vec<char> = "0123456789^><V?+-*:%&ox~=()PSCDU{}LZNA.,iIhHgjynFR/\\|_\"@  "
        .chars()
        .collect();
    let row = prop::collection::vec(prop::sample::select(symbols), 1..8)
        .prop_map(|cells| cells.into_iter().collect::<String>());
    prop::collection::vec(row, 1..5).prop_map(|rows| rows.join("\n"))
}

proptest! {
    #[test]
    fn stack_is_lifo(values in prop::collection::vec(any::<i64>(), 0..64)) {
        let mut stack = Stack::new();
        for &value in &values {
            stack.push(value);
        }
        let popped: Vec<i64> = std::iter::from_fn(|| stack.pop()).collect();
        let expected: Vec<i64> = values.iter().rev().copied().collect();
        prop_assert_eq!(popped, expected);
    }

    #[test]
    fn failed_multi_pop_changes_nothing(values in prop::collection::vec(any::<i64>(), 0..3)) {
        let mut stack = Stack::new();
        for &value in &values {
            stack.push(value);
        }
        prop_assert!(stack.pop_n::<3>().is_err());
        prop_assert_eq!(stack.values(), values.as_slice());
    }

    #[test]
    fn heap_reads_last_write(
        writes in prop::collection::vec((-16i64..16, any::<i64>()), 0..64),
        target in -16i64..16,
    ) {
        let mut heap = Heap::new();
        for &(address, value) in &writes {
            heap.store(address, value);
        }
        let expected = writes
            .iter()
            .rev()
            .find(|(address, _)| *address == target)
            .map_or(0, |&(_, value)| value);
        prop_assert_eq!(heap.load(target), expected);
    }

    #[test]
    fn mirrors_are_involutions(direction in direction()) {
        for mirror in [Mirror::Slash, Mirror::Backslash] {
            prop_assert_eq!(mirror.reflect(mirror.reflect(direction)), direction);
            prop_assert_ne!(
                mirror.reflect(direction).is_horizontal(),
                direction.is_horizontal()
            );
        }
    }

    #[test]
    fn wrapped_positions_stay_on_grid(
        source in program(),
        x in -1000i64..1000,
        y in -1000i64..1000,
    ) {
        let grid = Grid::parse(&source);
        let position = grid.wrap_position(x, y);
        prop_assert!(position.x < grid.width());
        prop_assert!(position.y < grid.height());
    }

    #[test]
    fn walking_a_full_lap_returns_to_start(source in program(), direction in direction()) {
        let grid = Grid::parse(&source);
        let lap = if direction.is_horizontal() { grid.width() } else { grid.height() };
        let start = Position::new(0, 0);
        let mut position = start;
        for _ in 0..lap {
            position = grid.advance(position, direction);
        }
        prop_assert_eq!(position, start);
    }

    #[test]
    fn failed_steps_leave_state_untouched(source in program()) {
        let mut engine = Engine::new(Grid::parse(&source), BufferedIo::new("12 x"));
        for _ in 0..200 {
            let before = engine.snapshot();
            match engine.step() {
                ProgramState::Errored(err) => {
                    let after = engine.snapshot();
                    prop_assert_eq!(after.ip, before.ip);
                    prop_assert_eq!(err.position(), before.ip.position);
                    prop_assert_eq!(after.main_stack, before.main_stack);
                    prop_assert_eq!(after.aux_stack, before.aux_stack);
                    prop_assert_eq!(after.heap, before.heap);
                    prop_assert_eq!(after.call_stack, before.call_stack);
                    prop_assert_eq!(after.steps, before.steps);
                    break;
                }
                ProgramState::Halted => break,
                _ => {}
            }
        }
    }
}
