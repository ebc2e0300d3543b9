// End-to-end tests that run small Deolang programs through the engine

use deolang::interpreter::errors::{ErrorKind, StackKind};
use deolang::interpreter::{Engine, EngineConfig, ExecutionMode, ProgramState, RuntimeError};
use deolang::io::{BufferedIo, IoChannel, IoMode};
use deolang::program::{Direction, Grid, InstructionPointer, Position};

fn engine(source: &str) -> Engine<BufferedIo> {
    Engine::new(Grid::parse(source), BufferedIo::new(""))
}

/// Run to completion and return the final state and everything printed
fn run(source: &str) -> (ProgramState, String) {
    let mut engine = engine(source);
    let state = engine.run(Some(10_000));
    (state, engine.io().output().to_string())
}

fn error_kind(state: &ProgramState) -> Option<ErrorKind> {
    state.error().map(RuntimeError::kind)
}

#[test]
fn test_add_and_print() {
    let (state, output) = run("52+.@");
    assert_eq!(state, ProgramState::Halted);
    assert_eq!(output, "7");
}

#[test]
fn test_halt_keeps_ip_on_halt_cell() {
    let mut engine = engine("1@");
    assert_eq!(engine.run(None), ProgramState::Halted);
    assert_eq!(engine.position(), Position::new(1, 0));
    assert_eq!(engine.steps(), 2);
    assert_eq!(engine.main_stack().values(), &[1]);
}

#[test]
fn test_pop_on_empty_stack() {
    let mut engine = engine("P@");
    let state = engine.step();

    match state {
        ProgramState::Errored(RuntimeError::StackUnderflow {
            stack,
            needed,
            available,
            position,
        }) => {
            assert_eq!(stack, StackKind::Main);
            assert_eq!(needed, 1);
            assert_eq!(available, 0);
            assert_eq!(position, Position::new(0, 0));
        }
        other => panic!("expected a stack underflow, got {:?}", other),
    }
    assert_eq!(engine.io().output(), "");
    assert_eq!(engine.steps(), 0);
}

#[test]
fn test_terminal_state_makes_step_a_no_op() {
    let mut engine = engine("@");
    assert_eq!(engine.step(), ProgramState::Halted);
    let steps = engine.steps();
    let ip = engine.ip();

    assert_eq!(engine.step(), ProgramState::Halted);
    assert_eq!(engine.steps(), steps);
    assert_eq!(engine.ip(), ip);
}

#[test]
fn test_wraps_around_row() {
    // `<` turns left at the first column, the IP wraps to the last one
    let (state, output) = run("< @.5");
    assert_eq!(state, ProgramState::Halted);
    assert_eq!(output, "5");
}

#[test]
fn test_turns_and_ragged_rows() {
    // Row 0 is shorter than row 1; the empty cells are no-ops
    let source = "V\n\n>3.@";
    let (state, output) = run(source);
    assert_eq!(state, ProgramState::Halted);
    assert_eq!(output, "3");
}

#[test]
fn test_backslash_mirror_turns_down() {
    let (state, output) = run("\\\n3\n.\n@");
    assert_eq!(state, ProgramState::Halted);
    assert_eq!(output, "3");
}

#[test]
fn test_slash_mirror_turns_up_and_wraps() {
    let (state, output) = run("/\n@\n.\n4");
    assert_eq!(state, ProgramState::Halted);
    assert_eq!(output, "4");
}

#[test]
fn test_string_mode_pushes_codes() {
    let (state, output) = run("\"iH\",,@");
    assert_eq!(state, ProgramState::Halted);
    assert_eq!(output, "Hi");
}

#[test]
fn test_string_mode_empty_cells_push_space() {
    // Row 0 is padded to width 5 by row 1
    let mut engine = engine("\"A\n12345");
    for _ in 0..6 {
        engine.step();
    }
    assert_eq!(engine.main_stack().values(), &[65, 32, 32, 32]);
    assert_eq!(engine.mode(), ExecutionMode::Normal);
    assert_eq!(engine.position(), Position::new(1, 0));
}

#[test]
fn test_bridge_skips_to_next_bridge() {
    let mut engine = engine("1|2|3.@");
    assert_eq!(engine.run(None), ProgramState::Halted);
    assert_eq!(engine.io().output(), "3");
    assert_eq!(engine.main_stack().values(), &[1]);
}

#[test]
fn test_bridge_closed_across_its_axis() {
    // `_` only opens for vertical travel, so a horizontal IP runs straight over it
    let (state, output) = run("1_2+.@");
    assert_eq!(state, ProgramState::Halted);
    assert_eq!(output, "3");
}

#[test]
fn test_heap_store_and_load() {
    // Store pops the address (3) then the value (7)
    let mut engine = engine("73h3H.@");
    assert_eq!(engine.run(None), ProgramState::Halted);
    assert_eq!(engine.io().output(), "7");
    assert_eq!(engine.heap().load(3), 7);
    assert_eq!(engine.heap().load(4), 0);
}

#[test]
fn test_negative_heap_address() {
    // Store 5 at -1, then load it back
    let mut engine = engine("501-h01-H.@");
    assert_eq!(engine.run(None), ProgramState::Halted);
    assert_eq!(engine.io().output(), "5");
    assert_eq!(engine.heap().load(-1), 5);
    assert!(engine.main_stack().is_empty());
}

#[test]
fn test_division_by_zero_is_atomic() {
    let mut engine = engine("50:@");
    let state = engine.run(None);
    assert_eq!(error_kind(&state), Some(ErrorKind::DivisionByZero));
    assert_eq!(engine.main_stack().values(), &[5, 0]);
    assert_eq!(engine.position(), Position::new(2, 0));
}

#[test]
fn test_floor_division_and_modulo() {
    let (_, quotient) = run("07-2:.@");
    assert_eq!(quotient, "-4");

    let (_, remainder) = run("07-2%.@");
    assert_eq!(remainder, "1");
}

#[test]
fn test_multiplication_overflow() {
    let mut engine = engine("9C*C*C*C*C*@");
    let state = engine.run(None);
    assert_eq!(error_kind(&state), Some(ErrorKind::IntegerOverflow));
    assert_eq!(engine.position(), Position::new(10, 0));
    assert_eq!(
        engine.main_stack().values(),
        &[1_853_020_188_851_841, 1_853_020_188_851_841]
    );
}

#[test]
fn test_comparisons_and_not() {
    let (_, output) = run("32(.32).33=.0~.5~.@");
    assert_eq!(output, "01110");
}

#[test]
fn test_stack_commands() {
    let mut engine = engine("123SCDPUL@");
    assert_eq!(engine.run(None), ProgramState::Halted);
    // 1 2 3 -> swap -> 1 3 2 -> dup -> 1 3 2 2 -> to aux -> 1 3 2
    // -> pop -> 1 3 -> from aux -> 1 3 2 -> length -> 1 3 2 3
    assert_eq!(engine.main_stack().values(), &[1, 3, 2, 3]);
    assert!(engine.aux_stack().is_empty());
}

#[test]
fn test_rotations() {
    let mut engine = engine("123{@");
    engine.run(None);
    assert_eq!(engine.main_stack().values(), &[3, 1, 2]);

    let mut engine = self::engine("123}@");
    engine.run(None);
    assert_eq!(engine.main_stack().values(), &[2, 3, 1]);
}

#[test]
fn test_from_empty_aux_stack() {
    let mut engine = engine("U@");
    let state = engine.step();
    assert!(matches!(
        state,
        ProgramState::Errored(RuntimeError::StackUnderflow {
            stack: StackKind::Aux,
            ..
        })
    ));
}

#[test]
fn test_jump_keeps_direction() {
    // Pops y (0) then x (6); execution continues rightward from (6, 0)
    let (state, output) = run("60j8.@9.@");
    assert_eq!(state, ProgramState::Halted);
    assert_eq!(output, "9");
}

#[test]
fn test_conditional_jumps() {
    let (_, taken) = run("170y1.@2.@");
    assert_eq!(taken, "2");

    let (_, not_taken) = run("070y1.@2.@");
    assert_eq!(not_taken, "1");

    let (_, zero_taken) = run("070n1.@2.@");
    assert_eq!(zero_taken, "2");
}

#[test]
fn test_jump_target_wraps() {
    // x = -2 wraps to the second to last column
    let (state, output) = run("5 02-0j@.@");
    assert_eq!(state, ProgramState::Halted);
    assert_eq!(output, "5");
}

#[test]
fn test_call_and_return() {
    // Call (5, 0), push 9, return to just after the call site
    let mut engine = engine("50F.@9R");
    engine.step();
    engine.step();
    engine.step();
    assert_eq!(engine.call_stack().depth(), 1);
    assert_eq!(engine.position(), Position::new(5, 0));

    assert_eq!(engine.run(None), ProgramState::Halted);
    assert_eq!(engine.io().output(), "9");
    assert!(engine.call_stack().is_empty());
}

#[test]
fn test_return_restores_call_direction() {
    // The callee turns down, but the caller keeps heading right
    let source = "50F.@V\n     2\n     R";
    let mut engine = engine(source);
    engine.step();
    engine.step();
    engine.step();
    assert_eq!(engine.call_stack().frames()[0].return_direction, Direction::Right);

    assert_eq!(engine.run(None), ProgramState::Halted);
    assert_eq!(engine.io().output(), "2");
    assert_eq!(engine.ip().direction, Direction::Right);
}

#[test]
fn test_return_without_call() {
    let (state, _) = run("R");
    assert_eq!(
        state,
        ProgramState::Errored(RuntimeError::InvalidReturn {
            position: Position::new(0, 0)
        })
    );
}

#[test]
fn test_grid_get() {
    // Reads the `A` at (5, 0)
    let (_, output) = run("50g,@A");
    assert_eq!(output, "A");

    // Past the edge of the grid
    let (_, output) = run("99g.@");
    assert_eq!(output, "0");
}

#[test]
fn test_read_waits_for_input() {
    let mut engine = Engine::new(Grid::parse("i.@"), BufferedIo::interactive());

    // Nothing ran yet, so the program is still ready
    assert_eq!(engine.step(), ProgramState::Ready);
    assert_eq!(engine.awaiting_input(), Some(IoMode::Int));
    assert_eq!(engine.position(), Position::new(0, 0));
    assert_eq!(engine.steps(), 0);
    assert!(engine.main_stack().is_empty());

    engine.io_mut().feed("42\n");
    assert_eq!(engine.run(None), ProgramState::Halted);
    assert_eq!(engine.awaiting_input(), None);
    assert_eq!(engine.io().output(), "42");
}

#[test]
fn test_run_stops_on_pending_input() {
    let mut engine = Engine::new(Grid::parse("1I,@"), BufferedIo::interactive());
    assert_eq!(engine.run(None), ProgramState::Running);
    assert_eq!(engine.awaiting_input(), Some(IoMode::Char));
    assert_eq!(engine.position(), Position::new(1, 0));
}

#[test]
fn test_read_end_of_input() {
    let mut engine = Engine::new(Grid::parse("iI..@"), BufferedIo::new(""));
    assert_eq!(engine.run(None), ProgramState::Halted);
    assert_eq!(engine.io().output(), "-1-1");
}

#[test]
fn test_io_fault_is_fatal() {
    let mut engine = Engine::new(Grid::parse("i@"), BufferedIo::new("abc"));
    let state = engine.run(None);
    assert_eq!(error_kind(&state), Some(ErrorKind::UnrecoverableIoFault));
    assert!(engine.main_stack().is_empty());
}

#[test]
fn test_step_budget() {
    let mut engine = engine(">");
    assert_eq!(engine.run(Some(10)), ProgramState::Running);
    assert_eq!(engine.steps(), 10);

    assert_eq!(engine.run(Some(5)), ProgramState::Running);
    assert_eq!(engine.steps(), 15);
}

#[test]
fn test_reset_restores_entry_state() {
    let mut engine = engine("12D3h5.@");
    assert_eq!(engine.run(None), ProgramState::Halted);
    assert!(!engine.heap().is_empty());

    engine.reset();
    assert_eq!(*engine.state(), ProgramState::Ready);
    assert_eq!(engine.ip(), InstructionPointer::default());
    assert_eq!(engine.steps(), 0);
    assert!(engine.main_stack().is_empty());
    assert!(engine.aux_stack().is_empty());
    assert!(engine.heap().is_empty());
    assert!(engine.call_stack().is_empty());

    // Output belongs to the channel and survives the reset
    assert_eq!(engine.io().output(), "5");
    assert_eq!(engine.run(None), ProgramState::Halted);
    assert_eq!(engine.io().output(), "55");
}

#[test]
fn test_reset_clears_error() {
    let mut engine = engine("P");
    assert!(engine.step().is_terminal());
    engine.reset();
    assert_eq!(*engine.state(), ProgramState::Ready);
    assert_eq!(error_kind(&engine.step()), Some(ErrorKind::StackUnderflow));
}

#[test]
fn test_custom_entry_point() {
    let config = EngineConfig::default()
        .with_entry(InstructionPointer::new(Position::new(2, 1), Direction::Left));
    let mut engine = Engine::with_config(
        Grid::parse("@\n@.7"),
        BufferedIo::new(""),
        config,
    );
    assert_eq!(engine.run(None), ProgramState::Halted);
    assert_eq!(engine.io().output(), "7");
}

#[test]
fn test_random_turns_are_reproducible() {
    let source = "?1.@\n2\n.\n@";
    let outputs: Vec<String> = (0..2)
        .map(|_| {
            let config = EngineConfig::default().with_seed(1234);
            let mut engine = Engine::with_config(Grid::parse(source), BufferedIo::new(""), config);
            engine.run(Some(1000));
            engine.io().output().to_string()
        })
        .collect();
    assert_eq!(outputs[0], outputs[1]);

    let mut engine = engine(source);
    engine.step();
    let direction = engine.ip().direction;
    engine.reset();
    engine.step();
    assert_eq!(engine.ip().direction, direction);
}

#[test]
fn test_snapshot_is_independent() {
    let mut engine = engine("12+.@");
    engine.step();
    engine.step();
    let snapshot = engine.snapshot();

    engine.run(None);

    assert_eq!(snapshot.main_stack, vec![1, 2]);
    assert_eq!(snapshot.state, ProgramState::Running);
    assert_eq!(snapshot.steps, 2);
    assert_eq!(snapshot.ip.position, Position::new(2, 0));
    assert!(engine.main_stack().is_empty());
}

#[test]
fn test_empty_program_does_nothing_forever() {
    let mut engine = engine("");
    assert_eq!(engine.run(Some(3)), ProgramState::Running);
    assert_eq!(engine.position(), Position::new(0, 0));
}

#[test]
fn test_borrowed_and_boxed_channels() {
    // The caller keeps ownership of a borrowed channel
    let mut io = BufferedIo::new("4");
    let mut engine = Engine::new(Grid::parse("i1+.@"), &mut io);
    assert_eq!(engine.run(None), ProgramState::Halted);
    drop(engine);
    assert_eq!(io.output(), "5");

    let mut engine = Engine::new(Grid::parse("9.@"), Box::new(BufferedIo::new("")));
    assert_eq!(engine.run(None), ProgramState::Halted);
    assert_eq!(engine.io().output(), "9");

    let channel: Box<dyn IoChannel> = Box::new(BufferedIo::interactive());
    let mut engine = Engine::new(Grid::parse("I@"), channel);
    assert_eq!(engine.step(), ProgramState::Ready);
    assert_eq!(engine.awaiting_input(), Some(IoMode::Char));
}
