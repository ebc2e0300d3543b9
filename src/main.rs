// Deolang: stepping interpreter and terminal debugger for a 2D stack language

use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use deolang::interpreter::constants::{DEFAULT_PLAY_HZ, DEFAULT_RUN_BUDGET, HISTORY_MEMORY_LIMIT};
use deolang::interpreter::{Engine, ProgramState};
use deolang::io::{BufferedIo, ConsoleIo};
use deolang::program::Grid;
use deolang::snapshot::History;
use deolang::ui::app::AppOptions;
use deolang::ui::App;

/// Command-line options
struct Options {
    file: String,
    input: String,
    headless: bool,
    steps: Option<u64>,
    hz: u32,
}

fn usage(program_name: &str) {
    eprintln!(
        "Usage: {} <file.deo> [--input <text>] [--headless] [--steps <n>] [--hz <n>]",
        program_name
    );
    eprintln!();
    eprintln!("  --input <text>  Input available to the program before any prompt");
    eprintln!("  --headless      Run without the debugger, using stdin and stdout");
    eprintln!("  --steps <n>     Stop after n steps (headless) or per run (debugger)");
    eprintln!("  --hz <n>        Steps per second while playing (default {})", DEFAULT_PLAY_HZ);
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut file = None;
    let mut options = Options {
        file: String::new(),
        input: String::new(),
        headless: false,
        steps: None,
        hz: DEFAULT_PLAY_HZ,
    };

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--input" => {
                options.input = iter.next().ok_or("--input needs a value")?.clone();
            }
            "--headless" => options.headless = true,
            "--steps" => {
                let value = iter.next().ok_or("--steps needs a value")?;
                let steps = value
                    .parse()
                    .map_err(|_| format!("invalid step count '{}'", value))?;
                options.steps = Some(steps);
            }
            "--hz" => {
                let value = iter.next().ok_or("--hz needs a value")?;
                options.hz = value
                    .parse()
                    .ok()
                    .filter(|hz: &u32| *hz > 0)
                    .ok_or_else(|| format!("invalid play speed '{}'", value))?;
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option '{}'", flag)),
            path if file.is_none() => file = Some(path.to_string()),
            extra => return Err(format!("unexpected argument '{}'", extra)),
        }
    }

    options.file = file.ok_or("no input file provided")?;
    Ok(options)
}

/// Install the log subscriber. The debugger owns the terminal, so it only
/// logs when `DEOLANG_LOG` names a file.
fn init_logging(headless: bool) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    } else if let Some(path) = std::env::var_os("DEOLANG_LOG") {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }
    Ok(())
}

fn run_headless(grid: Grid, options: &Options) -> ExitCode {
    let mut engine = Engine::new(grid, ConsoleIo::with_input(&options.input));
    match engine.run(options.steps) {
        ProgramState::Halted => ExitCode::SUCCESS,
        ProgramState::Errored(err) => {
            eprintln!("Runtime error: {}", err);
            ExitCode::from(1)
        }
        _ => {
            eprintln!(
                "Stopped after {} step(s) at {}",
                engine.steps(),
                engine.position()
            );
            ExitCode::from(2)
        }
    }
}

fn run_tui(grid: Grid, options: Options) -> Result<(), Box<dyn std::error::Error>> {
    let engine = Engine::new(grid, BufferedIo::interactive());
    let history = History::new(HISTORY_MEMORY_LIMIT);
    let mut app = App::new(
        engine,
        history,
        AppOptions {
            initial_input: options.input,
            play_hz: options.hz,
            run_budget: options.steps.unwrap_or(DEFAULT_RUN_BUDGET),
        },
    );

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("deolang");

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!();
            usage(program_name);
            return Ok(ExitCode::from(1));
        }
    };

    if !Path::new(&options.file).exists() {
        eprintln!("Error: File '{}' not found", options.file);
        return Ok(ExitCode::from(1));
    }

    init_logging(options.headless)?;

    let source = fs::read_to_string(&options.file)?;
    let grid = Grid::parse(&source);
    tracing::debug!(
        file = %options.file,
        width = grid.width(),
        height = grid.height(),
        "program loaded"
    );

    if options.headless {
        return Ok(run_headless(grid, &options));
    }

    run_tui(grid, options)?;
    Ok(ExitCode::SUCCESS)
}
