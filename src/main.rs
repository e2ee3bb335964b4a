//! # CyTale Main Entry Point
//!
//! Loads the level files, then runs the console game loop: draw, read one
//! command, apply it, repeat.

use clap::Parser;
use cytale::{
    parse_confirmation, CytaleResult, GameCompletionState, GameConfig, GameSession, InputHandler,
    LevelLayout, PlayerInput, TerminalDisplay, HELP_TEXT,
};
use log::{info, warn};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Command line arguments for CyTale.
#[derive(Parser, Debug)]
#[command(name = "cytale")]
#[command(about = "A turn-based console maze: collect every coin, avoid traps and monsters")]
#[command(version)]
struct Args {
    /// Level files, played in order (the built-in maze when empty)
    levels: Vec<PathBuf>,

    /// Random seed for monster movement
    #[arg(short, long)]
    seed: Option<u64>,

    /// Player name
    #[arg(short, long)]
    name: Option<String>,

    /// Starting health
    #[arg(long, default_value_t = cytale::config::DEFAULT_PLAYER_HEALTH)]
    health: u32,

    /// Accept h/j/k/l as movement keys
    #[arg(long)]
    vi_keys: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Print the final session summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> CytaleResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level);

    info!("Starting CyTale v{}", cytale::VERSION);

    let layouts = if args.levels.is_empty() {
        vec![LevelLayout::builtin()]
    } else {
        cytale::load_layouts(&args.levels)?
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Using seed {}", seed);
    let config = GameConfig::new(seed).with_initial_health(args.health);

    let mut session = GameSession::new(layouts, args.name.clone(), config)?;
    let input_handler = if args.vi_keys {
        InputHandler::with_vi_keys()
    } else {
        InputHandler::new()
    };

    run_game_loop(&mut session, &input_handler)?;

    if args.json {
        println!("{}", session.summary_json()?);
    } else {
        let summary = session.summary();
        println!(
            "{} finished with {} point(s) after {} turn(s)",
            summary.player_name, summary.score, summary.turns
        );
    }

    Ok(())
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    env_logger::Builder::new()
        .parse_filters(log_level)
        .format_target(false)
        .init();
}

/// Main game loop implementation.
fn run_game_loop(session: &mut GameSession, input_handler: &InputHandler) -> CytaleResult<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut display = TerminalDisplay::new();

    display.add_message(format!("Welcome to CyTale, {}!", session.player().name()));
    display.add_message(HELP_TEXT.to_string());

    loop {
        print_frame(session, &display)?;

        let Some(line) = lines.next() else {
            info!("Input closed");
            break;
        };
        let line = line?;

        let direction = match input_handler.parse_line(&line) {
            Some(PlayerInput::Move(direction)) => direction,
            Some(PlayerInput::Quit) => {
                info!("Player quit the game");
                break;
            }
            Some(PlayerInput::Help) => {
                display.add_message(HELP_TEXT.to_string());
                continue;
            }
            None => {
                warn!("Rejected input {:?}", line.trim());
                display.add_message("Invalid input".to_string());
                continue;
            }
        };

        let report = session.apply_move(direction)?;
        display.add_events(&report.events);

        match session.completion_state {
            GameCompletionState::Playing => {}
            GameCompletionState::LevelCleared => {
                print_frame(session, &display)?;
                session.advance_level()?;
                display.add_message(format!(
                    "Level {}/{}: {}",
                    session.level_index() + 1,
                    session.levels_total(),
                    session.level_name()
                ));
            }
            GameCompletionState::Victory => {
                print_frame(session, &display)?;
                println!("You collected every coin. Well done!");
                break;
            }
            GameCompletionState::PlayerDied => {
                print_frame(session, &display)?;
                if !prompt_retry(&mut lines)? {
                    break;
                }
                session.retry()?;
                display.clear_messages();
                display.add_message("Try again!".to_string());
            }
        }
    }

    info!("Game loop ended");
    Ok(())
}

fn print_frame(session: &GameSession, display: &TerminalDisplay) -> CytaleResult<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout)?;
    write!(stdout, "{}", display.render_frame(session.level()))?;
    stdout.flush()?;
    Ok(())
}

/// Asks whether to retry until a yes or no is typed. End of input means no.
fn prompt_retry<I>(lines: &mut I) -> CytaleResult<bool>
where
    I: Iterator<Item = io::Result<String>>,
{
    loop {
        print!("You died. Retry? (y/n) ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(false);
        };
        match parse_confirmation(&line?) {
            Some(answer) => return Ok(answer),
            None => println!("Please answer y or n."),
        }
    }
}
