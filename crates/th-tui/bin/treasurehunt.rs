//! Treasure hunt board game
//!
//! Main entry point for the game.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use th_core::{Board, Cell, GameConfig, GameMode, GameRng, Session};
use th_tui::App;

/// Pause shown while a candidate cell is inspected. Pure pacing.
const CHECK_DELAY: Duration = Duration::from_secs(1);

/// Treasure hunt board game
#[derive(Parser, Debug)]
#[command(name = "treasurehunt")]
#[command(author, version, about = "Treasure Hunt - find the hidden treasure!", long_about = None)]
struct Args {
    /// Board description file ('#' blocked, '.' clear, 'X' start)
    #[arg(short, long, default_value = "board_grid.txt")]
    board: PathBuf,

    /// Rule set: 'free' four-direction movement, or the 'locked'
    /// single-use up/right/down game
    #[arg(short, long, default_value_t = GameMode::Free)]
    mode: GameMode,

    /// Clear cell excluded from treasure candidacy, as ROW,COL (repeatable);
    /// use for cells unreachable under the chosen rule set
    #[arg(long = "exclude", value_name = "ROW,COL", value_parser = parse_cell)]
    exclude: Vec<Cell>,

    /// Fixed RNG seed (debugging; the default is entropy)
    #[arg(long)]
    seed: Option<u64>,
}

/// Parse a "row,col" pair.
fn parse_cell(s: &str) -> Result<Cell, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got '{s}'"))?;
    let row = row.trim().parse().map_err(|e| format!("bad row: {e}"))?;
    let col = col.trim().parse().map_err(|e| format!("bad column: {e}"))?;
    Ok(Cell::new(row, col))
}

/// Read the board file and start a new game.
fn load_session(args: &Args) -> Result<Session, String> {
    let text = std::fs::read_to_string(&args.board)
        .map_err(|e| format!("failed to read board config data '{}': {e}", args.board.display()))?;
    let board = Board::parse(&text).map_err(|e| format!("failed to load board: {e}"))?;
    let config = GameConfig {
        mode: args.mode,
        exclusions: args.exclude.clone(),
    };
    let rng = match args.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    Session::with_rng(board, config, rng).map_err(|e| e.to_string())
}

fn main() -> io::Result<()> {
    // Parse command-line arguments and load the board before terminal setup;
    // board problems are fatal and should print to a normal screen.
    let args = Args::parse();
    let session = match load_session(&args) {
        Ok(session) => session,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(1);
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session);

    // Main loop
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(100))? {
            let event = event::read()?;

            if let Some(report) = app.handle_event(event) {
                if report.check.is_some() {
                    // Show the board with the move applied, pause, then
                    // reveal whether the candidate held the treasure.
                    app.set_message("checking treasure..");
                    terminal.draw(|frame| app.render(frame))?;
                    std::thread::sleep(CHECK_DELAY);
                }
                app.finish_turn(&report);
            }

            if app.take_replay_request() {
                match load_session(&args) {
                    Ok(session) => app.replace_session(session),
                    Err(message) => {
                        restore_terminal(&mut terminal)?;
                        eprintln!("{message}");
                        std::process::exit(1);
                    }
                }
            }

            if app.should_quit() {
                break;
            }
        }
    }

    restore_terminal(&mut terminal)?;

    // Quitting is the only way out of the loop, and quit exits non-zero.
    std::process::exit(1);
}

fn restore_terminal(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}
