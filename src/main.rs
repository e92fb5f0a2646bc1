//! BLOCKFALL - a falling-block puzzle for the terminal

mod game;
mod grid;
mod input;
mod piece;
mod rules;
mod scheduler;
mod score;
mod settings;
mod tetromino;
mod ui;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use game::{Action, Game};
use input::InputHandler;
use ratatui::{backend::CrosstermBackend, Terminal};
use scheduler::Scheduler;
use settings::Settings;
use std::{
    io::{self, stdout},
    time::{Duration, Instant},
};

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Get the blockfall temp directory, creating it if needed
fn blockfall_temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("blockfall");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    // Generate session ID for this instance
    let session_id: u32 = rand::random();

    let log_dir = blockfall_temp_dir();
    let log_file = format!("{:08x}.log", session_id);

    // Setup tracing to log file; the terminal belongs to the UI
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("blockfall=debug")),
        )
        .with_ansi(false)
        .init();

    tracing::info!(
        "BLOCKFALL starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let settings = Settings::load();

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run app and capture result
    let result = run_app(&mut terminal, &settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    if let Ok(game) = &result {
        let score = game.score();
        println!("\nThanks for playing BLOCKFALL!");
        if game.is_game_over() {
            println!("Game over.");
        }
        println!("Final Score: {}", score.points);
        println!("Level: {} | Lines: {}", score.level, score.lines);
    }

    tracing::info!("Shutting down");
    result.map(|_| ())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    settings: &Settings,
) -> io::Result<Game> {
    let mut game = Game::new();
    let input = InputHandler::from_settings(settings);
    let mut scheduler = Scheduler::new();
    let mut redraw = true;

    loop {
        // Render only when something may have changed
        if redraw {
            terminal.draw(|frame| ui::render_game(frame, &game, settings))?;
            redraw = false;
        }

        // Handle input
        if event::poll(FRAME_DURATION)? {
            match event::read()? {
                Event::Key(key) => match input.key_down(key) {
                    Some(Action::Quit) => return Ok(game),
                    Some(action) => {
                        game.process_action(action);
                        redraw = true;
                    }
                    None => {}
                },
                Event::Resize(_, _) => redraw = true,
                _ => {}
            }
        }

        // Gravity
        let pulse = scheduler.pulse(&mut game, Instant::now());
        if let Some(report) = pulse.final_lock() {
            tracing::debug!(
                "Gravity lock ended the session after clearing {} rows",
                report.rows_cleared
            );
        }
        redraw |= pulse.changed_state();
    }
}
