//! Die game TUI.
//!
//! A small terminal frontend over `hazard-core`: configure a die (fair or
//! loaded), roll for a point, then chase it. All game decisions live in the
//! core; this binary only prompts, renders, and paces the final reveal.

mod app;
mod ui;

use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, stdout};
use std::time::Duration;

use app::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(out);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, App::new());

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result.map_err(Into::into)
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, &app))?;

        // Poll with a timeout so the end-of-game reveal redraws on time
        // without requiring input.
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn print_help() {
    println!("Die Game - roll for a point, then chase it");
    println!();
    println!("USAGE:");
    println!("  hazard [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help   Show this help message");
    println!();
    println!("THE GAME:");
    println!("  Pick a die with 3-50 sides, fair or loaded. Your first roll");
    println!("  sets your point; roll it again to win. A 1 loses, always.");
    println!();
    println!("KEYS:");
    println!("  setup    type digits, Enter to continue, arrows to pick die type");
    println!("  playing  r to roll, n for a new game, q to quit");
}
