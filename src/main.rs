use std::fs::File;
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use folio::app::{self, App};
use folio::settings::Settings;

#[derive(Parser)]
#[command(name = "folio", version, about = "A console manuscript editor")]
struct Cli {
    /// Chapter file to open for editing
    file: PathBuf,

    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Characters per line, overriding the settings file
    #[arg(long)]
    width: Option<usize>,

    /// Write diagnostics to this file (filtered by RUST_LOG, default warn)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if let Some(ref path) = cli.log_file {
        init_tracing(path)?;
    }

    let mut settings = match cli.settings {
        Some(ref path) => match Settings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };
    if let Some(width) = cli.width {
        settings.line_width = width;
        if let Err(e) = settings.validate() {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    run_editor(cli.file, settings)
}

/// The terminal is in raw mode while editing, so diagnostics only ever go
/// to a file.
fn init_tracing(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Sets up the terminal, runs the TUI editor, and restores the terminal on exit.
fn run_editor(file_path: PathBuf, settings: Settings) -> io::Result<()> {
    // Setup panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run app
    let result = run_app(&mut terminal, file_path, settings);

    // Restore terminal
    restore_terminal()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    file_path: PathBuf,
    settings: Settings,
) -> io::Result<()> {
    let rows = terminal.size()?.height.saturating_sub(app::CHROME_ROWS).max(1);
    let mut app = App::new(file_path, settings, rows as usize)?;
    tracing::info!(path = %app.file_path.display(), rows, "editor started");

    loop {
        app.render_frame(terminal)?;

        // Block up to 100ms waiting for the first event (prevents busy-loop,
        // gives tick() a chance to run ~10x/sec for timer expiry).
        if event::poll(Duration::from_millis(100))? {
            // Drain all queued events without blocking, then render immediately.
            loop {
                let ev = event::read()?;
                app.handle_event(ev);
                if app.should_quit {
                    break;
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste)?;
    Ok(())
}
