use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use quill_config::Config;
use quill_engine::io;
use quill_engine::language::{DEFAULT_LANGUAGE, LANGUAGES, Language};
use quill_engine::proofread::LanguageToolClient;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{env, fs::OpenOptions, io::stdout, path::PathBuf, process};

mod app;
mod ui;

use app::App;

/// Log file in the system temp dir; the terminal belongs to the TUI
const LOG_FILE: &str = "quill-cli.log";

fn init_logging() -> Result<PathBuf> {
    let log_path = env::temp_dir().join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(log_path)
}

fn main() -> Result<()> {
    let log_path = init_logging()?;
    log::info!("quill-cli starting up, logging to {}", log_path.display());

    // Determine manuscript path from CLI args or config file
    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    let loaded = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Usage: {} [manuscript-folder-path]", args[0]);
            process::exit(1);
        }
    };

    let config;
    let from_config;

    if args.len() == 2 {
        // CLI argument wins over the configured path; other settings still apply
        let manuscript_path = PathBuf::from(&args[1]);
        config = match loaded {
            Some(config) => Config {
                manuscript_path,
                ..config
            },
            None => Config::new(manuscript_path),
        };
        from_config = false;
    } else if args.len() == 1 {
        match loaded {
            Some(loaded) => {
                config = loaded;
                from_config = true;
            }
            None => {
                eprintln!("Error: No manuscript path provided and no config file found");
                eprintln!("Usage: {} <manuscript-folder-path>", args[0]);
                eprintln!("Or create a config file at {}", config_path.display());
                process::exit(1);
            }
        }
    } else {
        eprintln!("Usage: {} [manuscript-folder-path]", args[0]);
        process::exit(1);
    };

    // Validate manuscript directory using engine
    if let Err(e) = io::validate_manuscript_dir(&config.manuscript_path) {
        let source = if from_config {
            format!(" from config file '{}'", config_path.display())
        } else {
            String::new()
        };
        eprintln!(
            "Error: Manuscript path '{}'{} is invalid: {e}",
            config.manuscript_path.display(),
            source
        );
        process::exit(1);
    }

    let language = Language::from_code(&config.language).unwrap_or_else(|| {
        log::warn!(
            "Unsupported language '{}', falling back to {DEFAULT_LANGUAGE}",
            config.language
        );
        Language::from_code(DEFAULT_LANGUAGE).unwrap_or(&LANGUAGES[0])
    });
    let client = LanguageToolClient::new(config.languagetool_url.clone(), config.request_timeout())?;

    // Create app before touching the terminal so load errors print normally
    let mut app = App::new(config.manuscript_path.clone(), language, Box::new(client))?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("{err:?}");
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && !app.handle_key(key)
        {
            return Ok(());
        }
    }
}
