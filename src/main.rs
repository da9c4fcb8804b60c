//! Typewriter - looping text animation for the terminal
//!
//! Types, holds and deletes each configured string in turn, with a blinking
//! cursor. Several independent typewriters can be stacked on one screen.

mod config;
mod core;
mod frontend;
mod theme;
mod timeline;
mod widgets;

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(ClapParser)]
#[command(name = "typewriter")]
#[command(about = "Looping typewriter text animation", long_about = None)]
struct Cli {
    /// Texts to cycle through (replaces the configured typewriters)
    #[arg(value_name = "TEXT")]
    texts: Vec<String>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Theme preset (overrides ui.theme)
    #[arg(short, long)]
    theme: Option<String>,

    /// Custom data directory (default: ~/.typewriter)
    /// Can also be set via TYPEWRITER_DIR environment variable
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a config file (or the default config)
    Validate {
        /// Config file to validate
        #[arg(value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Print the timeline of the first typewriter without opening the TUI
    Simulate {
        /// Stop after this many milliseconds
        #[arg(long, default_value_t = 10_000)]
        until_ms: u64,
    },
    /// List built-in themes
    Themes,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Set custom data directory if specified (via CLI or environment variable)
    if let Some(data_dir) = &cli.data_dir {
        std::env::set_var(config::DATA_DIR_ENV, data_dir);
    }
    let data_dir = config::Config::base_dir()?;
    std::fs::create_dir_all(&data_dir)
        .context(format!("Failed to create data directory {:?}", data_dir))?;

    // Initialize logging to file (use RUST_LOG env var to control level, e.g. RUST_LOG=debug)
    // TUI apps can't log to stdout, so we write to a file
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join("typewriter.log"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false) // No color codes in log file
        .init();

    tracing::info!("Using data directory {:?}", data_dir);

    // Handle subcommands
    match cli.command {
        Some(Commands::Validate { ref config }) => {
            let path = config.as_ref().or(cli.config.as_ref());
            return run_validate(path);
        }
        Some(Commands::Themes) => {
            let mut themes: Vec<_> = theme::ThemePresets::all().into_iter().collect();
            themes.sort_by(|a, b| a.0.cmp(&b.0));
            for (id, theme) in themes {
                println!("{:<20} {:<16} {}", id, theme.name, theme.description);
            }
            return Ok(());
        }
        _ => {}
    }

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => config::Config::load_from_path(path)?,
        None => config::Config::load()?,
    };
    if !cli.texts.is_empty() {
        config.override_texts(cli.texts.clone());
    }
    if let Some(theme) = &cli.theme {
        config.ui.theme = theme.clone();
    }

    if let Some(Commands::Simulate { until_ms }) = cli.command {
        return run_simulate(&config, until_ms);
    }

    run_tui(config)
}

/// Load a config and print every validation issue
fn run_validate(path: Option<&PathBuf>) -> Result<()> {
    let loaded = match path {
        Some(path) => {
            println!("Validating config file: {:?}", path);
            config::Config::load_from_path(path)
        }
        None => {
            println!("Validating default config");
            config::Config::load()
        }
    };

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ Failed to load config: {:#}", e);
            std::process::exit(1);
        }
    };

    println!("✓ Config loaded successfully");
    println!("  {} typewriter(s) defined", config.typewriters.len());

    let result = config::validator::validate_config(&config);
    for issue in result.errors() {
        eprintln!("✗ Error: {}", issue.message());
    }
    for issue in result.warnings() {
        println!("⚠ Warning: {}", issue.message());
    }

    if result.issues.is_empty() {
        println!("✓ Config is valid with no issues");
    }
    if !result.is_valid() {
        std::process::exit(1);
    }

    Ok(())
}

/// Print the headless timeline of the first typewriter
fn run_simulate(config: &config::Config, until_ms: u64) -> Result<()> {
    let first = config
        .typewriters
        .first()
        .context("No typewriters configured - add a [[typewriters]] entry or pass texts")?;
    let state = first.build().context("Invalid typewriter configuration")?;

    for frame in timeline::Timeline::new(state, Duration::from_millis(until_ms)) {
        println!("{}", frame);
    }

    Ok(())
}

/// Run TUI frontend
fn run_tui(config: config::Config) -> Result<()> {
    // The frame loop is paced by a tokio interval
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async_run_tui(config))
}

/// Async TUI main loop
async fn async_run_tui(config: config::Config) -> Result<()> {
    use crate::core::AppCore;
    use frontend::{Frontend, FrontendEvent, TuiFrontend};
    use tokio::time::MissedTickBehavior;

    let frame = Duration::from_millis(config.ui.frame_ms.max(1));

    // Create core application state (fails before touching the terminal)
    let mut app_core = AppCore::new(config)?;

    // Create TUI frontend
    let mut frontend = TuiFrontend::new()?;
    let (width, height) = frontend.size();
    tracing::info!("Starting TUI at {}x{}", width, height);

    let started = Instant::now();
    app_core.mount_all(Duration::ZERO);

    let mut frames = tokio::time::interval(frame);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // Main event loop
    while app_core.running {
        frames.tick().await;

        for event in frontend.poll_events()? {
            match event {
                FrontendEvent::Key { code, modifiers } => app_core.handle_key(code, modifiers),
                FrontendEvent::Resize { width, height } => app_core.handle_resize(width, height),
            }
        }

        app_core.tick(started.elapsed());

        // Render if needed
        if app_core.needs_render {
            frontend.render(&app_core)?;
            app_core.needs_render = false;
        }
    }

    // Cancel pending timers before the widgets go away
    app_core.unmount_all();

    // Cleanup
    frontend.cleanup()?;

    Ok(())
}
