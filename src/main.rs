//! Terminal front end for the Game of Life simulator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use conways_life::{
    config::{CliOverrides, DecodePolicy, Settings},
    game_of_life::{create_example_boards, EpochEngine, GridState, StateCodec},
    session::Session,
    utils::{BoardFormatter, BoardSummary, ColorOutput},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "conways_life")]
#[command(about = "Conway's Game of Life on a torus")]
#[command(version = "0.1.0")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "config/default.yaml")]
    config: PathBuf,

    /// Board file (overrides config)
    #[arg(short, long, global = true)]
    save_path: Option<PathBuf>,

    /// Milliseconds between epochs (overrides config)
    #[arg(long, global = true)]
    tick_ms: Option<u64>,

    /// Reject board characters other than '0' and '1'
    #[arg(long, global = true)]
    strict: bool,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the board for a number of epochs
    Run {
        /// Epochs to play
        #[arg(short, long, default_value_t = 100)]
        epochs: u64,

        /// Start from a random board instead of the saved one
        #[arg(long)]
        random: bool,

        /// Seed for the random board
        #[arg(long, requires = "random")]
        seed: Option<u64>,

        /// Print every frame
        #[arg(long)]
        show_frames: bool,

        /// Save the final board
        #[arg(long)]
        save: bool,
    },

    /// Advance the saved board and write it back
    Step {
        /// Epochs to advance
        #[arg(short, long, default_value_t = 1)]
        epochs: usize,
    },

    /// Replace the saved board with a random one
    Randomize {
        /// Seed for reproducible boards
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Flip one cell of the saved board
    Toggle {
        #[arg(short)]
        x: usize,

        #[arg(short)]
        y: usize,
    },

    /// Print the saved board
    Show {
        /// Print a JSON summary instead of the board
        #[arg(long)]
        json: bool,
    },

    /// Create a default configuration and example boards
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let Cli { config, save_path, tick_ms, strict, verbose, command } = Cli::parse();
    init_logging(verbose);

    let overrides = CliOverrides {
        save_path,
        tick_interval_ms: tick_ms,
        decode_policy: strict.then_some(DecodePolicy::Strict),
    };

    // Setup must work before any configuration exists
    let settings = || load_settings(&config, &overrides);

    match command {
        Commands::Run { epochs, random, seed, show_frames, save } => {
            run_command(&settings()?, epochs, random, seed, show_frames, save)
        }
        Commands::Step { epochs } => step_command(&settings()?, epochs),
        Commands::Randomize { seed } => randomize_command(&settings()?, seed),
        Commands::Toggle { x, y } => toggle_command(&settings()?, x, y),
        Commands::Show { json } => show_command(&settings()?, json),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_settings(config_path: &PathBuf, overrides: &CliOverrides) -> Result<Settings> {
    let mut settings = Settings::from_file_or_default(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    settings.merge_with_cli(overrides);

    settings.validate().context("Configuration validation failed")?;
    info!(
        width = settings.grid.width,
        height = settings.grid.height,
        save_path = %settings.persistence.save_path.display(),
        "Configuration loaded"
    );
    Ok(settings)
}

/// Read the saved board into a fresh grid
fn load_board(settings: &Settings) -> Result<GridState> {
    let path = &settings.persistence.save_path;
    let mut grid = GridState::new(settings.grid.width, settings.grid.height);
    StateCodec::new(settings.persistence.decode_policy)
        .load(&mut grid, path)
        .with_context(|| format!("Failed to load board from {}", path.display()))?;
    Ok(grid)
}

fn save_board(settings: &Settings, grid: &GridState) -> Result<()> {
    let path = &settings.persistence.save_path;
    StateCodec::save(grid, path)
        .with_context(|| format!("Failed to save board to {}", path.display()))
}

fn run_command(
    settings: &Settings,
    epochs: u64,
    random: bool,
    seed: Option<u64>,
    show_frames: bool,
    save: bool,
) -> Result<()> {
    let mut session = Session::new(settings);

    if random {
        match seed {
            Some(seed) => session.randomize_with(&mut StdRng::seed_from_u64(seed)),
            None => session.randomize(),
        };
    } else {
        session.load().with_context(|| {
            format!("Failed to load board from {}", session.save_path().display())
        })?;
    }

    println!("{}", ColorOutput::info(&format!("▶ Playing {} epochs", epochs)));
    let interval = settings.playback.tick_interval();
    let start_time = Instant::now();

    session.start();
    while session.epoch() < epochs {
        let tick_started = Instant::now();
        session.tick();

        if show_frames {
            println!(
                "{}",
                BoardFormatter::format_frame(session.grid(), session.epoch(), session.playback())
            );
        }

        if let Some(remaining) = interval.checked_sub(tick_started.elapsed()) {
            std::thread::sleep(remaining);
        }
    }
    session.pause();

    println!(
        "{}",
        BoardFormatter::format_frame(session.grid(), session.epoch(), session.playback())
    );
    println!("{}", ColorOutput::success(&format!(
        "✅ Played {} epochs in {:.3}s",
        session.epoch(),
        start_time.elapsed().as_secs_f64()
    )));

    if save {
        session.save().with_context(|| {
            format!("Failed to save board to {}", session.save_path().display())
        })?;
        println!("Board saved to {}", session.save_path().display());
    }

    Ok(())
}

fn step_command(settings: &Settings, epochs: usize) -> Result<()> {
    let mut grid = load_board(settings)?;
    let before = grid.living_count();

    EpochEngine::advance_by(&mut grid, epochs);
    save_board(settings, &grid)?;

    println!("{}", ColorOutput::success(&format!(
        "Advanced {} epoch(s): {} → {} living cells",
        epochs,
        before,
        grid.living_count()
    )));
    Ok(())
}

fn randomize_command(settings: &Settings, seed: Option<u64>) -> Result<()> {
    let mut grid = GridState::new(settings.grid.width, settings.grid.height);
    match seed {
        Some(seed) => grid.randomize_with(&mut StdRng::seed_from_u64(seed)),
        None => grid.randomize(),
    }
    save_board(settings, &grid)?;

    println!("{}", ColorOutput::success(&format!(
        "Random board with {} living cells saved to {}",
        grid.living_count(),
        settings.persistence.save_path.display()
    )));
    Ok(())
}

fn toggle_command(settings: &Settings, x: usize, y: usize) -> Result<()> {
    let mut grid = load_board(settings)?;
    let alive = grid.try_toggle_cell(x, y)?;
    save_board(settings, &grid)?;

    let state = if alive { "alive" } else { "dead" };
    println!("Cell ({}, {}) is now {}", x, y, state);
    Ok(())
}

fn show_command(settings: &Settings, json: bool) -> Result<()> {
    let grid = load_board(settings)?;
    let summary = BoardSummary::of(&grid);

    if json {
        println!("{}", summary.to_json().context("Failed to serialize board summary")?);
        return Ok(());
    }

    println!("Board ({}x{}):", grid.width(), grid.height());
    println!("{}", BoardFormatter::format_grid_with_coords(&grid));
    println!("Living cells: {}", summary.living);
    println!("Density: {:.1}%", summary.density * 100.0);
    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up project structure..."));

    let config_dir = directory.join("config");
    let boards_dir = directory.join("boards");

    for dir in [&config_dir, &boards_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    let defaults = Settings::default();
    let (width, height) = (defaults.grid.width, defaults.grid.height);
    let written = create_example_boards(&boards_dir, width, height, force)
        .context("Failed to create example boards")?;
    println!("Created {} example board(s) in: {}", written, boards_dir.display());

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit {}", config_path.display());
    println!("2. Run: cargo run -- run --save-path boards/glider.txt --show-frames");

    Ok(())
}
