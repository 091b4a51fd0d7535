//! Lobstermania slot simulator
//!
//! Usage:
//!   lobstermania bulk --spins 1000000 --paylines 15   - Bulk spins with a progress bar
//!   lobstermania play --paylines 5                    - Individual games
//!   lobstermania metrics                              - Payback check on the reference reels
//!   lobstermania par --payline 1 --reels              - Exact par sheet and reel listing
//!
//! `--config FILE` loads session settings from JSON or YAML; flags override them.

mod prompt;
mod render;

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use lm_sim::{BatchConfig, run_batch};
use lm_slot::{
    GameSession, ParSheet, Paytable, Progress, ReelLayout, SessionConfig, group_digits, payline,
    session_rng,
};

use crate::prompt::Input;

#[derive(Parser)]
#[command(name = "lobstermania", about = "Five-reel slot simulator", version)]
struct Cli {
    /// Session config file (.json, .yaml or .yml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play many spins and report payback and hit frequency
    Bulk {
        /// Number of spins (asked for when omitted)
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        spins: Option<u64>,
        /// Active paylines, 1 through 15 (asked for when omitted)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=15))]
        paylines: Option<u8>,
        /// Reel layout
        #[arg(long, value_enum)]
        layout: Option<LayoutArg>,
        /// Base RNG seed
        #[arg(long)]
        seed: Option<u64>,
        /// Worker threads (defaults to one per CPU)
        #[arg(short, long)]
        workers: Option<usize>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Play individual games
    Play {
        /// Active paylines, 1 through 15
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=15))]
        paylines: Option<u8>,
        /// Append every payline of every spin to this file
        #[arg(short, long)]
        trace: Option<PathBuf>,
        /// RNG seed
        #[arg(long)]
        seed: Option<u64>,
        /// Reel layout
        #[arg(long, value_enum)]
        layout: Option<LayoutArg>,
    },
    /// Compare simulated payback with the reference figures
    Metrics {
        /// Number of spins
        #[arg(short, long, default_value_t = 1_000_000)]
        spins: u64,
        /// RNG seed
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the exact par sheet for one payline
    Par {
        /// Payline number, 1 through 15
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=15))]
        payline: u8,
        /// Also list every reel strip
        #[arg(short, long)]
        reels: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LayoutArg {
    Reference,
    Shuffled,
}

impl From<LayoutArg> for ReelLayout {
    fn from(layout: LayoutArg) -> Self {
        match layout {
            LayoutArg::Reference => ReelLayout::Reference,
            LayoutArg::Shuffled => ReelLayout::Shuffled,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let file = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Bulk {
            spins,
            paylines,
            layout,
            seed,
            workers,
            json,
        } => run_bulk(file, spins, paylines, layout, seed, workers, json),
        Commands::Play {
            paylines,
            trace,
            seed,
            layout,
        } => run_play(file, paylines, trace, seed, layout),
        Commands::Metrics { spins, seed } => run_metrics(file, spins, seed),
        Commands::Par { payline, reels } => run_par(file, payline, reels),
    }
}

fn load_config(path: Option<&Path>) -> Result<Option<SessionConfig>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let config = SessionConfig::load(path)
        .with_context(|| format!("Failed to load config {}", path.display()))?;
    log::debug!("Loaded {config:?} from {}", path.display());
    Ok(Some(config))
}

/// Apply command-line overrides to the file (or default) settings
fn session_config(
    file: Option<SessionConfig>,
    paylines: Option<u8>,
    layout: Option<LayoutArg>,
    seed: Option<u64>,
) -> SessionConfig {
    let mut config = file.unwrap_or_default();
    if let Some(paylines) = paylines {
        config.active_paylines = paylines;
    }
    if let Some(layout) = layout {
        config.layout = layout.into();
        config.strips = None;
    }
    if seed.is_some() {
        config.seed = seed;
    }
    config
}

fn run_bulk(
    file: Option<SessionConfig>,
    spins: Option<u64>,
    paylines: Option<u8>,
    layout: Option<LayoutArg>,
    seed: Option<u64>,
    workers: Option<usize>,
    json: bool,
) -> Result<()> {
    let mut input = Input::stdin();
    let spins = match spins {
        Some(spins) => spins,
        None => input.ask(
            "Enter the number of spins: ",
            1..=u64::MAX,
            "Please enter a positive number greater than 0",
        )?,
    };
    let paylines = match paylines.or(file.as_ref().map(|c| c.active_paylines)) {
        Some(paylines) => paylines,
        None => input.ask(
            "Enter the number of active paylines (1 through 15): ",
            1..=15,
            "Please enter a positive number between 1 and 15",
        )?,
    };

    let mut batch = BatchConfig::new(session_config(file, Some(paylines), layout, seed), spins);
    batch.workers = workers;

    if json {
        let report = run_batch(&batch, &|_: Progress| {}).context("Bulk run failed")?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("\nPlaying {paylines} active paylines.\n");
    println!("{}", render::progress_header(spins));

    let started = Instant::now();
    let marks = AtomicUsize::new(0);
    let on_progress = |_: Progress| {
        marks.fetch_add(1, Ordering::Relaxed);
        render::progress_mark();
    };
    let report = run_batch(&batch, &on_progress).context("Bulk run failed")?;
    println!("{}", render::progress_padding(marks.load(Ordering::Relaxed)));

    println!("{report}");
    println!("\nRun completed in {:.2?}\n", started.elapsed());
    Ok(())
}

fn run_play(
    file: Option<SessionConfig>,
    paylines: Option<u8>,
    trace: Option<PathBuf>,
    seed: Option<u64>,
    layout: Option<LayoutArg>,
) -> Result<()> {
    let config = session_config(file, paylines, layout, seed);
    let mut session = GameSession::new(config).context("Invalid session settings")?;
    let mut trace = trace.map(|path| open_trace(&path)).transpose()?;
    let mut input = Input::stdin();

    loop {
        println!("\nPlaying {} active paylines.\n", session.active_paylines().get());

        let outcome = session.spin();
        println!("{}", render::outcome(&outcome));
        println!("{}", session.game_stats().game_report());
        session.reset_game_stats();

        if let Some(file) = trace.as_mut() {
            file.write_all(render::trace(&outcome).as_bytes())
                .context("Failed to write payline trace")?;
        }

        println!("\nPress Enter to spin again, P to change the number of paylines, Q to quit.");
        let Some(line) = input.line()? else {
            break;
        };
        match line.trim() {
            "q" | "Q" => break,
            "p" | "P" => {
                let paylines = input.ask(
                    "\nEnter the new number of active paylines (1 through 15): ",
                    1..=15,
                    "Please enter a positive number between 1 and 15",
                )?;
                session.set_active_paylines(paylines)?;
            }
            _ => {}
        }
    }

    println!(
        "\n{}",
        session
            .session_stats()
            .report(session.active_paylines().get())
    );
    Ok(())
}

fn open_trace(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open trace file {}", path.display()))
}

fn run_metrics(file: Option<SessionConfig>, spins: u64, seed: Option<u64>) -> Result<()> {
    let mut config = session_config(file, Some(1), Some(LayoutArg::Reference), seed);
    config.bet_per_line = 1;
    let mut session = GameSession::new(config).context("Invalid session settings")?;

    println!(
        "\nRunning game metrics ({} spins) ...\n",
        group_digits(u128::from(spins))
    );
    println!("{}", render::progress_header(spins));

    let mut marks = 0;
    let report = session.test_metrics(spins, |_| {
        marks += 1;
        render::progress_mark();
    })?;
    println!("{}\n", render::progress_padding(marks));
    println!("{report}");
    Ok(())
}

fn run_par(file: Option<SessionConfig>, number: u8, list_reels: bool) -> Result<()> {
    let config = file.unwrap_or_default();
    let mut rng = session_rng(config.seed);
    let reels = config.reel_set(&mut rng).context("Invalid reel settings")?;
    let line = payline(usize::from(number) - 1)?;

    println!(
        "\n{:?} reels {:?}, {} combinations\n",
        reels.layout(),
        reels.lengths(),
        group_digits(reels.total_combinations())
    );
    if list_reels {
        println!("{reels}\n");
    }
    println!("{}", ParSheet::for_payline(&reels, &Paytable::reference(), line));
    Ok(())
}
