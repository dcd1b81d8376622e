#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a scripted Trail Defence match and prints
//! the resulting event log.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use trail_defence_core::{CellCoord, Difficulty, Event, GameSpeed, MatchConfig, TowerKind};
use trail_defence_simulation::Simulation;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "trail-defence")]
#[command(about = "Plays a scripted Trail Defence match and prints its event log")]
struct Args {
    /// Match configuration in TOML; built-in defaults fill missing keys
    #[arg(long)]
    config: Option<PathBuf>,

    /// Difficulty selected before the first wave; overrides the config file
    #[arg(long, value_enum)]
    difficulty: Option<DifficultyArg>,

    /// Speed multiplier (0, 1, 2 or 4)
    #[arg(long, default_value_t = 1)]
    speed: u32,

    /// Overrides the obstacle layout seed
    #[arg(long)]
    seed: Option<u64>,

    /// Tower placed before the first wave, written as `kind@column,row`
    #[arg(long = "tower", value_parser = parse_placement)]
    towers: Vec<Placement>,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Wall-clock length of one tick in milliseconds
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum DifficultyArg {
    Easy,
    Normal,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(value: DifficultyArg) -> Self {
        match value {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Normal => Difficulty::Normal,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Placement {
    kind: TowerKind,
    cell: CellCoord,
}

/// Entry point for the Trail Defence command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => MatchConfig::default(),
    };
    let mut simulation = prepare(config, &args)?;
    tracing::info!(
        difficulty = ?simulation.difficulty(),
        speed = simulation.speed().factor(),
        towers = simulation.towers().len(),
        "match prepared"
    );

    if !simulation.request_next_wave() {
        bail!("the first wave could not start");
    }

    let tick = Duration::from_millis(args.tick_ms);
    print_events(simulation.elapsed(), simulation.drain_events());
    for _ in 0..args.ticks {
        simulation.tick(tick);
        print_events(simulation.elapsed(), simulation.drain_events());
        if simulation.status().is_over() {
            break;
        }
    }

    println!(
        "status {:?} wave {} health {} money {} towers {}",
        simulation.status(),
        simulation.current_wave().get(),
        simulation.health(),
        simulation.money(),
        simulation.towers().len(),
    );
    Ok(())
}

/// Builds the match from `config`, then applies the command-line overrides
/// and the scripted tower placements.
fn prepare(mut config: MatchConfig, args: &Args) -> Result<Simulation> {
    if let Some(seed) = args.seed {
        config.obstacle_seed = seed;
    }
    let speed = GameSpeed::from_factor(args.speed)
        .with_context(|| format!("unsupported speed multiplier {}", args.speed))?;

    let mut simulation = Simulation::new(config).context("invalid match configuration")?;
    if let Some(difficulty) = args.difficulty {
        simulation
            .set_difficulty(difficulty.into())
            .context("failed to select difficulty")?;
    }
    simulation.set_speed(speed);

    for placement in &args.towers {
        let _ = simulation.place_tower(placement.cell, placement.kind);
    }
    Ok(simulation)
}

fn load_config(path: &Path) -> Result<MatchConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read match config {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse match config {}", path.display()))
}

fn parse_placement(value: &str) -> Result<Placement, String> {
    let (kind, cell) = value
        .split_once('@')
        .ok_or_else(|| format!("expected `kind@column,row`, got `{value}`"))?;
    let kind = match kind.trim().to_ascii_lowercase().as_str() {
        "basic" => TowerKind::Basic,
        "cannon" => TowerKind::Cannon,
        "laser" => TowerKind::Laser,
        other => return Err(format!("unknown tower kind `{other}`")),
    };
    let (column, row) = cell
        .split_once(',')
        .ok_or_else(|| format!("expected `column,row`, got `{cell}`"))?;
    let column = column
        .trim()
        .parse()
        .map_err(|err| format!("invalid column `{column}`: {err}"))?;
    let row = row
        .trim()
        .parse()
        .map_err(|err| format!("invalid row `{row}`: {err}"))?;

    Ok(Placement {
        kind,
        cell: CellCoord::new(column, row),
    })
}

fn print_events(elapsed: Duration, events: Vec<Event>) {
    for event in events {
        if let Some(line) = describe(&event) {
            println!("[{:>8.1}s] {line}", elapsed.as_secs_f32());
        }
    }
}

fn describe(event: &Event) -> Option<String> {
    let line = match event {
        Event::TimeAdvanced { .. } | Event::NextWaveDue => return None,
        Event::EnemySpawned { enemy, kind } => format!("enemy {} spawned ({kind:?})", enemy.get()),
        Event::EnemyKilled { enemy, reward } => {
            format!("enemy {} killed, +{reward} money", enemy.get())
        }
        Event::EnemyReachedEnd { enemy, damage } => {
            format!("enemy {} escaped, -{damage} health", enemy.get())
        }
        Event::WaveStarted { wave, plan } => format!(
            "wave {} started with {} enemies",
            wave.get(),
            plan.total_enemies()
        ),
        Event::WaveStartRejected { reason } => format!("wave not started: {reason}"),
        Event::WaveCompleted { wave } => format!("wave {} completed", wave.get()),
        Event::WavePreparation { duration } => {
            format!("next wave in {:.1}s", duration.as_secs_f32())
        }
        Event::WaveReady => "next wave ready".to_owned(),
        Event::AllWavesCompleted { waves } => format!("victory after {waves} waves"),
        Event::ObstaclesUpdated { blocked } => format!("{blocked} cells blocked"),
        Event::TowerPlaced {
            tower,
            kind,
            cell,
            cost,
        } => format!(
            "tower {} ({kind:?}) placed at {},{} for {cost}",
            tower.get(),
            cell.column(),
            cell.row()
        ),
        Event::TowerPlacementRejected { kind, cell, reason } => format!(
            "{kind:?} tower at {},{} rejected: {reason}",
            cell.column(),
            cell.row()
        ),
        Event::TowerSold { tower, refund } => format!("tower {} sold for {refund}", tower.get()),
        Event::TowerSaleRejected { tower, reason } => {
            format!("tower {} not sold: {reason}", tower.get())
        }
        Event::ProjectileFired { tower, target, .. } => {
            format!("tower {} fired at enemy {}", tower.get(), target.get())
        }
        Event::DifficultyChanged { difficulty } => format!("difficulty set to {difficulty:?}"),
        Event::DifficultyChangeRejected { reason } => format!("difficulty unchanged: {reason}"),
        Event::MatchRestarted => "match restarted".to_owned(),
        Event::GameOver => "game over".to_owned(),
    };
    Some(line)
}
