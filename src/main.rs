//! Heaven and Earth - host process
//!
//! Loads the player store, catches everyone up on time spent offline and
//! then either runs the live tick loop or executes a single command.

use heaven_and_earth::core::config::{self, set_config, GameConfig};
use heaven_and_earth::core::error::{HeavenError, Result};
use heaven_and_earth::core::types::{now_timestamp, PlayerId, Timestamp};
use heaven_and_earth::entity::{CoreStats, Player};
use heaven_and_earth::simulation::PlayerService;

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::time::MissedTickBehavior;
use tracing_subscriber::EnvFilter;

/// Passive xianxia cultivation driven by wall-clock time
#[derive(Parser, Debug)]
#[command(name = "heaven-and-earth")]
#[command(about = "Run the cultivation engine or inspect and command cultivators")]
struct Args {
    /// Host configuration file (defaults apply if missing)
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the configured data directory
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Seed for reproducible breakthroughs and tribulations
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Catch up, then tick every player on a timer until ctrl-c
    Run,
    /// Apply offline time once and exit
    CatchUp,
    /// Register a new cultivator
    Register { id: u64, name: String },
    /// Show a cultivator's profile
    Status {
        id: u64,
        /// Print machine-readable JSON instead of the profile
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Attempt to establish foundation from the plateau
    Breakthrough { id: u64 },
    /// Record travel towards a destination
    Travel {
        id: u64,
        distance: u64,
        destination: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = GameConfig::load(&args.config)?;
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate().map_err(HeavenError::InvalidConfig)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let now = now_timestamp();
    let mut service = PlayerService::load(&config.data_dir, config.seed, now)?;
    print_notes(&service.apply_offline_ticks(now)?);

    if set_config(config).is_err() {
        tracing::warn!("host config was already set");
    }

    match args.command {
        Command::Run => {
            let rt = Runtime::new()?;
            rt.block_on(run_live(&mut service, config::config().live_tick_interval_secs))?;
        }
        Command::CatchUp => {
            println!("Caught up {} cultivator(s).", service.player_count());
        }
        Command::Register { id, name } => {
            let player = service.register(PlayerId(id), &name, now)?;
            println!(
                "{} has begun cultivating as a {} qi cultivator.",
                player.name,
                player.cultivation.qi_type()
            );
        }
        Command::Status { id, json } => {
            let id = PlayerId(id);
            let player = service.get(id).ok_or(HeavenError::PlayerNotFound(id))?;
            let report = StatusReport::new(&service, player, now);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_profile(&report);
            }
        }
        Command::Breakthrough { id } => {
            let (_, message) = service.attempt_breakthrough(PlayerId(id))?;
            println!("{}", message);
        }
        Command::Travel {
            id,
            distance,
            destination,
        } => {
            println!("{}", service.travel(PlayerId(id), distance, &destination)?);
        }
    }

    Ok(())
}

async fn run_live(service: &mut PlayerService, interval_secs: u64) -> Result<()> {
    tracing::info!(interval_secs, "live tick loop started");

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; offline catch-up already ran
    interval.tick().await;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                print_notes(&service.apply_live_tick(now_timestamp())?);
            }
            result = &mut shutdown => {
                result?;
                tracing::info!("shutdown requested");
                break;
            }
        }
    }

    service.save()
}

fn print_notes(notes: &[String]) {
    for note in notes {
        println!("{}", note);
    }
}

#[derive(Serialize)]
struct StatusReport<'a> {
    player: &'a Player,
    title: String,
    date: String,
    age_years: f64,
    lifespan_years: f64,
    remaining_lifespan_years: f64,
    required_exp: f64,
    breakthrough_chance: f64,
    ticks_until_breakthrough: f64,
    effective_stats: CoreStats,
    time_flow: f64,
}

impl<'a> StatusReport<'a> {
    fn new(service: &PlayerService, player: &'a Player, now: Timestamp) -> Self {
        let calendar = service.calendar();
        Self {
            title: player.cultivation_title(),
            date: calendar.format_date(now),
            age_years: player.age_years(calendar, now),
            lifespan_years: player.lifespan_years(),
            remaining_lifespan_years: player.remaining_lifespan_years(calendar, now),
            required_exp: player.cultivation.required_exp(),
            breakthrough_chance: player.cultivation.breakthrough_chance(),
            ticks_until_breakthrough: player.cultivation.ticks_until_breakthrough(),
            effective_stats: player.effective_stats(),
            time_flow: service
                .worlds()
                .time_flow_for(player.world_id.as_deref(), player.zone_id.as_deref()),
            player,
        }
    }
}

fn print_profile(report: &StatusReport<'_>) {
    let player = report.player;
    let cultivation = &player.cultivation;

    println!("=== {} ===", player.name);
    println!("{}", report.date);
    println!("Realm:     {}", report.title);
    println!(
        "Exp:       {:.1} / {:.1}",
        cultivation.exp(),
        report.required_exp
    );
    println!(
        "Qi:        {} {} ({:.2} exp/tick)",
        cultivation.qi_quality(),
        cultivation.qi_type(),
        cultivation.cultivation_rate()
    );
    if cultivation.foundation_bar_active() {
        println!(
            "Foundation: {:.0}% (breakthrough chance {:.0}%)",
            cultivation.foundation_progress() * 100.0,
            report.breakthrough_chance * 100.0
        );
    }
    if report.ticks_until_breakthrough.is_finite() {
        println!("Next breakthrough in ~{:.0} ticks", report.ticks_until_breakthrough.ceil());
    }
    println!(
        "Age:       {:.1} / {:.0} years ({:.1} remaining)",
        report.age_years, report.lifespan_years, report.remaining_lifespan_years
    );
    if (report.time_flow - 1.0).abs() > f64::EPSILON {
        println!("Time flow: x{:.2}", report.time_flow);
    }

    let stats = &report.effective_stats;
    println!(
        "Health {:.0}  Qi {:.0}  Attack {:.0}  Defense {:.0}  Speed {:.0}",
        stats.health, stats.qi, stats.attack, stats.defense, stats.speed
    );

    let t = &player.talents;
    println!(
        "Talents: STR {}  AGI {}  CON {}  SPI {}  COM {}",
        t.strength, t.agility, t.constitution, t.spirit, t.comprehension
    );

    for (key, slot) in &player.equipment {
        println!("  {:<9} {} ({})", slot.name, slot.display_value(), key);
    }

    let s = &player.stats;
    println!(
        "Hours cultivated {:.1}, tribulations survived {}, steps travelled {}, enemies defeated {}",
        s.hours_cultivated, s.tribulations_survived, s.steps_travelled, s.enemies_defeated
    );
}
