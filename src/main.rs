use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use intersection_sim::simulation::{Mode, Settings, SimWorld, DEFAULT_FRAME_MS, PHASE_TICK_MS};

#[derive(Parser)]
#[command(name = "intersection_sim")]
#[command(about = "Four-way intersection simulation with an adaptive signal controller")]
struct Cli {
    /// Simulated seconds to run
    #[arg(long, default_value = "60")]
    seconds: u64,

    /// Motion tick interval in milliseconds
    #[arg(long, default_value_t = DEFAULT_FRAME_MS)]
    frame_ms: u64,

    /// Controller mode: normal, rush, smart or manual
    #[arg(long, default_value = "smart")]
    mode: Mode,

    /// Green phase duration in seconds
    #[arg(long, default_value = "15")]
    green_time: u32,

    /// Yellow phase duration in seconds
    #[arg(long, default_value = "3")]
    yellow_time: u32,

    /// Vehicle frequency level (1-10)
    #[arg(long, default_value = "5")]
    vehicle_freq: u32,

    /// Start with emergency mode on
    #[arg(long)]
    emergency: bool,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Draw the intersection map after every simulated second
    #[arg(long)]
    map: bool,

    /// Wall-clock pause between reported seconds, in milliseconds
    #[arg(long, default_value = "0")]
    pace_ms: u64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let settings = Settings::new(cli.green_time, cli.yellow_time, cli.vehicle_freq)
        .context("Invalid signal settings")?;

    run_headless(&cli, settings);
    Ok(())
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(cli: &Cli, settings: Settings) {
    println!("Running intersection simulation in headless mode...");
    println!(
        "Duration: {}s, Frame: {}ms, Mode: {}",
        cli.seconds, cli.frame_ms, cli.mode
    );
    println!();

    let world = match cli.seed {
        Some(seed) => SimWorld::new_with_seed(seed),
        None => SimWorld::new(),
    };
    let mut world = world.with_frame_ms(cli.frame_ms);
    world.set_mode(cli.mode);
    world.set_settings(settings);
    world.start();
    if cli.emergency {
        world.toggle_emergency_mode();
    }

    println!("Initial state:");
    world.print_summary();
    println!();

    for second in 1..=cli.seconds {
        world.advance(PHASE_TICK_MS);

        println!("--- After {}s simulated time ---", second);
        world.print_summary();
        if cli.map {
            world.draw_map();
        }
        println!();

        if cli.pace_ms > 0 && second < cli.seconds {
            std::thread::sleep(std::time::Duration::from_millis(cli.pace_ms));
        }
    }

    world.pause();
    report(&world);
}

fn report(world: &SimWorld) {
    let stats = world.stats();
    info!("=== SIMULATION COMPLETE ===");
    info!("Elapsed time: {:.2}s", world.elapsed_ms() as f32 / 1000.0);
    info!("Final phase: {}", world.phase());
    info!("Vehicles passed: {}", stats.vehicles_passed);
    info!("Active vehicles: {}", stats.total_vehicles);
    info!("Queue length: {}", stats.queue_length);
    info!("Average wait: {:.1}s", stats.avg_wait_time);
    info!("Efficiency: {}%", stats.efficiency);
}
