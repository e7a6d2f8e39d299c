#![deny(clippy::all, clippy::pedantic)]

mod scenario;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use physics::{GameSettings, StepOutcome};

/// Headless driver for the vehicle simulation demo circuit.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Simulated seconds per frame.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    frame_interval: f32,

    /// JSON file overriding the built-in terrain settings.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Leave out the chicane barrier on the bottom straight.
    #[arg(long)]
    without_barrier: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => GameSettings::from_path(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => GameSettings::default(),
    };

    tracing::info!("Building demo circuit...");
    let mut scenario = scenario::Scenario::build(settings, !args.without_barrier)
        .context("building demo circuit")?;

    tracing::info!(
        "Starting simulation loop for {} frames with frame_interval = {}...",
        args.frames,
        args.frame_interval
    );
    let mut bounces = 0_u32;
    let mut freezes = 0_u32;
    let mut steering_vetoes = 0_u32;
    for i in 0..args.frames {
        for report in scenario.advance(args.frame_interval) {
            match report.outcome {
                StepOutcome::Clear => {}
                StepOutcome::Bounced | StepOutcome::BouncedHeldHeading => bounces += 1,
                StepOutcome::Frozen => freezes += 1,
            }
            if report.steering_vetoed {
                steering_vetoes += 1;
            }
        }
        if (i + 1) % 50 == 0 {
            if let Some(lead) = scenario.world.vehicles().first() {
                tracing::info!(
                    "Frame {} complete. Lead car at ({:.1}, {:.1}), speed {:.1}",
                    i + 1,
                    lead.position().x,
                    lead.position().y,
                    lead.velocity().length()
                );
            } else {
                tracing::info!("Frame {} complete. No cars to report.", i + 1);
            }
        }
    }

    tracing::info!("Simulation loop finished after {} frames.", args.frames);
    tracing::info!(
        "Waypoints reached: {}. Bounces: {}. Frozen frames: {}. Steering vetoes: {}.",
        scenario.waypoint_captures(),
        bounces,
        freezes,
        steering_vetoes
    );
    for vehicle in scenario.world.vehicles() {
        tracing::info!(
            "Car {:?} finished at ({:.1}, {:.1}) heading {:.1} degrees",
            vehicle.id(),
            vehicle.position().x,
            vehicle.position().y,
            vehicle.display_angle()
        );
    }

    Ok(())
}
