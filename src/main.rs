//! Rocket Range entry point
//!
//! Launches one rocket on the real-time scheduler and reports how it went.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;

use clap::Parser;
use glam::DVec2;

use rocket_range::sim::{FieldBounds, Outcome};
use rocket_range::{RunEvent, Session, SimError, SimSettings, start_run};

#[derive(Parser, Debug)]
#[command(name = "rocket-range")]
#[command(about = "Launch a rocket at a target and see whether it hits")]
struct Cli {
    /// Launch angle in degrees from horizontal
    angle: f64,
    /// Launch velocity
    velocity: f64,
    /// Target x (random if omitted)
    #[arg(long, requires = "target_y")]
    target_x: Option<f64>,
    /// Target y, measured down from the top of the field
    #[arg(long, requires = "target_x")]
    target_y: Option<f64>,
    #[arg(long, default_value_t = rocket_range::consts::DEFAULT_FIELD_WIDTH)]
    width: f64,
    #[arg(long, default_value_t = rocket_range::consts::DEFAULT_FIELD_HEIGHT)]
    height: f64,
    /// Overrides the unit scale from the settings file
    #[arg(long)]
    unit_scale: Option<f64>,
    /// Seed for random target placement
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn run(cli: Cli) -> Result<(Outcome, Session), SimError> {
    let mut settings = match &cli.config {
        Some(path) => SimSettings::load(path)?,
        None => SimSettings::default(),
    };
    if let Some(scale) = cli.unit_scale {
        settings.unit_scale = scale;
    }

    let field = FieldBounds::new(cli.width, cli.height)?;
    let mut session = Session::new(cli.seed, field, settings.clone());
    if let (Some(x), Some(y)) = (cli.target_x, cli.target_y) {
        session.set_target(DVec2::new(x, y));
    }

    let request = session.request(cli.angle, cli.velocity);
    let (tx, rx) = mpsc::channel();
    let handle = start_run(&request, &settings, tx)?;

    for event in rx.iter() {
        match event {
            RunEvent::Frame(frame) => log::debug!(
                "frame {:>4}: x = {:8.2}, y = {:8.2}",
                frame.tick,
                frame.position.x,
                frame.position.y
            ),
            RunEvent::Finished(_) => break,
        }
    }

    let outcome = handle.wait()?;
    Ok((outcome, session))
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Rocket Range starting...");

    let cli = Cli::parse();
    match run(cli) {
        Ok((outcome, mut session)) => {
            let target = session.target();
            let field_height = session.field().height;
            let feedback = session.resolve(&outcome);
            println!(
                "{} at ({:.1}, {:.1}), apex {:.1} above ground (target at ({}, {}))",
                if outcome.hit { "Hit" } else { "Miss" },
                outcome.x,
                outcome.y,
                outcome.height_above_ground(field_height),
                target.x,
                target.y
            );
            println!("{}", feedback.as_str());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
