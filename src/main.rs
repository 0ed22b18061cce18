//! Lava Jump entry point
//!
//! Loads a level plan, runs it with idle input at a fixed frame step and
//! prints the first and last frames.
//!
//! Usage: `lava-jump [levels.json] [level-index] [tuning.json]`

use std::process::ExitCode;

use lava_jump::consts::FRAME_DT;
use lava_jump::levels::{self, LevelPlan};
use lava_jump::render::render_frame;
use lava_jump::sim::{LevelParser, TickInput, tick};
use lava_jump::{SchemaError, Tuning};

/// Upper bound on simulated frames (two minutes at 60 Hz)
const MAX_FRAMES: usize = 60 * 120;

fn load(args: &[String]) -> Result<(LevelPlan, Tuning), SchemaError> {
    let plan = match args.first() {
        Some(path) => {
            let index = match args.get(1) {
                Some(raw) => raw.parse().unwrap_or_else(|_| {
                    log::warn!("Ignoring bad level index {raw:?}, using 0");
                    0
                }),
                None => 0,
            };
            levels::select_plan(levels::load_plans_from_path(path)?, index)?
        }
        None => {
            log::info!("No plan file given, using the demo level");
            levels::demo_plan()
        }
    };

    let tuning = match args.get(2) {
        Some(path) => Tuning::load_from(path)?,
        None => Tuning::default(),
    };

    Ok((plan, tuning))
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Lava Jump starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (plan, tuning) = match load(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            log::error!("Failed to load level: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut level = LevelParser::default().parse(&plan);
    log::info!(
        "Level {}x{} with {} actors",
        level.width(),
        level.height(),
        level.actors().len()
    );
    println!("{}", render_frame(&level));

    let input = TickInput::default();
    let mut frames = 0;
    while !level.is_finished() && frames < MAX_FRAMES {
        tick(&mut level, &input, FRAME_DT, &tuning);
        frames += 1;
    }

    log::info!("Stopped after {frames} frames");
    println!("{}", render_frame(&level));
    ExitCode::SUCCESS
}
