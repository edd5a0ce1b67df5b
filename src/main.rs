//! Spring Putt headless demo
//!
//! Plays a short course with the seeded autoplayer and prints the scorecard.
//!
//! Usage: spring-putt [--seed N] [--mode loose|course] [--settings PATH]

use std::path::PathBuf;

use clap::Parser;
use glam::Vec2;

use spring_putt::autoplay::AutoGolfer;
use spring_putt::consts::SIM_DT;
use spring_putt::host::HeadlessHost;
use spring_putt::sim::ball::DEFAULT_ROLLING_FRICTION;
use spring_putt::sim::{GameEvent, GoalRegion, Hole, SimBall, tick};
use spring_putt::{CourseMode, Settings};

/// Tee and cup for one demo hole
struct Layout {
    tee: Vec2,
    cup: Vec2,
}

const CUP_RADIUS: f32 = 0.25;

const COURSE: [Layout; 3] = [
    Layout {
        tee: Vec2::new(0.0, 0.0),
        cup: Vec2::new(0.0, 6.0),
    },
    Layout {
        tee: Vec2::new(-4.0, 0.0),
        cup: Vec2::new(5.0, 3.0),
    },
    Layout {
        tee: Vec2::new(2.0, -3.0),
        cup: Vec2::new(-10.0, 8.0),
    },
];

/// Give up on a hole after two minutes of simulated time
const MAX_TICKS_PER_HOLE: u32 = 120 * 60;

#[derive(Debug, Parser)]
#[command(name = "spring-putt")]
#[command(about = "Headless Spring Putt demo: autoplays a short course")]
struct Args {
    /// Seed for the demo golfer
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Course mode (loose or course); overrides the settings file
    #[arg(long, value_parser = parse_mode)]
    mode: Option<CourseMode>,

    /// Settings JSON file
    #[arg(long)]
    settings: Option<PathBuf>,
}

fn parse_mode(s: &str) -> Result<CourseMode, String> {
    CourseMode::from_str(s)
        .ok_or_else(|| format!("unknown course mode `{}` (expected loose or course)", s))
}

fn main() {
    env_logger::init();
    log::info!("Spring Putt (headless) starting...");

    let args = Args::parse();
    let mut settings = match &args.settings {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    if let Some(mode) = args.mode {
        settings.apply_mode(mode);
    }
    let seed = args.seed;
    log::info!("Mode: {}, seed: {}", settings.mode.as_str(), seed);

    let mut host = HeadlessHost::new();
    let mut golfer = AutoGolfer::new(seed, DEFAULT_ROLLING_FRICTION);

    let mut index = 0usize;
    while let Some(layout) = COURSE.get(index) {
        let goal = GoalRegion::new(layout.cup, CUP_RADIUS);
        let mut hole = Hole::new(index as u32, SimBall::new(layout.tee), goal, &settings);
        host.reset_display();

        let mut ticks = 0;
        while !hole.is_finished() && ticks < MAX_TICKS_PER_HOLE {
            hole.ball.step(SIM_DT);
            let input = golfer.next_input(&hole.shot, &hole.ball, layout.cup);
            tick(&mut hole, &input, &mut host.services(), SIM_DT);

            for event in hole.drain_events() {
                match event {
                    GameEvent::StrokeCounted { count } => {
                        log::info!("Hole {}: stroke {}", index + 1, count)
                    }
                    GameEvent::GoalRejected { speed } => {
                        log::info!("Hole {}: lipped out at {:.1}", index + 1, speed)
                    }
                    other => log::debug!("{:?}", other),
                }
            }
            ticks += 1;
        }

        if !hole.is_finished() {
            log::warn!("Hole {} timed out, moving on", index + 1);
            hole.abort();
            index += 1;
            continue;
        }
        match host.levels.take_next() {
            Some(next) => index = next as usize,
            None => break,
        }
    }

    let card = &host.scorecard;
    println!("Holes played: {}", card.holes_played());
    for entry in &card.entries {
        println!("  Hole {}: {}", entry.hole_index + 1, entry.strokes);
    }
    println!("Total: {}", card.total());
    match card.to_json() {
        Ok(json) => log::debug!("{}", json),
        Err(e) => log::warn!("Scorecard serialization failed: {}", e),
    }
}
