//! Repel headless runner
//!
//! Drives a session with a scripted pointer so the simulation can be run and
//! replayed without a window:
//!
//! ```text
//! repel [settings.json] [ticks]
//! ```
//!
//! Prints the final snapshot as JSON on stdout.

use anyhow::Context;

use repel::{InputEvent, Session, Settings, StepOutcome};

/// Default run length (one minute at 60 Hz)
const DEFAULT_TICKS: u64 = 3600;
/// Scripted pull flip cadence
const PULL_TOGGLE_INTERVAL: u64 = 150;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Repel (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_from(&path)
            .with_context(|| format!("loading settings from {path}"))?,
        None => Settings::default(),
    };
    let ticks = match args.next() {
        Some(n) => n.parse::<u64>().with_context(|| format!("invalid tick count {n:?}"))?,
        None => DEFAULT_TICKS,
    };

    let mut session = Session::new(&settings);
    let (cx, cy) = settings.start_position();
    let radius = (settings.arena_width.min(settings.arena_height) / 4) as f64;

    for t in 0..ticks {
        let mut events = Vec::with_capacity(2);

        // Orbit the start position, like a player circling the arena
        let angle = t as f64 * 0.02;
        events.push(InputEvent::PointerMoved {
            x: cx + (radius * angle.cos()) as i64,
            y: cy + (radius * angle.sin()) as i64,
        });
        if t > 0 && t % PULL_TOGGLE_INTERVAL == 0 {
            events.push(InputEvent::TogglePull);
        }

        if session.step(&events) == StepOutcome::Quit {
            break;
        }

        if (t + 1) % settings.tick_rate_hz as u64 == 0 {
            let world = session.world();
            log::info!(
                "Frame {}: score {} (top {}), {} baddies, {} bullets, {} downed",
                world.frame,
                world.score,
                world.top_score,
                world.baddies.len(),
                world.bullets.len(),
                world.downed.len()
            );
        }
    }

    let snapshot = session.snapshot();
    log::info!(
        "Finished after {} frames: score {}, top score {}",
        snapshot.frame,
        snapshot.score,
        snapshot.top_score
    );
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
