//! Headless autoplay runner (default binary).
//!
//! Plays a number of random adjacent swaps against a seeded board and prints
//! the final session statistics as JSON. Useful for smoke-testing rule
//! changes and for generating event logs.
//!
//! ```text
//! flow-crush [SEED] [--events]
//! ```
//!
//! `FLOWCRUSH_SEED` and `FLOWCRUSH_TURNS` are read when no argument is given.
//! Engine and pressure settings come from the usual `FLOWCRUSH_*` variables.

use anyhow::{Context, Result};

use flow_crush::core::{GameSession, SimpleRng, SwapOutcome};
use flow_crush::types::GridPos;

/// Simulated time between turns, in seconds.
const TURN_SECS: f32 = 0.5;
const DEFAULT_TURNS: u32 = 50;

fn main() -> Result<()> {
    env_logger::init();

    let mut seed = std::env::var("FLOWCRUSH_SEED")
        .ok()
        .and_then(|s| s.parse::<u32>().ok());
    let mut print_events = false;
    for arg in std::env::args().skip(1) {
        if arg == "--events" {
            print_events = true;
        } else {
            seed = Some(arg.parse().with_context(|| format!("invalid seed `{}`", arg))?);
        }
    }
    let turns = std::env::var("FLOWCRUSH_TURNS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_TURNS);

    let mut session = GameSession::from_env().context("invalid FLOWCRUSH_* configuration")?;
    session.start(seed)?;
    session.drain_events();

    let (width, height) = {
        let board = session.engine().board();
        (board.width() as u32, board.height() as u32)
    };
    let mut picker = SimpleRng::new(seed.unwrap_or(1));
    let mut resolved = 0;

    for _ in 0..turns {
        let a = GridPos::new(
            picker.next_range(width) as i32,
            picker.next_range(height) as i32,
        );
        let (dx, dy) = match picker.next_range(4) {
            0 => (1, 0),
            1 => (-1, 0),
            2 => (0, 1),
            _ => (0, -1),
        };
        let b = a.offset(dx, dy);
        if !session.engine().board().contains(b) {
            continue;
        }

        if let SwapOutcome::Resolved(_) = session.swap(a, b)? {
            resolved += 1;
        }
        session.advance(TURN_SECS);

        for event in session.drain_events() {
            if print_events {
                println!("{}", serde_json::to_string(&event)?);
            }
        }
    }

    log::info!(
        "{} of {} turns matched, pressure {:.2}",
        resolved,
        turns,
        session.pressure().current()
    );
    let stats = session.end()?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
