//! Headless demo run used by the native binary
//!
//! A bot clicks the oldest live dot once per simulated second against a
//! [`RecordingSurface`], so the whole frame cycle runs without a browser.

use crate::config::GameConfig;
use crate::renderer::RecordingSurface;
use crate::sim::{HudStatus, Stage};

/// Simulated frame length (60 Hz)
pub const FRAME_MS: f64 = 1000.0 / 60.0;
/// The bot clicks once every this many frames
pub const CLICK_EVERY_FRAMES: u64 = 60;
/// Hard stop for runs that neither win nor time out
pub const MAX_FRAMES: u64 = 60 * 60 * 5;

/// Play a seeded session to the end (or `MAX_FRAMES`) and return the final
/// status. `surface` holds the last drawn frame, outcome banner included.
pub fn run_headless(config: GameConfig, seed: u64, surface: &mut RecordingSurface) -> HudStatus {
    let mut stage = Stage::new(config, seed);

    let mut frame = 0u64;
    while !stage.game_over && frame < MAX_FRAMES {
        surface.reset();
        stage.tick(frame as f64 * FRAME_MS, surface);

        if frame % CLICK_EVERY_FRAMES == CLICK_EVERY_FRAMES - 1 {
            let target = stage.live_dots().next().map(|e| e.body.pos);
            if let Some(target) = target {
                stage.pointer_move(target);
                stage.pointer_down(target);
            }
        }
        frame += 1;
    }

    // One more frame so the outcome banner is drawn
    surface.reset();
    stage.tick(frame as f64 * FRAME_MS, surface);

    let status = stage.status();
    log::info!(
        "Demo finished after {} frames: {:?}, level {}, {} clicks",
        frame,
        status.outcome,
        status.level,
        status.clicks
    );
    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LevelTier;
    use crate::sim::{DotPreset, Outcome};

    #[test]
    fn test_demo_runs_to_an_outcome() {
        let mut surface = RecordingSurface::new(1280.0, 720.0);
        let status = run_headless(GameConfig::default(), 42, &mut surface);

        assert!(status.outcome.is_some());
        assert!(status.level >= 1);
        assert!(status.clicks >= 1);
        let banner = match status.outcome {
            Some(Outcome::Won) => "WINNER",
            _ => "GAME OVER",
        };
        assert!(surface.texts().contains(&banner));
    }

    #[test]
    fn test_demo_bot_clears_static_dots() {
        // A still dot is always under the bot's cursor
        let config = GameConfig {
            tiers: vec![LevelTier::new(3, vec![DotPreset::Blue])],
            ..Default::default()
        };
        let mut surface = RecordingSurface::new(800.0, 600.0);
        let status = run_headless(config, 7, &mut surface);

        assert_eq!(status.outcome, Some(Outcome::Won));
        assert_eq!(status.level, 4);
        assert_eq!(status.clicks, 3);
        assert!(surface.texts().contains(&"WINNER"));
    }

    #[test]
    fn test_demo_is_deterministic() {
        let mut a = RecordingSurface::new(800.0, 600.0);
        let mut b = RecordingSurface::new(800.0, 600.0);
        assert_eq!(
            run_headless(GameConfig::default(), 9, &mut a),
            run_headless(GameConfig::default(), 9, &mut b)
        );
        assert_eq!(a.commands, b.commands);
    }
}
