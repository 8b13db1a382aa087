//! Scripted input for deterministic simulation runs.
//!
//! A replay is a JSON list of input frames, each repeated `repeat` ticks,
//! fed through `GameState::update` at a fixed `dt`.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::game::{GameState, TickInput};

#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    #[serde(default = "default_dt")]
    pub fixed_dt: f32,
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayFrame {
    #[serde(default)]
    pub jump_pressed: bool,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl ReplaySequence {
    pub fn expanded_inputs(&self) -> Vec<TickInput> {
        let mut out = Vec::new();
        for frame in &self.frames {
            for _ in 0..frame.repeat.max(1) {
                out.push(TickInput {
                    jump_pressed: frame.jump_pressed,
                });
            }
        }
        out
    }

    /// Feed every tick into `game`.
    pub fn run(&self, game: &mut GameState) {
        for input in self.expanded_inputs() {
            game.update(input, self.fixed_dt);
        }
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    Ok(replay)
}

fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if replay.fixed_dt <= 0.0 {
        return Err("Replay validation failed: fixed_dt must be > 0".to_string());
    }
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    Ok(())
}

const fn default_dt() -> f32 {
    1.0 / 60.0
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::tests::new_game;
    use crate::outcome::Outcome;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "dash_replay_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    fn write_replay(name_hint: &str, json: &str) -> ReplaySequence {
        let path = temp_file_path(name_hint);
        fs::write(&path, json).expect("write replay file");
        let replay = load_replay_from_path(&path).expect("replay should load");
        let _ = fs::remove_file(path);
        replay
    }

    /// One jump every 1.5 s, which is the obstacle spacing at -200 px/s.
    const TIMED_JUMPS: &str = r#"{
      "fixed_dt": 0.016666667,
      "frames": [
        { "repeat": 60 },
        { "jump_pressed": true }, { "repeat": 89 },
        { "jump_pressed": true }, { "repeat": 89 },
        { "jump_pressed": true }, { "repeat": 89 },
        { "jump_pressed": true }, { "repeat": 89 },
        { "jump_pressed": true }, { "repeat": 89 },
        { "jump_pressed": true }, { "repeat": 89 },
        { "repeat": 100 }
      ]
    }"#;

    #[test]
    fn replay_file_parses_and_expands() {
        let replay = write_replay(
            "parse",
            r#"{
              "frames": [
                { "repeat": 3 },
                { "jump_pressed": true }
              ]
            }"#,
        );
        assert!((replay.fixed_dt - 1.0 / 60.0).abs() < 1e-9);
        let expanded = replay.expanded_inputs();
        assert_eq!(expanded.len(), 4);
        assert!(!expanded[2].jump_pressed);
        assert!(expanded[3].jump_pressed);
    }

    #[test]
    fn empty_replay_is_rejected() {
        let path = temp_file_path("empty");
        fs::write(&path, r#"{ "frames": [] }"#).expect("write replay file");
        let err = load_replay_from_path(&path).expect_err("empty replay should fail");
        assert!(err.contains("frames list is empty"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn timed_jumps_clear_every_obstacle() {
        let replay = write_replay("timed", TIMED_JUMPS);
        let mut game = new_game(GameConfig::default());
        replay.run(&mut game);
        assert!(!game.collided);
        assert_eq!(game.outcome, Outcome::Won);
    }

    #[test]
    fn replay_run_is_deterministic() {
        let replay = write_replay("deterministic", TIMED_JUMPS);

        let mut run_a = new_game(GameConfig::default());
        let mut run_b = new_game(GameConfig::default());
        replay.run(&mut run_a);
        replay.run(&mut run_b);

        assert_eq!(run_a.player, run_b.player);
        assert_eq!(run_a.obstacles, run_b.obstacles);
        assert_eq!(run_a.finish_line, run_b.finish_line);
        assert_eq!(run_a.scroll, run_b.scroll);
        assert_eq!(run_a.outcome, run_b.outcome);
        assert_eq!(run_a.ticks, run_b.ticks);
    }
}
