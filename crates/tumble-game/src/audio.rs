//! Move sound.
//!
//! Playback is handed to an external player process and never waited on.
//! Finished players are reaped on the next cue.

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

/// Fire-and-forget sound trigger.
pub trait AudioCue {
    fn play(&mut self);
}

/// Silent cue, used when no sound file is configured.
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioCue for NullAudio {
    fn play(&mut self) {}
}

/// Spawns `player file` per cue.
#[derive(Debug)]
pub struct ProcessAudio {
    player: String,
    file: PathBuf,
    children: Vec<Child>,
    disabled: bool,
}

impl ProcessAudio {
    pub fn new(player: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            player: player.into(),
            file: file.into(),
            children: Vec::new(),
            disabled: false,
        }
    }

    pub fn in_flight(&self) -> usize {
        self.children.len()
    }

    fn reap(&mut self) {
        self.children.retain_mut(|child| match child.try_wait() {
            Ok(Some(_)) => false,
            Ok(None) => true,
            Err(e) => {
                log::warn!("lost track of audio player: {e}");
                false
            }
        });
    }
}

impl AudioCue for ProcessAudio {
    fn play(&mut self) {
        self.reap();
        if self.disabled {
            return;
        }

        let spawned = Command::new(&self.player)
            .arg(&self.file)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(child) => self.children.push(child),
            Err(e) => {
                // One warning, then silence for the rest of the session.
                log::warn!("audio disabled, could not start {:?}: {e}", self.player);
                self.disabled = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_player_disables_audio() {
        let mut audio = ProcessAudio::new("tumble-no-such-player-7f3a", "move.mp3");
        audio.play();
        assert!(audio.disabled);
        audio.play();
        assert_eq!(audio.in_flight(), 0);
    }

    #[test]
    fn null_audio_is_silent() {
        let mut cue: Box<dyn AudioCue> = Box::new(NullAudio);
        cue.play();
    }
}
