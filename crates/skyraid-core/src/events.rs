//! Events emitted by the simulation for audio feedback.

use serde::{Deserialize, Serialize};

/// Sound cue triggered by a simulation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioCue {
    /// A round left the gun.
    Shoot,
    /// A round struck an adversary.
    Hit,
    /// An adversary blew up.
    Explosion,
}

impl AudioCue {
    /// Name the audio backend registers the sound under.
    pub fn name(self) -> &'static str {
        match self {
            AudioCue::Shoot => "shoot",
            AudioCue::Hit => "hit",
            AudioCue::Explosion => "explosion",
        }
    }
}

impl std::fmt::Display for AudioCue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
