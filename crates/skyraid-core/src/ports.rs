//! Interfaces to the collaborators that live outside the simulation core.
//!
//! Every port has a null implementation. The core behaves identically with
//! or without a real collaborator attached.

use glam::Vec3;

use crate::commands::{ControlSignal, Toggles};
use crate::enums::EntityKind;
use crate::events::AudioCue;
use crate::state::{FrameSnapshot, GameStats};
use crate::types::{EntityId, VisualHandle};

/// Port for the renderer's scene graph.
pub trait SceneSink: Send {
    /// Create the visual for a freshly spawned entity. `None` is a valid
    /// answer and means the entity has no visual.
    fn attach(&mut self, id: EntityId, kind: EntityKind, position: Vec3) -> Option<VisualHandle>;

    /// Release a visual. Called exactly once per handle, when its entity
    /// leaves its pool.
    fn detach(&mut self, handle: VisualHandle);

    /// Receive the transforms of everything alive after a tick.
    fn sync(&mut self, _snapshot: &FrameSnapshot) {}
}

/// Port for sound playback. Fire-and-forget.
pub trait AudioSink: Send {
    fn play(&mut self, cue: AudioCue);

    fn set_music_enabled(&mut self, _enabled: bool) {}
}

/// Port for the score display.
pub trait HudSink: Send {
    fn publish(&mut self, stats: &GameStats);
}

/// Port for player input.
pub trait ControlSource: Send {
    /// Current control intent, sampled once per frame.
    fn sample(&mut self, dt: f32) -> ControlSignal;

    /// Toggles raised since the previous call. Reading clears them.
    fn take_toggles(&mut self) -> Toggles;
}

/// Scene that renders nothing and hands out no handles.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullScene;

impl SceneSink for NullScene {
    fn attach(&mut self, _id: EntityId, _kind: EntityKind, _position: Vec3) -> Option<VisualHandle> {
        None
    }

    fn detach(&mut self, _handle: VisualHandle) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: AudioCue) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullHud;

impl HudSink for NullHud {
    fn publish(&mut self, _stats: &GameStats) {}
}

/// Hands-off input: neutral stick, no toggles.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullControls;

impl ControlSource for NullControls {
    fn sample(&mut self, _dt: f32) -> ControlSignal {
        ControlSignal::NEUTRAL
    }

    fn take_toggles(&mut self) -> Toggles {
        Toggles::default()
    }
}
