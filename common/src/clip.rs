//! Keyframed animation clip playback metadata

use serde::{Deserialize, Serialize};

/// Playback metadata for one keyframed animation
///
/// Clips do not own keyframe data. `first_frame`/`last_frame` index into a
/// model-wide keyframe store, so several clips of one model share a single
/// recording laid out back to back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    /// Clip name from the source asset
    pub name: String,
    /// Index of this clip's first keyframe in the model-wide store
    pub first_frame: u32,
    /// Index of this clip's last keyframe in the model-wide store
    pub last_frame: u32,
    /// Playback rate in keyframes per second
    pub sample_rate: f32,
    /// Whether playback wraps back to `first_frame` at the end
    pub looping: bool,
}

impl Clip {
    /// Playback span used as the wrap/clamp boundary.
    ///
    /// The span is `last_frame + first_frame`, not the frame count.
    /// Every shipped clip is timed against this sum; changing the formula
    /// retimes them all.
    pub fn span(&self) -> u32 {
        self.last_frame + self.first_frame
    }
}
