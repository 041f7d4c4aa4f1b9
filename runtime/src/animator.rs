//! Playback state and keyframe sampling
//!
//! The animator advances playback time, selects the two keyframes bracketing
//! the current instant, and blends them into the live pose buffer. It holds
//! no keyframe data itself; clips and the keyframe store are borrowed from
//! the owning model on every call.

use marrow_common::{Clip, Pose};
use tracing::warn;

/// Advances playback and produces the blended pose for the current instant
#[derive(Debug, Clone, Default)]
pub struct Animator {
    active: Option<usize>,
    time: f32,
    frame: u32,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the active clip, if any
    pub fn active_clip(&self) -> Option<usize> {
        self.active
    }

    /// Current absolute keyframe index
    pub fn current_frame(&self) -> u32 {
        self.frame
    }

    /// Current playback time in seconds
    pub fn current_time(&self) -> f32 {
        self.time
    }

    /// Select a clip and rewind playback to its first frame.
    ///
    /// An out-of-range index disables animation instead of failing; later
    /// [`advance`](Self::advance) calls are no-ops until a valid clip is
    /// selected.
    pub fn set_animation(&mut self, clips: &[Clip], index: usize) {
        let Some(clip) = clips.get(index) else {
            warn!(
                "set_animation: clip index {index} out of range ({} clips), disabling animation",
                clips.len()
            );
            self.active = None;
            return;
        };
        self.active = Some(index);
        self.time = 0.0;
        self.frame = clip.first_frame;
    }

    /// Advance playback by `delta_time` seconds and blend the bracketing
    /// keyframes into `pose`.
    ///
    /// Returns `false` without mutating anything when no clip is active or
    /// when a non-looping clip has run past its span; the caller composes
    /// skinning matrices only on `true`.
    pub fn advance(
        &mut self,
        clips: &[Clip],
        frames: &[Pose],
        pose: &mut Pose,
        delta_time: f32,
    ) -> bool {
        let Some(index) = self.active else {
            return false;
        };
        let clip = &clips[index];

        // Sampling position before time accumulates; its fractional part is
        // the blend weight, its floor the frame offset within the clip.
        let position = self.time * clip.sample_rate;
        let estimate = position as u32;
        let span = clip.span();

        // A non-looping clip freezes once the estimate passes the span.
        if estimate > span && !clip.looping {
            return false;
        }

        self.time += delta_time;
        self.frame = clip.first_frame.saturating_add(estimate);
        let mut next_frame = self.frame.saturating_add(1);

        if self.frame >= span {
            if clip.looping {
                self.time = 0.0;
                self.frame = clip.first_frame;
            } else {
                self.frame = clip.last_frame;
            }
        }

        // The lookahead wraps regardless of the loop flag.
        if next_frame >= span {
            next_frame = clip.first_frame;
        }

        pose.blend(
            &frames[self.frame as usize],
            &frames[next_frame as usize],
            position.fract(),
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use marrow_common::BonePose;

    fn clip(first_frame: u32, last_frame: u32, sample_rate: f32, looping: bool) -> Clip {
        Clip {
            name: "test".into(),
            first_frame,
            last_frame,
            sample_rate,
            looping,
        }
    }

    /// One single-bone keyframe per index, translated to x = index
    fn frames(count: usize) -> Vec<Pose> {
        (0..count)
            .map(|i| {
                Pose::from_bones(vec![BonePose {
                    translation: Vec3::new(i as f32, 0.0, 0.0),
                    ..BonePose::IDENTITY
                }])
            })
            .collect()
    }

    #[test]
    fn test_advance_without_clip_is_noop() {
        let mut animator = Animator::new();
        let frames = frames(3);
        let mut pose = Pose::identity(1);

        assert!(!animator.advance(&[], &frames, &mut pose, 0.1));
        assert_eq!(animator.current_time(), 0.0);
        assert_eq!(pose.bones()[0].translation, Vec3::ZERO);
    }

    #[test]
    fn test_set_animation_resets_playback() {
        let clips = vec![clip(5, 10, 30.0, true)];
        let mut animator = Animator::new();
        animator.time = 2.5;
        animator.frame = 9;

        animator.set_animation(&clips, 0);
        assert_eq!(animator.active_clip(), Some(0));
        assert_eq!(animator.current_time(), 0.0);
        assert_eq!(animator.current_frame(), 5);
    }

    #[test]
    fn test_set_animation_out_of_range_disables() {
        let clips = vec![clip(0, 2, 1.0, true)];
        let frames = frames(3);
        let mut animator = Animator::new();

        animator.set_animation(&clips, 0);
        animator.set_animation(&clips, 1);
        assert_eq!(animator.active_clip(), None);

        // Disabled playback leaves time, frame, and pose untouched
        let mut pose = Pose::identity(1);
        assert!(!animator.advance(&clips, &frames, &mut pose, 0.5));
        assert_eq!(animator.current_time(), 0.0);
        assert_eq!(animator.current_frame(), 0);
        assert_eq!(pose.bones()[0].translation, Vec3::ZERO);
    }

    #[test]
    fn test_time_accumulates_across_calls() {
        let clips = vec![clip(0, 10, 1.0, true)];
        let frames = frames(11);
        let mut animator = Animator::new();
        animator.set_animation(&clips, 0);

        let mut pose = Pose::identity(1);
        animator.advance(&clips, &frames, &mut pose, 0.25);
        animator.advance(&clips, &frames, &mut pose, 0.25);
        assert!((animator.current_time() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_nonlooping_clip_freezes_past_span() {
        // first=0, last=10, span=10, rate=30: the estimate passes the span
        // after time exceeds 11/30s, and playback stops for good.
        let clips = vec![clip(0, 10, 30.0, false)];
        let frames = frames(11);
        let mut animator = Animator::new();
        animator.set_animation(&clips, 0);
        let mut pose = Pose::identity(1);

        for _ in 0..4 {
            assert!(animator.advance(&clips, &frames, &mut pose, 0.1));
        }
        let frozen_time = animator.current_time();
        let frozen_frame = animator.current_frame();
        assert_eq!(frozen_frame, 9);

        // Every further call is an idempotent no-op
        for _ in 0..10 {
            assert!(!animator.advance(&clips, &frames, &mut pose, 0.1));
            assert_eq!(animator.current_time(), frozen_time);
            assert_eq!(animator.current_frame(), frozen_frame);
        }
    }

    #[test]
    fn test_nonlooping_clip_clamps_to_last_frame() {
        let clips = vec![clip(0, 2, 1.0, false)];
        let frames = frames(3);
        let mut animator = Animator::new();
        animator.set_animation(&clips, 0);
        let mut pose = Pose::identity(1);

        // time 2.0 -> estimate 2, frame 2 >= span 2, clamped to last
        animator.time = 2.0;
        assert!(animator.advance(&clips, &frames, &mut pose, 0.1));
        assert_eq!(animator.current_frame(), 2);
    }

    #[test]
    fn test_looping_clip_wraps_to_first_frame() {
        let clips = vec![clip(0, 2, 1.0, true)];
        let frames = frames(3);
        let mut animator = Animator::new();
        animator.set_animation(&clips, 0);
        let mut pose = Pose::identity(1);

        for _ in 0..3 {
            assert!(animator.advance(&clips, &frames, &mut pose, 1.0));
            // Post-call frame stays below the span on every iteration
            assert!(animator.current_frame() < clips[0].span());
        }

        // Third call saw frame >= span: time reset, frame snapped to first
        assert_eq!(animator.current_time(), 0.0);
        assert_eq!(animator.current_frame(), 0);
    }

    #[test]
    fn test_lookahead_wraps_even_without_loop() {
        let clips = vec![clip(0, 2, 1.0, false)];
        let frames = frames(3);
        let mut animator = Animator::new();
        animator.set_animation(&clips, 0);
        let mut pose = Pose::identity(1);

        // frame 1, next would be 2 == span: blend partner wraps to frame 0
        animator.time = 1.5;
        assert!(animator.advance(&clips, &frames, &mut pose, 0.1));
        assert_eq!(animator.current_frame(), 1);
        assert!((pose.bones()[0].translation.x - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_weight_zero_at_integer_boundary_matches_keyframe() {
        let clips = vec![clip(0, 8, 4.0, true)];
        let frames = frames(9);
        let mut animator = Animator::new();
        animator.set_animation(&clips, 0);
        let mut pose = Pose::identity(1);

        // dt of exactly one keyframe period: the sampling position lands on
        // integer values, weight 0, pose identical to keyframe[frame]
        for expected in 0..4 {
            assert!(animator.advance(&clips, &frames, &mut pose, 0.25));
            assert_eq!(animator.current_frame(), expected);
            assert!((pose.bones()[0].translation.x - expected as f32).abs() < 1e-5);
        }
    }

    #[test]
    fn test_blend_weight_is_fractional_position() {
        let clips = vec![clip(0, 4, 2.0, true)];
        let frames = frames(5);
        let mut animator = Animator::new();
        animator.set_animation(&clips, 0);
        let mut pose = Pose::identity(1);

        // position = 0.75 * 2 = 1.5: halfway between keyframes 1 and 2
        animator.time = 0.75;
        assert!(animator.advance(&clips, &frames, &mut pose, 0.1));
        assert_eq!(animator.current_frame(), 1);
        assert!((pose.bones()[0].translation.x - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_offset_clip_samples_absolute_frames() {
        // A clip starting at keyframe 3 samples frames 3.., not 0..
        let clips = vec![clip(3, 5, 1.0, true)];
        let frames = frames(9);
        let mut animator = Animator::new();
        animator.set_animation(&clips, 0);
        let mut pose = Pose::identity(1);

        animator.time = 1.0;
        assert!(animator.advance(&clips, &frames, &mut pose, 0.1));
        assert_eq!(animator.current_frame(), 4);
        assert!((pose.bones()[0].translation.x - 4.0).abs() < 1e-5);
    }
}
