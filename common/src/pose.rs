//! Local-space bone poses and pose buffers

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Local-space transform of a single bone
///
/// Rotation is kept unit-length: slerp output drifts off the unit sphere,
/// so every write path renormalizes after interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BonePose {
    /// Translation relative to the parent bone
    pub translation: Vec3,
    /// Unit quaternion rotation
    pub rotation: Quat,
    /// Non-uniform scale
    pub scale: Vec3,
}

impl BonePose {
    /// Identity pose (no rotation, no translation, unit scale)
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };
}

impl Default for BonePose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Per-bone pose buffer, indexed identically to the owning skeleton
///
/// One `Pose` doubles as a keyframe snapshot: clips store an ordered
/// sequence of them, and the live buffer is overwritten from two bracketing
/// snapshots each update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    bones: Vec<BonePose>,
}

impl Pose {
    /// Create a pose with every bone at identity
    pub fn identity(bone_count: usize) -> Self {
        Self {
            bones: vec![BonePose::IDENTITY; bone_count],
        }
    }

    /// Create a pose from explicit per-bone transforms
    pub fn from_bones(bones: Vec<BonePose>) -> Self {
        Self { bones }
    }

    /// Number of bones in this buffer
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    /// Per-bone transforms, in skeleton order
    pub fn bones(&self) -> &[BonePose] {
        &self.bones
    }

    /// Overwrite this buffer from an externally supplied pose.
    ///
    /// Each rotation is renormalized on write; the source may carry
    /// denormalized quaternions (hand-authored or decompressed data).
    ///
    /// Both buffers must have the same bone count.
    pub fn copy_from(&mut self, source: &Pose) {
        debug_assert_eq!(self.bones.len(), source.bones.len());
        for (out, src) in self.bones.iter_mut().zip(&source.bones) {
            out.translation = src.translation;
            out.rotation = src.rotation.normalize();
            out.scale = src.scale;
        }
    }

    /// Overwrite this buffer with a blend of two keyframe snapshots.
    ///
    /// `weight` is clamped to [0, 1]; translation and scale interpolate
    /// linearly, rotation spherically with renormalization. Weight 0 yields
    /// `a`, weight 1 yields `b`.
    ///
    /// All three buffers must have the same bone count.
    pub fn blend(&mut self, a: &Pose, b: &Pose, weight: f32) {
        debug_assert_eq!(self.bones.len(), a.bones.len());
        debug_assert_eq!(self.bones.len(), b.bones.len());
        let weight = weight.clamp(0.0, 1.0);
        for (i, out) in self.bones.iter_mut().enumerate() {
            let (pa, pb) = (&a.bones[i], &b.bones[i]);
            out.translation = pa.translation.lerp(pb.translation, weight);
            out.rotation = pa.rotation.slerp(pb.rotation, weight).normalize();
            out.scale = pa.scale.lerp(pb.scale, weight);
        }
    }
}
