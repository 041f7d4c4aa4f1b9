//! Pose-to-skinning-matrix composition
//!
//! Walks the skeleton in bone-index order, turning each local pose entry
//! into a world-space transform and premultiplying the bone's inverse bind
//! matrix. The output is the palette a skinning shader consumes: one matrix
//! per bone mapping bind-pose vertices into the animated pose.

use glam::Mat4;
use marrow_common::{BonePose, Pose, Skeleton};

/// Local transform for one pose entry, composed scale-first: `S * R * T`
fn local_matrix(pose: &BonePose) -> Mat4 {
    Mat4::from_scale(pose.scale)
        * Mat4::from_quat(pose.rotation)
        * Mat4::from_translation(pose.translation)
}

/// Per-bone skinning matrices, fully recomputed on every update
///
/// `world` is same-pass scratch: children read their parent's world
/// transform from it, so it must be written in bone-index order.
#[derive(Debug, Clone)]
pub struct SkinningPalette {
    world: Vec<Mat4>,
    skinning: Vec<Mat4>,
}

impl SkinningPalette {
    /// Create a palette sized for `bone_count` bones, all identity
    pub fn new(bone_count: usize) -> Self {
        Self {
            world: vec![Mat4::IDENTITY; bone_count],
            skinning: vec![Mat4::IDENTITY; bone_count],
        }
    }

    /// Number of bones this palette holds
    pub fn bone_count(&self) -> usize {
        self.skinning.len()
    }

    /// Final skinning matrices, one per bone in skeleton order
    pub fn matrices(&self) -> &[Mat4] {
        &self.skinning
    }

    /// Raw palette bytes for uniform upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.skinning)
    }

    /// Recompute every skinning matrix from the current local pose.
    ///
    /// Bones are processed in index order; the skeleton guarantees parents
    /// precede children, so `world[parent]` is already written when a child
    /// reads it within the same pass. Root bones take their local transform
    /// as-is.
    pub fn update(&mut self, skeleton: &Skeleton, pose: &Pose) {
        debug_assert_eq!(skeleton.bone_count(), self.skinning.len());
        debug_assert_eq!(pose.bone_count(), self.skinning.len());

        for (i, bone) in skeleton.bones().iter().enumerate() {
            let local = local_matrix(&pose.bones()[i]);
            self.world[i] = match bone.parent {
                Some(parent) => local * self.world[parent],
                None => local,
            };
            self.skinning[i] = bone.inverse_bind * self.world[i];
        }
    }
}
