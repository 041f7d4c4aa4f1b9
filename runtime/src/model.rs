//! The model aggregate
//!
//! A model owns one skeleton, a model-wide keyframe store carved into clips,
//! the live pose buffer, and the skinning palette. Meshes are attachment
//! records that receive the model transform every update; their GPU data
//! lives with the renderer.

use glam::{Mat4, Vec3};
use marrow_common::{Clip, Pose, Skeleton};
use thiserror::Error;
use tracing::debug;

use crate::animator::Animator;
use crate::mesh::Mesh;
use crate::render::{Renderer, ShaderHandle};
use crate::skinning::SkinningPalette;

/// Error type for model population
///
/// Playback itself never fails; these guard the loader-facing entry points
/// so the per-frame path can index keyframes without bounds surprises.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model has no skeleton; attach one before keyframes or clips")]
    NoSkeleton,
    #[error("keyframe {index} has {got} bones, skeleton has {expected}")]
    KeyframeBoneCount {
        index: usize,
        got: usize,
        expected: usize,
    },
    #[error("pose has {got} bones, skeleton has {expected}")]
    PoseBoneCount { got: usize, expected: usize },
    #[error("clip '{name}' spans keyframes outside the {frames} stored")]
    ClipOutOfRange { name: String, frames: usize },
}

/// A renderable model instance
///
/// All owned storage is released on drop. The transform attributes are
/// plain public data: they are the broadcast source for attached meshes,
/// not animator state.
#[derive(Debug)]
pub struct Model {
    pub position: Vec3,
    /// Euler rotation in degrees (XYZ order)
    pub rotation: Vec3,
    /// Uniform scale factor
    pub scale: f32,
    pub is_lit: bool,
    pub is_shadow: bool,

    meshes: Vec<Mesh>,
    skeleton: Option<Skeleton>,
    /// Model-wide keyframe store; clips carve ranges out of it
    frames: Vec<Pose>,
    clips: Vec<Clip>,
    animator: Animator,
    pose: Pose,
    palette: SkinningPalette,
}

impl Model {
    /// Create an empty model with no skeleton, clips, or meshes
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
            is_lit: true,
            is_shadow: true,
            meshes: Vec::new(),
            skeleton: None,
            frames: Vec::new(),
            clips: Vec::new(),
            animator: Animator::new(),
            pose: Pose::identity(0),
            palette: SkinningPalette::new(0),
        }
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn skeleton(&self) -> Option<&Skeleton> {
        self.skeleton.as_ref()
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub fn keyframe_count(&self) -> usize {
        self.frames.len()
    }

    /// The live blended pose in local bone space
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Final skinning matrices from the last composition
    pub fn skinning_matrices(&self) -> &[Mat4] {
        self.palette.matrices()
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// Attach a mesh; it starts receiving the model transform on the next
    /// update.
    pub fn attach_mesh(&mut self, mesh: Mesh) {
        self.meshes.push(mesh);
    }

    /// Attach the bone hierarchy.
    ///
    /// Resets the pose buffer and palette to bind size and discards any
    /// previously stored keyframes, clips, and playback state; they were
    /// authored against the old hierarchy.
    pub fn set_skeleton(&mut self, skeleton: Skeleton) {
        let bone_count = skeleton.bone_count();
        debug!("set_skeleton: {bone_count} bones");
        self.pose = Pose::identity(bone_count);
        self.palette = SkinningPalette::new(bone_count);
        self.frames.clear();
        self.clips.clear();
        self.animator = Animator::new();
        self.skeleton = Some(skeleton);
    }

    /// Append one keyframe to the model-wide store.
    pub fn push_keyframe(&mut self, frame: Pose) -> Result<(), ModelError> {
        let Some(skeleton) = &self.skeleton else {
            return Err(ModelError::NoSkeleton);
        };
        if frame.bone_count() != skeleton.bone_count() {
            return Err(ModelError::KeyframeBoneCount {
                index: self.frames.len(),
                got: frame.bone_count(),
                expected: skeleton.bone_count(),
            });
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Register a clip over the stored keyframes and return its index.
    ///
    /// Both the last frame and the playback span must stay inside the
    /// keyframe store: the wrap arithmetic indexes keyframes up to
    /// `span - 1`.
    pub fn add_clip(&mut self, clip: Clip) -> Result<usize, ModelError> {
        if self.skeleton.is_none() {
            return Err(ModelError::NoSkeleton);
        }
        let frames = self.frames.len();
        if clip.last_frame as usize >= frames || clip.span() as usize > frames {
            return Err(ModelError::ClipOutOfRange {
                name: clip.name.clone(),
                frames,
            });
        }
        debug!(
            "add_clip: '{}' frames {}..={} at {} fps",
            clip.name, clip.first_frame, clip.last_frame, clip.sample_rate
        );
        self.clips.push(clip);
        Ok(self.clips.len() - 1)
    }

    /// Select the active clip and rewind it. Out-of-range indices disable
    /// animation; later updates leave the pose untouched.
    pub fn set_animation(&mut self, index: usize) {
        self.animator.set_animation(&self.clips, index);
    }

    /// Overwrite the pose buffer directly, bypassing clip playback.
    ///
    /// Rotations are renormalized on write. The palette is refreshed
    /// immediately so pose-driven control reaches the skinning output even
    /// with no clip active.
    pub fn set_pose(&mut self, frame: &Pose) -> Result<(), ModelError> {
        let expected = self.pose.bone_count();
        if frame.bone_count() != expected {
            return Err(ModelError::PoseBoneCount {
                got: frame.bone_count(),
                expected,
            });
        }
        self.pose.copy_from(frame);
        if let Some(skeleton) = &self.skeleton {
            self.palette.update(skeleton, &self.pose);
        }
        Ok(())
    }

    /// Advance the model by `delta_time` seconds.
    ///
    /// Broadcasts the model transform to every attached mesh, then advances
    /// the active clip and recomposes the skinning palette from the blended
    /// pose.
    pub fn update(&mut self, delta_time: f32) {
        for mesh in &mut self.meshes {
            mesh.position = self.position;
            mesh.rotation = self.rotation;
            mesh.scale = self.scale;
            mesh.is_lit = self.is_lit;
        }

        let Some(skeleton) = &self.skeleton else {
            return;
        };
        if self
            .animator
            .advance(&self.clips, &self.frames, &mut self.pose, delta_time)
        {
            self.palette.update(skeleton, &self.pose);
        }
    }

    /// Describe this frame to the renderer.
    ///
    /// Uploads the skinning palette when a skeleton is present and a clip
    /// is active, signals "no skeleton" otherwise, then issues one draw per
    /// attached mesh.
    pub fn draw<R: Renderer>(&self, renderer: &mut R, shader: ShaderHandle) {
        let palette = (self.skeleton.is_some() && self.animator.active_clip().is_some())
            .then(|| self.palette.matrices());
        renderer.upload_skinning(shader, palette);

        for mesh in &self.meshes {
            renderer.draw_mesh(shader, mesh);
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}
