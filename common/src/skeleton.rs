//! Immutable bone hierarchies with inverse bind matrices

use glam::Mat4;
use thiserror::Error;

/// Maximum number of bones for GPU skinning
pub const MAX_BONES: usize = 256;

/// A single bone in the hierarchy
#[derive(Debug, Clone, Copy)]
pub struct Bone {
    /// Parent bone index; `None` for a root bone.
    ///
    /// A present parent index is strictly smaller than the bone's own
    /// index, so a single forward pass always sees parents first.
    pub parent: Option<usize>,
    /// Maps a bind-pose vertex into this bone's local space
    pub inverse_bind: Mat4,
}

impl Bone {
    /// Root bone with the given inverse bind matrix
    pub fn root(inverse_bind: Mat4) -> Self {
        Self {
            parent: None,
            inverse_bind,
        }
    }

    /// Child bone under `parent` with the given inverse bind matrix
    pub fn child(parent: usize, inverse_bind: Mat4) -> Self {
        Self {
            parent: Some(parent),
            inverse_bind,
        }
    }
}

/// Error type for skeleton construction
#[derive(Debug, Error)]
pub enum SkeletonError {
    #[error("skeleton has {0} bones, but maximum is {MAX_BONES}")]
    TooManyBones(usize),
    #[error("bone {bone} references parent {parent}, which does not precede it")]
    BadParent { bone: usize, parent: usize },
}

/// Immutable bone hierarchy, shared by every clip of a model
///
/// Bones are stored parent-before-child. Construction rejects any other
/// ordering, which also rules out self-references and cycles, so matrix
/// composition can run as a single forward pass over the bone array.
#[derive(Debug, Clone)]
pub struct Skeleton {
    bones: Vec<Bone>,
}

impl Skeleton {
    /// Build a skeleton, validating the hierarchy.
    ///
    /// # Errors
    /// - [`SkeletonError::TooManyBones`] if the bone count exceeds [`MAX_BONES`]
    /// - [`SkeletonError::BadParent`] if any parent index is not strictly
    ///   smaller than the bone's own index
    pub fn new(bones: Vec<Bone>) -> Result<Self, SkeletonError> {
        if bones.len() > MAX_BONES {
            return Err(SkeletonError::TooManyBones(bones.len()));
        }
        for (i, bone) in bones.iter().enumerate() {
            if let Some(parent) = bone.parent {
                if parent >= i {
                    return Err(SkeletonError::BadParent { bone: i, parent });
                }
            }
        }
        Ok(Self { bones })
    }

    /// Number of bones in the hierarchy
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    /// Bones in parent-before-child order
    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }
}
