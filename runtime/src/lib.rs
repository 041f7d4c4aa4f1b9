//! Marrow skeletal animation runtime
//!
//! Samples keyframed clips against elapsed time, blends per-bone poses, and
//! composes the skinning palette consumed by GPU skinning. Mesh storage,
//! shader plumbing, and asset loading live with external collaborators; the
//! runtime only produces transforms and describes draw order.
//!
//! # Modules
//!
//! - [`animator`] - Playback state and keyframe sampling
//! - [`skinning`] - Pose-to-skinning-matrix composition
//! - [`model`] - The model aggregate tying skeleton, clips, and meshes together
//! - [`mesh`] - Mesh attachment records
//! - [`render`] - The rendering collaborator interface

pub mod animator;
pub mod mesh;
pub mod model;
pub mod render;
pub mod skinning;

pub use animator::Animator;
pub use mesh::{Mesh, MeshHandle};
pub use model::{Model, ModelError};
pub use render::{Renderer, ShaderHandle};
pub use skinning::SkinningPalette;
