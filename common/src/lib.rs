//! Shared data model for the Marrow skeletal animation runtime
//!
//! This crate provides the pure data types shared between:
//! - `marrow-runtime` (playback and skinning)
//! - asset tooling that authors rigs and clips
//!
//! # Modules
//!
//! - [`pose`] - Local-space bone transforms and per-bone pose buffers
//! - [`skeleton`] - Immutable bone hierarchies with inverse bind matrices
//! - [`clip`] - Keyframed animation clip playback metadata

pub mod clip;
pub mod pose;
pub mod skeleton;

pub use clip::Clip;
pub use pose::{BonePose, Pose};
pub use skeleton::{Bone, MAX_BONES, Skeleton, SkeletonError};
