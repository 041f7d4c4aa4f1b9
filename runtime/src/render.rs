//! Rendering collaborator interface
//!
//! The runtime never touches GPU state itself. `Model::draw` describes the
//! frame through this trait and the renderer issues the actual uniform
//! uploads and draw calls.

use glam::Mat4;

use crate::mesh::Mesh;

/// Handle to a bound shader program
pub type ShaderHandle = u32;

/// Receives the skinning palette and per-mesh draws for one model
pub trait Renderer {
    /// Upload the skeleton state for the coming draws.
    ///
    /// Called once per model, before any mesh. `palette` is `Some` only
    /// when the model has a skeleton and an active clip; `None` tells the
    /// shader to skip skinning entirely.
    fn upload_skinning(&mut self, shader: ShaderHandle, palette: Option<&[Mat4]>);

    /// Draw one attached mesh with the bound shader
    fn draw_mesh(&mut self, shader: ShaderHandle, mesh: &Mesh);
}
