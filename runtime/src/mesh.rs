//! Mesh attachment records
//!
//! Vertex and index data live with the renderer; the model only carries the
//! transform and lighting fields it broadcasts to each attachment every
//! update.

use glam::Vec3;

/// Handle to GPU mesh data owned by the renderer
pub type MeshHandle = u32;

/// A mesh attached to a model
#[derive(Debug, Clone, Copy)]
pub struct Mesh {
    /// Renderer-side mesh resource
    pub handle: MeshHandle,
    pub position: Vec3,
    /// Euler rotation in degrees (XYZ order)
    pub rotation: Vec3,
    /// Uniform scale factor
    pub scale: f32,
    pub is_lit: bool,
}

impl Mesh {
    pub fn new(handle: MeshHandle) -> Self {
        Self {
            handle,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
            is_lit: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_defaults() {
        let mesh = Mesh::new(7);
        assert_eq!(mesh.handle, 7);
        assert_eq!(mesh.position, Vec3::ZERO);
        assert_eq!(mesh.scale, 1.0);
        assert!(mesh.is_lit);
    }
}
