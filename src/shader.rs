use bytemuck::{Pod, Zeroable};

pub const PARTICLE_SHADER: &str = include_str!("shaders/particles.wgsl");
pub const LINE_SHADER: &str = include_str!("shaders/lines.wgsl");

/// Uniform block shared by the particle and line pipelines.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Uniforms {
    pub view_proj: [[f32; 4]; 4],
    /// Camera right vector in world space (w unused).
    pub camera_right: [f32; 4],
    /// Camera up vector in world space (w unused).
    pub camera_up: [f32; 4],
    /// Sprite diameter in world units.
    pub particle_size: f32,
    pub _padding: [f32; 3],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniforms_layout_matches_wgsl() {
        // mat4 + two vec4 + f32 rounded up to 16 bytes
        assert_eq!(std::mem::size_of::<Uniforms>(), 112);
    }
}
