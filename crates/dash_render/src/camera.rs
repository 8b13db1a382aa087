use glam::{Mat4, Vec2};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Screen-space camera: world units are window pixels, the origin is the
/// top-left corner and y grows downward.
pub struct Camera2D {
    pub position: Vec2,
    pub viewport: (u32, u32),
}

impl Camera2D {
    pub fn new(viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            position: Vec2::ZERO,
            viewport: (viewport_width, viewport_height),
        }
    }

    pub fn view_proj(&self) -> Mat4 {
        Mat4::orthographic_rh(
            self.position.x,
            self.position.x + self.viewport.0 as f32,
            self.position.y + self.viewport.1 as f32,
            self.position.y,
            -1.0,
            1.0,
        )
    }

    pub fn build_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_proj().to_cols_array_2d(),
        }
    }
}
