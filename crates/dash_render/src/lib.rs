pub mod batch;
pub mod camera;
pub mod gpu_context;
pub mod mesh;
pub mod sprite_pipeline;
pub mod texture;
pub mod vertex;

pub use batch::{uv_rect, DrawCall, SpriteBatch, FULL_UV, WHITE};
pub use camera::{Camera2D, CameraUniform};
pub use gpu_context::GpuContext;
pub use mesh::MeshBuffers;
pub use sprite_pipeline::SpritePipeline;
pub use texture::{AssetError, Texture};
pub use vertex::SpriteVertex;
