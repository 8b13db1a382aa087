//! CPU-side sprite batching.
//!
//! Quads are appended in paint order. Consecutive quads that sample the
//! same texture collapse into one draw call, so a frame of tiled background
//! layers and a row of obstacles costs a handful of `draw_indexed` calls.

use dash_core::Rect;

use crate::vertex::SpriteVertex;

pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// A contiguous run of indices that share the same texture binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCall<K> {
    pub texture: K,
    pub index_start: u32,
    pub index_count: u32,
}

#[derive(Debug, Clone)]
pub struct SpriteBatch<K> {
    pub vertices: Vec<SpriteVertex>,
    pub indices: Vec<u32>,
    pub draw_calls: Vec<DrawCall<K>>,
}

impl<K: Copy + PartialEq> SpriteBatch<K> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(quads: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(quads * 4),
            indices: Vec::with_capacity(quads * 6),
            draw_calls: Vec::with_capacity(8),
        }
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Append a quad covering `dest` (screen pixels) that samples the
    /// normalized `uv` rectangle `[u0, v0, u1, v1]` of `texture`.
    pub fn push_quad(&mut self, texture: K, dest: Rect, uv: [f32; 4], color: [f32; 4]) {
        let [u0, v0, u1, v1] = uv;
        let base_index = self.vertices.len() as u32;

        self.vertices.push(SpriteVertex {
            position: [dest.x, dest.y],
            tex_coords: [u0, v0],
            color,
        });
        self.vertices.push(SpriteVertex {
            position: [dest.right(), dest.y],
            tex_coords: [u1, v0],
            color,
        });
        self.vertices.push(SpriteVertex {
            position: [dest.right(), dest.bottom()],
            tex_coords: [u1, v1],
            color,
        });
        self.vertices.push(SpriteVertex {
            position: [dest.x, dest.bottom()],
            tex_coords: [u0, v1],
            color,
        });

        let draw_start = self.indices.len() as u32;
        self.indices.extend_from_slice(&[
            base_index,
            base_index + 1,
            base_index + 2,
            base_index,
            base_index + 2,
            base_index + 3,
        ]);

        self.push_draw_call(texture, draw_start, 6);
    }

    /// Append a draw call, merging with the previous one when the texture matches
    /// and indices are contiguous.
    fn push_draw_call(&mut self, texture: K, index_start: u32, index_count: u32) {
        if let Some(last) = self.draw_calls.last_mut() {
            let contiguous = last.index_start + last.index_count == index_start;
            if last.texture == texture && contiguous {
                last.index_count += index_count;
                return;
            }
        }
        self.draw_calls.push(DrawCall {
            texture,
            index_start,
            index_count,
        });
    }

    /// Number of texture bind-group switches the draw calls need.
    pub fn texture_binds(&self) -> usize {
        let mut binds = 0usize;
        let mut current: Option<K> = None;
        for draw in &self.draw_calls {
            if current != Some(draw.texture) {
                current = Some(draw.texture);
                binds += 1;
            }
        }
        binds
    }
}

impl<K: Copy + PartialEq> Default for SpriteBatch<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalized UVs for the pixel rectangle `src` of a `texture_size` sheet.
pub fn uv_rect(src: Rect, texture_size: (u32, u32)) -> [f32; 4] {
    let w = texture_size.0.max(1) as f32;
    let h = texture_size.1.max(1) as f32;
    [src.x / w, src.y / h, src.right() / w, src.bottom() / h]
}

pub const FULL_UV: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_quad_emits_four_vertices_and_six_indices() {
        let mut batch = SpriteBatch::new();
        batch.push_quad(0u8, Rect::new(10.0, 20.0, 30.0, 40.0), FULL_UV, WHITE);
        assert_eq!(batch.vertices.len(), 4);
        assert_eq!(batch.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(batch.vertices[0].position, [10.0, 20.0]);
        assert_eq!(batch.vertices[2].position, [40.0, 60.0]);
        assert_eq!(batch.vertices[2].tex_coords, [1.0, 1.0]);
        assert_eq!(batch.quad_count(), 1);
    }

    #[test]
    fn same_texture_quads_merge_into_one_draw_call() {
        let mut batch = SpriteBatch::new();
        batch.push_quad(1u8, Rect::new(0.0, 0.0, 1.0, 1.0), FULL_UV, WHITE);
        batch.push_quad(1u8, Rect::new(1.0, 0.0, 1.0, 1.0), FULL_UV, WHITE);
        assert_eq!(
            batch.draw_calls,
            vec![DrawCall {
                texture: 1,
                index_start: 0,
                index_count: 12
            }]
        );
    }

    #[test]
    fn texture_switch_starts_new_draw_call() {
        let mut batch = SpriteBatch::new();
        batch.push_quad(1u8, Rect::new(0.0, 0.0, 1.0, 1.0), FULL_UV, WHITE);
        batch.push_quad(2u8, Rect::new(0.0, 0.0, 1.0, 1.0), FULL_UV, WHITE);
        batch.push_quad(1u8, Rect::new(0.0, 0.0, 1.0, 1.0), FULL_UV, WHITE);
        assert_eq!(batch.draw_calls.len(), 3);
        assert_eq!(batch.draw_calls[1].index_start, 6);
        assert_eq!(batch.texture_binds(), 3);
    }

    #[test]
    fn new_batch_has_no_quads() {
        let batch: SpriteBatch<u8> = SpriteBatch::new();
        assert_eq!(batch.quad_count(), 0);
        assert!(batch.draw_calls.is_empty());
        assert_eq!(batch.texture_binds(), 0);
    }

    #[test]
    fn uv_rect_normalizes_sheet_cell() {
        let uv = uv_rect(Rect::new(100.0, 0.0, 100.0, 100.0), (800, 800));
        assert_eq!(uv, [0.125, 0.0, 0.25, 0.125]);
    }
}
