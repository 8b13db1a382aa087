//! Sprite-sheet animation state.
//!
//! Every animated sprite walks a single row of equally sized cells in its
//! sheet. The state keeps its own timer: once `running_time` reaches
//! `update_time` the timer resets, the frame index advances (wrapping past
//! `max_frame`) and the source rectangle slides to the new cell.

use glam::Vec2;

use crate::rect::Rect;

/// Per-sprite animation and placement state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimFrame {
    /// Source rectangle inside the sprite sheet.
    pub rec: Rect,
    /// Top-left corner in world space.
    pub pos: Vec2,
    pub frame: u32,
    /// Seconds each frame stays on screen.
    pub update_time: f32,
    pub running_time: f32,
}

impl AnimFrame {
    /// Build the state for a sheet of `columns` x `rows` cells, showing the
    /// first cell at `pos`.
    pub fn from_sheet(
        sheet_size: (u32, u32),
        columns: u32,
        rows: u32,
        update_time: f32,
        pos: Vec2,
    ) -> Self {
        let width = sheet_size.0 as f32 / columns.max(1) as f32;
        let height = sheet_size.1 as f32 / rows.max(1) as f32;
        Self {
            rec: Rect::new(0.0, 0.0, width, height),
            pos,
            frame: 0,
            update_time,
            running_time: 0.0,
        }
    }

    /// Accumulate `dt` seconds and step to the next frame when the timer
    /// crosses `update_time`. Frame indices past `max_frame` wrap to 0.
    /// `rec.x` is taken from the new frame index, so the drawn cell is `frame`.
    pub fn advance(&mut self, dt: f32, max_frame: u32) {
        self.running_time += dt;
        if self.running_time >= self.update_time {
            self.running_time = 0.0;
            self.frame += 1;
            if self.frame > max_frame {
                self.frame = 0;
            }
            self.rec.x = self.frame as f32 * self.rec.width;
        }
    }

    /// World-space bounding box.
    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.rec.width, self.rec.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_frame(update_time: f32) -> AnimFrame {
        AnimFrame::from_sheet((600, 100), 6, 1, update_time, Vec2::new(10.0, 20.0))
    }

    #[test]
    fn from_sheet_splits_cells() {
        let anim = AnimFrame::from_sheet((800, 800), 8, 8, 0.1, Vec2::ZERO);
        assert_eq!(anim.rec, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(anim.frame, 0);
        assert_eq!(anim.running_time, 0.0);
    }

    #[test]
    fn advance_waits_for_threshold() {
        let mut anim = make_frame(0.1);
        anim.advance(0.05, 5);
        assert_eq!(anim.frame, 0);
        assert!((anim.running_time - 0.05).abs() < 1e-6);

        anim.advance(0.06, 5);
        assert_eq!(anim.frame, 1);
        assert_eq!(anim.running_time, 0.0);
        assert!((anim.rec.x - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn advance_steps_once_per_crossing() {
        let mut anim = make_frame(0.125);
        // A single large delta still counts as one crossing.
        anim.advance(0.35, 5);
        assert_eq!(anim.frame, 1);

        let mut crossings = 0;
        let mut last = anim.frame;
        for _ in 0..40 {
            anim.advance(0.031_25, 5);
            if anim.frame != last {
                crossings += 1;
                last = anim.frame;
            }
        }
        // 40 * 1/32 s = 1.25 s = 10 crossings of 1/8 s
        assert_eq!(crossings, 10);
    }

    #[test]
    fn frame_wraps_past_max() {
        let mut anim = make_frame(0.0);
        for expected in [1, 2, 3, 4, 5, 0, 1] {
            anim.advance(0.016, 5);
            assert_eq!(anim.frame, expected);
            assert!((anim.rec.x - expected as f32 * 100.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn frame_index_stays_in_range() {
        let mut anim = AnimFrame::from_sheet((800, 800), 8, 8, 1.0 / 16.0, Vec2::ZERO);
        for _ in 0..1000 {
            anim.advance(1.0 / 60.0, 7);
            assert!(anim.frame <= 7);
        }
    }

    #[test]
    fn bounds_use_world_position_and_cell_size() {
        let anim = make_frame(0.1);
        assert_eq!(anim.bounds(), Rect::new(10.0, 20.0, 100.0, 100.0));
    }
}
