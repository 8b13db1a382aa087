//! Player vs. obstacle hit testing.
//!
//! Nebula cells carry a lot of transparent margin, so each obstacle's box
//! is inset by a fixed padding before the overlap test. The player's box is
//! used as-is.

use dash_core::{AnimFrame, Rect};

/// Inset hitbox of one obstacle.
pub fn obstacle_hitbox(obstacle: &AnimFrame, padding: f32) -> Rect {
    obstacle.bounds().inset(padding)
}

/// Index of the first obstacle whose hitbox overlaps `player`, in array order.
pub fn first_hit(player: &Rect, obstacles: &[AnimFrame], padding: f32) -> Option<usize> {
    obstacles
        .iter()
        .position(|obstacle| obstacle_hitbox(obstacle, padding).overlaps(player))
}

/// Largest padding that still leaves a hitbox for a `width` x `height` cell.
pub fn validate_padding(padding: f32, width: f32, height: f32) -> Result<(), String> {
    if padding < 0.0 || 2.0 * padding > width.min(height) {
        return Err(format!(
            "Collision padding {} does not fit a {}x{} obstacle cell",
            padding, width, height
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use glam::Vec2;

    const PAD: f32 = 20.0;

    fn obstacle_at(x: f32, y: f32) -> AnimFrame {
        // 100x100 cell, hitbox spans [x+20, x+80] x [y+20, y+80]
        AnimFrame::from_sheet((800, 800), 8, 8, 0.0, Vec2::new(x, y))
    }

    fn player_box() -> Rect {
        Rect::new(100.0, 200.0, 50.0, 50.0)
    }

    #[test]
    fn hitbox_is_inset_on_all_sides() {
        let hitbox = obstacle_hitbox(&obstacle_at(0.0, 0.0), PAD);
        assert_eq!(hitbox, Rect::new(20.0, 20.0, 60.0, 60.0));
    }

    #[test]
    fn hitbox_touching_player_edge_does_not_collide() {
        // Hitbox left edge (x + PAD) sits exactly on the player's right edge.
        let obstacle = obstacle_at(150.0 - PAD, 180.0);
        assert_eq!(obstacle_hitbox(&obstacle, PAD).x, player_box().right());
        assert_eq!(first_hit(&player_box(), &[obstacle], PAD), None);

        // One pixel deeper overlaps.
        let obstacle = obstacle_at(149.0 - PAD, 180.0);
        assert_eq!(first_hit(&player_box(), &[obstacle], PAD), Some(0));
    }

    #[test]
    fn transparent_margin_is_forgiven() {
        // The raw boxes overlap by 10px but the inset hitbox does not reach.
        let obstacle = obstacle_at(140.0, 180.0);
        assert!(obstacle.bounds().overlaps(&player_box()));
        assert_eq!(first_hit(&player_box(), &[obstacle], PAD), None);
    }

    #[test]
    fn hitbox_touching_player_top_does_not_collide() {
        // Hitbox bottom edge sits exactly on the player's top edge.
        let obstacle = obstacle_at(90.0, 200.0 - 80.0);
        assert_eq!(obstacle_hitbox(&obstacle, PAD).bottom(), player_box().y);
        assert_eq!(first_hit(&player_box(), &[obstacle], PAD), None);
    }

    #[test]
    fn default_padding_collides_only_strictly_inside() {
        // Padding 50 shrinks a 100x100 cell to the point at its centre.
        let pad = GameConfig::default().collision.padding;
        let player = Rect::new(192.0, 252.0, 128.0, 128.0);
        assert_eq!(obstacle_hitbox(&obstacle_at(0.0, 0.0), pad).width, 0.0);

        // Centre on the player's right edge, then one pixel inside.
        assert_eq!(first_hit(&player, &[obstacle_at(270.0, 280.0)], pad), None);
        assert_eq!(first_hit(&player, &[obstacle_at(269.0, 280.0)], pad), Some(0));

        // Centre on the player's top edge, then one pixel inside.
        assert_eq!(first_hit(&player, &[obstacle_at(200.0, 202.0)], pad), None);
        assert_eq!(first_hit(&player, &[obstacle_at(200.0, 203.0)], pad), Some(0));
    }

    #[test]
    fn first_hit_reports_array_order() {
        let obstacles = [
            obstacle_at(1000.0, 180.0),
            obstacle_at(90.0, 180.0),
            obstacle_at(100.0, 180.0),
        ];
        assert_eq!(first_hit(&player_box(), &obstacles, PAD), Some(1));
    }

    #[test]
    fn padding_must_fit_cell() {
        assert!(validate_padding(50.0, 100.0, 100.0).is_ok());
        assert!(validate_padding(0.0, 100.0, 100.0).is_ok());
        assert!(validate_padding(51.0, 100.0, 100.0).is_err());
        assert!(validate_padding(-1.0, 100.0, 100.0).is_err());
    }
}
