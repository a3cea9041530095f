//! Collision predicates for the actor against obstacles and the playfield
//!
//! Pure functions with exact comparisons: no epsilon, no side effects.
//! The actor is treated as its bounding circle; an obstacle is solid
//! everywhere in its column except the gap `[gap_top, gap_top + gap_height]`.

use glam::Vec2;

use super::obstacle::Obstacle;

/// The solid column of an obstacle, as seen by the collision test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapColumn {
    /// Leading (left) edge
    pub x: f32,
    pub width: f32,
    /// Bottom of the top solid region
    pub gap_top: f32,
    /// Top of the bottom solid region
    pub gap_bottom: f32,
}

impl GapColumn {
    pub fn new(x: f32, width: f32, gap_top: f32, gap_height: f32) -> Self {
        Self {
            x,
            width,
            gap_top,
            gap_bottom: gap_top + gap_height,
        }
    }

    pub fn from_obstacle(obstacle: &Obstacle, gap_height: f32) -> Self {
        Self::new(obstacle.x, obstacle.width, obstacle.gap_top, gap_height)
    }
}

/// Check whether a circle overlaps the solid part of an obstacle column
///
/// Horizontal overlap is strict on both sides; vertically the circle must
/// poke above the gap top or below the gap bottom.
pub fn circle_hits_column(center: Vec2, radius: f32, column: &GapColumn) -> bool {
    let within_x = center.x + radius > column.x && center.x - radius < column.x + column.width;
    if !within_x {
        return false;
    }
    let top = center.y - radius;
    let bottom = center.y + radius;
    top < column.gap_top || bottom > column.gap_bottom
}

/// Check whether a circle touches the ceiling or the floor of the playfield
///
/// Inclusive: touching either edge counts as out of bounds.
pub fn circle_out_of_bounds(center: Vec2, radius: f32, playfield_height: f32) -> bool {
    center.y - radius <= 0.0 || center.y + radius >= playfield_height
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column() -> GapColumn {
        // x=100 width=54, gap 200..360
        GapColumn::new(100.0, 54.0, 200.0, 160.0)
    }

    #[test]
    fn test_inside_gap_is_clear() {
        // Horizontal overlap but fully inside the gap
        let hit = circle_hits_column(Vec2::new(130.0, 280.0), 16.0, &column());
        assert!(!hit);
    }

    #[test]
    fn test_overlap_top_region() {
        // top = 199 < 200
        assert!(circle_hits_column(Vec2::new(130.0, 215.0), 16.0, &column()));
        // top = 200 is exactly on the gap edge - not a hit
        assert!(!circle_hits_column(Vec2::new(130.0, 216.0), 16.0, &column()));
    }

    #[test]
    fn test_overlap_bottom_region() {
        // bottom = 361 > 360
        assert!(circle_hits_column(Vec2::new(130.0, 345.0), 16.0, &column()));
        // bottom = 360 is exactly on the gap edge - not a hit
        assert!(!circle_hits_column(Vec2::new(130.0, 344.0), 16.0, &column()));
    }

    #[test]
    fn test_horizontal_edges_are_strict() {
        // Right edge of circle exactly at leading edge: 84 + 16 = 100
        assert!(!circle_hits_column(Vec2::new(84.0, 50.0), 16.0, &column()));
        assert!(circle_hits_column(Vec2::new(84.5, 50.0), 16.0, &column()));
        // Left edge of circle exactly at trailing edge: 170 - 16 = 154
        assert!(!circle_hits_column(Vec2::new(170.0, 50.0), 16.0, &column()));
        assert!(circle_hits_column(Vec2::new(169.5, 50.0), 16.0, &column()));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(circle_out_of_bounds(Vec2::new(0.0, 16.0), 16.0, 640.0));
        assert!(!circle_out_of_bounds(Vec2::new(0.0, 16.5), 16.0, 640.0));
        assert!(circle_out_of_bounds(Vec2::new(0.0, 624.0), 16.0, 640.0));
        assert!(!circle_out_of_bounds(Vec2::new(0.0, 623.5), 16.0, 640.0));
    }

    #[test]
    fn test_reference_scenarios() {
        // Actor at (160, 330) clears an obstacle at x=100 with gap 200..360
        assert!(!circle_hits_column(Vec2::new(160.0, 330.0), 16.0, &column()));
        // Ground: bottom 536 is fine, bottom 641 is not
        assert!(!circle_out_of_bounds(Vec2::new(160.0, 520.0), 16.0, 640.0));
        assert!(circle_out_of_bounds(Vec2::new(160.0, 625.0), 16.0, 640.0));
    }
}
