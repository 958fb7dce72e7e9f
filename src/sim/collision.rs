//! Axis-aligned collision between the bird and pipes
//!
//! Contact policy is inclusive on both axes: spans that only touch count as
//! overlapping, and a bird flush with a gap edge has hit the pipe.

use glam::Vec2;

use super::state::{Bird, Pipe};

/// Axis-aligned box in playfield pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Closed-interval overlap on the x axis only
    #[inline]
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x
    }
}

impl Bird {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.size, self.size)
    }
}

impl Pipe {
    /// Solid regions above and below the gap, clipped to the playfield
    pub fn solid_regions(&self, playfield_height: f32) -> [Aabb; 2] {
        let top = self.gap_top().max(0.0);
        let bottom = self.gap_bottom().min(playfield_height);
        [
            Aabb::new(self.x, 0.0, self.width, top),
            Aabb::new(self.x, bottom, self.width, (playfield_height - bottom).max(0.0)),
        ]
    }

    /// Full column the pipe occupies
    fn column(&self) -> Aabb {
        Aabb {
            min: Vec2::new(self.x, f32::NEG_INFINITY),
            max: Vec2::new(self.x + self.width, f32::INFINITY),
        }
    }
}

/// Whether the bird is in contact with the pipe's solid region.
///
/// Only pipes whose column overlaps the bird can collide; inside the column
/// the bird is safe only while strictly inside the gap.
pub fn bird_hits_pipe(bird: &Bird, pipe: &Pipe) -> bool {
    if !pipe.column().overlaps_x(&bird.aabb()) {
        return false;
    }
    let inside_gap = bird.y > pipe.gap_top() && bird.bottom() < pipe.gap_bottom();
    !inside_gap
}

/// Whether any pipe blocks the bird this tick (reported once, however many)
pub fn any_collision(bird: &Bird, pipes: &[Pipe]) -> bool {
    pipes.iter().any(|pipe| bird_hits_pipe(bird, pipe))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bird_at(y: f32) -> Bird {
        Bird {
            x: 200.0,
            y,
            vel: 0.0,
            size: 30.0,
        }
    }

    fn pipe_at(x: f32, gap_center: f32) -> Pipe {
        Pipe {
            id: 1,
            x,
            gap_center,
            gap_size: 150.0,
            width: 70.0,
            scored: false,
        }
    }

    #[test]
    fn test_bird_inside_gap_is_safe() {
        // Gap spans 225..375, bird spans 300..330
        assert!(!bird_hits_pipe(&bird_at(300.0), &pipe_at(190.0, 300.0)));
    }

    #[test]
    fn test_bird_above_gap_collides() {
        assert!(bird_hits_pipe(&bird_at(0.0), &pipe_at(190.0, 590.0)));
    }

    #[test]
    fn test_bird_below_gap_collides() {
        assert!(bird_hits_pipe(&bird_at(400.0), &pipe_at(190.0, 300.0)));
    }

    #[test]
    fn test_flush_with_gap_edge_collides() {
        // Top edge flush with gap top (225)
        assert!(bird_hits_pipe(&bird_at(225.0), &pipe_at(190.0, 300.0)));
        // Bottom edge flush with gap bottom (375)
        assert!(bird_hits_pipe(&bird_at(345.0), &pipe_at(190.0, 300.0)));
        // A hair inside on both sides is safe
        assert!(!bird_hits_pipe(&bird_at(225.5), &pipe_at(190.0, 300.0)));
        assert!(!bird_hits_pipe(&bird_at(344.5), &pipe_at(190.0, 300.0)));
    }

    #[test]
    fn test_horizontal_touch_counts_as_overlap() {
        // Pipe left edge exactly at bird right edge (230)
        assert!(bird_hits_pipe(&bird_at(0.0), &pipe_at(230.0, 590.0)));
        // Pipe trailing edge exactly at bird left edge (200)
        assert!(bird_hits_pipe(&bird_at(0.0), &pipe_at(130.0, 590.0)));
        // Clear on either side
        assert!(!bird_hits_pipe(&bird_at(0.0), &pipe_at(230.5, 590.0)));
        assert!(!bird_hits_pipe(&bird_at(0.0), &pipe_at(129.5, 590.0)));
    }

    #[test]
    fn test_any_collision_reports_once() {
        let pipes = vec![pipe_at(190.0, 590.0), pipe_at(200.0, 590.0)];
        assert!(any_collision(&bird_at(0.0), &pipes));
        assert!(!any_collision(&bird_at(0.0), &[]));
    }

    #[test]
    fn test_solid_regions() {
        let [top, bottom] = pipe_at(100.0, 300.0).solid_regions(600.0);
        assert_eq!(top, Aabb::new(100.0, 0.0, 70.0, 225.0));
        assert_eq!(bottom, Aabb::new(100.0, 375.0, 70.0, 225.0));

        // Gap reaching past the ceiling leaves an empty top region
        let [top, bottom] = pipe_at(100.0, 50.0).solid_regions(600.0);
        assert_eq!(top.height(), 0.0);
        assert_eq!(bottom.min.y, 125.0);
    }
}
