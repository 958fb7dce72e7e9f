//! Shape generation for 2D primitives
//!
//! All shapes are emitted in playfield pixels (origin top-left, y down) as
//! triangle lists; the pipeline maps them to clip space.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::sim::{Aabb, Bird, GameState, Pipe};

/// Height of the lip at the open end of each pipe
pub const PIPE_RIM_HEIGHT: f32 = 24.0;
/// Darker side strips on each pipe
pub const PIPE_EDGE_WIDTH: f32 = 2.0;

const BIRD_SEGMENTS: u32 = 20;

/// Generate vertices for a filled rectangle
pub fn rect(area: &Aabb, color: [f32; 4]) -> Vec<Vertex> {
    if area.width() <= 0.0 || area.height() <= 0.0 {
        return Vec::new();
    }
    let (min, max) = (area.min, area.max);
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Generate vertices for a filled ellipse
pub fn ellipse(center: Vec2, radii: Vec2, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radii.x * theta1.cos(),
            center.y + radii.y * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radii.x * theta2.cos(),
            center.y + radii.y * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    ellipse(center, Vec2::splat(radius), color, segments)
}

/// Both halves of a pipe: body, side strips and the rim facing the gap
pub fn pipe(pipe: &Pipe, playfield_height: f32) -> Vec<Vertex> {
    let [top, bottom] = pipe.solid_regions(playfield_height);
    let mut vertices = Vec::with_capacity(48);

    for (body, rim_at_bottom) in [(top, true), (bottom, false)] {
        vertices.extend(rect(&body, colors::PIPE_BODY));

        let edge_h = body.height();
        vertices.extend(rect(
            &Aabb::new(body.min.x, body.min.y, PIPE_EDGE_WIDTH, edge_h),
            colors::PIPE_EDGE,
        ));
        vertices.extend(rect(
            &Aabb::new(body.max.x - PIPE_EDGE_WIDTH, body.min.y, PIPE_EDGE_WIDTH, edge_h),
            colors::PIPE_EDGE,
        ));

        let rim_h = PIPE_RIM_HEIGHT.min(body.height());
        let rim_y = if rim_at_bottom {
            body.max.y - rim_h
        } else {
            body.min.y
        };
        vertices.extend(rect(
            &Aabb::new(body.min.x, rim_y, body.width(), rim_h),
            colors::PIPE_RIM,
        ));
    }

    vertices
}

/// Rotate vertices around a pivot
fn rotate_about(vertices: &mut [Vertex], pivot: Vec2, degrees: f32) {
    if degrees == 0.0 {
        return;
    }
    let rot = Vec2::from_angle(degrees.to_radians());
    for v in vertices {
        let p = Vec2::from(v.position) - pivot;
        let r = pivot + rot.rotate(p);
        v.position = r.into();
    }
}

/// The bird: body, wing, eye and beak, tilted with its velocity.
/// `wing_squash` in 0..=1 flattens the wing right after a flap.
pub fn bird(bird: &Bird, wing_squash: f32) -> Vec<Vertex> {
    let s = bird.size;
    let center = Vec2::new(bird.x + s / 2.0, bird.y + s / 2.0);
    let mut vertices = Vec::with_capacity((BIRD_SEGMENTS * 3 * 4 + 3) as usize);

    // Body
    vertices.extend(circle(center, s / 2.0, colors::BIRD_BODY, BIRD_SEGMENTS));

    // Wing on the left half
    let wing_scale = 1.0 - 0.3 * wing_squash.clamp(0.0, 1.0);
    vertices.extend(ellipse(
        center + Vec2::new(-s * 0.15, 0.0),
        Vec2::new(s * 0.25, s * 0.16 * wing_scale),
        colors::BIRD_WING,
        BIRD_SEGMENTS,
    ));

    // Eye and pupil toward the front
    let eye = center + Vec2::new(s * 0.22, -s * 0.12);
    vertices.extend(circle(eye, s * 0.13, colors::BIRD_EYE, BIRD_SEGMENTS));
    vertices.extend(circle(
        eye + Vec2::new(s * 0.05, 0.0),
        s * 0.06,
        colors::BIRD_PUPIL,
        BIRD_SEGMENTS,
    ));

    // Beak
    let tip = center + Vec2::new(s * 0.62, s * 0.05);
    vertices.push(Vertex::new(center.x + s * 0.38, center.y - s * 0.08, colors::BIRD_BEAK));
    vertices.push(Vertex::new(tip.x, tip.y, colors::BIRD_BEAK));
    vertices.push(Vertex::new(center.x + s * 0.38, center.y + s * 0.18, colors::BIRD_BEAK));

    rotate_about(&mut vertices, center, bird.tilt_degrees());
    vertices
}

/// Everything for one frame, back to front
pub fn scene(state: &GameState, wing_squash: f32) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for p in &state.pipes {
        vertices.extend(pipe(p, state.playfield.height));
    }
    vertices.extend(bird(&state.bird, wing_squash));
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Playfield;
    use crate::tuning::Tuning;

    fn test_pipe() -> Pipe {
        Pipe {
            id: 1,
            x: 400.0,
            gap_center: 300.0,
            gap_size: 150.0,
            width: 70.0,
            scored: false,
        }
    }

    #[test]
    fn test_rect_is_two_triangles() {
        let v = rect(&Aabb::new(10.0, 20.0, 30.0, 40.0), colors::PIPE_BODY);
        assert_eq!(v.len(), 6);
        assert_eq!(v[0].position, [10.0, 20.0]);
        assert_eq!(v[5].position, [40.0, 60.0]);
        assert!(rect(&Aabb::new(0.0, 0.0, 0.0, 10.0), colors::PIPE_BODY).is_empty());
    }

    #[test]
    fn test_pipe_stays_out_of_gap() {
        let p = test_pipe();
        let v = pipe(&p, 600.0);
        // Two bodies, four edge strips, two rims
        assert_eq!(v.len(), 8 * 6);
        for vert in &v {
            let y = vert.position[1];
            assert!(y <= p.gap_top() || y >= p.gap_bottom(), "vertex at {} inside gap", y);
        }
    }

    #[test]
    fn test_bird_rotation_keeps_center() {
        let tuning = Tuning::default();
        let mut b = Bird::centered(&tuning, &Playfield::default());
        let level = bird(&b, 0.0);
        b.vel = 10.0;
        let tilted = bird(&b, 0.0);
        assert_eq!(level.len(), tilted.len());
        // The first vertex of the body fan is the center, which rotation fixes
        let c = level[0].position;
        let t = tilted[0].position;
        assert!((c[0] - t[0]).abs() < 1e-3 && (c[1] - t[1]).abs() < 1e-3);
        // The beak tip moved down with a nose-down tilt
        let beak_tip = level.len() - 2;
        assert!(tilted[beak_tip].position[1] > level[beak_tip].position[1]);
    }

    #[test]
    fn test_scene_contains_all_pipes() {
        let mut state = crate::sim::GameState::new(Tuning::default(), Playfield::default());
        let bird_only = scene(&state, 0.0).len();
        state.pipes.push(test_pipe());
        state.pipes.push(Pipe {
            id: 2,
            x: 800.0,
            ..test_pipe()
        });
        assert_eq!(scene(&state, 0.0).len(), bird_only + 2 * 8 * 6);
    }
}
