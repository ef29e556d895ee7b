//! Shape generation for 2D primitives
//!
//! Everything is emitted as triangle lists in field pixels (origin top-left,
//! y down). The pipeline maps pixels to clip space.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::Rgba;

/// Scale a color's alpha
#[inline]
pub fn fade(color: Rgba, alpha: f32) -> Rgba {
    [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
}

fn lerp_color(a: Rgba, b: Rgba, t: f32) -> Rgba {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

fn quad(out: &mut Vec<Vertex>, corners: [Vec2; 4], colors: [Rgba; 4]) {
    // Corners in order: a-b along one edge, d-c along the opposite edge
    let [a, b, c, d] = corners;
    let [ca, cb, cc, cd] = colors;
    out.push(Vertex::new(a.x, a.y, ca));
    out.push(Vertex::new(b.x, b.y, cb));
    out.push(Vertex::new(d.x, d.y, cd));

    out.push(Vertex::new(d.x, d.y, cd));
    out.push(Vertex::new(b.x, b.y, cb));
    out.push(Vertex::new(c.x, c.y, cc));
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Rgba, segments: u32) -> Vec<Vertex> {
    ellipse(center, radius, radius, color, segments)
}

/// Generate vertices for an axis-aligned filled ellipse
pub fn ellipse(center: Vec2, rx: f32, ry: f32, color: Rgba, segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + rx * theta1.cos(),
            center.y + ry * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + rx * theta2.cos(),
            center.y + ry * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(center: Vec2, inner_radius: f32, outer_radius: f32, color: Rgba, segments: u32) -> Vec<Vertex> {
    arc_band(center, inner_radius, outer_radius, 0.0, 2.0 * PI, color, segments)
}

/// Generate vertices for part of a ring, sweeping clockwise on screen from
/// `start` (radians, 0 = +x)
pub fn arc_band(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    start: f32,
    sweep: f32,
    color: Rgba,
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(1);
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = start + (i as f32 / segments as f32) * sweep;
        let theta2 = start + ((i + 1) as f32 / segments as f32) * sweep;
        let (d1, d2) = (Vec2::from_angle(theta1), Vec2::from_angle(theta2));

        quad(
            &mut vertices,
            [
                center + d1 * inner_radius,
                center + d1 * outer_radius,
                center + d2 * outer_radius,
                center + d2 * inner_radius,
            ],
            [color; 4],
        );
    }

    vertices
}

/// Filled circle shaded by radial color stops `(t, color)`, t from 0 at the
/// center to 1 at the rim. Stops must be sorted by t.
pub fn radial_gradient(center: Vec2, radius: f32, stops: &[(f32, Rgba)], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    let Some(&(_, core)) = stops.first() else {
        return vertices;
    };
    let segments = segments.max(3);

    // Solid core out to the first stop
    let first_r = stops[0].0 * radius;
    if first_r > 0.0 {
        vertices.extend(circle(center, first_r, core, segments));
    }

    for pair in stops.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        let (r0, r1) = (t0 * radius, t1 * radius);
        for i in 0..segments {
            let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
            let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
            let (d1, d2) = (Vec2::from_angle(theta1), Vec2::from_angle(theta2));
            if r0 <= 0.0 {
                vertices.push(Vertex::new(center.x, center.y, c0));
                let (p1, p2) = (center + d1 * r1, center + d2 * r1);
                vertices.push(Vertex::new(p1.x, p1.y, c1));
                vertices.push(Vertex::new(p2.x, p2.y, c1));
            } else {
                quad(
                    &mut vertices,
                    [center + d1 * r0, center + d1 * r1, center + d2 * r1, center + d2 * r0],
                    [c0, c1, c1, c0],
                );
            }
        }
    }

    vertices
}

/// Generate vertices for an axis-aligned rectangle
pub fn rect(min: Vec2, size: Vec2, color: Rgba) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    quad(
        &mut vertices,
        [
            min,
            Vec2::new(min.x + size.x, min.y),
            min + size,
            Vec2::new(min.x, min.y + size.y),
        ],
        [color; 4],
    );
    vertices
}

/// Full-width rectangle with a top-to-bottom gradient through `stops`
/// (`(t, color)`, t from 0 at the top to 1 at the bottom)
pub fn vertical_gradient(min: Vec2, size: Vec2, stops: &[(f32, Rgba)]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(stops.len().saturating_sub(1) * 6);
    for pair in stops.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        let y0 = min.y + size.y * t0;
        let y1 = min.y + size.y * t1;
        quad(
            &mut vertices,
            [
                Vec2::new(min.x, y0),
                Vec2::new(min.x + size.x, y0),
                Vec2::new(min.x + size.x, y1),
                Vec2::new(min.x, y1),
            ],
            [c0, c0, c1, c1],
        );
    }
    vertices
}

pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: Rgba) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}

/// Thick line through `points`. Alpha ramps from `tail_alpha` at the first
/// point to full at the last.
pub fn polyline(points: &[Vec2], width: f32, color: Rgba, tail_alpha: f32) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }

    let mut vertices = Vec::with_capacity((points.len() - 1) * 6);
    let half = width / 2.0;
    let last = (points.len() - 1) as f32;

    for (i, seg) in points.windows(2).enumerate() {
        let (p1, p2) = (seg[0], seg[1]);
        let dir = (p2 - p1).normalize_or_zero();
        // Perpendicular for width
        let perp = Vec2::new(-dir.y, dir.x) * half;

        let t1 = i as f32 / last;
        let t2 = (i + 1) as f32 / last;
        let color1 = fade(color, tail_alpha + (1.0 - tail_alpha) * t1);
        let color2 = fade(color, tail_alpha + (1.0 - tail_alpha) * t2);

        quad(
            &mut vertices,
            [p1 + perp, p2 + perp, p2 - perp, p1 - perp],
            [color1, color2, color2, color1],
        );
    }

    vertices
}

/// Interpolate a gradient's color at `t`
pub fn sample_stops(stops: &[(f32, Rgba)], t: f32) -> Rgba {
    match stops {
        [] => [0.0; 4],
        [(_, only)] => *only,
        _ => {
            for pair in stops.windows(2) {
                let (t0, c0) = pair[0];
                let (t1, c1) = pair[1];
                if t <= t1 {
                    let span = (t1 - t0).max(f32::EPSILON);
                    return lerp_color(c0, c1, ((t - t0) / span).clamp(0.0, 1.0));
                }
            }
            stops[stops.len() - 1].1
        }
    }
}
