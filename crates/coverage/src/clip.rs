//! Exact ring-to-rectangle clipping.
//!
//! Sutherland–Hodgman against an axis-aligned rectangle. The clip window
//! is convex, so the clipped ring encloses exactly the intersection area;
//! any degenerate bridge edges the algorithm introduces lie on the window
//! boundary and enclose zero area.

use clip_common::BoundingBox;
use geo_types::{Coord, LineString};

/// Area of `ring ∩ rect`.
pub(crate) fn clipped_ring_area(ring: &LineString<f64>, rect: &BoundingBox) -> f64 {
    shoelace_area(&clip_ring(&ring.0, rect)).abs()
}

/// Clip a ring (closed or open vertex list) to a rectangle.
fn clip_ring(points: &[Coord<f64>], rect: &BoundingBox) -> Vec<Coord<f64>> {
    let mut subject: Vec<Coord<f64>> = points.to_vec();
    if subject.len() > 1 && subject.first() == subject.last() {
        subject.pop();
    }

    subject = clip_edge(&subject, |p| p.x >= rect.min_x, |a, b| at_x(a, b, rect.min_x));
    subject = clip_edge(&subject, |p| p.x <= rect.max_x, |a, b| at_x(a, b, rect.max_x));
    subject = clip_edge(&subject, |p| p.y >= rect.min_y, |a, b| at_y(a, b, rect.min_y));
    subject = clip_edge(&subject, |p| p.y <= rect.max_y, |a, b| at_y(a, b, rect.max_y));
    subject
}

fn clip_edge(
    points: &[Coord<f64>],
    inside: impl Fn(&Coord<f64>) -> bool,
    intersect: impl Fn(&Coord<f64>, &Coord<f64>) -> Coord<f64>,
) -> Vec<Coord<f64>> {
    let mut out = Vec::with_capacity(points.len() + 4);
    let Some(&last) = points.last() else {
        return out;
    };

    let mut prev = last;
    let mut prev_inside = inside(&prev);
    for &current in points {
        let current_inside = inside(&current);
        if current_inside {
            if !prev_inside {
                out.push(intersect(&prev, &current));
            }
            out.push(current);
        } else if prev_inside {
            out.push(intersect(&prev, &current));
        }
        prev = current;
        prev_inside = current_inside;
    }
    out
}

/// Intersection of segment a→b with the vertical line x = `x`.
fn at_x(a: &Coord<f64>, b: &Coord<f64>, x: f64) -> Coord<f64> {
    let t = (x - a.x) / (b.x - a.x);
    Coord {
        x,
        y: a.y + t * (b.y - a.y),
    }
}

/// Intersection of segment a→b with the horizontal line y = `y`.
fn at_y(a: &Coord<f64>, b: &Coord<f64>, y: f64) -> Coord<f64> {
    let t = (y - a.y) / (b.y - a.y);
    Coord {
        x: a.x + t * (b.x - a.x),
        y,
    }
}

fn shoelace_area(points: &[Coord<f64>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    let mut prev = points[points.len() - 1];
    for &current in points {
        sum += prev.x * current.y - current.x * prev.y;
        prev = current;
    }
    sum / 2.0
}
