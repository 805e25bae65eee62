//! Geometry kernel: circle boundaries, polylines and segment queries
//!
//! Circles here are boundary curves, not discs. A segment that lies wholly
//! inside a circle does not intersect it.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Slack on segment parameters so hits landing exactly on an endpoint survive
/// rounding.
const PARAM_EPSILON: f64 = 1e-9;

/// The boundary curve of a circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleBoundary {
    pub center: DVec2,
    pub radius: f64,
}

impl CircleBoundary {
    pub fn new(center: DVec2, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Radial unit vector from the center through `point`
    #[inline]
    pub fn normal_at(&self, point: DVec2) -> Option<DVec2> {
        (point - self.center).try_normalize()
    }
}

/// A straight segment from `start` to `end`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: DVec2,
    pub end: DVec2,
}

impl Segment {
    pub fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn direction(&self) -> DVec2 {
        self.end - self.start
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.direction().length()
    }

    /// Normal of the edge `start -> end` rotated to the outside of a
    /// clockwise (screen-space, y-down) winding.
    ///
    /// `None` for a zero-length segment.
    #[inline]
    pub fn outward_normal(&self) -> Option<DVec2> {
        DVec2::new(self.end.y - self.start.y, self.start.x - self.end.x).try_normalize()
    }

    /// Closest point on the segment to `point`
    pub fn closest_point(&self, point: DVec2) -> DVec2 {
        let dir = self.direction();
        let len_sq = dir.length_squared();
        if len_sq == 0.0 {
            return self.start;
        }
        let t = ((point - self.start).dot(dir) / len_sq).clamp(0.0, 1.0);
        self.start + dir * t
    }

    #[inline]
    pub fn distance_to_point(&self, point: DVec2) -> f64 {
        self.closest_point(point).distance(point)
    }

    /// Shortest distance between two segments (0 when they cross)
    pub fn distance_to_segment(&self, other: &Segment) -> f64 {
        if self.intersect_segment(other).is_some() {
            return 0.0;
        }
        self.distance_to_point(other.start)
            .min(self.distance_to_point(other.end))
            .min(other.distance_to_point(self.start))
            .min(other.distance_to_point(self.end))
    }

    /// Crossing point with another segment.
    ///
    /// Parallel, collinear and zero-length segments never intersect.
    pub fn intersect_segment(&self, other: &Segment) -> Option<DVec2> {
        let r = self.direction();
        let s = other.direction();
        let denom = r.perp_dot(s);
        if denom.abs() <= f64::EPSILON * r.length() * s.length() {
            return None;
        }

        let qp = other.start - self.start;
        let t = qp.perp_dot(s) / denom;
        let u = qp.perp_dot(r) / denom;
        if in_unit_range(t) && in_unit_range(u) {
            Some(self.start + r * t)
        } else {
            None
        }
    }

    /// Points where the segment crosses a circle boundary (0, 1 or 2)
    pub fn intersect_circle(&self, circle: &CircleBoundary) -> Vec<DVec2> {
        let d = self.direction();
        let a = d.length_squared();
        if a == 0.0 {
            return Vec::new();
        }

        let f = self.start - circle.center;
        let b = 2.0 * f.dot(d);
        let c = f.length_squared() - circle.radius * circle.radius;
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return Vec::new();
        }

        let root = discriminant.sqrt();
        let t1 = (-b - root) / (2.0 * a);
        let t2 = (-b + root) / (2.0 * a);

        let mut points = Vec::with_capacity(2);
        if in_unit_range(t1) {
            points.push(self.start + d * t1);
        }
        if discriminant > 0.0 && in_unit_range(t2) {
            points.push(self.start + d * t2);
        }
        points
    }

    /// Every point where this segment meets `shape`
    pub fn intersection_points(&self, shape: Shape<'_>) -> Vec<DVec2> {
        match shape {
            Shape::Circle(circle) => self.intersect_circle(circle),
            Shape::Polyline(line) => line
                .edges()
                .filter_map(|edge| self.intersect_segment(&edge))
                .collect(),
        }
    }

    /// Whether this segment meets `shape` at all
    pub fn intersects(&self, shape: Shape<'_>) -> bool {
        match shape {
            Shape::Circle(circle) => !self.intersect_circle(circle).is_empty(),
            Shape::Polyline(line) => line
                .edges()
                .any(|edge| self.intersect_segment(&edge).is_some()),
        }
    }
}

#[inline]
fn in_unit_range(t: f64) -> bool {
    (-PARAM_EPSILON..=1.0 + PARAM_EPSILON).contains(&t)
}

/// A chain of straight edges, closed when the last point repeats the first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<DVec2>,
}

impl Polyline {
    pub fn new(points: Vec<DVec2>) -> Self {
        debug_assert!(points.len() >= 2, "polyline needs at least two points");
        Self { points }
    }

    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    pub fn is_closed(&self) -> bool {
        self.points.len() > 2 && self.points.first() == self.points.last()
    }

    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points.windows(2).map(|w| Segment::new(w[0], w[1]))
    }

    /// Outward normal of the edge that `point` lies on.
    ///
    /// The nearest edge within `tolerance` wins; on equal distance the first
    /// edge in winding order, so a point on a shared vertex takes the earlier
    /// edge and never the one that follows it. `None` if no edge is close
    /// enough.
    pub fn normal_at(&self, point: DVec2, tolerance: f64) -> Option<DVec2> {
        let mut best: Option<(f64, Segment)> = None;
        for edge in self.edges().filter(|e| e.length() > 0.0) {
            let dist = edge.distance_to_point(point);
            if dist < tolerance && best.is_none_or(|(best_dist, _)| dist < best_dist) {
                best = Some((dist, edge));
            }
        }
        best.and_then(|(_, edge)| edge.outward_normal())
    }
}

/// One piece of a composite hitbox
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape<'a> {
    Circle(&'a CircleBoundary),
    Polyline(&'a Polyline),
}

impl Shape<'_> {
    /// Outward unit normal at a point lying on this piece
    pub fn normal_at(&self, point: DVec2, tolerance: f64) -> Option<DVec2> {
        match self {
            Shape::Circle(circle) => circle.normal_at(point),
            Shape::Polyline(line) => line.normal_at(point, tolerance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn square(w: f64) -> Polyline {
        Polyline::new(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(w, 0.0),
            DVec2::new(w, w),
            DVec2::new(0.0, w),
            DVec2::new(0.0, 0.0),
        ])
    }

    #[test]
    fn test_segment_crossing() {
        let a = Segment::new(DVec2::new(0.0, 0.0), DVec2::new(10.0, 10.0));
        let b = Segment::new(DVec2::new(0.0, 10.0), DVec2::new(10.0, 0.0));
        let p = a.intersect_segment(&b).unwrap();
        assert!((p - DVec2::new(5.0, 5.0)).length() < EPS);
    }

    #[test]
    fn test_segment_parallel_and_degenerate() {
        let a = Segment::new(DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0));
        let parallel = Segment::new(DVec2::new(0.0, 1.0), DVec2::new(10.0, 1.0));
        let collinear = Segment::new(DVec2::new(5.0, 0.0), DVec2::new(15.0, 0.0));
        let point = Segment::new(DVec2::new(5.0, 0.0), DVec2::new(5.0, 0.0));
        assert!(a.intersect_segment(&parallel).is_none());
        assert!(a.intersect_segment(&collinear).is_none());
        assert!(a.intersect_segment(&point).is_none());
        assert!(point.intersect_circle(&CircleBoundary::new(DVec2::ZERO, 5.0)).is_empty());
    }

    #[test]
    fn test_segment_hits_endpoint() {
        // Ray ending exactly on a horizontal edge
        let ray = Segment::new(DVec2::new(3.0, -0.07), DVec2::new(3.0, 0.0));
        let edge = Segment::new(DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0));
        let p = ray.intersect_segment(&edge).unwrap();
        assert!((p - DVec2::new(3.0, 0.0)).length() < EPS);
    }

    #[test]
    fn test_circle_two_points() {
        let circle = CircleBoundary::new(DVec2::ZERO, 5.0);
        let seg = Segment::new(DVec2::new(-10.0, 0.0), DVec2::new(10.0, 0.0));
        let points = seg.intersect_circle(&circle);
        assert_eq!(points.len(), 2);
        assert!((points[0] - DVec2::new(-5.0, 0.0)).length() < EPS);
        assert!((points[1] - DVec2::new(5.0, 0.0)).length() < EPS);
    }

    #[test]
    fn test_circle_boundary_only() {
        // Segment fully inside the circle never touches the boundary
        let circle = CircleBoundary::new(DVec2::ZERO, 5.0);
        let seg = Segment::new(DVec2::new(-1.0, 0.0), DVec2::new(1.0, 0.0));
        assert!(!seg.intersects(Shape::Circle(&circle)));

        let miss = Segment::new(DVec2::new(-10.0, 6.0), DVec2::new(10.0, 6.0));
        assert!(miss.intersect_circle(&circle).is_empty());
    }

    #[test]
    fn test_polyline_crossings() {
        let sq = square(10.0);
        assert!(sq.is_closed());
        let seg = Segment::new(DVec2::new(-5.0, 5.0), DVec2::new(15.0, 5.0));
        let points = seg.intersection_points(Shape::Polyline(&sq));
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn test_normals() {
        let sq = square(10.0);
        // Top edge (y = 0) faces up in screen space
        let n = sq.normal_at(DVec2::new(5.0, 0.0), 0.07).unwrap();
        assert!((n - DVec2::new(0.0, -1.0)).length() < EPS);
        // Right edge faces right
        let n = sq.normal_at(DVec2::new(10.0, 4.0), 0.07).unwrap();
        assert!((n - DVec2::new(1.0, 0.0)).length() < EPS);
        // Off every edge
        assert!(sq.normal_at(DVec2::new(5.0, 5.0), 0.07).is_none());

        let circle = CircleBoundary::new(DVec2::new(1.0, 1.0), 2.0);
        let n = Shape::Circle(&circle).normal_at(DVec2::new(1.0, 3.0), 0.07).unwrap();
        assert!((n - DVec2::new(0.0, 1.0)).length() < EPS);
        assert!(circle.normal_at(circle.center).is_none());
    }

    #[test]
    fn test_shared_vertex_takes_earlier_edge() {
        let sq = square(10.0);
        let up = DVec2::new(0.0, -1.0);
        // (10, 0) joins the top edge to the right edge
        let n = sq.normal_at(DVec2::new(10.0, 0.0), 0.07).unwrap();
        assert!((n - up).length() < EPS);
        // (0, 0) joins the closing left edge back to the top edge
        let n = sq.normal_at(DVec2::new(0.0, 0.0), 0.07).unwrap();
        assert!((n - up).length() < EPS);
        // (10, 10) joins the right edge to the bottom edge
        let n = sq.normal_at(DVec2::new(10.0, 10.0), 0.07).unwrap();
        assert!((n - DVec2::new(1.0, 0.0)).length() < EPS);
    }

    #[test]
    fn test_distance_helpers() {
        let a = Segment::new(DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0));
        assert!((a.distance_to_point(DVec2::new(5.0, 3.0)) - 3.0).abs() < EPS);
        assert!((a.distance_to_point(DVec2::new(-4.0, 3.0)) - 5.0).abs() < EPS);

        let b = Segment::new(DVec2::new(0.0, 2.0), DVec2::new(10.0, 2.0));
        assert!((a.distance_to_segment(&b) - 2.0).abs() < EPS);
        let c = Segment::new(DVec2::new(5.0, -1.0), DVec2::new(5.0, 1.0));
        assert_eq!(a.distance_to_segment(&c), 0.0);
    }
}
