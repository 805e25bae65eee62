//! Composite hitboxes shared by tiles and the ball

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::geometry::{CircleBoundary, Polyline, Segment, Shape};
use crate::renderer::debug::{Color, DebugDraw};

/// A body's full collision surface: an optional edge chain plus any number of
/// circle boundaries. A query hits the hitbox if it hits any piece.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositeHitbox {
    pub polyline: Option<Polyline>,
    pub circles: Vec<CircleBoundary>,
}

impl CompositeHitbox {
    pub fn new(polyline: Option<Polyline>, circles: Vec<CircleBoundary>) -> Self {
        Self { polyline, circles }
    }

    pub fn from_polyline(polyline: Polyline) -> Self {
        Self {
            polyline: Some(polyline),
            circles: Vec::new(),
        }
    }

    pub fn from_circle(circle: CircleBoundary) -> Self {
        Self {
            polyline: None,
            circles: vec![circle],
        }
    }

    /// Pieces in query order: circles first, then the polyline
    pub fn pieces(&self) -> impl Iterator<Item = Shape<'_>> + '_ {
        self.circles
            .iter()
            .map(Shape::Circle)
            .chain(self.polyline.iter().map(Shape::Polyline))
    }

    pub fn intersects_segment(&self, segment: &Segment) -> bool {
        self.pieces().any(|piece| segment.intersects(piece))
    }

    /// Every point where `segment` meets the hitbox, tagged with the piece it
    /// lies on
    pub fn segment_hits<'a>(
        &'a self,
        segment: &'a Segment,
    ) -> impl Iterator<Item = (DVec2, Shape<'a>)> + 'a {
        self.pieces().flat_map(move |piece| {
            segment
                .intersection_points(piece)
                .into_iter()
                .map(move |point| (point, piece))
        })
    }

    /// Outline every piece into a debug-draw context
    pub fn draw(&self, ctx: &mut dyn DebugDraw, color: Color) {
        for circle in &self.circles {
            ctx.circle(circle.center, circle.radius, color);
        }
        if let Some(line) = &self.polyline {
            for edge in line.edges() {
                ctx.line(edge.start, edge.end, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::debug::LineList;

    #[test]
    fn test_pieces_order() {
        let hitbox = CompositeHitbox::new(
            Some(Polyline::new(vec![DVec2::ZERO, DVec2::new(10.0, 0.0)])),
            vec![CircleBoundary::new(DVec2::ZERO, 1.0)],
        );
        let pieces: Vec<_> = hitbox.pieces().collect();
        assert_eq!(pieces.len(), 2);
        assert!(matches!(pieces[0], Shape::Circle(_)));
        assert!(matches!(pieces[1], Shape::Polyline(_)));
    }

    #[test]
    fn test_hit_on_any_piece() {
        let hitbox = CompositeHitbox::new(
            Some(Polyline::new(vec![DVec2::ZERO, DVec2::new(10.0, 0.0)])),
            vec![CircleBoundary::new(DVec2::new(50.0, 0.0), 2.0)],
        );
        let through_line = Segment::new(DVec2::new(5.0, -1.0), DVec2::new(5.0, 1.0));
        let through_circle = Segment::new(DVec2::new(45.0, 0.0), DVec2::new(55.0, 0.0));
        let miss = Segment::new(DVec2::new(20.0, -1.0), DVec2::new(20.0, 1.0));
        assert!(hitbox.intersects_segment(&through_line));
        assert!(hitbox.intersects_segment(&through_circle));
        assert!(!hitbox.intersects_segment(&miss));
        assert_eq!(hitbox.segment_hits(&through_circle).count(), 2);
    }

    #[test]
    fn test_draw_outlines() {
        let hitbox = CompositeHitbox::from_polyline(Polyline::new(vec![
            DVec2::ZERO,
            DVec2::new(10.0, 0.0),
            DVec2::new(10.0, 10.0),
        ]));
        let mut lines = LineList::new(16);
        hitbox.draw(&mut lines, [1.0, 0.0, 0.0, 1.0]);
        // Two edges, two vertices each
        assert_eq!(lines.vertices().len(), 4);
    }
}
