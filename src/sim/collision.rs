//! Swept collision detection for the ball against tiles
//!
//! The ball is reduced to its center point: each tile's dilated hitbox is
//! ray-cast along the path the center travelled this tick, and the first
//! surface met that opposes the motion becomes the tick's single contact.

use glam::DVec2;

use super::geometry::{Segment, Shape};
use super::hitbox::CompositeHitbox;
use super::tile::Tile;

/// Region swept by the ball over one tick: a capsule around the path of its
/// center (the two end discs plus the rectangle joining them).
#[derive(Debug, Clone, Copy)]
pub struct TravelVolume {
    pub path: Segment,
    pub radius: f64,
}

impl TravelVolume {
    pub fn new(prev_center: DVec2, center: DVec2, radius: f64) -> Self {
        Self {
            path: Segment::new(prev_center, center),
            radius,
        }
    }

    pub fn intersects_hitbox(&self, hitbox: &CompositeHitbox) -> bool {
        hitbox.pieces().any(|piece| self.intersects_shape(piece))
    }

    fn intersects_shape(&self, shape: Shape<'_>) -> bool {
        match shape {
            Shape::Circle(circle) => {
                let near = self.path.distance_to_point(circle.center);
                // Boundary curve only: a circle that swallows the whole
                // capsule never touches it.
                let far = circle.center.distance(self.path.start).max(circle.center.distance(self.path.end));
                near <= self.radius + circle.radius && far + self.radius >= circle.radius
            }
            Shape::Polyline(line) => line
                .edges()
                .any(|edge| edge.distance_to_segment(&self.path) <= self.radius),
        }
    }
}

/// Motion of the ball's center over one tick
#[derive(Debug, Clone, Copy)]
pub struct SweptCircle {
    pub prev_center: DVec2,
    pub center: DVec2,
    pub velocity: DVec2,
    pub radius: f64,
    pub tolerance: f64,
}

/// The resolved contact for a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Where the ball center meets the dilated hitbox
    pub point: DVec2,
    /// Outward unit normal of the surface hit
    pub normal: DVec2,
    /// Index of the tile in the level's tile list
    pub tile_index: usize,
}

/// An intersection that survived the opposing-motion filter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactCandidate {
    pub contact: Contact,
    /// Distance from the previous center
    pub distance: f64,
    /// `normal · velocity`, always negative
    pub opposition: f64,
}

/// Keep the candidates whose exact or dilated hitbox meets the travel volume.
///
/// Output is ordered by tile grid coordinate `(x, y)`.
pub fn broad_phase(tiles: &[Tile], candidates: &[usize], volume: &TravelVolume) -> Vec<usize> {
    let mut kept: Vec<usize> = candidates
        .iter()
        .copied()
        .filter(|&i| {
            let tile = &tiles[i];
            volume.intersects_hitbox(tile.exact_hitbox()) || volume.intersects_hitbox(tile.dilated_hitbox())
        })
        .collect();
    kept.sort_by_key(|&i| {
        let g = tiles[i].grid_position();
        (g.x, g.y)
    });
    kept
}

/// Ray-cast the center path against the dilated hitboxes of `candidates`.
///
/// The ray starts `tolerance` behind the previous center so a contact that
/// begins exactly there is still seen. Points whose normal does not oppose
/// the velocity are dropped. Returns nothing for a motionless ball.
pub fn narrow_phase(tiles: &[Tile], candidates: &[usize], motion: &SweptCircle) -> Vec<ContactCandidate> {
    let Some(direction) = motion.velocity.try_normalize() else {
        return Vec::new();
    };
    let ray = Segment::new(motion.prev_center - direction * motion.tolerance, motion.center);

    let mut found = Vec::new();
    for &tile_index in candidates {
        for (point, piece) in tiles[tile_index].dilated_hitbox().segment_hits(&ray) {
            let Some(normal) = piece.normal_at(point, motion.tolerance) else {
                log::error!("contact {point} lies on no edge of tile {tile_index}");
                debug_assert!(false, "contact {point} lies on no edge of tile {tile_index}");
                continue;
            };
            let opposition = normal.dot(motion.velocity);
            if opposition >= 0.0 {
                continue;
            }
            found.push(ContactCandidate {
                contact: Contact {
                    point,
                    normal,
                    tile_index,
                },
                distance: point.distance(motion.prev_center),
                opposition,
            });
        }
    }
    found
}

/// Closest candidate; on equal distance the one most directly opposing the
/// motion; on a full tie the earliest in iteration order.
pub fn select_contact(candidates: &[ContactCandidate]) -> Option<Contact> {
    let mut best: Option<&ContactCandidate> = None;
    for candidate in candidates {
        let better = match best {
            None => true,
            Some(b) => {
                candidate.distance < b.distance
                    || (candidate.distance == b.distance && candidate.opposition < b.opposition)
            }
        };
        if better {
            best = Some(candidate);
        }
    }
    best.map(|c| c.contact)
}

/// Full detection pass for one tick: broad phase, narrow phase, selection
pub fn detect(tiles: &[Tile], nearby: &[usize], motion: &SweptCircle) -> Option<Contact> {
    if nearby.is_empty() {
        return None;
    }
    let volume = TravelVolume::new(motion.prev_center, motion.center, motion.radius);
    let candidates = broad_phase(tiles, nearby, &volume);
    let contact = select_contact(&narrow_phase(tiles, &candidates, motion));
    if let Some(c) = &contact {
        log::debug!("contact at {} normal {} tile {}", c.point, c.normal, c.tile_index);
    }
    contact
}

/// Whether a short probe straight down from the center, reaching just past
/// the bottom of the ball, meets any tile's exact hitbox
pub fn ground_probe(tiles: &[Tile], nearby: &[usize], center: DVec2, radius: f64, tolerance: f64) -> bool {
    let probe = Segment::new(center + DVec2::new(0.0, radius + tolerance), center);
    nearby
        .iter()
        .any(|&i| tiles[i].exact_hitbox().intersects_segment(&probe))
}
