//! Static tile colliders
//!
//! A tile carries two hitboxes built from its shape template:
//! - the exact boundary, used for ground checks and the broad phase
//! - the boundary dilated by the ball radius, which the ball center is
//!   ray-cast against

use glam::{DVec2, IVec2};
use serde::{Deserialize, Serialize};

use super::geometry::{CircleBoundary, Polyline, Segment};
use super::hitbox::CompositeHitbox;
use crate::error::PhysicsError;

/// Surface response of a tile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Fraction of normal speed kept on bounce, in [0, 1]
    pub restitution: f64,
    /// Fraction of tangential speed kept per 60 Hz tick, in [0, 1]
    pub friction: f64,
}

impl Material {
    pub const GENERIC: Material = Material {
        restitution: 0.3,
        friction: 0.95,
    };

    pub fn new(restitution: f64, friction: f64) -> Result<Self, PhysicsError> {
        let material = Self { restitution, friction };
        material.validate()?;
        Ok(material)
    }

    /// Both coefficients must lie in [0, 1]; NaN is rejected
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(PhysicsError::InvalidConfiguration {
                reason: "material restitution must be in [0, 1]",
            });
        }
        if !(0.0..=1.0).contains(&self.friction) {
            return Err(PhysicsError::InvalidConfiguration {
                reason: "material friction must be in [0, 1]",
            });
        }
        Ok(())
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::GENERIC
    }
}

/// Tile shape catalogue (unit-square templates, y down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileShape {
    Block,
    /// Solid below the rising diagonal, open top-left
    Slope0,
    /// Solid below the falling diagonal, open top-right
    Slope1,
    /// Solid above the rising diagonal, open bottom-right
    Slope2,
    /// Solid above the falling diagonal, open bottom-left. No code in the
    /// stock course.
    Slope3,
}

impl TileShape {
    /// Corner fractions in winding order; the first point is repeated to
    /// close the outline.
    pub fn template(&self) -> &'static [(f64, f64)] {
        match self {
            TileShape::Block => &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)],
            TileShape::Slope0 => &[(0.0, 1.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)],
            TileShape::Slope1 => &[(0.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)],
            TileShape::Slope2 => &[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (0.0, 0.0)],
            TileShape::Slope3 => &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)],
        }
    }

    /// Level grid code lookup; `0` is empty space
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(TileShape::Block),
            2 => Some(TileShape::Slope0),
            3 => Some(TileShape::Slope1),
            4 => Some(TileShape::Slope2),
            5 => Some(TileShape::Slope3),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            TileShape::Block => 1,
            TileShape::Slope0 => 2,
            TileShape::Slope1 => 3,
            TileShape::Slope2 => 4,
            TileShape::Slope3 => 5,
        }
    }
}

/// Geometry needed to size a tile's hitboxes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileMetrics {
    pub tile_width: f64,
    /// Radius of the ball the dilated hitbox is built for
    pub player_radius: f64,
}

/// A static collider occupying one grid cell
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    grid_position: IVec2,
    shape: TileShape,
    material: Material,
    metrics: TileMetrics,
    exact_hitbox: CompositeHitbox,
    dilated_hitbox: CompositeHitbox,
}

impl Tile {
    pub fn new(grid_position: IVec2, shape: TileShape, material: Material, metrics: TileMetrics) -> Self {
        let mut tile = Self {
            grid_position,
            shape,
            material,
            metrics,
            exact_hitbox: CompositeHitbox::default(),
            dilated_hitbox: CompositeHitbox::default(),
        };
        tile.rebuild_hitboxes();
        tile
    }

    /// Build the tile for a level grid code; `Ok(None)` for empty space
    pub fn from_code(
        grid_x: usize,
        grid_y: usize,
        code: u8,
        material: Material,
        metrics: TileMetrics,
    ) -> Result<Option<Self>, PhysicsError> {
        if code == 0 {
            return Ok(None);
        }
        let shape = TileShape::from_code(code).ok_or(PhysicsError::UnknownTileCode {
            code,
            x: grid_x,
            y: grid_y,
        })?;
        Ok(Some(build_tile(grid_x as i32, grid_y as i32, shape, material, metrics)))
    }

    pub fn grid_position(&self) -> IVec2 {
        self.grid_position
    }

    /// World position of the tile's top-left corner
    pub fn position(&self) -> DVec2 {
        self.grid_position.as_dvec2() * self.metrics.tile_width
    }

    pub fn shape(&self) -> TileShape {
        self.shape
    }

    pub fn material(&self) -> Material {
        self.material
    }

    pub fn exact_hitbox(&self) -> &CompositeHitbox {
        &self.exact_hitbox
    }

    pub fn dilated_hitbox(&self) -> &CompositeHitbox {
        &self.dilated_hitbox
    }

    /// Move the tile, keeping both hitboxes in step
    pub fn set_grid_position(&mut self, grid_position: IVec2) {
        self.grid_position = grid_position;
        self.rebuild_hitboxes();
    }

    fn rebuild_hitboxes(&mut self) {
        let origin = self.position();
        let width = self.metrics.tile_width;
        let points: Vec<DVec2> = self
            .shape
            .template()
            .iter()
            .map(|&(x, y)| origin + DVec2::new(x, y) * width)
            .collect();

        self.dilated_hitbox = dilate(&points, self.metrics.player_radius);
        self.exact_hitbox = CompositeHitbox::from_polyline(Polyline::new(points));
    }
}

/// Build a tile at a grid cell from a catalogue shape
pub fn build_tile(grid_x: i32, grid_y: i32, shape: TileShape, material: Material, metrics: TileMetrics) -> Tile {
    Tile::new(IVec2::new(grid_x, grid_y), shape, material, metrics)
}

/// Minkowski sum of an edge chain with a disc of `radius`: every edge pushed
/// out along its normal, every distinct vertex rounded by a circle.
fn dilate(points: &[DVec2], radius: f64) -> CompositeHitbox {
    let mut offset_points = Vec::with_capacity(points.len() * 2 + 1);
    for pair in points.windows(2) {
        let edge = Segment::new(pair[0], pair[1]);
        let Some(normal) = edge.outward_normal() else {
            continue;
        };
        let offset = normal * radius;
        offset_points.push(edge.start + offset);
        offset_points.push(edge.end + offset);
    }
    if let Some(&first) = offset_points.first() {
        offset_points.push(first);
    }

    let mut vertices: Vec<DVec2> = Vec::with_capacity(points.len());
    for &p in points {
        if !vertices.contains(&p) {
            vertices.push(p);
        }
    }

    let polyline = (offset_points.len() >= 2).then(|| Polyline::new(offset_points));
    let circles = vertices
        .into_iter()
        .map(|v| CircleBoundary::new(v, radius))
        .collect();
    CompositeHitbox::new(polyline, circles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;
    const METRICS: TileMetrics = TileMetrics {
        tile_width: 50.0,
        player_radius: 10.0,
    };

    #[test]
    fn test_block_exact_boundary() {
        let tile = build_tile(2, 3, TileShape::Block, Material::GENERIC, METRICS);
        assert_eq!(tile.position(), DVec2::new(100.0, 150.0));
        let line = tile.exact_hitbox().polyline.as_ref().unwrap();
        assert!(line.is_closed());
        assert_eq!(line.points()[1], DVec2::new(150.0, 150.0));
        assert_eq!(line.points()[2], DVec2::new(150.0, 200.0));
        assert!(tile.exact_hitbox().circles.is_empty());
    }

    #[test]
    fn test_block_dilation_at_origin() {
        let tile = build_tile(0, 0, TileShape::Block, Material::GENERIC, METRICS);
        let dilated = tile.dilated_hitbox();

        let centers: Vec<DVec2> = dilated.circles.iter().map(|c| c.center).collect();
        assert_eq!(
            centers,
            vec![
                DVec2::new(0.0, 0.0),
                DVec2::new(50.0, 0.0),
                DVec2::new(50.0, 50.0),
                DVec2::new(0.0, 50.0),
            ]
        );
        assert!(dilated.circles.iter().all(|c| c.radius == 10.0));

        let offset = dilated.polyline.as_ref().unwrap();
        assert!(offset.is_closed());
        let expected = [
            (0.0, -10.0),
            (50.0, -10.0),
            (60.0, 0.0),
            (60.0, 50.0),
            (50.0, 60.0),
            (0.0, 60.0),
            (-10.0, 50.0),
            (-10.0, 0.0),
            (0.0, -10.0),
        ];
        assert_eq!(offset.points().len(), expected.len());
        for (p, &(x, y)) in offset.points().iter().zip(expected.iter()) {
            assert!((*p - DVec2::new(x, y)).length() < EPS, "{p} != ({x}, {y})");
        }
    }

    #[test]
    fn test_slope_normals_face_out() {
        // Slope0 is solid in the lower-right half; its diagonal faces up-left
        let tile = build_tile(0, 0, TileShape::Slope0, Material::GENERIC, METRICS);
        let offset = tile.dilated_hitbox().polyline.as_ref().unwrap();
        let first = offset.points()[0];
        let expected = DVec2::new(0.0, 50.0) + DVec2::new(-1.0, -1.0).normalize() * 10.0;
        assert!((first - expected).length() < EPS);
        // Three distinct corners
        assert_eq!(tile.dilated_hitbox().circles.len(), 3);
    }

    #[test]
    fn test_from_code() {
        assert!(Tile::from_code(0, 0, 0, Material::GENERIC, METRICS).unwrap().is_none());
        let tile = Tile::from_code(1, 2, 3, Material::GENERIC, METRICS).unwrap().unwrap();
        assert_eq!(tile.shape(), TileShape::Slope1);
        assert_eq!(tile.grid_position(), IVec2::new(1, 2));
        assert_eq!(
            Tile::from_code(4, 5, 9, Material::GENERIC, METRICS).unwrap_err(),
            PhysicsError::UnknownTileCode { code: 9, x: 4, y: 5 }
        );
        for shape in [TileShape::Block, TileShape::Slope0, TileShape::Slope3] {
            assert_eq!(TileShape::from_code(shape.code()), Some(shape));
        }
    }

    #[test]
    fn test_set_grid_position_rebuilds() {
        let mut tile = build_tile(0, 0, TileShape::Block, Material::GENERIC, METRICS);
        tile.set_grid_position(IVec2::new(1, 0));
        assert_eq!(tile.dilated_hitbox().circles[0].center, DVec2::new(50.0, 0.0));
        assert_eq!(tile.exact_hitbox().polyline.as_ref().unwrap().points()[0], DVec2::new(50.0, 0.0));
    }

    #[test]
    fn test_material_range_checked() {
        let m = Material::new(1.0, 0.0).unwrap();
        assert_eq!(m, Material { restitution: 1.0, friction: 0.0 });
        assert!(Material::GENERIC.validate().is_ok());

        for (restitution, friction) in [(1.5, 0.5), (0.5, -0.2), (f64::NAN, 0.5), (0.5, f64::NAN)] {
            let err = Material::new(restitution, friction).unwrap_err();
            assert!(matches!(err, PhysicsError::InvalidConfiguration { .. }), "{restitution} {friction}");
        }
    }

    proptest! {
        #[test]
        fn prop_offset_edges_sit_radius_outside(
            shape_idx in 0usize..5,
            gx in -5i32..5,
            gy in -5i32..5,
            radius in 1.0f64..20.0,
        ) {
            let shapes = [
                TileShape::Block,
                TileShape::Slope0,
                TileShape::Slope1,
                TileShape::Slope2,
                TileShape::Slope3,
            ];
            let metrics = TileMetrics { tile_width: 50.0, player_radius: radius };
            let tile = build_tile(gx, gy, shapes[shape_idx], Material::GENERIC, metrics);
            let exact = tile.exact_hitbox().polyline.as_ref().unwrap();
            let offset = tile.dilated_hitbox().polyline.as_ref().unwrap();

            // Offset points come in pairs, one pair per exact edge
            for (i, edge) in exact.edges().enumerate() {
                let normal = edge.outward_normal().unwrap();
                let a = offset.points()[2 * i];
                let b = offset.points()[2 * i + 1];
                prop_assert!(((a - edge.start) - normal * radius).length() < 1e-9);
                prop_assert!(((b - edge.end) - normal * radius).length() < 1e-9);
            }
        }
    }
}
