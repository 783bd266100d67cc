// crates/realmap-core/src/model/geometry.rs
use serde::{Deserialize, Serialize};

/// `[longitude, latitude]` in degrees, GeoJSON axis order.
pub type Position = [f64; 2];

/// A closed ring. The first and last position are expected to be equal, as
/// in GeoJSON, but open rings are handled too.
pub type Ring = Vec<Position>;

/// Radius used for area calculations, in metres (WGS84 semi-major axis).
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Feature geometry.
///
/// Externally tagged so it survives the bincode cache; the GeoJSON shape
/// lives in [`crate::raw::GeometryRaw`] and [`crate::api`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Point(Position),
    /// Outer ring followed by holes.
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
}

impl Geometry {
    /// Area on a sphere in square metres. Zero for points.
    pub fn area_m2(&self) -> f64 {
        match self {
            Geometry::Point(_) => 0.0,
            Geometry::Polygon(rings) => polygon_area(rings),
            Geometry::MultiPolygon(polys) => polys.iter().map(|p| polygon_area(p)).sum(),
        }
    }

    /// Point-in-polygon test. Points lying inside a hole are outside.
    pub fn contains(&self, p: Position) -> bool {
        match self {
            Geometry::Point(_) => false,
            Geometry::Polygon(rings) => polygon_contains(rings, p),
            Geometry::MultiPolygon(polys) => polys.iter().any(|rings| polygon_contains(rings, p)),
        }
    }

    /// The position used to pan the map to this feature: the point itself,
    /// or the mean vertex of the outer ring(s).
    pub fn anchor(&self) -> Option<Position> {
        match self {
            Geometry::Point(p) => Some(*p),
            Geometry::Polygon(rings) => rings.first().and_then(|r| centroid(r)),
            Geometry::MultiPolygon(polys) => {
                let outer: Vec<Position> = polys
                    .iter()
                    .filter_map(|rings| rings.first())
                    .flat_map(|r| r.iter().copied())
                    .collect();
                centroid(&outer)
            }
        }
    }

    pub fn as_point(&self) -> Option<Position> {
        match self {
            Geometry::Point(p) => Some(*p),
            _ => None,
        }
    }
}

fn polygon_area(rings: &[Ring]) -> f64 {
    let mut rings = rings.iter();
    let Some(outer) = rings.next() else {
        return 0.0;
    };
    let holes: f64 = rings.map(|r| ring_area(r).abs()).sum();
    (ring_area(outer).abs() - holes).max(0.0)
}

/// Spherical excess approximation for a single ring.
fn ring_area(ring: &[Position]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let mut total = 0.0;
    for i in 0..n {
        let p1 = ring[i];
        let p2 = ring[(i + 1) % n];
        let p3 = ring[(i + 2) % n];
        total += (p3[0].to_radians() - p1[0].to_radians()) * p2[1].to_radians().sin();
    }
    total * EARTH_RADIUS_M * EARTH_RADIUS_M / 2.0
}

fn polygon_contains(rings: &[Ring], p: Position) -> bool {
    let mut rings = rings.iter();
    let Some(outer) = rings.next() else {
        return false;
    };
    ring_contains(outer, p) && !rings.any(|hole| ring_contains(hole, p))
}

/// Even-odd ray casting.
fn ring_contains(ring: &[Position], p: Position) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let (x, y) = (p[0], p[1]);
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (ring[i][0], ring[i][1]);
        let (xj, yj) = (ring[j][0], ring[j][1]);
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn centroid(points: &[Position]) -> Option<Position> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p[0], sy + p[1]));
    Some([sx / n, sy / n])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, size: f64) -> Ring {
        vec![
            [x0, y0],
            [x0 + size, y0],
            [x0 + size, y0 + size],
            [x0, y0 + size],
            [x0, y0],
        ]
    }

    #[test]
    fn one_degree_square_at_the_equator() {
        let g = Geometry::Polygon(vec![square(0.0, 0.0, 1.0)]);
        let km2 = g.area_m2() / 1e6;
        // ~12 391 km² on a sphere of the WGS84 equatorial radius
        assert!((km2 - 12_391.0).abs() < 10.0, "got {km2}");
    }

    #[test]
    fn holes_reduce_area_and_exclude_points() {
        let outer = square(0.0, 0.0, 4.0);
        let hole = square(1.0, 1.0, 1.0);
        let solid = Geometry::Polygon(vec![outer.clone()]);
        let holed = Geometry::Polygon(vec![outer, hole]);

        assert!(holed.area_m2() < solid.area_m2());
        assert!(solid.contains([1.5, 1.5]));
        assert!(!holed.contains([1.5, 1.5]));
        assert!(holed.contains([3.0, 3.0]));
    }

    #[test]
    fn points_have_no_area_and_contain_nothing() {
        let g = Geometry::Point([10.0, 20.0]);
        assert_eq!(g.area_m2(), 0.0);
        assert!(!g.contains([10.0, 20.0]));
        assert_eq!(g.anchor(), Some([10.0, 20.0]));
    }

    #[test]
    fn multipolygon_contains_any_part() {
        let g = Geometry::MultiPolygon(vec![
            vec![square(0.0, 0.0, 1.0)],
            vec![square(10.0, 10.0, 1.0)],
        ]);
        assert!(g.contains([10.5, 10.5]));
        assert!(!g.contains([5.0, 5.0]));
    }
}
