//! Resolves raw record geometry into geographic form.

use geo::{Coord, LineString, Polygon};

use crate::models::{GeoBbox, GeoPoint, RawBox, RawVertex, SourceCrs};
use crate::projection::{self, InvalidZone};

/// A record's geometry after normalization to geographic degrees.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedGeometry {
    pub bbox: GeoBbox,
    pub polygon: Polygon<f64>,
}

/// Normalize a record's bounding box and boundary ring.
///
/// UTM geometry is projected vertex by vertex; the box corners map
/// directly to the geographic corners since the inverse projection is
/// monotone in both axes within a zone. The ring is closed implicitly by
/// `Polygon::new`.
pub(crate) fn resolve_geometry(
    bbox: &RawBox,
    boundary: &[RawVertex],
    crs: SourceCrs,
) -> Result<ResolvedGeometry, InvalidZone> {
    let min = vertex_to_point(RawVertex { x: bbox.min_x, y: bbox.min_y }, crs)?;
    let max = vertex_to_point(RawVertex { x: bbox.max_x, y: bbox.max_y }, crs)?;

    let mut ring = Vec::with_capacity(boundary.len());
    for vertex in boundary {
        let point = vertex_to_point(*vertex, crs)?;
        ring.push(Coord {
            x: point.lng,
            y: point.lat,
        });
    }

    Ok(ResolvedGeometry {
        bbox: GeoBbox::new(min.lat, min.lng, max.lat, max.lng),
        polygon: Polygon::new(LineString::new(ring), vec![]),
    })
}

fn vertex_to_point(vertex: RawVertex, crs: SourceCrs) -> Result<GeoPoint, InvalidZone> {
    match crs {
        SourceCrs::Utm {
            zone_number,
            zone_letter,
        } => projection::to_latlng(vertex.x, vertex.y, zone_number, zone_letter),
        SourceCrs::Geographic => Ok(GeoPoint::new(vertex.y, vertex.x)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Contains, Point};

    fn unit_square() -> Vec<RawVertex> {
        vec![
            RawVertex { x: 12.0, y: 12.0 },
            RawVertex { x: 13.0, y: 12.0 },
            RawVertex { x: 13.0, y: 13.0 },
            RawVertex { x: 12.0, y: 13.0 },
        ]
    }

    #[test]
    fn test_geographic_passthrough() {
        let raw = RawBox {
            min_x: 12.0,
            min_y: 12.0,
            max_x: 13.0,
            max_y: 13.0,
        };
        let resolved = resolve_geometry(&raw, &unit_square(), SourceCrs::Geographic).unwrap();

        assert_eq!(resolved.bbox, GeoBbox::new(12.0, 12.0, 13.0, 13.0));
        assert!(resolved.polygon.contains(&Point::new(12.5, 12.5)));
        assert!(!resolved.polygon.contains(&Point::new(13.5, 12.5)));
    }

    #[test]
    fn test_open_ring_is_closed() {
        // No explicit closing vertex above; containment still works.
        let raw = RawBox {
            min_x: 12.0,
            min_y: 12.0,
            max_x: 13.0,
            max_y: 13.0,
        };
        let resolved = resolve_geometry(&raw, &unit_square(), SourceCrs::Geographic).unwrap();
        let exterior: Vec<_> = resolved.polygon.exterior().coords().collect();
        assert_eq!(exterior.first(), exterior.last());
    }

    #[test]
    fn test_utm_geometry_is_projected() {
        let raw = RawBox {
            min_x: 510_000.0,
            min_y: 5_030_000.0,
            max_x: 520_000.0,
            max_y: 5_040_000.0,
        };
        let crs = SourceCrs::Utm {
            zone_number: 32,
            zone_letter: 'T',
        };
        let square = vec![
            RawVertex { x: 510_000.0, y: 5_030_000.0 },
            RawVertex { x: 520_000.0, y: 5_030_000.0 },
            RawVertex { x: 520_000.0, y: 5_040_000.0 },
            RawVertex { x: 510_000.0, y: 5_040_000.0 },
        ];
        let resolved = resolve_geometry(&raw, &square, crs).unwrap();

        assert!(resolved.bbox.min_lat < resolved.bbox.max_lat);
        assert!(resolved.bbox.min_lng < resolved.bbox.max_lng);
        // Milan (32T 514815 5034544) falls inside the projected square.
        assert!(resolved.bbox.contains(GeoPoint::new(45.464266, 9.189508)));
        assert!(resolved
            .polygon
            .contains(&Point::new(9.189508, 45.464266)));
    }

    #[test]
    fn test_invalid_zone_is_surfaced() {
        let raw = RawBox {
            min_x: 510_000.0,
            min_y: 5_030_000.0,
            max_x: 520_000.0,
            max_y: 5_040_000.0,
        };
        let crs = SourceCrs::Utm {
            zone_number: 32,
            zone_letter: 'I',
        };
        assert!(resolve_geometry(&raw, &unit_square(), crs).is_err());
    }
}
