//! Representative points for ward polygons.
//!
//! This is a vertex average over the outer ring of the first polygon, not
//! an area-weighted centroid. It only seeds interpolation query points, so
//! the approximation is acceptable. For multi-polygons the remaining parts
//! are ignored.

use aqi_map_air_quality_models::Coordinates;
use geojson::{Geometry, Position, Value};

/// Returns the mean latitude and longitude of the first outer ring.
///
/// `None` when the geometry is absent, not polygonal, or its first ring
/// has no usable vertices.
#[must_use]
pub fn centroid(geometry: Option<&Geometry>) -> Option<Coordinates> {
    let ring = match &geometry?.value {
        Value::Polygon(rings) => rings.first()?,
        Value::MultiPolygon(polygons) => polygons.first()?.first()?,
        _ => return None,
    };
    vertex_average(ring)
}

/// Averages `[lon, lat]` positions as given, including any closing vertex.
#[allow(clippy::cast_precision_loss)]
fn vertex_average(ring: &[Position]) -> Option<Coordinates> {
    let mut lat_sum = 0.0;
    let mut lon_sum = 0.0;
    let mut count = 0_usize;

    for position in ring {
        let (Some(lon), Some(lat)) = (position.first(), position.get(1)) else {
            continue;
        };
        lat_sum += lat;
        lon_sum += lon;
        count += 1;
    }

    if count == 0 {
        return None;
    }

    let n = count as f64;
    Some(Coordinates::new(lat_sum / n, lon_sum / n))
}
