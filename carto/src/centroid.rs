//! Centroïde approximatif et ancres de labels
//!
//! Le centroïde est la moyenne arithmétique des sommets du premier anneau
//! extérieur. Approximation valable pour des contours compacts et
//! grossièrement convexes, pas un vrai centroïde géométrique.

use geo::Point;
use geojson::Value as GeoValue;
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::CartoError;
use crate::types::{Feature, FeatureCollection};

/// Centroïde approximatif d'une feature.
///
/// Seuls Polygon et MultiPolygon sont acceptés ; pour un MultiPolygon,
/// seul le premier polygone compte (comportement hérité, suffisant pour
/// positionner un label).
pub fn approximate_centroid(feature: &Feature) -> Result<Point<f64>, CartoError> {
    let geometry = feature
        .geometry
        .as_ref()
        .ok_or_else(|| CartoError::invalid_geometry(&feature.code, "no geometry"))?;

    let ring = match &geometry.value {
        GeoValue::Polygon(rings) => rings.first(),
        GeoValue::MultiPolygon(polygons) => polygons.first().and_then(|rings| rings.first()),
        other => {
            return Err(CartoError::invalid_geometry(
                &feature.code,
                format!(
                    "expected Polygon or MultiPolygon, got {}",
                    geometry_kind(other)
                ),
            ))
        }
    };

    let ring = ring.filter(|r| !r.is_empty()).ok_or_else(|| {
        CartoError::invalid_geometry(&feature.code, "empty exterior ring")
    })?;

    let n = ring.len() as f64;
    let (sum_x, sum_y) = ring.iter().fold((0.0, 0.0), |(sx, sy), position| {
        (sx + position[0], sy + position[1])
    });

    Ok(Point::new(sum_x / n, sum_y / n))
}

/// Nom du type GeoJSON, pour les messages d'erreur
fn geometry_kind(value: &GeoValue) -> &'static str {
    match value {
        GeoValue::Point(_) => "Point",
        GeoValue::MultiPoint(_) => "MultiPoint",
        GeoValue::LineString(_) => "LineString",
        GeoValue::MultiLineString(_) => "MultiLineString",
        GeoValue::Polygon(_) => "Polygon",
        GeoValue::MultiPolygon(_) => "MultiPolygon",
        GeoValue::GeometryCollection(_) => "GeometryCollection",
    }
}

/// Collection de points d'ancrage des labels, un par feature, au centroïde
/// approximatif, portant `code` et `nom`.
///
/// Les features à géométrie invalide sont ignorées sans faire échouer le
/// rendu.
pub fn label_anchors(collection: &FeatureCollection) -> FeatureCollection {
    let anchors = collection
        .features
        .iter()
        .filter_map(|feature| match approximate_centroid(feature) {
            Ok(point) => {
                let mut properties = Map::new();
                properties.insert("code".to_string(), Value::String(feature.code.clone()));
                properties.insert("nom".to_string(), Value::String(feature.nom.clone()));

                Some(Feature {
                    code: feature.code.clone(),
                    nom: feature.nom.clone(),
                    geometry: Some(geojson::Geometry::new(GeoValue::Point(vec![
                        point.x(),
                        point.y(),
                    ]))),
                    properties,
                })
            }
            Err(e) => {
                warn!(code = feature.code.as_str(), error = %e, "Label anchor skipped");
                None
            }
        })
        .collect();

    FeatureCollection::new(anchors)
}
