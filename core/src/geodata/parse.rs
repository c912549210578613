use super::region::{Boundary, DatasetSource, GeoDataset, RegionGeometry};
use crate::prelude::{ResolveError, ResolveResult};
use geo::{LineString, MultiPolygon, Polygon};
use geojson::feature::Id;
use geojson::{Feature, GeoJson, Value};

type Properties = serde_json::Map<String, serde_json::Value>;

const ID_PROPERTIES: [&str; 5] = ["SIGLA_UF", "sigla", "id", "code", "CD_UF"];
const NAME_PROPERTIES: [&str; 4] = ["NM_ESTADO", "NM_UF", "name", "nome"];

/// Parses a FeatureCollection body into a remote dataset.
///
/// The payload is accepted whole or not at all: a single bad feature fails
/// the entire parse.
pub fn parse_feature_collection(body: &[u8]) -> ResolveResult<GeoDataset> {
    let text = std::str::from_utf8(body).map_err(|e| ResolveError::Parse(e.to_string()))?;
    let geojson: GeoJson = text
        .parse()
        .map_err(|e: geojson::Error| ResolveError::Parse(e.to_string()))?;

    let collection = match geojson {
        GeoJson::FeatureCollection(collection) => collection,
        _ => {
            return Err(ResolveError::Malformed(
                "expected a FeatureCollection".into(),
            ))
        }
    };

    if collection.features.is_empty() {
        return Err(ResolveError::Malformed("feature collection is empty".into()));
    }

    let regions = collection
        .features
        .iter()
        .enumerate()
        .map(|(index, feature)| parse_feature(index, feature))
        .collect::<ResolveResult<Vec<_>>>()?;

    GeoDataset::new(regions, DatasetSource::Remote)
}

fn parse_feature(index: usize, feature: &Feature) -> ResolveResult<RegionGeometry> {
    let properties = feature.properties.as_ref();
    let code = properties
        .and_then(|props| first_text(props, &ID_PROPERTIES))
        .or_else(|| feature.id.as_ref().map(id_text));
    let name = properties.and_then(|props| first_text(props, &NAME_PROPERTIES));

    let id = match (code, name.as_ref()) {
        (Some(code), _) => code,
        (None, Some(name)) => name.clone(),
        (None, None) => {
            return Err(ResolveError::Malformed(format!(
                "feature {} has neither a code nor a name",
                index
            )))
        }
    };

    let geometry = feature.geometry.as_ref().ok_or_else(|| {
        ResolveError::Malformed(format!("feature {} ({}) has no geometry", index, id))
    })?;

    let boundary = match &geometry.value {
        Value::Polygon(rings) => Boundary::Polygon(to_polygon(rings, &id)?),
        Value::MultiPolygon(polygons) => {
            if polygons.is_empty() {
                return Err(ResolveError::Malformed(format!(
                    "multipolygon of {} has no polygons",
                    id
                )));
            }
            Boundary::MultiPolygon(MultiPolygon::new(
                polygons
                    .iter()
                    .map(|rings| to_polygon(rings, &id))
                    .collect::<ResolveResult<Vec<_>>>()?,
            ))
        }
        other => {
            return Err(ResolveError::Malformed(format!(
                "feature {} has unsupported geometry {}",
                id,
                geometry_kind(other)
            )))
        }
    };

    Ok(RegionGeometry::new(id, name, boundary))
}

fn first_text(properties: &Properties, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| properties.get(*key))
        .find_map(|value| match value {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

fn geometry_kind(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn id_text(id: &Id) -> String {
    match id {
        Id::String(s) => s.clone(),
        Id::Number(n) => n.to_string(),
    }
}

fn to_polygon(rings: &[Vec<Vec<f64>>], id: &str) -> ResolveResult<Polygon<f64>> {
    let mut line_strings = rings
        .iter()
        .map(|ring| to_line_string(ring, id))
        .collect::<ResolveResult<Vec<_>>>()?
        .into_iter();
    let exterior = line_strings
        .next()
        .ok_or_else(|| ResolveError::Malformed(format!("polygon of {} has no rings", id)))?;
    Ok(Polygon::new(exterior, line_strings.collect()))
}

/// A linear ring needs four positions, the last closing onto the first.
fn to_line_string(ring: &[Vec<f64>], id: &str) -> ResolveResult<LineString<f64>> {
    if ring.len() < 4 {
        return Err(ResolveError::Malformed(format!(
            "ring of {} has {} positions",
            id,
            ring.len()
        )));
    }
    ring.iter()
        .map(|position| match position.as_slice() {
            [lon, lat, ..] if lon.is_finite() && lat.is_finite() => Ok((*lon, *lat)),
            _ => Err(ResolveError::Malformed(format!(
                "invalid position {:?} in {}",
                position, id
            ))),
        })
        .collect::<ResolveResult<Vec<_>>>()
        .map(LineString::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_STATES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "SIGLA_UF": "RN", "NM_ESTADO": "Rio Grande do Norte" },
                "geometry": { "type": "Polygon", "coordinates": [[[-38, -5], [-35, -5], [-35, -7], [-38, -7], [-38, -5]]] }
            },
            {
                "type": "Feature",
                "properties": { "name": "Pernambuco" },
                "geometry": { "type": "MultiPolygon", "coordinates": [[[[-41, -7], [-35, -7], [-35, -9], [-41, -9], [-41, -7]]]] }
            }
        ]
    }"#;

    #[test]
    fn parses_codes_and_names() {
        let dataset = parse_feature_collection(TWO_STATES.as_bytes()).unwrap();
        assert_eq!(dataset.source(), DatasetSource::Remote);
        assert_eq!(dataset.region_ids(), vec!["RN", "Pernambuco"]);
        let rn = dataset.region("RN").unwrap();
        assert_eq!(rn.display_name.as_deref(), Some("Rio Grande do Norte"));
        assert!(matches!(
            dataset.region("Pernambuco").unwrap().boundary,
            Boundary::MultiPolygon(_)
        ));
    }

    #[test]
    fn numeric_feature_id_is_used_as_code() {
        let body = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","id":24,"properties":{},
             "geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}}]}"#;
        let dataset = parse_feature_collection(body.as_bytes()).unwrap();
        assert_eq!(dataset.region_ids(), vec!["24"]);
        assert_eq!(dataset.regions()[0].accessible_label(), "24");
    }

    #[test]
    fn non_json_body_is_a_parse_error() {
        let err = parse_feature_collection(b"<html>rate limited</html>").unwrap_err();
        assert!(matches!(err, ResolveError::Parse(_)));
    }

    #[test]
    fn single_geometry_is_rejected() {
        let body = r#"{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}"#;
        let err = parse_feature_collection(body.as_bytes()).unwrap_err();
        assert!(matches!(err, ResolveError::Malformed(_)));
    }

    #[test]
    fn empty_collection_is_rejected() {
        let body = r#"{"type":"FeatureCollection","features":[]}"#;
        assert!(matches!(
            parse_feature_collection(body.as_bytes()),
            Err(ResolveError::Malformed(_))
        ));
    }

    #[test]
    fn one_bad_feature_rejects_the_whole_payload() {
        let body = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"SIGLA_UF":"RN"},
             "geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}},
            {"type":"Feature","properties":{"SIGLA_UF":"PB"},
             "geometry":{"type":"Point","coordinates":[0,0]}}]}"#;
        let err = parse_feature_collection(body.as_bytes()).unwrap_err();
        assert!(matches!(err, ResolveError::Malformed(ref msg) if msg.contains("PB")));
    }

    #[test]
    fn multipolygon_without_polygons_is_rejected() {
        let body = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"SIGLA_UF":"RN"},
             "geometry":{"type":"MultiPolygon","coordinates":[]}}]}"#;
        let err = parse_feature_collection(body.as_bytes()).unwrap_err();
        assert!(matches!(err, ResolveError::Malformed(ref msg) if msg.contains("RN")));
    }

    #[test]
    fn degenerate_ring_is_rejected() {
        let body = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"SIGLA_UF":"RN"},
             "geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[0,0]]]}}]}"#;
        assert!(matches!(
            parse_feature_collection(body.as_bytes()),
            Err(ResolveError::Malformed(_))
        ));
    }

    #[test]
    fn unnamed_feature_is_rejected() {
        let body = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"area":12},
             "geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}}]}"#;
        assert!(matches!(
            parse_feature_collection(body.as_bytes()),
            Err(ResolveError::Malformed(_))
        ));
    }

    #[test]
    fn duplicate_codes_are_rejected() {
        let body = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"SIGLA_UF":"RN"},
             "geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}},
            {"type":"Feature","properties":{"SIGLA_UF":"RN"},
             "geometry":{"type":"Polygon","coordinates":[[[2,2],[3,2],[3,3],[2,2]]]}}]}"#;
        assert!(matches!(
            parse_feature_collection(body.as_bytes()),
            Err(ResolveError::Malformed(_))
        ));
    }
}
