//! Reading the tour datasets.
//!
//! Points, grounds and walks are GeoJSON feature collections. Every feature
//! must carry the properties of its dataset, non-empty. Popup fields are not
//! validated here: that happens when a popup is rendered.
use std::path::Path;

use geojson::{feature::Id, Feature, FeatureCollection, GeoJson, Value};
use serde_json::Value as JsonValue;

use crate::{
    geometry::{swap_axes, swap_point, LatLon},
    gpx::load_gpx_walks,
    poi::{PoiRecord, Revision, SchemaVersion},
    Error, Walk,
};

const INLINE: &str = "<inline>";

/// A venue drawn as a polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Ground {
    pub id: String,
    pub name: String,
    /// exterior ring first, then holes; lat/lon order
    pub rings: Vec<Vec<LatLon>>,
}

pub fn read_feature_collection<P: AsRef<Path>>(path: P) -> Result<FeatureCollection, Error> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    parse_feature_collection(&json, path)
}

fn parse_feature_collection(json: &str, path: &Path) -> Result<FeatureCollection, Error> {
    match json.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        _ => Err(Error::NotAFeatureCollection(path.to_owned())),
    }
}

pub fn load_points<P: AsRef<Path>>(path: P, schema: SchemaVersion) -> Result<Vec<PoiRecord>, Error> {
    let path = path.as_ref();
    let points = points_from_collection(read_feature_collection(path)?, path, schema)?;
    tracing::info!(path = %path.display(), points = points.len(), ?schema, "loaded points");
    Ok(points)
}

pub fn parse_points(json: &str, schema: SchemaVersion) -> Result<Vec<PoiRecord>, Error> {
    let path = Path::new(INLINE);
    points_from_collection(parse_feature_collection(json, path)?, path, schema)
}

fn points_from_collection(
    collection: FeatureCollection,
    path: &Path,
    schema: SchemaVersion,
) -> Result<Vec<PoiRecord>, Error> {
    collection
        .features
        .iter()
        .enumerate()
        .map(|(index, feature)| {
            let text = |property| text_property(feature, property, path, index);
            let location = match geometry(feature, path, index, "Point")? {
                Value::Point(position) => swap_point(position)?,
                _ => return Err(unexpected(path, index, "Point")),
            };
            let revision = match schema {
                SchemaVersion::V1 => Revision::V1,
                SchemaVersion::V2 => Revision::V2 { link: text("link")? },
            };
            Ok(PoiRecord {
                id: feature_id(feature, path, index)?,
                name: text("name")?,
                text: text("text")?,
                photo_url: text("photo_url")?,
                revision,
                location,
            })
        })
        .collect()
}

pub fn load_grounds<P: AsRef<Path>>(path: P) -> Result<Vec<Ground>, Error> {
    let path = path.as_ref();
    let grounds = grounds_from_collection(read_feature_collection(path)?, path)?;
    tracing::info!(path = %path.display(), grounds = grounds.len(), "loaded grounds");
    Ok(grounds)
}

pub fn parse_grounds(json: &str) -> Result<Vec<Ground>, Error> {
    let path = Path::new(INLINE);
    grounds_from_collection(parse_feature_collection(json, path)?, path)
}

fn grounds_from_collection(collection: FeatureCollection, path: &Path) -> Result<Vec<Ground>, Error> {
    let mut grounds = Vec::new();
    for (index, feature) in collection.features.iter().enumerate() {
        let id = feature_id(feature, path, index)?;
        let name = text_property(feature, "name", path, index)?;
        let polygons = match geometry(feature, path, index, "Polygon")? {
            Value::Polygon(rings) => std::slice::from_ref(rings),
            Value::MultiPolygon(polygons) => polygons.as_slice(),
            _ => return Err(unexpected(path, index, "Polygon")),
        };
        for rings in polygons {
            let rings = rings
                .iter()
                .map(|ring| swap_axes(ring))
                .collect::<Result<Vec<_>, _>>()?;
            grounds.push(Ground {
                id: id.clone(),
                name: name.clone(),
                rings,
            });
        }
    }
    Ok(grounds)
}

/// Walks from a GeoJSON file, or from a gpx file when the extension says so.
pub fn load_walks<P: AsRef<Path>>(path: P) -> Result<Vec<Walk>, Error> {
    let path = path.as_ref();
    let is_gpx = path
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("gpx"));
    let walks = if is_gpx {
        load_gpx_walks(path)?
    } else {
        walks_from_collection(read_feature_collection(path)?, path)?
    };
    tracing::info!(path = %path.display(), walks = walks.len(), "loaded walks");
    Ok(walks)
}

pub fn parse_walks(json: &str) -> Result<Vec<Walk>, Error> {
    let path = Path::new(INLINE);
    walks_from_collection(parse_feature_collection(json, path)?, path)
}

fn walks_from_collection(collection: FeatureCollection, path: &Path) -> Result<Vec<Walk>, Error> {
    let mut walks = Vec::new();
    for (index, feature) in collection.features.iter().enumerate() {
        let name = text_property(feature, "name", path, index)?;
        match geometry(feature, path, index, "LineString")? {
            Value::LineString(line) => walks.push(Walk::from_positions(name, line)?),
            Value::MultiLineString(lines) => {
                for line in lines {
                    walks.push(Walk::from_positions(name.clone(), line)?);
                }
            }
            _ => return Err(unexpected(path, index, "LineString")),
        }
    }
    Ok(walks)
}

fn geometry<'a>(
    feature: &'a Feature,
    path: &Path,
    index: usize,
    expected: &'static str,
) -> Result<&'a Value, Error> {
    feature
        .geometry
        .as_ref()
        .map(|geometry| &geometry.value)
        .ok_or_else(|| unexpected(path, index, expected))
}

fn unexpected(path: &Path, index: usize, expected: &'static str) -> Error {
    Error::UnexpectedGeometry {
        path: path.to_owned(),
        index,
        expected,
    }
}

fn missing(path: &Path, index: usize, property: &'static str) -> Error {
    Error::MissingProperty {
        path: path.to_owned(),
        index,
        property,
    }
}

// strings and numbers are accepted, blank strings count as missing
fn as_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) if !s.trim().is_empty() => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text_property(
    feature: &Feature,
    property: &'static str,
    path: &Path,
    index: usize,
) -> Result<String, Error> {
    feature
        .property(property)
        .and_then(as_text)
        .ok_or_else(|| missing(path, index, property))
}

fn feature_id(feature: &Feature, path: &Path, index: usize) -> Result<String, Error> {
    if let Some(id) = feature.property("id").and_then(as_text) {
        return Ok(id);
    }
    match &feature.id {
        Some(Id::String(id)) if !id.trim().is_empty() => Ok(id.clone()),
        Some(Id::Number(id)) => Ok(id.to_string()),
        _ => Err(missing(path, index, "id")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POINTS: &str = r#"{
      "type": "FeatureCollection",
      "features": [
        {
          "type": "Feature",
          "properties": {
            "id": 1,
            "name": "Stadion",
            "photo_url": "data/photos/stadion.jpg",
            "text": "Heimstätte",
            "link": "https://example.org/stadion"
          },
          "geometry": { "type": "Point", "coordinates": [14.4213, 48.0427] }
        },
        {
          "type": "Feature",
          "id": "platz",
          "properties": {
            "name": "Platz",
            "photo_url": "data/photos/v_platz.png",
            "text": "Treffpunkt"
          },
          "geometry": { "type": "Point", "coordinates": [14.4190, 48.0390] }
        }
      ]
    }"#;

    #[test]
    fn reads_legacy_points() {
        let points = parse_points(POINTS, SchemaVersion::V1).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].id, "1");
        assert_eq!(points[0].name, "Stadion");
        assert_eq!(points[0].location, [48.0427, 14.4213]);
        assert_eq!(points[0].revision, Revision::V1);
        assert_eq!(points[1].id, "platz");
    }

    #[test]
    fn linked_schema_requires_link() {
        match parse_points(POINTS, SchemaVersion::V2) {
            Err(Error::MissingProperty {
                index, property, ..
            }) => {
                assert_eq!(index, 1);
                assert_eq!(property, "link");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn reads_links() {
        let linked = POINTS.replace(
            r#""text": "Treffpunkt""#,
            r#""text": "Treffpunkt", "link": "https://example.org/platz""#,
        );
        let points = parse_points(&linked, SchemaVersion::V2).unwrap();
        assert_eq!(
            points[0].revision,
            Revision::V2 {
                link: "https://example.org/stadion".to_owned()
            }
        );
    }

    #[test]
    fn blank_properties_are_missing() {
        let blank = POINTS.replace(r#""name": "Platz""#, r#""name": "  ""#);
        assert!(matches!(
            parse_points(&blank, SchemaVersion::V1),
            Err(Error::MissingProperty { property: "name", .. })
        ));
    }

    #[test]
    fn points_need_point_geometry() {
        let line = POINTS.replace(
            r#"{ "type": "Point", "coordinates": [14.4190, 48.0390] }"#,
            r#"{ "type": "LineString", "coordinates": [[14.4190, 48.0390], [14.42, 48.04]] }"#,
        );
        assert!(matches!(
            parse_points(&line, SchemaVersion::V1),
            Err(Error::UnexpectedGeometry { index: 1, expected: "Point", .. })
        ));
    }

    #[test]
    fn only_feature_collections() {
        let point = r#"{ "type": "Point", "coordinates": [14.42, 48.04] }"#;
        assert!(matches!(
            parse_walks(point),
            Err(Error::NotAFeatureCollection(_))
        ));
        assert!(matches!(parse_walks("{"), Err(Error::GeoJson(_))));
    }

    #[test]
    fn reads_grounds() {
        let grounds = parse_grounds(
            r#"{
              "type": "FeatureCollection",
              "features": [
                {
                  "type": "Feature",
                  "properties": { "id": "g1", "name": "Sportplatz" },
                  "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                      [[[14.40, 48.03], [14.41, 48.03], [14.41, 48.04], [14.40, 48.03]]],
                      [[[14.42, 48.05], [14.43, 48.05], [14.43, 48.06], [14.42, 48.05]]]
                    ]
                  }
                }
              ]
            }"#,
        )
        .unwrap();
        assert_eq!(grounds.len(), 2);
        assert_eq!(grounds[0].name, "Sportplatz");
        assert_eq!(grounds[1].id, "g1");
        assert_eq!(grounds[0].rings[0][1], [48.03, 14.41]);
    }

    #[test]
    fn reads_walks() {
        let walks = parse_walks(
            r#"{
              "type": "FeatureCollection",
              "features": [
                {
                  "type": "Feature",
                  "properties": { "name": "Altstadt" },
                  "geometry": {
                    "type": "LineString",
                    "coordinates": [[14.42, 48.04], [14.43, 48.05]]
                  }
                }
              ]
            }"#,
        )
        .unwrap();
        assert_eq!(walks.len(), 1);
        assert_eq!(walks[0].path, vec![[48.04, 14.42], [48.05, 14.43]]);
    }

    #[test]
    fn malformed_walk_coordinates() {
        let result = parse_walks(
            r#"{
              "type": "FeatureCollection",
              "features": [
                {
                  "type": "Feature",
                  "properties": { "name": "Altstadt" },
                  "geometry": {
                    "type": "LineString",
                    "coordinates": [[14.42, 48.04, 300.0], [14.43, 48.05]]
                  }
                }
              ]
            }"#,
        );
        assert!(matches!(result, Err(Error::InvalidGeometry(_))));
    }
}
