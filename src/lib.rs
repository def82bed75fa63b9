mod config;
pub use config::Config;
mod data;
pub use data::{
    load_grounds, load_points, load_walks, parse_grounds, parse_points, parse_walks,
    read_feature_collection, Ground,
};
mod error;
pub use error::{Error, ValidationError};
pub mod geometry;
mod gpx;
pub use self::gpx::{load_gpx_walks, parse_gpx_walks};
pub mod html;
pub mod locate;
pub use locate::LocateControl;
pub mod map;
pub use map::{Icon, MapBuilder, Marker, PathStyle, Polygon, Polyline, TileLayer};
mod poi;
pub use poi::{PoiRecord, Revision, SchemaVersion};
pub mod popup;
mod walk;
pub use walk::Walk;

use geometry::Bounds;

pub const GROUNDS_GROUP: &str = "Grounds";
pub const WALKS_GROUP: &str = "Walks";
pub const POIS_GROUP: &str = "Points of interest";

const GROUND_STROKE: &str = "#2c7a2c";
const GROUND_FILL: &str = "#66bb66";
const WALK_COLOR: &str = "#d9480f";

/// Load every dataset named in `config` and lay them out on a map.
///
/// Nothing is written: any invalid record aborts before the output exists.
pub fn build_map(config: &Config) -> Result<MapBuilder, Error> {
    config.validate()?;
    let points = load_points(&config.points, config.schema)?;
    let grounds = load_grounds(&config.grounds)?;
    let walks = load_walks(&config.walks)?;
    compose_map(config, &points, &grounds, &walks)
}

pub fn compose_map(
    config: &Config,
    points: &[PoiRecord],
    grounds: &[Ground],
    walks: &[Walk],
) -> Result<MapBuilder, Error> {
    let mut map = MapBuilder::new(config.center(), config.zoom);
    map.add_tile_layer(TileLayer::open_street_map())
        .add_tile_layer(TileLayer::carto_positron());

    for ground in grounds {
        map.add_layer(
            GROUNDS_GROUP,
            Polygon {
                rings: ground.rings.clone(),
                style: PathStyle::filled(GROUND_STROKE, GROUND_FILL, 0.4),
                tooltip: Some(ground.name.clone()),
            },
        );
    }

    for walk in walks {
        let Some(location) = walk.start() else {
            tracing::warn!(walk = %walk.name, "skipping walk without coordinates");
            continue;
        };
        warn_outside(&walk.name, &walk.path, config.bounds());
        map.add_layer(
            WALKS_GROUP,
            Polyline {
                path: walk.path.clone(),
                style: PathStyle::stroke(WALK_COLOR, 4.0),
                tooltip: Some(walk.name.clone()),
            },
        );
        let mut start = Marker::new(location).with_tooltip(walk.name.clone());
        if let Some(bearing) = walk.start_bearing() {
            start = start.with_icon(Icon::Arrow {
                bearing,
                color: WALK_COLOR.to_owned(),
            });
        }
        map.add_marker(WALKS_GROUP, start);
    }

    for poi in points {
        let popup = poi.popup().map_err(|source| Error::Poi {
            id: poi.id.clone(),
            source,
        })?;
        map.add_marker(
            POIS_GROUP,
            Marker::new(poi.location)
                .with_popup(popup, config.popup_width)
                .with_tooltip(poi.name.clone()),
        );
    }

    map.add_control(
        LocateControl::new()
            .with_option("keep_current_zoom_level", true)
            .with_option(
                "strings",
                serde_json::json!({ "title": "Wo bin ich?", "popup": "Sie sind hier" }),
            ),
    );
    tracing::info!(
        points = points.len(),
        grounds = grounds.len(),
        walks = walks.len(),
        layers = map.layers_count(),
        "composed map"
    );
    Ok(map)
}

fn warn_outside(walk: &str, path: &[geometry::LatLon], bounds: Bounds) {
    let outside = path.iter().filter(|p| !bounds.contains(**p)).count();
    if outside > 0 {
        tracing::warn!(walk, outside, "walk leaves the city bounds");
    }
}

/// Build the map and write it to `config.output`.
pub fn run(config: &Config) -> Result<(), Error> {
    let map = build_map(config)?;
    map.save(&config.output)?;
    tracing::info!(output = %config.output.display(), "saved map");
    Ok(())
}
