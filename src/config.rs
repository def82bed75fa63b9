use std::path::PathBuf;

use clap::Parser;

use crate::{
    geometry::{Bounds, LatLon},
    poi::SchemaVersion,
    Error,
};

/// Highest zoom level the default tile servers provide.
pub const MAX_ZOOM: u8 = 19;

const DEFAULT_POINTS: &str = "data/points.geojson";
const DEFAULT_GROUNDS: &str = "data/grounds.geojson";
const DEFAULT_WALKS: &str = "data/walks.geojson";
const DEFAULT_OUTPUT: &str = "index.html";
const DEFAULT_CENTER: LatLon = [48.04274, 14.42127];
const DEFAULT_ZOOM: u8 = 15;
const DEFAULT_POPUP_WIDTH: u32 = 300;

/// Render the city tour map as a single html file.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Points of interest (GeoJSON)
    #[arg(long, env = "TOURMAP_POINTS", default_value = DEFAULT_POINTS)]
    pub points: PathBuf,
    /// Grounds and venues (GeoJSON)
    #[arg(long, env = "TOURMAP_GROUNDS", default_value = DEFAULT_GROUNDS)]
    pub grounds: PathBuf,
    /// Walks (GeoJSON, or GPX when the file ends in .gpx)
    #[arg(long, env = "TOURMAP_WALKS", default_value = DEFAULT_WALKS)]
    pub walks: PathBuf,
    #[arg(short, long, env = "TOURMAP_OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,
    /// Revision of the points dataset; v2 points carry a link
    #[arg(long, value_enum, default_value_t = SchemaVersion::V2)]
    pub schema: SchemaVersion,
    #[arg(long, default_value_t = DEFAULT_CENTER[0], allow_negative_numbers = true)]
    pub center_lat: f64,
    #[arg(long, default_value_t = DEFAULT_CENTER[1], allow_negative_numbers = true)]
    pub center_lon: f64,
    #[arg(long, default_value_t = DEFAULT_ZOOM)]
    pub zoom: u8,
    /// Maximal popup width in pixels
    #[arg(long, default_value_t = DEFAULT_POPUP_WIDTH)]
    pub popup_width: u32,
}

/// The command line defaults, ignoring `TOURMAP_*` variables.
impl Default for Config {
    fn default() -> Self {
        Config {
            points: PathBuf::from(DEFAULT_POINTS),
            grounds: PathBuf::from(DEFAULT_GROUNDS),
            walks: PathBuf::from(DEFAULT_WALKS),
            output: PathBuf::from(DEFAULT_OUTPUT),
            schema: SchemaVersion::V2,
            center_lat: DEFAULT_CENTER[0],
            center_lon: DEFAULT_CENTER[1],
            zoom: DEFAULT_ZOOM,
            popup_width: DEFAULT_POPUP_WIDTH,
        }
    }
}

impl Config {
    pub fn center(&self) -> LatLon {
        [self.center_lat, self.center_lon]
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::CITY
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !self.bounds().contains(self.center()) {
            return Err(Error::Config(format!(
                "map center {:?} is outside of the city bounds {:?}",
                self.center(),
                self.bounds()
            )));
        }
        if self.zoom > MAX_ZOOM {
            return Err(Error::Config(format!(
                "zoom {} is above {MAX_ZOOM}",
                self.zoom
            )));
        }
        Ok(())
    }
}
