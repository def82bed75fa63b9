use std::path::PathBuf;

use thiserror::Error;

/// A popup field violating one of its constraints.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title has {len} characters, at most {max} allowed")]
    TitleTooLong { len: usize, max: usize },
    #[error("description has {len} characters, at most {max} allowed")]
    DescriptionTooLong { len: usize, max: usize },
    #[error("link has {len} characters, at most {max} allowed")]
    LinkTooLong { len: usize, max: usize },
    #[error("malformed link {link:?}: {source}")]
    MalformedLink {
        link: String,
        source: url::ParseError,
    },
    #[error("link {0:?} has no host")]
    LinkWithoutHost(String),
    #[error("photo url {0:?} is not a .jpg or .png image")]
    NotAnImage(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("point of interest {id}: {source}")]
    Poi {
        id: String,
        source: ValidationError,
    },
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("geojson error: {0}")]
    GeoJson(#[from] Box<geojson::Error>),
    #[error("gpx error: {0}")]
    Gpx(#[from] gpx::errors::GpxError),
    #[error("{0}: not a feature collection")]
    NotAFeatureCollection(PathBuf),
    #[error("{path}: feature {index} has no {property:?} property")]
    MissingProperty {
        path: PathBuf,
        index: usize,
        property: &'static str,
    },
    #[error("{path}: feature {index} is not a {expected}")]
    UnexpectedGeometry {
        path: PathBuf,
        index: usize,
        expected: &'static str,
    },
    #[error("walk {0:?} has no coordinates")]
    EmptyWalk(String),
    #[error("invalid config: {0}")]
    Config(String),
}

impl From<geojson::Error> for Error {
    fn from(e: geojson::Error) -> Self {
        Error::GeoJson(Box::new(e))
    }
}
