use std::{io::Read, path::Path};

use gpx::{read, Gpx};

use crate::{Error, Walk};

/// Read one walk per gpx track, joining the track segments.
///
/// Unnamed tracks are called after `fallback_name`.
pub fn parse_gpx_walks<R: Read>(reader: R, fallback_name: &str) -> Result<Vec<Walk>, Error> {
    let gpx: Gpx = read(reader)?;
    tracing::debug!(tracks = gpx.tracks.len(), "parsed gpx");

    gpx.tracks
        .into_iter()
        .enumerate()
        .map(|(index, track)| {
            let name = match track.name.filter(|name| !name.trim().is_empty()) {
                Some(name) => name,
                None if index == 0 => fallback_name.to_owned(),
                None => format!("{fallback_name} {}", index + 1),
            };
            let positions = track
                .segments
                .into_iter()
                .flat_map(|segment| segment.points.into_iter())
                .map(|p| {
                    let (x, y) = p.point().x_y();
                    [x, y]
                })
                .collect::<Vec<_>>();
            Walk::from_positions(name, &positions)
        })
        .collect()
}

pub fn load_gpx_walks<P: AsRef<Path>>(path: P) -> Result<Vec<Walk>, Error> {
    let path = path.as_ref();
    let fallback_name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "walk".to_owned());
    let gpx_file = std::fs::File::open(path)?;
    let gpx_reader = std::io::BufReader::new(gpx_file);
    parse_gpx_walks(gpx_reader, &fallback_name)
}
