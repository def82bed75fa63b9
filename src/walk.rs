use crate::{
    geometry::{initial_bearing, swap_axes, LatLon},
    Error,
};

/// A named route, stored in lat/lon order.
#[derive(Debug, Clone, PartialEq)]
pub struct Walk {
    pub name: String,
    pub path: Vec<LatLon>,
}

impl Walk {
    /// Build a walk from GeoJSON ordered `[lon, lat]` positions.
    pub fn from_positions<P: AsRef<[f64]>>(name: String, positions: &[P]) -> Result<Self, Error> {
        if positions.is_empty() {
            return Err(Error::EmptyWalk(name));
        }
        let path = swap_axes(positions)?;
        Ok(Walk { name, path })
    }

    /// First point, `None` only for a walk built by hand with no path.
    pub fn start(&self) -> Option<LatLon> {
        self.path.first().copied()
    }

    /// Direction of the first leg, north being 0 degrees.
    pub fn start_bearing(&self) -> Option<f64> {
        initial_bearing(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_lat_lon() {
        let walk = Walk::from_positions(
            "Altstadt".to_owned(),
            &[[14.42, 48.04], [14.43, 48.05]],
        )
        .unwrap();
        assert_eq!(walk.path, vec![[48.04, 14.42], [48.05, 14.43]]);
        assert_eq!(walk.start(), Some([48.04, 14.42]));
        assert!(walk.start_bearing().is_some());
    }

    #[test]
    fn needs_coordinates() {
        let none: [[f64; 2]; 0] = [];
        assert!(matches!(
            Walk::from_positions("empty".to_owned(), &none),
            Err(Error::EmptyWalk(name)) if name == "empty"
        ));
    }

    #[test]
    fn single_point_walk_has_no_bearing() {
        let walk = Walk::from_positions("dot".to_owned(), &[[14.42, 48.04]]).unwrap();
        assert!(walk.start_bearing().is_none());
    }

    #[test]
    fn pathless_walk_has_no_start() {
        let walk = Walk {
            name: "w".to_owned(),
            path: Vec::new(),
        };
        assert_eq!(walk.start(), None);
        assert!(walk.start_bearing().is_none());
    }
}
