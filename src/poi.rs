use crate::{geometry::LatLon, popup, ValidationError};

/// Revision of the points dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SchemaVersion {
    /// id, name, text, photo_url
    V1,
    /// V1 plus an external link
    V2,
}

/// Fields which only exist in some revisions of the points dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    V1,
    V2 { link: String },
}

impl Revision {
    pub fn schema(&self) -> SchemaVersion {
        match self {
            Revision::V1 => SchemaVersion::V1,
            Revision::V2 { .. } => SchemaVersion::V2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PoiRecord {
    pub id: String,
    pub name: String,
    pub text: String,
    pub photo_url: String,
    pub revision: Revision,
    pub location: LatLon,
}

impl PoiRecord {
    /// Validated popup snippet for this point.
    pub fn popup(&self) -> Result<String, ValidationError> {
        match &self.revision {
            Revision::V1 => popup::render(&self.name, &self.text, &self.photo_url),
            Revision::V2 { link } => {
                popup::render_with_link(&self.name, &self.text, &self.photo_url, link)
            }
        }
    }
}
