use std::{
    io::{self, Write},
    path::Path,
};

use itertools::Itertools;
use serde::Serialize;

use crate::{
    geometry::LatLon,
    html::{js, save_document_to_writer, write_element, Asset, Element, MAP_DIV},
};

/// Variable holding the leaflet map in the generated script.
const MAP_VAR: &str = "map";

pub struct TileLayer {
    pub name: String,
    pub url_template: String,
    pub attribution: String,
    pub max_zoom: u8,
}

impl TileLayer {
    pub fn open_street_map() -> Self {
        TileLayer {
            name: "OpenStreetMap".to_owned(),
            url_template: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_owned(),
            attribution: "&copy; <a href='https://www.openstreetmap.org/copyright'>OpenStreetMap</a> contributors".to_owned(),
            max_zoom: 19,
        }
    }

    pub fn carto_positron() -> Self {
        TileLayer {
            name: "CartoDB Positron".to_owned(),
            url_template: "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png".to_owned(),
            attribution: "&copy; <a href='https://www.openstreetmap.org/copyright'>OpenStreetMap</a> contributors &copy; <a href='https://carto.com/attributions'>CARTO</a>".to_owned(),
            max_zoom: 20,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TileOptions<'a> {
    attribution: &'a str,
    max_zoom: u8,
}

impl Element for TileLayer {
    fn kind(&self) -> &'static str {
        "tile_layer"
    }

    fn write_constructor(&self, writer: &mut dyn Write) -> io::Result<()> {
        let options = TileOptions {
            attribution: &self.attribution,
            max_zoom: self.max_zoom,
        };
        write!(
            writer,
            "L.tileLayer({}, {})",
            js(&self.url_template)?,
            js(&options)?
        )
    }
}

/// Stroke and fill of polygons and polylines.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStyle {
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
}

impl PathStyle {
    pub fn stroke(color: &str, weight: f64) -> Self {
        PathStyle {
            color: color.to_owned(),
            weight,
            opacity: 0.8,
            fill_color: None,
            fill_opacity: None,
        }
    }

    pub fn filled(color: &str, fill_color: &str, fill_opacity: f64) -> Self {
        PathStyle {
            fill_color: Some(fill_color.to_owned()),
            fill_opacity: Some(fill_opacity),
            ..PathStyle::stroke(color, 2.0)
        }
    }
}

fn write_tooltip(writer: &mut dyn Write, name: &str, tooltip: Option<&str>) -> io::Result<()> {
    if let Some(tooltip) = tooltip {
        writeln!(writer, "{name}.bindTooltip({});", js(tooltip)?)?;
    }
    Ok(())
}

pub struct Polygon {
    pub rings: Vec<Vec<LatLon>>,
    pub style: PathStyle,
    pub tooltip: Option<String>,
}

impl Element for Polygon {
    fn kind(&self) -> &'static str {
        "polygon"
    }

    fn write_constructor(&self, writer: &mut dyn Write) -> io::Result<()> {
        write!(writer, "L.polygon({}, {})", js(&self.rings)?, js(&self.style)?)
    }

    fn write_bindings(&self, writer: &mut dyn Write, name: &str) -> io::Result<()> {
        write_tooltip(writer, name, self.tooltip.as_deref())
    }
}

pub struct Polyline {
    pub path: Vec<LatLon>,
    pub style: PathStyle,
    pub tooltip: Option<String>,
}

impl Element for Polyline {
    fn kind(&self) -> &'static str {
        "poly_line"
    }

    fn write_constructor(&self, writer: &mut dyn Write) -> io::Result<()> {
        write!(writer, "L.polyline({}, {})", js(&self.path)?, js(&self.style)?)
    }

    fn write_bindings(&self, writer: &mut dyn Write, name: &str) -> io::Result<()> {
        write_tooltip(writer, name, self.tooltip.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Icon {
    Default,
    /// An arrow pointing towards `bearing` degrees (0 is north).
    Arrow { bearing: f64, color: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub html: String,
    pub max_width: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub location: LatLon,
    pub icon: Icon,
    pub popup: Option<Popup>,
    pub tooltip: Option<String>,
}

impl Marker {
    pub fn new(location: LatLon) -> Self {
        Marker {
            location,
            icon: Icon::Default,
            popup: None,
            tooltip: None,
        }
    }

    pub fn with_popup(mut self, html: String, max_width: u32) -> Self {
        self.popup = Some(Popup { html, max_width });
        self
    }

    pub fn with_tooltip(mut self, tooltip: String) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = icon;
        self
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DivIconOptions {
    html: String,
    class_name: &'static str,
    icon_size: [u32; 2],
    icon_anchor: [u32; 2],
}

impl Element for Marker {
    fn kind(&self) -> &'static str {
        "marker"
    }

    fn write_constructor(&self, writer: &mut dyn Write) -> io::Result<()> {
        write!(writer, "L.marker({}", js(&self.location)?)?;
        if let Icon::Arrow { bearing, color } = &self.icon {
            // the glyph points east
            let options = DivIconOptions {
                html: format!(
                    "<div style='transform: rotate({:.1}deg); color: {color}; font-size: 24px; line-height: 24px;'>&#10148;</div>",
                    bearing - 90.0
                ),
                class_name: "walk-start",
                icon_size: [24, 24],
                icon_anchor: [12, 12],
            };
            write!(writer, ", {{\"icon\": L.divIcon({})}}", js(&options)?)?;
        }
        write!(writer, ")")
    }

    fn write_bindings(&self, writer: &mut dyn Write, name: &str) -> io::Result<()> {
        if let Some(popup) = &self.popup {
            writeln!(
                writer,
                "{name}.bindPopup({}, {{\"maxWidth\": {}}});",
                js(&popup.html)?,
                popup.max_width
            )?;
        }
        write_tooltip(writer, name, self.tooltip.as_deref())
    }
}

// `"label": variable` pairs of a layer control
fn layer_entries(layers: &[(&str, String)]) -> io::Result<String> {
    let entries = layers
        .iter()
        .map(|(label, var)| -> io::Result<String> { Ok(format!("{}: {var}", js(label)?)) })
        .collect::<io::Result<Vec<_>>>()?;
    Ok(entries.join(", "))
}

struct Overlay {
    name: String,
    elements: Vec<Box<dyn Element>>,
}

/// Accumulates the layers of a map, written out once by [`MapBuilder::serialize`]
/// or [`MapBuilder::save`].
pub struct MapBuilder {
    center: LatLon,
    zoom: u8,
    tiles: Vec<TileLayer>,
    overlays: Vec<Overlay>,
    controls: Vec<Box<dyn Element>>,
    layer_control: bool,
}

impl MapBuilder {
    pub fn new(center: LatLon, zoom: u8) -> Self {
        MapBuilder {
            center,
            zoom,
            tiles: Vec::new(),
            overlays: Vec::new(),
            controls: Vec::new(),
            layer_control: true,
        }
    }

    /// Add a base layer. The first one is displayed initially.
    pub fn add_tile_layer(&mut self, tiles: TileLayer) -> &mut Self {
        self.tiles.push(tiles);
        self
    }

    /// Add `layer` to the overlay group `group`, created on first use.
    pub fn add_layer<E: Element + 'static>(&mut self, group: &str, layer: E) -> &mut Self {
        let index = match self.overlays.iter().position(|o| o.name == group) {
            Some(index) => index,
            None => {
                self.overlays.push(Overlay {
                    name: group.to_owned(),
                    elements: Vec::new(),
                });
                self.overlays.len() - 1
            }
        };
        self.overlays[index].elements.push(Box::new(layer));
        self
    }

    pub fn add_marker(&mut self, group: &str, marker: Marker) -> &mut Self {
        self.add_layer(group, marker)
    }

    pub fn add_control<E: Element + 'static>(&mut self, control: E) -> &mut Self {
        self.controls.push(Box::new(control));
        self
    }

    pub fn with_layer_control(&mut self, enabled: bool) -> &mut Self {
        self.layer_control = enabled;
        self
    }

    pub fn layers_count(&self) -> usize {
        self.overlays.iter().map(|o| o.elements.len()).sum()
    }

    fn assets(&self) -> Vec<Asset> {
        self.tiles
            .iter()
            .flat_map(|t| t.assets())
            .chain(
                self.overlays
                    .iter()
                    .flat_map(|o| o.elements.iter())
                    .chain(self.controls.iter())
                    .flat_map(|e| e.assets()),
            )
            .unique()
            .collect()
    }

    fn write_script<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let mut counter = 0;
        let mut next_name = |kind: &str| {
            counter += 1;
            format!("{kind}_{counter}")
        };

        #[derive(Serialize)]
        struct MapOptions {
            center: LatLon,
            zoom: u8,
        }
        let options = MapOptions {
            center: self.center,
            zoom: self.zoom,
        };
        writeln!(
            writer,
            "var {MAP_VAR} = L.map({}, {});",
            js(MAP_DIV)?,
            js(&options)?
        )?;

        let mut base_layers = Vec::new();
        for (index, tiles) in self.tiles.iter().enumerate() {
            let name = next_name(tiles.kind());
            let parent = (index == 0).then_some(MAP_VAR);
            write_element(writer, tiles, &name, parent)?;
            base_layers.push((tiles.name.as_str(), name));
        }

        let mut groups = Vec::new();
        for overlay in &self.overlays {
            let group = next_name("feature_group");
            writeln!(writer, "var {group} = L.featureGroup().addTo({MAP_VAR});")?;
            for element in &overlay.elements {
                let name = next_name(element.kind());
                write_element(writer, element.as_ref(), &name, Some(&group))?;
            }
            groups.push((overlay.name.as_str(), group));
        }

        for control in &self.controls {
            let name = next_name(control.kind());
            write_element(writer, control.as_ref(), &name, Some(MAP_VAR))?;
        }

        if self.layer_control && (base_layers.len() > 1 || !groups.is_empty()) {
            writeln!(
                writer,
                "var layer_control = L.control.layers({{{}}}, {{{}}}).addTo({MAP_VAR});",
                layer_entries(&base_layers)?,
                layer_entries(&groups)?
            )?;
        }
        Ok(())
    }

    pub fn write_html<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let mut script: Vec<u8> = Vec::new();
        self.write_script(&mut script)?;
        save_document_to_writer(writer, &self.assets(), &script)
    }

    /// The complete html document.
    pub fn serialize(&self) -> io::Result<String> {
        let mut html: Vec<u8> = Vec::new();
        self.write_html(&mut html)?;
        String::from_utf8(html).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Write the document next to `path` and move it into place, so `path`
    /// is either untouched or complete.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let file = tempfile::NamedTempFile::new_in(dir)?;
        let mut writer = io::BufWriter::new(file);
        self.write_html(&mut writer)?;
        let file = writer.into_inner().map_err(|err| err.into_error())?;
        file.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}
