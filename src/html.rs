use std::io::{self, Write};

use itertools::Itertools;

pub const LEAFLET_CSS: &str = "https://cdn.jsdelivr.net/npm/leaflet@1.9.4/dist/leaflet.css";
pub const LEAFLET_JS: &str = "https://cdn.jsdelivr.net/npm/leaflet@1.9.4/dist/leaflet.js";

/// Id of the `<div>` holding the map.
pub const MAP_DIV: &str = "map";

/// A file the document head has to link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Asset {
    Stylesheet(&'static str),
    Script(&'static str),
}

/// Anything which can be drawn by leaflet.
pub trait Element {
    /// Prefix of the javascript variable holding the element.
    fn kind(&self) -> &'static str;

    /// Write the javascript expression building the element.
    fn write_constructor(&self, writer: &mut dyn Write) -> io::Result<()>;

    /// Statements to run on the built element (popups, tooltips).
    fn write_bindings(&self, _writer: &mut dyn Write, _name: &str) -> io::Result<()> {
        Ok(())
    }

    fn assets(&self) -> Vec<Asset> {
        Vec::new()
    }
}

/// Declare `name`, build `element` into it and attach it to `parent`.
pub fn write_element<W: Write>(
    writer: &mut W,
    element: &dyn Element,
    name: &str,
    parent: Option<&str>,
) -> io::Result<()> {
    write!(writer, "var {name} = ")?;
    element.write_constructor(writer)?;
    writeln!(writer, ";")?;
    element.write_bindings(writer, name)?;
    if let Some(parent) = parent {
        writeln!(writer, "{name}.addTo({parent});")?;
    }
    Ok(())
}

/// Encode `value` as a javascript literal safe to inline in a `<script>`.
pub fn js<T: serde::Serialize + ?Sized>(value: &T) -> io::Result<String> {
    Ok(serde_json::to_string(value)?.replace("</script", "<\\/script"))
}

pub fn save_document_to_writer<W: Write>(
    writer: &mut W,
    assets: &[Asset],
    script: &[u8],
) -> io::Result<()> {
    writeln!(writer, "<!DOCTYPE html>")?;
    writeln!(writer, "<html>")?;
    writeln!(writer, "<head>")?;
    writeln!(
        writer,
        "<meta http-equiv='content-type' content='text/html; charset=UTF-8' />"
    )?;
    writeln!(
        writer,
        "<meta name='viewport' content='width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no' />"
    )?;
    let leaflet = [Asset::Stylesheet(LEAFLET_CSS), Asset::Script(LEAFLET_JS)];
    for asset in leaflet.iter().chain(assets).unique() {
        match asset {
            Asset::Stylesheet(href) => writeln!(writer, "<link rel='stylesheet' href='{href}'/>")?,
            Asset::Script(src) => writeln!(writer, "<script src='{src}'></script>")?,
        }
    }
    writeln!(
        writer,
        "<style>html, body {{width: 100%; height: 100%; margin: 0; padding: 0;}} #{MAP_DIV} {{position: absolute; top: 0; bottom: 0; right: 0; left: 0;}}</style>"
    )?;
    writeln!(writer, "</head>")?;
    writeln!(writer, "<body>")?;
    writeln!(writer, "<div id='{MAP_DIV}'></div>")?;
    writeln!(writer, "<script>")?;
    writer.write_all(script)?;
    writeln!(writer, "</script>")?;
    writeln!(writer, "</body>")?;
    writeln!(writer, "</html>")?;
    Ok(())
}
