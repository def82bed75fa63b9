//! Geolocation button, backed by the leaflet-locatecontrol plugin.
//!
//! Browsers only share the position of pages served over https.
use std::io::{self, Write};

use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::html::{js, Asset, Element};

pub const LOCATE_CSS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/leaflet-locatecontrol/0.66.2/L.Control.Locate.min.css";
pub const LOCATE_JS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/leaflet-locatecontrol/0.66.2/L.Control.Locate.min.js";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocateControl {
    options: JsonMap<String, JsonValue>,
}

impl LocateControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a plugin option. Snake case keys are camelized, null values
    /// remove the option.
    pub fn with_option<V: Into<JsonValue>>(mut self, key: &str, value: V) -> Self {
        let key = camelize(key);
        match value.into() {
            JsonValue::Null => {
                self.options.remove(&key);
            }
            value => {
                self.options.insert(key, value);
            }
        }
        self
    }

    pub fn options(&self) -> &JsonMap<String, JsonValue> {
        &self.options
    }
}

impl Element for LocateControl {
    fn kind(&self) -> &'static str {
        "locate_control"
    }

    fn write_constructor(&self, writer: &mut dyn Write) -> io::Result<()> {
        write!(writer, "L.control.locate({})", js(&self.options)?)
    }

    fn assets(&self) -> Vec<Asset> {
        vec![Asset::Stylesheet(LOCATE_CSS), Asset::Script(LOCATE_JS)]
    }
}

/// `variable_name` becomes `variableName`.
///
/// Every word after the first is capitalized and the rest of it lowered.
pub fn camelize(key: &str) -> String {
    key.split('_')
        .enumerate()
        .map(|(i, word)| {
            if i == 0 {
                return word.to_owned();
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect()
}
