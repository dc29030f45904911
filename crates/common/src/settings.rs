use serde::{Deserialize, Serialize};

/// Display preferences stored alongside a map
///
/// The editor core doesn't interpret them, they are carried through import
/// and export. Missing keys take their default value.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub background_color: String,
    pub background_pattern: String,
    pub theme: String,
    pub auto_save: bool,
    pub snap_to_grid: bool,
    pub show_minimap: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".to_string(),
            background_pattern: "dots".to_string(),
            theme: "system".to_string(),
            auto_save: true,
            snap_to_grid: false,
            show_minimap: false,
        }
    }
}
