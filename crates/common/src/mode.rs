use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Name of an automatic arrangement of the map
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    Tree,
    Radial,
    Network,
    Histogram,
    #[default]
    FreeFlow,
}

impl LayoutMode {
    pub const ALL: [LayoutMode; 5] = [
        LayoutMode::Tree,
        LayoutMode::Radial,
        LayoutMode::Network,
        LayoutMode::Histogram,
        LayoutMode::FreeFlow,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LayoutMode::Tree => "tree",
            LayoutMode::Radial => "radial",
            LayoutMode::Network => "network",
            LayoutMode::Histogram => "histogram",
            LayoutMode::FreeFlow => "free-flow",
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown layout mode {0:?}")]
pub struct UnknownLayoutMode(pub String);

impl FromStr for LayoutMode {
    type Err = UnknownLayoutMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayoutMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| UnknownLayoutMode(s.to_string()))
    }
}
