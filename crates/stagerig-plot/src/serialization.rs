//! Plan file format: a JSON document with items, title and groups.
//!
//! Import is permissive. Missing `items`, `title` or `groups` fall back to
//! defaults, unknown fields are ignored, and items keep whatever subset of
//! fields they carry. Only structurally invalid JSON is rejected.

use serde::{Deserialize, Serialize};
use stagerig_core::error::ImportError;

use crate::item::{Group, Item};
use crate::plot_state::PlotState;

fn default_title() -> String {
    "Untitled plot".to_string()
}

/// On-disk shape of a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotFile {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl PlotFile {
    pub fn from_state(state: &PlotState) -> Self {
        Self {
            items: state.items.clone(),
            title: state.title.clone(),
            groups: state.groups.clone(),
        }
    }

    /// Replaces document content, leaving transient editor state
    /// (selection, clipboard) untouched.
    pub fn into_state(self, state: &mut PlotState) {
        state.items = self.items;
        state.title = self.title;
        state.groups = self.groups;
        state.selected = None;
    }
}

/// Serializes a plan to pretty-printed JSON.
pub fn to_json(file: &PlotFile) -> Result<String, ImportError> {
    serde_json::to_string_pretty(file).map_err(|e| ImportError::Malformed {
        context: "serializing plan".to_string(),
        reason: e.to_string(),
    })
}

/// Parses a plan from JSON.
pub fn from_json(json: &str) -> Result<PlotFile, ImportError> {
    serde_json::from_str(json).map_err(|e| ImportError::Malformed {
        context: "parsing plan".to_string(),
        reason: e.to_string(),
    })
}
