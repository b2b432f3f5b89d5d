//! Saving and loading plans on disk.

use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::serialization::{self, PlotFile};

use super::PlotState;

impl PlotState {
    /// Writes the plan to `path` as JSON.
    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let file = PlotFile::from_state(self);
        let json = serialization::to_json(&file)
            .with_context(|| format!("serializing plan '{}'", self.title))?;
        fs::write(path, json)
            .with_context(|| format!("writing plan to {}", path.display()))?;
        info!(path = %path.display(), items = self.items.len(), "plan saved");
        Ok(())
    }

    /// Reads a plan from `path`, replacing the current document content.
    pub fn load_from_file(&mut self, path: &Path) -> anyhow::Result<()> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading plan from {}", path.display()))?;
        let file = serialization::from_json(&json)
            .with_context(|| format!("parsing plan from {}", path.display()))?;
        file.into_state(self);
        info!(path = %path.display(), items = self.items.len(), "plan loaded");
        Ok(())
    }
}
