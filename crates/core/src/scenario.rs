//! Scripted event sequences.
//!
//! A scenario bundles an [`EditorConfig`] with a list of [`CropEvent`]s so
//! that a whole interaction can be stored as JSON and replayed, by tests or
//! by the `reelcrop replay` command.

use crate::config::EditorConfig;
use crate::editor::{CropChange, CropEditor, CropEvent};
use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: EditorConfig,
    pub events: Vec<CropEvent>,
}

/// One emitted change, tagged with the index of the event that caused it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReplayStep {
    pub event: usize,
    #[serde(flatten)]
    pub change: CropChange,
}

impl Scenario {
    /// Parses and validates a scenario.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Json`](crate::EditorError::Json) for malformed
    /// input and [`EditorError::Config`](crate::EditorError::Config) when the
    /// embedded config is out of range.
    pub fn from_json(json: &str) -> Result<Self> {
        let scenario: Scenario = serde_json::from_str(json)?;
        scenario.config.validate()?;
        Ok(scenario)
    }

    /// Runs every event through a fresh editor and collects the changes.
    pub fn replay(&self) -> (CropEditor, Vec<ReplayStep>) {
        let mut editor = CropEditor::new(self.config.clone());
        let mut steps = Vec::new();
        for (index, event) in self.events.iter().enumerate() {
            if let Some(change) = editor.process(*event) {
                steps.push(ReplayStep {
                    event: index,
                    change,
                });
            }
        }
        (editor, steps)
    }
}
