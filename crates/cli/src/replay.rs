//! `reelcrop replay`: run a scripted scenario and print its changes.

use anyhow::{Context, Result};
use reelcrop_core::{EditorConfig, Scenario};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Replays the scenario at `path`, writing one JSON object per change to `out`.
///
/// A scenario without its own `config` block uses `fallback`.
pub fn run(path: &Path, fallback: EditorConfig, out: &mut impl Write) -> Result<usize> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario {}", path.display()))?;
    let mut scenario = Scenario::from_json(&json)
        .with_context(|| format!("Invalid scenario {}", path.display()))?;
    if !has_config_block(&json) {
        scenario.config = fallback;
    }
    tracing::debug!(events = scenario.events.len(), "replaying scenario");

    let (editor, steps) = scenario.replay();
    for step in &steps {
        serde_json::to_writer(&mut *out, step)?;
        writeln!(out)?;
    }
    tracing::info!(
        changes = steps.len(),
        state = ?editor.state(),
        "replay finished"
    );
    Ok(steps.len())
}

fn has_config_block(json: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(json)
        .ok()
        .and_then(|value| value.get("config").map(|_| ()))
        .is_some()
}
