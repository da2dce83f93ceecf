//! Editor configuration from the environment.
//!
//! Every [`EditorConfig`] field can be overridden with a `REELCROP_*`
//! variable, e.g. `REELCROP_MIN_CROP_SIZE=32`. A `.env` file in the working
//! directory is read first by `main`.

use anyhow::{Context, Result};
use reelcrop_core::EditorConfig;
use std::env;

/// Loads the editor config, applying any `REELCROP_*` overrides.
pub fn load() -> Result<EditorConfig> {
    from_lookup(|key| env::var(key).ok())
}

/// Builds the config from an arbitrary variable source.
pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<EditorConfig> {
    let float = |key: &str| -> Result<Option<f64>> {
        lookup(key)
            .map(|raw| {
                raw.trim()
                    .parse::<f64>()
                    .with_context(|| format!("{key} must be a number, got {raw:?}"))
            })
            .transpose()
    };
    let flag = |key: &str| -> Result<Option<bool>> {
        lookup(key)
            .map(|raw| parse_flag(&raw).with_context(|| format!("{key} must be a boolean, got {raw:?}")))
            .transpose()
    };

    let mut builder = EditorConfig::builder();
    if let Some(v) = float("REELCROP_MIN_CROP_SIZE")? {
        builder = builder.with_min_crop_size(v);
    }
    if let Some(v) = float("REELCROP_HANDLE_HIT_SIZE")? {
        builder = builder.with_handle_hit_size(v);
    }
    if let Some(v) = float("REELCROP_MOVE_EXCLUSION_RADIUS")? {
        builder = builder.with_move_exclusion_radius(v);
    }
    if let Some(v) = float("REELCROP_ELASTIC_FACTOR")? {
        builder = builder.with_elastic_factor(v);
    }
    if let Some(v) = float("REELCROP_MIN_DRAG_DISTANCE")? {
        builder = builder.with_min_drag_distance(v);
    }
    if let Some(v) = float("REELCROP_DEFAULT_FILL")? {
        builder = builder.with_default_fill(v);
    }
    if let Some(v) = flag("REELCROP_ELASTIC_BOUNDARY")? {
        builder = builder.with_elastic_boundary(v);
    }
    if let Some(v) = flag("REELCROP_LIVE_UPDATES")? {
        builder = builder.with_live_updates(v);
    }

    builder.build().context("Invalid editor configuration")
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
