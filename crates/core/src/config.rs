use crate::error::{EditorError, Result};
use serde::{Deserialize, Serialize};

/// Tunables for gesture recognition and constraint solving.
///
/// All distances are in display units. The defaults match a touch-first
/// layout: 44-unit handle hit zones and a 20-unit minimum crop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Smallest allowed crop width and height.
    pub min_crop_size: f64,
    /// Side length of the square hit zone centered on each handle.
    pub handle_hit_size: f64,
    /// Touches closer than this to any handle never start a move.
    pub move_exclusion_radius: f64,
    /// Fraction of overflow applied while dragging past the display rect.
    pub elastic_factor: f64,
    /// Create gestures shorter than this are discarded on release.
    pub min_drag_distance: f64,
    /// Share of the display rect covered by the default crop.
    pub default_fill: f64,
    /// Use the elastic boundary during live drags (hard clamp otherwise).
    pub elastic_boundary: bool,
    /// Emit a live change on every pointer move, not only on release.
    pub live_updates: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_crop_size: 20.0,
            handle_hit_size: 44.0,
            move_exclusion_radius: 22.0,
            elastic_factor: 0.3,
            min_drag_distance: 5.0,
            default_fill: 0.75,
            elastic_boundary: true,
            live_updates: true,
        }
    }
}

impl EditorConfig {
    pub fn builder() -> EditorConfigBuilder {
        EditorConfigBuilder {
            config: Self::default(),
        }
    }

    /// Checks every value is finite and within its meaningful range.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("min_crop_size", self.min_crop_size),
            ("handle_hit_size", self.handle_hit_size),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(EditorError::config(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        let non_negative = [
            ("move_exclusion_radius", self.move_exclusion_radius),
            ("min_drag_distance", self.min_drag_distance),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(EditorError::config(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.elastic_factor) {
            return Err(EditorError::config(format!(
                "elastic_factor must be within 0..=1, got {}",
                self.elastic_factor
            )));
        }
        if !(self.default_fill > 0.0 && self.default_fill <= 1.0) {
            return Err(EditorError::config(format!(
                "default_fill must be within (0, 1], got {}",
                self.default_fill
            )));
        }
        Ok(())
    }
}

/// Builder for [`EditorConfig`]; `build` validates the result.
#[derive(Clone, Debug)]
pub struct EditorConfigBuilder {
    config: EditorConfig,
}

impl EditorConfigBuilder {
    pub fn with_min_crop_size(mut self, size: f64) -> Self {
        self.config.min_crop_size = size;
        self
    }

    pub fn with_handle_hit_size(mut self, size: f64) -> Self {
        self.config.handle_hit_size = size;
        self
    }

    pub fn with_move_exclusion_radius(mut self, radius: f64) -> Self {
        self.config.move_exclusion_radius = radius;
        self
    }

    pub fn with_elastic_factor(mut self, factor: f64) -> Self {
        self.config.elastic_factor = factor;
        self
    }

    pub fn with_min_drag_distance(mut self, distance: f64) -> Self {
        self.config.min_drag_distance = distance;
        self
    }

    pub fn with_default_fill(mut self, fill: f64) -> Self {
        self.config.default_fill = fill;
        self
    }

    pub fn with_elastic_boundary(mut self, enabled: bool) -> Self {
        self.config.elastic_boundary = enabled;
        self
    }

    pub fn with_live_updates(mut self, enabled: bool) -> Self {
        self.config.live_updates = enabled;
        self
    }

    pub fn build(self) -> Result<EditorConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(EditorConfig::default().validate().is_ok());
    }

    #[test]
    fn builder_overrides_values() {
        let config = EditorConfig::builder()
            .with_min_crop_size(32.0)
            .with_elastic_factor(0.5)
            .with_live_updates(false)
            .build()
            .expect("valid config");

        assert_eq!(config.min_crop_size, 32.0);
        assert_eq!(config.elastic_factor, 0.5);
        assert!(!config.live_updates);
        assert_eq!(config.handle_hit_size, 44.0);
    }

    #[test]
    fn builder_rejects_out_of_range_values() {
        assert!(EditorConfig::builder().with_min_crop_size(0.0).build().is_err());
        assert!(EditorConfig::builder().with_elastic_factor(1.5).build().is_err());
        assert!(EditorConfig::builder().with_default_fill(0.0).build().is_err());
        assert!(
            EditorConfig::builder()
                .with_min_drag_distance(f64::NAN)
                .build()
                .is_err()
        );
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: EditorConfig =
            serde_json::from_str(r#"{ "elastic_boundary": false }"#).expect("parse");
        assert!(!config.elastic_boundary);
        assert_eq!(config.min_crop_size, 20.0);
    }
}
