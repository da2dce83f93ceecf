//! Aspect-ratio constraint for the crop rectangle.

use crate::error::{EditorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named presets offered by hosts, as `(label, width, height)`.
pub const PRESETS: &[(&str, f64, f64)] = &[
    ("Square", 1.0, 1.0),
    ("4:3", 4.0, 3.0),
    ("3:4", 3.0, 4.0),
    ("16:9", 16.0, 9.0),
    ("9:16", 9.0, 16.0),
    ("3:2", 3.0, 2.0),
    ("5:4", 5.0, 4.0),
];

/// Either an unconstrained crop or a fixed width/height ratio.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectRatioMode {
    #[default]
    Free,
    Fixed(f64),
}

impl AspectRatioMode {
    /// A fixed ratio; fails unless `ratio` is positive and finite.
    pub fn fixed(ratio: f64) -> Result<Self> {
        if ratio.is_finite() && ratio > 0.0 {
            Ok(Self::Fixed(ratio))
        } else {
            Err(EditorError::InvalidAspectRatio(ratio))
        }
    }

    /// A fixed ratio from a `width:height` pair.
    pub fn from_pair(width: f64, height: f64) -> Result<Self> {
        if !(height.is_finite() && height > 0.0) {
            return Err(EditorError::InvalidAspectRatio(f64::NAN));
        }
        Self::fixed(width / height)
    }

    pub fn ratio(self) -> Option<f64> {
        match self {
            Self::Free => None,
            Self::Fixed(ratio) => Some(ratio),
        }
    }

    /// Validates a mode received from the host.
    pub fn validated(self) -> Result<Self> {
        match self {
            Self::Free => Ok(self),
            Self::Fixed(ratio) => Self::fixed(ratio),
        }
    }
}

impl FromStr for AspectRatioMode {
    type Err = EditorError;

    /// Accepts `free`, a preset label (`square`), `W:H` or a decimal ratio.
    fn from_str(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("free") {
            return Ok(Self::Free);
        }
        if let Some((_, w, h)) = PRESETS
            .iter()
            .find(|(label, _, _)| label.eq_ignore_ascii_case(trimmed))
        {
            return Self::from_pair(*w, *h);
        }

        let parsed = match trimmed.split_once(':') {
            Some((w, h)) => {
                let w: f64 = w.trim().parse().map_err(|_| EditorError::ratio_spec(input))?;
                let h: f64 = h.trim().parse().map_err(|_| EditorError::ratio_spec(input))?;
                Self::from_pair(w, h)
            }
            None => {
                let ratio: f64 = trimmed.parse().map_err(|_| EditorError::ratio_spec(input))?;
                Self::fixed(ratio)
            }
        };
        parsed.map_err(|_| EditorError::ratio_spec(input))
    }
}

impl fmt::Display for AspectRatioMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => write!(f, "free"),
            Self::Fixed(ratio) => write!(f, "{ratio}"),
        }
    }
}
