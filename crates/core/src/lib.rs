//! reelcrop Core Library
//!
//! This library provides the interactive crop-region editor used by the
//! reelcrop media journal: direct manipulation of a crop rectangle over a
//! video frame or image, under aspect-ratio and boundary constraints, with
//! the result mapped back to the source media's pixels.
//!
//! # Overview
//!
//! The core is a pure, synchronous engine. It never touches files, decodes
//! media or draws anything. A host feeds it layout and pointer events in
//! display coordinates and receives crop rectangles in media pixels:
//!
//! - **Layout**: aspect-fit placement of the media via [`display`]
//! - **Mapping**: display/media coordinate conversion via [`mapping`]
//! - **Gestures**: pointer-down classification via [`classifier`] and the
//!   handle geometry in [`handles`]
//! - **Constraints**: minimum size, ratio lock and hard/elastic boundaries
//!   via [`constraints`]
//! - **State machine**: the [`CropEditor`] reducer in [`editor`]
//!
//! # Quick Start
//!
//! ```
//! use reelcrop_core::{AspectRatioMode, CropEditor, CropEvent, EditorConfig};
//!
//! let mut editor = CropEditor::new(EditorConfig::default());
//! editor.process(CropEvent::SetMediaSize { width: 1920.0, height: 1080.0 });
//! editor.process(CropEvent::SetViewportBounds { width: 800.0, height: 600.0 });
//!
//! let change = editor
//!     .process(CropEvent::SetAspectRatio { mode: AspectRatioMode::Fixed(1.0) })
//!     .expect("a default crop is created");
//! assert!((change.rect.width - change.rect.height).abs() < 1e-6);
//! ```
//!
//! # Module Structure
//!
//! - [`aspect`]: Aspect-ratio modes and presets
//! - [`config`]: Editor tunables and their validation
//! - [`error`]: Error types and result aliases
//! - [`geometry`]: Point, size and rectangle primitives
//! - [`scenario`]: JSON event scripts for replay and testing

pub mod aspect;
pub mod classifier;
pub mod config;
pub mod constraints;
pub mod display;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod handles;
pub mod mapping;
pub mod scenario;

// Re-export primary types for convenience
pub use aspect::AspectRatioMode;
pub use classifier::Classification;
pub use config::EditorConfig;
pub use editor::{ChangePhase, CropChange, CropEditor, CropEvent, CropListener, EditorState};
pub use error::{EditorError, Result};
pub use geometry::{Point, Rect, Size};
pub use handles::{HandleLayout, HandleType};
pub use mapping::CoordinateMapper;
pub use scenario::Scenario;
