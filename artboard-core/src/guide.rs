//! Alignment guides.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuideId(Uuid);

impl GuideId {
    /// Create a new unique guide ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GuideId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GuideId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Guide orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// A horizontal line at a fixed y position.
    Horizontal,
    /// A vertical line at a fixed x position.
    Vertical,
}

/// An artboard-relative reference line used for alignment and snapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guide {
    /// Unique identifier.
    pub id: GuideId,
    /// Orientation of the line.
    pub orientation: Orientation,
    /// Position along the perpendicular axis, in artboard units.
    pub position: f32,
    /// Optional display color as hex.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Guide {
    /// Create a new guide.
    #[must_use]
    pub fn new(orientation: Orientation, position: f32) -> Self {
        Self {
            id: GuideId::new(),
            orientation,
            position,
            color: None,
        }
    }
}

/// User-facing guide behavior switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideSettings {
    /// Whether guides are drawn.
    pub show_guides: bool,
    /// Whether moves snap to guides.
    pub snap_to_guides: bool,
}

impl Default for GuideSettings {
    fn default() -> Self {
        Self {
            show_guides: true,
            snap_to_guides: true,
        }
    }
}
