//! Text selection state and its resolved style snapshot.

use serde::{Deserialize, Serialize};

use crate::layer::{LayerId, TextContent};
use crate::span::{CharRange, PropertyState, StyleState, ToggleField};

/// Per-field resolved styles over a selected range.
///
/// Each field is either a concrete resolved value or the mixed sentinel
/// when spans disagree; the editor panel renders mixed fields blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionStyles {
    /// Resolved font family.
    pub font_family: PropertyState<String>,
    /// Resolved font size.
    pub font_size: PropertyState<f32>,
    /// Resolved color.
    pub color: PropertyState<String>,
    /// Resolved font weight.
    pub font_weight: PropertyState<u16>,
    /// Underline toggle state.
    pub underline: StyleState,
    /// Strikethrough toggle state.
    pub strikethrough: StyleState,
    /// Superscript toggle state.
    pub script: StyleState,
    /// Uppercase toggle state.
    pub transform: StyleState,
}

/// The active text selection inside a single text layer.
///
/// Created or updated on every range change; cleared when the layer
/// selection drops to zero or grows past one layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    /// The text layer holding the selection.
    pub layer_id: LayerId,
    /// Selected character range (collapsed when `has_selection` is false).
    pub range: CharRange,
    /// Whether the range selects characters, as opposed to a bare caret.
    pub has_selection: bool,
    /// Resolved style snapshot over the range.
    pub styles: SelectionStyles,
}

impl SelectionState {
    /// Build the selection state for `range` inside a text layer,
    /// snapshotting the resolved styles.
    #[must_use]
    pub fn for_range(
        layer_id: LayerId,
        content: &TextContent,
        range: CharRange,
        has_selection: bool,
    ) -> Self {
        Self {
            layer_id,
            range,
            has_selection,
            styles: SelectionStyles {
                font_family: content.font_family_state(range),
                font_size: content.font_size_state(range),
                color: content.color_state(range),
                font_weight: content.font_weight_state(range),
                underline: content.style_state(range, ToggleField::Underline),
                strikethrough: content.style_state(range, ToggleField::Strikethrough),
                script: content.style_state(range, ToggleField::Script),
                transform: content.style_state(range, ToggleField::Transform),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::{Patch, StyleDelta};

    #[test]
    fn test_snapshot_reflects_range_styles() {
        let mut content = TextContent::new("hello world");
        content.apply_style(
            CharRange::new(0, 5),
            &StyleDelta {
                color: Patch::Set("#ff0000".to_string()),
                underline: Patch::Set(true),
                ..StyleDelta::default()
            },
        );

        let layer_id = LayerId::new();
        let inside = SelectionState::for_range(layer_id, &content, CharRange::new(1, 4), true);
        assert_eq!(
            inside.styles.color,
            PropertyState::Uniform("#ff0000".to_string())
        );
        assert_eq!(inside.styles.underline, StyleState::On);

        let across = SelectionState::for_range(layer_id, &content, CharRange::new(0, 11), true);
        assert_eq!(across.styles.color, PropertyState::Mixed);
        assert_eq!(across.styles.underline, StyleState::Mixed);
        // Base-only fields stay uniform.
        assert_eq!(
            across.styles.font_weight,
            PropertyState::Uniform(content.font_weight)
        );
    }
}
