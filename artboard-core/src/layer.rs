//! Layers - the building blocks of artboards.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::Frame;
use crate::span::{
    self, CharRange, PropertyState, Span, SpanStyle, StyleDelta, StyleState, TextScript,
    TextTransform, ToggleField,
};

/// Unique identifier for a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(Uuid);

impl LayerId {
    /// Create a new unique layer ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for LayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Horizontal text alignment inside a text layer's box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Anchored to the left edge.
    Left,
    /// Centered.
    #[default]
    Center,
    /// Anchored to the right edge.
    Right,
}

/// Rich text content of a text layer: styled spans plus the base styles
/// span overrides fall back to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    /// Ordered style runs; concatenated texts are the layer's full text.
    pub spans: Vec<Span>,
    /// Base font family.
    pub font_family: String,
    /// Base font size in artboard units.
    pub font_size: f32,
    /// Base color as hex.
    pub color: String,
    /// Base font weight (100..=900).
    pub font_weight: u16,
    /// Horizontal alignment.
    #[serde(default)]
    pub align: TextAlign,
}

impl Default for TextContent {
    fn default() -> Self {
        Self {
            spans: vec![Span::new("")],
            font_family: "Inter".to_string(),
            font_size: 32.0,
            color: "#ffffff".to_string(),
            font_weight: 400,
            align: TextAlign::default(),
        }
    }
}

impl TextContent {
    /// Create content holding one unstyled run.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            spans: vec![Span::new(text)],
            ..Self::default()
        }
    }

    /// The full logical text.
    #[must_use]
    pub fn text(&self) -> String {
        span::text_of(&self.spans)
    }

    /// Total character count.
    #[must_use]
    pub fn char_len(&self) -> usize {
        span::text_len(&self.spans)
    }

    /// Replace the span list, keeping it canonical.
    ///
    /// An empty result collapses to the single empty sentinel span.
    pub fn set_spans(&mut self, spans: Vec<Span>) {
        let merged = span::merge_spans(&spans);
        self.spans = if merged.is_empty() {
            vec![Span::new("")]
        } else {
            merged
        };
    }

    /// Apply a style delta over `range` and re-canonicalize.
    pub fn apply_style(&mut self, range: CharRange, delta: &StyleDelta) {
        let updated = span::apply_style(&self.spans, range, delta);
        self.set_spans(updated);
    }

    /// Toggle a field over `range` (the whole text when `None`).
    ///
    /// Uniformly-on clears the override across the range so the layer
    /// default shows through; anything else sets it on across the range.
    pub fn toggle(&mut self, field: ToggleField, range: Option<CharRange>) {
        let range = range.unwrap_or_else(|| CharRange::new(0, self.char_len()));
        let on = span::style_state(&self.spans, range, field) == StyleState::On;

        let mut delta = StyleDelta::default();
        match field {
            ToggleField::Underline => {
                delta.underline = if on {
                    span::Patch::Clear
                } else {
                    span::Patch::Set(true)
                };
            }
            ToggleField::Strikethrough => {
                delta.strikethrough = if on {
                    span::Patch::Clear
                } else {
                    span::Patch::Set(true)
                };
            }
            ToggleField::Script => {
                delta.script = if on {
                    span::Patch::Clear
                } else {
                    span::Patch::Set(TextScript::Superscript)
                };
            }
            ToggleField::Transform => {
                delta.transform = if on {
                    span::Patch::Clear
                } else {
                    span::Patch::Set(TextTransform::Uppercase)
                };
            }
        }
        self.apply_style(range, &delta);
    }

    /// Aggregate state of a toggleable field over `range`.
    #[must_use]
    pub fn style_state(&self, range: CharRange, field: ToggleField) -> StyleState {
        span::style_state(&self.spans, range, field)
    }

    /// Scale the base font size and every span override by `factor`,
    /// each floored at 1.0. Used when a resize gesture scales a text box.
    pub fn scale_font(&mut self, factor: f32) {
        self.font_size = (self.font_size * factor).max(1.0);
        for span in &mut self.spans {
            if let Some(size) = span.style.font_size {
                span.style.font_size = Some((size * factor).max(1.0));
            }
        }
    }

    fn resolved_state<T, F>(&self, range: CharRange, resolve: F, base: T) -> PropertyState<T>
    where
        T: PartialEq + Clone,
        F: Fn(&SpanStyle) -> Option<T>,
    {
        let in_range: Vec<Span> = span::spans_in_range(&self.spans, range)
            .into_iter()
            .filter(|s| !s.text.is_empty())
            .collect();

        if in_range.is_empty() {
            // Empty intersection: report the style at the cursor position.
            let mut cursor = 0usize;
            for s in &self.spans {
                let end = cursor + s.char_len();
                if range.start >= cursor && range.start <= end {
                    return PropertyState::Uniform(resolve(&s.style).unwrap_or(base));
                }
                cursor = end;
            }
            return PropertyState::Uniform(base);
        }

        let first = resolve(&in_range[0].style).unwrap_or_else(|| base.clone());
        for s in &in_range[1..] {
            if resolve(&s.style).unwrap_or_else(|| base.clone()) != first {
                return PropertyState::Mixed;
            }
        }
        PropertyState::Uniform(first)
    }

    /// Resolved font family over `range`, or mixed.
    #[must_use]
    pub fn font_family_state(&self, range: CharRange) -> PropertyState<String> {
        self.resolved_state(range, |s| s.font_family.clone(), self.font_family.clone())
    }

    /// Resolved font size over `range`, or mixed.
    #[must_use]
    pub fn font_size_state(&self, range: CharRange) -> PropertyState<f32> {
        self.resolved_state(range, |s| s.font_size, self.font_size)
    }

    /// Resolved color over `range`, or mixed.
    #[must_use]
    pub fn color_state(&self, range: CharRange) -> PropertyState<String> {
        self.resolved_state(range, |s| s.color.clone(), self.color.clone())
    }

    /// Resolved font weight over `range`, or mixed.
    #[must_use]
    pub fn font_weight_state(&self, range: CharRange) -> PropertyState<u16> {
        self.resolved_state(range, |s| s.font_weight, self.font_weight)
    }
}

/// Vector shape variants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ShapeKind {
    /// Rectangle with optional rounded corners.
    #[serde(rename_all = "camelCase")]
    Rectangle {
        /// Corner radius in artboard units.
        corner_radius: f32,
    },
    /// Ellipse filling the frame.
    Ellipse,
    /// Regular polygon or star.
    #[serde(rename_all = "camelCase")]
    Polygon {
        /// Number of outer points.
        point_count: u32,
        /// Inner radius as a fraction of the outer (1.0 = convex polygon).
        inner_radius_ratio: f32,
        /// Corner radius in artboard units.
        corner_radius: f32,
    },
}

/// A stroke layered around a shape outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Stroke color as hex.
    pub color: String,
    /// Stroke width in artboard units.
    pub width: f32,
}

/// End-cap shapes for line layers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapShape {
    /// No cap.
    #[default]
    None,
    /// Triangular arrowhead.
    Triangle,
    /// Square cap.
    Square,
    /// Circular cap.
    Circle,
}

/// An end cap on a line layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LineCap {
    /// Cap shape.
    pub shape: CapShape,
    /// Cap size as a multiplier of the stroke width.
    pub size: f32,
}

/// Drop shadow applied to a layer. Data only; rendering is the export
/// collaborator's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowStyle {
    /// Whether the shadow renders.
    pub enabled: bool,
    /// Shadow color as hex.
    pub color: String,
    /// Opacity in percent (0..=100).
    pub opacity: f32,
    /// Horizontal offset.
    pub offset_x: f32,
    /// Vertical offset.
    pub offset_y: f32,
    /// Blur radius.
    pub blur: f32,
}

/// Glow applied to a layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlowStyle {
    /// Whether the glow renders.
    pub enabled: bool,
    /// Glow color as hex.
    pub color: String,
    /// Opacity in percent (0..=100).
    pub opacity: f32,
    /// Blur radius.
    pub blur: f32,
}

/// The content a layer carries. Closed variant set: every kind-specific
/// behavior in the editor dispatches on this once, per operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum LayerKind {
    /// Rich text.
    Text(TextContent),

    /// A bitmap image.
    Image {
        /// Image source URI.
        src: String,
    },

    /// A vector shape.
    Shape {
        /// Shape variant.
        shape: ShapeKind,
        /// Fill color as hex.
        fill: String,
        /// Outline strokes, outermost last.
        #[serde(default)]
        strokes: Vec<Stroke>,
    },

    /// A straight line across the frame's horizontal midline.
    #[serde(rename_all = "camelCase")]
    Line {
        /// Line color as hex.
        color: String,
        /// Stroke width in artboard units.
        stroke_width: f32,
        /// Cap at the line start.
        start_cap: LineCap,
        /// Cap at the line end.
        end_cap: LineCap,
    },
}

/// A positioned, rotatable visual element on an artboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    /// Unique identifier.
    pub id: LayerId,
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Layer content.
    pub kind: LayerKind,
    /// Position, size and rotation.
    pub frame: Frame,
    /// Stacking order; higher draws on top.
    pub z_index: i32,
    /// Locked layers ignore gestures.
    pub locked: bool,
    /// Hidden layers are skipped by hit testing and rendering.
    pub visible: bool,
    /// Optional drop shadow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<ShadowStyle>,
    /// Optional glow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glow: Option<GlowStyle>,
}

impl Layer {
    /// Create a new layer with the given kind and a default frame.
    #[must_use]
    pub fn new(kind: LayerKind) -> Self {
        Self {
            id: LayerId::new(),
            name: None,
            kind,
            frame: Frame::default(),
            z_index: 0,
            locked: false,
            visible: true,
            shadow: None,
            glow: None,
        }
    }

    /// Set the frame.
    #[must_use]
    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frame = frame;
        self
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Whether this is a text layer.
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self.kind, LayerKind::Text(_))
    }

    /// The text content, if this is a text layer.
    #[must_use]
    pub fn as_text(&self) -> Option<&TextContent> {
        match &self.kind {
            LayerKind::Text(content) => Some(content),
            _ => None,
        }
    }

    /// Mutable text content, if this is a text layer.
    pub fn as_text_mut(&mut self) -> Option<&mut TextContent> {
        match &mut self.kind {
            LayerKind::Text(content) => Some(content),
            _ => None,
        }
    }
}
