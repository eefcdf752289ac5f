//! Run-length style storage for rich text.
//!
//! A text layer's content is an ordered list of [`Span`]s; concatenating
//! their texts yields the layer's full logical text (newlines embedded as
//! characters). Each span optionally overrides the layer's base styles.
//!
//! Range edits work by substring surgery: a span straddling a range
//! boundary is split into up to three parts, the inside part restyled, and
//! the caller re-canonicalizes with [`merge_spans`]. All ranges are
//! character indices, not byte offsets.

use serde::{Deserialize, Serialize};

/// A character range within a text layer, `start <= end` when valid.
///
/// Invalid ranges (`start >= end`) make every range operation a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharRange {
    /// First character index (inclusive).
    pub start: usize,
    /// Last character index (exclusive).
    pub end: usize,
}

impl CharRange {
    /// Create a new range.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Whether the range selects no characters.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Number of characters selected.
    #[must_use]
    pub const fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.end - self.start
        }
    }
}

/// Vertical script position of a span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextScript {
    /// Baseline text.
    #[default]
    Normal,
    /// Raised, smaller text.
    Superscript,
}

/// Case transform applied to a span when rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTransform {
    /// Text rendered as typed.
    #[default]
    None,
    /// Text rendered uppercased.
    Uppercase,
}

/// Optional style overrides carried by a span.
///
/// `None` means the span inherits the layer's base value for that field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanStyle {
    /// Font family override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Font size override in artboard units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    /// Color override as hex.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Font weight override (100..=900).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u16>,
    /// Underline decoration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    /// Strikethrough decoration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
    /// Script position override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<TextScript>,
    /// Case transform override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<TextTransform>,
}

impl SpanStyle {
    /// Whether no field is overridden.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

/// A run of characters sharing one style override set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// The run's text. Non-empty except for the single empty sentinel span
    /// a cleared text layer keeps.
    pub text: String,
    /// Style overrides, flattened into the span in serialized form.
    #[serde(flatten)]
    pub style: SpanStyle,
}

impl Span {
    /// Create an unstyled span.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: SpanStyle::default(),
        }
    }

    /// Create a span with style overrides.
    #[must_use]
    pub fn styled(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Length of the span text in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// One field of a [`StyleDelta`].
///
/// `Clear` removes the override so the field falls back to the layer
/// default; `Keep` leaves whatever the span already has.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Patch<T> {
    /// Leave the span's current value.
    #[default]
    Keep,
    /// Remove the override, reverting to the layer default.
    Clear,
    /// Overwrite with the given value.
    Set(T),
}

impl<T: Clone> Patch<T> {
    fn apply(&self, slot: &mut Option<T>) {
        match self {
            Self::Keep => {}
            Self::Clear => *slot = None,
            Self::Set(value) => *slot = Some(value.clone()),
        }
    }
}

/// A style change to apply over a character range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleDelta {
    /// Font family change.
    pub font_family: Patch<String>,
    /// Font size change.
    pub font_size: Patch<f32>,
    /// Color change.
    pub color: Patch<String>,
    /// Font weight change.
    pub font_weight: Patch<u16>,
    /// Underline change.
    pub underline: Patch<bool>,
    /// Strikethrough change.
    pub strikethrough: Patch<bool>,
    /// Script change.
    pub script: Patch<TextScript>,
    /// Case transform change.
    pub transform: Patch<TextTransform>,
}

impl StyleDelta {
    /// Apply every non-`Keep` field to `style`.
    pub fn apply_to(&self, style: &mut SpanStyle) {
        self.font_family.apply(&mut style.font_family);
        self.font_size.apply(&mut style.font_size);
        self.color.apply(&mut style.color);
        self.font_weight.apply(&mut style.font_weight);
        self.underline.apply(&mut style.underline);
        self.strikethrough.apply(&mut style.strikethrough);
        self.script.apply(&mut style.script);
        self.transform.apply(&mut style.transform);
    }
}

/// Toggleable span style fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleField {
    /// Underline decoration.
    Underline,
    /// Strikethrough decoration.
    Strikethrough,
    /// Superscript vs normal script.
    Script,
    /// Uppercase vs as-typed transform.
    Transform,
}

/// Aggregate state of a toggleable field over a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleState {
    /// No intersecting span has the field set.
    Off,
    /// Every intersecting span has the field set.
    On,
    /// Spans disagree over the range.
    Mixed,
}

/// Aggregate state of a resolved (override-or-base) property over a range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyState<T> {
    /// Every intersecting span resolves to the same value.
    Uniform(T),
    /// Spans disagree over the range.
    Mixed,
}

/// The full logical text of a span list.
#[must_use]
pub fn text_of(spans: &[Span]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}

/// Total character count of a span list.
#[must_use]
pub fn text_len(spans: &[Span]) -> usize {
    spans.iter().map(Span::char_len).sum()
}

/// Character-indexed substring, clamped to the text bounds.
fn substring(text: &str, from: usize, to: usize) -> String {
    text.chars().skip(from).take(to.saturating_sub(from)).collect()
}

/// Apply `delta` to the characters in `range`.
///
/// Spans straddling a range boundary split into up to three parts
/// (before/inside/after); only the inside part is restyled. The output is
/// not yet canonical; follow with [`merge_spans`]. Invalid ranges return
/// the input unchanged.
#[must_use]
pub fn apply_style(spans: &[Span], range: CharRange, delta: &StyleDelta) -> Vec<Span> {
    if range.is_empty() {
        return spans.to_vec();
    }

    let mut result = Vec::with_capacity(spans.len() + 2);
    let mut cursor = 0usize;

    for span in spans {
        let span_start = cursor;
        let span_end = cursor + span.char_len();

        if span_end <= range.start || span_start >= range.end {
            result.push(span.clone());
        } else {
            if span_start < range.start {
                result.push(Span::styled(
                    substring(&span.text, 0, range.start - span_start),
                    span.style.clone(),
                ));
            }

            let inside_start = range.start.max(span_start);
            let inside_end = range.end.min(span_end);
            let inside = substring(
                &span.text,
                inside_start - span_start,
                inside_end - span_start,
            );
            if !inside.is_empty() {
                let mut style = span.style.clone();
                delta.apply_to(&mut style);
                result.push(Span::styled(inside, style));
            }

            if span_end > range.end {
                result.push(Span::styled(
                    substring(&span.text, range.end - span_start, span_end - span_start),
                    span.style.clone(),
                ));
            }
        }
        cursor = span_end;
    }

    result
}

/// Canonicalize a span list: drop empty spans, coalesce adjacent spans
/// whose override sets are identical. Idempotent and text-preserving.
#[must_use]
pub fn merge_spans(spans: &[Span]) -> Vec<Span> {
    let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans.iter().filter(|s| !s.text.is_empty()) {
        match merged.last_mut() {
            Some(last) if last.style == span.style => last.text.push_str(&span.text),
            _ => merged.push(span.clone()),
        }
    }
    merged
}

/// The spans intersecting `range`, trimmed to the intersection.
///
/// Same intersection logic as [`apply_style`]; styles are preserved.
#[must_use]
pub fn spans_in_range(spans: &[Span], range: CharRange) -> Vec<Span> {
    if range.is_empty() {
        return Vec::new();
    }

    let mut extracted = Vec::new();
    let mut cursor = 0usize;

    for span in spans {
        let span_start = cursor;
        let span_end = cursor + span.char_len();

        if span_end > range.start && span_start < range.end {
            let inside_start = range.start.max(span_start);
            let inside_end = range.end.min(span_end);
            let inside = substring(
                &span.text,
                inside_start - span_start,
                inside_end - span_start,
            );
            if !inside.is_empty() {
                extracted.push(Span::styled(inside, span.style.clone()));
            }
        }
        cursor = span_end;
    }

    extracted
}

/// The spans with `range` excised: prefix + suffix, independently
/// mergeable. Invalid ranges return the input unchanged.
#[must_use]
pub fn remove_range(spans: &[Span], range: CharRange) -> Vec<Span> {
    if range.is_empty() {
        return spans.to_vec();
    }

    let mut remaining = Vec::with_capacity(spans.len());
    let mut cursor = 0usize;

    for span in spans {
        let span_start = cursor;
        let span_end = cursor + span.char_len();

        if span_end <= range.start || span_start >= range.end {
            remaining.push(span.clone());
        } else {
            if span_start < range.start {
                remaining.push(Span::styled(
                    substring(&span.text, 0, range.start - span_start),
                    span.style.clone(),
                ));
            }
            if span_end > range.end {
                remaining.push(Span::styled(
                    substring(&span.text, range.end - span_start, span_end - span_start),
                    span.style.clone(),
                ));
            }
        }
        cursor = span_end;
    }

    remaining
}

/// Aggregate state of a toggleable field over `range`.
///
/// Boolean fields: [`StyleState::Off`] if no intersecting span has the
/// field set, [`StyleState::On`] if all do, else [`StyleState::Mixed`].
/// Script/transform compare the resolved enum value (absent = default).
#[must_use]
pub fn style_state(spans: &[Span], range: CharRange, field: ToggleField) -> StyleState {
    let in_range = spans_in_range(spans, range);
    if in_range.is_empty() {
        return StyleState::Off;
    }

    match field {
        ToggleField::Script => {
            let first = in_range[0].style.script.unwrap_or_default();
            if in_range
                .iter()
                .any(|s| s.style.script.unwrap_or_default() != first)
            {
                return StyleState::Mixed;
            }
            if first == TextScript::Superscript {
                StyleState::On
            } else {
                StyleState::Off
            }
        }
        ToggleField::Transform => {
            let first = in_range[0].style.transform.unwrap_or_default();
            if in_range
                .iter()
                .any(|s| s.style.transform.unwrap_or_default() != first)
            {
                return StyleState::Mixed;
            }
            if first == TextTransform::Uppercase {
                StyleState::On
            } else {
                StyleState::Off
            }
        }
        ToggleField::Underline | ToggleField::Strikethrough => {
            let is_set = |s: &Span| match field {
                ToggleField::Underline => s.style.underline.unwrap_or(false),
                _ => s.style.strikethrough.unwrap_or(false),
            };
            if in_range.iter().all(is_set) {
                StyleState::On
            } else if in_range.iter().any(is_set) {
                StyleState::Mixed
            } else {
                StyleState::Off
            }
        }
    }
}
