//! Text measurement collaborator.
//!
//! The auto-fit sizer and text splitter depend only on the [`TextMeasurer`]
//! contract; GUI hosts implement it over their platform text layout. The
//! bundled [`HeuristicMeasurer`] approximates glyph metrics from font size
//! and is what tests and headless hosts use.

use artboard_core::{Point, TextAlign, TextContent, TextScript};

/// Rendered extent of a text layer's content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Rendered width in artboard units.
    pub width: f32,
    /// Rendered height in artboard units.
    pub height: f32,
}

/// Measures rendered text.
///
/// Implementations return `None` when measurement is unavailable; callers
/// fall back to the layer's last committed dimensions.
pub trait TextMeasurer {
    /// Measure the rendered extent of `content`.
    ///
    /// `max_width` is a wrapping hint; implementations without soft
    /// wrapping may ignore it.
    fn measure(&self, content: &TextContent, max_width: Option<f32>) -> Option<TextMetrics>;

    /// Pixel offset of the character at `index` inside the rendered layer
    /// box of `box_width` × `box_height`, alignment and vertical centering
    /// applied. `index` may equal the text length (end position).
    fn offset_for_char(
        &self,
        content: &TextContent,
        box_width: f32,
        box_height: f32,
        index: usize,
    ) -> Option<Point>;
}

/// Horizontal padding added around measured text.
const PADDING_H: f32 = 4.0;
/// Vertical padding added around measured text.
const PADDING_V: f32 = 2.0;
/// Size factor applied to superscript spans.
const SUPERSCRIPT_FACTOR: f32 = 0.75;

/// Font-size-proportional text measurement.
///
/// Splits spans into lines at embedded newlines, estimates each span's
/// advance as `chars × resolved size × glyph_width_factor`, and takes the
/// line height from the base font size. No soft wrapping.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicMeasurer {
    /// Average glyph advance as a fraction of the font size.
    pub glyph_width_factor: f32,
}

impl Default for HeuristicMeasurer {
    fn default() -> Self {
        Self {
            glyph_width_factor: 0.6,
        }
    }
}

/// One styled run within a single visual line.
struct LineRun {
    advance: f32,
}

impl HeuristicMeasurer {
    /// Create a measurer with the default glyph width factor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn resolved_size(&self, content: &TextContent, style: &artboard_core::SpanStyle) -> f32 {
        let base = style.font_size.unwrap_or(content.font_size);
        match style.script.unwrap_or_default() {
            TextScript::Superscript => base * SUPERSCRIPT_FACTOR,
            TextScript::Normal => base,
        }
    }

    #[allow(clippy::cast_precision_loss)] // Span lengths are far below f32 precision limits
    fn advance(&self, content: &TextContent, style: &artboard_core::SpanStyle, chars: usize) -> f32 {
        chars as f32 * self.resolved_size(content, style) * self.glyph_width_factor
    }

    /// Split content into visual lines of per-run advances.
    fn lines(&self, content: &TextContent) -> Vec<Vec<LineRun>> {
        let mut lines: Vec<Vec<LineRun>> = Vec::new();
        let mut current: Vec<LineRun> = Vec::new();

        for span in &content.spans {
            let parts: Vec<&str> = span.text.split('\n').collect();
            for (i, part) in parts.iter().enumerate() {
                if !part.is_empty() {
                    let chars = part.chars().count();
                    current.push(LineRun {
                        advance: self.advance(content, &span.style, chars),
                    });
                }
                if i < parts.len() - 1 {
                    lines.push(std::mem::take(&mut current));
                }
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    fn line_width(runs: &[LineRun]) -> f32 {
        runs.iter().map(|r| r.advance).sum()
    }

    #[allow(clippy::cast_precision_loss)]
    fn content_height(&self, content: &TextContent, line_count: usize) -> f32 {
        line_count as f32 * content.font_size
    }
}

impl TextMeasurer for HeuristicMeasurer {
    fn measure(&self, content: &TextContent, _max_width: Option<f32>) -> Option<TextMetrics> {
        let lines = self.lines(content);
        let max_width = lines
            .iter()
            .map(|runs| Self::line_width(runs))
            .fold(0.0f32, f32::max);
        Some(TextMetrics {
            width: max_width + PADDING_H,
            height: self.content_height(content, lines.len()) + PADDING_V,
        })
    }

    fn offset_for_char(
        &self,
        content: &TextContent,
        box_width: f32,
        box_height: f32,
        index: usize,
    ) -> Option<Point> {
        let line_height = content.font_size;
        let lines = self.lines(content);
        let content_height = self.content_height(content, lines.len().max(1));
        let v_offset = (box_height - content_height) / 2.0;

        let line_start = |line_idx: usize| -> f32 {
            let width = lines.get(line_idx).map_or(0.0, |runs| Self::line_width(runs));
            match content.align {
                TextAlign::Left => 0.0,
                TextAlign::Center => (box_width - width) / 2.0,
                TextAlign::Right => box_width - width,
            }
        };

        #[allow(clippy::cast_precision_loss)] // Line counts stay tiny
        let line_y = |line_idx: usize| v_offset + line_idx as f32 * line_height;

        // Walk the logical text, tracking the visual position of every
        // character boundary until `index` is reached.
        let mut line_idx = 0usize;
        let mut x_advance = 0.0f32;
        let mut seen = 0usize;

        for span in &content.spans {
            let size = self.resolved_size(content, &span.style) * self.glyph_width_factor;
            for ch in span.text.chars() {
                if seen == index {
                    return Some(Point::new(line_start(line_idx) + x_advance, line_y(line_idx)));
                }
                if ch == '\n' {
                    line_idx += 1;
                    x_advance = 0.0;
                } else {
                    x_advance += size;
                }
                seen += 1;
            }
        }

        // Index at or past the end: the position after the last character.
        Some(Point::new(line_start(line_idx) + x_advance, line_y(line_idx)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artboard_core::{CharRange, Patch, StyleDelta};

    fn content(text: &str, size: f32) -> TextContent {
        let mut c = TextContent::new(text);
        c.font_size = size;
        c
    }

    #[test]
    fn test_measure_single_line() {
        let measurer = HeuristicMeasurer::new();
        let metrics = measurer
            .measure(&content("abcd", 10.0), None)
            .expect("measure");
        // 4 chars × 10.0 × 0.6 + padding.
        assert!((metrics.width - 28.0).abs() < 1e-3);
        assert!((metrics.height - 12.0).abs() < 1e-3);
    }

    #[test]
    fn test_measure_widest_line_wins() {
        let measurer = HeuristicMeasurer::new();
        let metrics = measurer
            .measure(&content("ab\nabcdef\nabc", 10.0), None)
            .expect("measure");
        assert!((metrics.width - (6.0 * 6.0 + 4.0)).abs() < 1e-3);
        assert!((metrics.height - (3.0 * 10.0 + 2.0)).abs() < 1e-3);
    }

    #[test]
    fn test_measure_span_override_contributes() {
        let measurer = HeuristicMeasurer::new();
        let mut c = content("abcd", 10.0);
        c.apply_style(
            CharRange::new(0, 2),
            &StyleDelta {
                font_size: Patch::Set(20.0),
                ..StyleDelta::default()
            },
        );
        let metrics = measurer.measure(&c, None).expect("measure");
        // 2 chars at 20, 2 at 10.
        assert!((metrics.width - (2.0 * 12.0 + 2.0 * 6.0 + 4.0)).abs() < 1e-3);
    }

    #[test]
    fn test_offset_for_char_left_aligned() {
        let measurer = HeuristicMeasurer::new();
        let mut c = content("abcd\nef", 10.0);
        c.align = TextAlign::Left;
        // Box exactly fits the content: no centering offsets.
        let p = measurer
            .offset_for_char(&c, 24.0, 20.0, 2)
            .expect("offset");
        assert!((p.x - 12.0).abs() < 1e-3);
        assert!((p.y - 0.0).abs() < 1e-3);

        // First char of the second line.
        let p = measurer
            .offset_for_char(&c, 24.0, 20.0, 5)
            .expect("offset");
        assert!((p.x - 0.0).abs() < 1e-3);
        assert!((p.y - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_offset_for_char_centered_in_taller_box() {
        let measurer = HeuristicMeasurer::new();
        let c = content("abcd", 10.0);
        // Content is 24 wide, 10 tall; box is 44 × 30.
        let p = measurer.offset_for_char(&c, 44.0, 30.0, 0).expect("offset");
        assert!((p.x - 10.0).abs() < 1e-3);
        assert!((p.y - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_offset_past_end_clamps_to_end() {
        let measurer = HeuristicMeasurer::new();
        let mut c = content("ab", 10.0);
        c.align = TextAlign::Left;
        let p = measurer.offset_for_char(&c, 16.0, 12.0, 99).expect("offset");
        assert!((p.x - 12.0).abs() < 1e-3);
    }
}
