//! Extracting a text range into a new layer.

use artboard_core::{
    merge_spans, remove_range, spans_in_range, Artboard, ArtboardError, ArtboardResult, CharRange,
    Frame, LayerId, Point, Span,
};

use crate::autofit;
use crate::measure::TextMeasurer;

/// Box height given to a freshly split layer before auto-fit runs.
const PLACEHOLDER_HEIGHT: f32 = 50.0;

/// A span list partitioned by a character range.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitSpans {
    /// The spans intersecting the range, trimmed to it.
    pub extracted: Vec<Span>,
    /// The spans with the range excised: prefix + suffix.
    pub remaining: Vec<Span>,
}

/// Partition a span list at `range`.
///
/// Neither output is canonical yet; merge each independently. Reading
/// `remaining` then `extracted` in original order reproduces the original
/// text exactly, and the outputs never share characters. An invalid range
/// extracts nothing.
#[must_use]
pub fn split_spans(spans: &[Span], range: CharRange) -> SplitSpans {
    SplitSpans {
        extracted: spans_in_range(spans, range),
        remaining: remove_range(spans, range),
    }
}

/// Extract `range` from a text layer into a new layer on the same board.
///
/// The new layer inherits the source's base styles, effects and rotation.
/// Its anchor is the rendered offset of the range-start character, mapped
/// through the source's rotation about the source center to world space;
/// its box is a placeholder immediately refit by the auto-fit sizer. The
/// source keeps the merged remainder (or the empty sentinel). Returns
/// `None` when the range selects nothing.
///
/// # Errors
///
/// Returns an error if the layer is unknown or not a text layer.
pub fn split_text_layer(
    board: &mut Artboard,
    layer_id: LayerId,
    range: CharRange,
    measurer: &dyn TextMeasurer,
) -> ArtboardResult<Option<LayerId>> {
    let source = board
        .layer(layer_id)
        .ok_or_else(|| ArtboardError::LayerNotFound(layer_id.to_string()))?;
    let Some(content) = source.as_text() else {
        return Err(ArtboardError::InvalidOperation(
            "split target is not a text layer".to_string(),
        ));
    };

    let parts = split_spans(&content.spans, range);
    let extracted = merge_spans(&parts.extracted);
    if extracted.is_empty() {
        return Ok(None);
    }
    let remaining = parts.remaining;

    let frame = source.frame;
    let local = measurer
        .offset_for_char(content, frame.width, frame.height, range.start)
        .unwrap_or_else(|| {
            tracing::warn!("measurement unavailable, splitting at the source origin");
            Point::default()
        });

    // Map the unrotated local anchor through the source's rotation.
    let anchor = Point::new(frame.x + local.x, frame.y + local.y)
        .rotated_about(frame.center(), frame.rotation);

    let mut new_layer = source.clone();
    new_layer.id = LayerId::new();
    new_layer.locked = false;
    new_layer.frame = Frame {
        x: anchor.x,
        y: anchor.y,
        width: frame.width,
        height: PLACEHOLDER_HEIGHT,
        rotation: frame.rotation,
    };
    if let Some(new_content) = new_layer.as_text_mut() {
        new_content.set_spans(extracted);
    }
    autofit::fit_text_layer(&mut new_layer, measurer);

    if let Some(source) = board.layer_mut(layer_id) {
        if let Some(source_content) = source.as_text_mut() {
            source_content.set_spans(remaining);
        }
    }

    let new_id = board.add_layer(new_layer);
    tracing::debug!("split layer {layer_id} range {range:?} into new layer {new_id}");
    Ok(Some(new_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::HeuristicMeasurer;
    use artboard_core::{text_of, Layer, LayerKind, TextAlign, TextContent};

    fn text_board(text: &str, frame: Frame) -> (Artboard, LayerId) {
        let mut board = Artboard::new("test", 1080.0, 1080.0);
        let mut content = TextContent::new(text);
        content.font_size = 10.0;
        content.align = TextAlign::Left;
        let id = board.add_layer(Layer::new(LayerKind::Text(content)).with_frame(frame));
        (board, id)
    }

    #[test]
    fn test_split_spans_partitions_exactly() {
        let spans = vec![Span::new("hello world")];
        let parts = split_spans(&spans, CharRange::new(6, 11));
        assert_eq!(text_of(&parts.extracted), "world");
        assert_eq!(text_of(&parts.remaining), "hello ");
    }

    #[test]
    fn test_split_layer_moves_text_and_keeps_remainder() {
        let (mut board, id) = text_board("hello world", Frame::new(0.0, 0.0, 100.0, 20.0));
        let measurer = HeuristicMeasurer::new();
        let new_id = split_text_layer(&mut board, id, CharRange::new(6, 11), &measurer)
            .expect("split")
            .expect("new layer");

        let source = board.layer(id).expect("source").as_text().expect("text");
        assert_eq!(source.text(), "hello ");
        let new = board.layer(new_id).expect("new").as_text().expect("text");
        assert_eq!(new.text(), "world");
        // Source + extracted reproduce the original text in order.
        assert_eq!(format!("{}{}", source.text(), new.text()), "hello world");
        // The new layer lands on top.
        assert_eq!(
            board.layer(new_id).expect("new").z_index,
            board.max_z()
        );
    }

    #[test]
    fn test_split_layer_anchor_accounts_for_offset() {
        let (mut board, id) = text_board("hello world", Frame::new(50.0, 40.0, 100.0, 20.0));
        let measurer = HeuristicMeasurer::new();
        let new_id = split_text_layer(&mut board, id, CharRange::new(6, 11), &measurer)
            .expect("split")
            .expect("new layer");

        // Left-aligned at size 10: 6 chars × 6.0 advance before the range,
        // one line vertically centered in a 20-high box, so the anchor is
        // (50+36, 40+5). Auto-fit then shrinks the placeholder box from 50
        // to 12 high, re-centering y by +19; left alignment keeps x.
        let frame = board.layer(new_id).expect("new").frame;
        assert!((frame.x - 86.0).abs() < 1e-2);
        assert!((frame.y - 64.0).abs() < 1e-2);
        assert!((frame.width - 34.0).abs() < 1e-2);
        assert!((frame.height - 12.0).abs() < 1e-2);
    }

    #[test]
    fn test_split_layer_inherits_rotation() {
        let (mut board, id) = text_board(
            "ab",
            Frame {
                x: 0.0,
                y: 0.0,
                width: 100.0,
                height: 20.0,
                rotation: 45.0,
            },
        );
        let measurer = HeuristicMeasurer::new();
        let new_id = split_text_layer(&mut board, id, CharRange::new(0, 1), &measurer)
            .expect("split")
            .expect("new layer");
        let frame = board.layer(new_id).expect("new").frame;
        assert!((frame.rotation - 45.0).abs() < 1e-3);
    }

    #[test]
    fn test_split_whole_text_leaves_sentinel() {
        let (mut board, id) = text_board("all", Frame::new(0.0, 0.0, 100.0, 20.0));
        let measurer = HeuristicMeasurer::new();
        split_text_layer(&mut board, id, CharRange::new(0, 3), &measurer)
            .expect("split")
            .expect("new layer");
        let source = board.layer(id).expect("source").as_text().expect("text");
        assert_eq!(source.text(), "");
        assert_eq!(source.spans.len(), 1);
    }

    #[test]
    fn test_split_empty_range_is_noop() {
        let (mut board, id) = text_board("hello", Frame::new(0.0, 0.0, 100.0, 20.0));
        let measurer = HeuristicMeasurer::new();
        let result =
            split_text_layer(&mut board, id, CharRange::new(3, 3), &measurer).expect("split");
        assert!(result.is_none());
        assert_eq!(board.layer_count(), 1);
        assert_eq!(
            board.layer(id).expect("source").as_text().expect("text").text(),
            "hello"
        );
    }

    #[test]
    fn test_split_non_text_layer_errors() {
        let mut board = Artboard::new("test", 1080.0, 1080.0);
        let id = board.add_layer(Layer::new(LayerKind::Image {
            src: "img.png".to_string(),
        }));
        let measurer = HeuristicMeasurer::new();
        assert!(split_text_layer(&mut board, id, CharRange::new(0, 1), &measurer).is_err());
    }
}
