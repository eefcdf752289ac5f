//! Auto-fit sizing for text layers.
//!
//! After content or style edits, a text layer's box is refit to its
//! rendered content. Height changes always re-center vertically; width
//! changes re-anchor according to the horizontal alignment. The editor
//! facade suppresses refits while a resize gesture is active or the user
//! is editing text, so explicit sizing is never fought.

use artboard_core::{Layer, TextAlign};

use crate::measure::TextMeasurer;

/// Size changes below this threshold are ignored.
pub const FIT_THRESHOLD: f32 = 1.0;

/// Refit a text layer's box to its measured content.
///
/// Returns whether the frame changed. Non-text layers and measurement
/// failures leave the layer untouched; the last committed dimensions
/// stand in for an unavailable measurement.
pub fn fit_text_layer(layer: &mut Layer, measurer: &dyn TextMeasurer) -> bool {
    let Some(content) = layer.as_text() else {
        return false;
    };
    let align = content.align;
    let Some(metrics) = measurer.measure(content, None) else {
        tracing::debug!(
            "measurement unavailable, keeping committed size for layer {}",
            layer.id
        );
        return false;
    };

    let frame = &mut layer.frame;
    let mut changed = false;

    if (frame.height - metrics.height).abs() > FIT_THRESHOLD {
        let diff = frame.height - metrics.height;
        frame.height = metrics.height;
        frame.y += diff / 2.0;
        changed = true;
    }

    if (frame.width - metrics.width).abs() > FIT_THRESHOLD {
        let diff = frame.width - metrics.width;
        match align {
            TextAlign::Left => {}
            TextAlign::Right => frame.x += diff,
            TextAlign::Center => frame.x += diff / 2.0,
        }
        frame.width = metrics.width;
        changed = true;
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::TextMetrics;
    use artboard_core::{Frame, LayerKind, TextContent};

    /// Measurer returning a fixed size, or nothing at all.
    struct FixedMeasurer(Option<TextMetrics>);

    impl TextMeasurer for FixedMeasurer {
        fn measure(
            &self,
            _content: &TextContent,
            _max_width: Option<f32>,
        ) -> Option<TextMetrics> {
            self.0
        }

        fn offset_for_char(
            &self,
            _content: &TextContent,
            _box_width: f32,
            _box_height: f32,
            _index: usize,
        ) -> Option<artboard_core::Point> {
            None
        }
    }

    fn text_layer(align: TextAlign) -> Layer {
        let mut content = TextContent::new("hello");
        content.align = align;
        Layer::new(LayerKind::Text(content)).with_frame(Frame::new(100.0, 100.0, 200.0, 50.0))
    }

    #[test]
    fn test_height_change_recenters_vertically() {
        let mut layer = text_layer(TextAlign::Left);
        let changed = fit_text_layer(
            &mut layer,
            &FixedMeasurer(Some(TextMetrics {
                width: 200.0,
                height: 30.0,
            })),
        );
        assert!(changed);
        assert!((layer.frame.height - 30.0).abs() < 1e-3);
        assert!((layer.frame.y - 110.0).abs() < 1e-3);
        assert!((layer.frame.x - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_width_change_anchors_by_alignment() {
        for (align, expected_x) in [
            (TextAlign::Left, 100.0),
            (TextAlign::Right, 140.0),
            (TextAlign::Center, 120.0),
        ] {
            let mut layer = text_layer(align);
            fit_text_layer(
                &mut layer,
                &FixedMeasurer(Some(TextMetrics {
                    width: 160.0,
                    height: 50.0,
                })),
            );
            assert!(
                (layer.frame.x - expected_x).abs() < 1e-3,
                "align {align:?}: expected x {expected_x}, got {}",
                layer.frame.x
            );
            assert!((layer.frame.width - 160.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_changes_below_threshold_ignored() {
        let mut layer = text_layer(TextAlign::Center);
        let changed = fit_text_layer(
            &mut layer,
            &FixedMeasurer(Some(TextMetrics {
                width: 200.5,
                height: 49.5,
            })),
        );
        assert!(!changed);
        assert!((layer.frame.width - 200.0).abs() < 1e-3);
        assert!((layer.frame.height - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_measurement_failure_keeps_committed_size() {
        let mut layer = text_layer(TextAlign::Center);
        let changed = fit_text_layer(&mut layer, &FixedMeasurer(None));
        assert!(!changed);
        assert!((layer.frame.width - 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_non_text_layer_untouched() {
        let mut layer = Layer::new(LayerKind::Image {
            src: "img.png".to_string(),
        })
        .with_frame(Frame::new(0.0, 0.0, 50.0, 50.0));
        assert!(!fit_text_layer(
            &mut layer,
            &FixedMeasurer(Some(TextMetrics {
                width: 10.0,
                height: 10.0,
            }))
        ));
    }
}
