//! Guide snapping for move gestures.
//!
//! Three alignment points of the moving layer per axis (leading edge,
//! center, trailing edge) are tested against every guide of matching
//! orientation. The first matching guide per axis in guide-list order
//! wins and the target is adjusted so the matched point lands exactly on
//! it. The tolerance is a fixed screen distance divided by zoom, so the
//! feel is the same at any zoom level.

use artboard_core::{Guide, Orientation, Point};

/// Snap tolerance in screen pixels.
pub const SNAP_TOLERANCE: f32 = 5.0;

/// Guides matched during a move, for visual highlighting.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SnapLines {
    /// Position of the matched horizontal guide, if any.
    pub horizontal: Option<f32>,
    /// Position of the matched vertical guide, if any.
    pub vertical: Option<f32>,
}

impl SnapLines {
    /// Whether no guide matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.horizontal.is_none() && self.vertical.is_none()
    }
}

/// Snap a move target so layer alignment points land on nearby guides.
///
/// `width`/`height` are the moving layer's dimensions, `target` its
/// candidate top-left position. Degenerate zoom disables snapping.
#[must_use]
pub fn snap_move_target(
    width: f32,
    height: f32,
    target: Point,
    guides: &[Guide],
    zoom: f32,
) -> (Point, SnapLines) {
    if !zoom.is_finite() || zoom <= 0.0 {
        return (target, SnapLines::default());
    }
    let tolerance = SNAP_TOLERANCE / zoom;

    let mut snapped = target;
    let mut lines = SnapLines::default();

    for guide in guides {
        match guide.orientation {
            Orientation::Vertical if lines.vertical.is_none() => {
                let points = [snapped.x, snapped.x + width / 2.0, snapped.x + width];
                if let Some(point) = points
                    .into_iter()
                    .find(|p| (p - guide.position).abs() < tolerance)
                {
                    snapped.x += guide.position - point;
                    lines.vertical = Some(guide.position);
                    tracing::trace!("snapped x to vertical guide at {}", guide.position);
                }
            }
            Orientation::Horizontal if lines.horizontal.is_none() => {
                let points = [snapped.y, snapped.y + height / 2.0, snapped.y + height];
                if let Some(point) = points
                    .into_iter()
                    .find(|p| (p - guide.position).abs() < tolerance)
                {
                    snapped.y += guide.position - point;
                    lines.horizontal = Some(guide.position);
                    tracing::trace!("snapped y to horizontal guide at {}", guide.position);
                }
            }
            _ => {}
        }
        if lines.vertical.is_some() && lines.horizontal.is_some() {
            break;
        }
    }

    (snapped, lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical(position: f32) -> Guide {
        Guide::new(Orientation::Vertical, position)
    }

    fn horizontal(position: f32) -> Guide {
        Guide::new(Orientation::Horizontal, position)
    }

    #[test]
    fn test_left_edge_snaps_to_vertical_guide() {
        let guides = [vertical(200.0)];
        let (snapped, lines) =
            snap_move_target(100.0, 50.0, Point::new(197.0, 10.0), &guides, 1.0);
        assert!((snapped.x - 200.0).abs() < 1e-3);
        assert!((snapped.y - 10.0).abs() < 1e-3);
        assert_eq!(lines.vertical, Some(200.0));
        assert_eq!(lines.horizontal, None);
    }

    #[test]
    fn test_center_point_snaps() {
        let guides = [vertical(200.0)];
        // Center = x + 50; x = 147 puts it 3 units from the guide.
        let (snapped, lines) =
            snap_move_target(100.0, 50.0, Point::new(147.0, 0.0), &guides, 1.0);
        assert!((snapped.x - 150.0).abs() < 1e-3);
        assert_eq!(lines.vertical, Some(200.0));
    }

    #[test]
    fn test_out_of_tolerance_does_not_snap() {
        let guides = [vertical(200.0)];
        let (snapped, lines) =
            snap_move_target(100.0, 50.0, Point::new(190.0, 0.0), &guides, 1.0);
        assert!((snapped.x - 190.0).abs() < 1e-3);
        assert!(lines.is_empty());
    }

    #[test]
    fn test_tolerance_scales_with_zoom() {
        let guides = [vertical(200.0)];
        // 3 units off: inside the 5px tolerance at zoom 1, outside at zoom 2.
        let (_, lines) = snap_move_target(100.0, 50.0, Point::new(197.0, 0.0), &guides, 2.0);
        assert!(lines.is_empty());
        let (_, lines) = snap_move_target(100.0, 50.0, Point::new(198.0, 0.0), &guides, 2.0);
        assert_eq!(lines.vertical, Some(200.0));
    }

    #[test]
    fn test_first_matching_guide_wins() {
        let guides = [vertical(202.0), vertical(199.0)];
        let (snapped, lines) =
            snap_move_target(100.0, 50.0, Point::new(200.0, 0.0), &guides, 1.0);
        assert!((snapped.x - 202.0).abs() < 1e-3);
        assert_eq!(lines.vertical, Some(202.0));
    }

    #[test]
    fn test_axes_snap_independently() {
        let guides = [vertical(200.0), horizontal(100.0)];
        let (snapped, lines) =
            snap_move_target(100.0, 50.0, Point::new(198.0, 98.0), &guides, 1.0);
        assert!((snapped.x - 200.0).abs() < 1e-3);
        assert!((snapped.y - 100.0).abs() < 1e-3);
        assert_eq!(lines.vertical, Some(200.0));
        assert_eq!(lines.horizontal, Some(100.0));
    }

    #[test]
    fn test_degenerate_zoom_disables_snapping() {
        let guides = [vertical(200.0)];
        let (snapped, lines) = snap_move_target(100.0, 50.0, Point::new(200.0, 0.0), &guides, 0.0);
        assert!((snapped.x - 200.0).abs() < 1e-3);
        assert!(lines.is_empty());
    }
}
