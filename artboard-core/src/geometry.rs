//! Pure geometry over layer frames: rotation, corners, group bounds.
//!
//! All angles are plain degree values; nothing here normalizes them into a
//! range. The rotation convention matches screen coordinates (y grows
//! downward): rotating (1, 0) by +90° yields (0, 1).

use serde::{Deserialize, Serialize};

/// A point in artboard or screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// This point rotated about `pivot` by `degrees`.
    #[must_use]
    pub fn rotated_about(self, pivot: Point, degrees: f32) -> Self {
        let rad = degrees.to_radians();
        let (sin, cos) = rad.sin_cos();
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        Self {
            x: pivot.x + dx * cos - dy * sin,
            y: pivot.y + dx * sin + dy * cos,
        }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The center of the rectangle.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// The smallest rectangle enclosing all of `points`.
    ///
    /// Returns a zero rectangle for an empty iterator.
    #[must_use]
    pub fn enclosing(points: impl IntoIterator<Item = Point>) -> Self {
        let mut iter = points.into_iter();
        let Some(first) = iter.next() else {
            return Self::default();
        };
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in iter {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }
}

/// Position, size and orientation of a layer on the artboard.
///
/// `x`/`y` are the top-left corner of the *unrotated* box; rotation is
/// applied about the box center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    /// X position of the unrotated top-left corner.
    pub x: f32,
    /// Y position of the unrotated top-left corner.
    pub y: f32,
    /// Width in artboard units.
    pub width: f32,
    /// Height in artboard units.
    pub height: f32,
    /// Rotation in degrees about the box center.
    pub rotation: f32,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
            rotation: 0.0,
        }
    }
}

impl Frame {
    /// Create a new frame with no rotation.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation: 0.0,
        }
    }

    /// The center of the frame.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Reposition the frame so its center lands on `center`.
    pub fn set_center(&mut self, center: Point) {
        self.x = center.x - self.width / 2.0;
        self.y = center.y - self.height / 2.0;
    }

    /// The four corners in world space, rotation applied.
    ///
    /// Order: top-left, top-right, bottom-right, bottom-left.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        let c = self.center();
        let hw = self.width / 2.0;
        let hh = self.height / 2.0;
        [
            Point::new(-hw, -hh),
            Point::new(hw, -hh),
            Point::new(hw, hh),
            Point::new(-hw, hh),
        ]
        .map(|offset| Point::new(c.x + offset.x, c.y + offset.y).rotated_about(c, self.rotation))
    }

    /// The axis-aligned bounds of the rotated frame.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::enclosing(self.corners())
    }

    /// Whether a world-space point falls inside the rotated frame.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        // Undo the rotation, then test against the axis-aligned box.
        let local = point.rotated_about(self.center(), -self.rotation);
        local.x >= self.x
            && local.x <= self.x + self.width
            && local.y >= self.y
            && local.y <= self.y + self.height
    }
}

/// The axis-aligned rectangle enclosing the rotated corners of all frames.
///
/// This is the group box used for multi-layer selections: its own rotation
/// is always zero, and group resize/rotate pivots about its center.
#[must_use]
pub fn group_box<'a>(frames: impl IntoIterator<Item = &'a Frame>) -> Rect {
    Rect::enclosing(frames.into_iter().flat_map(Frame::corners))
}

/// Maps between screen and artboard coordinates.
///
/// `origin` is the screen position of the artboard's (0, 0); `zoom` is the
/// screen-pixels-per-artboard-unit factor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Viewport {
    /// Screen position of the artboard origin.
    pub origin: Point,
    /// Zoom factor (1.0 = 100%).
    pub zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            origin: Point::default(),
            zoom: 1.0,
        }
    }
}

impl Viewport {
    /// Create a viewport with the given origin and zoom.
    #[must_use]
    pub const fn new(origin: Point, zoom: f32) -> Self {
        Self { origin, zoom }
    }

    /// Convert a screen point to artboard coordinates.
    #[must_use]
    pub fn to_board(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.origin.x) / self.zoom,
            (screen.y - self.origin.y) / self.zoom,
        )
    }

    /// Convert an artboard point to screen coordinates.
    #[must_use]
    pub fn to_screen(&self, board: Point) -> Point {
        Point::new(
            self.origin.x + board.x * self.zoom,
            self.origin.y + board.y * self.zoom,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-3, "expected {b}, got {a}");
    }

    #[test]
    fn test_rotate_point_quarter_turn() {
        let p = Point::new(1.0, 0.0).rotated_about(Point::default(), 90.0);
        assert_close(p.x, 0.0);
        assert_close(p.y, 1.0);
    }

    #[test]
    fn test_corners_unrotated() {
        let frame = Frame::new(10.0, 20.0, 100.0, 50.0);
        let corners = frame.corners();
        assert_close(corners[0].x, 10.0);
        assert_close(corners[0].y, 20.0);
        assert_close(corners[2].x, 110.0);
        assert_close(corners[2].y, 70.0);
    }

    #[test]
    fn test_square_corners_invariant_under_quarter_turn() {
        // A square is rotationally symmetric about its center at 90°.
        let mut frame = Frame::new(0.0, 0.0, 100.0, 100.0);
        let before = frame.corners();
        frame.rotation = 90.0;
        let after = frame.corners();
        for p in after {
            assert!(
                before
                    .iter()
                    .any(|q| (q.x - p.x).abs() < 1e-3 && (q.y - p.y).abs() < 1e-3),
                "corner {p:?} not in original set"
            );
        }
    }

    #[test]
    fn test_bounds_of_rotated_frame() {
        let frame = Frame {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 50.0,
            rotation: 90.0,
        };
        let bounds = frame.bounds();
        // 100x50 rotated a quarter turn about (50, 25) spans 50x100.
        assert_close(bounds.width, 50.0);
        assert_close(bounds.height, 100.0);
        assert_close(bounds.x, 25.0);
        assert_close(bounds.y, -25.0);
    }

    #[test]
    fn test_group_box_encloses_all() {
        let a = Frame::new(0.0, 0.0, 10.0, 10.0);
        let b = Frame::new(50.0, 30.0, 20.0, 20.0);
        let boxed = group_box([&a, &b]);
        assert_close(boxed.x, 0.0);
        assert_close(boxed.y, 0.0);
        assert_close(boxed.width, 70.0);
        assert_close(boxed.height, 50.0);
    }

    #[test]
    fn test_contains_rotated() {
        let frame = Frame {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 10.0,
            rotation: 90.0,
        };
        // After rotation the strip is vertical through the center.
        assert!(frame.contains(Point::new(50.0, 50.0)));
        assert!(frame.contains(Point::new(50.0, 0.0)));
        assert!(!frame.contains(Point::new(0.0, 5.0)));
    }

    #[test]
    fn test_viewport_round_trip() {
        let viewport = Viewport::new(Point::new(100.0, 40.0), 2.0);
        let board = Point::new(30.0, 60.0);
        let screen = viewport.to_screen(board);
        assert_close(screen.x, 160.0);
        assert_close(screen.y, 160.0);
        let back = viewport.to_board(screen);
        assert_close(back.x, board.x);
        assert_close(back.y, board.y);
    }
}
