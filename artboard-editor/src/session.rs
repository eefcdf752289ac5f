//! Gesture vocabulary and the per-gesture interaction session.

use serde::{Deserialize, Serialize};

use artboard_core::{Layer, LayerId, Point, Rect, Viewport};

/// One of the eight resize handles around a layer or group box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handle {
    /// Top-left corner.
    #[serde(rename = "tl")]
    TopLeft,
    /// Top edge.
    #[serde(rename = "t")]
    Top,
    /// Top-right corner.
    #[serde(rename = "tr")]
    TopRight,
    /// Left edge.
    #[serde(rename = "l")]
    Left,
    /// Right edge.
    #[serde(rename = "r")]
    Right,
    /// Bottom-left corner.
    #[serde(rename = "bl")]
    BottomLeft,
    /// Bottom edge.
    #[serde(rename = "b")]
    Bottom,
    /// Bottom-right corner.
    #[serde(rename = "br")]
    BottomRight,
}

impl Handle {
    /// Whether dragging this handle moves the left edge.
    #[must_use]
    pub const fn affects_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::Left | Self::BottomLeft)
    }

    /// Whether dragging this handle moves the right edge.
    #[must_use]
    pub const fn affects_right(self) -> bool {
        matches!(self, Self::TopRight | Self::Right | Self::BottomRight)
    }

    /// Whether dragging this handle moves the top edge.
    #[must_use]
    pub const fn affects_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::Top | Self::TopRight)
    }

    /// Whether dragging this handle moves the bottom edge.
    #[must_use]
    pub const fn affects_bottom(self) -> bool {
        matches!(self, Self::BottomLeft | Self::Bottom | Self::BottomRight)
    }

    /// Whether this handle moves a vertical edge (left or right).
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        self.affects_left() || self.affects_right()
    }

    /// Whether this handle moves a horizontal edge (top or bottom).
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        self.affects_top() || self.affects_bottom()
    }
}

/// The kind of gesture a pointer drag performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum GestureKind {
    /// Translate the affected layers.
    Move,
    /// Resize via one of the eight handles.
    Resize(Handle),
    /// Rotate about the pivot.
    Rotate,
}

/// Keyboard modifiers active during a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Modifiers {
    /// Shift: axis constraint during move, aspect lock during resize.
    pub shift: bool,
    /// Alt/Option: duplicate-on-end when held at move start.
    pub alt: bool,
    /// Control key.
    pub ctrl: bool,
    /// Meta/Command key.
    pub meta: bool,
}

/// Axis a constrained move is locked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Only x changes.
    Horizontal,
    /// Only y changes.
    Vertical,
}

/// Ephemeral state of one gesture, alive strictly between `begin()` and
/// `end()`. Never persisted.
///
/// Every pointer update recomputes target geometry from the captured
/// initial layers plus the cumulative delta since the gesture began, so
/// coalesced or dropped intermediate events cannot skew the result.
#[derive(Debug)]
pub(crate) struct InteractionSession {
    /// What the gesture does.
    pub kind: GestureKind,
    /// Screen position of the pointer at `begin()`.
    pub pointer_start: Point,
    /// Clones of every affected layer as they were at `begin()`.
    pub initial_layers: Vec<Layer>,
    /// The layer the gesture was initiated on.
    pub primary: LayerId,
    /// Rotation/scale pivot in artboard coordinates.
    pub pivot: Point,
    /// Group bounding box at `begin()`, when more than one layer moves.
    pub group_box: Option<Rect>,
    /// Viewport captured at `begin()`.
    pub viewport: Viewport,
    /// Axis chosen by the constrain modifier; fixed once set.
    pub axis_lock: Option<Axis>,
    /// Whether `end()` should restore the source and insert a duplicate.
    pub duplicate_on_end: bool,
}

impl InteractionSession {
    /// Whether this gesture affects more than one layer.
    pub fn is_group(&self) -> bool {
        self.initial_layers.len() > 1
    }

    /// The captured state of the layer the gesture started on.
    pub fn primary_initial(&self) -> &Layer {
        self.initial_layers
            .iter()
            .find(|l| l.id == self.primary)
            .unwrap_or(&self.initial_layers[0])
    }
}
