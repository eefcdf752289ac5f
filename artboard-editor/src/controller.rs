//! The gesture state machine: begin / update / end for move, resize and
//! rotate, over single layers and multi-layer groups.
//!
//! The controller owns at most one [`InteractionSession`] at a time,
//! allocated at `begin()` and dropped at `end()`/`cancel()`. Live updates
//! mutate the working artboard; only `end()` commits a snapshot to the
//! history collaborator.

use artboard_core::{
    geometry, Artboard, ArtboardError, ArtboardResult, Frame, GuideSettings, Layer, LayerId, Point,
    Viewport,
};

use crate::history::History;
use crate::session::{Axis, GestureKind, Handle, InteractionSession, Modifiers};
use crate::snap::{self, SnapLines};

/// Minimum width/height for single-layer resize.
pub const MIN_LAYER_SIZE: f32 = 10.0;
/// Minimum width/height for the group box during group resize.
pub const MIN_GROUP_SIZE: f32 = 20.0;
/// Offset aligning the rotation handle's rest position with 0°.
const ROTATION_HANDLE_OFFSET: f32 = 90.0;
/// Cumulative delta (artboard units) before an axis lock is chosen.
const AXIS_LOCK_THRESHOLD: f32 = 1.0;

/// Pointer-driven transform engine for layers and groups.
#[derive(Debug, Default)]
pub struct TransformController {
    session: Option<InteractionSession>,
}

impl TransformController {
    /// Create an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a gesture is currently open.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// The kind of the open gesture, if any.
    #[must_use]
    pub fn active_kind(&self) -> Option<GestureKind> {
        self.session.as_ref().map(|s| s.kind)
    }

    /// Whether an open resize gesture affects the given layer.
    #[must_use]
    pub fn is_resizing(&self, id: LayerId) -> bool {
        self.session.as_ref().is_some_and(|s| {
            matches!(s.kind, GestureKind::Resize(_)) && s.initial_layers.iter().any(|l| l.id == id)
        })
    }

    /// Open a gesture on the given layers.
    ///
    /// Captures clones of every affected unlocked layer, the pivot, and
    /// the viewport; the duplicate modifier is latched here and consulted
    /// only at `end()`.
    ///
    /// # Errors
    ///
    /// Returns an error if a gesture is already open, a layer ID is
    /// unknown, or every named layer is locked.
    pub fn begin(
        &mut self,
        board: &Artboard,
        kind: GestureKind,
        layer_ids: &[LayerId],
        pointer: Point,
        viewport: Viewport,
        modifiers: Modifiers,
    ) -> ArtboardResult<()> {
        if self.session.is_some() {
            return Err(ArtboardError::InvalidOperation(
                "a gesture is already open".to_string(),
            ));
        }

        let mut initial_layers = Vec::with_capacity(layer_ids.len());
        for id in layer_ids {
            let layer = board
                .layer(*id)
                .ok_or_else(|| ArtboardError::LayerNotFound(id.to_string()))?;
            if !layer.locked {
                initial_layers.push(layer.clone());
            }
        }
        let Some(primary) = initial_layers.first().map(|l| l.id) else {
            return Err(ArtboardError::InvalidOperation(
                "no unlocked layers to transform".to_string(),
            ));
        };

        let (pivot, group_box) = if initial_layers.len() > 1 {
            let bounds = geometry::group_box(initial_layers.iter().map(|l| &l.frame));
            (bounds.center(), Some(bounds))
        } else {
            (initial_layers[0].frame.center(), None)
        };

        let duplicate_on_end =
            kind == GestureKind::Move && modifiers.alt && initial_layers.len() == 1;

        tracing::debug!(
            "gesture begin: {kind:?} on {} layer(s), duplicate={duplicate_on_end}",
            initial_layers.len()
        );

        self.session = Some(InteractionSession {
            kind,
            pointer_start: pointer,
            initial_layers,
            primary,
            pivot,
            group_box,
            viewport,
            axis_lock: None,
            duplicate_on_end,
        });
        Ok(())
    }

    /// Advance the open gesture to a new pointer position.
    ///
    /// Targets are recomputed from the captured initial frames plus the
    /// cumulative delta, never incrementally. Returns the guides matched
    /// by snapping, for highlighting. A call with no open gesture or a
    /// degenerate captured zoom is a no-op.
    pub fn update(
        &mut self,
        board: &mut Artboard,
        pointer: Point,
        modifiers: Modifiers,
        settings: &GuideSettings,
    ) -> SnapLines {
        let Some(session) = self.session.as_mut() else {
            return SnapLines::default();
        };
        let zoom = session.viewport.zoom;
        if !zoom.is_finite() || zoom <= 0.0 {
            return SnapLines::default();
        }

        let dx = (pointer.x - session.pointer_start.x) / zoom;
        let dy = (pointer.y - session.pointer_start.y) / zoom;

        let (updates, lines) = match session.kind {
            GestureKind::Move => move_updates(session, dx, dy, modifiers, board.guides(), settings),
            GestureKind::Resize(handle) => {
                let updates = if session.is_group() {
                    group_resize_updates(session, handle, dx, dy)
                } else {
                    vec![resize_single(&session.initial_layers[0], handle, dx, dy, modifiers)]
                };
                (updates, SnapLines::default())
            }
            GestureKind::Rotate => (rotate_updates(session, pointer), SnapLines::default()),
        };

        for updated in updates {
            if let Some(slot) = board.layer_mut(updated.id) {
                *slot = updated;
            }
        }
        lines
    }

    /// Close the open gesture and commit one snapshot to history.
    ///
    /// A duplicate-flagged move restores the source layer to its captured
    /// frame, inserts the copy at the final dragged frame, and returns the
    /// new layer's ID. A call with no open gesture is a no-op.
    pub fn end(&mut self, board: &mut Artboard, history: &mut dyn History) -> Option<LayerId> {
        let session = self.session.take()?;

        let mut created = None;
        if session.duplicate_on_end && session.kind == GestureKind::Move {
            let initial = session.primary_initial();
            if let Some(source) = board.layer_mut(initial.id) {
                let final_frame = source.frame;
                source.frame = initial.frame;
                match board.duplicate_layer_at(initial.id, final_frame) {
                    Ok(id) => {
                        tracing::debug!("duplicate-on-move created layer {id}");
                        created = Some(id);
                    }
                    Err(e) => tracing::warn!("duplicate-on-move failed: {e}"),
                }
            }
        }

        history.commit(board.layers());
        tracing::debug!("gesture end: committed {} layers", board.layer_count());
        created
    }

    /// Abort the open gesture, restoring every captured layer. Commits
    /// nothing. A call with no open gesture is a no-op.
    pub fn cancel(&mut self, board: &mut Artboard) {
        if let Some(session) = self.session.take() {
            for initial in session.initial_layers {
                if let Some(slot) = board.layer_mut(initial.id) {
                    *slot = initial;
                }
            }
            tracing::debug!("gesture cancelled, initial frames restored");
        }
    }
}

/// Compute translated layers for a move gesture, including axis lock and
/// guide snapping against the primary layer's frame.
fn move_updates(
    session: &mut InteractionSession,
    dx: f32,
    dy: f32,
    modifiers: Modifiers,
    guides: &[artboard_core::Guide],
    settings: &GuideSettings,
) -> (Vec<Layer>, SnapLines) {
    let (mut fdx, mut fdy) = (dx, dy);

    if modifiers.shift {
        if session.axis_lock.is_none() && dx.abs().max(dy.abs()) > AXIS_LOCK_THRESHOLD {
            session.axis_lock = Some(if dx.abs() > dy.abs() {
                Axis::Horizontal
            } else {
                Axis::Vertical
            });
        }
        match session.axis_lock {
            Some(Axis::Horizontal) => fdy = 0.0,
            Some(Axis::Vertical) => fdx = 0.0,
            None => {}
        }
    }

    let primary = session.primary_initial().frame;
    let mut target = Point::new(primary.x + fdx, primary.y + fdy);
    let mut lines = SnapLines::default();

    if settings.snap_to_guides && !guides.is_empty() {
        let (snapped, matched) = snap::snap_move_target(
            primary.width,
            primary.height,
            target,
            guides,
            session.viewport.zoom,
        );
        target = snapped;
        lines = matched;
    }

    let fdx = target.x - primary.x;
    let fdy = target.y - primary.y;

    let updates = session
        .initial_layers
        .iter()
        .map(|l| {
            let mut updated = l.clone();
            updated.frame.x += fdx;
            updated.frame.y += fdy;
            updated
        })
        .collect();
    (updates, lines)
}

/// Rotate the pointer delta into a frame's local (unrotated) axes.
fn local_delta(rotation: f32, dx: f32, dy: f32) -> (f32, f32, f32, f32) {
    let (sin, cos) = rotation.to_radians().sin_cos();
    (dx * cos + dy * sin, -dx * sin + dy * cos, sin, cos)
}

/// Apply a handle drag to local width/height.
fn apply_handle(handle: Handle, width: f32, height: f32, rdx: f32, rdy: f32) -> (f32, f32) {
    let mut w = width;
    let mut h = height;
    if handle.affects_right() {
        w += rdx;
    }
    if handle.affects_left() {
        w -= rdx;
    }
    if handle.affects_bottom() {
        h += rdy;
    }
    if handle.affects_top() {
        h -= rdy;
    }
    (w, h)
}

/// Center shift keeping the edge/corner opposite the handle fixed, in the
/// frame's local axes.
fn center_shift(handle: Handle, dw: f32, dh: f32) -> (f32, f32) {
    let mut cx = 0.0;
    let mut cy = 0.0;
    if handle.affects_left() {
        cx = -dw / 2.0;
    }
    if handle.affects_right() {
        cx = dw / 2.0;
    }
    if handle.affects_top() {
        cy = -dh / 2.0;
    }
    if handle.affects_bottom() {
        cy = dh / 2.0;
    }
    (cx, cy)
}

/// Resize a single layer, dispatching to the text hook for text layers.
fn resize_single(initial: &Layer, handle: Handle, dx: f32, dy: f32, modifiers: Modifiers) -> Layer {
    if initial.is_text() {
        resize_text(initial, handle, dx, dy)
    } else {
        let mut updated = initial.clone();
        updated.frame = resize_frame(initial.frame, handle, dx, dy, modifiers.shift);
        updated
    }
}

/// Generic frame resize: delta mapped into the layer's local axes, sizes
/// clamped, the opposite edge/corner fixed in world space.
fn resize_frame(initial: Frame, handle: Handle, dx: f32, dy: f32, aspect_lock: bool) -> Frame {
    let (rdx, rdy, sin, cos) = local_delta(initial.rotation, dx, dy);
    let (mut w, mut h) = apply_handle(handle, initial.width, initial.height, rdx, rdy);
    w = w.max(MIN_LAYER_SIZE);
    h = h.max(MIN_LAYER_SIZE);

    if aspect_lock {
        let ratio = initial.width / initial.height;
        // Degenerate initial dimensions skip the ratio math entirely.
        if ratio.is_finite() && ratio > 0.0 {
            if w / h > ratio {
                w = h * ratio;
            } else {
                h = w / ratio;
            }
        }
    }

    let (cx, cy) = center_shift(handle, w - initial.width, h - initial.height);
    let center = initial.center();
    let world_shift = Point::new(cx * cos - cy * sin, cx * sin + cy * cos);

    let mut out = initial;
    out.width = w;
    out.height = h;
    out.set_center(Point::new(center.x + world_shift.x, center.y + world_shift.y));
    out
}

/// Text resize hook: aspect ratio always holds (dominant axis from the
/// handle), and the width scale factor is applied uniformly to the base
/// font size and every span override so font and box scale together.
fn resize_text(initial: &Layer, handle: Handle, dx: f32, dy: f32) -> Layer {
    let frame = initial.frame;
    let (rdx, rdy, sin, cos) = local_delta(frame.rotation, dx, dy);
    let (mut w, mut h) = apply_handle(handle, frame.width, frame.height, rdx, rdy);
    w = w.max(MIN_LAYER_SIZE);
    h = h.max(MIN_LAYER_SIZE);

    let ratio = frame.width / frame.height;
    if ratio.is_finite() && ratio > 0.0 {
        if handle.is_horizontal() && !handle.is_vertical() {
            h = w / ratio;
        } else if handle.is_vertical() && !handle.is_horizontal() {
            w = h * ratio;
        } else if w / h > ratio {
            w = h * ratio;
        } else {
            h = w / ratio;
        }
    }

    let scale = if frame.width > 0.0 && frame.width.is_finite() {
        w / frame.width
    } else {
        1.0
    };
    if !scale.is_finite() || scale <= 0.0 {
        return initial.clone();
    }

    let final_w = frame.width * scale;
    let final_h = frame.height * scale;
    let (cx, cy) = center_shift(handle, final_w - frame.width, final_h - frame.height);
    let center = frame.center();
    let world_shift = Point::new(cx * cos - cy * sin, cx * sin + cy * cos);

    let mut updated = initial.clone();
    updated.frame.width = final_w;
    updated.frame.height = final_h;
    updated
        .frame
        .set_center(Point::new(center.x + world_shift.x, center.y + world_shift.y));
    if let Some(content) = updated.as_text_mut() {
        content.scale_font(scale);
    }
    updated
}

/// Compute rotated layers for a rotate gesture.
///
/// The angle comes from atan2 of the pointer against the pivot in screen
/// space, plus the fixed handle offset. Groups rotate rigidly: every
/// center orbits the shared pivot and every rotation increments by the
/// same angle.
fn rotate_updates(session: &InteractionSession, pointer: Point) -> Vec<Layer> {
    let screen_pivot = session.viewport.to_screen(session.pivot);
    let angle = (pointer.y - screen_pivot.y)
        .atan2(pointer.x - screen_pivot.x)
        .to_degrees()
        + ROTATION_HANDLE_OFFSET;

    if session.is_group() {
        session
            .initial_layers
            .iter()
            .map(|l| {
                let mut updated = l.clone();
                let center = l.frame.center().rotated_about(session.pivot, angle);
                updated.frame.set_center(center);
                updated.frame.rotation += angle;
                updated
            })
            .collect()
    } else {
        let mut updated = session.initial_layers[0].clone();
        updated.frame.rotation = angle;
        vec![updated]
    }
}

/// Compute scaled layers for a group resize.
///
/// One anisotropic scale pair derives from the group box change; every
/// layer's size multiplies by it and every center is repositioned by
/// scaling its offset from the group pivot, reproducing one rigid scaling
/// of the formation. The group box is axis-aligned, so no local/world
/// mapping is needed.
fn group_resize_updates(
    session: &InteractionSession,
    handle: Handle,
    dx: f32,
    dy: f32,
) -> Vec<Layer> {
    let Some(bounds) = session.group_box else {
        return Vec::new();
    };
    if !(bounds.width > 0.0 && bounds.width.is_finite())
        || !(bounds.height > 0.0 && bounds.height.is_finite())
    {
        // Degenerate group box: skip the scale math.
        return session.initial_layers.clone();
    }

    let (mut w, mut h) = apply_handle(handle, bounds.width, bounds.height, dx, dy);
    w = w.max(MIN_GROUP_SIZE);
    h = h.max(MIN_GROUP_SIZE);
    let scale_x = w / bounds.width;
    let scale_y = h / bounds.height;

    let (cx, cy) = center_shift(handle, w - bounds.width, h - bounds.height);
    let pivot = bounds.center();
    let new_pivot = Point::new(pivot.x + cx, pivot.y + cy);

    session
        .initial_layers
        .iter()
        .map(|l| {
            let center = l.frame.center();
            let rel = Point::new(center.x - pivot.x, center.y - pivot.y);
            let mut updated = l.clone();
            updated.frame.width = l.frame.width * scale_x;
            updated.frame.height = l.frame.height * scale_y;
            updated.frame.set_center(Point::new(
                new_pivot.x + rel.x * scale_x,
                new_pivot.y + rel.y * scale_y,
            ));
            updated
        })
        .collect()
}
