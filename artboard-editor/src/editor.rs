//! The editing surface the UI/input layer drives.
//!
//! [`Editor`] owns the working artboard, the transform controller, the
//! layer and text selections, and the guide settings. Every completed
//! operation commits exactly one snapshot to the history collaborator;
//! live gesture updates commit nothing.

use artboard_core::{
    Artboard, ArtboardError, ArtboardResult, CharRange, Guide, GuideId, GuideSettings, Layer,
    LayerId, Point, SelectionState, Span, StyleDelta, ToggleField, Viewport,
};

use crate::autofit;
use crate::controller::TransformController;
use crate::history::History;
use crate::measure::TextMeasurer;
use crate::session::{GestureKind, Modifiers};
use crate::snap::SnapLines;
use crate::split;

/// Single-artboard editing session over a measurement and a history
/// collaborator.
#[derive(Debug)]
pub struct Editor<M: TextMeasurer, H: History> {
    board: Artboard,
    controller: TransformController,
    viewport: Viewport,
    guide_settings: GuideSettings,
    selected: Vec<LayerId>,
    selection: Option<SelectionState>,
    editing_text: Option<LayerId>,
    measurer: M,
    history: H,
}

impl<M: TextMeasurer, H: History> Editor<M, H> {
    /// Create an editor over the given artboard.
    #[must_use]
    pub fn new(board: Artboard, measurer: M, history: H) -> Self {
        Self {
            board,
            controller: TransformController::new(),
            viewport: Viewport::default(),
            guide_settings: GuideSettings::default(),
            selected: Vec::new(),
            selection: None,
            editing_text: None,
            measurer,
            history,
        }
    }

    /// The working artboard.
    #[must_use]
    pub fn board(&self) -> &Artboard {
        &self.board
    }

    /// Consume the editor, returning the artboard.
    #[must_use]
    pub fn into_board(self) -> Artboard {
        self.board
    }

    /// The history collaborator.
    #[must_use]
    pub fn history(&self) -> &H {
        &self.history
    }

    /// Currently selected layer IDs.
    #[must_use]
    pub fn selected_ids(&self) -> &[LayerId] {
        &self.selected
    }

    /// The active text selection, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&SelectionState> {
        self.selection.as_ref()
    }

    /// The layer being text-edited, if any.
    #[must_use]
    pub fn editing_layer(&self) -> Option<LayerId> {
        self.editing_text
    }

    /// Whether a gesture is open.
    #[must_use]
    pub fn gesture_active(&self) -> bool {
        self.controller.is_active()
    }

    /// Update the screen↔board mapping used by subsequent gestures.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// The current viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Update guide behavior switches.
    pub fn set_guide_settings(&mut self, settings: GuideSettings) {
        self.guide_settings = settings;
    }

    /// Current guide behavior switches.
    #[must_use]
    pub fn guide_settings(&self) -> GuideSettings {
        self.guide_settings
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Replace the layer selection. Unknown IDs are dropped; the text
    /// selection is cleared unless exactly the same single layer stays
    /// selected.
    pub fn select(&mut self, ids: &[LayerId]) {
        let filtered: Vec<LayerId> = ids
            .iter()
            .copied()
            .filter(|id| self.board.layer(*id).is_some())
            .collect();
        self.selected = filtered;

        match self.selected.as_slice() {
            [only] => {
                if self.selection.as_ref().is_some_and(|s| s.layer_id != *only) {
                    self.selection = None;
                }
            }
            _ => self.selection = None,
        }
        if let Some(editing) = self.editing_text {
            if !self.selected.contains(&editing) {
                self.editing_text = None;
            }
        }
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
        self.selection = None;
        self.editing_text = None;
    }

    /// Set the text selection range inside the single selected text
    /// layer. Out-of-bounds indices are clamped; anything but a single
    /// selected text layer clears the selection.
    pub fn set_text_selection(&mut self, range: CharRange) {
        let [id] = self.selected.as_slice() else {
            self.selection = None;
            return;
        };
        let id = *id;
        let Some(content) = self.board.layer(id).and_then(Layer::as_text) else {
            self.selection = None;
            return;
        };
        let len = content.char_len();
        let clamped = CharRange::new(range.start.min(len), range.end.min(len));
        self.selection = Some(SelectionState::for_range(
            id,
            content,
            clamped,
            !clamped.is_empty(),
        ));
    }

    /// Drop the text selection, keeping the layer selection.
    pub fn clear_text_selection(&mut self) {
        self.selection = None;
    }

    // ------------------------------------------------------------------
    // Gestures
    // ------------------------------------------------------------------

    /// Open a gesture on the given layers; they become the selection.
    ///
    /// # Errors
    ///
    /// Returns an error while text editing is active, when a gesture is
    /// already open, or for unknown/locked layers.
    pub fn begin_gesture(
        &mut self,
        kind: GestureKind,
        layer_ids: &[LayerId],
        pointer: Point,
        modifiers: Modifiers,
    ) -> ArtboardResult<()> {
        if self.editing_text.is_some() {
            return Err(ArtboardError::InvalidOperation(
                "cannot start a gesture while editing text".to_string(),
            ));
        }
        self.controller
            .begin(&self.board, kind, layer_ids, pointer, self.viewport, modifiers)?;
        self.select(layer_ids);
        Ok(())
    }

    /// Advance the open gesture; returns matched guides for highlighting.
    pub fn pointer_move(&mut self, pointer: Point, modifiers: Modifiers) -> SnapLines {
        self.controller
            .update(&mut self.board, pointer, modifiers, &self.guide_settings)
    }

    /// Close the open gesture, committing one snapshot. A duplicate-
    /// flagged move returns the created layer, which becomes the
    /// selection.
    pub fn end_gesture(&mut self) -> Option<LayerId> {
        let created = self.controller.end(&mut self.board, &mut self.history);
        if let Some(id) = created {
            self.select(&[id]);
        }
        created
    }

    /// Abort the open gesture, restoring captured frames.
    pub fn cancel_gesture(&mut self) {
        self.controller.cancel(&mut self.board);
    }

    // ------------------------------------------------------------------
    // Text editing
    // ------------------------------------------------------------------

    /// Enter text editing on a layer; it becomes the sole selection.
    /// Auto-fit is suppressed until editing ends.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown, locked or non-text layers.
    pub fn begin_text_editing(&mut self, id: LayerId) -> ArtboardResult<()> {
        let layer = self
            .board
            .layer(id)
            .ok_or_else(|| ArtboardError::LayerNotFound(id.to_string()))?;
        if !layer.is_text() {
            return Err(ArtboardError::InvalidOperation(
                "cannot edit a non-text layer".to_string(),
            ));
        }
        if layer.locked {
            return Err(ArtboardError::InvalidOperation(
                "cannot edit a locked layer".to_string(),
            ));
        }
        self.selected = vec![id];
        self.editing_text = Some(id);
        Ok(())
    }

    /// Leave text editing, refitting the edited layer's box.
    pub fn end_text_editing(&mut self) {
        if let Some(id) = self.editing_text.take() {
            if self.refit(id) {
                self.history.commit(self.board.layers());
            }
        }
        self.selection = None;
    }

    /// Replace a text layer's spans (the host's text-input path).
    /// Re-canonicalizes, refits the box, and commits.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown or non-text layers.
    pub fn set_layer_spans(&mut self, id: LayerId, spans: Vec<Span>) -> ArtboardResult<()> {
        let layer = self
            .board
            .layer_mut(id)
            .ok_or_else(|| ArtboardError::LayerNotFound(id.to_string()))?;
        let Some(content) = layer.as_text_mut() else {
            return Err(ArtboardError::InvalidOperation(
                "cannot set spans on a non-text layer".to_string(),
            ));
        };
        content.set_spans(spans);
        // Arbitrary text replacement invalidates any held range.
        self.selection = None;
        self.refit(id);
        self.history.commit(self.board.layers());
        Ok(())
    }

    /// Apply a style delta to the active text range (the whole layer when
    /// nothing is range-selected). No-op without a single selected text
    /// layer.
    pub fn apply_style_to_selection(&mut self, delta: &StyleDelta) {
        let Some((id, range)) = self.active_text_target() else {
            return;
        };
        let Some(content) = self.board.layer_mut(id).and_then(Layer::as_text_mut) else {
            return;
        };
        content.apply_style(range, delta);
        self.refit(id);
        self.refresh_selection();
        self.history.commit(self.board.layers());
    }

    /// Toggle a style field over the active text range (the whole layer
    /// when nothing is range-selected): uniformly-on clears it, anything
    /// else sets it everywhere in range.
    pub fn toggle_style(&mut self, field: ToggleField) {
        let [id] = self.selected.as_slice() else {
            return;
        };
        let id = *id;
        let range = match &self.selection {
            Some(sel) if sel.has_selection && sel.layer_id == id => Some(sel.range),
            _ => None,
        };
        let Some(content) = self.board.layer_mut(id).and_then(Layer::as_text_mut) else {
            return;
        };
        content.toggle(field, range);
        self.refit(id);
        self.refresh_selection();
        self.history.commit(self.board.layers());
    }

    /// Extract the active text selection into a new layer, which becomes
    /// the selection. Returns the new layer's ID, or `None` without an
    /// active range selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the source layer vanished or is not text.
    pub fn split_selected_range(&mut self) -> ArtboardResult<Option<LayerId>> {
        let Some((layer_id, range, has_selection)) = self
            .selection
            .as_ref()
            .map(|s| (s.layer_id, s.range, s.has_selection))
        else {
            return Ok(None);
        };
        if !has_selection {
            return Ok(None);
        }

        let created = split::split_text_layer(&mut self.board, layer_id, range, &self.measurer)?;
        if let Some(new_id) = created {
            self.selection = None;
            self.refit(layer_id);
            self.select(&[new_id]);
            self.history.commit(self.board.layers());
        }
        Ok(created)
    }

    // ------------------------------------------------------------------
    // Layer management
    // ------------------------------------------------------------------

    /// Add a layer on top, fit it if it is text, and select it.
    pub fn add_layer(&mut self, layer: Layer) -> LayerId {
        let id = self.board.add_layer(layer);
        self.refit(id);
        self.select(&[id]);
        self.history.commit(self.board.layers());
        id
    }

    /// Duplicate every selected layer with the keyboard offset; the
    /// copies become the selection. One commit for the batch.
    pub fn duplicate_selected(&mut self) -> Vec<LayerId> {
        let mut created = Vec::new();
        for id in self.selected.clone() {
            match self.board.duplicate_layer(id) {
                Ok(copy) => created.push(copy),
                Err(e) => tracing::warn!("duplicate of {id} failed: {e}"),
            }
        }
        if !created.is_empty() {
            self.select(&created);
            self.history.commit(self.board.layers());
        }
        created
    }

    /// Delete every selected unlocked layer.
    pub fn delete_selected(&mut self) {
        let ids = std::mem::take(&mut self.selected);
        let mut removed = false;
        for id in ids {
            if self.board.layer(id).is_some_and(|l| l.locked) {
                continue;
            }
            match self.board.remove_layer(id) {
                Ok(_) => removed = true,
                Err(e) => tracing::warn!("delete of {id} failed: {e}"),
            }
        }
        self.selection = None;
        self.editing_text = None;
        if removed {
            self.history.commit(self.board.layers());
        }
    }

    /// Shift the selected layers by (dx, dy) — the arrow-key path.
    pub fn nudge_selected(&mut self, dx: f32, dy: f32) {
        if self.selected.is_empty() {
            return;
        }
        self.board.nudge_layers(&self.selected, dx, dy);
        self.history.commit(self.board.layers());
    }

    /// Add a guide. Guides are not part of layer history.
    pub fn add_guide(&mut self, guide: Guide) -> GuideId {
        self.board.add_guide(guide)
    }

    /// Remove a guide.
    ///
    /// # Errors
    ///
    /// Returns an error if the guide is unknown.
    pub fn remove_guide(&mut self, id: GuideId) -> ArtboardResult<Guide> {
        self.board.remove_guide(id)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// The single selected text layer and the range style operations act
    /// on: the held selection range, or the whole text.
    fn active_text_target(&self) -> Option<(LayerId, CharRange)> {
        let [id] = self.selected.as_slice() else {
            return None;
        };
        let id = *id;
        let content = self.board.layer(id)?.as_text()?;
        let range = match &self.selection {
            Some(sel) if sel.has_selection && sel.layer_id == id => sel.range,
            _ => CharRange::new(0, content.char_len()),
        };
        Some((id, range))
    }

    /// Refit a text layer unless it is being edited or resized.
    fn refit(&mut self, id: LayerId) -> bool {
        if self.editing_text == Some(id) || self.controller.is_resizing(id) {
            return false;
        }
        let Some(layer) = self.board.layer_mut(id) else {
            return false;
        };
        autofit::fit_text_layer(layer, &self.measurer)
    }

    /// Rebuild the selection's style snapshot after a mutation.
    fn refresh_selection(&mut self) {
        let Some((id, range, has_selection)) = self
            .selection
            .as_ref()
            .map(|s| (s.layer_id, s.range, s.has_selection))
        else {
            return;
        };
        self.selection = self
            .board
            .layer(id)
            .and_then(Layer::as_text)
            .map(|content| SelectionState::for_range(id, content, range, has_selection));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::SnapshotHistory;
    use crate::measure::HeuristicMeasurer;
    use artboard_core::{
        Frame, LayerKind, Patch, PropertyState, StyleState, TextAlign, TextContent,
    };

    fn editor_with_text(text: &str) -> (Editor<HeuristicMeasurer, SnapshotHistory>, LayerId) {
        let mut board = Artboard::new("test", 1080.0, 1080.0);
        let mut content = TextContent::new(text);
        content.font_size = 10.0;
        content.align = TextAlign::Left;
        let id = board.add_layer(
            Layer::new(LayerKind::Text(content)).with_frame(Frame::new(0.0, 0.0, 100.0, 20.0)),
        );
        let mut editor = Editor::new(board, HeuristicMeasurer::new(), SnapshotHistory::new());
        editor.select(&[id]);
        (editor, id)
    }

    #[test]
    fn test_selection_cleared_on_multi_select() {
        let (mut editor, id) = editor_with_text("hello");
        editor.set_text_selection(CharRange::new(0, 3));
        assert!(editor.selection().is_some());

        let other = {
            let mut layer = Layer::new(LayerKind::Image {
                src: "img.png".to_string(),
            });
            layer.frame = Frame::new(0.0, 0.0, 50.0, 50.0);
            editor.add_layer(layer)
        };
        editor.select(&[id, other]);
        assert!(editor.selection().is_none());

        editor.select(&[]);
        assert!(editor.selection().is_none());
        assert!(editor.selected_ids().is_empty());
    }

    #[test]
    fn test_set_text_selection_clamps_range() {
        let (mut editor, _) = editor_with_text("abc");
        editor.set_text_selection(CharRange::new(1, 99));
        let sel = editor.selection().expect("selection");
        assert_eq!(sel.range, CharRange::new(1, 3));
        assert!(sel.has_selection);
    }

    #[test]
    fn test_apply_style_uses_selection_range_and_commits_once() {
        let (mut editor, id) = editor_with_text("hello world");
        editor.set_text_selection(CharRange::new(0, 5));
        editor.apply_style_to_selection(&StyleDelta {
            color: Patch::Set("#ff0000".to_string()),
            ..StyleDelta::default()
        });

        assert_eq!(editor.history().len(), 1);
        let content = editor
            .board()
            .layer(id)
            .expect("layer")
            .as_text()
            .expect("text");
        assert_eq!(
            content.color_state(CharRange::new(0, 5)),
            PropertyState::Uniform("#ff0000".to_string())
        );
        assert_eq!(content.color_state(CharRange::new(0, 11)), PropertyState::Mixed);
        // The snapshot was refreshed in place.
        assert_eq!(
            editor.selection().expect("selection").styles.color,
            PropertyState::Uniform("#ff0000".to_string())
        );
    }

    #[test]
    fn test_apply_style_without_range_covers_whole_layer() {
        let (mut editor, id) = editor_with_text("hello");
        editor.apply_style_to_selection(&StyleDelta {
            underline: Patch::Set(true),
            ..StyleDelta::default()
        });
        let content = editor
            .board()
            .layer(id)
            .expect("layer")
            .as_text()
            .expect("text");
        assert_eq!(
            content.style_state(CharRange::new(0, 5), ToggleField::Underline),
            StyleState::On
        );
    }

    #[test]
    fn test_toggle_style_round_trip_over_selection() {
        let (mut editor, id) = editor_with_text("hello");
        editor.set_text_selection(CharRange::new(1, 4));
        editor.toggle_style(ToggleField::Underline);
        editor.toggle_style(ToggleField::Underline);
        let content = editor
            .board()
            .layer(id)
            .expect("layer")
            .as_text()
            .expect("text");
        assert_eq!(
            content.style_state(CharRange::new(0, 5), ToggleField::Underline),
            StyleState::Off
        );
        assert_eq!(content.spans.len(), 1);
        assert_eq!(editor.history().len(), 2);
    }

    #[test]
    fn test_split_selected_range_creates_and_selects_new_layer() {
        let (mut editor, id) = editor_with_text("hello world");
        editor.set_text_selection(CharRange::new(6, 11));
        let new_id = editor
            .split_selected_range()
            .expect("split")
            .expect("new layer");

        assert_eq!(editor.selected_ids(), &[new_id]);
        assert!(editor.selection().is_none());
        assert_eq!(editor.history().len(), 1);
        let source = editor
            .board()
            .layer(id)
            .expect("source")
            .as_text()
            .expect("text");
        assert_eq!(source.text(), "hello ");
    }

    #[test]
    fn test_split_without_range_selection_is_noop() {
        let (mut editor, _) = editor_with_text("hello");
        assert!(editor.split_selected_range().expect("split").is_none());
        assert_eq!(editor.board().layer_count(), 1);
        assert!(editor.history().is_empty());
    }

    #[test]
    fn test_style_edits_trigger_autofit() {
        let (mut editor, id) = editor_with_text("abcd");
        // 4 chars × 10 × 0.6 + 4 = 28 wide, 12 tall.
        editor.apply_style_to_selection(&StyleDelta {
            font_size: Patch::Set(20.0),
            ..StyleDelta::default()
        });
        let frame = editor.board().layer(id).expect("layer").frame;
        // 4 chars × 20 × 0.6 + 4 = 52 wide; height keeps the base line
        // height plus padding.
        assert!((frame.width - 52.0).abs() < 1e-2);
    }

    #[test]
    fn test_autofit_suppressed_while_editing() {
        let (mut editor, id) = editor_with_text("abcd");
        editor.begin_text_editing(id).expect("edit");
        editor
            .set_layer_spans(id, vec![Span::new("a much longer replacement")])
            .expect("set spans");
        // Box untouched while editing.
        let frame = editor.board().layer(id).expect("layer").frame;
        assert!((frame.width - 100.0).abs() < 1e-3);

        editor.end_text_editing();
        let frame = editor.board().layer(id).expect("layer").frame;
        assert!((frame.width - (25.0 * 6.0 + 4.0)).abs() < 1e-2);
    }

    #[test]
    fn test_begin_gesture_rejected_while_editing() {
        let (mut editor, id) = editor_with_text("hello");
        editor.begin_text_editing(id).expect("edit");
        assert!(editor
            .begin_gesture(
                GestureKind::Move,
                &[id],
                Point::default(),
                Modifiers::default(),
            )
            .is_err());
    }

    #[test]
    fn test_gesture_through_editor_commits_once() {
        let (mut editor, id) = editor_with_text("hello");
        editor
            .begin_gesture(
                GestureKind::Move,
                &[id],
                Point::default(),
                Modifiers::default(),
            )
            .expect("begin");
        editor.pointer_move(Point::new(30.0, 40.0), Modifiers::default());
        editor.pointer_move(Point::new(35.0, 45.0), Modifiers::default());
        assert!(editor.gesture_active());
        editor.end_gesture();

        assert!(!editor.gesture_active());
        assert_eq!(editor.history().len(), 1);
        let frame = editor.board().layer(id).expect("layer").frame;
        assert!((frame.x - 35.0).abs() < 1e-3);
        assert!((frame.y - 45.0).abs() < 1e-3);
    }

    #[test]
    fn test_duplicate_and_delete_selected() {
        let (mut editor, id) = editor_with_text("hello");
        let created = editor.duplicate_selected();
        assert_eq!(created.len(), 1);
        assert_eq!(editor.selected_ids(), created.as_slice());
        assert_eq!(editor.board().layer_count(), 2);

        editor.delete_selected();
        assert_eq!(editor.board().layer_count(), 1);
        assert!(editor.board().layer(id).is_some());
    }

    #[test]
    fn test_nudge_commits_snapshot() {
        let (mut editor, id) = editor_with_text("hello");
        editor.nudge_selected(3.0, -2.0);
        let frame = editor.board().layer(id).expect("layer").frame;
        assert!((frame.x - 3.0).abs() < 1e-3);
        assert!((frame.y + 2.0).abs() < 1e-3);
        assert_eq!(editor.history().len(), 1);
    }
}
