//! The artboard: a sized canvas holding layers and guides.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ArtboardError, ArtboardResult};
use crate::geometry::Point;
use crate::guide::{Guide, GuideId};
use crate::layer::{Layer, LayerId};

/// Unique identifier for an artboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtboardId(Uuid);

impl ArtboardId {
    /// Create a new unique artboard ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ArtboardId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ArtboardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Offset applied to keyboard-duplicated layers.
const DUPLICATE_OFFSET: f32 = 10.0;

/// An artboard containing all composition layers and guides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artboard {
    /// Unique identifier.
    pub id: ArtboardId,
    /// Display name.
    pub name: String,
    /// Width in artboard units.
    pub width: f32,
    /// Height in artboard units.
    pub height: f32,
    /// Background color as hex.
    pub background_color: String,
    /// All layers, unordered; stacking comes from each layer's z-index.
    layers: Vec<Layer>,
    /// Alignment guides.
    guides: Vec<Guide>,
}

impl Artboard {
    /// Create a new empty artboard.
    #[must_use]
    pub fn new(name: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            id: ArtboardId::new(),
            name: name.into(),
            width,
            height,
            background_color: "#0f172a".to_string(),
            layers: Vec::new(),
            guides: Vec::new(),
        }
    }

    /// Add a layer on top of the stack, returning its ID.
    pub fn add_layer(&mut self, mut layer: Layer) -> LayerId {
        layer.z_index = self.next_z();
        let id = layer.id;
        self.layers.push(layer);
        id
    }

    /// Remove a layer.
    ///
    /// # Errors
    ///
    /// Returns an error if the layer is not found.
    pub fn remove_layer(&mut self, id: LayerId) -> ArtboardResult<Layer> {
        let index = self
            .layers
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| ArtboardError::LayerNotFound(id.to_string()))?;
        Ok(self.layers.remove(index))
    }

    /// Get a layer by ID.
    #[must_use]
    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Get a mutable reference to a layer by ID.
    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id == id)
    }

    /// All layers, in insertion order.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Mutable access to all layers.
    pub fn layers_mut(&mut self) -> impl Iterator<Item = &mut Layer> {
        self.layers.iter_mut()
    }

    /// Layers sorted bottom-to-top by z-index.
    #[must_use]
    pub fn layers_z_sorted(&self) -> Vec<&Layer> {
        let mut sorted: Vec<&Layer> = self.layers.iter().collect();
        sorted.sort_by_key(|l| l.z_index);
        sorted
    }

    /// The number of layers.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// The highest z-index in use, or -1 when empty.
    #[must_use]
    pub fn max_z(&self) -> i32 {
        self.layers.iter().map(|l| l.z_index).max().unwrap_or(-1)
    }

    fn next_z(&self) -> i32 {
        self.max_z() + 1
    }

    /// Duplicate a layer: fresh ID, unlocked, offset by (10, 10), inserted
    /// directly above the source in stacking order with z-indices
    /// reindexed.
    ///
    /// # Errors
    ///
    /// Returns an error if the source layer is not found.
    pub fn duplicate_layer(&mut self, id: LayerId) -> ArtboardResult<LayerId> {
        let source = self
            .layer(id)
            .ok_or_else(|| ArtboardError::LayerNotFound(id.to_string()))?;

        let mut copy = source.clone();
        copy.id = LayerId::new();
        copy.locked = false;
        copy.frame.x += DUPLICATE_OFFSET;
        copy.frame.y += DUPLICATE_OFFSET;
        let copy_id = copy.id;

        self.insert_above(id, copy);
        tracing::debug!("duplicated layer {id} as {copy_id}");
        Ok(copy_id)
    }

    /// Duplicate a layer at an explicit frame: fresh ID, unlocked,
    /// inserted directly above the source in stacking order.
    ///
    /// Used by duplicate-on-move, where the copy lands at the final
    /// dragged position instead of the keyboard offset.
    ///
    /// # Errors
    ///
    /// Returns an error if the source layer is not found.
    pub fn duplicate_layer_at(
        &mut self,
        id: LayerId,
        frame: crate::geometry::Frame,
    ) -> ArtboardResult<LayerId> {
        let source = self
            .layer(id)
            .ok_or_else(|| ArtboardError::LayerNotFound(id.to_string()))?;

        let mut copy = source.clone();
        copy.id = LayerId::new();
        copy.locked = false;
        copy.frame = frame;
        let copy_id = copy.id;

        self.insert_above(id, copy);
        tracing::debug!("duplicated layer {id} as {copy_id} at explicit frame");
        Ok(copy_id)
    }

    /// Insert `layer` directly above `anchor` in stacking order and
    /// reindex every z-index to 0..n in visual order.
    fn insert_above(&mut self, anchor: LayerId, layer: Layer) {
        let mut order: Vec<LayerId> = self.layers_z_sorted().iter().map(|l| l.id).collect();
        let at = order
            .iter()
            .position(|&lid| lid == anchor)
            .map_or(order.len(), |i| i + 1);
        order.insert(at, layer.id);
        self.layers.push(layer);

        for (z, lid) in order.iter().enumerate() {
            if let Some(l) = self.layer_mut(*lid) {
                l.z_index = i32::try_from(z).unwrap_or(i32::MAX);
            }
        }
    }

    /// Shift the given layers by (dx, dy). Unknown IDs are skipped.
    pub fn nudge_layers(&mut self, ids: &[LayerId], dx: f32, dy: f32) {
        for layer in &mut self.layers {
            if ids.contains(&layer.id) && !layer.locked {
                layer.frame.x += dx;
                layer.frame.y += dy;
            }
        }
    }

    /// Find the topmost visible layer containing the given artboard point,
    /// rotation taken into account.
    #[must_use]
    pub fn layer_at(&self, point: Point) -> Option<LayerId> {
        self.layers_z_sorted()
            .iter()
            .rev()
            .find(|l| l.visible && l.frame.contains(point))
            .map(|l| l.id)
    }

    /// Add a guide, returning its ID.
    pub fn add_guide(&mut self, guide: Guide) -> GuideId {
        let id = guide.id;
        self.guides.push(guide);
        id
    }

    /// Remove a guide.
    ///
    /// # Errors
    ///
    /// Returns an error if the guide is not found.
    pub fn remove_guide(&mut self, id: GuideId) -> ArtboardResult<Guide> {
        let index = self
            .guides
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| ArtboardError::GuideNotFound(id.to_string()))?;
        Ok(self.guides.remove(index))
    }

    /// All guides, in creation order.
    #[must_use]
    pub fn guides(&self) -> &[Guide] {
        &self.guides
    }
}
