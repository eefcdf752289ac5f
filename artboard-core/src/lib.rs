//! # Artboard Studio Core
//!
//! Document model for the Artboard Studio composition editor: artboards
//! containing positioned, rotatable layers (text, image, shape, line) plus
//! the geometry and rich-text span math the interactive editor builds on.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               artboard-core                 │
//! ├─────────────────────────────────────────────┤
//! │  Document        │  Geometry                │
//! │  - Artboard      │  - Frames & corners      │
//! │  - Layers        │  - Group bounds (AABB)   │
//! │  - Guides        │  - Screen ↔ board        │
//! ├─────────────────────────────────────────────┤
//! │  Text Spans      │  Selection               │
//! │  - Range styling │  - Character ranges      │
//! │  - Merge/split   │  - Resolved snapshots    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Interaction state (gestures, snapping, auto-fit) lives in
//! `artboard-editor`; this crate holds no transient state.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod board;
pub mod error;
pub mod geometry;
pub mod guide;
pub mod layer;
pub mod selection;
pub mod span;

pub use board::{Artboard, ArtboardId};
pub use error::{ArtboardError, ArtboardResult};
pub use geometry::{group_box, Frame, Point, Rect, Viewport};
pub use guide::{Guide, GuideId, GuideSettings, Orientation};
pub use layer::{
    CapShape, GlowStyle, Layer, LayerId, LayerKind, LineCap, ShadowStyle, ShapeKind, Stroke,
    TextAlign, TextContent,
};
pub use selection::{SelectionState, SelectionStyles};
pub use span::{
    apply_style, merge_spans, remove_range, spans_in_range, style_state, text_len, text_of,
    CharRange, Patch, PropertyState, Span, SpanStyle, StyleDelta, StyleState, TextScript,
    TextTransform, ToggleField,
};

/// Core crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
