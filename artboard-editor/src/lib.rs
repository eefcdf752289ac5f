//! # Artboard Studio Editor
//!
//! Interactive engine for Artboard Studio: pointer-driven move/resize/
//! rotate for single layers and groups, guide snapping, rich-text range
//! splitting, and auto-fit sizing of text boxes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              artboard-editor                │
//! ├─────────────────────────────────────────────┤
//! │  Editor facade   │  Transform Controller    │
//! │  - Selection     │  - begin/update/end      │
//! │  - Style ops     │  - 8-handle resize       │
//! │  - Commit policy │  - Group transforms      │
//! ├─────────────────────────────────────────────┤
//! │  Snap Engine     │  Text tools              │
//! │  - Guide match   │  - Range splitter        │
//! │  - Zoom-aware    │  - Auto-fit sizer        │
//! ├─────────────────────────────────────────────┤
//! │  Collaborator traits: TextMeasurer, History │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Everything runs synchronously inside the host's pointer-event
//! callbacks; a gesture owns one [`session`] record between `begin` and
//! `end`, and only `end` commits to history.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod autofit;
pub mod controller;
pub mod editor;
pub mod history;
pub mod measure;
pub mod session;
pub mod snap;
pub mod split;

pub use autofit::{fit_text_layer, FIT_THRESHOLD};
pub use controller::{TransformController, MIN_GROUP_SIZE, MIN_LAYER_SIZE};
pub use editor::Editor;
pub use history::{History, NullHistory, SnapshotHistory};
pub use measure::{HeuristicMeasurer, TextMeasurer, TextMetrics};
pub use session::{Axis, GestureKind, Handle, Modifiers};
pub use snap::{snap_move_target, SnapLines, SNAP_TOLERANCE};
pub use split::{split_spans, split_text_layer, SplitSpans};

/// Editor crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
