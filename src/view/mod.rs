/// View layer: pure geometry and frame composition.
///
/// Architecture:
/// ```text
///   ViewerState + image size
///        │
///        ▼
///   ┌───────────┐
///   │ transform  │  zoom / fit / pan → destination rectangle
///   └───────────┘
///        │
///        ▼
///   ┌───────────┐
///   │  compose   │  ordered DrawOps (image, overlays, text via format)
///   └───────────┘
/// ```

pub mod compose;
pub mod format;
pub mod transform;
