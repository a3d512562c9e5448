//! Shared data model for the annotation overlay
//!
//! Geometry primitives, viewport parameters and the annotation/comment records
//! exchanged between the coordinate layer, the DOM collaborators and the store
//! adapter.

pub mod annotation;
pub mod geometry;
pub mod viewport;

pub use annotation::{Annotation, AnnotationKind, Comment, Geometry, HistoryStatus};
pub use geometry::{Bounds, Point, Rect};
pub use viewport::{Rotation, Viewport, ViewportError};
