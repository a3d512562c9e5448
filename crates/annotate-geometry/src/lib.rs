//! Coordinate transforms and geometric primitives for the annotation overlay
//!
//! Everything here is pure and synchronous. The DOM-facing wrappers that look up
//! a surface's viewport live in `annotate-dom`.

pub mod convert;
pub mod error;
pub mod intersect;
pub mod transform;

pub use convert::{
    scale_down, scale_up, to_document_point, to_document_rect, to_screen_point, to_screen_rect,
    viewport_transform,
};
pub use error::GeometryError;
pub use intersect::{point_intersects_rect, rect_crosses_rect};
pub use transform::Transform;
