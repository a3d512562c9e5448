//! DOM-facing half of the annotation overlay
//!
//! The page DOM is a collaborator reached through the [`DomNode`] and
//! [`DomHost`] traits, so everything here can run against a browser binding or
//! an in-memory tree alike. This crate provides:
//! - viewport metadata lookup for a rendering surface
//! - surface-aware document/screen coordinate conversion
//! - hit-testing of rendered annotation elements
//! - locating surfaces and annotations under the pointer
//! - the scoped user-select toggle used while dragging

pub mod convert;
pub mod dom;
pub mod error;
pub mod locator;
pub mod metadata;
pub mod query;
pub mod user_select;

#[cfg(test)]
mod testing;

pub use dom::{DomHost, DomNode};
pub use error::DomError;
pub use locator::{find_annotation_at_point, find_surface_at_point, find_surface_container};
pub use metadata::{surface_metadata, surface_viewport, SurfaceMetadata};
pub use query::{
    element_offset, offset_annotation_rect, point_intersects_annotation,
    rect_crosses_annotation, scroll_offset,
};
pub use user_select::{
    disable_user_select, enable_user_select, is_user_select_disabled, UserSelect,
    UserSelectGuard,
};
