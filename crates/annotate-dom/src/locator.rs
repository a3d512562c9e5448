//! Locating surfaces and annotation elements

use annotate_geometry::point_intersects_rect;

use crate::dom::{DomHost, DomNode, ANNOTATION_TYPE};

/// Nearest ancestor of `node` that is an annotation surface.
///
/// The node itself is not considered. Returns `None` once the document root is
/// passed without finding one.
pub fn find_surface_container<N: DomNode>(node: &N) -> Option<N> {
    let mut current = node.parent();
    while let Some(candidate) = current {
        if candidate.is_surface() {
            return Some(candidate);
        }
        current = candidate.parent();
    }
    None
}

/// First attached surface whose bounding rect contains `(x, y)`, edges included.
///
/// Overlapping surfaces resolve to the one the host enumerates first.
pub fn find_surface_at_point<H: DomHost>(host: &H, x: f64, y: f64) -> Option<H::Node> {
    host.surfaces()
        .into_iter()
        .find(|surface| point_intersects_rect(x, y, &surface.bounding_rect()))
}

/// Annotation element under `(x, y)`: the topmost element there or its nearest
/// ancestor carrying an annotation type.
pub fn find_annotation_at_point<H: DomHost>(host: &H, x: f64, y: f64) -> Option<H::Node> {
    let mut current = host.element_at_point(x, y);
    while let Some(node) = current {
        if node.attribute(ANNOTATION_TYPE).is_some() {
            return Some(node);
        }
        current = node.parent();
    }
    tracing::trace!("No annotation at ({}, {})", x, y);
    None
}
