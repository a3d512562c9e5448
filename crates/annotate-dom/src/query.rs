//! Hit-testing of rendered annotation elements
//!
//! Element rects are measured relative to the enclosing surface so that a pointer
//! position can be compared after subtracting the same offset.

use annotate_geometry::{point_intersects_rect, rect_crosses_rect};
use annotate_types::{Annotation, Bounds, Point};

use crate::dom::{DomNode, ANNOTATION_ID};

/// Origin of the element's nearest `svg` ancestor, or `(0, 0)` when it has none
pub fn element_offset<N: DomNode>(element: &N) -> Point {
    let mut current = element.parent();
    while let Some(node) = current {
        if node.is_svg() {
            let rect = node.bounding_rect();
            return Point::new(rect.left, rect.top);
        }
        current = node.parent();
    }
    Point::default()
}

/// Accumulated `(scroll_left, scroll_top)` of every ancestor
pub fn scroll_offset<N: DomNode>(element: &N) -> Point {
    let mut total = Point::default();
    let mut current = element.parent();
    while let Some(node) = current {
        let (left, top) = node.scroll_position();
        total = total.offset(left, top);
        current = node.parent();
    }
    total
}

/// Rendered rect of an annotation element, relative to its surface.
///
/// Lines and paths report a bounding rect padded by half the stroke width on each
/// side; for those the stroke-free intrinsic box is used and the padding is split
/// evenly between opposite edges.
pub fn offset_annotation_rect<N: DomNode>(element: &N) -> Bounds {
    let rect = element.bounding_rect();
    let tag = element.tag_name().to_ascii_lowercase();

    let (pad_x, pad_y) = match element.intrinsic_bbox() {
        Some(bbox) if tag == "line" || tag == "path" => (
            (rect.width() - bbox.width) / 2.0,
            (rect.height() - bbox.height) / 2.0,
        ),
        _ => (0.0, 0.0),
    };

    let offset = element_offset(element);
    Bounds::new(
        rect.top - offset.y + pad_y,
        rect.left - offset.x + pad_x,
        rect.bottom - offset.y - pad_y,
        rect.right - offset.x - pad_x,
    )
}

fn rendered_element<N: DomNode>(annotation: &Annotation, surface: &N) -> Option<N> {
    let uuid = annotation.uuid.as_deref()?;
    let element = surface.find_descendant(ANNOTATION_ID, uuid);
    if element.is_none() {
        tracing::trace!("No rendered element for annotation {}", uuid);
    }
    element
}

/// Does the screen point `(x, y)` hit the annotation's rendered element?
///
/// `None` means there was nothing to test: the annotation has no uuid or is not
/// rendered in `surface`.
pub fn point_intersects_annotation<N: DomNode>(
    x: f64,
    y: f64,
    annotation: &Annotation,
    surface: &N,
) -> Option<bool> {
    let target = rendered_element(annotation, surface)?;
    let rect = offset_annotation_rect(&target);
    let offset = element_offset(&target);
    Some(point_intersects_rect(x - offset.x, y - offset.y, &rect))
}

/// Does the screen rect `(x1, y1)`–`(x2, y2)` overlap the annotation's rendered element?
///
/// `None` under the same conditions as [`point_intersects_annotation`].
pub fn rect_crosses_annotation<N: DomNode>(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    annotation: &Annotation,
    surface: &N,
) -> Option<bool> {
    let target = rendered_element(annotation, surface)?;
    let rect = offset_annotation_rect(&target);
    let offset = element_offset(&target);
    Some(rect_crosses_rect(
        x1 - offset.x,
        y1 - offset.y,
        x2 - offset.x,
        y2 - offset.y,
        &rect,
    ))
}
