//! Point and rect hit-testing primitives
//!
//! Both work on edge-form [`Bounds`] since that is what the DOM measures.
//! Point hits are boundary-inclusive; rect crossing requires a non-zero overlap
//! area, so two rects that only share an edge do not cross.

use annotate_types::Bounds;

/// True if `(x, y)` lies inside `rect` or on its edge
pub fn point_intersects_rect(x: f64, y: f64, rect: &Bounds) -> bool {
    y >= rect.top && y <= rect.bottom && x >= rect.left && x <= rect.right
}

/// True if the rect spanned by `(x1, y1)`–`(x2, y2)` overlaps `rect` with positive area
///
/// `(x1, y1)` is expected to be the top-left corner of the query rect.
pub fn rect_crosses_rect(x1: f64, y1: f64, x2: f64, y2: f64, rect: &Bounds) -> bool {
    let x_overlap = (x2.min(rect.right) - x1.max(rect.left)).max(0.0);
    let y_overlap = (y2.min(rect.bottom) - y1.max(rect.top)).max(0.0);
    x_overlap > 0.0 && y_overlap > 0.0
}
