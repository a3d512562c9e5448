//! Coordinate transformation between document space and screen space
//!
//! Document space is the normalized page space annotations are stored in.
//! Screen space is what the pointer and the rendered SVG report for a given
//! viewport.

use annotate_types::{Point, Rect, Viewport};

use crate::error::GeometryError;
use crate::transform::Transform;

/// Composite document → screen transform: scale, then rotate, then translate
pub fn viewport_transform(viewport: &Viewport) -> Transform {
    Transform::IDENTITY
        .scale(viewport.scale(), viewport.scale())
        .rotate_by(viewport.rotation())
        .translate(viewport.offset_x(), viewport.offset_y())
}

/// Convert a document-space point to screen space
pub fn to_screen_point(point: Point, viewport: &Viewport) -> Point {
    viewport_transform(viewport).apply(point)
}

/// Convert a screen-space point to document space
///
/// # Errors
/// Only fails if the viewport transform is singular, which a validated
/// [`Viewport`] cannot produce.
pub fn to_document_point(point: Point, viewport: &Viewport) -> Result<Point, GeometryError> {
    viewport_transform(viewport).apply_inverse(point)
}

/// Convert a document-space rect to screen space.
///
/// Both corners are converted independently and the result is rebuilt from
/// their min/max, since rotation can move either corner to the visual top-left.
/// The rect comes back in the same form it was given in.
pub fn to_screen_rect<R>(rect: R, viewport: &Viewport) -> R
where
    R: Into<Rect> + From<Rect>,
{
    let transform = viewport_transform(viewport);
    let (a, b) = rect.into().corners();
    R::from(Rect::from_corners(transform.apply(a), transform.apply(b)))
}

/// Convert a screen-space rect to document space, preserving its form
pub fn to_document_rect<R>(rect: R, viewport: &Viewport) -> Result<R, GeometryError>
where
    R: Into<Rect> + From<Rect>,
{
    let transform = viewport_transform(viewport);
    let (a, b) = rect.into().corners();
    Ok(R::from(Rect::from_corners(
        transform.apply_inverse(a)?,
        transform.apply_inverse(b)?,
    )))
}

/// Scale every component of a normalized (100%) rect up to the rendered scale
pub fn scale_up(rect: Rect, viewport: &Viewport) -> Rect {
    rect.scaled(viewport.scale())
}

/// Scale every component of a rendered rect down to the normalized (100%) scale
pub fn scale_down(rect: Rect, viewport: &Viewport) -> Rect {
    let scale = viewport.scale();
    Rect::new(
        rect.x / scale,
        rect.y / scale,
        rect.width / scale,
        rect.height / scale,
    )
}
