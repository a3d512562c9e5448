//! Surface-aware coordinate conversion
//!
//! Same operations as `annotate_geometry::convert`, but the viewport is taken
//! from the surface's metadata unless one is passed explicitly. An explicit
//! viewport always wins, which lets callers preview another zoom level without
//! touching the surface.

use annotate_geometry::convert as geometry;
use annotate_types::{Point, Rect, Viewport};

use crate::dom::DomNode;
use crate::error::DomError;
use crate::metadata::surface_viewport;

fn resolve<N: DomNode>(surface: &N, viewport: Option<&Viewport>) -> Result<Viewport, DomError> {
    match viewport {
        Some(viewport) => Ok(*viewport),
        None => surface_viewport(surface),
    }
}

pub fn to_screen_point<N: DomNode>(
    point: Point,
    surface: &N,
    viewport: Option<&Viewport>,
) -> Result<Point, DomError> {
    let viewport = resolve(surface, viewport)?;
    Ok(geometry::to_screen_point(point, &viewport))
}

pub fn to_document_point<N: DomNode>(
    point: Point,
    surface: &N,
    viewport: Option<&Viewport>,
) -> Result<Point, DomError> {
    let viewport = resolve(surface, viewport)?;
    Ok(geometry::to_document_point(point, &viewport)?)
}

pub fn to_screen_rect<R, N>(rect: R, surface: &N, viewport: Option<&Viewport>) -> Result<R, DomError>
where
    R: Into<Rect> + From<Rect>,
    N: DomNode,
{
    let viewport = resolve(surface, viewport)?;
    Ok(geometry::to_screen_rect(rect, &viewport))
}

pub fn to_document_rect<R, N>(
    rect: R,
    surface: &N,
    viewport: Option<&Viewport>,
) -> Result<R, DomError>
where
    R: Into<Rect> + From<Rect>,
    N: DomNode,
{
    let viewport = resolve(surface, viewport)?;
    Ok(geometry::to_document_rect(rect, &viewport)?)
}

/// Scale a normalized rect up to the surface's rendered scale
pub fn scale_up<N: DomNode>(surface: &N, rect: Rect) -> Result<Rect, DomError> {
    let viewport = surface_viewport(surface)?;
    Ok(geometry::scale_up(rect, &viewport))
}

/// Scale a rendered rect down to the normalized scale
pub fn scale_down<N: DomNode>(surface: &N, rect: Rect) -> Result<Rect, DomError> {
    let viewport = surface_viewport(surface)?;
    Ok(geometry::scale_down(rect, &viewport))
}
