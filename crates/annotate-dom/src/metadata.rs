//! Viewport metadata attached to a rendering surface
//!
//! The renderer serializes the document id, page number and viewport onto the
//! surface element. This module only reads them back; it never computes a
//! viewport itself.

use annotate_types::Viewport;

use crate::dom::{DomNode, DOCUMENT_ID, PAGE_NUMBER, VIEWPORT};
use crate::error::DomError;

/// Metadata of one surface. Absent or unparsable attributes come back as `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceMetadata {
    pub document_id: Option<String>,
    pub page_number: Option<u32>,
    pub viewport: Option<Viewport>,
}

pub fn surface_metadata<N: DomNode>(surface: &N) -> SurfaceMetadata {
    SurfaceMetadata {
        document_id: surface.attribute(DOCUMENT_ID),
        page_number: surface
            .attribute(PAGE_NUMBER)
            .and_then(|raw| raw.trim().parse().ok()),
        viewport: surface_viewport(surface).ok(),
    }
}

/// Read and validate the surface's viewport.
///
/// # Errors
/// [`DomError::MalformedViewport`] when the attribute is missing, is not JSON, or
/// describes an invalid viewport. Callers must not fall back to an identity
/// transform, since that would silently corrupt stored geometry.
pub fn surface_viewport<N: DomNode>(surface: &N) -> Result<Viewport, DomError> {
    let raw = surface
        .attribute(VIEWPORT)
        .ok_or_else(|| DomError::MalformedViewport(format!("missing {} attribute", VIEWPORT)))?;

    Viewport::from_json(&raw).map_err(|e| {
        tracing::debug!("Rejecting surface viewport {:?}: {}", raw, e);
        DomError::MalformedViewport(e.to_string())
    })
}
