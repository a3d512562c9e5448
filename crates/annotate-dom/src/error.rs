use annotate_geometry::GeometryError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomError {
    #[error("Cannot convert coordinates, surface viewport is malformed: {0}")]
    MalformedViewport(String),

    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),
}
