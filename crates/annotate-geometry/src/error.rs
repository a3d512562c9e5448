use annotate_types::ViewportError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Transform is singular and has no inverse (determinant {0})")]
    SingularTransform(f64),

    #[error("Invalid viewport: {0}")]
    Viewport(#[from] ViewportError),
}
