//! Per-page viewport parameters
//!
//! A viewport is attached to each rendering surface by the renderer and is
//! replaced wholesale on zoom or rotate. Construction validates the invariants
//! (positive scale, right-angle rotation) so downstream transforms never have to.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ViewportError {
    #[error("Viewport scale must be a positive finite number, got {0}")]
    InvalidScale(f64),

    #[error("Viewport rotation must be a multiple of 90 degrees, got {0}")]
    InvalidRotation(f64),

    #[error("Viewport {0} must be finite")]
    NonFinite(&'static str),
}

/// Page rotation, always one of the four right angles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "u16")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    /// Parse a rotation in degrees, normalizing modulo 360 (so -90 is 270)
    pub fn from_degrees(degrees: f64) -> Result<Self, ViewportError> {
        if !degrees.is_finite() || degrees.fract() != 0.0 {
            return Err(ViewportError::InvalidRotation(degrees));
        }
        match degrees.rem_euclid(360.0) as u16 {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            _ => Err(ViewportError::InvalidRotation(degrees)),
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Exact `(sin, cos)` of the angle
    pub fn sin_cos(self) -> (f64, f64) {
        match self {
            Rotation::Deg0 => (0.0, 1.0),
            Rotation::Deg90 => (1.0, 0.0),
            Rotation::Deg180 => (0.0, -1.0),
            Rotation::Deg270 => (-1.0, 0.0),
        }
    }
}

impl TryFrom<f64> for Rotation {
    type Error = ViewportError;

    fn try_from(degrees: f64) -> Result<Self, Self::Error> {
        Self::from_degrees(degrees)
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

/// Scale, rotation and translation offset of one rendered page
///
/// The offset is expressed in unscaled page units: it is applied after scale and
/// rotation have been composed, exactly like the renderer's own transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawViewport", rename_all = "camelCase")]
pub struct Viewport {
    scale: f64,
    rotation: Rotation,
    offset_x: f64,
    offset_y: f64,
}

impl Viewport {
    pub fn new(
        scale: f64,
        rotation: Rotation,
        offset_x: f64,
        offset_y: f64,
    ) -> Result<Self, ViewportError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ViewportError::InvalidScale(scale));
        }
        if !offset_x.is_finite() {
            return Err(ViewportError::NonFinite("offsetX"));
        }
        if !offset_y.is_finite() {
            return Err(ViewportError::NonFinite("offsetY"));
        }
        Ok(Self {
            scale,
            rotation,
            offset_x,
            offset_y,
        })
    }

    /// Unrotated viewport at the given zoom level
    pub fn scaled(scale: f64) -> Result<Self, ViewportError> {
        Self::new(scale, Rotation::Deg0, 0.0, 0.0)
    }

    /// Derive the offset from the rendered page size.
    ///
    /// `width`/`height` are the rendered (scaled, rotated) page dimensions, as a
    /// PDF.js page viewport reports them. Rotation moves the page origin to a
    /// different corner; the offset shifts it back into the visible quadrant.
    pub fn from_page_size(
        scale: f64,
        rotation: Rotation,
        width: f64,
        height: f64,
    ) -> Result<Self, ViewportError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ViewportError::InvalidScale(scale));
        }
        let (offset_x, offset_y) = match rotation {
            Rotation::Deg0 => (0.0, 0.0),
            Rotation::Deg90 => (0.0, -width / scale),
            Rotation::Deg180 => (-width / scale, -height / scale),
            Rotation::Deg270 => (-height / scale, 0.0),
        };
        Self::new(scale, rotation, offset_x, offset_y)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn offset_x(&self) -> f64 {
        self.offset_x
    }

    pub fn offset_y(&self) -> f64 {
        self.offset_y
    }

    /// Parse the JSON the renderer attaches to a surface
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Wire shape accepted for a viewport.
///
/// When the page `width`/`height` are present the offset is derived from them
/// and any `offsetX`/`offsetY` are ignored, since PDF.js page viewports always
/// carry zero offsets alongside their size. Without a size the explicit offsets
/// apply; with neither the page is untranslated.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawViewport {
    scale: f64,
    #[serde(default)]
    rotation: f64,
    offset_x: Option<f64>,
    offset_y: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
}

impl TryFrom<RawViewport> for Viewport {
    type Error = ViewportError;

    fn try_from(raw: RawViewport) -> Result<Self, Self::Error> {
        let rotation = Rotation::from_degrees(raw.rotation)?;
        match (raw.width, raw.height, raw.offset_x, raw.offset_y) {
            (Some(width), Some(height), _, _) => {
                Viewport::from_page_size(raw.scale, rotation, width, height)
            }
            (_, _, offset_x, offset_y) => Viewport::new(
                raw.scale,
                rotation,
                offset_x.unwrap_or(0.0),
                offset_y.unwrap_or(0.0),
            ),
        }
    }
}
