//! Annotation and comment records
//!
//! Geometry is always stored in normalized document space. It never encodes the
//! zoom or rotation it was drawn under.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::geometry::{Point, Rect};

/// Closed set of annotation types, matching `data-annotation-type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    Area,
    Rectangle,
    Line,
    Point,
    Textbox,
    Strikeout,
    Highlight,
    Drawing,
    Circle,
    Arrow,
    Comment,
}

impl AnnotationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AnnotationKind::Area => "area",
            AnnotationKind::Rectangle => "rectangle",
            AnnotationKind::Line => "line",
            AnnotationKind::Point => "point",
            AnnotationKind::Textbox => "textbox",
            AnnotationKind::Strikeout => "strikeout",
            AnnotationKind::Highlight => "highlight",
            AnnotationKind::Drawing => "drawing",
            AnnotationKind::Circle => "circle",
            AnnotationKind::Arrow => "arrow",
            AnnotationKind::Comment => "comment",
        }
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnnotationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "area" => Ok(AnnotationKind::Area),
            "rectangle" => Ok(AnnotationKind::Rectangle),
            "line" => Ok(AnnotationKind::Line),
            "point" => Ok(AnnotationKind::Point),
            "textbox" => Ok(AnnotationKind::Textbox),
            "strikeout" => Ok(AnnotationKind::Strikeout),
            "highlight" => Ok(AnnotationKind::Highlight),
            "drawing" => Ok(AnnotationKind::Drawing),
            "circle" => Ok(AnnotationKind::Circle),
            "arrow" => Ok(AnnotationKind::Arrow),
            "comment" => Ok(AnnotationKind::Comment),
            other => Err(format!("Unknown annotation type: {}", other)),
        }
    }
}

/// Normalized-space shape of an annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum Geometry {
    Rect(Rect),
    /// Text-markup annotations (highlight, strikeout) cover one rect per line
    Rects { rectangles: Vec<Rect> },
    /// Freehand drawings and lines
    Path { points: Vec<Point> },
    Point(Point),
}

impl Geometry {
    /// Smallest rect enclosing the shape, `None` for an empty path or rect list
    pub fn bounding_rect(&self) -> Option<Rect> {
        match self {
            Geometry::Rect(rect) => Some(rect.normalized()),
            Geometry::Rects { rectangles } => Rect::enclosing(rectangles.iter().flat_map(|r| {
                let (a, b) = r.corners();
                [a, b]
            })),
            Geometry::Path { points } => Rect::enclosing(points.iter().copied()),
            Geometry::Point(point) => Some(Rect::new(point.x, point.y, 0.0, 0.0)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    /// Assigned by the backend on creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// Stamped by the store adapter; backend values are not trusted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    #[serde(rename = "type")]
    pub kind: AnnotationKind,
    pub geometry: Geometry,
    /// Type-specific fields (color, stroke width, text content, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Annotation {
    pub fn new(kind: AnnotationKind, geometry: Geometry) -> Self {
        Self {
            uuid: None,
            document_id: None,
            page_number: None,
            kind,
            geometry,
            extra: Map::new(),
        }
    }

    pub fn with_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuid = Some(uuid.into());
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default, alias = "uuid", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    /// Weak reference; deleting the annotation does not delete its comments here
    pub annotation_id: String,
    pub content: String,
}

impl Comment {
    pub fn new(annotation_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: None,
            document_id: None,
            annotation_id: annotation_id.into(),
            content: content.into(),
        }
    }
}

/// Which history actions a backend can currently perform for a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStatus {
    pub can_undo: bool,
    pub can_redo: bool,
    pub can_clear: bool,
}

impl From<[bool; 3]> for HistoryStatus {
    fn from([can_undo, can_redo, can_clear]: [bool; 3]) -> Self {
        Self {
            can_undo,
            can_redo,
            can_clear,
        }
    }
}
