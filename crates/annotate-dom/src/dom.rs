//! Collaborator interface for the page DOM

use annotate_types::{Bounds, Rect};

/// Marks the `svg` element that holds one page's annotations (value `"true"`)
pub const SURFACE_MARKER: &str = "data-annotation-surface";
pub const DOCUMENT_ID: &str = "data-document-id";
/// Base-1 page number
pub const PAGE_NUMBER: &str = "data-page-number";
/// JSON-encoded [`annotate_types::Viewport`]
pub const VIEWPORT: &str = "data-viewport";
/// Matches `Annotation::uuid`
pub const ANNOTATION_ID: &str = "data-annotation-id";
/// Matches `Annotation::kind`
pub const ANNOTATION_TYPE: &str = "data-annotation-type";

/// A handle to an element in the page DOM
pub trait DomNode: Clone {
    /// Parent element, `None` once the document root is reached
    fn parent(&self) -> Option<Self>;

    fn tag_name(&self) -> String;

    fn attribute(&self, name: &str) -> Option<String>;

    /// Rendered box in screen space (`getBoundingClientRect`)
    fn bounding_rect(&self) -> Bounds;

    /// Geometric box of an SVG graphics element without stroke (`getBBox`)
    fn intrinsic_bbox(&self) -> Option<Rect> {
        None
    }

    /// `(scroll_left, scroll_top)` of this element
    fn scroll_position(&self) -> (f64, f64) {
        (0.0, 0.0)
    }

    /// First descendant whose attribute `name` equals `value`
    fn find_descendant(&self, name: &str, value: &str) -> Option<Self>;

    fn is_svg(&self) -> bool {
        self.tag_name().eq_ignore_ascii_case("svg")
    }

    /// True for the `svg` container a page's annotations are rendered into
    fn is_surface(&self) -> bool {
        self.is_svg() && self.attribute(SURFACE_MARKER).as_deref() == Some("true")
    }
}

/// The document the overlay lives in
pub trait DomHost {
    type Node: DomNode;

    /// Every annotation surface currently attached, in document order
    fn surfaces(&self) -> Vec<Self::Node>;

    /// Topmost element at a screen point (`elementFromPoint`)
    fn element_at_point(&self, x: f64, y: f64) -> Option<Self::Node>;
}
