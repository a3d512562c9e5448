//! In-memory DOM used by the unit tests

use std::collections::HashMap;
use std::rc::Rc;

use annotate_types::{Bounds, Rect};

use crate::dom::{DomHost, DomNode};

#[derive(Debug, Default)]
struct NodeData {
    tag: String,
    attrs: HashMap<String, String>,
    parent: Option<usize>,
    children: Vec<usize>,
    rect: Bounds,
    bbox: Option<Rect>,
    scroll: (f64, f64),
}

/// Builds a tree node by node; ids are insertion indices
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<NodeData>,
}

impl TreeBuilder {
    pub fn add(&mut self, tag: &str, parent: Option<usize>, rect: Bounds) -> usize {
        let id = self.nodes.len();
        self.nodes.push(NodeData {
            tag: tag.to_string(),
            parent,
            rect,
            ..Default::default()
        });
        if let Some(parent) = parent {
            self.nodes[parent].children.push(id);
        }
        id
    }

    pub fn set_attr(&mut self, id: usize, name: &str, value: &str) {
        self.nodes[id]
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    pub fn set_bbox(&mut self, id: usize, bbox: Rect) {
        self.nodes[id].bbox = Some(bbox);
    }

    pub fn set_scroll(&mut self, id: usize, left: f64, top: f64) {
        self.nodes[id].scroll = (left, top);
    }

    pub fn build(self) -> MockDom {
        MockDom {
            nodes: Rc::new(self.nodes),
        }
    }
}

/// Later nodes paint over earlier ones when hit-testing
#[derive(Debug, Clone)]
pub struct MockDom {
    nodes: Rc<Vec<NodeData>>,
}

impl MockDom {
    pub fn node(&self, id: usize) -> MockNode {
        MockNode {
            nodes: Rc::clone(&self.nodes),
            id,
        }
    }
}

impl DomHost for MockDom {
    type Node = MockNode;

    fn surfaces(&self) -> Vec<MockNode> {
        (0..self.nodes.len())
            .map(|id| self.node(id))
            .filter(|node| node.is_surface())
            .collect()
    }

    fn element_at_point(&self, x: f64, y: f64) -> Option<MockNode> {
        self.nodes
            .iter()
            .rposition(|data| {
                let r = data.rect;
                x >= r.left && x <= r.right && y >= r.top && y <= r.bottom
            })
            .map(|id| self.node(id))
    }
}

#[derive(Debug, Clone)]
pub struct MockNode {
    nodes: Rc<Vec<NodeData>>,
    id: usize,
}

impl MockNode {
    pub fn id(&self) -> usize {
        self.id
    }

    fn data(&self) -> &NodeData {
        &self.nodes[self.id]
    }

    fn with_id(&self, id: usize) -> Self {
        Self {
            nodes: Rc::clone(&self.nodes),
            id,
        }
    }
}

impl DomNode for MockNode {
    fn parent(&self) -> Option<Self> {
        self.data().parent.map(|id| self.with_id(id))
    }

    fn tag_name(&self) -> String {
        self.data().tag.clone()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.data().attrs.get(name).cloned()
    }

    fn bounding_rect(&self) -> Bounds {
        self.data().rect
    }

    fn intrinsic_bbox(&self) -> Option<Rect> {
        self.data().bbox
    }

    fn scroll_position(&self) -> (f64, f64) {
        self.data().scroll
    }

    fn find_descendant(&self, name: &str, value: &str) -> Option<Self> {
        let mut stack: Vec<usize> = self.data().children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let data = &self.nodes[id];
            if data.attrs.get(name).map(String::as_str) == Some(value) {
                return Some(self.with_id(id));
            }
            stack.extend(data.children.iter().rev().copied());
        }
        None
    }
}
