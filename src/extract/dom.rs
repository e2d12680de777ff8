//! Reading-order view of a parsed document
//!
//! The label/value heuristic only needs to step from one node to the next in
//! document order and read a node's text. [`DocumentNode`] captures exactly
//! that, so the heuristic runs the same over a `scraper` parse tree and over a
//! hand-built sequence in tests.

use scraper::{ElementRef, Html};

/// Elements whose text never shows up on the rendered page
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// A node that knows its successor in document reading order
pub trait DocumentNode: Sized {
    /// The next node in document order: first child, else next sibling, else
    /// the next sibling of the nearest ancestor that has one
    fn next_node(&self) -> Option<Self>;

    /// Text of this node and its descendants, pieces trimmed and joined by a space
    fn text(&self) -> String;

    /// True for bare text nodes, false for elements
    fn is_text(&self) -> bool;
}

#[derive(Debug, Clone, Copy)]
enum FlatNode<'a> {
    Element(ElementRef<'a>),
    Text(&'a str),
}

/// A parsed document flattened into pre-order
///
/// Hidden elements (scripts, styles) and their text are left out.
pub struct FlatDocument<'a> {
    nodes: Vec<FlatNode<'a>>,
}

impl<'a> FlatDocument<'a> {
    pub fn new(document: &'a Html) -> Self {
        let nodes = document
            .tree
            .root()
            .descendants()
            .filter(|node| !node.ancestors().any(|a| is_hidden(ElementRef::wrap(a))))
            .filter_map(|node| {
                if let Some(element) = ElementRef::wrap(node) {
                    if is_hidden(Some(element)) {
                        return None;
                    }
                    return Some(FlatNode::Element(element));
                }
                node.value().as_text().map(|text| FlatNode::Text(&**text))
            })
            .collect();

        Self { nodes }
    }

    /// Cursor at the first node, or `None` for an empty document
    pub fn first(&self) -> Option<DomCursor<'_, 'a>> {
        (!self.nodes.is_empty()).then_some(DomCursor {
            nodes: &self.nodes,
            index: 0,
        })
    }
}

/// Position inside a [`FlatDocument`]
#[derive(Clone, Copy)]
pub struct DomCursor<'d, 'a> {
    nodes: &'d [FlatNode<'a>],
    index: usize,
}

impl DocumentNode for DomCursor<'_, '_> {
    fn next_node(&self) -> Option<Self> {
        let index = self.index + 1;
        (index < self.nodes.len()).then_some(Self {
            nodes: self.nodes,
            index,
        })
    }

    fn text(&self) -> String {
        match self.nodes[self.index] {
            FlatNode::Text(text) => text.trim().to_string(),
            FlatNode::Element(element) => element_text(element),
        }
    }

    fn is_text(&self) -> bool {
        matches!(self.nodes[self.index], FlatNode::Text(_))
    }
}

fn is_hidden(element: Option<ElementRef<'_>>) -> bool {
    element.is_some_and(|e| HIDDEN_ELEMENTS.contains(&e.value().name()))
}

/// Visible text under `element`, skipping anything inside a hidden element
pub fn element_text(element: ElementRef<'_>) -> String {
    join_text(
        element
            .descendants()
            .filter(|node| !node.ancestors().any(|a| is_hidden(ElementRef::wrap(a))))
            .filter_map(|node| node.value().as_text().map(|text| &**text)),
    )
}

/// Trims every piece, drops empty ones and joins the rest with one space
pub fn join_text<'s>(pieces: impl Iterator<Item = &'s str>) -> String {
    pieces
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// All visible text of a document, one trimmed piece per text node
pub fn visible_text(document: &Html, separator: &str) -> String {
    let flat = FlatDocument::new(document);
    flat.nodes
        .iter()
        .filter_map(|node| match node {
            FlatNode::Text(text) => Some(text.trim()),
            FlatNode::Element(_) => None,
        })
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}
