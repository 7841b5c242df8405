// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Element-specific DOM operations

use super::node::{Node, NodeType};

/// Element node handle
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Element {
    /// Inner node reference
    pub node: Node,
}

impl Element {
    /// Create a new element from a node
    pub fn new(node: Node) -> Option<Self> {
        if node.node_type() == NodeType::Element {
            Some(Self { node })
        } else {
            None
        }
    }

    /// Get the tag name (uppercase)
    pub fn tag_name(&self) -> String {
        self.node.tag_name().unwrap_or_default()
    }

    /// Get local name (lowercase)
    pub fn local_name(&self) -> String {
        self.node.local_name().unwrap_or_default()
    }

    /// Get element ID
    pub fn id(&self) -> Option<String> {
        self.node.get_attribute("id")
    }

    /// Get child elements (only element nodes)
    pub fn child_elements(&self) -> Vec<Element> {
        self.node
            .children()
            .into_iter()
            .filter_map(Element::new)
            .collect()
    }

    /// Unwrap into the underlying node handle
    pub fn into_node(self) -> Node {
        self.node
    }
}

impl std::ops::Deref for Element {
    type Target = Node;

    fn deref(&self) -> &Self::Target {
        &self.node
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        element.node
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::{parse_html, Document};

    #[test]
    fn test_child_elements() {
        let doc = parse_html("<body>text<p id=\"a\">1</p><!--c--><p>2</p></body>").unwrap();
        let body = doc.body().unwrap();
        let children = body.child_elements();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].id(), Some("a".to_string()));
        assert_eq!(children[1].local_name(), "p");
    }

    #[test]
    fn test_element_rejects_text() {
        let doc = Document::new();
        let text = doc.create_text_node("x");
        assert!(crate::dom::Element::new(text).is_none());
    }
}
