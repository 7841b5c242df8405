// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Document representation

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::element::Element;
use super::node::{drop_subtree, Node, NodeData, NodeId, NodeStore, NodeType};
use crate::config::HostConfig;

/// HTML Document representation
#[derive(Debug, Clone)]
pub struct Document {
    /// Host configuration
    config: HostConfig,
    /// Root node ID
    root_id: NodeId,
    /// Node storage
    pub(crate) nodes: NodeStore,
    /// Document element (<html>) ID
    document_element_id: Option<NodeId>,
    /// Body element ID
    body_id: Option<NodeId>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::with_config(HostConfig::default())
    }

    /// Create an empty document hosted under the given config
    pub fn with_config(config: HostConfig) -> Self {
        let root_id = NodeId::new();
        let mut nodes = HashMap::new();
        nodes.insert(root_id, NodeData::document());

        Self {
            config,
            root_id,
            nodes: Arc::new(RwLock::new(nodes)),
            document_element_id: None,
            body_id: None,
        }
    }

    /// Get the host configuration
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    fn node(&self, id: NodeId) -> Node {
        Node::new(id, self.nodes.clone(), self.config.engine)
    }

    /// Get the root node
    pub fn root(&self) -> Node {
        self.node(self.root_id)
    }

    /// Get the document element (<html>)
    pub fn document_element(&self) -> Option<Element> {
        self.document_element_id
            .and_then(|id| Element::new(self.node(id)))
    }

    /// Get the <body> element
    pub fn body(&self) -> Option<Element> {
        self.body_id.and_then(|id| Element::new(self.node(id)))
    }

    /// Find <html> and <body> after parsing
    pub(crate) fn locate_elements(&mut self) {
        let nodes = self.nodes.read();
        let find_child = |parent: NodeId, tag: &str| {
            nodes.get(&parent).and_then(|p| {
                p.children.iter().copied().find(|id| {
                    nodes
                        .get(id)
                        .map(|n| n.tag_name.as_deref() == Some(tag))
                        .unwrap_or(false)
                })
            })
        };

        let html = find_child(self.root_id, "html");
        let body = html.and_then(|id| find_child(id, "body"));
        drop(nodes);

        self.document_element_id = html;
        self.body_id = body;
    }

    /// Create a new detached element
    pub fn create_element(&self, tag: &str) -> Element {
        let id = NodeId::new();
        self.nodes.write().insert(id, NodeData::element(tag));
        Element {
            node: self.node(id),
        }
    }

    /// Create a detached text node
    pub fn create_text_node(&self, content: &str) -> Node {
        let id = NodeId::new();
        self.nodes.write().insert(id, NodeData::text(content));
        self.node(id)
    }

    /// Drop a detached node and its subtree from storage
    ///
    /// Attached nodes are left alone.
    pub fn release(&self, node: &Node) {
        let mut nodes = self.nodes.write();
        let detached = nodes
            .get(&node.id)
            .map(|n| n.parent.is_none() && n.node_type != NodeType::Document)
            .unwrap_or(false);
        if !detached {
            return;
        }

        drop_subtree(&mut nodes, node.id);
    }

    /// Number of nodes held in storage, attached or not
    pub fn node_count(&self) -> usize {
        self.nodes.read().len()
    }

    /// Get the document's HTML
    pub fn outer_html(&self) -> String {
        self.root().outer_html()
    }

    /// Get all text content
    pub fn text_content(&self) -> String {
        self.root().text_content()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Engine;
    use crate::dom::parse_html;

    #[test]
    fn test_document_creation() {
        let doc = Document::new();
        assert_eq!(doc.config().engine, Engine::Blink);
        assert!(doc.body().is_none());
        assert_eq!(doc.node_count(), 1);
    }

    #[test]
    fn test_create_element() {
        let doc = Document::new();
        let div = doc.create_element("div");
        assert_eq!(div.tag_name(), "DIV");
        assert!(div.parent().is_none());
    }

    #[test]
    fn test_release_detached() {
        let doc = Document::new();
        let div = doc.create_element("div");
        div.set_inner_html("<p>a</p><p>b</p>").unwrap();
        assert_eq!(doc.node_count(), 6);

        doc.release(&div);
        assert_eq!(doc.node_count(), 1);
    }

    #[test]
    fn test_release_ignores_attached() {
        let doc = parse_html("<html><body><div>x</div></body></html>").unwrap();
        let before = doc.node_count();
        let div = doc.body().unwrap().children()[0].clone();

        doc.release(&div);
        doc.release(&doc.root());
        assert_eq!(doc.node_count(), before);
    }
}
