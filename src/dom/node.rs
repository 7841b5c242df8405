// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! DOM Node types

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::parser;
use crate::config::Engine;
use crate::error::{Error, Result};

/// Property name for rendered plain text
pub const INNER_TEXT: &str = "innerText";
/// Property name for raw descendant text
pub const TEXT_CONTENT: &str = "textContent";
/// Property name for serialized child markup
pub const INNER_HTML: &str = "innerHTML";

/// Elements serialized without an end tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements whose text children are serialized unescaped
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "style", "script", "xmp", "iframe", "noembed", "noframes", "plaintext", "noscript",
];

/// Elements that contribute nothing to rendered text
const UNRENDERED_ELEMENTS: &[&str] = &["script", "style", "template", "noscript"];

/// Shared node storage of one document
pub(crate) type NodeStore = Arc<RwLock<HashMap<NodeId, NodeData>>>;

/// Unique node identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

impl NodeId {
    /// Create a new unique node ID
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Node type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Document node
    Document,
    /// Element node (like <div>, <p>, etc.)
    Element,
    /// Text node
    Text,
    /// Comment node
    Comment,
    /// Document type node (<!DOCTYPE>)
    DocumentType,
}

/// A single name/value attribute of an element
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Internal node data
#[derive(Debug)]
pub struct NodeData {
    /// Node type
    pub node_type: NodeType,
    /// Tag name (for elements)
    pub tag_name: Option<String>,
    /// Text content (for text/comment nodes)
    pub text_content: Option<String>,
    /// Attributes in insertion order (for elements)
    pub attributes: Vec<Attribute>,
    /// Parent node ID
    pub parent: Option<NodeId>,
    /// Child node IDs
    pub children: Vec<NodeId>,
}

impl NodeData {
    fn with_type(node_type: NodeType) -> Self {
        Self {
            node_type,
            tag_name: None,
            text_content: None,
            attributes: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Create a new element node data
    pub fn element(tag_name: impl Into<String>) -> Self {
        let mut data = Self::with_type(NodeType::Element);
        data.tag_name = Some(tag_name.into().to_ascii_lowercase());
        data
    }

    /// Create a new text node data
    pub fn text(content: impl Into<String>) -> Self {
        let mut data = Self::with_type(NodeType::Text);
        data.text_content = Some(content.into());
        data
    }

    /// Create a new comment node data
    pub fn comment(content: impl Into<String>) -> Self {
        let mut data = Self::with_type(NodeType::Comment);
        data.text_content = Some(content.into());
        data
    }

    /// Create a new doctype node data
    pub fn doctype() -> Self {
        Self::with_type(NodeType::DocumentType)
    }

    /// Create a new document node data
    pub fn document() -> Self {
        Self::with_type(NodeType::Document)
    }
}

/// Append `child` as the last child of `parent`.
pub(crate) fn link_child(nodes: &mut HashMap<NodeId, NodeData>, parent: NodeId, child: NodeId) {
    if let Some(child_data) = nodes.get_mut(&child) {
        child_data.parent = Some(parent);
    }

    if let Some(parent_data) = nodes.get_mut(&parent) {
        parent_data.children.push(child);
    }
}

/// Drop a node and its descendants from storage.
pub(crate) fn drop_subtree(nodes: &mut HashMap<NodeId, NodeData>, root: NodeId) {
    let mut pending = vec![root];
    while let Some(id) = pending.pop() {
        if let Some(data) = nodes.remove(&id) {
            pending.extend(data.children);
        }
    }
}

/// Unlink every child of `parent`, leaving each one a detached root.
///
/// Detached subtrees stay in storage until `Document::release` drops them,
/// so handles into them keep working.
fn detach_children(nodes: &mut HashMap<NodeId, NodeData>, parent: NodeId) {
    let children = nodes
        .get_mut(&parent)
        .map(|p| std::mem::take(&mut p.children))
        .unwrap_or_default();

    for id in children {
        if let Some(child) = nodes.get_mut(&id) {
            child.parent = None;
        }
    }
}

/// The host rejects names that could not round-trip through markup.
fn validate_attribute_name(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '>' | '/' | '=' | '\0'));
    if invalid {
        return Err(Error::invalid_attribute(name));
    }
    Ok(())
}

/// A reference to a node in the DOM tree
#[derive(Debug, Clone)]
pub struct Node {
    /// Node ID
    pub id: NodeId,
    /// Reference to document's node storage
    nodes: NodeStore,
    /// Engine profile of the owning document
    engine: Engine,
}

impl Node {
    /// Create a new node reference
    pub(crate) fn new(id: NodeId, nodes: NodeStore, engine: Engine) -> Self {
        Self { id, nodes, engine }
    }

    fn handle(&self, id: NodeId) -> Node {
        Node::new(id, self.nodes.clone(), self.engine)
    }

    /// Get the node type
    pub fn node_type(&self) -> NodeType {
        self.nodes
            .read()
            .get(&self.id)
            .map(|n| n.node_type)
            .unwrap_or(NodeType::Element)
    }

    /// Get the tag name (uppercase, like browsers)
    pub fn tag_name(&self) -> Option<String> {
        self.local_name().map(|t| t.to_uppercase())
    }

    /// Get the tag name in lowercase
    pub fn local_name(&self) -> Option<String> {
        self.nodes
            .read()
            .get(&self.id)
            .and_then(|n| n.tag_name.clone())
    }

    /// Engine profile this node was created under
    pub fn engine(&self) -> Engine {
        self.engine
    }

    /// Check whether the node exposes a named host property
    pub fn has_property(&self, name: &str) -> bool {
        match name {
            TEXT_CONTENT => true,
            INNER_TEXT => self.is_element() && self.engine.supports_inner_text(),
            INNER_HTML => self.is_element(),
            _ => false,
        }
    }

    /// Get text content
    pub fn text_content(&self) -> String {
        let nodes = self.nodes.read();
        let mut out = String::new();
        own_text_content(&nodes, self.id, &mut out);
        out
    }

    /// Set text content (replaces all children with a text node)
    pub fn set_text_content(&self, content: impl Into<String>) {
        self.replace_with_text(content.into());
    }

    /// Get the rendered text of an element
    ///
    /// Descendant `script`, `style`, `template` and `noscript` elements are
    /// skipped and `<br>` renders as a line break. Non-elements fall back to
    /// their text content.
    pub fn inner_text(&self) -> String {
        let nodes = self.nodes.read();
        let mut out = String::new();
        match nodes.get(&self.id) {
            Some(node) if node.node_type == NodeType::Element => {
                for &child in &node.children {
                    collect_rendered_text(&nodes, child, &mut out);
                }
            }
            Some(_) => own_text_content(&nodes, self.id, &mut out),
            None => {}
        }
        out
    }

    /// Set rendered text (replaces all children with a text node)
    pub fn set_inner_text(&self, content: impl Into<String>) {
        self.replace_with_text(content.into());
    }

    fn replace_with_text(&self, content: String) {
        let mut nodes = self.nodes.write();

        match nodes.get_mut(&self.id) {
            Some(node) if matches!(node.node_type, NodeType::Text | NodeType::Comment) => {
                node.text_content = Some(content);
                return;
            }
            Some(node) if node.node_type == NodeType::Element => {}
            // textContent is null on documents and doctypes; writes do nothing
            _ => return,
        }

        detach_children(&mut nodes, self.id);

        // An empty string leaves the node without children
        if !content.is_empty() {
            let text_id = NodeId::new();
            nodes.insert(text_id, NodeData::text(content));
            link_child(&mut nodes, self.id, text_id);
        }
    }

    /// Get an attribute value
    pub fn get_attribute(&self, name: &str) -> Option<String> {
        let name = name.to_ascii_lowercase();
        self.nodes.read().get(&self.id).and_then(|n| {
            n.attributes
                .iter()
                .find(|a| a.name == name)
                .map(|a| a.value.clone())
        })
    }

    /// Set an attribute value, keeping its position when it already exists
    pub fn set_attribute(&self, name: &str, value: impl Into<String>) -> Result<()> {
        validate_attribute_name(name)?;
        let name = name.to_ascii_lowercase();
        let value = value.into();

        let mut nodes = self.nodes.write();
        let node = nodes
            .get_mut(&self.id)
            .filter(|n| n.node_type == NodeType::Element)
            .ok_or_else(|| Error::dom("setAttribute called on a non-element node"))?;

        match node.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => node.attributes.push(Attribute { name, value }),
        }
        Ok(())
    }

    /// Remove an attribute
    pub fn remove_attribute(&self, name: &str) {
        let name = name.to_ascii_lowercase();
        if let Some(node) = self.nodes.write().get_mut(&self.id) {
            node.attributes.retain(|a| a.name != name);
        }
    }

    /// Get all attributes in order
    pub fn attributes(&self) -> Vec<Attribute> {
        self.nodes
            .read()
            .get(&self.id)
            .map(|n| n.attributes.clone())
            .unwrap_or_default()
    }

    /// Get parent node
    pub fn parent(&self) -> Option<Node> {
        self.nodes
            .read()
            .get(&self.id)
            .and_then(|n| n.parent)
            .map(|id| self.handle(id))
    }

    /// Get child nodes
    pub fn children(&self) -> Vec<Node> {
        let ids = self
            .nodes
            .read()
            .get(&self.id)
            .map(|n| n.children.clone())
            .unwrap_or_default();
        ids.into_iter().map(|id| self.handle(id)).collect()
    }

    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        self.node_type() == NodeType::Element
    }

    /// Check if this is a text node
    pub fn is_text(&self) -> bool {
        self.node_type() == NodeType::Text
    }

    /// Get inner HTML
    pub fn inner_html(&self) -> String {
        let nodes = self.nodes.read();
        let mut out = String::new();
        if let Some(node) = nodes.get(&self.id) {
            for &id in &node.children {
                serialize_node(&nodes, id, &mut out);
            }
        }
        out
    }

    /// Replace the children with the parsed markup fragment
    pub fn set_inner_html(&self, markup: &str) -> Result<()> {
        let context = match self.node_type() {
            NodeType::Element => self.local_name().unwrap_or_else(|| "div".to_string()),
            other => {
                return Err(Error::dom(format!(
                    "innerHTML is not available on {:?} nodes",
                    other
                )))
            }
        };

        // Parse before locking; the parser never touches our storage
        let fragment = parser::parse_fragment(markup, &context)?;

        let mut nodes = self.nodes.write();
        detach_children(&mut nodes, self.id);
        parser::attach_fragment(&mut nodes, &fragment, self.id);
        Ok(())
    }

    /// Get outer HTML
    pub fn outer_html(&self) -> String {
        let nodes = self.nodes.read();
        let mut out = String::new();
        serialize_node(&nodes, self.id, &mut out);
        out
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Own data for character nodes, concatenated descendant text otherwise.
fn own_text_content(nodes: &HashMap<NodeId, NodeData>, node_id: NodeId, out: &mut String) {
    match nodes.get(&node_id) {
        Some(node) if matches!(node.node_type, NodeType::Text | NodeType::Comment) => {
            out.push_str(node.text_content.as_deref().unwrap_or(""));
        }
        Some(_) => collect_text_content(nodes, node_id, out),
        None => {}
    }
}

fn collect_text_content(nodes: &HashMap<NodeId, NodeData>, node_id: NodeId, out: &mut String) {
    let Some(node) = nodes.get(&node_id) else {
        return;
    };
    match node.node_type {
        NodeType::Text => out.push_str(node.text_content.as_deref().unwrap_or("")),
        NodeType::Element | NodeType::Document => {
            for &child in &node.children {
                collect_text_content(nodes, child, out);
            }
        }
        _ => {}
    }
}

fn collect_rendered_text(nodes: &HashMap<NodeId, NodeData>, node_id: NodeId, out: &mut String) {
    let Some(node) = nodes.get(&node_id) else {
        return;
    };
    match node.node_type {
        NodeType::Text => out.push_str(node.text_content.as_deref().unwrap_or("")),
        NodeType::Element => match node.tag_name.as_deref() {
            Some("br") => out.push('\n'),
            Some(tag) if UNRENDERED_ELEMENTS.contains(&tag) => {}
            _ => {
                for &child in &node.children {
                    collect_rendered_text(nodes, child, out);
                }
            }
        },
        _ => {}
    }
}

/// Serialize a node to HTML
fn serialize_node(nodes: &HashMap<NodeId, NodeData>, node_id: NodeId, out: &mut String) {
    let Some(node) = nodes.get(&node_id) else {
        return;
    };
    match node.node_type {
        NodeType::Text => {
            let text = node.text_content.as_deref().unwrap_or("");
            let raw = node
                .parent
                .and_then(|p| nodes.get(&p))
                .and_then(|p| p.tag_name.as_deref())
                .map(|tag| RAW_TEXT_ELEMENTS.contains(&tag))
                .unwrap_or(false);
            if raw {
                out.push_str(text);
            } else {
                escape_text(text, out);
            }
        }
        NodeType::Comment => {
            out.push_str("<!--");
            out.push_str(node.text_content.as_deref().unwrap_or(""));
            out.push_str("-->");
        }
        NodeType::Element => {
            let tag = node.tag_name.as_deref().unwrap_or("div");
            out.push('<');
            out.push_str(tag);
            for attr in &node.attributes {
                out.push(' ');
                out.push_str(&attr.name);
                out.push_str("=\"");
                escape_attribute(&attr.value, out);
                out.push('"');
            }
            out.push('>');

            if !VOID_ELEMENTS.contains(&tag) {
                for &child in &node.children {
                    serialize_node(nodes, child, out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
        NodeType::Document => {
            for &child in &node.children {
                serialize_node(nodes, child, out);
            }
        }
        NodeType::DocumentType => out.push_str("<!DOCTYPE html>"),
    }
}

fn escape_text(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

fn escape_attribute(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn test_node_id() {
        let id1 = NodeId::new();
        let id2 = NodeId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_node_data() {
        let element = NodeData::element("DIV");
        assert_eq!(element.tag_name, Some("div".to_string()));
        assert_eq!(element.node_type, NodeType::Element);

        let text = NodeData::text("Hello");
        assert_eq!(text.text_content, Some("Hello".to_string()));
        assert_eq!(text.node_type, NodeType::Text);
    }

    #[test]
    fn test_attributes_keep_insertion_order() {
        let doc = Document::new();
        let div = doc.create_element("div");
        div.set_attribute("id", "a").unwrap();
        div.set_attribute("class", "b").unwrap();
        div.set_attribute("ID", "c").unwrap();

        assert_eq!(
            div.attributes(),
            vec![Attribute::new("id", "c"), Attribute::new("class", "b")]
        );
        div.remove_attribute("id");
        assert_eq!(div.get_attribute("id"), None);
        assert_eq!(div.attributes().len(), 1);
    }

    #[test]
    fn test_invalid_attribute_name() {
        let doc = Document::new();
        let div = doc.create_element("div");
        for name in ["", "a b", "x=y", "q\"", "a/b"] {
            assert!(div.set_attribute(name, "v").unwrap_err().is_attribute_error());
        }
        assert!(div.attributes().is_empty());
    }

    #[test]
    fn test_set_attribute_on_text_node() {
        let doc = Document::new();
        let text = doc.create_text_node("hi");
        assert!(matches!(text.set_attribute("id", "x"), Err(Error::Dom(_))));
    }

    #[test]
    fn test_set_text_replaces_children() {
        let doc = Document::new();
        let div = doc.create_element("div");
        div.set_inner_html("<p>one</p><p>two</p>").unwrap();
        assert_eq!(div.children().len(), 2);

        div.set_text_content("<b>hi</b>");
        let children = div.children();
        assert_eq!(children.len(), 1);
        assert!(children[0].is_text());
        assert_eq!(div.text_content(), "<b>hi</b>");
        assert_eq!(div.inner_html(), "&lt;b&gt;hi&lt;/b&gt;");

        div.set_inner_text("");
        assert!(div.children().is_empty());
        assert_eq!(div.inner_text(), "");
    }

    #[test]
    fn test_inner_text_skips_unrendered() {
        let doc = Document::new();
        let div = doc.create_element("div");
        div.set_inner_html("a<script>var x;</script><style>p{}</style>b<br>c")
            .unwrap();

        assert_eq!(div.inner_text(), "ab\nc");
        assert_eq!(div.text_content(), "avar x;p{}bc");
    }

    #[test]
    fn test_inner_html_serialization() {
        let doc = Document::new();
        let div = doc.create_element("div");
        div.set_inner_html(r#"<a href="/x?a=1&amp;b=2" title='say "hi"'>go</a><br><!--c-->"#)
            .unwrap();

        assert_eq!(
            div.inner_html(),
            r#"<a href="/x?a=1&amp;b=2" title="say &quot;hi&quot;">go</a><br><!--c-->"#
        );
    }

    #[test]
    fn test_raw_text_not_escaped() {
        let doc = Document::new();
        let script = doc.create_element("script");
        script.set_text_content("if (a < b) {}");
        assert_eq!(script.outer_html(), "<script>if (a < b) {}</script>");
    }

    #[test]
    fn test_has_property() {
        let doc = Document::new();
        let div = doc.create_element("div");
        assert!(div.has_property(INNER_TEXT));
        assert!(div.has_property(TEXT_CONTENT));
        assert!(div.has_property(INNER_HTML));
        assert!(!div.has_property("outerText"));

        let text = doc.create_text_node("x");
        assert!(!text.has_property(INNER_TEXT));
        assert!(text.has_property(TEXT_CONTENT));

        let gecko = Document::with_config(crate::config::HostConfig::gecko());
        assert!(!gecko.create_element("div").has_property(INNER_TEXT));
    }

    #[test]
    fn test_replaced_children_stay_usable() {
        let doc = Document::new();
        let div = doc.create_element("div");
        div.set_inner_html("<p>old</p>").unwrap();
        let p = div.children().remove(0);
        let before = doc.node_count();

        div.set_text_content("new");
        assert!(p.parent().is_none());
        assert_eq!(p.text_content(), "old");
        p.set_attribute("id", "kept").unwrap();
        assert_eq!(p.outer_html(), r#"<p id="kept">old</p>"#);
        assert_eq!(doc.node_count(), before + 1);

        doc.release(&p);
        assert_eq!(doc.node_count(), before - 1);
    }

    #[test]
    fn test_document_root_writes() {
        let doc = crate::dom::parse_html("<html><body><p>x</p></body></html>").unwrap();
        let root = doc.root();
        let before = doc.outer_html();

        root.set_text_content("gone");
        root.set_inner_text("gone");
        assert_eq!(doc.outer_html(), before);
        assert!(!root.has_property(INNER_HTML));
        assert!(matches!(root.set_inner_html("<p>y</p>"), Err(Error::Dom(_))));
        assert_eq!(doc.outer_html(), before);
    }

    #[test]
    fn test_attribute_names_fold_ascii_only() {
        let doc = Document::new();
        let div = doc.create_element("div");
        div.set_attribute("Data-\u{C9}tat", "1").unwrap();

        assert_eq!(div.attributes()[0].name, "data-\u{C9}tat");
        assert_eq!(div.get_attribute("DATA-\u{C9}TAT"), Some("1".to_string()));
        assert_eq!(div.get_attribute("data-\u{E9}tat"), None);

        div.remove_attribute("data-\u{E9}tat");
        assert_eq!(div.attributes().len(), 1);
        div.remove_attribute("DATA-\u{C9}tat");
        assert!(div.attributes().is_empty());
    }
}
